//! Versioned binary container. Encoders emit v4 only; decoders accept
//! v2, v3, and v4, matching the wire-compatibility story of the rest of
//! the pipeline.

use crate::io::{read_u32_le, read_varint, ByteWriter};
use crate::{arith, runs, Error};

const MAGIC: u32 = 0x5742_5754;
const VERSION_4: u32 = 4;

/// The decoded/pre-encoding form of a compressed payload: the dictionary,
/// the BWT primary index, and the move-to-front stream. `dictionary.len()`
/// is `dictCount`; `mtf.len()` is `tokenCount` (the BWT length `n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub dictionary: Vec<String>,
    pub primary_index: usize,
    pub mtf: Vec<u32>,
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn write_front_coded_dict(w: &mut ByteWriter, dict: &[String]) {
    let mut prev: &[u8] = &[];
    for entry in dict {
        let bytes = entry.as_bytes();
        let prefix_len = common_prefix_len(prev, bytes);
        let suffix = &bytes[prefix_len..];
        w.write_varint(prefix_len as u64);
        w.write_varint(suffix.len() as u64);
        w.write_bytes(suffix);
        prev = bytes;
    }
}

fn read_front_coded_dict(buf: &[u8], pos: &mut usize, count: usize) -> Result<Vec<String>, Error> {
    let mut dict = Vec::with_capacity(count);
    let mut prev: Vec<u8> = Vec::new();
    for _ in 0..count {
        let prefix_len = read_varint(buf, pos)? as usize;
        let suffix_len = read_varint(buf, pos)? as usize;
        if prefix_len > prev.len() || *pos + suffix_len > buf.len() {
            return Err(Error::CorruptFrame);
        }
        let mut entry = prev[..prefix_len].to_vec();
        entry.extend_from_slice(&buf[*pos..*pos + suffix_len]);
        *pos += suffix_len;
        let s = String::from_utf8(entry).map_err(|_| Error::CorruptFrame)?;
        prev = s.as_bytes().to_vec();
        dict.push(s);
    }
    Ok(dict)
}

fn read_plain_dict(buf: &[u8], pos: &mut usize, count: usize) -> Result<Vec<String>, Error> {
    let mut dict = Vec::with_capacity(count);
    for _ in 0..count {
        let len = read_varint(buf, pos)? as usize;
        if *pos + len > buf.len() {
            return Err(Error::CorruptFrame);
        }
        let s = String::from_utf8(buf[*pos..*pos + len].to_vec()).map_err(|_| Error::CorruptFrame)?;
        *pos += len;
        dict.push(s);
    }
    Ok(dict)
}

/// v2/v3 legacy MTF coding: a varint stream where the low bit distinguishes
/// a zero run (`(r<<1)|0`) from a literal nonzero value (`(v<<1)|1`).
fn decode_legacy_rle(bytes: &[u8], token_count: usize) -> Result<Vec<u32>, Error> {
    let mut pos = 0;
    let mut out = Vec::with_capacity(token_count);
    while out.len() < token_count {
        let v = read_varint(bytes, &mut pos)?;
        if v & 1 == 0 {
            let run = v >> 1;
            if run as usize > token_count - out.len() {
                return Err(Error::CorruptFrame);
            }
            out.extend(std::iter::repeat(0u32).take(run as usize));
        } else {
            out.push((v >> 1) as u32);
        }
    }
    Ok(out)
}

/// Always emits a v4 frame.
pub fn serialize(payload: &Payload) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_u32_le(MAGIC);
    w.write_u32_le(VERSION_4);
    w.write_varint(payload.dictionary.len() as u64);
    w.write_varint(payload.mtf.len() as u64);
    w.write_varint(payload.primary_index as u64);

    let symbols = runs::mtf_to_symbols(&payload.mtf);
    w.write_varint(symbols.len() as u64);
    write_front_coded_dict(&mut w, &payload.dictionary);

    let arith_alphabet = payload.dictionary.len() + 2;
    let coded = arith::encode_symbols(&symbols, arith_alphabet);
    w.extend_bytes(&coded);
    w.into_vec()
}

fn decode_v4(
    bytes: &[u8],
    pos: &mut usize,
    dict_count: usize,
    token_count: usize,
    primary_index: usize,
) -> Result<Payload, Error> {
    let symbol_count = read_varint(bytes, pos)? as usize;
    let dictionary = read_front_coded_dict(bytes, pos, dict_count)?;
    let arith_alphabet = dict_count + 2;
    let symbols = arith::decode_symbols(&bytes[*pos..], arith_alphabet, symbol_count)?;
    let mtf = runs::symbols_to_mtf(&symbols, token_count);
    if mtf.len() != token_count {
        return Err(Error::CorruptFrame);
    }
    Ok(Payload { dictionary, primary_index, mtf })
}

fn decode_v3(
    bytes: &[u8],
    pos: &mut usize,
    dict_count: usize,
    token_count: usize,
    primary_index: usize,
) -> Result<Payload, Error> {
    let dictionary = read_plain_dict(bytes, pos, dict_count)?;
    let packed_length = read_varint(bytes, pos)? as usize;
    let packed_symbols = arith::decode_symbols(&bytes[*pos..], 256, packed_length)?;
    let packed_bytes: Vec<u8> = packed_symbols.into_iter().map(|v| v as u8).collect();
    let mtf = decode_legacy_rle(&packed_bytes, token_count)?;
    Ok(Payload { dictionary, primary_index, mtf })
}

fn decode_v2(
    bytes: &[u8],
    pos: &mut usize,
    dict_count: usize,
    token_count: usize,
    primary_index: usize,
) -> Result<Payload, Error> {
    let dictionary = read_plain_dict(bytes, pos, dict_count)?;
    let mtf = decode_legacy_rle(&bytes[*pos..], token_count)?;
    Ok(Payload { dictionary, primary_index, mtf })
}

/// Accepts v2, v3, v4; any other version (or a magic mismatch) is a hard
/// error.
pub fn deserialize(bytes: &[u8]) -> Result<Payload, Error> {
    let mut pos = 0;
    let magic = read_u32_le(bytes, &mut pos)?;
    if magic != MAGIC {
        return Err(Error::InvalidHeader);
    }
    let version = read_u32_le(bytes, &mut pos)?;
    let dict_count = read_varint(bytes, &mut pos)? as usize;
    let token_count = read_varint(bytes, &mut pos)? as usize;
    let primary_index = read_varint(bytes, &mut pos)? as usize;

    log::debug!("container: version={version} dictCount={dict_count} tokenCount={token_count}");

    match version {
        4 => decode_v4(bytes, &mut pos, dict_count, token_count, primary_index),
        3 => {
            log::warn!("decoding legacy v3 frame");
            decode_v3(bytes, &mut pos, dict_count, token_count, primary_index)
        }
        2 => {
            log::warn!("decoding legacy v2 frame");
            decode_v2(bytes, &mut pos, dict_count, token_count, primary_index)
        }
        _ => Err(Error::InvalidHeader),
    }
}
