//! Adaptive binary arithmetic coder (Witten/Neal/Cleary, 1987) driving its
//! cumulative frequencies from a [`Fenwick`] model. Operates over a 32-bit
//! working register per the original algorithm, with the usual
//! E1/E2/E3 bit-pending underflow handling.

use crate::fenwick::Fenwick;
use crate::io::{BitReader, BitWriter};
use crate::Error;

const CODE_BITS: u32 = 32;
const TOP: u32 = 0xFFFF_FFFF;
const HALF: u32 = 0x8000_0000;
const Q1: u32 = 0x4000_0000;
const Q3: u32 = 0xC000_0000;

struct Encoder {
    low: u32,
    high: u32,
    pending: u64,
    out: BitWriter,
}

impl Encoder {
    fn new() -> Self {
        Self { low: 0, high: TOP, pending: 0, out: BitWriter::new() }
    }

    fn emit(&mut self, bit: u8) {
        self.out.push_bit(bit);
        while self.pending > 0 {
            self.out.push_bit(bit ^ 1);
            self.pending -= 1;
        }
    }

    fn encode(&mut self, cum_low: u32, cum_high: u32, total: u32) {
        let range = (self.high - self.low) as u64 + 1;
        self.high = self.low + ((range * cum_high as u64) / total as u64) as u32 - 1;
        self.low += ((range * cum_low as u64) / total as u64) as u32;

        loop {
            if self.high < HALF {
                self.emit(0);
            } else if self.low >= HALF {
                self.emit(1);
                self.low -= HALF;
                self.high -= HALF;
            } else if self.low >= Q1 && self.high < Q3 {
                self.pending += 1;
                self.low -= Q1;
                self.high -= Q1;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.pending += 1;
        if self.low < Q1 {
            self.emit(0);
        } else {
            self.emit(1);
        }
        self.out.finish()
    }
}

struct Decoder<'a> {
    low: u32,
    high: u32,
    value: u32,
    input: BitReader<'a>,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        let mut input = BitReader::new(bytes);
        let mut value = 0u32;
        for _ in 0..CODE_BITS {
            value = (value << 1) | input.read_bit() as u32;
        }
        Self { low: 0, high: TOP, value, input }
    }

    fn cum_freq(&self, total: u32) -> u32 {
        let range = (self.high - self.low) as u64 + 1;
        let numerator = (self.value - self.low) as u64 * total as u64 + (total as u64 - 1);
        (numerator / range) as u32
    }

    fn consume(&mut self, cum_low: u32, cum_high: u32, total: u32) {
        let range = (self.high - self.low) as u64 + 1;
        self.high = self.low + ((range * cum_high as u64) / total as u64) as u32 - 1;
        self.low += ((range * cum_low as u64) / total as u64) as u32;

        loop {
            if self.high < HALF {
                // no-op, both below half
            } else if self.low >= HALF {
                self.low -= HALF;
                self.high -= HALF;
                self.value -= HALF;
            } else if self.low >= Q1 && self.high < Q3 {
                self.low -= Q1;
                self.high -= Q1;
                self.value -= Q1;
            } else {
                break;
            }
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | self.input.read_bit() as u32;
        }
    }
}

/// Encodes `symbols` (each `< alphabet_size`) with an adaptive model that
/// starts uniform over `alphabet_size` symbols and updates after every
/// emitted symbol.
pub fn encode_symbols(symbols: &[u32], alphabet_size: usize) -> Vec<u8> {
    let mut model = Fenwick::new(alphabet_size);
    let mut enc = Encoder::new();
    for &sym in symbols {
        let i = sym as usize + 1;
        let cum_low = model.sum(i - 1);
        let cum_high = model.sum(i);
        enc.encode(cum_low, cum_high, model.total());
        model.add(i, 1);
    }
    enc.finish()
}

/// Decodes exactly `count` symbols over an `alphabet_size`-symbol alphabet.
pub fn decode_symbols(bytes: &[u8], alphabet_size: usize, count: usize) -> Result<Vec<u32>, Error> {
    let mut model = Fenwick::new(alphabet_size);
    let mut dec = Decoder::new(bytes);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let target = dec.cum_freq(model.total());
        if target >= model.total() {
            return Err(Error::CorruptFrame);
        }
        let i = model.find_by_cumulative(target);
        if i == 0 || i > alphabet_size {
            return Err(Error::CorruptFrame);
        }
        let cum_low = model.sum(i - 1);
        let cum_high = model.sum(i);
        dec.consume(cum_low, cum_high, model.total());
        model.add(i, 1);
        out.push((i - 1) as u32);
    }
    if dec.input.overrun_bits() > CODE_BITS as usize {
        return Err(Error::CorruptFrame);
    }
    Ok(out)
}
