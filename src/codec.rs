//! Top-level pipeline wiring: text <-> [`Payload`].

use crate::container::Payload;
use crate::{bwt, dictionary, mtf, text};

/// Empty input is the canonical empty form: an empty dictionary and an
/// empty move-to-front stream, bypassing the BWT/MTF stages entirely.
pub fn compress(input: &str) -> Payload {
    let raw_tokens = text::tokenize(input);
    let normalized = text::normalize(&raw_tokens);
    if normalized.is_empty() {
        log::debug!("compress: empty normalized stream, returning canonical empty payload");
        return Payload { dictionary: vec![], primary_index: 0, mtf: vec![] };
    }

    let (dict, mut ids) = dictionary::build(&normalized);
    ids.push(0);
    let alphabet_size = dict.len() + 1;

    log::debug!(
        "compress: {} tokens, {} dictionary entries",
        ids.len(),
        dict.len()
    );

    let (l, primary_index) = bwt::forward(&ids);
    let mtf_stream = mtf::forward(&l, alphabet_size);

    Payload { dictionary: dict, primary_index, mtf: mtf_stream }
}

/// Empty if the dictionary is empty or the MTF stream is empty.
pub fn decompress(payload: &Payload) -> String {
    if payload.dictionary.is_empty() || payload.mtf.is_empty() {
        return String::new();
    }

    let alphabet_size = payload.dictionary.len() + 1;
    let l = mtf::inverse(&payload.mtf, alphabet_size);
    let ids = bwt::inverse(&l, payload.primary_index, alphabet_size);

    log::debug!("decompress: recovered {} ids", ids.len());

    let normalized_ids = &ids[..ids.len().saturating_sub(1)];
    let normalized_tokens: Vec<String> = normalized_ids
        .iter()
        .map(|&id| payload.dictionary[(id - 1) as usize].clone())
        .collect();
    text::render(&normalized_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(s: &str) {
        let payload = compress(s);
        assert_eq!(decompress(&payload), s, "round trip failed for {s:?}");
    }

    #[test]
    fn scenario_empty_string() {
        let payload = compress("");
        assert!(payload.dictionary.is_empty());
        assert_eq!(payload.mtf.len(), 0);
        assert_eq!(decompress(&payload), "");
    }

    #[test]
    fn scenario_single_char() {
        let payload = compress("a");
        assert_eq!(payload.dictionary, vec!["a"]);
        round_trip("a");
    }

    #[test]
    fn scenario_case_folding() {
        round_trip("Hello HELLO hello\n");
        let payload = compress("Hello HELLO hello\n");
        assert_eq!(payload.dictionary.iter().filter(|t| t.as_str() == "hello").count(), 1);
    }

    #[test]
    fn scenario_repeated_word_compresses() {
        let input = "word word word word";
        let payload = compress(input);
        assert!(payload.mtf.iter().filter(|&&v| v == 0).count() >= payload.mtf.len() / 2);
        let bytes = crate::container::serialize(&payload);
        assert!(bytes.len() < input.len());
    }

    #[test]
    fn scenario_escape_sequence() {
        round_trip("\u{1f}\u{1f}\u{1f}");
    }

    #[test]
    fn round_trips_whitespace_only_and_mixed_utf8() {
        round_trip("   ");
        round_trip("\n\n\n");
        round_trip("\t");
        round_trip("héllo wörld \u{1F600}");
    }

    #[test]
    fn round_trips_long_input() {
        let mut s = String::new();
        for i in 0..2000 {
            s.push_str(&format!("word{} ", i % 37));
        }
        round_trip(&s);
    }

    #[test]
    fn serialize_deserialize_preserves_fields() {
        for s in ["", "a", "Hello HELLO hello\n", "word word word word"] {
            let payload = compress(s);
            let bytes = crate::container::serialize(&payload);
            let back = crate::container::deserialize(&bytes).unwrap();
            assert_eq!(back, payload);
        }
    }
}
