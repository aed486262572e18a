//! # wbwt
//!
//! Word-based Burrows-Wheeler compression for short, word-repetitive
//! natural-language text. Tokenizes on whole words rather than bytes, so
//! common word variants (case, whitespace runs, digit runs) collapse onto a
//! handful of dictionary entries before the transform stages ever run.
//!
//! Pipeline: tokenize → normalize → dictionary ids → cyclic BWT →
//! move-to-front → RUNA/RUNB zero-run coding → adaptive arithmetic coding →
//! framed container.
//!
//! ## Example
//!
//! ```rs
//! use wbwt::*;
//! let payload = compress("word word word word");
//! let bytes = serialize(&payload);
//! let back = deserialize(&bytes).expect("decode failed");
//! assert_eq!(decompress(&back), "word word word word");
//! ```

pub mod arith;
pub mod bwt;
mod codec;
pub mod container;
pub mod dictionary;
pub mod fenwick;
pub mod io;
pub mod mtf;
pub mod runs;
pub mod text;

pub use codec::{compress, decompress};
pub use container::{deserialize, serialize, Payload};

/// Codec errors. Internal invariant violations (dictionary or token count
/// beyond 2^31) are not reachable from any documented input and are left as
/// `debug_assert!`s rather than given a variant here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid container header")]
    InvalidHeader,
    #[error("corrupt frame")]
    CorruptFrame,
}

/// Caller-tunable knobs, following the same small `Options`/`STD_OPTIONS`
/// shape used for compression parameters elsewhere in this family of
/// codecs.
#[derive(Clone)]
pub struct Options {
    /// Inputs longer than this are rejected by the CLI driver before they
    /// ever reach the codec; the library functions themselves have no
    /// length limit of their own.
    pub max_input_chars: usize,
}

pub const STD_OPTIONS: Options = Options { max_input_chars: 20_000 };
