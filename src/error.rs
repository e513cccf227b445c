use std::io;
use std::path::PathBuf;

use crate::min_heap::HeapErr;

/// Everything that can go wrong while building, encoding, decoding or
/// persisting. No variant is fatal; a codec stays usable after any of them.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    #[error("cannot read input from {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid symbol {symbol:?} at position {position}; only letters a-z are accepted")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("malformed code: {found:?} at bit {position} is not '0' or '1'")]
    MalformedCode { found: char, position: usize },

    #[error("nothing to decode: the code string is empty")]
    EmptyCode,

    #[error("code ends mid-path with {trailing_bits} unconsumed bit(s)")]
    IncompletePath { trailing_bits: usize },

    #[error("letter frequencies sum past u64::MAX")]
    FrequencyOverflow,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed code table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },

    #[error("malformed packed message: {0}")]
    MalformedPacked(String),

    #[error("priority queue failure: {0}")]
    Heap(#[from] HeapErr),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
