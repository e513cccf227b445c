//! # letter_huffman
//!
//! Static Huffman coding over the 26 lowercase letters.
//!
//! A tree is built from the letter frequencies of an input text, then used
//! to encode text into a `'0'`/`'1'` string and decode such strings back.
//! Every tree has exactly 51 nodes (26 leaves, 25 merges), kept in an arena
//! and linked by index.
//!
//! ## Quick Start
//!
//! ```rust
//! use letter_huffman::{CodecConfig, HuffmanCodec};
//!
//! let (codec, encoded) = HuffmanCodec::build_and_encode("aabbbcccc", CodecConfig::default())?;
//! let decoded = codec.decode(&encoded.bits)?;
//! assert_eq!(decoded.text, "aabbbcccc");
//!
//! // letter<TAB>code, one line per leaf
//! print!("{}", codec.dump_code_table());
//! # Ok::<(), letter_huffman::HuffmanError>(())
//! ```

pub mod alphabet;
pub mod code_table;
pub mod compressed_data;
pub mod config;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod text_format;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

// Re-export main types for convenience
pub use alphabet::Letter;
pub use code_table::{CodeEntry, CodeTable};
pub use compressed_data::PackedMessage;
pub use config::{CodecConfig, SymbolPolicy, TrailingBits};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{DecodedMessage, EncodedMessage, HuffmanCodec};
pub use hufftree::{HuffmanTree, NodeDescriptor, NodeId};
