use tracing::{info, warn};

use crate::alphabet::{normalize, Letter, ALPHABET_SIZE};
use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::compressed_data::PackedMessage;
use crate::config::{CodecConfig, TrailingBits};
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{HuffmanTree, NodeDescriptor};

/// Output of [`HuffmanCodec::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    pub bits: String,
    pub symbol_count: usize,
}

impl EncodedMessage {
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// The bits followed by the end-of-message sentinel.
    pub fn persisted(&self, sentinel: char) -> String {
        let mut out = String::with_capacity(self.bits.len() + 1);
        out.push_str(&self.bits);
        out.push(sentinel);
        out
    }
}

/// Output of [`HuffmanCodec::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    pub text: String,
    /// Bits left over after the last complete symbol; always 0 unless
    /// [`TrailingBits::Drop`] is in effect.
    pub dropped_bits: usize,
}

/// A built tree plus the settings used to encode and decode with it.
///
/// Each codec owns its tree. Decoding borrows it immutably, so one codec
/// can serve any number of decode calls and a failed call leaves it intact.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: [String; ALPHABET_SIZE], // indexed by Letter::index
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let encode_table = std::array::from_fn(|i| {
            Letter::from_index(i)
                .map(|l| tree.code_for(l).to_string())
                .unwrap_or_default()
        });
        Ok(HuffmanCodec {
            tree,
            encode_table,
            config,
        })
    }

    pub fn from_text(text: &str, config: CodecConfig) -> Result<Self> {
        let tree = HuffmanTree::from_text(text, config.symbols)?;
        Self::new(tree, config)
    }

    pub fn from_frequencies(frequencies: &FrequencyTable, config: CodecConfig) -> Result<Self> {
        Self::new(HuffmanTree::from_frequencies(frequencies)?, config)
    }

    /// Builds a fresh tree from `input` and encodes `input` with it.
    pub fn build_and_encode(input: &str, config: CodecConfig) -> Result<(Self, EncodedMessage)> {
        config.validate()?;
        let letters = normalize(input, config.symbols)?;
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_letters(&letters))?;
        let codec = Self::new(tree, config)?;
        let encoded = codec.encode_letters(&letters);
        Ok((codec, encoded))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, text: &str) -> Result<EncodedMessage> {
        let letters = normalize(text, self.config.symbols)?;
        Ok(self.encode_letters(&letters))
    }

    fn encode_letters(&self, letters: &[Letter]) -> EncodedMessage {
        let bits: String = letters
            .iter()
            .map(|l| self.encode_table[l.index()].as_str())
            .collect();
        info!(symbols = letters.len(), bits = bits.len(), "encoded message");
        EncodedMessage {
            bits,
            symbol_count: letters.len(),
        }
    }

    /// Decodes a '0'/'1' string whose sentinel has already been stripped.
    pub fn decode(&self, code: &str) -> Result<DecodedMessage> {
        if code.is_empty() {
            return Err(HuffmanError::EmptyCode);
        }

        let root = self.tree.root();
        let mut current = root;
        let mut pending = 0;
        let mut text = String::new();

        for (position, bit) in code.chars().enumerate() {
            current = self
                .tree
                .step(current, bit)
                .ok_or(HuffmanError::MalformedCode { found: bit, position })?;
            pending += 1;

            if let Some(letter) = self.tree[current].letter() {
                text.push(letter.as_char());
                current = root;
                pending = 0;
            }
        }

        if current != root {
            match self.config.trailing_bits {
                TrailingBits::Reject => {
                    return Err(HuffmanError::IncompletePath { trailing_bits: pending });
                }
                TrailingBits::Drop => {
                    warn!(trailing_bits = pending, "dropping incomplete trailing code");
                }
            }
        }

        info!(bits = code.len(), symbols = text.len(), "decoded message");
        Ok(DecodedMessage {
            text,
            dropped_bits: pending,
        })
    }

    pub fn dump_tree(&self) -> Vec<NodeDescriptor> {
        self.tree.descriptors()
    }

    pub fn dump_code_table(&self) -> CodeTable {
        self.tree.code_table()
    }

    /// Packs an encoded message together with this codec's frequencies.
    pub fn pack(&self, encoded: &EncodedMessage) -> Result<PackedMessage> {
        let mut bits = BitVec::new();
        bits.push_code(&encoded.bits)
            .map_err(|(position, found)| HuffmanError::MalformedCode { found, position })?;
        Ok(PackedMessage {
            frequencies: *self.tree.frequencies(),
            bits,
        })
    }

    /// Rebuilds the codec a packed message was made with and decodes it.
    pub fn unpack(packed: &PackedMessage, config: CodecConfig) -> Result<(Self, DecodedMessage)> {
        let codec = Self::from_frequencies(&packed.frequencies, config)?;
        let bits = packed.bits.to_bit_string();
        let decoded = if bits.is_empty() {
            DecodedMessage { text: String::new(), dropped_bits: 0 }
        } else {
            codec.decode(&bits)?
        };
        Ok((codec, decoded))
    }
}
