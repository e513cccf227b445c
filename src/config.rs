use crate::error::{HuffmanError, Result};

/// What to do with characters that are neither letters nor whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolPolicy {
    /// Fail with [`HuffmanError::InvalidSymbol`].
    #[default]
    Reject,
    /// Drop them silently (logged at debug level).
    Ignore,
}

/// What to do when a code string ends part-way down the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBits {
    /// Discard the partial path and report how many bits were dropped.
    #[default]
    Drop,
    /// Fail with [`HuffmanError::IncompletePath`].
    Reject,
}

pub const DEFAULT_SENTINEL: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub symbols: SymbolPolicy,
    pub trailing_bits: TrailingBits,
    /// End-of-message marker appended to persisted messages.
    pub sentinel: char,
}

impl CodecConfig {
    pub fn with_symbols(mut self, symbols: SymbolPolicy) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_trailing_bits(mut self, trailing_bits: TrailingBits) -> Self {
        self.trailing_bits = trailing_bits;
        self
    }

    pub fn with_sentinel(mut self, sentinel: char) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentinel == '0' || self.sentinel == '1' {
            return Err(HuffmanError::InvalidConfig(format!(
                "sentinel {:?} collides with a code bit",
                self.sentinel
            )));
        }
        if self.sentinel.is_whitespace() {
            // persisted messages are trimmed on read
            return Err(HuffmanError::InvalidConfig(
                "sentinel must not be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            symbols: SymbolPolicy::default(),
            trailing_bits: TrailingBits::default(),
            sentinel: DEFAULT_SENTINEL,
        }
    }
}
