//! The fixed 26-letter alphabet and input normalization.

use std::fmt;

use tracing::debug;

use crate::config::SymbolPolicy;
use crate::error::{HuffmanError, Result};

pub const ALPHABET_SIZE: usize = 26;

/// One of the lowercase letters `a..=z`, stored as its offset from `'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Accepts ASCII letters of either case.
    pub fn from_char(c: char) -> Option<Letter> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_lowercase() as u8 - b'a'))
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Letter> {
        (index < ALPHABET_SIZE).then_some(Letter(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// All letters in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Turns raw text into letters.
///
/// Letters are lowercased and whitespace is always skipped. Anything else
/// is rejected or dropped according to `policy`. Positions in
/// [`HuffmanError::InvalidSymbol`] count chars, not bytes.
pub fn normalize(text: &str, policy: SymbolPolicy) -> Result<Vec<Letter>> {
    let mut letters = Vec::with_capacity(text.len());
    for (position, c) in text.chars().enumerate() {
        if let Some(letter) = Letter::from_char(c) {
            letters.push(letter);
        } else if c.is_whitespace() {
            continue;
        } else {
            match policy {
                SymbolPolicy::Reject => {
                    return Err(HuffmanError::InvalidSymbol { symbol: c, position });
                }
                SymbolPolicy::Ignore => {
                    debug!(symbol = ?c, position, "ignoring non-letter input");
                }
            }
        }
    }
    Ok(letters)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn letters_roundtrip_through_chars() {
        let all: String = Letter::all().map(Letter::as_char).collect();
        assert_eq!(all, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(Letter::from_char('Q').map(Letter::index), Some(16));
        assert_eq!(Letter::from_char('é'), None);
        assert_eq!(Letter::from_index(26), None);
    }

    #[test]
    fn normalize_lowercases_and_skips_whitespace() {
        let letters = normalize("Ab C\n d\t", SymbolPolicy::Reject).unwrap();
        let s: String = letters.iter().map(|l| l.as_char()).collect();
        assert_eq!(s, "abcd");
    }

    #[test]
    fn normalize_rejects_punctuation_by_default() {
        let err = normalize("ab,c", SymbolPolicy::Reject).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidSymbol { symbol: ',', position: 2 }));
    }

    #[test]
    fn normalize_can_ignore_punctuation() {
        let letters = normalize("a-b!c9", SymbolPolicy::Ignore).unwrap();
        assert_eq!(letters.len(), 3);
    }
}
