use crate::alphabet::{normalize, Letter, ALPHABET_SIZE};
use crate::config::SymbolPolicy;
use crate::error::Result;

/// Occurrence counts for each letter, indexed by `letter - 'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn from_counts(counts: [u64; ALPHABET_SIZE]) -> Self {
        FrequencyTable { counts }
    }

    pub fn from_letters(letters: &[Letter]) -> Self {
        let counts = letters.iter().fold([0u64; ALPHABET_SIZE], |mut acc, letter| {
            acc[letter.index()] += 1;
            acc
        });
        FrequencyTable { counts }
    }

    pub fn from_text(text: &str, policy: SymbolPolicy) -> Result<Self> {
        let letters = normalize(text, policy)?;
        Ok(Self::from_letters(&letters))
    }

    pub fn count(&self, letter: Letter) -> u64 {
        self.counts[letter.index()]
    }

    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c))
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Number of letters that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(letter, count)` pairs in alphabetical order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Letter, u64)> + '_ {
        Letter::all().map(move |letter| (letter, self.count(letter)))
    }
}
