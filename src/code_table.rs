use std::fmt;
use std::str::FromStr;

use crate::alphabet::Letter;
use crate::error::HuffmanError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub letter: Letter,
    pub code: String,
}

/// Letter-to-code mapping in the tree's collection order.
///
/// Persisted as one `letter<TAB>code` line per leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
}

impl CodeTable {
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, letter: Letter) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.letter == letter)
            .map(|entry| entry.code.as_str())
    }

    /// Bits needed to encode `letters`.
    pub fn encoded_len(&self, letters: &[Letter]) -> usize {
        letters.iter().filter_map(|&l| self.get(l)).map(str::len).sum()
    }
}

impl FromIterator<CodeEntry> for CodeTable {
    fn from_iter<I: IntoIterator<Item = CodeEntry>>(iter: I) -> Self {
        CodeTable { entries: iter.into_iter().collect() }
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}\t{}", entry.letter, entry.code)?;
        }
        Ok(())
    }
}

impl FromStr for CodeTable {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let malformed = |reason: &str| HuffmanError::MalformedTable {
                line,
                reason: reason.to_string(),
            };
            if raw.trim().is_empty() {
                continue;
            }

            let (name, code) = raw.split_once('\t').ok_or_else(|| malformed("missing tab"))?;
            let mut chars = name.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_lowercase() => Letter::from_char(c),
                _ => None,
            }
            .ok_or_else(|| malformed("expected a single lowercase letter"))?;

            let code = code.trim_end();
            if code.is_empty() || !code.chars().all(|c| c == '0' || c == '1') {
                return Err(malformed("code must be a non-empty run of 0 and 1"));
            }
            if entries.iter().any(|e: &CodeEntry| e.letter == letter) {
                return Err(malformed("duplicate letter"));
            }
            entries.push(CodeEntry { letter, code: code.to_string() });
        }
        Ok(CodeTable { entries })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(c: char, code: &str) -> CodeEntry {
        CodeEntry { letter: Letter::from_char(c).unwrap(), code: code.to_string() }
    }

    #[test]
    fn renders_tab_separated_lines() {
        let table: CodeTable = vec![entry('q', "110"), entry('e', "0")].into_iter().collect();
        assert_eq!(table.to_string(), "q\t110\ne\t0\n");
    }

    #[test]
    fn parses_what_it_renders() {
        let table: CodeTable = vec![entry('z', "1011"), entry('a', "01")].into_iter().collect();
        let parsed: CodeTable = table.to_string().parse().unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed.get(Letter::from_char('a').unwrap()), Some("01"));
    }

    #[test]
    fn rejects_bad_lines() {
        let cases = ["a 01", "ab\t01", "a\t012", "a\t", "a\t0\na\t1"];
        for case in cases {
            let err = case.parse::<CodeTable>().unwrap_err();
            assert!(matches!(err, HuffmanError::MalformedTable { .. }), "{case:?}");
        }
    }
}
