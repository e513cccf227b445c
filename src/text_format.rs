//! Reading and writing the plain-text artifacts: source text, the code
//! table and sentinel-terminated encoded messages.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::code_table::CodeTable;
use crate::compressed_data::PackedMessage;
use crate::error::{HuffmanError, Result};
use crate::huffman_codec::EncodedMessage;

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| HuffmanError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Cuts `text` at the first `sentinel`, if any.
pub fn strip_sentinel(text: &str, sentinel: char) -> &str {
    match text.find(sentinel) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Reads source text, stopping at the first sentinel.
pub fn read_source_text(path: &Path, sentinel: char) -> Result<String> {
    let text = read_to_string(path)?;
    let body = strip_sentinel(&text, sentinel);
    debug!(path = %path.display(), chars = body.chars().count(), "read source text");
    Ok(body.to_string())
}

/// Reads an encoded message and returns only the bits before the sentinel.
/// Surrounding whitespace is ignored.
pub fn read_encoded_message(path: &Path, sentinel: char) -> Result<String> {
    let text = read_to_string(path)?;
    Ok(strip_sentinel(text.trim(), sentinel).trim_end().to_string())
}

pub fn write_encoded_message(path: &Path, encoded: &EncodedMessage, sentinel: char) -> Result<()> {
    fs::write(path, encoded.persisted(sentinel))?;
    debug!(path = %path.display(), bits = encoded.bit_len(), "wrote encoded message");
    Ok(())
}

pub fn write_code_table(path: &Path, table: &CodeTable) -> Result<()> {
    fs::write(path, table.to_string())?;
    debug!(path = %path.display(), entries = table.len(), "wrote code table");
    Ok(())
}

pub fn read_code_table(path: &Path) -> Result<CodeTable> {
    read_to_string(path)?.parse()
}

pub fn write_packed(path: &Path, packed: &PackedMessage) -> Result<()> {
    fs::write(path, packed.serialize()?)?;
    Ok(())
}

pub fn read_packed(path: &Path) -> Result<PackedMessage> {
    let bytes = fs::read(path).map_err(|source| HuffmanError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    PackedMessage::deserialize(&bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_cuts_text() {
        assert_eq!(strip_sentinel("0101*junk", '*'), "0101");
        assert_eq!(strip_sentinel("0101", '*'), "0101");
        assert_eq!(strip_sentinel("*", '*'), "");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = read_source_text(Path::new("/definitely/not/here.txt"), '*').unwrap_err();
        assert!(matches!(err, HuffmanError::SourceUnavailable { .. }));
    }
}
