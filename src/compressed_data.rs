use std::io::{Cursor, Read, Write};

use crate::alphabet::ALPHABET_SIZE;
use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Binary container for an encoded message that carries its own
/// frequencies, so the tree can be rebuilt without the source text.
///
/// Layout, all integers little-endian:
/// `26 x u64 frequencies | u64 bit count | u64 byte length | packed bits`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedMessage {
    pub frequencies: FrequencyTable,
    pub bits: BitVec,
}

impl PackedMessage {
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();

        // write the frequency of every letter, zeros included
        for count in self.frequencies.counts() {
            bytes.write_all(&count.to_le_bytes())?;
        }

        // write the total bit count
        let bit_count = self.bits.bit_count() as u64;
        bytes.write_all(&bit_count.to_le_bytes())?;

        // write packed data length, then data
        let data = self.bits.as_bytes();
        bytes.write_all(&(data.len() as u64).to_le_bytes())?;
        bytes.write_all(data)?;

        Ok(bytes)
    }

    pub fn deserialize(data: &[u8]) -> Result<PackedMessage> {
        let mut cursor = Cursor::new(data);
        let truncated = |what: &str| HuffmanError::MalformedPacked(format!("truncated {what}"));

        let mut counts = [0u64; ALPHABET_SIZE];
        for count in counts.iter_mut() {
            *count = read_u64(&mut cursor).map_err(|_| truncated("frequency table"))?;
        }

        let bit_count = read_u64(&mut cursor).map_err(|_| truncated("bit count"))? as usize;
        let data_len = read_u64(&mut cursor).map_err(|_| truncated("data length"))? as usize;

        if data_len != bit_count.div_ceil(8) {
            return Err(HuffmanError::MalformedPacked(format!(
                "{data_len} bytes cannot hold exactly {bit_count} bits"
            )));
        }

        let frequencies = FrequencyTable::from_counts(counts);
        if frequencies.checked_total().is_none() {
            return Err(HuffmanError::MalformedPacked(
                "letter frequencies overflow a 64-bit total".to_string(),
            ));
        }

        // never allocate more than the input actually holds
        let rest = &data[cursor.position() as usize..];
        if data_len > rest.len() {
            return Err(truncated("bit data"));
        }
        if data_len < rest.len() {
            return Err(HuffmanError::MalformedPacked("trailing bytes after bit data".to_string()));
        }
        let packed = rest.to_vec();

        Ok(PackedMessage {
            frequencies,
            bits: BitVec::from((bit_count, packed)),
        })
    }
}

fn read_u64(cursor: &mut Cursor<&[u8]>) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    cursor.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
