/// Bits packed MSB-first into bytes.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        // make a new byte if needed
        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Pushes a '0'/'1' string. On anything else, returns the offending
    /// char and its position; bits before it stay pushed.
    pub fn push_code(&mut self, code: &str) -> Result<(), (usize, char)> {
        for (position, c) in code.chars().enumerate() {
            match c {
                '0' => self.push_bit(false),
                '1' => self.push_bit(true),
                other => return Err((position, other)),
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        let byte = self.bits[index / 8];
        Some(byte & (1 << (7 - index % 8)) != 0)
    }

    pub fn to_bit_string(&self) -> String {
        (0..self.bit_count)
            .filter_map(|i| self.get(i))
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl From<(usize, Vec<u8>)> for BitVec {
    fn from((bit_count, bits): (usize, Vec<u8>)) -> Self {
        BitVec { bits, bit_count }
    }
}
