/// Bit sequences over 6-bit secret symbols, with reversed-order field access
use std::fmt;

use crate::error::{Result, SecretError};

/// Number of bits carried by one secret symbol
pub const SYMBOL_BITS: usize = 6;

/// An ordered run of bits, most-significant bit of each symbol first.
///
/// Multi-bit fields are stored least-significant bit first: a field is read by
/// reversing its bits and parsing the result as a big-endian number, and
/// written by the inverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// `len` zero bits
    pub fn zeroed(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Concatenate the 6 bits of every symbol, MSB first
    pub fn from_symbols(symbols: &[u8]) -> Self {
        let mut seq = Self::with_capacity(symbols.len() * SYMBOL_BITS);
        for &sym in symbols {
            for shift in (0..SYMBOL_BITS).rev() {
                seq.bits.push((sym >> shift) & 1 == 1);
            }
        }
        seq
    }

    /// Regroup the bits into symbols; the length must be a whole number of symbols
    pub fn to_symbols(&self) -> Result<Vec<u8>> {
        if self.bits.len() % SYMBOL_BITS != 0 {
            return Err(SecretError::format(format!(
                "bit sequence length {} is not a multiple of {}",
                self.bits.len(),
                SYMBOL_BITS
            )));
        }

        Ok(self
            .bits
            .chunks_exact(SYMBOL_BITS)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, index: usize) -> Result<bool> {
        self.bits
            .get(index)
            .copied()
            .ok_or_else(|| SecretError::format(format!("bit {index} is out of bounds")))
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    fn field_range(&self, offset: usize, width: usize) -> Result<std::ops::Range<usize>> {
        if width > 32 {
            return Err(SecretError::format(format!("field width {width} exceeds 32 bits")));
        }
        let end = offset + width;
        if end > self.bits.len() {
            return Err(SecretError::format(format!(
                "field {offset}..{end} is outside a {}-bit sequence",
                self.bits.len()
            )));
        }
        Ok(offset..end)
    }

    /// Read `width` bits at `offset`, reversed, as an unsigned number
    pub fn read_reversed(&self, offset: usize, width: usize) -> Result<u32> {
        let range = self.field_range(offset, width)?;
        Ok(self.bits[range]
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 1) | b as u32))
    }

    /// Splice the low `width` bits of `value` in at `offset`, least-significant bit first
    pub fn write_reversed(&mut self, offset: usize, width: usize, value: u32) -> Result<()> {
        let range = self.field_range(offset, width)?;
        if width < 32 && value >> width != 0 {
            return Err(SecretError::format(format!(
                "value {value} does not fit in {width} bits"
            )));
        }
        for (shift, bit) in self.bits[range].iter_mut().enumerate() {
            *bit = (value >> shift) & 1 == 1;
        }
        Ok(())
    }

    /// Zero-fill up to `len` bits
    pub fn pad_to(&mut self, len: usize) {
        if self.bits.len() < len {
            self.bits.resize(len, false);
        }
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_symbols_msb_first() {
        let seq = BitSequence::from_symbols(&[0b100001, 0b000011]);
        assert_eq!(seq.to_string(), "100001000011");
        assert_eq!(seq.len(), 12);
    }

    #[test]
    fn test_to_symbols_rejects_partial_symbol() {
        let mut seq = BitSequence::from_symbols(&[63]);
        seq.push_bit(true);
        let err = seq.to_symbols().unwrap_err();
        assert!(matches!(err, SecretError::Format(_)));
    }

    #[test]
    fn test_read_reversed() {
        // "110" reversed is "011"
        let seq = BitSequence::from_symbols(&[0b110000]);
        assert_eq!(seq.read_reversed(0, 3).unwrap(), 0b011);
        assert_eq!(seq.read_reversed(1, 1).unwrap(), 1);
        assert_eq!(seq.read_reversed(3, 3).unwrap(), 0);
    }

    #[test]
    fn test_write_reversed() {
        let mut seq = BitSequence::zeroed(6);
        seq.write_reversed(0, 3, 0b001).unwrap();
        seq.write_reversed(4, 2, 0b10).unwrap();
        assert_eq!(seq.to_string(), "100001");
        assert!(seq.write_reversed(0, 2, 4).is_err());
        assert!(seq.write_reversed(5, 2, 0).is_err());
    }

    #[test]
    fn test_read_out_of_bounds() {
        let seq = BitSequence::from_symbols(&[0, 0]);
        assert!(seq.read_reversed(10, 3).is_err());
        assert!(seq.bit(12).is_err());
        assert!(seq.read_reversed(0, 33).is_err());
    }

    #[test]
    fn test_pad_to() {
        let mut seq = BitSequence::new();
        seq.push_bit(true);
        seq.pad_to(6);
        assert_eq!(seq.to_symbols().unwrap(), vec![0b100000]);
        seq.pad_to(3);
        assert_eq!(seq.len(), 6);
    }

    proptest! {
        #[test]
        fn field_written_is_field_read(value in 0u32..(1 << 15), offset in 0usize..40) {
            let mut seq = BitSequence::zeroed(60);
            seq.write_reversed(offset, 15, value).unwrap();
            prop_assert_eq!(seq.read_reversed(offset, 15).unwrap(), value);
        }

        #[test]
        fn symbols_survive_bit_expansion(symbols in prop::collection::vec(0u8..64, 0..24)) {
            let seq = BitSequence::from_symbols(&symbols);
            prop_assert_eq!(seq.to_symbols().unwrap(), symbols);
        }
    }
}
