/// Frame sealing and opening: symbol packing, checksum and scrambling
use crate::bits::{BitSequence, SYMBOL_BITS};
use crate::crypto::{FRAME_LEN, scramble, unscramble};
use crate::error::{Result, SecretError};

/// Index of the checksum symbol
pub const CHECKSUM_INDEX: usize = FRAME_LEN - 1;

/// Largest value a symbol can hold
pub const MAX_SYMBOL: u8 = (1 << SYMBOL_BITS) - 1;

/// Only these bits of the checksum are compared
const CHECKSUM_MASK: u8 = 0b111;

/// Layout: [fields (114 bits) | zero pad | checksum symbol]
/// Checksum: sum of all symbols, low nibble. The checksum slot must be zero.
pub fn calc_checksum(symbols: &[u8]) -> u8 {
    let sum: u32 = symbols.iter().map(|&s| s as u32).sum();
    (sum & 0x0F) as u8
}

/// Compare a stored checksum against a computed one on the low 3 bits
pub fn checksum_matches(stored: u8, computed: u8) -> bool {
    (stored & CHECKSUM_MASK) == (computed & CHECKSUM_MASK)
}

/// Turn packed field bits into a finished, scrambled secret frame
pub fn seal(mut bits: BitSequence) -> Result<[u8; FRAME_LEN]> {
    bits.pad_to(FRAME_LEN * SYMBOL_BITS);
    if bits.len() != FRAME_LEN * SYMBOL_BITS {
        return Err(SecretError::format(format!(
            "packed fields use {} bits, frame holds {}",
            bits.len(),
            FRAME_LEN * SYMBOL_BITS
        )));
    }

    let symbols = bits.to_symbols()?;
    let mut frame = [0u8; FRAME_LEN];
    frame.copy_from_slice(&symbols);

    frame[CHECKSUM_INDEX] = 0;
    frame[CHECKSUM_INDEX] = calc_checksum(&frame);

    scramble(&mut frame);
    Ok(frame)
}

/// Check and unscramble a secret frame, returning the field bits
pub fn open(secret: &[u8]) -> Result<BitSequence> {
    let mut frame: [u8; FRAME_LEN] = secret.try_into().map_err(|_| {
        SecretError::format(format!(
            "wrong length: secret must contain exactly {FRAME_LEN} symbols, got {}",
            secret.len()
        ))
    })?;

    if let Some((i, &sym)) = frame.iter().enumerate().find(|&(_, &s)| s > MAX_SYMBOL) {
        return Err(SecretError::format(format!(
            "symbol {i} has value {sym}, above {MAX_SYMBOL}"
        )));
    }

    unscramble(&mut frame);

    let stored = frame[CHECKSUM_INDEX];
    let mut zeroed = frame;
    zeroed[CHECKSUM_INDEX] = 0;
    let computed = calc_checksum(&zeroed);

    if !checksum_matches(stored, computed) {
        return Err(SecretError::InvalidChecksum { stored, computed });
    }

    Ok(BitSequence::from_symbols(&frame))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; FRAME_LEN] = [
        4, 37, 51, 36, 63, 61, 51, 10, 44, 39, 3, 0, 52, 21, 48, 55, 9, 45, 59, 55,
    ];

    #[test]
    fn test_checksum() {
        let decoded = [1, 6, 29, 32, 50, 2, 41, 26, 22, 8, 29, 32, 59, 43, 6, 0, 0, 4, 0, 0];
        // 390 & 0x0F
        assert_eq!(calc_checksum(&decoded), 6);
        assert_eq!(calc_checksum(&[]), 0);
    }

    #[test]
    fn test_checksum_matches_low_bits_only() {
        assert!(checksum_matches(0b1110, 0b0110));
        assert!(checksum_matches(0b110110, 0b0110));
        assert!(!checksum_matches(0b0111, 0b0110));
    }

    #[test]
    fn test_open_sample() {
        let bits = open(&SAMPLE).unwrap();
        assert_eq!(bits.len(), FRAME_LEN * SYMBOL_BITS);
        assert_eq!(bits.read_reversed(5, 15).unwrap(), 14129);
    }

    #[test]
    fn test_seal_reproduces_sample() {
        let bits = open(&SAMPLE).unwrap();
        let mut symbols = bits.to_symbols().unwrap();
        symbols[CHECKSUM_INDEX] = 0;
        let resealed = seal(BitSequence::from_symbols(&symbols)).unwrap();
        assert_eq!(resealed, SAMPLE);
    }

    #[test]
    fn test_open_wrong_length() {
        let err = open(&SAMPLE[..19]).unwrap_err();
        assert!(matches!(err, SecretError::Format(ref m) if m.contains("wrong length")));
        assert!(open(&[]).is_err());
    }

    #[test]
    fn test_open_symbol_out_of_range() {
        let mut secret = SAMPLE;
        secret[3] = 64;
        assert!(matches!(open(&secret), Err(SecretError::Format(_))));
    }

    #[test]
    fn test_open_bad_checksum() {
        let mut secret = SAMPLE;
        secret[19] ^= 1;
        assert!(matches!(
            open(&secret),
            Err(SecretError::InvalidChecksum { .. })
        ));
    }

    #[test]
    fn test_seal_rejects_oversized_fields() {
        let mut bits = BitSequence::new();
        bits.pad_to(FRAME_LEN * SYMBOL_BITS + 1);
        assert!(seal(bits).is_err());
    }
}
