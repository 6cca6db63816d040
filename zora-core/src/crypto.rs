/// Keyed XOR scrambling of the 20-symbol secret frame

/// Symbols in one secret frame
pub const FRAME_LEN: usize = 20;

/// Cipher stream. Key `k` uses the 20 entries starting at `4 * k`.
pub const CIPHER: [u8; 48] = [
    21, 35, 46, 4, 13, 63, 26, 16, //
    58, 47, 30, 32, 15, 62, 54, 55, //
    9, 41, 59, 49, 2, 22, 61, 56, //
    40, 19, 52, 50, 1, 11, 10, 53, //
    14, 27, 18, 44, 33, 45, 37, 48, //
    25, 42, 6, 57, 60, 23, 51, 24,
];

const KEY_SHIFT: u8 = 3;
const LOW_BITS: u8 = 0b111;

/// Derive the 3-bit cipher key from a game id
#[inline]
pub fn cipher_key(game_id: u16) -> u8 {
    (((game_id >> 8) + (game_id & 0xFF)) & 7) as u8
}

/// Key bits as they sit in the top of symbol 0
#[inline]
fn stored_key(frame: &[u8; FRAME_LEN]) -> u8 {
    (frame[0] >> KEY_SHIFT) & LOW_BITS
}

/// XOR every symbol with the key's cipher window, keeping the key bits readable
fn apply(frame: &mut [u8; FRAME_LEN]) {
    let key = stored_key(frame);
    let window = &CIPHER[key as usize * 4..key as usize * 4 + FRAME_LEN];

    for (sym, &c) in frame.iter_mut().zip(window) {
        *sym ^= c;
    }

    frame[0] = (frame[0] & LOW_BITS) | (key << KEY_SHIFT);
}

/// Scramble a packed frame in place
pub fn scramble(frame: &mut [u8; FRAME_LEN]) {
    apply(frame);
}

/// Undo [`scramble`] in place
pub fn unscramble(frame: &mut [u8; FRAME_LEN]) {
    apply(frame);
}
