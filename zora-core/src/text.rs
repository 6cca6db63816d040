//! Name text codecs for the two release regions.
//!
//! Each region has a fixed 256-entry glyph table. Names are always five
//! bytes wide; short names are padded with the null byte `0x00`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Result, SecretError};
use crate::types::Region;

/// Width of a name field, in characters and in bytes
pub const NAME_LEN: usize = 5;

/// Null sentinel used to pad names
pub const NULL_CHAR: char = '\0';

/// Rendered in place of bytes with no glyph by [`TextCodec::decode_lossy`]
pub const PLACEHOLDER: char = '?';

/// Marks a byte with no glyph
const NO: char = '\u{ffff}';

static US_REVERSE: LazyLock<HashMap<char, u8>> = LazyLock::new(|| reverse_map(&US_GLYPHS));
static JAPAN_REVERSE: LazyLock<HashMap<char, u8>> = LazyLock::new(|| reverse_map(&JAPAN_GLYPHS));

fn reverse_map(glyphs: &[char; 256]) -> HashMap<char, u8> {
    glyphs
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != NO)
        .map(|(byte, &c)| (c, byte as u8))
        .collect()
}

/// Right-trim whitespace, cut to five characters and pad with nulls
pub fn null_pad(name: &str) -> String {
    let cut: String = name.trim_end().chars().take(NAME_LEN).collect();
    cut.trim_end()
        .chars()
        .chain(std::iter::repeat(NULL_CHAR))
        .take(NAME_LEN)
        .collect()
}

/// Strip padding nulls and spaces from both ends
pub fn trim_name(name: &str) -> &str {
    name.trim_matches(|c| c == ' ' || c == NULL_CHAR)
}

/// Byte <-> glyph mapping for one region
#[derive(Debug, Clone, Copy)]
pub struct TextCodec {
    glyphs: &'static [char; 256],
    reverse: &'static LazyLock<HashMap<char, u8>>,
}

impl TextCodec {
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Us => Self {
                glyphs: &US_GLYPHS,
                reverse: &US_REVERSE,
            },
            Region::Japan => Self {
                glyphs: &JAPAN_GLYPHS,
                reverse: &JAPAN_REVERSE,
            },
        }
    }

    pub fn encode_char(&self, c: char) -> Result<u8> {
        self.reverse
            .get(&c)
            .copied()
            .ok_or(SecretError::UnsupportedCharacter(c))
    }

    pub fn decode_byte(&self, byte: u8) -> Result<char> {
        match self.glyphs[byte as usize] {
            NO => Err(SecretError::UnmappedByte(byte)),
            c => Ok(c),
        }
    }

    /// Like [`decode_byte`](Self::decode_byte), with unmapped bytes shown as [`PLACEHOLDER`]
    pub fn decode_lossy(&self, byte: u8) -> char {
        self.decode_byte(byte).unwrap_or(PLACEHOLDER)
    }

    /// Encode a name into its five-byte field
    pub fn encode_name(&self, name: &str) -> Result<[u8; NAME_LEN]> {
        let mut out = [0u8; NAME_LEN];
        for (slot, c) in out.iter_mut().zip(null_pad(name).chars()) {
            *slot = self.encode_char(c)?;
        }
        Ok(out)
    }

    /// Decode a five-byte field, padding included
    pub fn decode_field(&self, bytes: &[u8; NAME_LEN]) -> Result<String> {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }

    /// Decode a five-byte field, with unmapped bytes shown as [`PLACEHOLDER`]
    pub fn decode_field_lossy(&self, bytes: &[u8; NAME_LEN]) -> String {
        bytes.iter().map(|&b| self.decode_lossy(b)).collect()
    }
}

pub(crate) static US_GLYPHS: [char; 256] = [
    '\0', NO, NO, NO, NO, NO, NO, NO, // 0x00
    NO, NO, NO, NO, NO, NO, NO, NO, // 0x08
    '●', '♣', '♦', '♠', NO, '↑', '↓', '←', // 0x10
    '→', '×', NO, NO, NO, NO, NO, NO, // 0x18
    ' ', '!', '"', '#', '$', '%', '&', '\'', // 0x20
    '(', ')', '*', '+', ',', '-', '.', '/', // 0x28
    '0', '1', '2', '3', '4', '5', '6', '7', // 0x30
    '8', '9', ':', ';', '<', '=', '>', '?', // 0x38
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', // 0x40
    'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', // 0x48
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', // 0x50
    'X', 'Y', 'Z', '[', '\\', ']', '^', '_', // 0x58
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', // 0x60
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', // 0x68
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', // 0x70
    'x', 'y', 'z', '{', '|', '}', '~', NO, // 0x78
    'À', 'Â', 'Ä', 'Æ', 'Ç', 'È', 'É', 'Ê', // 0x80
    'Ë', 'Î', 'Ï', 'Ñ', 'Ö', 'Œ', 'Ù', 'Û', // 0x88
    'Ü', NO, NO, NO, NO, NO, NO, NO, // 0x90
    NO, NO, NO, NO, NO, NO, NO, NO, // 0x98
    'à', 'â', 'ä', 'æ', 'ç', 'è', 'é', 'ê', // 0xa0
    'ë', 'î', 'ï', 'ñ', 'ö', 'œ', 'ù', 'û', // 0xa8
    'ü', NO, NO, NO, NO, NO, NO, NO, // 0xb0
    NO, NO, NO, NO, NO, '♥', NO, NO, // 0xb8
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xc0
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xc8
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xd0
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xd8
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xe0
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xe8
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xf0
    NO, NO, NO, NO, NO, NO, NO, NO, // 0xf8
];

// Only the null and ASCII rows are confirmed; the kana rows are unverified.
pub(crate) static JAPAN_GLYPHS: [char; 256] = [
    '\0', NO, NO, NO, NO, NO, NO, NO, // 0x00
    NO, NO, NO, NO, NO, NO, NO, NO, // 0x08
    NO, NO, NO, NO, NO, NO, NO, NO, // 0x10
    NO, NO, NO, NO, NO, NO, NO, NO, // 0x18
    ' ', '!', '"', '#', '$', '%', '&', '\'', // 0x20
    '(', ')', '*', '+', ',', '-', '.', '/', // 0x28
    '0', '1', '2', '3', '4', '5', '6', '7', // 0x30
    '8', '9', ':', ';', '<', '=', '>', '?', // 0x38
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', // 0x40
    'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', // 0x48
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', // 0x50
    'X', 'Y', 'Z', '[', '\\', ']', '^', '_', // 0x58
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', // 0x60
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', // 0x68
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', // 0x70
    'x', 'y', 'z', '{', '|', '}', '~', NO, // 0x78
    'あ', 'い', 'う', 'え', 'お', 'か', 'き', 'く', // 0x80
    'け', 'こ', 'さ', 'し', 'す', 'せ', 'そ', 'た', // 0x88
    'ち', 'つ', 'て', 'と', 'な', 'に', 'ぬ', 'ね', // 0x90
    'の', 'は', 'ひ', 'ふ', 'へ', 'ほ', 'ま', 'み', // 0x98
    'む', 'め', 'も', 'や', 'ゆ', 'よ', 'ら', 'り', // 0xa0
    'る', 'れ', 'ろ', 'わ', 'を', 'ん', 'ぁ', 'ぃ', // 0xa8
    'ぅ', 'ぇ', 'ぉ', 'っ', 'ゃ', 'ゅ', 'ょ', 'が', // 0xb0
    'ぎ', 'ぐ', 'げ', 'ご', 'ざ', 'じ', 'ず', 'ぜ', // 0xb8
    'ぞ', 'だ', 'ぢ', 'づ', 'で', 'ど', 'ば', 'び', // 0xc0
    'ぶ', 'べ', 'ぼ', 'ぱ', 'ぴ', 'ぷ', 'ぺ', 'ぽ', // 0xc8
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', // 0xd0
    'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ', // 0xd8
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', // 0xe0
    'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ', // 0xe8
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', // 0xf0
    'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン', NO, NO, // 0xf8
];
