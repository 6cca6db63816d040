/// Display glyphs for secret symbols
use crate::error::{Result, SecretError};

/// One glyph per symbol value, 0..=63
pub const SYMBOLS: [char; 64] = [
    'B', 'D', 'F', 'G', 'H', 'J', 'L', 'M', //
    '♠', '♥', '♦', '♣', '#', 'N', 'Q', 'R', //
    'S', 'T', 'W', 'Y', '!', '●', '▲', '■', //
    '+', '-', 'b', 'd', 'f', 'g', 'h', 'j', //
    'm', '$', '*', '/', ':', '~', 'n', 'q', //
    'r', 's', 't', 'w', 'y', '?', '%', '&', //
    '(', '=', ')', '2', '3', '4', '5', '6', //
    '7', '8', '9', '↑', '↓', '←', '→', '@',
];

/// ASCII spellings for glyphs that are awkward to type
const ALIASES: [(&str, char); 11] = [
    ("spade", '♠'),
    ("heart", '♥'),
    ("diamond", '♦'),
    ("club", '♣'),
    ("circle", '●'),
    ("triangle", '▲'),
    ("square", '■'),
    ("up", '↑'),
    ("down", '↓'),
    ("left", '←'),
    ("right", '→'),
];

/// Symbols shown per group when rendering
const GROUP: usize = 5;

fn symbol_value(c: char) -> Result<u8> {
    SYMBOLS
        .iter()
        .position(|&s| s == c)
        .map(|i| i as u8)
        .ok_or(SecretError::UnsupportedCharacter(c))
}

/// Render symbol values as glyphs, in space separated groups of five
pub fn render(symbols: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(symbols.len() * 4);
    for (i, &value) in symbols.iter().enumerate() {
        if i > 0 && i % GROUP == 0 {
            out.push(' ');
        }
        let glyph = SYMBOLS
            .get(value as usize)
            .ok_or(SecretError::UnmappedByte(value))?;
        out.push(*glyph);
    }
    Ok(out)
}

/// Parse glyph text into symbol values. Whitespace is ignored and
/// `{name}` aliases such as `{left}` or `{heart}` are accepted. An unknown
/// or unclosed alias is reported as an unsupported `{`.
pub fn parse(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(20);
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c != '{' {
            out.push(symbol_value(c)?);
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }
            name.push(c);
        }
        let glyph = ALIASES
            .iter()
            .find(|(alias, _)| closed && alias.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, glyph)| glyph)
            .ok_or(SecretError::UnsupportedCharacter('{'))?;
        out.push(symbol_value(glyph)?);
    }

    Ok(out)
}
