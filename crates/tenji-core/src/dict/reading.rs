//! Compact reading encoding: one byte per katakana symbol.
//!
//! Katakana ァ..ヴ (U+30A1..U+30F4) and ー (U+30FC) are stored as their code
//! point minus 0x3000, which lands in 0xA1..0xFC.

use crate::unicode::hiragana_to_katakana_char;

const BAND: u32 = 0x3000;

/// Voiced kana merged into their common spelling before encoding.
const CANONICAL: &[(char, char)] = &[('ヂ', 'ジ'), ('ヅ', 'ズ')];

pub fn canonicalize_char(c: char) -> char {
    let c = hiragana_to_katakana_char(c);
    CANONICAL
        .iter()
        .find(|&&(from, _)| from == c)
        .map_or(c, |&(_, to)| to)
}

/// Hiragana is folded to katakana and near-duplicate kana are merged.
pub fn canonicalize_reading(reading: &str) -> String {
    reading.chars().map(canonicalize_char).collect()
}

fn is_encodable(c: char) -> bool {
    ('\u{30A1}'..='\u{30F4}').contains(&c) || c == 'ー'
}

/// Encode a reading, or return the first character that has no byte form.
pub fn encode_reading(reading: &str) -> Result<Vec<u8>, char> {
    reading
        .chars()
        .map(canonicalize_char)
        .map(|c| {
            if is_encodable(c) {
                Ok((c as u32 - BAND) as u8)
            } else {
                Err(c)
            }
        })
        .collect()
}

/// Restore the katakana band. Canonicalized kana stay canonical.
pub fn decode_reading(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter_map(|&b| char::from_u32(BAND + u32::from(b)))
        .collect()
}
