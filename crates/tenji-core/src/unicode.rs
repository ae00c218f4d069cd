//! Character-level Unicode helpers for Japanese text.

/// Hiragana proper (ぁ..ゔ). The dictionary and the tokenizer never see the
/// iteration marks or the combining voicing marks, so they are left out.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3094}').contains(&c)
}

/// Convert hiragana to katakana.
/// Non-hiragana characters (ー, ASCII, kanji, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars().map(hiragana_to_katakana_char).collect()
}

pub fn hiragana_to_katakana_char(c: char) -> char {
    if ('\u{3041}'..='\u{3093}').contains(&c) {
        char::from_u32(c as u32 + 0x60).unwrap_or(c)
    } else {
        c
    }
}

/// Fold full-width ASCII variants (and a few typographic quotes) to their
/// half-width forms. Everything else is returned unchanged.
pub fn to_halfwidth_char(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        '\u{201D}' => '"',
        '\u{2019}' => '\'',
        '\u{2018}' => '`',
        '\u{2212}' => '-',
        '\u{FF01}'..='\u{FF5D}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

pub fn to_halfwidth(s: &str) -> String {
    s.chars().map(to_halfwidth_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("きょうは"), "キョウハ");
        assert_eq!(hiragana_to_katakana("らーめん"), "ラーメン");
        assert_eq!(hiragana_to_katakana(""), "");
        assert_eq!(hiragana_to_katakana("abc"), "abc");
        assert_eq!(hiragana_to_katakana("カタカナ"), "カタカナ");
        assert_eq!(hiragana_to_katakana("漢字と"), "漢字ト");
    }

    #[test]
    fn test_char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_hiragana('ゔ'));
        assert!(!is_hiragana('ー'));
    }

    #[test]
    fn test_halfwidth() {
        assert_eq!(to_halfwidth("ＡＢＣ１２３"), "ABC123");
        assert_eq!(to_halfwidth("（　）"), "( )");
        assert_eq!(to_halfwidth("”’‘−"), "\"'`-");
        assert_eq!(to_halfwidth("ｘ－ｙ"), "x-y");
        assert_eq!(to_halfwidth("かな"), "かな");
    }
}
