/// Symbol classes driving the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Latin,
    Hiragana,
    Katakana,
    Kanji,
    /// Digits and the decimal point.
    Digit,
    /// Opening brackets and quotes.
    Bracket,
    Other,
}

pub fn classify(c: char) -> SymbolKind {
    match c {
        '\u{0040}'..='\u{005A}'
        | '\u{0060}'..='\u{007A}'
        | '\u{FF21}'..='\u{FF3A}'
        | '\u{FF41}'..='\u{FF5A}' => SymbolKind::Latin,
        '\u{3041}'..='\u{3093}' => SymbolKind::Hiragana,
        '\u{30A1}'..='\u{30F4}' | '\u{30FC}' | '\u{FF66}'..='\u{FF9F}' => SymbolKind::Katakana,
        '\u{3005}'..='\u{3007}' | '\u{4E00}'..='\u{9FFF}' => SymbolKind::Kanji,
        '0'..='9' | '.' | '\u{FF10}'..='\u{FF19}' => SymbolKind::Digit,
        '"' | '(' | '[' | '〈' | '《' | '「' | '『' | '【' | '〔' | '“' | '（' | '［' | '｢' => {
            SymbolKind::Bracket
        }
        _ => SymbolKind::Other,
    }
}
