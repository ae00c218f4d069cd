use super::*;

/// `(source, nabcc)` pairs, with `"-"` for a missing source or cell.
fn trace(reading: &str) -> Vec<(String, String)> {
    Encoder::default()
        .encode(reading)
        .map(|e| {
            (
                e.source.unwrap_or_else(|| "-".into()),
                e.cells
                    .map(|cells| OutputFormat::Nabcc.render(&cells))
                    .unwrap_or_else(|| "-".into()),
            )
        })
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|&(s, c)| (s.to_string(), c.to_string()))
        .collect()
}

fn nabcc(reading: &str) -> String {
    OutputFormat::Nabcc.render(&Encoder::default().cells(reading))
}

#[test]
fn test_two_plain_kana_stay_separate() {
    assert_eq!(trace("アイ"), pairs(&[("ア", "A"), ("イ", "B")]));
}

#[test]
fn test_contracted_sounds() {
    assert_eq!(trace("キャク"), pairs(&[("キャ", "@*"), ("ク", "%")]));
    assert_eq!(trace("ガッコー"), pairs(&[("ガ", "\"*"), ("ッ", "1"), ("コ", "["), ("ー", "3")]));
    assert_eq!(trace("イェ"), pairs(&[("イェ", "@F")]));
    assert_eq!(nabcc("トーキョー"), "T3@[3");
}

#[test]
fn test_unknown_small_kana() {
    assert_eq!(trace("ァ"), pairs(&[("ァ", "-")]));
    assert_eq!(trace("アァ"), pairs(&[("ア", "A"), ("ァ", "-")]));
}

#[test]
fn test_latin_indicator_once() {
    assert_eq!(
        trace("abc"),
        pairs(&[("-", ";"), ("A", "A"), ("B", "B"), ("C", "C")])
    );
    // A space leaves latin mode, so the next word gets its own indicator.
    assert_eq!(nabcc("AB CD"), ";AB;CD");
    assert_eq!(nabcc("ＡＢ"), ";AB");
}

#[test]
fn test_numbers() {
    assert_eq!(
        trace("3.14"),
        pairs(&[("-", "#"), ("3", "C"), (".", "1"), ("1", "A"), ("4", "D")])
    );
    assert_eq!(nabcc("１０"), "#AJ");
}

#[test]
fn test_number_then_kana_uses_connector() {
    assert_eq!(
        trace("3ツ"),
        pairs(&[("-", "#"), ("3", "C"), ("-", "_"), ("ツ", "N")])
    );
}

#[test]
fn test_latin_then_other_class_uses_blank() {
    assert_eq!(nabcc("A1"), ";A #A");
    assert_eq!(nabcc("Aア"), ";A A");
}

#[test]
fn test_unclassified_symbols_pass_through() {
    assert_eq!(trace("★"), pairs(&[("★", "-")]));
    assert_eq!(trace("ア★イ"), pairs(&[("ア", "A"), ("★", "-"), ("イ", "B")]));
    assert!(Encoder::default().cells("★").is_empty());
}

#[test]
fn test_brackets_in_kana_mode() {
    assert_eq!(trace("「ア」"), pairs(&[("「", "-"), ("ア", "A"), ("」", "-")]));
    // Read in kana mode but absent from the table.
    assert_eq!(trace("〈"), pairs(&[("〈", "-")]));
}

#[test]
fn test_empty() {
    assert!(trace("").is_empty());
}

#[test]
fn test_unicode_format() {
    let cells = Encoder::default().cells("アイ");
    assert_eq!(OutputFormat::Unicode.render(&cells), "⠁⠃");
}

#[test]
fn test_output_format_parse() {
    assert_eq!("nabcc".parse::<OutputFormat>(), Ok(OutputFormat::Nabcc));
    assert_eq!("unicode".parse::<OutputFormat>(), Ok(OutputFormat::Unicode));
    assert!("ascii".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Unicode.to_string(), "unicode");
}

#[test]
fn test_encoder_kind() {
    assert_eq!(encoder_kind('A'), EncoderKind::Latin);
    assert_eq!(encoder_kind(','), EncoderKind::Latin);
    assert_eq!(encoder_kind('7'), EncoderKind::Digit);
    assert_eq!(encoder_kind('ヴ'), EncoderKind::Kana);
    assert_eq!(encoder_kind('ー'), EncoderKind::Kana);
    assert_eq!(encoder_kind('('), EncoderKind::Kana);
    assert_eq!(encoder_kind('あ'), EncoderKind::Other);
    assert_eq!(encoder_kind(' '), EncoderKind::Other);
}
