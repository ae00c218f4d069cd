use std::collections::HashMap;
use std::sync::OnceLock;

use super::cell::{Cell, NABCC};

/// Voiced kana, contracted sounds (拗音) and foreign-sound extensions, spelled
/// in NABCC. Each is a prefix cell followed by the base cell.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("ウァ", "5A"),
    ("ウィ", "5B"),
    ("ヴ", "\"C"),
    ("ウェ", "5F"),
    ("イェ", "@F"),
    ("ウォ", "5I"),
    ("ガ", "\"*"),
    ("キャ", "@*"),
    ("ギャ", "^*"),
    ("クァ", "5*"),
    ("グァ", "4*"),
    ("ギ", "\"<"),
    ("クィ", "5<"),
    ("グ", "\"%"),
    ("キュ", "@%"),
    ("ギュ", "^%"),
    ("ゲ", "\"$"),
    ("クェ", "5$"),
    ("ゴ", "\"["),
    ("キョ", "@["),
    ("ギョ", "^["),
    ("クォ", "5["),
    ("ザ", "\":"),
    ("シャ", "@:"),
    ("ジャ", "^:"),
    ("ジ", "\"\\"),
    ("ズ", "\"?"),
    ("シュ", "@?"),
    ("ジュ", "^?"),
    ("ゼ", "\"]"),
    ("シェ", "@]"),
    ("ゾ", "\"W"),
    ("ショ", "@W"),
    ("ジョ", "^W"),
    ("ダ", "\"O"),
    ("チャ", "@O"),
    ("ヂャ", "^O"),
    ("ツァ", "5O"),
    ("ヂ", "\"R"),
    ("ツィ", "5R"),
    ("ティ", "\"R"),
    ("ディ", "^R"),
    ("ヅ", "\"N"),
    ("チュ", "@N"),
    ("ヂュ", "^N"),
    ("テュ", ".N"),
    ("デュ", "_N"),
    ("トゥ", "5N"),
    ("ドゥ", "4N"),
    ("デ", "\"Q"),
    ("ツェ", "5Q"),
    ("チェ", "@Q"),
    ("ジェ", "^Q"),
    ("ド", "\"T"),
    ("チョ", "@T"),
    ("ヂョ", "^T"),
    ("ツォ", "5T"),
    ("ニャ", "@K"),
    ("ニュ", "@M"),
    ("ニョ", "@S"),
    ("バ", "\"U"),
    ("パ", ",U"),
    ("ヒャ", "@U"),
    ("ビャ", "^U"),
    ("ピャ", ".U"),
    ("ファ", "5U"),
    ("ヴァ", "4U"),
    ("ビ", "\"V"),
    ("ピ", ",V"),
    ("フィ", "5V"),
    ("ヴィ", "4V"),
    ("ブ", "\"X"),
    ("プ", ",X"),
    ("ヒュ", "@X"),
    ("ビュ", "^X"),
    ("ピュ", ".X"),
    ("フュ", "5X"),
    ("ヴュ", "_X"),
    ("ベ", "\"&"),
    ("ペ", ",&"),
    ("フェ", "5&"),
    ("ヴェ", "4&"),
    ("ボ", "\"!"),
    ("ポ", ",!"),
    ("ヒョ", "@!"),
    ("ビョ", "^!"),
    ("ピョ", ".!"),
    ("フォ", "5!"),
    ("ヴォ", "4!"),
    ("ミャ", "@Z"),
    ("ミュ", "@Y"),
    ("ミョ", "@)"),
    ("リャ", "@E"),
    ("リュ", "@D"),
    ("リョ", "@J"),
];

/// Symbol sequences (one or two symbols) to their cells.
pub struct BrailleTable {
    entries: HashMap<String, Vec<Cell>>,
}

fn spell(nabcc: &str) -> Vec<Cell> {
    nabcc.chars().filter_map(Cell::from_ascii).collect()
}

impl BrailleTable {
    fn build() -> Self {
        let mut entries: HashMap<String, Vec<Cell>> = CONTRACTIONS
            .iter()
            .map(|&(seq, nabcc)| (seq.to_string(), spell(nabcc)))
            .collect();
        for &(ascii, _, symbols) in NABCC.iter() {
            let cell = spell(&char::from(ascii).to_string());
            for c in symbols.chars() {
                entries.insert(c.to_string(), cell.clone());
            }
        }
        Self { entries }
    }

    pub fn global() -> &'static BrailleTable {
        static INSTANCE: OnceLock<BrailleTable> = OnceLock::new();
        INSTANCE.get_or_init(Self::build)
    }

    pub fn get(&self, seq: &str) -> Option<&[Cell]> {
        self.entries.get(seq).map(Vec::as_slice)
    }

    pub fn contains(&self, seq: &str) -> bool {
        self.entries.contains_key(seq)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
