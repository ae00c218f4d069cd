//! Reading resolution by longest dictionary match.

use tracing::{debug, debug_span};

use crate::cdb::{TrieDb, ROOT};
use crate::dict::decode_reading;
use crate::unicode::hiragana_to_katakana;

/// One span of a chunk. `reading` is the decoded dictionary reading, or
/// `None` when the span matched nothing and passes through literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub surface: String,
    pub reading: Option<String>,
}

/// One span with its normalized katakana reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Yomi {
    pub surface: String,
    pub reading: String,
}

/// Word-final particles pronounced differently from how they are written.
const FINAL_PARTICLES: &[(char, char)] = &[('は', 'わ'), ('へ', 'え')];

/// Kana whose following ウ is pronounced as a long vowel.
const LONG_VOWEL_BEFORE_U: &[char] = &[
    'オ', 'コ', 'ゴ', 'ソ', 'ゾ', 'ト', 'ド', 'ノ', 'ホ', 'ボ', 'ポ', 'モ', 'ヨ', 'ロ', 'ョ', 'ォ',
];

/// Normalize a reading for braille: a final は/へ is spoken わ/え, hiragana
/// becomes katakana, and an o-row kana followed by ウ becomes a long vowel
/// (トウキョウ → トーキョー).
pub fn normalize_reading(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if let Some(last) = chars.last_mut() {
        if let Some(&(_, spoken)) = FINAL_PARTICLES.iter().find(|&&(w, _)| w == *last) {
            *last = spoken;
        }
    }

    let katakana = hiragana_to_katakana(&chars.into_iter().collect::<String>());
    let mut out = String::with_capacity(katakana.len());
    let mut prev = None;
    for c in katakana.chars() {
        if c == 'ウ' && prev.is_some_and(|p| LONG_VOWEL_BEFORE_U.contains(&p)) {
            out.push('ー');
            // The mark itself does not lengthen a following ウ.
            prev = Some('ー');
        } else {
            out.push(c);
            prev = Some(c);
        }
    }
    out
}

pub struct Resolver<'a> {
    dict: &'a TrieDb,
}

impl<'a> Resolver<'a> {
    pub fn new(dict: &'a TrieDb) -> Self {
        Self { dict }
    }

    /// Split `chunk` into longest dictionary matches and unmatched symbols.
    ///
    /// The trie walk starts at the root and records the last position where a
    /// word ended. When the walk misses, or the chunk ends, the longest match
    /// is emitted and the walk restarts right after it; with no match at all
    /// the first symbol is emitted literally and the walk restarts after it.
    pub fn resolve(&self, chunk: &str) -> Vec<Match> {
        let chars: Vec<char> = chunk.chars().collect();
        let n = chars.len();
        let mut out = Vec::new();

        // chars[start..end] is the longest match so far; `reading` its value.
        let mut start = 0;
        let mut end = 0;
        let mut reading: Option<&[u8]> = None;
        let mut pos = 0;
        let mut parent = ROOT;

        while start < n {
            let step = chars
                .get(pos)
                .and_then(|&c| self.dict.lookup_char(c, parent));
            if let Some(step) = step {
                pos += 1;
                parent = step.offset;
                if step.is_terminal() {
                    reading = Some(step.value);
                    end = pos;
                }
                continue;
            }

            match reading.take() {
                Some(value) => {
                    out.push(Match {
                        surface: chars[start..end].iter().collect(),
                        reading: Some(decode_reading(value)),
                    });
                    start = end;
                }
                None => {
                    out.push(Match {
                        surface: chars[start].to_string(),
                        reading: None,
                    });
                    start += 1;
                }
            }
            end = start;
            pos = start;
            parent = ROOT;
        }
        out
    }

    /// Resolve `chunk` and normalize each span. Consecutive unmatched symbols
    /// are merged into one literal span.
    pub fn read(&self, chunk: &str) -> Vec<Yomi> {
        let _span = debug_span!("read", chunk).entered();
        let mut out = Vec::new();
        let mut literal = String::new();
        let mut matched = 0usize;

        for m in self.resolve(chunk) {
            match m.reading {
                None => literal.push_str(&m.surface),
                Some(reading) => {
                    if !literal.is_empty() {
                        let surface = std::mem::take(&mut literal);
                        let reading = normalize_reading(&surface);
                        out.push(Yomi { surface, reading });
                    }
                    matched += 1;
                    out.push(Yomi {
                        reading: normalize_reading(&reading),
                        surface: m.surface,
                    });
                }
            }
        }
        if !literal.is_empty() {
            let reading = normalize_reading(&literal);
            out.push(Yomi {
                surface: literal,
                reading,
            });
        }
        debug!(spans = out.len(), matched);
        out
    }

    /// The normalized reading of a whole chunk.
    pub fn read_text(&self, chunk: &str) -> String {
        self.read(chunk).into_iter().map(|y| y.reading).collect()
    }
}
