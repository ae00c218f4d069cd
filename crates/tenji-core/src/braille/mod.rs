//! Katakana reading to 6-dot braille cells.
//!
//! The encoder folds its input to half-width upper case, then runs a state
//! machine over three symbol classes. Latin letters are preceded once by the
//! foreign-letter indicator, digits once by the numeric indicator, and kana
//! are matched against [`BrailleTable`] two symbols at a time so that voiced
//! and contracted sounds take their two-cell forms.

mod cell;
mod table;
#[cfg(test)]
mod tests;

pub use cell::Cell;
pub use table::BrailleTable;

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::unicode::to_halfwidth;

/// Foreign-letter indicator, dots 5-6.
pub const LATIN_INDICATOR: Cell = Cell::from_bits(0b110000);
/// Numeric indicator, dots 3-4-5-6.
pub const NUMERIC_INDICATOR: Cell = Cell::from_bits(0b111100);
/// Connector between a number and a following kana of the a/ra rows, dots 4-5-6.
pub const NUMERIC_CONNECTOR: Cell = Cell::from_bits(0b111000);
/// Decimal point inside a number, dot 2.
pub const DECIMAL_POINT: Cell = Cell::from_bits(0b000010);

/// Symbols read in kana mode besides katakana proper.
const KANA_PUNCTUATION: &str = "!?\"([〈《「『【〔“（［｢)]〉》」』】〕）］｣";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    Latin,
    Kana,
    Digit,
    Other,
}

/// Classify a half-width, upper-cased symbol for the encoder.
pub fn encoder_kind(c: char) -> EncoderKind {
    match c {
        '0'..='9' => EncoderKind::Digit,
        '@'..='Z' | '`'..='z' | ','..='.' | ':' | ';' => EncoderKind::Latin,
        '\u{30A1}'..='\u{30F4}' | 'ー' => EncoderKind::Kana,
        c if KANA_PUNCTUATION.contains(c) => EncoderKind::Kana,
        _ => EncoderKind::Other,
    }
}

/// How cells are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One ASCII character per cell (North American Braille Computer Code).
    #[default]
    Nabcc,
    /// Unicode braille patterns, U+2800 to U+283F.
    Unicode,
}

impl OutputFormat {
    pub fn render_cell(self, cell: Cell) -> char {
        match self {
            OutputFormat::Nabcc => cell.to_ascii(),
            OutputFormat::Unicode => cell.to_unicode(),
        }
    }

    pub fn render(self, cells: &[Cell]) -> String {
        cells.iter().map(|&c| self.render_cell(c)).collect()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Nabcc => f.write_str("nabcc"),
            OutputFormat::Unicode => f.write_str("unicode"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nabcc" => Ok(OutputFormat::Nabcc),
            "unicode" => Ok(OutputFormat::Unicode),
            other => Err(format!("unknown output format: {other} (expected nabcc or unicode)")),
        }
    }
}

/// One encoder output. Indicators have no `source`; a symbol with no braille
/// form has no `cells`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub source: Option<String>,
    pub cells: Option<Vec<Cell>>,
}

impl Emission {
    fn indicator(cell: Cell) -> Self {
        Self {
            source: None,
            cells: Some(vec![cell]),
        }
    }

    fn symbol(source: String, cells: Option<&[Cell]>) -> Self {
        Self {
            source: Some(source),
            cells: cells.map(<[Cell]>::to_vec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Main,
    Latin,
    /// `pending` is the longest table entry matched so far.
    Kana { pending: String },
    Digit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Consume,
    Reprocess,
}

pub struct Encoder {
    table: &'static BrailleTable,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(BrailleTable::global())
    }
}

impl Encoder {
    pub fn new(table: &'static BrailleTable) -> Self {
        Self { table }
    }

    /// Encode one normalized reading, lazily.
    pub fn encode(&self, reading: &str) -> Emissions {
        Emissions {
            table: self.table,
            chars: to_halfwidth(reading).to_uppercase().chars().collect(),
            pos: 0,
            state: State::Main,
            ready: VecDeque::new(),
            finished: false,
        }
    }

    /// All cells of `reading`, skipping symbols with no braille form.
    pub fn cells(&self, reading: &str) -> Vec<Cell> {
        self.encode(reading)
            .filter_map(|e| e.cells)
            .flatten()
            .collect()
    }
}

/// Lazy emission sequence for one reading. See [`Encoder::encode`].
pub struct Emissions {
    table: &'static BrailleTable,
    chars: Vec<char>,
    pos: usize,
    state: State,
    ready: VecDeque<Emission>,
    finished: bool,
}

impl Emissions {
    fn emit_symbol(&mut self, source: String) {
        if source.is_empty() {
            return;
        }
        let cells = self.table.get(&source);
        self.ready.push_back(Emission::symbol(source, cells));
    }

    fn transition(&mut self, c: char, kind: EncoderKind) -> Action {
        let state = std::mem::replace(&mut self.state, State::Main);
        match state {
            State::Main => match kind {
                EncoderKind::Latin => {
                    self.ready.push_back(Emission::indicator(LATIN_INDICATOR));
                    self.state = State::Latin;
                    Action::Reprocess
                }
                EncoderKind::Kana => {
                    self.state = State::Kana {
                        pending: String::new(),
                    };
                    Action::Reprocess
                }
                EncoderKind::Digit => {
                    self.ready.push_back(Emission::indicator(NUMERIC_INDICATOR));
                    self.state = State::Digit;
                    Action::Reprocess
                }
                EncoderKind::Other => {
                    self.ready.push_back(Emission::symbol(c.to_string(), None));
                    Action::Consume
                }
            },
            State::Latin => {
                if kind == EncoderKind::Latin {
                    self.emit_symbol(c.to_string());
                    self.state = State::Latin;
                    return Action::Consume;
                }
                if matches!(kind, EncoderKind::Kana | EncoderKind::Digit) {
                    self.ready.push_back(Emission::indicator(Cell::BLANK));
                }
                Action::Reprocess
            }
            State::Kana { mut pending } => {
                if kind != EncoderKind::Kana {
                    self.emit_symbol(pending);
                    return Action::Reprocess;
                }
                let start = pending.len();
                pending.push(c);
                if !self.table.contains(&pending) {
                    pending.truncate(start);
                    let done = std::mem::replace(&mut pending, c.to_string());
                    self.emit_symbol(done);
                }
                self.state = State::Kana { pending };
                Action::Consume
            }
            State::Digit => {
                if c == '.' {
                    self.ready.push_back(Emission::symbol(
                        c.to_string(),
                        Some(&[DECIMAL_POINT][..]),
                    ));
                    self.state = State::Digit;
                    return Action::Consume;
                }
                if kind == EncoderKind::Digit {
                    self.emit_symbol(c.to_string());
                    self.state = State::Digit;
                    return Action::Consume;
                }
                if kind == EncoderKind::Kana {
                    self.ready.push_back(Emission::indicator(NUMERIC_CONNECTOR));
                }
                Action::Reprocess
            }
        }
    }

    fn finish(&mut self) {
        if let State::Kana { pending } = std::mem::replace(&mut self.state, State::Main) {
            self.emit_symbol(pending);
        }
    }
}

impl Iterator for Emissions {
    type Item = Emission;

    fn next(&mut self) -> Option<Emission> {
        loop {
            if let Some(e) = self.ready.pop_front() {
                return Some(e);
            }
            if let Some(&c) = self.chars.get(self.pos) {
                if self.transition(c, encoder_kind(c)) == Action::Consume {
                    self.pos += 1;
                }
            } else if !self.finished {
                self.finished = true;
                self.finish();
            } else {
                return None;
            }
        }
    }
}
