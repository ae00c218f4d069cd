//! Chunk segmenter.
//!
//! A finite-state machine over symbol classes splits a line into chunks that
//! are read independently: a kanji stem with its hiragana tail and particles,
//! a katakana word, a latin word, a number, and so on. Trailing particles close
//! a chunk, an honorific prefix before kanji is cut off in front, and kanji
//! runs the dictionary does not support are capped in length.

mod kind;
mod policy;

pub use kind::{classify, SymbolKind};
pub use policy::{PrefixMode, TokenizerPolicy};

use std::collections::VecDeque;

use tracing::debug_span;

use crate::cdb::{TrieDb, ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between runs: dispatch on the next symbol without consuming it.
    Main,
    /// Unclassified symbols (punctuation, spaces). Any other class closes the chunk.
    Other,
    /// Hiragana tail: okurigana, particles, plain kana words.
    Tail,
    /// Just after a particle; the next hiragana may continue it.
    Particle,
    /// An honorific prefix was read but not yet placed.
    Prefix,
    Latin,
    Katakana,
    /// Kanji run; `parent` is the live trie position, `run` the kanji count.
    Kanji { parent: u32, run: usize },
    Digit,
    Bracket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Consume,
    Reprocess,
}

pub struct Tokenizer<'a> {
    dict: &'a TrieDb,
    policy: TokenizerPolicy,
    state: State,
    chunk: String,
    ready: VecDeque<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(dict: &'a TrieDb, policy: TokenizerPolicy) -> Self {
        Self {
            dict,
            policy,
            state: State::Main,
            chunk: String::new(),
            ready: VecDeque::new(),
        }
    }

    pub fn policy(&self) -> &TokenizerPolicy {
        &self.policy
    }

    pub fn reset(&mut self) {
        self.state = State::Main;
        self.chunk.clear();
        self.ready.clear();
    }

    /// Split `line` into chunks, lazily. Resets any state left from a
    /// previous line.
    pub fn chunks<'t>(&'t mut self, line: &str) -> Chunks<'t, 'a> {
        self.reset();
        Chunks {
            tokenizer: self,
            chars: line.chars().collect(),
            pos: 0,
            finished: false,
        }
    }

    /// Collect the chunks of `line`.
    pub fn tokenize(&mut self, line: &str) -> Vec<String> {
        let _span = debug_span!("tokenize", len = line.len()).entered();
        self.chunks(line).collect()
    }

    fn flush(&mut self) {
        if !self.chunk.is_empty() {
            self.ready.push_back(std::mem::take(&mut self.chunk));
        }
    }

    fn finish(&mut self) {
        if self.state == State::Prefix {
            if let Some(p) = self.policy.honorific_prefix() {
                self.chunk.push(p);
            }
        }
        self.flush();
        self.state = State::Main;
    }

    fn transition(&mut self, c: char, kind: SymbolKind) -> Action {
        match self.state {
            State::Main => {
                self.state = match kind {
                    SymbolKind::Latin => State::Latin,
                    SymbolKind::Hiragana => State::Tail,
                    SymbolKind::Katakana => State::Katakana,
                    SymbolKind::Kanji => State::Kanji {
                        parent: ROOT,
                        run: 0,
                    },
                    SymbolKind::Digit => State::Digit,
                    SymbolKind::Bracket => State::Bracket,
                    SymbolKind::Other => State::Other,
                };
                Action::Reprocess
            }
            State::Other => {
                if kind == SymbolKind::Other {
                    self.chunk.push(c);
                    return Action::Consume;
                }
                self.flush();
                self.state = State::Main;
                Action::Reprocess
            }
            State::Tail => {
                if kind != SymbolKind::Hiragana {
                    self.state = State::Other;
                    return Action::Reprocess;
                }
                if Some(c) == self.policy.honorific_prefix() {
                    self.state = State::Prefix;
                    return Action::Consume;
                }
                self.chunk.push(c);
                if self.policy.is_particle(c) {
                    self.state = State::Particle;
                }
                Action::Consume
            }
            State::Particle => {
                let continues = kind == SymbolKind::Hiragana
                    && self
                        .chunk
                        .chars()
                        .next_back()
                        .is_some_and(|prev| self.policy.continues_particle(prev, c));
                self.state = if continues { State::Tail } else { State::Other };
                Action::Reprocess
            }
            State::Prefix => {
                let prefix = self.policy.honorific_prefix();
                if kind == SymbolKind::Kanji {
                    self.flush();
                    if let Some(p) = prefix {
                        self.chunk.push(p);
                        if self.policy.prefix_mode() == PrefixMode::Isolate {
                            self.flush();
                        }
                    }
                    self.state = State::Kanji {
                        parent: ROOT,
                        run: 0,
                    };
                } else {
                    if let Some(p) = prefix {
                        self.chunk.push(p);
                    }
                    self.state = State::Tail;
                }
                Action::Reprocess
            }
            State::Latin => {
                if matches!(kind, SymbolKind::Latin | SymbolKind::Digit) {
                    self.chunk.push(c);
                    return Action::Consume;
                }
                self.state = State::Tail;
                Action::Reprocess
            }
            State::Katakana => {
                if kind == SymbolKind::Katakana {
                    self.chunk.push(c);
                    return Action::Consume;
                }
                self.state = State::Tail;
                Action::Reprocess
            }
            State::Kanji { parent, run } => {
                if kind != SymbolKind::Kanji {
                    self.state = State::Tail;
                    return Action::Reprocess;
                }
                if self.policy.is_closed_word(&self.chunk) {
                    self.state = State::Other;
                    return Action::Reprocess;
                }
                if let Some(step) = self.dict.lookup_char(c, parent) {
                    self.chunk.push(c);
                    self.state = State::Kanji {
                        parent: step.offset,
                        run: run + 1,
                    };
                    return Action::Consume;
                }
                if run >= self.policy.kanji_run_limit() {
                    self.flush();
                    self.state = State::Kanji {
                        parent: ROOT,
                        run: 0,
                    };
                    return Action::Reprocess;
                }
                // The walk fell off the trie: restart it at this symbol.
                let parent = if parent == ROOT {
                    ROOT
                } else {
                    self.dict.lookup_char(c, ROOT).map_or(ROOT, |s| s.offset)
                };
                self.chunk.push(c);
                self.state = State::Kanji {
                    parent,
                    run: run + 1,
                };
                Action::Consume
            }
            State::Digit => {
                if kind == SymbolKind::Digit {
                    self.chunk.push(c);
                    return Action::Consume;
                }
                self.state = State::Main;
                Action::Reprocess
            }
            State::Bracket => {
                if kind == SymbolKind::Bracket {
                    self.chunk.push(c);
                    return Action::Consume;
                }
                self.state = State::Main;
                Action::Reprocess
            }
        }
    }
}

/// Lazy chunk sequence for one line. See [`Tokenizer::chunks`].
pub struct Chunks<'t, 'a> {
    tokenizer: &'t mut Tokenizer<'a>,
    chars: Vec<char>,
    pos: usize,
    finished: bool,
}

impl Iterator for Chunks<'_, '_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(chunk) = self.tokenizer.ready.pop_front() {
                return Some(chunk);
            }
            if let Some(&c) = self.chars.get(self.pos) {
                if self.tokenizer.transition(c, classify(c)) == Action::Consume {
                    self.pos += 1;
                }
            } else if !self.finished {
                self.finished = true;
                self.tokenizer.finish();
            } else {
                return None;
            }
        }
    }
}
