use std::collections::HashSet;

use serde::Deserialize;

use crate::settings::{settings, TokenizerSettings};

/// Where an honorific prefix goes when a kanji run follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMode {
    /// The prefix is emitted as a chunk of its own.
    Isolate,
    /// The prefix opens the kanji chunk.
    Attach,
}

/// Swappable segmentation rules.
///
/// Particles are a prefix-keyed table: a single symbol closes a chunk, and a
/// pair `(x, y)` lets `y` continue particle `x` before the cut.
#[derive(Debug, Clone)]
pub struct TokenizerPolicy {
    particles: HashSet<char>,
    continuations: HashSet<(char, char)>,
    closed_words: HashSet<String>,
    honorific_prefix: Option<char>,
    prefix_mode: PrefixMode,
    kanji_run_limit: usize,
}

impl TokenizerPolicy {
    pub fn from_settings(s: &TokenizerSettings) -> Self {
        let mut policy = Self {
            particles: HashSet::new(),
            continuations: HashSet::new(),
            closed_words: s.closed_words.iter().cloned().collect(),
            honorific_prefix: s.honorific_prefix.as_deref().and_then(|p| p.chars().next()),
            prefix_mode: s.prefix_mode,
            kanji_run_limit: s.kanji_run_limit.max(1),
        };
        policy.set_particles(s.particles.iter().map(String::as_str));
        policy
    }

    fn set_particles<'a>(&mut self, particles: impl IntoIterator<Item = &'a str>) {
        self.particles.clear();
        self.continuations.clear();
        for p in particles {
            let mut chars = p.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(x), None, _) => {
                    self.particles.insert(x);
                }
                (Some(x), Some(y), None) => {
                    self.continuations.insert((x, y));
                }
                // Longer entries cannot be expressed as a two-symbol lookahead.
                _ => {}
            }
        }
    }

    /// Replace the particle table. Entries longer than two symbols are ignored.
    pub fn with_particles<'a>(mut self, particles: impl IntoIterator<Item = &'a str>) -> Self {
        self.set_particles(particles);
        self
    }

    pub fn with_closed_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.closed_words = words.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_honorific_prefix(mut self, prefix: Option<char>) -> Self {
        self.honorific_prefix = prefix;
        self
    }

    pub fn with_prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.prefix_mode = mode;
        self
    }

    pub fn with_kanji_run_limit(mut self, limit: usize) -> Self {
        self.kanji_run_limit = limit.max(1);
        self
    }

    pub fn is_particle(&self, c: char) -> bool {
        self.particles.contains(&c)
    }

    pub fn continues_particle(&self, prev: char, c: char) -> bool {
        self.continuations.contains(&(prev, c))
    }

    pub fn is_closed_word(&self, chunk: &str) -> bool {
        !chunk.is_empty() && self.closed_words.contains(chunk)
    }

    pub fn honorific_prefix(&self) -> Option<char> {
        self.honorific_prefix
    }

    pub fn prefix_mode(&self) -> PrefixMode {
        self.prefix_mode
    }

    pub fn kanji_run_limit(&self) -> usize {
        self.kanji_run_limit
    }
}

impl Default for TokenizerPolicy {
    /// Rules from the global [`settings`].
    fn default() -> Self {
        Self::from_settings(&settings().tokenizer)
    }
}
