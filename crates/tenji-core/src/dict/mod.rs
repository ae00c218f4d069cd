//! Pronunciation dictionary builder.
//!
//! Input is a `word reading` list sorted by word. Each word becomes a chain of
//! trie edges in a [`TrieDb`](crate::cdb::TrieDb): one empty edge per inner
//! symbol and a final edge carrying the encoded reading. Only the suffix past
//! the prefix shared with the previous word is written.

mod reading;
#[cfg(test)]
mod tests;

pub use reading::{canonicalize_reading, decode_reading, encode_reading};

use std::io::{self, BufRead};
use std::path::Path;

use tracing::{debug, debug_span};

use crate::cdb::{CdbError, TrieWriter};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Cdb(#[from] CdbError),
}

/// Streaming dictionary builder. Holds only the previous word in memory.
pub struct DictBuilder {
    writer: TrieWriter,
    prev: Vec<char>,
    words: usize,
}

impl DictBuilder {
    pub fn create(path: &Path) -> Result<Self, BuildError> {
        Ok(Self {
            writer: TrieWriter::create(path)?,
            prev: Vec::new(),
            words: 0,
        })
    }

    /// Add one word. `line` is only used for error messages.
    pub fn add(&mut self, line: usize, word: &str, reading: &str) -> Result<(), BuildError> {
        let malformed = |reason: String| BuildError::MalformedRecord { line, reason };

        let chars: Vec<char> = word.chars().collect();
        let Some((&last, inner)) = chars.split_last() else {
            return Err(malformed("empty word".to_string()));
        };
        if chars <= self.prev {
            let prev: String = self.prev.iter().collect();
            return Err(malformed(if chars == self.prev {
                format!("duplicate word {word:?}")
            } else {
                format!("word {word:?} is out of order (after {prev:?})")
            }));
        }
        let encoded = encode_reading(reading).map_err(|c| {
            malformed(format!(
                "reading {reading:?} of {word:?} contains unencodable character {c:?}"
            ))
        })?;
        if encoded.is_empty() {
            return Err(malformed(format!("empty reading for {word:?}")));
        }

        let shared = self
            .prev
            .iter()
            .zip(&chars)
            .take_while(|(a, b)| a == b)
            .count();
        let mut depth = shared + 1;
        for &c in &inner[shared.min(inner.len())..] {
            self.writer.put_char(depth, c, b"")?;
            depth += 1;
        }
        self.writer.put_char(depth, last, &encoded)?;

        self.prev = chars;
        self.words += 1;
        Ok(())
    }

    /// Number of words added so far.
    pub fn words(&self) -> usize {
        self.words
    }

    /// Number of trie edges written so far.
    pub fn edges(&self) -> usize {
        self.writer.len()
    }

    /// Write the tables and publish the database.
    pub fn finish(self) -> Result<BuildStats, BuildError> {
        let stats = BuildStats {
            words: self.words,
            edges: self.writer.len(),
        };
        self.writer.finish()?;
        Ok(stats)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub words: usize,
    pub edges: usize,
}

/// Split one source line into `(word, reading)`.
///
/// Returns `Ok(None)` for blank and `#` comment lines. Fields past the second
/// are alternative readings and are ignored.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<(&str, &str)>, BuildError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(word), Some(reading)) => Ok(Some((word, reading))),
        _ => Err(BuildError::MalformedRecord {
            line: line_no,
            reason: format!("expected \"word reading\", got {line:?}"),
        }),
    }
}

/// Build a dictionary at `output` from a sorted `word reading` stream.
///
/// Any error aborts the build before anything is published at `output`.
pub fn build_from_reader(
    mut input: impl BufRead,
    output: &Path,
) -> Result<BuildStats, BuildError> {
    let _span = debug_span!("build_dict", output = %output.display()).entered();
    let mut builder = DictBuilder::create(output)?;
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = std::str::from_utf8(&buf).map_err(|e| BuildError::MalformedRecord {
            line: line_no,
            reason: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        })?;
        if let Some((word, reading)) = parse_line(line_no, line)? {
            builder.add(line_no, word, reading)?;
        }
    }
    debug!(words = builder.words(), edges = builder.edges());
    builder.finish()
}
