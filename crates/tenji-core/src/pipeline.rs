//! Line pipeline: tokenize, read, encode, fold.

use tracing::{debug, debug_span};

use crate::braille::{Cell, Encoder, OutputFormat};
use crate::cdb::TrieDb;
use crate::resolver::Resolver;
use crate::tokenizer::{Tokenizer, TokenizerPolicy};

/// The conversion of one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutput {
    /// The chunk as segmented from the input line.
    pub chunk: String,
    /// Normalized reading fed to the encoder.
    pub reading: String,
    /// Source symbols the encoder consumed, without indicators.
    pub source: String,
    pub cells: Vec<Cell>,
}

pub struct Translator<'a> {
    tokenizer: Tokenizer<'a>,
    resolver: Resolver<'a>,
    encoder: Encoder,
}

impl<'a> Translator<'a> {
    pub fn new(dict: &'a TrieDb, policy: TokenizerPolicy) -> Self {
        Self {
            tokenizer: Tokenizer::new(dict, policy),
            resolver: Resolver::new(dict),
            encoder: Encoder::default(),
        }
    }

    /// Convert one input line, chunk by chunk.
    pub fn translate_line(&mut self, line: &str) -> Vec<ChunkOutput> {
        let _span = debug_span!("translate_line", len = line.len()).entered();
        let chunks: Vec<String> = self.tokenizer.chunks(line).collect();
        let out: Vec<ChunkOutput> = chunks
            .into_iter()
            .map(|chunk| self.translate_chunk(chunk))
            .collect();
        debug!(chunks = out.len());
        out
    }

    fn translate_chunk(&self, chunk: String) -> ChunkOutput {
        let reading = self.resolver.read_text(&chunk);
        let mut source = String::new();
        let mut cells = Vec::new();
        for emission in self.encoder.encode(&reading) {
            if let Some(s) = emission.source {
                source.push_str(&s);
            }
            if let Some(c) = emission.cells {
                cells.extend(c);
            }
        }
        ChunkOutput {
            chunk,
            reading,
            source,
            cells,
        }
    }

    /// Convert one line and fold the rendered chunks to `width` cells.
    pub fn render_line(&mut self, line: &str, format: OutputFormat, width: usize) -> Vec<String> {
        let words: Vec<String> = self
            .translate_line(line)
            .iter()
            .map(|c| format.render(&c.cells))
            .collect();
        fold(&words, width)
    }
}

/// Greedy wrap: words are joined with one space and a new line starts when
/// the next word would push the line's cell count past `width`. A word wider
/// than `width` gets a line of its own. Empty words are skipped.
pub fn fold<S: AsRef<str>>(words: &[S], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line: Vec<&str> = Vec::new();
    let mut used = 0;
    for word in words.iter().map(AsRef::as_ref).filter(|w| !w.is_empty()) {
        let n = word.chars().count();
        if !line.is_empty() && width < used + n {
            lines.push(line.join(" "));
            line.clear();
            used = 0;
        }
        line.push(word);
        used += n;
    }
    if !line.is_empty() {
        lines.push(line.join(" "));
    }
    lines
}
