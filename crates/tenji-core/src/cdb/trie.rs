use std::path::Path;

use super::{hash_with_seed, Cdb, CdbError, CdbWriter, HASH_SEED};

/// Parent value for the first symbol of a sequence. Record offsets are never
/// zero, so this cannot collide with a real parent.
pub const ROOT: u32 = 0;

fn step_hash(symbol: &[u8], parent: u32) -> u32 {
    hash_with_seed(symbol, parent.wrapping_add(HASH_SEED))
}

/// Result of one successful trie step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Payload of the edge: empty when the prefix continues without a word
    /// ending here.
    pub value: &'a [u8],
    /// Offset of the matched record; the parent for the next step.
    pub offset: u32,
}

impl Step<'_> {
    /// True when a dictionary word ends at this symbol.
    pub fn is_terminal(&self) -> bool {
        !self.value.is_empty()
    }
}

/// A constant database whose keys are trie edges `(parent, symbol)`.
///
/// For a fixed symbol the hash is a bijection of its seed, so distinct parents
/// never share a hash and the stored key only needs the symbol bytes.
#[derive(Debug)]
pub struct TrieDb {
    cdb: Cdb,
}

impl TrieDb {
    pub fn open(path: &Path) -> Result<Self, CdbError> {
        Ok(Self {
            cdb: Cdb::open(path)?,
        })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CdbError> {
        Ok(Self {
            cdb: Cdb::from_bytes(data)?,
        })
    }

    pub fn cdb(&self) -> &Cdb {
        &self.cdb
    }

    /// Follow the edge labelled `symbol` out of `parent`.
    pub fn lookup_step(&self, symbol: &[u8], parent: u32) -> Option<Step<'_>> {
        self.cdb
            .find(step_hash(symbol, parent), symbol)
            .map(|r| Step {
                value: r.value,
                offset: r.offset,
            })
    }

    /// [`TrieDb::lookup_step`] keyed by the UTF-8 encoding of `c`.
    pub fn lookup_char(&self, c: char, parent: u32) -> Option<Step<'_>> {
        let mut buf = [0u8; 4];
        self.lookup_step(c.encode_utf8(&mut buf).as_bytes(), parent)
    }

    /// Walk `symbols` from the root, one step per symbol.
    ///
    /// The result has one entry per symbol consumed; the walk stops at the
    /// first miss, so a short result means the sequence left the trie.
    pub fn walk(&self, symbols: &str) -> Vec<Step<'_>> {
        let mut parent = ROOT;
        let mut steps = Vec::new();
        for c in symbols.chars() {
            let Some(step) = self.lookup_char(c, parent) else {
                break;
            };
            parent = step.offset;
            steps.push(step);
        }
        steps
    }
}

/// Builds a [`TrieDb`] from edges written in depth-first order.
///
/// Edges are addressed by depth (1 for a first symbol); the parent of an edge
/// at depth `d` is the most recent edge written at depth `d - 1`.
pub struct TrieWriter {
    cdb: CdbWriter,
    /// Offset of the last edge written at each depth; index 0 is the root.
    parents: Vec<u32>,
}

impl TrieWriter {
    pub fn create(path: &Path) -> Result<Self, CdbError> {
        Ok(Self {
            cdb: CdbWriter::create(path)?,
            parents: vec![ROOT],
        })
    }

    /// Write the edge `symbol` at `depth`. Returns the new record's offset.
    pub fn put(&mut self, depth: usize, symbol: &[u8], value: &[u8]) -> Result<u32, CdbError> {
        if depth == 0 || depth > self.parents.len() {
            return Err(CdbError::InvalidDepth {
                depth,
                max: self.parents.len() - 1,
            });
        }
        let parent = self.parents[depth - 1];
        let offset = self
            .cdb
            .add_with_hash(step_hash(symbol, parent), symbol, value)?;
        self.parents.truncate(depth);
        self.parents.push(offset);
        Ok(offset)
    }

    pub fn put_char(&mut self, depth: usize, c: char, value: &[u8]) -> Result<u32, CdbError> {
        let mut buf = [0u8; 4];
        self.put(depth, c.encode_utf8(&mut buf).as_bytes(), value)
    }

    pub fn len(&self) -> usize {
        self.cdb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cdb.is_empty()
    }

    pub fn finish(self) -> Result<(), CdbError> {
        self.cdb.finish()
    }
}
