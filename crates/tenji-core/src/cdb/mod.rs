//! Constant databases: immutable on-disk hash tables.
//!
//! File layout (little-endian throughout):
//!
//! ```text
//! 0..2048      directory: 256 × (u32 table_offset, u32 cell_count)
//! 2048..eod    record heap: (u32 key_len, u32 value_len, key, value)*
//! eod..        per-bucket pointer tables: cell_count × (u32 hash, u32 record_offset)
//! ```
//!
//! A record offset of 0 marks an empty pointer slot; no record can live there
//! because the directory occupies the start of the file.
//!
//! [`Cdb`] / [`CdbWriter`] are the plain key → value store. [`TrieDb`] /
//! [`TrieWriter`] seed the hash with the offset of a parent record so that a
//! chain of one-symbol lookups walks a trie stored in the same format.

mod reader;
mod trie;
mod writer;

pub use reader::{Cdb, Record, Records};
pub use trie::{Step, TrieDb, TrieWriter, ROOT};
pub use writer::CdbWriter;

use std::io;

/// Number of top-level hash buckets.
pub const BUCKETS: usize = 256;
/// Size of one directory entry or pointer slot.
pub const SLOT_SIZE: usize = 8;
/// Size of the directory, which is also the offset of the first record.
pub const DIRECTORY_SIZE: usize = BUCKETS * SLOT_SIZE;
/// Initial value of the rolling hash.
pub const HASH_SEED: u32 = 5381;

#[derive(Debug, thiserror::Error)]
pub enum CdbError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt database: {0}")]
    CorruptDatabase(String),

    #[error("database too large: {0}")]
    TooLarge(String),

    #[error("trie depth {depth} has no parent (deepest written is {max})")]
    InvalidDepth { depth: usize, max: usize },
}

/// The cdb rolling hash: `h = ((h * 33) ^ byte) mod 2^32`, starting at `seed`.
pub fn hash_with_seed(key: &[u8], seed: u32) -> u32 {
    key.iter()
        .fold(seed, |h, &b| h.wrapping_mul(33) ^ u32::from(b))
}

pub fn hash(key: &[u8]) -> u32 {
    hash_with_seed(key, HASH_SEED)
}

/// Bucket index for a hash value.
pub fn bucket_of(h: u32) -> usize {
    (h & 0xFF) as usize
}

/// Slot indices visited when probing a bucket table of `cells` slots.
///
/// Starts at `(h >> 8) % cells` and advances by one, wrapping, so every slot
/// is visited exactly once. Yields nothing for an empty table.
pub fn probe_sequence(h: u32, cells: u32) -> impl Iterator<Item = u32> {
    let start = if cells == 0 { 0 } else { (h >> 8) % cells };
    (0..cells).map(move |i| (start + i) % cells)
}

pub(crate) fn read_u32(data: &[u8], pos: usize) -> Option<u32> {
    let end = pos.checked_add(4)?;
    let bytes: [u8; 4] = data.get(pos..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}
