use tempfile::TempDir;

use crate::cdb::TrieDb;
use crate::dict::DictBuilder;

/// Build a dictionary from unsorted `(word, reading)` pairs in a temp dir.
/// Keep the returned `TempDir` alive as long as the database is used.
pub(crate) fn build_db(entries: &[(&str, &str)]) -> (TempDir, TrieDb) {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.tcdb");
    let mut builder = DictBuilder::create(&path).unwrap();
    for (i, (word, reading)) in sorted.iter().enumerate() {
        builder.add(i + 1, word, reading).unwrap();
    }
    builder.finish().unwrap();
    let db = TrieDb::open(&path).unwrap();
    (dir, db)
}
