use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{bucket_of, hash, probe_sequence, CdbError, BUCKETS, DIRECTORY_SIZE, SLOT_SIZE};

/// Streaming constant-database writer.
///
/// Records go to `<path>.tmp` as they are added; [`CdbWriter::finish`] writes
/// the pointer tables and the directory, then renames the file into place.
/// Until `finish` returns, no file exists at `path`. Dropping an unfinished
/// writer removes the temporary file.
pub struct CdbWriter {
    out: BufWriter<File>,
    path: PathBuf,
    tmp_path: PathBuf,
    pos: u32,
    /// (hash, record offset) of every record, in insertion order.
    pointers: Vec<(u32, u32)>,
    finished: bool,
}

impl CdbWriter {
    pub fn create(path: &Path) -> Result<Self, CdbError> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);

        let mut out = BufWriter::new(File::create(&tmp_path)?);
        // The directory is filled in by `finish`.
        out.write_all(&[0u8; DIRECTORY_SIZE])?;

        Ok(Self {
            out,
            path: path.to_path_buf(),
            tmp_path,
            pos: DIRECTORY_SIZE as u32,
            pointers: Vec::new(),
            finished: false,
        })
    }

    /// Append a record under the standard key hash. Returns its offset.
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<u32, CdbError> {
        self.add_with_hash(hash(key), key, value)
    }

    /// Append a record under an explicit hash value. Returns its offset.
    pub(crate) fn add_with_hash(&mut self, h: u32, key: &[u8], value: &[u8]) -> Result<u32, CdbError> {
        let klen = len_u32(key.len(), "key")?;
        let vlen = len_u32(value.len(), "value")?;
        let offset = self.pos;
        let next = 8u32
            .checked_add(klen)
            .and_then(|n| n.checked_add(vlen))
            .and_then(|n| n.checked_add(offset))
            .ok_or_else(|| {
                CdbError::TooLarge(format!("record at {offset} would pass the 4 GiB limit"))
            })?;

        self.out.write_all(&klen.to_le_bytes())?;
        self.out.write_all(&vlen.to_le_bytes())?;
        self.out.write_all(key)?;
        self.out.write_all(value)?;
        self.pointers.push((h, offset));
        self.pos = next;
        Ok(offset)
    }

    /// Number of records added so far.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Write pointer tables and directory, flush, and publish the file.
    pub fn finish(mut self) -> Result<(), CdbError> {
        let mut counts = [0u32; BUCKETS];
        for &(h, _) in &self.pointers {
            counts[bucket_of(h)] += 1;
        }

        let mut by_bucket: Vec<Vec<(u32, u32)>> = counts
            .iter()
            .map(|&n| Vec::with_capacity(n as usize))
            .collect();
        for &(h, offset) in &self.pointers {
            by_bucket[bucket_of(h)].push((h, offset));
        }

        let mut directory = Vec::with_capacity(DIRECTORY_SIZE);
        for entries in &by_bucket {
            // Twice as many cells as entries keeps probe chains short.
            let cells = len_u32(entries.len() * 2, "bucket table")?;
            let mut table = vec![(0u32, 0u32); cells as usize];
            for &(h, offset) in entries {
                let free = probe_sequence(h, cells)
                    .find(|&i| table[i as usize].1 == 0)
                    .ok_or_else(|| CdbError::TooLarge("bucket table is full".to_string()))?;
                table[free as usize] = (h, offset);
            }

            directory.extend_from_slice(&self.pos.to_le_bytes());
            directory.extend_from_slice(&cells.to_le_bytes());
            for (h, offset) in table {
                self.out.write_all(&h.to_le_bytes())?;
                self.out.write_all(&offset.to_le_bytes())?;
            }
            self.pos = (cells as usize)
                .checked_mul(SLOT_SIZE)
                .and_then(|n| u32::try_from(n).ok())
                .and_then(|n| self.pos.checked_add(n))
                .ok_or_else(|| {
                    CdbError::TooLarge("pointer tables pass the 4 GiB limit".to_string())
                })?;
        }

        self.out.seek(SeekFrom::Start(0))?;
        self.out.write_all(&directory)?;
        self.out.flush()?;
        self.out.get_ref().sync_all()?;
        fs::rename(&self.tmp_path, &self.path)?;
        self.finished = true;

        debug!(bytes = self.pos, "pointer tables written");
        info!(
            records = self.pointers.len(),
            path = %self.path.display(),
            "database finalized"
        );
        Ok(())
    }
}

impl Drop for CdbWriter {
    fn drop(&mut self) {
        if !self.finished {
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

fn len_u32(n: usize, what: &str) -> Result<u32, CdbError> {
    u32::try_from(n).map_err(|_| CdbError::TooLarge(format!("{what} length {n} exceeds u32::MAX")))
}
