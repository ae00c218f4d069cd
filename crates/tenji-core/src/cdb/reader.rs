use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::OnceLock;

use memmap2::Mmap;
use tracing::warn;

use super::{
    bucket_of, hash, probe_sequence, read_u32, CdbError, BUCKETS, DIRECTORY_SIZE, SLOT_SIZE,
};

enum Storage {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Storage {
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::Mapped(m) => m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    hash: u32,
    offset: u32,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    offset: u32,
    cells: u32,
}

/// One record of the heap, borrowed from the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub offset: u32,
    pub key: &'a [u8],
    pub value: &'a [u8],
}

/// Read-only constant database.
///
/// Pointer tables are decoded lazily, once per bucket, and cached for the
/// lifetime of the reader. The cache is populate-once so lookups take `&self`
/// and the reader can be shared across threads.
pub struct Cdb {
    data: Storage,
    directory: [Bucket; BUCKETS],
    tables: Box<[OnceLock<Box<[Slot]>>]>,
}

impl fmt::Debug for Cdb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapped = matches!(self.data, Storage::Mapped(_));
        f.debug_struct("Cdb")
            .field("bytes", &self.bytes().len())
            .field("mapped", &mapped)
            .finish_non_exhaustive()
    }
}

impl Cdb {
    /// Open a database file via mmap.
    pub fn open(path: &Path) -> Result<Self, CdbError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // Databases are published by rename, never rewritten in place.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_storage(Storage::Mapped(mmap))
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CdbError> {
        Self::from_storage(Storage::Owned(data))
    }

    fn from_storage(data: Storage) -> Result<Self, CdbError> {
        let bytes = data.bytes();
        if bytes.len() < DIRECTORY_SIZE {
            return Err(CdbError::CorruptDatabase(format!(
                "file is {} bytes, shorter than the {DIRECTORY_SIZE}-byte directory",
                bytes.len()
            )));
        }

        let mut directory = [Bucket {
            offset: 0,
            cells: 0,
        }; BUCKETS];
        for (i, bucket) in directory.iter_mut().enumerate() {
            let pos = i * SLOT_SIZE;
            // In bounds: the directory length was checked above.
            let offset = read_u32(bytes, pos).unwrap_or(0);
            let cells = read_u32(bytes, pos + 4).unwrap_or(0);
            if cells > 0 {
                let start = offset as u64;
                let end = start + cells as u64 * SLOT_SIZE as u64;
                if start < DIRECTORY_SIZE as u64 || end > bytes.len() as u64 {
                    return Err(CdbError::CorruptDatabase(format!(
                        "bucket {i} table {start}..{end} lies outside 2048..{}",
                        bytes.len()
                    )));
                }
            }
            *bucket = Bucket { offset, cells };
        }

        let tables = (0..BUCKETS).map(|_| OnceLock::new()).collect();
        Ok(Self {
            data,
            directory,
            tables,
        })
    }

    fn bytes(&self) -> &[u8] {
        self.data.bytes()
    }

    fn table(&self, bucket: usize) -> &[Slot] {
        self.tables[bucket].get_or_init(|| {
            let Bucket { offset, cells } = self.directory[bucket];
            let bytes = self.bytes();
            (0..cells as usize)
                .map(|i| {
                    let pos = offset as usize + i * SLOT_SIZE;
                    // Table bounds were validated in `from_storage`.
                    Slot {
                        hash: read_u32(bytes, pos).unwrap_or(0),
                        offset: read_u32(bytes, pos + 4).unwrap_or(0),
                    }
                })
                .collect()
        })
    }

    /// Decode the record stored at `offset`, or `None` if it runs past EOF.
    pub fn record_at(&self, offset: u32) -> Option<Record<'_>> {
        let bytes = self.bytes();
        let pos = offset as usize;
        let klen = read_u32(bytes, pos)? as usize;
        let vlen = read_u32(bytes, pos + 4)? as usize;
        let key_start = pos + 8;
        let value_start = key_start.checked_add(klen)?;
        let value_end = value_start.checked_add(vlen)?;
        Some(Record {
            offset,
            key: bytes.get(key_start..value_start)?,
            value: bytes.get(value_start..value_end)?,
        })
    }

    /// Probe for `key` under an explicit hash value.
    ///
    /// Visits at most `cell_count` slots of the bucket selected by the low
    /// byte of `h`; an empty slot ends the chain early.
    pub(crate) fn find(&self, h: u32, key: &[u8]) -> Option<Record<'_>> {
        let bucket = bucket_of(h);
        let cells = self.directory[bucket].cells;
        if cells == 0 {
            return None;
        }
        let table = self.table(bucket);
        for i in probe_sequence(h, cells) {
            let slot = table[i as usize];
            if slot.offset == 0 {
                return None;
            }
            if slot.hash != h {
                continue;
            }
            match self.record_at(slot.offset) {
                Some(record) if record.key == key => return Some(record),
                Some(_) => {}
                None => warn!(offset = slot.offset, "record pointer runs past end of file"),
            }
        }
        None
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.find(hash(key), key).map(|r| r.value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Number of pointer slots in the bucket a hash value selects.
    pub fn bucket_cells(&self, h: u32) -> u32 {
        self.directory[bucket_of(h)].cells
    }

    /// End of the record heap. Tables are written right after the last
    /// record, starting with bucket 0.
    fn end_of_data(&self) -> usize {
        (self.directory[0].offset as usize).clamp(DIRECTORY_SIZE, self.bytes().len())
    }

    /// Iterate over every record in heap order.
    pub fn records(&self) -> Records<'_> {
        Records {
            db: self,
            pos: DIRECTORY_SIZE,
            end: self.end_of_data(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }

    /// Check every pointer slot and every heap record against the file size.
    pub fn verify(&self) -> Result<(), CdbError> {
        for bucket in 0..BUCKETS {
            for (i, slot) in self.table(bucket).iter().enumerate() {
                if slot.offset == 0 {
                    continue;
                }
                let Some(record) = self.record_at(slot.offset) else {
                    return Err(CdbError::CorruptDatabase(format!(
                        "bucket {bucket} slot {i} points past end of file ({})",
                        slot.offset
                    )));
                };
                if bucket_of(slot.hash) != bucket {
                    return Err(CdbError::CorruptDatabase(format!(
                        "bucket {bucket} slot {i} holds hash {:#010x} of another bucket",
                        slot.hash
                    )));
                }
                if (record.offset as usize) >= self.end_of_data() {
                    return Err(CdbError::CorruptDatabase(format!(
                        "bucket {bucket} slot {i} points into the pointer tables"
                    )));
                }
            }
        }

        let mut pos = DIRECTORY_SIZE;
        let end = self.end_of_data();
        while pos < end {
            let record = self.record_at(pos as u32).ok_or_else(|| {
                CdbError::CorruptDatabase(format!("record at {pos} runs past end of file"))
            })?;
            pos += 8 + record.key.len() + record.value.len();
        }
        if pos != end {
            return Err(CdbError::CorruptDatabase(format!(
                "record heap overruns the pointer tables ({pos} > {end})"
            )));
        }
        Ok(())
    }
}

pub struct Records<'a> {
    db: &'a Cdb,
    pos: usize,
    end: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let record = self.db.record_at(self.pos as u32)?;
        self.pos += 8 + record.key.len() + record.value.len();
        Some(record)
    }
}
