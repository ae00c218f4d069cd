use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process;

use tenji_core::cdb::TrieDb;
use tenji_core::dict::{build_from_reader, decode_reading};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Files read back to back, with a newline supplied wherever one does not
/// end in `\n` so lines never join across files.
struct Inputs {
    files: std::vec::IntoIter<File>,
    current: Option<File>,
    last: u8,
}

impl Read for Inputs {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while let Some(file) = &mut self.current {
            let n = file.read(buf)?;
            if n > 0 {
                self.last = buf[n - 1];
                return Ok(n);
            }
            self.current = self.files.next();
            if self.last != b'\n' {
                self.last = b'\n';
                buf[0] = b'\n';
                return Ok(1);
            }
        }
        Ok(0)
    }
}

/// Concatenate `inputs` line-wise, or read stdin when there are none.
pub fn open_inputs(inputs: &[String]) -> io::Result<Box<dyn BufRead>> {
    if inputs.is_empty() {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let files = inputs
        .iter()
        .map(File::open)
        .collect::<io::Result<Vec<_>>>()?;
    let mut files = files.into_iter();
    let current = files.next();
    Ok(Box::new(BufReader::new(Inputs {
        files,
        current,
        last: b'\n',
    })))
}

pub fn build(output_file: &str, inputs: &[String]) {
    let input = die!(open_inputs(inputs), "Error opening input: {}");
    let stats = die!(
        build_from_reader(input, Path::new(output_file)),
        "Error building dictionary: {}"
    );
    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({} words, {} edges, {:.1} KB)",
        stats.words,
        stats.edges,
        file_size as f64 / 1024.0
    );
}

fn open(dict_file: &str) -> TrieDb {
    die!(
        TrieDb::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

pub fn info(dict_file: &str) {
    let db = open(dict_file);
    let cdb = db.cdb();
    let file_size = fs::metadata(dict_file).map(|m| m.len()).unwrap_or(0);
    let (terminal, inner) = cdb
        .records()
        .fold((0usize, 0usize), |(t, i), r| {
            if r.value.is_empty() {
                (t, i + 1)
            } else {
                (t + 1, i)
            }
        });

    println!("Dictionary: {dict_file}");
    println!("File size:  {:.1} KB", file_size as f64 / 1024.0);
    println!("Edges:      {}", cdb.len());
    println!("Words:      {terminal}");
    println!("Inner:      {inner}");
}

/// One line per symbol of `word`: the symbol, its record offset, and the
/// reading of the word ending there, if any.
pub fn lookup_lines(db: &TrieDb, word: &str) -> Vec<String> {
    let steps = db.walk(word);
    let mut lines: Vec<String> = word
        .chars()
        .zip(&steps)
        .map(|(c, step)| {
            if step.is_terminal() {
                format!("{c}\t@{}\t{}", step.offset, decode_reading(step.value))
            } else {
                format!("{c}\t@{}\t-", step.offset)
            }
        })
        .collect();
    if let Some(c) = word.chars().nth(steps.len()) {
        lines.push(format!("{c}\t(not found)"));
    }
    lines
}

pub fn lookup(dict_file: &str, word: &str) {
    let db = open(dict_file);
    for line in lookup_lines(&db, word) {
        println!("{line}");
    }
}

pub fn dump(dict_file: &str) {
    let db = open(dict_file);
    for record in db.cdb().records() {
        let symbol = String::from_utf8_lossy(record.key);
        if record.value.is_empty() {
            println!("{}\t{symbol}", record.offset);
        } else {
            println!(
                "{}\t{symbol}\t{}",
                record.offset,
                decode_reading(record.value)
            );
        }
    }
}

pub fn verify(dict_file: &str) {
    let db = open(dict_file);
    die!(db.cdb().verify(), "Verification failed: {}");
    println!("OK: {} edges", db.cdb().len());
}
