use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::process;

use tenji_core::braille::OutputFormat;
use tenji_core::cdb::TrieDb;
use tenji_core::pipeline::{fold, Translator};
use tenji_core::settings::settings;
use tenji_core::tokenizer::TokenizerPolicy;
use tracing::debug;

use super::dict_ops::open_inputs;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub width: usize,
    pub format: OutputFormat,
    pub debug: bool,
}

impl ConvertOptions {
    /// Command-line values over the `[output]` settings.
    pub fn resolve(width: Option<usize>, format: Option<OutputFormat>, debug: bool) -> Self {
        let output = &settings().output;
        Self {
            width: width.unwrap_or(output.width).max(1),
            format: format.unwrap_or(output.format),
            debug,
        }
    }
}

/// Decode UTF-8, dropping invalid sequences.
pub fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                out.push_str(s);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                bytes = &rest[e.error_len().unwrap_or(rest.len())..];
            }
        }
    }
}

/// Convert every line of `input` to `out`.
pub fn convert_stream(
    translator: &mut Translator<'_>,
    mut input: impl BufRead,
    out: &mut impl Write,
    opts: &ConvertOptions,
) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut lines = 0usize;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!(lines, "input done");
            return Ok(());
        }
        lines += 1;
        let line = decode_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        let mut words = Vec::new();
        for chunk in translator.translate_line(line) {
            if opts.debug {
                writeln!(out, "> {}", chunk.source)?;
            }
            words.push(opts.format.render(&chunk.cells));
        }
        for folded in fold(&words, opts.width) {
            writeln!(out, "{folded}")?;
        }
    }
}

pub fn convert(dict_file: &str, inputs: &[String], opts: &ConvertOptions) {
    let db = die!(
        TrieDb::open(Path::new(dict_file)),
        "Error opening dictionary {dict_file}: {}"
    );
    let mut translator = Translator::new(&db, TokenizerPolicy::default());
    let input = die!(open_inputs(inputs), "Error opening input: {}");
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    die!(
        convert_stream(&mut translator, input, &mut out, opts),
        "Error: {}"
    );
    die!(out.flush(), "Error writing output: {}");
}

#[cfg(test)]
mod tests {
    use tenji_core::dict::DictBuilder;

    use super::*;

    fn db(entries: &[(&str, &str)]) -> (tempfile::TempDir, TrieDb) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tcdb");
        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let mut builder = DictBuilder::create(&path).unwrap();
        for (i, (w, r)) in sorted.iter().enumerate() {
            builder.add(i + 1, w, r).unwrap();
        }
        builder.finish().unwrap();
        let db = TrieDb::open(&path).unwrap();
        (dir, db)
    }

    fn run(input: &[u8], opts: ConvertOptions) -> String {
        let (_dir, db) = db(&[("家族", "かぞく"), ("家", "いえ")]);
        let mut translator = Translator::new(&db, TokenizerPolicy::default());
        let mut out = Vec::new();
        convert_stream(&mut translator, input, &mut out, &opts).unwrap();
        String::from_utf8(out).unwrap()
    }

    const OPTS: ConvertOptions = ConvertOptions {
        width: 32,
        format: OutputFormat::Nabcc,
        debug: false,
    };

    #[test]
    fn test_convert_lines() {
        assert_eq!(run("家が家を\r\n家\n".as_bytes(), OPTS), "BF\"* BF9\nBF\n");
    }

    #[test]
    fn test_convert_debug_trace() {
        let opts = ConvertOptions {
            debug: true,
            ..OPTS
        };
        assert_eq!(
            run("家が".as_bytes(), opts),
            "> イエガ\nBF\"*\n"
        );
    }

    #[test]
    fn test_convert_unicode_and_width() {
        let opts = ConvertOptions {
            width: 3,
            format: OutputFormat::Unicode,
            debug: false,
        };
        assert_eq!(run("家が家を".as_bytes(), opts), "⠃⠋⠐⠡\n⠃⠋⠔\n");
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode_lossy(b"ab"), "ab");
        assert_eq!(decode_lossy(b"a\xffb"), "ab");
        assert_eq!(decode_lossy(b"a\xe5\xae"), "a");
        assert_eq!(decode_lossy("家\u{fffd}".as_bytes()), "家\u{fffd}");
    }
}
