use std::io::Cursor;

use tempfile::TempDir;

use super::*;
use crate::cdb::{TrieDb, ROOT};

fn build(source: &str) -> Result<(TempDir, TrieDb, BuildStats), BuildError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dict.tcdb");
    let stats = build_from_reader(Cursor::new(source), &path)?;
    let db = TrieDb::open(&path).unwrap();
    Ok((dir, db, stats))
}

fn read(db: &TrieDb, word: &str) -> Option<String> {
    let steps = db.walk(word);
    if steps.len() != word.chars().count() {
        return None;
    }
    steps
        .last()
        .filter(|s| s.is_terminal())
        .map(|s| decode_reading(s.value))
}

#[test]
fn test_build_and_read_back() {
    let (_dir, db, stats) = build(
        "# comment\n\
         \n\
         家 いえ\n\
         家族 カゾク\n\
         家族旅行 カゾクリョコウ\n\
         漢字 カンジ\n",
    )
    .unwrap();
    assert_eq!(stats.words, 4);
    // 家, 族, 旅, 行, 漢, 字
    assert_eq!(stats.edges, 6);

    assert_eq!(read(&db, "家").as_deref(), Some("イエ"));
    assert_eq!(read(&db, "家族").as_deref(), Some("カゾク"));
    assert_eq!(read(&db, "家族旅行").as_deref(), Some("カゾクリョコウ"));
    assert_eq!(read(&db, "漢字").as_deref(), Some("カンジ"));
    // Inner prefix: present, but no word ends there.
    assert_eq!(db.walk("家族旅").len(), 3);
    assert_eq!(read(&db, "家族旅"), None);
    assert!(db.lookup_char('字', ROOT).is_none());
}

#[test]
fn test_inner_edges_are_empty() {
    let (_dir, db, stats) = build("東京都庁 トウキョウトチョウ\n").unwrap();
    assert_eq!(stats.edges, 4);
    let steps = db.walk("東京都庁");
    assert_eq!(steps.len(), 4);
    assert!(steps[..3].iter().all(|s| !s.is_terminal()));
    assert!(steps[3].is_terminal());
}

#[test]
fn test_diverging_suffixes_share_prefix() {
    let (_dir, db, stats) = build("あいう アイウ\nあいえ アイエ\nあか アカ\n").unwrap();
    // あ, い, う | え | か
    assert_eq!(stats.edges, 5);
    assert_eq!(read(&db, "あいう").as_deref(), Some("アイウ"));
    assert_eq!(read(&db, "あいえ").as_deref(), Some("アイエ"));
    assert_eq!(read(&db, "あか").as_deref(), Some("アカ"));
    assert_eq!(read(&db, "あい"), None);
}

#[test]
fn test_extra_readings_are_ignored() {
    let (_dir, db, _) = build("日 ヒ ニチ ジツ\n").unwrap();
    assert_eq!(read(&db, "日").as_deref(), Some("ヒ"));
}

#[test]
fn test_canonicalized_reading() {
    let (_dir, db, _) = build("鼻血 ハナヂ\n").unwrap();
    assert_eq!(read(&db, "鼻血").as_deref(), Some("ハナジ"));
}

#[test]
fn test_out_of_order_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tcdb");
    let err = build_from_reader(Cursor::new("b ビー\na エー\n"), &path).unwrap_err();
    assert!(matches!(err, BuildError::MalformedRecord { line: 2, .. }));
    assert!(err.to_string().contains("out of order"));
    assert!(!path.exists());
}

#[test]
fn test_duplicate_is_rejected() {
    let Err(err) = build("猫 ネコ\n猫 ビョウ\n") else {
        panic!("duplicate word was accepted");
    };
    assert!(matches!(err, BuildError::MalformedRecord { line: 2, .. }));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_missing_reading_is_rejected() {
    let Err(err) = build("猫 ネコ\n犬\n") else {
        panic!("word without reading was accepted");
    };
    assert!(matches!(err, BuildError::MalformedRecord { line: 2, .. }));
}

#[test]
fn test_unencodable_reading_is_rejected() {
    match build("猫 neko\n") {
        Err(BuildError::MalformedRecord { line, reason }) => {
            assert_eq!(line, 1);
            assert!(reason.contains("unencodable"));
        }
        Err(other) => panic!("expected MalformedRecord, got {other:?}"),
        Ok(_) => panic!("unencodable reading was accepted"),
    }
}

#[test]
fn test_invalid_utf8_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tcdb");
    let err = build_from_reader(&b"a \xe3\x82\xa2\nb \xff\n"[..], &path).unwrap_err();
    match err {
        BuildError::MalformedRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("UTF-8"));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_missing_final_newline_and_crlf() {
    let (_dir, db, stats) = build("家 いえ\r\n家族 かぞく").unwrap();
    assert_eq!(stats.words, 2);
    assert_eq!(read(&db, "家").as_deref(), Some("イエ"));
    assert_eq!(read(&db, "家族").as_deref(), Some("カゾク"));
}

#[test]
fn test_parse_line() {
    assert!(parse_line(1, "").unwrap().is_none());
    assert!(parse_line(1, "   ").unwrap().is_none());
    assert!(parse_line(1, "# 家 イエ").unwrap().is_none());
    assert_eq!(parse_line(1, " 家 イエ ").unwrap(), Some(("家", "イエ")));
    assert_eq!(parse_line(1, "家\tイエ").unwrap(), Some(("家", "イエ")));
    assert!(parse_line(7, "家").is_err());
}

#[test]
fn test_empty_input_builds_empty_database() {
    let (_dir, db, stats) = build("").unwrap();
    assert_eq!(stats, BuildStats { words: 0, edges: 0 });
    assert!(db.cdb().is_empty());
}
