use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;
use tenji_core::braille::{Encoder, OutputFormat};
use tenji_core::cdb::TrieDb;
use tenji_core::dict::DictBuilder;
use tenji_core::pipeline::Translator;
use tenji_core::resolver::Resolver;
use tenji_core::tokenizer::TokenizerPolicy;

fn bench_dict() -> (TempDir, TrieDb) {
    let mut entries = vec![
        ("今日", "きょう"),
        ("天気", "てんき"),
        ("東京", "とうきょう"),
        ("東京都", "とうきょうと"),
        ("特許", "とっきょ"),
        ("許可", "きょか"),
        ("許可局", "きょかきょく"),
        ("願い", "ねがい"),
        ("電話", "でんわ"),
        ("番号", "ばんごう"),
        ("私", "わたし"),
        ("学校", "がっこう"),
        ("行き", "いき"),
        ("思い", "おもい"),
    ];
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.tcdb");
    let mut builder = DictBuilder::create(&path).unwrap();
    for (i, (word, reading)) in entries.iter().enumerate() {
        builder.add(i + 1, word, reading).unwrap();
    }
    builder.finish().unwrap();
    let db = TrieDb::open(&path).unwrap();
    (dir, db)
}

static INPUTS: &[(&str, &str)] = &[
    ("short", "今日は"),
    ("medium", "今日は天気がいいですね"),
    ("long", "私は東京特許許可局に電話番号をお願いして学校に行きたいと思います"),
];

fn bench_line(c: &mut Criterion) {
    let (_dir, db) = bench_dict();
    let mut translator = Translator::new(&db, TokenizerPolicy::default());
    let mut group = c.benchmark_group("pipeline/line");
    for &(label, line) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, line.len()), &line, |b, &line| {
            b.iter(|| translator.render_line(line, OutputFormat::Nabcc, 32));
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let (_dir, db) = bench_dict();
    let resolver = Resolver::new(&db);
    let mut group = c.benchmark_group("pipeline/resolve");
    for &(label, line) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, line.len()), &line, |b, &line| {
            b.iter(|| resolver.read_text(line));
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let encoder = Encoder::default();
    let reading = "ワタシワトーキョートッキョキョカキョクニデンワバンゴーヲ";
    c.bench_function("pipeline/encode", |b| b.iter(|| encoder.cells(reading)));
}

criterion_group!(benches, bench_line, bench_resolve, bench_encode);
criterion_main!(benches);
