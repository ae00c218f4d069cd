use std::fs;
use std::process;

use tenji_core::settings::{self, Settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

fn summary(s: &Settings) -> String {
    format!(
        "tokenizer.particles={}, tokenizer.kanji_run_limit={}, output.width={}, output.format={}",
        s.tokenizer.particles.len(),
        s.tokenizer.kanji_run_limit,
        s.output.width,
        s.output.format
    )
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!("OK: {}", summary(&s));
}

/// Install `file` as the process settings. Must run before anything reads
/// `settings()`.
pub fn load_settings(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}
