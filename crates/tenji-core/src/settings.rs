//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::braille::OutputFormat;
use crate::tokenizer::PrefixMode;
use crate::unicode::is_hiragana;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tokenizer: TokenizerSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerSettings {
    pub particles: Vec<String>,
    #[serde(default)]
    pub honorific_prefix: Option<String>,
    pub prefix_mode: PrefixMode,
    pub kanji_run_limit: usize,
    #[serde(default)]
    pub closed_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub width: usize,
    pub format: OutputFormat,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    for p in &s.tokenizer.particles {
        let n = p.chars().count();
        if !(1..=2).contains(&n) || !p.chars().all(is_hiragana) {
            return Err(invalid(
                format!("tokenizer.particles[{p:?}]"),
                "must be one or two hiragana",
            ));
        }
    }

    if let Some(prefix) = &s.tokenizer.honorific_prefix {
        let mut chars = prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_hiragana(c) => {}
            _ => {
                return Err(invalid(
                    "tokenizer.honorific_prefix",
                    "must be a single hiragana",
                ))
            }
        }
    }

    if s.tokenizer.kanji_run_limit == 0 {
        return Err(invalid("tokenizer.kanji_run_limit", "must be positive"));
    }

    if let Some(w) = s.tokenizer.closed_words.iter().find(|w| w.is_empty()) {
        return Err(invalid(
            format!("tokenizer.closed_words[{w:?}]"),
            "must not be empty",
        ));
    }

    if s.output.width == 0 {
        return Err(invalid("output.width", "must be positive"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[tokenizer]
particles = ["は"]
prefix_mode = "attach"
kanji_run_limit = 2

[output]
width = 10
format = "unicode"
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.tokenizer.particles.len(), 17);
        assert!(s.tokenizer.particles.iter().any(|p| p == "のは"));
        assert_eq!(s.tokenizer.honorific_prefix.as_deref(), Some("お"));
        assert_eq!(s.tokenizer.prefix_mode, PrefixMode::Isolate);
        assert_eq!(s.tokenizer.kanji_run_limit, 4);
        assert!(s.tokenizer.closed_words.iter().any(|w| w == "今日"));
        assert_eq!(s.output.width, 32);
        assert_eq!(s.output.format, OutputFormat::Nabcc);
    }

    #[test]
    fn parse_minimal_custom_toml() {
        let s = parse_settings_toml(MINIMAL).unwrap();
        assert_eq!(s.tokenizer.prefix_mode, PrefixMode::Attach);
        assert!(s.tokenizer.honorific_prefix.is_none());
        assert!(s.tokenizer.closed_words.is_empty());
        assert_eq!(s.output.format, OutputFormat::Unicode);
    }

    #[test]
    fn error_long_particle() {
        let toml = MINIMAL.replace(r#"["は"]"#, r#"["のだが"]"#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("tokenizer.particles"));
    }

    #[test]
    fn error_katakana_particle() {
        let toml = MINIMAL.replace(r#"["は"]"#, r#"["ハ"]"#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_bad_prefix() {
        let toml = MINIMAL.replace(
            "prefix_mode = \"attach\"",
            "prefix_mode = \"attach\"\nhonorific_prefix = \"ごお\"",
        );
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("honorific_prefix"));
    }

    #[test]
    fn error_zero_run_limit() {
        let toml = MINIMAL.replace("kanji_run_limit = 2", "kanji_run_limit = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("kanji_run_limit"));
    }

    #[test]
    fn error_zero_width() {
        let toml = MINIMAL.replace("width = 10", "width = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("output.width"));
    }

    #[test]
    fn error_unknown_format() {
        let toml = MINIMAL.replace("\"unicode\"", "\"ascii\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[output]\nwidth = 3\nformat = \"nabcc\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
