// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hint settings.
//!
//! Settings are layered once at startup (defaults, JSON file, environment, CLI) and normalized
//! before a session alphabet is built from them.

use std::{env, error::Error, fmt, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::hints::{fold_case, Alphabet};

pub const DEFAULT_HINT_CHARS: &str = "sadjklewcmpgh";
/// Fewer characters make labels too long to type comfortably.
pub const MIN_HINT_CHARS: usize = 3;
pub const HINT_CHARS_ENV: &str = "KEYHINT_HINT_CHARS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HintSettings {
    pub hint_chars: String,
    pub uppercase_markers: bool,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self { hint_chars: DEFAULT_HINT_CHARS.to_owned(), uppercase_markers: true }
    }
}

impl HintSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        let settings = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded hint settings");
        Ok(settings)
    }

    /// Applies `KEYHINT_HINT_CHARS` when set and non-blank.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        match env::var(HINT_CHARS_ENV) {
            Ok(value) => Ok(self.with_env_value(&value)),
            Err(env::VarError::NotPresent) => Ok(self),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
                name: HINT_CHARS_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            }),
        }
    }

    fn with_env_value(mut self, value: &str) -> Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.hint_chars = trimmed.to_owned();
        }
        self
    }

    /// Keeps alphabetic characters only, folded and deduplicated. Falls back to the default set
    /// when fewer than [`MIN_HINT_CHARS`] remain.
    pub fn normalized(mut self) -> Self {
        let mut chars = String::with_capacity(self.hint_chars.len());
        for ch in self.hint_chars.chars().filter(|ch| ch.is_alphabetic()).map(fold_case) {
            if !chars.contains(ch) {
                chars.push(ch);
            }
        }

        if chars.chars().count() < MIN_HINT_CHARS {
            tracing::warn!(
                hint_chars = %self.hint_chars,
                "too few hint characters; using defaults"
            );
            chars = DEFAULT_HINT_CHARS.to_owned();
        }
        self.hint_chars = chars;
        self
    }

    pub fn alphabet(&self) -> Alphabet {
        Alphabet::new(&self.hint_chars)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    Parse(serde_json::Error),
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read settings {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid settings: {err}"),
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidEnv { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, HintSettings, DEFAULT_HINT_CHARS};
    use rstest::rstest;

    #[test]
    fn defaults_match_plugin_defaults() {
        let settings = HintSettings::default();
        assert_eq!(settings.hint_chars, "sadjklewcmpgh");
        assert!(settings.uppercase_markers);
        assert_eq!(settings.alphabet().len(), 13);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let settings =
            HintSettings::from_json_str(r#"{ "hint_chars": "asdf" }"#).expect("settings");
        assert_eq!(settings.hint_chars, "asdf");
        assert!(settings.uppercase_markers);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = HintSettings::from_json_str(r#"{ "marker_size": 12 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid settings"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = HintSettings::load("/definitely/not/here/keyhint.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here/keyhint.json"));
    }

    #[test]
    fn loads_settings_file() {
        let path = std::env::temp_dir()
            .join(format!("keyhint-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "hint_chars": "jkl", "uppercase_markers": false }"#)
            .expect("write settings");

        let settings = HintSettings::load(&path).expect("load");
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.hint_chars, "jkl");
        assert!(!settings.uppercase_markers);
    }

    #[test]
    fn env_value_overrides_when_not_blank() {
        let settings = HintSettings::default().with_env_value("  qwer ");
        assert_eq!(settings.hint_chars, "qwer");

        let settings = HintSettings::default().with_env_value("   ");
        assert_eq!(settings.hint_chars, DEFAULT_HINT_CHARS);
    }

    #[rstest]
    #[case("asdf", "asdf")]
    #[case("ASdf", "asdf")]
    #[case("a1s2d3", "asd")]
    #[case("aassdd", "asd")]
    #[case("ab", DEFAULT_HINT_CHARS)]
    #[case("", DEFAULT_HINT_CHARS)]
    #[case("a-b-a", DEFAULT_HINT_CHARS)]
    fn normalizes_hint_chars(#[case] raw: &str, #[case] expected: &str) {
        let settings = HintSettings { hint_chars: raw.to_owned(), ..HintSettings::default() };
        assert_eq!(settings.normalized().hint_chars, expected);
    }
}
