use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tablesmith_codegen::TargetShape;
use tablesmith_core::DialectKind;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tablesmith.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub dictionary: DictionarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    pub dialect: DialectKind,
    pub targets: Vec<TargetShape>,
    pub seed: Option<u64>,
    pub out_dir: PathBuf,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            dialect: DialectKind::MySql,
            targets: TargetShape::ALL.to_vec(),
            seed: None,
            out_dir: PathBuf::from("runs"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    /// JSON file loaded into the in-memory dictionary.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when present.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    let path = match path {
        Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };
    let content = std::fs::read_to_string(&path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> ConfigResult<Settings> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings = parse_settings("").expect("parse");
        assert_eq!(settings.generate.dialect, DialectKind::MySql);
        assert_eq!(settings.generate.targets, TargetShape::ALL.to_vec());
        assert_eq!(settings.generate.seed, None);
        assert_eq!(settings.generate.out_dir, PathBuf::from("runs"));
        assert_eq!(settings.dictionary.path, None);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Text);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = parse_settings(
            r#"
[generate]
dialect = "postgres"
targets = ["entity", "type_declaration"]
seed = 42
out_dir = "out"

[dictionary]
path = "dict.json"

[logging]
level = "debug"
format = "json"
"#,
        )
        .expect("parse");
        assert_eq!(settings.generate.dialect, DialectKind::Postgres);
        assert_eq!(
            settings.generate.targets,
            vec![TargetShape::Entity, TargetShape::TypeDeclaration]
        );
        assert_eq!(settings.generate.seed, Some(42));
        assert_eq!(settings.generate.out_dir, PathBuf::from("out"));
        assert_eq!(settings.dictionary.path, Some(PathBuf::from("dict.json")));
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        let err = parse_settings("[generate]\ndialect = \"oracle\"\n").expect_err("bad dialect");
        assert!(matches!(err, ConfigError::TomlDecode(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/tablesmith.toml")))
            .expect_err("missing file");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
