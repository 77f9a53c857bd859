//! TOML configuration.
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! firm_name = "Kalemi Law"
//!
//! [export]
//! format = "pdf"
//! directory = "."
//!
//! [logging]
//! level = "info"
//! console = true
//! file = "ltt.log"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ltt_core::render::DEFAULT_FIRM_NAME;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Shown in document titles as "<firm_name> - Cost Summary".
    pub firm_name: String,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Registered renderer name, e.g. `pdf`, `txt` or `json`.
    pub format: String,
    /// Where exported documents are written.
    pub directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins over this.
    pub level: String,
    /// Log to stderr.
    pub console: bool,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firm_name: DEFAULT_FIRM_NAME.to_string(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: "pdf".to_string(),
            directory: PathBuf::from("."),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            file: None,
        }
    }
}

impl AppConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.firm_name, "Kalemi Law");
        assert_eq!(config.export.format, "pdf");
        assert!(config.logging.console);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            firm_name = "Acme Legal"

            [logging]
            file = "ltt.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.firm_name, "Acme Legal");
        assert_eq!(config.logging.file, Some(PathBuf::from("ltt.log")));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("colour = \"blue\"");

        assert!(result.is_err());
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
