//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub documents: DocumentConfig,
    pub ocr: OcrConfig,
    pub ui: UiConfig,
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
}

/// Document generation settings (invoice template and output location).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Invoice template file. Empty path means the built-in template.
    pub template_path: PathBuf,
    /// Directory where generated documents and extracted files land.
    pub output_dir: PathBuf,
}

/// OCR model settings. All paths optional until the user downloads models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    pub encoder_model: PathBuf,
    pub decoder_model: PathBuf,
    pub tokenizer: PathBuf,
    /// Maximum tokens generated per image (default: 256).
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_max_tokens() -> usize {
    256
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub start_maximized: bool,
    pub confirm_deletes: bool,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Database path cannot be empty".to_string(),
            ));
        }
        if self.documents.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "Document output directory cannot be empty".to_string(),
            ));
        }
        if self.ocr.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "OCR max tokens must be at least 1".to_string(),
            ));
        }
        if self.ocr.max_tokens > 4096 {
            return Err(ConfigError::Validation(
                "OCR max tokens cannot exceed 4096".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl DatabaseConfig {
    /// Build connection string for SeaORM.
    pub fn connection_string(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

/// Per-user data directory, next to the executable as a fallback.
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "deskkit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: data_dir().join("deskkit.db"),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::new(),
            output_dir: data_dir().join("output"),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        let models = data_dir().join("models");
        Self {
            encoder_model: models.join("trocr_encoder.onnx"),
            decoder_model: models.join("trocr_decoder.onnx"),
            tokenizer: models.join("tokenizer.json"),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_maximized: false,
            confirm_deletes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_connection_string() {
        let db = DatabaseConfig {
            path: PathBuf::from("/tmp/test.db"),
        };
        assert_eq!(db.connection_string(), "sqlite:///tmp/test.db?mode=rwc");
    }

    #[test]
    fn test_validation_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_max_tokens_bounds() {
        let mut config = AppConfig::default();

        config.ocr.max_tokens = 0;
        assert!(config.validate().is_err());

        config.ocr.max_tokens = 5000;
        assert!(config.validate().is_err());

        config.ocr.max_tokens = 256;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.database.path, config.database.path);
        assert_eq!(parsed.ocr.max_tokens, config.ocr.max_tokens);
    }
}
