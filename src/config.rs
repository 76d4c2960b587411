//! Validator settings. The defaults live in
//! `defaults/coa-validator.default.toml` and are compiled into the binary.

use chrono::{DateTime, Local};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/coa-validator.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub grammar: GrammarConfig,
    pub report: ReportConfig,
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    pub glued_token_max_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub default_file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressConfig {
    pub enabled: bool,
}

impl ReportConfig {
    /// Expand `{timestamp}` in the configured file name.
    pub fn file_name_at(&self, at: DateTime<Local>) -> PathBuf {
        PathBuf::from(
            self.default_file_name
                .replace("{timestamp}", &at.format("%Y%m%d_%H%M%S").to_string()),
        )
    }
}

/// Embedded defaults, then an optional `--config` file, then CLI flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// The file must exist; a typo in `--config` is reported, not ignored.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml).required(true));
        self
    }

    pub fn with_glued_token_max_len(mut self, max_len: u32) -> Result<Self, ConfigError> {
        self.builder = self
            .builder
            .set_override("grammar.glued_token_max_len", i64::from(max_len))?;
        Ok(self)
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
