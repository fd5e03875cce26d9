//! `nova.toml`: schema, discovery, diagnostics and the `tracing` setup it drives.

use std::path::{Path, PathBuf};

use nova_properties::{LineSeparator, WriteOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod diagnostics;
mod discovery;
mod logging;
mod validation;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use discovery::{
    discover_config_path, load_for_workspace, load_for_workspace_with_diagnostics,
    with_config_env_lock, NOVA_CONFIG_ENV_VAR,
};
pub use logging::{init_tracing, LoggingConfig};

/// Every table is optional; an empty file is the default config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovaConfig {
    pub logging: LoggingConfig,
    /// How externalized strings are written.
    pub properties: PropertiesConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparatorConfig {
    #[default]
    Lf,
    Crlf,
    Cr,
}

impl From<LineSeparatorConfig> for LineSeparator {
    fn from(value: LineSeparatorConfig) -> Self {
        match value {
            LineSeparatorConfig::Lf => LineSeparator::Lf,
            LineSeparatorConfig::Crlf => LineSeparator::CrLf,
            LineSeparatorConfig::Cr => LineSeparator::Cr,
        }
    }
}

/// `[properties]` in `nova.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesConfig {
    /// Text written between key and value: `=` or `:`, optionally padded with spaces, or only
    /// spaces.
    pub separator: String,
    /// Line terminator written after each entry.
    pub line_separator: LineSeparatorConfig,
}

impl PropertiesConfig {
    fn default_separator() -> String {
        "=".to_owned()
    }

    /// Whether `separator` reads back as a key/value separator.
    pub fn is_valid_separator(separator: &str) -> bool {
        let trimmed = separator.trim_matches(' ');
        !separator.is_empty() && matches!(trimmed, "" | "=" | ":")
    }

    /// Writer options for `nova_properties`. An unusable separator falls back to `=`.
    pub fn write_options(&self) -> WriteOptions {
        let separator = if Self::is_valid_separator(&self.separator) {
            self.separator.clone()
        } else {
            Self::default_separator()
        };
        WriteOptions {
            separator,
            line_separator: self.line_separator.into(),
        }
    }
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            separator: Self::default_separator(),
            line_separator: LineSeparatorConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Only the parser's message; `toml`'s `Display` would also quote the offending source.
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_owned())
    }
}

impl NovaConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(toml::from_str(&read(path.as_ref())?)?)
    }

    /// Load `path`, reporting unknown keys and values that fall back to defaults.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        Self::load_from_str_with_diagnostics(&read(path.as_ref())?)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) = diagnostics::parse_toml(text)?;
        let warnings = config.validate();
        Ok((
            config,
            ConfigDiagnostics {
                unknown_keys,
                warnings,
            },
        ))
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })
}
