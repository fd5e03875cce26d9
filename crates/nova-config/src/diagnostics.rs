use std::collections::BTreeSet;

use crate::NovaConfig;

/// Problems found in a `nova.toml` that don't stop it from loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Dotted paths of keys the schema doesn't know, e.g. `properties.line_seperator`.
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

/// A value that loads but is replaced by a default when used.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    InvalidValue {
        toml_path: String,
        message: String,
    },
    LoggingLevelInvalid {
        value: String,
        normalized: String,
    },
}

/// Deserializes a [`NovaConfig`], collecting the (sorted, deduplicated) keys serde skipped.
pub(crate) fn parse_toml(text: &str) -> Result<(NovaConfig, Vec<String>), toml::de::Error> {
    let mut unknown = BTreeSet::new();
    let config = serde_ignored::deserialize(toml::de::Deserializer::new(text), |path| {
        // Rendered as `.logging.colour`; an unknown table is reported by its own key.
        unknown.insert(path.to_string().trim_start_matches('.').to_owned());
    })?;
    Ok((config, unknown.into_iter().collect()))
}
