use crate::{ConfigWarning, NovaConfig, PropertiesConfig};

impl NovaConfig {
    /// Semantic checks that deserialization can't express.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let normalized = self.logging.directives();
        if tracing_subscriber::EnvFilter::try_new(&normalized).is_err() {
            warnings.push(ConfigWarning::LoggingLevelInvalid {
                value: self.logging.level.clone(),
                normalized,
            });
        }

        if !PropertiesConfig::is_valid_separator(&self.properties.separator) {
            warnings.push(ConfigWarning::InvalidValue {
                toml_path: "properties.separator".to_owned(),
                message: format!(
                    "{:?} is not a key/value separator; `=` will be used",
                    self.properties.separator
                ),
            });
        }

        warnings
    }
}
