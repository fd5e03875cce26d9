use std::path::PathBuf;
use std::sync::{Mutex, Once};

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt, TestWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// `[logging]` in `nova.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A bare level (`debug`, `WARNING`, ...) or `EnvFilter` directives such as
    /// `nova.properties=trace`.
    pub level: String,
    /// One JSON object per event instead of text lines.
    pub json: bool,
    pub stderr: bool,
    /// Also append events here. Ignored when the file can't be opened.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_owned(),
            json: false,
            stderr: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// `level` as filter directives: bare levels lowercased, `warning` read as `warn`, blank as
    /// `info`.
    pub(crate) fn directives(&self) -> String {
        let level = self.level.trim();
        if level.is_empty() {
            return DEFAULT_LEVEL.to_owned();
        }
        if level.eq_ignore_ascii_case("warning") {
            return "warn".to_owned();
        }
        match level.parse::<LevelFilter>() {
            Ok(filter) => filter.to_string().to_ascii_lowercase(),
            Err(_) => level.to_owned(),
        }
    }

    /// The filter for Nova's subscriber.
    ///
    /// `RUST_LOG` is appended to the configured directives. If the combination doesn't parse,
    /// `RUST_LOG` alone is tried, then the configured level, then `info`.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = self.directives();
        let from_env = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let mut candidates = Vec::with_capacity(3);
        if let Some(env) = from_env {
            candidates.push(format!("{configured},{env}"));
            candidates.push(env);
        }
        candidates.push(configured);

        candidates
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber described by `config`.
///
/// Only the first call in a process has an effect.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let mut writer = BoxMakeWriter::new(std::io::sink);
        if config.stderr {
            // Test binaries only capture output written through `TestWriter`.
            writer = if cfg!(debug_assertions) {
                BoxMakeWriter::new(writer.and(TestWriter::with_stderr))
            } else {
                BoxMakeWriter::new(writer.and(std::io::stderr))
            };
        }
        let file = config.file.as_ref().and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        if let Some(file) = file {
            writer = BoxMakeWriter::new(writer.and(Mutex::new(file)));
        }

        let registry = tracing_subscriber::registry().with(config.env_filter());
        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        // Fails only when another subscriber (a test harness, say) is already installed.
        let _ = if config.json {
            registry.with(fmt.json()).try_init()
        } else {
            registry.with(fmt).try_init()
        };
    });
}
