use std::path::{Path, PathBuf};

use parking_lot::ReentrantMutex;

use crate::{ConfigDiagnostics, ConfigError, NovaConfig};

/// Overrides discovery; relative paths resolve against the workspace root.
pub const NOVA_CONFIG_ENV_VAR: &str = "NOVA_CONFIG_PATH";

/// Looked up in order when [`NOVA_CONFIG_ENV_VAR`] is unset.
const CONFIG_FILE_NAMES: [&str; 3] = ["nova.toml", ".nova.toml", ".nova/config.toml"];

static ENV_LOCK: ReentrantMutex<()> = parking_lot::const_reentrant_mutex(());

/// Run `f` while no config discovery can read the environment.
///
/// Tests that set [`NOVA_CONFIG_ENV_VAR`] do so inside this, together with the discovery they
/// check. The lock is reentrant, so `f` may call [`discover_config_path`].
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = ENV_LOCK.lock();
    f()
}

/// Find the config file for `workspace_root`, canonicalized when it exists.
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    let _guard = ENV_LOCK.lock();
    let path = match std::env::var_os(NOVA_CONFIG_ENV_VAR) {
        // `join` keeps an absolute override as-is.
        Some(value) => workspace_root.join(value),
        None => CONFIG_FILE_NAMES
            .iter()
            .map(|name| workspace_root.join(name))
            .find(|path| path.is_file())?,
    };
    let path = path.canonicalize().unwrap_or(path);
    tracing::debug!(target = "nova.config", path = %path.display(), "using config file");
    Some(path)
}

/// Load the workspace's config, or the defaults when there is none.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(NovaConfig, Option<PathBuf>), ConfigError> {
    match discover_config_path(workspace_root) {
        Some(path) => Ok((NovaConfig::load_from_path(&path)?, Some(path))),
        None => Ok((NovaConfig::default(), None)),
    }
}

/// Like [`load_for_workspace`], plus diagnostics (empty when there is no config file).
pub fn load_for_workspace_with_diagnostics(
    workspace_root: &Path,
) -> Result<(NovaConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        tracing::debug!(target = "nova.config", "no config file; using defaults");
        return Ok((NovaConfig::default(), None, ConfigDiagnostics::default()));
    };
    let (config, diagnostics) = NovaConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}
