use anyhow::Context;
use kavach_core::config::EngineConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "kavach.yaml";

/// Resolve which config file to read.
///
/// Priority:
/// 1. `--config` flag / `KAVACH_CONFIG` env var (passed in as `explicit`)
/// 2. `kavach.yaml` in `cwd`, if it exists
/// 3. None: built-in defaults
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let candidate = cwd.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Load the effective engine config. An explicit path that does not exist is
/// an error; a missing implicit file falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match resolve_config(explicit, &cwd) {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}
