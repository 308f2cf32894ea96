//! Scaffolding for a fresh `deptable.toml`.

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing::info;

use super::config::{DeptableConfig, write_config};

/// Options for `init_config`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite an existing config file.
    pub force: bool,
}

/// Write the default config to `path`.
///
/// Refuses to touch an existing file unless `options.force` is set.
pub fn init_config(path: &Path, options: &InitOptions) -> Result<DeptableConfig> {
    if path.exists() && !options.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    let cfg = DeptableConfig::default();
    write_config(path, &cfg)?;
    info!(path = %path.display(), force = options.force, "config initialized");
    Ok(cfg)
}
