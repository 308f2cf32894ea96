//! Tool configuration stored in `deptable.toml`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::external::ExternalNamespaces;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "deptable.toml";

/// deptable configuration (TOML).
///
/// Edited by humans; missing fields fall back to a Closure-style layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeptableConfig {
    /// Manifest read when `--manifest` is not given.
    pub manifest: PathBuf,

    /// Directory record paths are relative to (Closure resolves them against
    /// the directory holding `base.js`).
    pub base_dir: PathBuf,

    /// Namespaces provided outside the table, e.g. the Closure Library.
    pub external: Vec<String>,
}

impl Default for DeptableConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("deps.js"),
            base_dir: PathBuf::from("."),
            external: vec!["goog".to_string()],
        }
    }
}

impl DeptableConfig {
    pub fn validate(&self) -> Result<()> {
        if self.manifest.as_os_str().is_empty() {
            return Err(anyhow!("manifest must be a non-empty path"));
        }
        for namespace in &self.external {
            if namespace.trim().is_empty() {
                return Err(anyhow!("external entries must be non-empty"));
            }
            if namespace.starts_with('.') || namespace.ends_with('.') {
                return Err(anyhow!(
                    "external entry '{namespace}' must not start or end with '.'"
                ));
            }
        }
        Ok(())
    }

    pub fn external_namespaces(&self) -> ExternalNamespaces {
        ExternalNamespaces::new(self.external.iter().cloned())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DeptableConfig::default()`.
pub fn load_config(path: &Path) -> Result<DeptableConfig> {
    if !path.exists() {
        let cfg = DeptableConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DeptableConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DeptableConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
