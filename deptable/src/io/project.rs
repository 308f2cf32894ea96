//! Resolves the config file and manifest a command operates on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::config::{DeptableConfig, load_config};
use super::manifest::load_manifest;
use crate::table::DependencyTable;

/// A loaded config plus the table read from its manifest.
#[derive(Debug, Clone)]
pub struct Project {
    pub config: DeptableConfig,
    pub manifest_path: PathBuf,
    /// `config.base_dir`, resolved against the config file's directory.
    pub base_dir: PathBuf,
    pub table: DependencyTable,
}

impl Project {
    /// Load config from `config_path` (defaults when missing) and the
    /// manifest it names.
    ///
    /// Paths inside the config are relative to the config file's directory;
    /// `manifest_override` is used as given.
    pub fn load(config_path: &Path, manifest_override: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)
            .with_context(|| format!("load config {}", config_path.display()))?;
        let config_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
        let manifest_path = match manifest_override {
            Some(path) => path.to_path_buf(),
            None => config_dir.join(&config.manifest),
        };
        let base_dir = config_dir.join(&config.base_dir);
        debug!(
            config = %config_path.display(),
            manifest = %manifest_path.display(),
            "resolved project paths"
        );
        let table = load_manifest(&manifest_path)?;
        Ok(Self {
            config,
            manifest_path,
            base_dir,
            table,
        })
    }
}
