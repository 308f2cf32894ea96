//! Manifest load/save in the call-sequence, JSON and TOML formats.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;
use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::config::write_atomic;
use super::deps_js::parse_deps_js;
use super::render::render_deps_js;
use crate::table::DependencyTable;

const MANIFEST_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/deptable/v1.schema.json"
));
const MANIFEST_VERSION: u32 = 1;

/// On-disk manifest encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManifestFormat {
    /// `goog.addDependency(...)` call sequence.
    Js,
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Ok(Self::Js),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(anyhow!(
                "unsupported manifest extension for {} (expected .js, .json or .toml)",
                path.display()
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    version: u32,
    records: DependencyTable,
}

#[derive(Debug, Serialize)]
struct ManifestDocumentRef<'a> {
    version: u32,
    records: &'a DependencyTable,
}

/// Read a manifest from disk, picking the format from its extension.
pub fn load_manifest(path: &Path) -> Result<DependencyTable> {
    let format = ManifestFormat::from_path(path)?;
    let contents =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let table = parse_manifest(&contents, format)
        .with_context(|| format!("parse manifest {}", path.display()))?;
    info!(path = %path.display(), %format, records = table.len(), "manifest loaded");
    Ok(table)
}

/// Atomically write `table` to disk in the format implied by `path`.
pub fn write_manifest(path: &Path, table: &DependencyTable) -> Result<()> {
    let format = ManifestFormat::from_path(path)?;
    let contents = render_manifest(table, format)?;
    write_atomic(path, &contents)?;
    info!(path = %path.display(), %format, records = table.len(), "manifest written");
    Ok(())
}

pub fn parse_manifest(contents: &str, format: ManifestFormat) -> Result<DependencyTable> {
    debug!(%format, bytes = contents.len(), "parsing manifest");
    let document = match format {
        ManifestFormat::Js => return parse_deps_js(contents),
        ManifestFormat::Json => {
            let value: Value = serde_json::from_str(contents).context("parse manifest json")?;
            validate_schema(&value)?;
            serde_json::from_value::<ManifestDocument>(value)
                .context("deserialize manifest json")?
        }
        ManifestFormat::Toml => {
            toml::from_str::<ManifestDocument>(contents).context("parse manifest toml")?
        }
    };
    if document.version != MANIFEST_VERSION {
        bail!(
            "unsupported manifest version {} (expected {})",
            document.version,
            MANIFEST_VERSION
        );
    }
    Ok(document.records)
}

pub fn render_manifest(table: &DependencyTable, format: ManifestFormat) -> Result<String> {
    let document = ManifestDocumentRef {
        version: MANIFEST_VERSION,
        records: table,
    };
    match format {
        ManifestFormat::Js => render_deps_js(table),
        ManifestFormat::Json => {
            let mut buf =
                serde_json::to_string_pretty(&document).context("serialize manifest json")?;
            buf.push('\n');
            Ok(buf)
        }
        ManifestFormat::Toml => {
            let mut buf = toml::to_string_pretty(&document).context("serialize manifest toml")?;
            if !buf.ends_with('\n') {
                buf.push('\n');
            }
            Ok(buf)
        }
    }
}

fn validate_schema(manifest: &Value) -> Result<()> {
    let schema_value: Value =
        serde_json::from_str(MANIFEST_SCHEMA).context("parse manifest schema")?;
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(manifest) {
        let messages = compiled
            .iter_errors(manifest)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "manifest schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{SAMPLE_DEPS_JS, sample_table};

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("out/deps.js")).expect("js"),
            ManifestFormat::Js
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("deps.toml")).expect("toml"),
            ManifestFormat::Toml
        );
        let err = ManifestFormat::from_path(Path::new("deps.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported manifest extension"));
    }

    #[test]
    fn json_manifest_loads_same_table() {
        let contents = r#"{
  "version": 1,
  "records": [
    { "path": "base.js", "provides": ["goog"], "requires": [] },
    { "path": "../cljs/core.js", "provides": ["cljs.core"],
      "requires": ["goog.string", "goog.array", "goog.object", "goog.string.StringBuffer"] },
    { "path": "../clojure/string.js", "provides": ["clojure.string"],
      "requires": ["cljs.core", "goog.string", "goog.string.StringBuffer"] },
    { "path": "../game_of_life/patterns.js", "provides": ["game_of_life.patterns"],
      "requires": ["cljs.core", "clojure.string"] },
    { "path": "../game_of_life/core.js", "provides": ["game_of_life.core"],
      "requires": ["cljs.core", "game_of_life.patterns", "clojure.string"] }
  ]
}"#;
        let table = parse_manifest(contents, ManifestFormat::Json).expect("parse");
        assert_eq!(table, sample_table());
    }

    #[test]
    fn json_manifest_is_schema_checked() {
        let contents = r#"{"version": 1, "records": [{"path": "a.js", "provides": []}]}"#;
        let err = parse_manifest(contents, ManifestFormat::Json).unwrap_err();
        assert!(err.to_string().contains("manifest schema validation failed"));
    }

    #[test]
    fn toml_manifest_loads_same_table() {
        let contents = r#"
version = 1

[[records]]
path = "a.js"
provides = ["a"]

[[records]]
path = "b.js"
provides = ["b"]
requires = ["a"]
"#;
        let table = parse_manifest(contents, ManifestFormat::Toml).expect("parse");
        assert_eq!(table.len(), 2);
        assert!(table.records()[0].requires.is_empty());
        assert!(table.records()[1].requires.contains("a"));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = parse_manifest("version = 2\nrecords = []\n", ManifestFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("unsupported manifest version 2"));
    }

    #[test]
    fn write_then_load_round_trips_each_format() {
        let temp = tempfile::tempdir().expect("tempdir");
        let table = parse_manifest(SAMPLE_DEPS_JS, ManifestFormat::Js).expect("parse");
        for name in ["deps.js", "deps.json", "nested/deps.toml"] {
            let path = temp.path().join(name);
            write_manifest(&path, &table).expect("write");
            let loaded = load_manifest(&path).expect("load");
            assert_eq!(loaded, table, "{name}");
        }
    }

    #[test]
    fn empty_table_round_trips_through_toml() {
        let rendered =
            render_manifest(&DependencyTable::new(), ManifestFormat::Toml).expect("render");
        let table = parse_manifest(&rendered, ManifestFormat::Toml).expect("parse");
        assert!(table.is_empty());
    }
}
