//! The dependency table: an ordered, append-only list of declaration records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `addDependency` declaration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeclarationRecord {
    /// Relative file path providing the modules.
    pub path: String,
    /// Logical module names defined at `path`, in declared order.
    pub provides: Vec<String>,
    /// Module names that must be available before `path` loads.
    #[serde(default)]
    pub requires: BTreeSet<String>,
}

/// Rejected `add_dependency` input. Nothing is appended when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record path must be non-empty")]
    EmptyPath,
    #[error("record {path} must provide at least one module")]
    NoModuleNames { path: String },
    #[error("record {path} provides an empty module name")]
    EmptyModuleName { path: String },
}

/// Write-once, read-many registry of declaration records.
///
/// Records keep insertion order and are never de-duplicated: adding the same
/// path twice yields two entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyTable {
    records: Vec<DeclarationRecord>,
}

impl DependencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by feeding each record through [`Self::add_dependency`].
    pub fn from_records(
        records: impl IntoIterator<Item = DeclarationRecord>,
    ) -> Result<Self, RecordError> {
        let mut table = Self::new();
        for record in records {
            table.add_dependency(record.path, record.provides, record.requires)?;
        }
        Ok(table)
    }

    /// Append one record.
    ///
    /// Only non-emptiness of `path` and `module_names` is checked; dependency
    /// names are taken as given and collapse into a set.
    pub fn add_dependency<P, M, D>(
        &mut self,
        path: P,
        module_names: M,
        dependencies: D,
    ) -> Result<&DeclarationRecord, RecordError>
    where
        P: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let path = path.into();
        if path.is_empty() {
            return Err(RecordError::EmptyPath);
        }
        let provides: Vec<String> = module_names.into_iter().map(Into::into).collect();
        if provides.is_empty() {
            return Err(RecordError::NoModuleNames { path });
        }
        if provides.iter().any(String::is_empty) {
            return Err(RecordError::EmptyModuleName { path });
        }
        let requires = dependencies.into_iter().map(Into::into).collect();

        self.records.push(DeclarationRecord {
            path,
            provides,
            requires,
        });
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[DeclarationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeclarationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencyTable {
    type Item = &'a DeclarationRecord;
    type IntoIter = std::slice::Iter<'a, DeclarationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for DependencyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<DeclarationRecord>::deserialize(deserializer)?;
        Self::from_records(records).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(record: &DeclarationRecord) -> Vec<&str> {
        record.requires.iter().map(String::as_str).collect()
    }

    #[test]
    fn empty_table_has_no_records() {
        let table = DependencyTable::new();
        assert!(table.records().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn records_keep_insertion_order() {
        let mut table = DependencyTable::new();
        table
            .add_dependency("base.js", ["goog"], Vec::<String>::new())
            .expect("base");
        table
            .add_dependency(
                "../cljs/core.js",
                ["cljs.core"],
                [
                    "goog.string",
                    "goog.array",
                    "goog.object",
                    "goog.string.StringBuffer",
                ],
            )
            .expect("core");

        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "base.js");
        assert_eq!(records[0].provides, vec!["goog"]);
        assert!(records[0].requires.is_empty());
        assert_eq!(records[1].path, "../cljs/core.js");
        let expected: BTreeSet<String> = [
            "goog.object",
            "goog.string.StringBuffer",
            "goog.array",
            "goog.string",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(records[1].requires, expected);
    }

    #[test]
    fn records_is_idempotent() {
        let mut table = DependencyTable::new();
        table.add_dependency("a.js", ["a"], ["b"]).expect("a");
        let first = table.records().to_vec();
        let second = table.records().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn same_path_added_twice_yields_two_entries() {
        let mut table = DependencyTable::new();
        table.add_dependency("a.js", ["a"], ["b"]).expect("first");
        table.add_dependency("a.js", ["a"], ["c"]).expect("second");

        assert_eq!(table.len(), 2);
        assert_eq!(names(&table.records()[0]), vec!["b"]);
        assert_eq!(names(&table.records()[1]), vec!["c"]);
    }

    #[test]
    fn duplicate_requirements_collapse() {
        let mut table = DependencyTable::new();
        let record = table
            .add_dependency("a.js", ["a"], ["b", "c", "b"])
            .expect("add");
        assert_eq!(names(record), vec!["b", "c"]);
    }

    #[test]
    fn rejects_empty_path_and_module_names() {
        let mut table = DependencyTable::new();
        let none: [&str; 0] = [];

        assert_eq!(
            table.add_dependency("", ["a"], none),
            Err(RecordError::EmptyPath)
        );
        assert_eq!(
            table.add_dependency("a.js", none, none),
            Err(RecordError::NoModuleNames {
                path: "a.js".to_string()
            })
        );
        assert_eq!(
            table.add_dependency("a.js", [""], none),
            Err(RecordError::EmptyModuleName {
                path: "a.js".to_string()
            })
        );
        assert!(table.is_empty());
    }

    #[test]
    fn deserialize_routes_through_add_dependency() {
        let raw = r#"[{"path": "", "provides": ["a"], "requires": []}]"#;
        let err = serde_json::from_str::<DependencyTable>(raw).unwrap_err();
        assert!(err.to_string().contains("non-empty"));

        let raw = r#"[{"path": "a.js", "provides": ["a"]}]"#;
        let table: DependencyTable = serde_json::from_str(raw).expect("parse");
        assert_eq!(table.records()[0].path, "a.js");
    }
}
