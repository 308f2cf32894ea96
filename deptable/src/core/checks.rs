//! Consumer-side checks a loader needs before it can order the table.
//!
//! The table itself accepts any records; these checks report what would keep
//! a loader from resolving it.

use std::fmt;

use crate::core::external::ExternalNamespaces;
use crate::core::index::ProviderIndex;
use crate::table::DependencyTable;

/// A problem that makes the table unresolvable for a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// `module` is provided by both `first` and `second` (record paths).
    DuplicateProvide {
        module: String,
        first: String,
        second: String,
    },
    /// `module` is required by `required_by` but nothing provides it.
    Unresolved { module: String, required_by: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProvide {
                module,
                first,
                second,
            } => write!(f, "module '{module}' provided by both {first} and {second}"),
            Self::Unresolved {
                module,
                required_by,
            } => write!(f, "{required_by}: unresolved requirement '{module}'"),
        }
    }
}

/// Run every table check, returning violations in record order.
pub fn check_table(table: &DependencyTable, external: &ExternalNamespaces) -> Vec<Violation> {
    let index = ProviderIndex::build(table);
    let records = table.records();
    let mut violations: Vec<Violation> = index
        .duplicates()
        .iter()
        .map(|dup| Violation::DuplicateProvide {
            module: dup.module.clone(),
            first: records[dup.first].path.clone(),
            second: records[dup.second].path.clone(),
        })
        .collect();

    for record in records {
        for module in &record.requires {
            if index.provider(module).is_none() && !external.contains(module) {
                violations.push(Violation::Unresolved {
                    module: module.clone(),
                    required_by: record.path.clone(),
                });
            }
        }
    }
    violations
}
