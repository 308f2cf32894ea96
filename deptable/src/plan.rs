//! `deptable order`: the sequence a loader should load records in.

use std::path::Path;

use crate::core::order::{OrderError, load_order, require_closure};
use crate::table::DependencyTable;

/// Options for `plan_load`.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions<'a> {
    /// Restrict the plan to what this module needs.
    pub module: Option<&'a str>,
    /// Join each record path onto this directory.
    pub base_dir: Option<&'a Path>,
}

/// Record paths in load order, one per record.
pub fn plan_load(
    table: &DependencyTable,
    options: &PlanOptions<'_>,
) -> Result<Vec<String>, OrderError> {
    let ordered = match options.module {
        Some(module) => require_closure(table, module)?,
        None => load_order(table)?,
    };
    Ok(ordered
        .into_iter()
        .map(|record| match options.base_dir {
            Some(base) => base.join(&record.path).display().to_string(),
            None => record.path.clone(),
        })
        .collect())
}
