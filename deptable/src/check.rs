//! `deptable check`: everything a loader would trip over, in one report.

use crate::core::checks::{Violation, check_table};
use crate::core::external::ExternalNamespaces;
use crate::core::order::{OrderError, load_order};
use crate::exit_codes;
use crate::table::DependencyTable;

/// Findings for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub records: usize,
    pub violations: Vec<Violation>,
    /// Module names around a dependency cycle, if one exists.
    pub cycle: Option<Vec<String>>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.cycle.is_none()
    }

    /// A cycle outranks unresolved names: nothing can be ordered past it.
    pub fn exit_code(&self) -> i32 {
        if self.cycle.is_some() {
            exit_codes::CYCLE
        } else if !self.violations.is_empty() {
            exit_codes::UNRESOLVED
        } else {
            exit_codes::OK
        }
    }

    /// Human-readable lines, violations first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        if let Some(cycle) = &self.cycle {
            lines.push(OrderError::Cycle(cycle.clone()).to_string());
        }
        lines
    }
}

pub fn check_manifest(table: &DependencyTable, external: &ExternalNamespaces) -> CheckReport {
    let violations = check_table(table, external);
    let cycle = match load_order(table) {
        Err(OrderError::Cycle(cycle)) => Some(cycle),
        Err(OrderError::UnknownModule(_)) | Ok(_) => None,
    };
    CheckReport {
        records: table.len(),
        violations,
        cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_table, table};

    #[test]
    fn sample_is_clean() {
        let report = check_manifest(&sample_table(), &ExternalNamespaces::new(["goog"]));
        assert!(report.is_clean());
        assert_eq!(report.records, 5);
        assert_eq!(report.exit_code(), exit_codes::OK);
    }

    #[test]
    fn unresolved_maps_to_unresolved_code() {
        let report = check_manifest(&sample_table(), &ExternalNamespaces::none());
        assert_eq!(report.exit_code(), exit_codes::UNRESOLVED);
        assert_eq!(report.lines().len(), 6);
    }

    #[test]
    fn cycle_outranks_unresolved() {
        let table = table(&[
            ("a.js", &["a"], &["b", "missing"]),
            ("b.js", &["b"], &["a"]),
        ]);
        let report = check_manifest(&table, &ExternalNamespaces::none());
        assert_eq!(report.exit_code(), exit_codes::CYCLE);
        assert_eq!(
            report.lines(),
            vec![
                "a.js: unresolved requirement 'missing'".to_string(),
                "dependency cycle: a -> b -> a".to_string(),
            ]
        );
    }

    #[test]
    fn empty_table_is_clean() {
        let report = check_manifest(&DependencyTable::new(), &ExternalNamespaces::none());
        assert!(report.is_clean());
        assert_eq!(report.records, 0);
    }
}
