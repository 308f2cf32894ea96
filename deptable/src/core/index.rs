//! Module name → providing record lookup.

use std::collections::HashMap;

use crate::table::DependencyTable;

/// A module name declared by more than one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateProvider {
    pub module: String,
    pub first: usize,
    pub second: usize,
}

/// Maps each provided module name to the first record (by table index) that
/// provides it. Later providers are kept aside as duplicates.
#[derive(Debug, Clone, Default)]
pub struct ProviderIndex {
    providers: HashMap<String, usize>,
    duplicates: Vec<DuplicateProvider>,
}

impl ProviderIndex {
    pub fn build(table: &DependencyTable) -> Self {
        let mut index = Self::default();
        for (position, record) in table.iter().enumerate() {
            for module in &record.provides {
                match index.providers.get(module) {
                    Some(&first) if first != position => {
                        index.duplicates.push(DuplicateProvider {
                            module: module.clone(),
                            first,
                            second: position,
                        });
                    }
                    Some(_) => {}
                    None => {
                        index.providers.insert(module.clone(), position);
                    }
                }
            }
        }
        index
    }

    /// Table index of the record providing `module`.
    pub fn provider(&self, module: &str) -> Option<usize> {
        self.providers.get(module).copied()
    }

    /// Duplicates in the order they were encountered.
    pub fn duplicates(&self) -> &[DuplicateProvider] {
        &self.duplicates
    }
}
