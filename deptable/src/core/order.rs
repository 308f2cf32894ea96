//! Deterministic load ordering over the dependency table.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use thiserror::Error;

use crate::core::index::ProviderIndex;
use crate::table::{DeclarationRecord, DependencyTable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Module names around the cycle, first name repeated at the end.
    #[error("dependency cycle: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
    #[error("module '{0}' is not provided by any record")]
    UnknownModule(String),
}

/// Record-level dependency edges: `deps[i]` maps each table index record `i`
/// must load after to the first required module it provides. Only names some
/// record provides contribute an edge, whether or not they are external.
struct RecordGraph {
    deps: Vec<BTreeMap<usize, String>>,
}

impl RecordGraph {
    fn build(table: &DependencyTable, index: &ProviderIndex) -> Self {
        let deps = table
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let mut edges = BTreeMap::new();
                for module in &record.requires {
                    match index.provider(module) {
                        Some(provider) if provider != position => {
                            edges.entry(provider).or_insert_with(|| module.clone());
                        }
                        _ => {}
                    }
                }
                edges
            })
            .collect();
        Self { deps }
    }

    /// Kahn's algorithm restricted to `members`; ready records leave in table
    /// order. On failure returns the indices around one cycle.
    fn order(&self, members: &BTreeSet<usize>) -> Result<Vec<usize>, Vec<usize>> {
        let mut pending: Vec<usize> = vec![0; self.deps.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.deps.len()];
        for &node in members {
            for &dep in self.deps[node].keys() {
                if members.contains(&dep) {
                    pending[node] += 1;
                    dependents[dep].push(node);
                }
            }
        }

        let mut ready: BTreeSet<usize> = members
            .iter()
            .copied()
            .filter(|&node| pending[node] == 0)
            .collect();
        let mut ordered = Vec::with_capacity(members.len());
        while let Some(node) = ready.pop_first() {
            ordered.push(node);
            for &dependent in &dependents[node] {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if ordered.len() == members.len() {
            return Ok(ordered);
        }
        let stuck: BTreeSet<usize> = members
            .iter()
            .copied()
            .filter(|&node| pending[node] > 0)
            .collect();
        Err(self.find_cycle(&stuck))
    }

    /// Every stuck record still waits on another stuck record, so walking the
    /// lowest-index stuck dependency must revisit a node.
    fn find_cycle(&self, stuck: &BTreeSet<usize>) -> Vec<usize> {
        let Some(&start) = stuck.first() else {
            return Vec::new();
        };
        let mut path = vec![start];
        let mut seen = HashSet::from([start]);
        let mut current = start;
        loop {
            let Some(&next) = self.deps[current].keys().find(|dep| stuck.contains(dep)) else {
                return path;
            };
            if !seen.insert(next) {
                let begin = path.iter().position(|&node| node == next).unwrap_or(0);
                let mut cycle = path.split_off(begin);
                cycle.push(next);
                return cycle;
            }
            path.push(next);
            current = next;
        }
    }

    /// `root` plus everything it transitively depends on.
    fn closure(&self, root: usize) -> BTreeSet<usize> {
        let mut members = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if members.insert(node) {
                stack.extend(self.deps[node].keys().copied());
            }
        }
        members
    }

    /// Names the required module behind each edge of `cycle`, starting with
    /// the module that closes it.
    fn cycle_error(&self, cycle: &[usize]) -> OrderError {
        let labels: Vec<String> = cycle
            .windows(2)
            .map(|pair| self.deps[pair[0]][&pair[1]].clone())
            .collect();
        let mut names = Vec::with_capacity(labels.len() + 1);
        names.extend(labels.last().cloned());
        names.extend(labels);
        OrderError::Cycle(names)
    }
}

/// Order every record so each loads after the providers of its requirements.
///
/// Among records that are ready at the same time, the one earlier in the
/// table goes first, so a table that is already in a valid order is returned
/// unchanged.
///
/// External namespaces play no part here: a requirement provided by a record
/// is an edge, anything else imposes no constraint.
pub fn load_order(table: &DependencyTable) -> Result<Vec<&DeclarationRecord>, OrderError> {
    let index = ProviderIndex::build(table);
    let graph = RecordGraph::build(table, &index);
    let members: BTreeSet<usize> = (0..table.len()).collect();
    let ordered = graph
        .order(&members)
        .map_err(|cycle| graph.cycle_error(&cycle))?;
    let records = table.records();
    Ok(ordered.into_iter().map(|node| &records[node]).collect())
}

/// Records needed to load `module`, in load order, ending with its own record.
///
/// Cycles outside the closure do not affect the result.
pub fn require_closure<'a>(
    table: &'a DependencyTable,
    module: &str,
) -> Result<Vec<&'a DeclarationRecord>, OrderError> {
    let index = ProviderIndex::build(table);
    let root = index
        .provider(module)
        .ok_or_else(|| OrderError::UnknownModule(module.to_string()))?;
    let graph = RecordGraph::build(table, &index);
    let ordered = graph
        .order(&graph.closure(root))
        .map_err(|cycle| graph.cycle_error(&cycle))?;
    let records = table.records();
    Ok(ordered.into_iter().map(|node| &records[node]).collect())
}
