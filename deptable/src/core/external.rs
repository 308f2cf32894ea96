//! Namespaces supplied outside the dependency table.

/// Set of namespace prefixes whose modules are provided elsewhere.
///
/// A module `n` matches entry `e` when `n == e` or `n` starts with `e.`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalNamespaces {
    namespaces: Vec<String>,
}

impl ExternalNamespaces {
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: namespaces.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, module: &str) -> bool {
        self.namespaces.iter().any(|ns| {
            module
                .strip_prefix(ns.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }
}
