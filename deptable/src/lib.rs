//! Dependency-declaration manifests and the load orders they imply.
//!
//! A manifest is an ordered list of declaration records, each naming a source
//! path, the logical modules it provides, and the modules it requires. The
//! crate is split the same way a loader is:
//!
//! - **[`table`]**: the write-once, read-many [`table::DependencyTable`].
//! - **[`core`]**: pure, deterministic consumer logic (provider index,
//!   resolvability checks, load ordering). No I/O.
//! - **[`io`]**: manifest formats (`deps.js`, JSON, TOML), config, rendering.
//!
//! Orchestration modules ([`check`], [`plan`]) combine the two for the CLI.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod plan;
pub mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
