//! Stable exit codes for deptable CLI commands.

/// Command succeeded; for `check`, the table is resolvable.
pub const OK: i32 = 0;
/// Command failed due to invalid config/manifest/records, an unknown module, or I/O errors.
pub const INVALID: i32 = 1;
/// `deptable check` found duplicate providers or unresolved requirements.
pub const UNRESOLVED: i32 = 2;
/// `deptable check` or `deptable order` hit a dependency cycle.
pub const CYCLE: i32 = 3;
