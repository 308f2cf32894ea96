//! Deterministic, pure logic over an in-memory dependency table.
//!
//! Core modules must be free of I/O side effects. They are the consumer half
//! of the table contract: provider lookup, resolvability checks, and load
//! ordering.

pub mod checks;
pub mod external;
pub mod index;
pub mod order;
