//! I/O helpers for deptable commands.

pub mod config;
pub mod deps_js;
pub mod init;
pub mod manifest;
pub mod project;
pub mod render;
