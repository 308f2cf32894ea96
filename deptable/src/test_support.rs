//! Test-only helpers for constructing dependency tables.

use crate::table::{DeclarationRecord, DependencyTable};

/// The five-record `deps.js` emitted for the Game of Life build.
pub const SAMPLE_DEPS_JS: &str = include_str!("../tests/fixtures/game_of_life_deps.js");

/// Create a record without going through table validation.
pub fn record(path: &str, provides: &[&str], requires: &[&str]) -> DeclarationRecord {
    DeclarationRecord {
        path: path.to_string(),
        provides: provides.iter().map(|name| name.to_string()).collect(),
        requires: requires.iter().map(|name| name.to_string()).collect(),
    }
}

/// Build a table from `(path, provides, requires)` triples, in order.
pub fn table(entries: &[(&str, &[&str], &[&str])]) -> DependencyTable {
    let mut table = DependencyTable::new();
    for (path, provides, requires) in entries {
        table
            .add_dependency(*path, provides.iter().copied(), requires.iter().copied())
            .expect("valid test record");
    }
    table
}

/// The sample table, built in code rather than parsed.
pub fn sample_table() -> DependencyTable {
    table(&[
        ("base.js", &["goog"], &[]),
        (
            "../cljs/core.js",
            &["cljs.core"],
            &[
                "goog.string",
                "goog.array",
                "goog.object",
                "goog.string.StringBuffer",
            ],
        ),
        (
            "../clojure/string.js",
            &["clojure.string"],
            &["cljs.core", "goog.string", "goog.string.StringBuffer"],
        ),
        (
            "../game_of_life/patterns.js",
            &["game_of_life.patterns"],
            &["cljs.core", "clojure.string"],
        ),
        (
            "../game_of_life/core.js",
            &["game_of_life.core"],
            &["cljs.core", "game_of_life.patterns", "clojure.string"],
        ),
    ])
}
