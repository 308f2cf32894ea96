//! Renders a table back into the `deps.js` call-sequence format.

use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::table::{DeclarationRecord, DependencyTable};

const DEPS_JS_TEMPLATE: &str = include_str!("templates/deps.js.j2");

/// Record with every string already quoted as a JS literal.
#[derive(Debug, Clone, Serialize)]
struct RecordContext {
    path: String,
    provides: Vec<String>,
    requires: Vec<String>,
}

impl RecordContext {
    fn from_record(record: &DeclarationRecord) -> Self {
        Self {
            path: js_string(&record.path, '"'),
            provides: record
                .provides
                .iter()
                .map(|name| js_string(name, '\''))
                .collect(),
            requires: record
                .requires
                .iter()
                .map(|name| js_string(name, '\''))
                .collect(),
        }
    }
}

/// Template engine wrapper around minijinja.
struct DepsJsEngine {
    env: Environment<'static>,
}

impl DepsJsEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("deps", DEPS_JS_TEMPLATE)
            .expect("deps.js template should be valid");
        Self { env }
    }

    fn render(&self, table: &DependencyTable) -> Result<String> {
        let records: Vec<RecordContext> = table.iter().map(RecordContext::from_record).collect();
        let template = self.env.get_template("deps")?;
        let rendered = template.render(context! { records => records })?;
        Ok(rendered)
    }
}

/// One `goog.addDependency(...)` line per record, in table order.
pub fn render_deps_js(table: &DependencyTable) -> Result<String> {
    DepsJsEngine::new().render(table)
}

fn js_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(ch))),
            ch if ch == quote || ch == '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ch => out.push(ch),
        }
    }
    out.push(quote);
    out
}
