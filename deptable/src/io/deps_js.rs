//! Reader for the `addDependency(...)` call-sequence format (`deps.js`).

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use regex::Regex;

use crate::table::DependencyTable;

const STRING: &str = r#"'(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*""#;

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let array = format!(r"\[\s*(?:(?:{STRING})\s*(?:,\s*(?:{STRING})\s*)*,?\s*)?\]");
    let pattern = format!(
        r"^\s*(?:goog\.)?addDependency\(\s*(?P<path>{STRING})\s*,\s*(?P<provides>{array})\s*,\s*(?P<requires>{array})\s*(?:,\s*(?:\{{[^}}]*\}}|true|false)\s*)?\)\s*;?\s*(?://.*)?$"
    );
    Regex::new(&pattern).expect("addDependency pattern should compile")
});

static STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STRING).expect("string literal pattern should compile"));

/// Parse a `deps.js` call sequence into a table, top to bottom.
///
/// Blank lines and `//` comment lines are skipped; any other line must be a
/// single `addDependency` call. Errors carry the 1-based line number.
pub fn parse_deps_js(contents: &str) -> Result<DependencyTable> {
    let mut table = DependencyTable::new();
    for (number, line) in contents.lines().enumerate() {
        let number = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        let captures = CALL_RE
            .captures(line)
            .ok_or_else(|| anyhow!("line {number}: expected addDependency call"))?;
        let path = unquote(&captures["path"]);
        let provides = string_literals(&captures["provides"]);
        let requires = string_literals(&captures["requires"]);
        table
            .add_dependency(path, provides, requires)
            .with_context(|| format!("line {number}"))?;
    }
    Ok(table)
}

fn string_literals(array: &str) -> Vec<String> {
    STRING_RE
        .find_iter(array)
        .map(|literal| unquote(literal.as_str()))
        .collect()
}

/// Strip the surrounding quotes and resolve backslash escapes.
///
/// `\n`, `\r`, `\t` and four-digit `\uXXXX` escapes decode to their
/// characters; any other escaped character stands for itself.
fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let digits: String = chars.clone().take(4).collect();
                let decoded = (digits.len() == 4
                    && digits.chars().all(|digit| digit.is_ascii_hexdigit()))
                .then(|| u32::from_str_radix(&digits, 16).ok())
                .flatten()
                .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push('u'),
                }
            }
            Some(escaped) => out.push(escaped),
            None => {}
        }
    }
    out
}
