//! Whole-query builders
//!
//! Only three query shapes ever leave this subsystem: one SELECT per
//! candidate retrieval, one ASK and at most one INSERT DATA per head commit.

use entail_core::Variable;

fn indent(text: &str, pad: &str) -> String {
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a SELECT query projecting `vars` over `pattern`, subtracting each
/// `minus` group.
///
/// `pattern` may be empty; SPARQL semantics give an empty group pattern
/// exactly one (empty) solution, which is what keeps the evaluation pipeline
/// uniform for plans with no serializable prefix.
pub fn select(vars: &[Variable], pattern: &str, minus_groups: &[String]) -> String {
    let mut query = String::from("SELECT");
    for v in vars {
        query.push_str(&format!(" ?{}", v.name()));
    }
    query.push_str("\nWHERE {\n");
    if !pattern.is_empty() {
        query.push_str(&indent(pattern, "  "));
        query.push('\n');
    }
    for group in minus_groups {
        query.push_str("  MINUS {\n");
        query.push_str(&indent(group, "    "));
        query.push_str("\n  }\n");
    }
    query.push('}');
    query
}

/// Build an ASK query over a ground pattern.
pub fn ask(pattern: &str) -> String {
    format!("ASK {{\n{}\n}}", indent(pattern, "  "))
}

/// Build an INSERT DATA update over a ground pattern.
pub fn insert_data(pattern: &str) -> String {
    format!("INSERT DATA {{\n{}\n}}", indent(pattern, "  "))
}
