//! Term-to-query-fragment rendering
//!
//! Rendering priority, highest first: variable, resource, language-tagged
//! string, plain/xsd:string, numeric literal (unquoted), any other typed
//! literal (quoted). Pattern-position handling of typed literals (the
//! dummy-variable FILTER encoding) lives in [`crate::serialize`]; this
//! module renders single terms only.

use entail_core::{Literal, Term, TermValue};

/// Escape a lexical form for inclusion in a double-quoted SPARQL literal.
fn escape(lexical: &str) -> String {
    let mut out = String::with_capacity(lexical.len());
    for c in lexical.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn literal_fragment(lit: &Literal) -> String {
    if let Some(lang) = lit.lang() {
        format!("\"{}\"@{}", escape(lit.lexical()), lang)
    } else if lit.is_numeric() {
        lit.lexical().to_string()
    } else {
        format!("\"{}\"", escape(lit.lexical()))
    }
}

/// Render a ground value as a query fragment.
pub fn value_fragment(value: &TermValue) -> String {
    match value {
        TermValue::Resource(iri) => format!("<{iri}>"),
        TermValue::Literal(lit) => literal_fragment(lit),
    }
}

/// Render a term as a query fragment.
pub fn term_fragment(term: &Term) -> String {
    match term {
        Term::Variable(v) => format!("?{}", v.name()),
        Term::Value(value) => value_fragment(value),
    }
}
