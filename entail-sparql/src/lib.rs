//! # Entail SPARQL
//!
//! Translation of atoms and terms into the store's query syntax.
//!
//! This crate is the only place SPARQL text is produced. It provides:
//! - Term rendering ([`term_fragment`], [`value_fragment`])
//! - Serializability tests and the longest-serializable-prefix computation
//!   ([`is_serializable`], [`longest_serializable_prefix`])
//! - Graph-pattern construction for atom conjunctions ([`PatternBuilder`],
//!   [`ground_triple`])
//! - Whole-query builders ([`select`], [`ask`], [`insert_data`])
//!
//! Values are never raw string-interpolated beyond standard literal/IRI
//! quoting; typed literals in pattern position go through the dummy-variable
//! `FILTER` encoding so the store applies type-aware equality.

pub mod error;
pub mod query;
pub mod serialize;
pub mod term;

pub use error::{Result, SparqlError};
pub use query::{ask, insert_data, select};
pub use serialize::{
    ground_triple, is_serializable, longest_serializable_prefix, PatternBuilder,
};
pub use term::{term_fragment, value_fragment};
