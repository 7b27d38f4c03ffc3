//! # Entail Memory
//!
//! An in-memory [`TripleStore`](entail_core::TripleStore) implementation.
//!
//! The store parses and evaluates exactly the SPARQL subset `entail-sparql`
//! emits: full IRIs, variables, quoted strings (optionally language-tagged),
//! bare numerals, conjunctive group patterns with `MINUS` groups and
//! comparison `FILTER`s, `SELECT`, `ASK` and `INSERT DATA`. It exists so the
//! reasoner can be exercised end-to-end without an external SPARQL endpoint,
//! and doubles as a lightweight embedded store.
//!
//! One intentional simplification: `MINUS` groups are evaluated like
//! `FILTER NOT EXISTS`, seeded with the candidate solution. For the emitted
//! subset (groups always share variables with the outer pattern) the two
//! semantics coincide.

pub mod error;
pub mod lex;
pub mod parse;
pub mod store;

pub use error::{MemoryError, Result};
pub use store::MemoryStore;
