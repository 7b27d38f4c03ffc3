//! # Entail Core
//!
//! Shared data model and service interfaces for the Entail rule-inference
//! engine.
//!
//! This crate defines:
//! - The term model: [`Variable`], [`Iri`], [`Literal`], [`TermValue`], [`Term`]
//! - The rule model: [`Atom`], [`AtomList`], [`Rule`]
//! - Partial solutions: [`Bindings`], [`SolutionSet`]
//! - The store interface: [`TripleStore`] (query/ask/update over SPARQL text)
//! - The built-in SPI: [`Builtin`], [`BuiltinRegistry`]
//!
//! No inference logic lives here; the planner, evaluators and engine are in
//! `entail-reasoner`, and SPARQL text generation is in `entail-sparql`.

pub mod atom;
pub mod bindings;
pub mod builtin;
pub mod error;
pub mod rule;
pub mod solutions;
pub mod store;
pub mod term;

pub use atom::{Atom, AtomList};
pub use bindings::Bindings;
pub use builtin::{Builtin, BuiltinRegistry};
pub use error::{BuiltinError, StoreError};
pub use rule::Rule;
pub use solutions::SolutionSet;
pub use store::{QueryRow, TripleStore};
pub use term::{Iri, Literal, Term, TermValue, Variable};
