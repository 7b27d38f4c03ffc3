//! # Entail Reasoner
//!
//! Forward-chaining rule inference over a SPARQL triple store.
//!
//! The engine evaluates conjunctive rule bodies (class membership, binary
//! relations, and extensible built-in atoms) against the store, derives new
//! facts, and persists them idempotently. Per rule, per round:
//!
//! 1. [`plan::reorder`] orders the body: class/role atoms first, built-ins
//!    topologically sorted by computation dependencies, serializable
//!    built-ins bubbled forward.
//! 2. [`pushdown::find_candidates`] pushes the longest serializable prefix
//!    into one store query, subtracting combinations that would contradict
//!    known axioms.
//! 3. [`evaluate::evaluate`] runs the remaining built-ins in memory,
//!    enriching bindings through computations and filtering by predicates.
//! 4. [`commit::commit_head`] instantiates the head per solution and
//!    performs an idempotent ASK-then-INSERT commit.
//!
//! [`InferenceEngine`] drives this loop to a fixpoint or a configured round
//! limit. Control flow is single-threaded and synchronous: one store call
//! at a time, no retries, and any planning or evaluation failure aborts the
//! round.
//!
//! ## Example
//!
//! ```ignore
//! use entail_reasoner::{EngineOptions, InferenceEngine};
//!
//! let mut engine = InferenceEngine::with_standard_builtins(store, rules, EngineOptions::default());
//! let diagnostics = engine.run()?;
//! assert_eq!(diagnostics.outcome, EngineOutcome::Converged);
//! ```

pub mod builtins;
pub mod commit;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod plan;
pub mod pushdown;

pub use builtins::standard_registry;
pub use commit::commit_head;
pub use engine::{EngineDiagnostics, EngineOptions, EngineOutcome, InferenceEngine};
pub use error::{ReasonerError, Result};
pub use evaluate::evaluate;
pub use plan::reorder;
pub use pushdown::find_candidates;
