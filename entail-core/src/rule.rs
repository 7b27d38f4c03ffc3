//! Rules: a head and a body, both atom conjunctions

use crate::atom::AtomList;
use crate::term::Variable;

/// A rule: `body → head`.
///
/// A rule with an empty body is an axiom: its head atoms are assumed
/// universally true wherever their variables appear. The engine indexes
/// axioms by variable and feeds them into contradiction checking and head
/// commits instead of running them as rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    head: AtomList,
    body: AtomList,
}

impl Rule {
    pub fn new(head: AtomList, body: AtomList) -> Self {
        Rule { head, body }
    }

    pub fn head(&self) -> &AtomList {
        &self.head
    }

    pub fn body(&self) -> &AtomList {
        &self.body
    }

    /// Replace the body with a semantically equivalent reordering.
    ///
    /// Only the engine's plan cache calls this, to persist the planner's
    /// output across fixpoint rounds.
    pub fn set_body(&mut self, body: AtomList) {
        self.body = body;
    }

    /// True when the body is empty.
    pub fn is_axiom(&self) -> bool {
        self.body.is_empty()
    }

    /// Variables of head and body, in first-occurrence order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = self.body.variables();
        for v in self.head.variables() {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }
}
