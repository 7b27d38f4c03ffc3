//! Solution sets: deduplicated collections of bindings

use hashbrown::HashSet;

use crate::bindings::Bindings;

/// A set of [`Bindings`], i.e. a disjunction of candidate solutions.
///
/// Two bindings are equal iff their variable→value maps are equal;
/// duplicates collapse on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionSet(HashSet<Bindings>);

impl SolutionSet {
    pub fn new() -> Self {
        SolutionSet(HashSet::new())
    }

    /// The set holding only the empty binding — the unit of conjunction.
    pub fn unit() -> Self {
        let mut set = HashSet::new();
        set.insert(Bindings::new());
        SolutionSet(set)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a solution; returns false when it was already present.
    pub fn insert(&mut self, bindings: Bindings) -> bool {
        self.0.insert(bindings)
    }

    pub fn contains(&self, bindings: &Bindings) -> bool {
        self.0.contains(bindings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bindings> {
        self.0.iter()
    }

    /// Set union.
    pub fn union(&self, other: &SolutionSet) -> SolutionSet {
        SolutionSet(self.0.union(&other.0).cloned().collect())
    }

    /// Set difference by exact equality.
    pub fn difference(&self, other: &SolutionSet) -> SolutionSet {
        SolutionSet(self.0.difference(&other.0).cloned().collect())
    }

    /// Difference by containment: drops every solution of `self` that
    /// extends some solution of `other`.
    ///
    /// This is the subtraction the body evaluator needs: a contradiction is
    /// stated over a subset of the rule's variables, and it rules out every
    /// candidate that agrees with it on that subset.
    pub fn containment_difference(&self, other: &SolutionSet) -> SolutionSet {
        SolutionSet(
            self.0
                .iter()
                .filter(|b| !other.0.iter().any(|o| b.extends(o)))
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<Bindings> for SolutionSet {
    fn from_iter<I: IntoIterator<Item = Bindings>>(iter: I) -> Self {
        SolutionSet(iter.into_iter().collect())
    }
}

impl IntoIterator for SolutionSet {
    type Item = Bindings;
    type IntoIter = hashbrown::hash_set::IntoIter<Bindings>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
