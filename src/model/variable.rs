//! Variables and their candidate parent sets.

use fixedbitset::FixedBitSet;
use std::collections::HashMap;
use std::fmt;

/// Index of a variable in an [`Instance`](super::Instance).
pub type VarId = usize;

/// One allowed parent-set choice for a variable, with its precomputed score.
///
/// The membership bitset and the explicit member list always describe the
/// same set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSet {
    score: i64,
    members: FixedBitSet,
    var: VarId,
    id: usize,
    parents: Vec<VarId>,
}

impl ParentSet {
    /// Creates a parent set for `var` over a universe of `n` variables.
    ///
    /// The id is provisional until the owning [`Variable`] sorts its
    /// candidates.
    ///
    /// # Panics
    /// Panics if a member id is `>= n`. Loaders check bounds before calling.
    pub fn new(var: VarId, score: i64, parents: Vec<VarId>, n: usize) -> Self {
        let mut members = FixedBitSet::with_capacity(n);
        for &p in &parents {
            members.insert(p);
        }
        Self {
            score,
            members,
            var,
            id: 0,
            parents,
        }
    }

    /// Score of choosing this set. Lower is better.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Position of this set in its owner's sorted candidate list.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The variable this set belongs to.
    pub fn var(&self) -> VarId {
        self.var
    }

    /// Member variable ids, in input order.
    pub fn parents(&self) -> &[VarId] {
        &self.parents
    }

    /// Membership bitset.
    pub fn members(&self) -> &FixedBitSet {
        &self.members
    }

    /// Returns `true` if this set contains `v`.
    pub fn contains(&self, v: VarId) -> bool {
        self.members.contains(v)
    }

    /// Returns `true` if every member is in `pred`.
    pub fn subset_of(&self, pred: &FixedBitSet) -> bool {
        self.members.is_subset(pred)
    }
}

impl fmt::Display for ParentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score {} {{", self.score)?;
        for p in &self.parents {
            write!(f, " {p}")?;
        }
        write!(f, " }}")
    }
}

/// A variable with its candidate parent sets sorted by ascending score.
#[derive(Debug, Clone)]
pub struct Variable {
    id: VarId,
    candidates: Vec<ParentSet>,
    // parent var -> ascending candidate ids containing it
    with_parent: HashMap<VarId, Vec<usize>>,
}

impl Variable {
    /// Builds a variable from unsorted candidates.
    ///
    /// Candidates are stably sorted by score, their ids are reset to their
    /// sorted position and the reverse index is built.
    pub fn new(id: VarId, mut candidates: Vec<ParentSet>) -> Self {
        candidates.sort_by_key(|p| p.score);
        let mut with_parent: HashMap<VarId, Vec<usize>> = HashMap::new();
        for (j, cand) in candidates.iter_mut().enumerate() {
            cand.id = j;
            cand.var = id;
            for &p in &cand.parents {
                with_parent.entry(p).or_default().push(j);
            }
        }
        Self {
            id,
            candidates,
            with_parent,
        }
    }

    /// The variable id.
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Number of candidate parent sets.
    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Candidate with sorted position `j`.
    ///
    /// # Panics
    /// Panics if `j` is out of range.
    pub fn candidate(&self, j: usize) -> &ParentSet {
        &self.candidates[j]
    }

    /// All candidates, best first.
    pub fn candidates(&self) -> &[ParentSet] {
        &self.candidates
    }

    /// Ids of the candidates that contain `parent`, ascending.
    pub fn candidates_with(&self, parent: VarId) -> &[usize] {
        self.with_parent
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Best candidate whose members all lie in `pred`.
    ///
    /// Candidates are sorted, so the first match is optimal. Falls back to
    /// the overall best candidate when nothing matches, which cannot happen
    /// for an instance that offers a feasible set for every prefix.
    pub fn best_parent(&self, pred: &FixedBitSet) -> &ParentSet {
        self.candidates
            .iter()
            .find(|p| p.subset_of(pred))
            .unwrap_or(&self.candidates[0])
    }

    /// Best candidate that contains `parent`, lies in `pred` and scores
    /// strictly below `bound`.
    ///
    /// Returns `None` when no such alternative exists.
    pub fn best_with_parent(
        &self,
        pred: &FixedBitSet,
        parent: VarId,
        bound: i64,
    ) -> Option<&ParentSet> {
        self.candidates_with(parent)
            .iter()
            .map(|&j| &self.candidates[j])
            .take_while(|p| p.score < bound)
            .find(|p| p.subset_of(pred))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parents of variable {}:", self.id)?;
        for (j, p) in self.candidates.iter().enumerate() {
            writeln!(f, "  id {j}: {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(n: usize, set: &[usize]) -> FixedBitSet {
        let mut b = FixedBitSet::with_capacity(n);
        for &i in set {
            b.insert(i);
        }
        b
    }

    fn sample() -> Variable {
        // Variable 3 over 4 variables, deliberately unsorted.
        Variable::new(
            3,
            vec![
                ParentSet::new(3, 50, vec![], 4),
                ParentSet::new(3, 10, vec![0, 1], 4),
                ParentSet::new(3, 20, vec![1], 4),
                ParentSet::new(3, 30, vec![0], 4),
            ],
        )
    }

    #[test]
    fn test_candidates_sorted_and_reindexed() {
        let v = sample();
        let scores: Vec<i64> = v.candidates().iter().map(|p| p.score()).collect();
        assert_eq!(scores, vec![10, 20, 30, 50]);
        for (j, p) in v.candidates().iter().enumerate() {
            assert_eq!(p.id(), j);
            assert_eq!(p.var(), 3);
        }
    }

    #[test]
    fn test_reverse_index() {
        let v = sample();
        assert_eq!(v.candidates_with(0), &[0, 2]);
        assert_eq!(v.candidates_with(1), &[0, 1]);
        assert!(v.candidates_with(2).is_empty());
    }

    #[test]
    fn test_subset_of() {
        let p = ParentSet::new(2, 1, vec![0, 1], 4);
        assert!(p.subset_of(&bits(4, &[0, 1, 3])));
        assert!(!p.subset_of(&bits(4, &[0])));
        assert!(ParentSet::new(2, 1, vec![], 4).subset_of(&bits(4, &[])));
    }

    #[test]
    fn test_best_parent_respects_pred() {
        let v = sample();
        assert_eq!(v.best_parent(&bits(4, &[0, 1])).score(), 10);
        assert_eq!(v.best_parent(&bits(4, &[1])).score(), 20);
        assert_eq!(v.best_parent(&bits(4, &[0])).score(), 30);
        assert_eq!(v.best_parent(&bits(4, &[])).score(), 50);
    }

    #[test]
    fn test_best_parent_fallback() {
        let v = Variable::new(1, vec![ParentSet::new(1, 4, vec![0], 2)]);
        // Nothing fits an empty prefix; the first candidate comes back.
        assert_eq!(v.best_parent(&bits(2, &[])).score(), 4);
    }

    #[test]
    fn test_best_with_parent() {
        let v = sample();
        let found = v.best_with_parent(&bits(4, &[0]), 0, 50);
        assert_eq!(found.map(|p| p.score()), Some(30));
        // Bound excludes the only admissible set.
        assert!(v.best_with_parent(&bits(4, &[0]), 0, 30).is_none());
        // No candidate contains variable 2.
        assert!(v.best_with_parent(&bits(4, &[0, 1, 2]), 2, 100).is_none());
    }
}
