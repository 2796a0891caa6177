//! Transitive closure of a parent assignment.
//!
//! The search loops answer ancestry questions with a fresh depth-first walk
//! per constraint. [`Ancestry`] instead materialises every variable's
//! ancestor set once, which is useful for diagnostics and for checking the
//! walk against an independent computation.

use super::Assignment;
use crate::model::{Instance, VarId};
use crate::ordering::Ordering;
use fixedbitset::FixedBitSet;

/// Ancestor sets of every variable under one parent assignment.
#[derive(Debug, Clone, Default)]
pub struct Ancestry {
    ancestors: Vec<FixedBitSet>,
}

impl Ancestry {
    /// Builds the closure. `assignment` must be consistent with `ordering`
    /// (every selected parent precedes its child).
    pub fn build(instance: &Instance, ordering: &Ordering, assignment: &Assignment) -> Self {
        let n = instance.n();
        let mut ancestors = vec![FixedBitSet::with_capacity(n); n];
        for v in ordering.iter() {
            let chosen = instance.var(v).candidate(assignment.parents[v]);
            let mut acc = FixedBitSet::with_capacity(n);
            for &p in chosen.parents() {
                acc.insert(p);
                acc.union_with(&ancestors[p]);
            }
            ancestors[v] = acc;
        }
        Self { ancestors }
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Drops all cached sets.
    pub fn clear(&mut self) {
        self.ancestors.clear();
    }

    /// Strict ancestors of `v`, ascending.
    pub fn ancestors(&self, v: VarId) -> Vec<VarId> {
        self.ancestors[v].ones().collect()
    }

    /// Strict descendants of `v`, ascending.
    pub fn descendants(&self, v: VarId) -> Vec<VarId> {
        (0..self.ancestors.len())
            .filter(|&d| self.ancestors[d].contains(v))
            .collect()
    }

    /// Returns `true` if `x` is an ancestor of `y`, or `x == y`.
    pub fn is_ancestor(&self, x: VarId, y: VarId) -> bool {
        x == y || self.ancestors[y].contains(x)
    }

    /// Number of constraints of `instance` satisfied by this closure.
    pub fn satisfied(&self, instance: &Instance) -> usize {
        instance
            .constraints()
            .iter()
            .filter(|c| self.is_ancestor(c.ancestor, c.descendant))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::LocalSearch;
    use crate::test_support::{chain, ladder};

    #[test]
    fn test_chain_closure() {
        let inst = chain(&[(0, 2), (2, 0)]);
        let ls = LocalSearch::new(&inst);
        let o = Ordering::identity(3);
        let mut a = Assignment::new(3);
        ls.unconstrained_score(&o, &mut a);

        let anc = Ancestry::build(&inst, &o, &a);
        assert_eq!(anc.len(), 3);
        assert_eq!(anc.ancestors(2), vec![0, 1]);
        assert_eq!(anc.ancestors(0), Vec::<usize>::new());
        assert_eq!(anc.descendants(0), vec![1, 2]);
        assert!(anc.is_ancestor(1, 1));
        assert!(!anc.is_ancestor(2, 0));
        assert_eq!(anc.satisfied(&inst), 1);
    }

    #[test]
    fn test_agrees_with_dipath() {
        let inst = ladder(&[]);
        let ls = LocalSearch::new(&inst);
        for order in [vec![0, 1, 2, 3, 4], vec![2, 1, 0, 4, 3], vec![4, 3, 2, 1, 0]] {
            let o = Ordering::from_vec(order).unwrap();
            let mut a = Assignment::new(5);
            ls.unconstrained_score(&o, &mut a);
            let anc = Ancestry::build(&inst, &o, &a);
            for x in 0..5 {
                for y in 0..5 {
                    assert_eq!(anc.is_ancestor(x, y), ls.has_dipath(&a, x, y), "{x} -> {y} in {o}");
                }
            }
        }
    }

    #[test]
    fn test_clear() {
        let inst = chain(&[]);
        let ls = LocalSearch::new(&inst);
        let o = Ordering::identity(3);
        let mut a = Assignment::new(3);
        ls.unconstrained_score(&o, &mut a);
        let mut anc = Ancestry::build(&inst, &o, &a);
        anc.clear();
        assert!(anc.is_empty());
    }
}
