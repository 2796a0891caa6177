//! Variable orderings.
//!
//! An [`Ordering`] is a permutation of `0..n`. Parents of a variable must
//! come from variables placed before it, so every ordering induces an
//! acyclic structure.
//!
//! # Construction
//!
//! - [`Ordering::random`]: uniform shuffle
//! - [`Ordering::greedy`]: restricted-candidate-list construction that
//!   places variables with low best-parent regret first and respects the
//!   position order of ancestral constraints where it can
//!
//! # Submodules
//!
//! - [`operators`]: OX / PMX crossover and swap mutation

pub mod operators;

use crate::model::{Instance, VarId};
use fixedbitset::FixedBitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A permutation of variable ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ordering {
    order: Vec<VarId>,
}

impl Ordering {
    /// The identity ordering `0, 1, …, n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Wraps `order` if it is a permutation of `0..order.len()`.
    pub fn from_vec(order: Vec<VarId>) -> Option<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &v in &order {
            if v >= n || seen[v] {
                return None;
            }
            seen[v] = true;
        }
        Some(Self { order })
    }

    /// A uniformly random ordering.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<VarId> = (0..n).collect();
        order.shuffle(rng);
        Self { order }
    }

    /// Builds an ordering greedily, left to right.
    ///
    /// A variable is eligible once all of its constraint ancestors are
    /// placed (if none is eligible, every unplaced variable is). Eligible
    /// variables are ranked by how much their best admissible parent set
    /// loses against their unrestricted best, and the next one is drawn
    /// uniformly from the `greediness` lowest (at least one).
    pub fn greedy<R: Rng>(instance: &Instance, greediness: usize, rng: &mut R) -> Self {
        let n = instance.n();
        let width = greediness.max(1);

        // var -> constraint ancestors that must precede it
        let mut required: Vec<Vec<VarId>> = vec![Vec::new(); n];
        for c in instance.constraints().iter().filter(|c| c.ancestor != c.descendant) {
            required[c.descendant].push(c.ancestor);
        }

        let mut pred = FixedBitSet::with_capacity(n);
        let mut order = Vec::with_capacity(n);
        let mut ranked: Vec<(i64, VarId)> = Vec::with_capacity(n);

        while order.len() < n {
            ranked.clear();
            for v in (0..n).filter(|&v| !pred.contains(v)) {
                if required[v].iter().all(|&a| pred.contains(a)) {
                    ranked.push((regret(instance, v, &pred), v));
                }
            }
            if ranked.is_empty() {
                for v in (0..n).filter(|&v| !pred.contains(v)) {
                    ranked.push((regret(instance, v, &pred), v));
                }
            }
            ranked.sort_unstable();

            let pick = rng.random_range(0..width.min(ranked.len()));
            let v = ranked[pick].1;
            order.push(v);
            pred.insert(v);
        }

        Self { order }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Variable at position `i`.
    ///
    /// # Panics
    /// Panics if `i >= len()`.
    pub fn get(&self, i: usize) -> VarId {
        self.order[i]
    }

    /// Swaps the variables at positions `i` and `j`. Self-inverse.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
    }

    /// Position of every variable: `positions()[v]` is where `v` sits.
    pub fn positions(&self) -> Vec<usize> {
        let mut pos = vec![0; self.order.len()];
        for (i, &v) in self.order.iter().enumerate() {
            pos[v] = i;
        }
        pos
    }

    pub fn as_slice(&self) -> &[VarId] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = VarId> + '_ {
        self.order.iter().copied()
    }

    /// Mutable access for the permutation operators.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [VarId] {
        &mut self.order
    }
}

fn regret(instance: &Instance, v: VarId, pred: &FixedBitSet) -> i64 {
    let var = instance.var(v);
    var.best_parent(pred)
        .score()
        .saturating_sub(var.candidate(0).score())
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.order {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
            first = false;
        }
        Ok(())
    }
}
