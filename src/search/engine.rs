//! Scoring, ancestral checks and constraint repair.

use super::Assignment;
use crate::model::{Instance, ParentSet, Score, VarId};
use crate::ordering::Ordering;
use fixedbitset::FixedBitSet;
use tracing::trace;

/// Penalty multiplier for substitutions that satisfy no new constraint.
const NEUTRAL_MOVE_PENALTY: f64 = 100_000.0;

/// Repair rounds allowed per ancestral constraint.
const REPAIR_ROUNDS_PER_CONSTRAINT: usize = 3;

/// Local-search engine bound to one instance.
///
/// All operations are pure with respect to the instance; orderings and
/// assignments passed by `&mut` are the caller's working copies.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch<'a> {
    instance: &'a Instance,
}

impl<'a> LocalSearch<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Best parent set for the variable at position `idx`, given the
    /// variables in `pred`.
    pub fn best_parent(&self, ordering: &Ordering, pred: &FixedBitSet, idx: usize) -> &'a ParentSet {
        self.instance.var(ordering.get(idx)).best_parent(pred)
    }

    /// Bitset of the variables at positions `0..idx`.
    pub fn predecessors(&self, ordering: &Ordering, idx: usize) -> FixedBitSet {
        let mut pred = FixedBitSet::with_capacity(self.instance.n());
        for i in 0..idx {
            pred.insert(ordering.get(i));
        }
        pred
    }

    /// Returns `true` if no constraint `(x, y)` places `y` before `x`.
    ///
    /// A reflexive constraint `(x, x)` always holds.
    pub fn consistent_with_ancestral(&self, ordering: &Ordering) -> bool {
        let pos = ordering.positions();
        self.instance
            .constraints()
            .iter()
            .all(|c| pos[c.ancestor] <= pos[c.descendant])
    }

    /// Picks the best parent set at every position, ignoring constraints.
    ///
    /// Fills `assignment` and returns the total, which is optimal for this
    /// ordering when the instance has no ancestral constraints.
    pub fn unconstrained_score(&self, ordering: &Ordering, assignment: &mut Assignment) -> i64 {
        let mut pred = FixedBitSet::with_capacity(self.instance.n());
        let mut total = 0i64;
        for i in 0..ordering.len() {
            let v = ordering.get(i);
            let p = self.best_parent(ordering, &pred, i);
            assignment.parents[v] = p.id();
            assignment.scores[v] = p.score();
            total += p.score();
            pred.insert(v);
        }
        total
    }

    /// Scores `ordering` under the ancestral constraints.
    ///
    /// Returns [`Score::Infeasible`] if the ordering puts a descendant
    /// before its required ancestor. Otherwise the best parent sets are
    /// selected and, if the instance has constraints, repaired until every
    /// constraint holds as a directed path (or the repair gives up).
    pub fn best_score_with_parents(&self, ordering: &Ordering, assignment: &mut Assignment) -> Score {
        if !self.consistent_with_ancestral(ordering) {
            return Score::Infeasible;
        }
        let total = self.unconstrained_score(ordering, assignment);
        if self.instance.m() == 0 {
            return Score::Finite(total);
        }
        self.repair(ordering, assignment)
    }

    /// Scores `ordering` with a scratch assignment.
    pub fn score(&self, ordering: &Ordering) -> Score {
        let mut assignment = Assignment::new(self.instance.n());
        self.best_score_with_parents(ordering, &mut assignment)
    }

    /// Returns `true` if `x` is an ancestor of `y` (or `x == y`) through the
    /// selected parent sets.
    pub fn has_dipath(&self, assignment: &Assignment, x: VarId, y: VarId) -> bool {
        if x == y {
            return true;
        }
        let mut visited = FixedBitSet::with_capacity(self.instance.n());
        let mut stack = vec![y];
        visited.insert(y);
        while let Some(v) = stack.pop() {
            let chosen = self.instance.var(v).candidate(assignment.parents[v]);
            for &p in chosen.parents() {
                if p == x {
                    return true;
                }
                if !visited.put(p) {
                    stack.push(p);
                }
            }
        }
        false
    }

    /// Number of constraints realised as directed paths.
    pub fn constraints_satisfied(&self, assignment: &Assignment) -> usize {
        self.instance
            .constraints()
            .iter()
            .filter(|c| self.has_dipath(assignment, c.ancestor, c.descendant))
            .count()
    }

    /// Greedy repair of an unconstrained assignment.
    ///
    /// Each round applies the single parent-set substitution with the lowest
    /// cost, where a substitution changing the score by `d` and the number
    /// of satisfied constraints by `s` costs `d / s` if `s > 0`,
    /// `d * 100000` if `s == 0` and is forbidden if `s < 0`. Only sets drawn
    /// from earlier positions are considered, so the assignment stays
    /// consistent with `ordering`.
    ///
    /// Returns the final total once all constraints hold, or
    /// [`Score::Infeasible`] after `3 * m` rounds.
    pub fn repair(&self, ordering: &Ordering, assignment: &mut Assignment) -> Score {
        let n = self.instance.n();
        let m = self.instance.m();

        for round in 0..REPAIR_ROUNDS_PER_CONSTRAINT * m {
            let satisfied = self.constraints_satisfied(assignment);
            if satisfied == m {
                return Score::Finite(self.finalize(assignment));
            }

            let mut pred = FixedBitSet::with_capacity(n);
            let mut best_cost = f64::INFINITY;
            let mut best_move: Option<(VarId, usize)> = None;

            for i in 0..n {
                let cur = ordering.get(i);
                let var = self.instance.var(cur);
                let old = assignment.parents[cur];
                let old_score = var.candidate(old).score();

                for (j, cand) in var.candidates().iter().enumerate() {
                    if j == old || !cand.subset_of(&pred) {
                        continue;
                    }
                    assignment.parents[cur] = j;
                    let now = self.constraints_satisfied(assignment);
                    assignment.parents[cur] = old;

                    let score_delta = cand.score() as f64 - old_score as f64;
                    let cost = if now > satisfied {
                        score_delta / (now - satisfied) as f64
                    } else if now == satisfied {
                        score_delta * NEUTRAL_MOVE_PENALTY
                    } else {
                        f64::INFINITY
                    };

                    if cost < best_cost {
                        best_cost = cost;
                        best_move = Some((cur, j));
                    }
                }
                pred.insert(cur);
            }

            match best_move {
                Some((v, j)) => {
                    trace!(round, var = v, candidate = j, cost = best_cost, "repair move");
                    assignment.parents[v] = j;
                }
                None => return Score::Infeasible,
            }
        }

        Score::Infeasible
    }

    /// Recomputes per-variable scores from the selected sets.
    fn finalize(&self, assignment: &mut Assignment) -> i64 {
        let mut total = 0;
        for (v, var) in self.instance.variables().iter().enumerate() {
            let s = var.candidate(assignment.parents[v]).score();
            assignment.scores[v] = s;
            total += s;
        }
        total
    }

    /// Unconstrained score of positions `start..=end`, given the prefix
    /// before `start`.
    pub fn best_score_range(&self, ordering: &Ordering, start: usize, end: usize) -> i64 {
        let mut used = self.predecessors(ordering, start);
        let mut total = 0;
        for i in start..=end {
            total += self.best_parent(ordering, &used, i).score();
            used.insert(ordering.get(i));
        }
        total
    }
}
