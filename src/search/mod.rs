//! Local-search engine over variable orderings.
//!
//! [`LocalSearch`] borrows an [`Instance`](crate::model::Instance) and
//! provides pure operations over orderings:
//!
//! - best-parent selection under a fixed prefix
//! - scoring with ancestral constraints ([`LocalSearch::best_score_with_parents`]),
//!   which checks position feasibility, picks the best parent set per
//!   position and, when constraints exist, runs a greedy repair that trades
//!   score for directed-path satisfaction
//! - swap-neighbourhood hill climbing ([`LocalSearch::hill_climb`])
//! - solution diagnostics ([`LocalSearch::check_solution`])
//!
//! Parent choices are carried in an [`Assignment`]; a finished search step
//! is a [`SearchResult`].

pub mod ancestry;
mod engine;
mod hill_climb;
mod validation;

pub use ancestry::Ancestry;
pub use engine::LocalSearch;
pub use hill_climb::Climb;
pub use validation::{PositionReport, SolutionReport};

use crate::model::{Score, VarId};
use crate::ordering::Ordering;

/// Selected parent set and its score for every variable.
///
/// `parents[v]` is the candidate id chosen for variable `v`, `scores[v]`
/// its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub parents: Vec<usize>,
    pub scores: Vec<i64>,
}

impl Assignment {
    /// All variables on their first candidate.
    pub fn new(n: usize) -> Self {
        Self {
            parents: vec![0; n],
            scores: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Candidate id selected for `v`.
    pub fn parent_of(&self, v: VarId) -> usize {
        self.parents[v]
    }

    /// Sum of the per-variable scores.
    pub fn total(&self) -> i64 {
        self.scores.iter().sum()
    }
}

/// A scored ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub score: Score,
    pub ordering: Ordering,
}

impl SearchResult {
    pub fn new(score: Score, ordering: Ordering) -> Self {
        Self { score, ordering }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Results rank by ascending score; ties fall back to the ordering so the
/// relation stays total.
impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.ordering.as_slice().cmp(other.ordering.as_slice()))
    }
}
