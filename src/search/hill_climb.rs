//! Swap-neighbourhood hill climbing over orderings.
//!
//! # Algorithm
//!
//! 1. Score the start ordering
//! 2. Shuffle the positions to get a sweep order
//! 3. For each pivot in sweep order, try swapping it with every other
//!    position and keep the best-scoring swap for that pivot
//! 4. If that swap strictly improves the current score, commit it and start
//!    a new sweep (step 2)
//! 5. Stop when a full sweep commits nothing
//!
//! Trial swaps are undone by swapping again.

use super::{Assignment, LocalSearch, SearchResult};
use crate::model::Score;
use crate::ordering::Ordering;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// A converged hill climb with its parent choices.
#[derive(Debug, Clone)]
pub struct Climb {
    pub result: SearchResult,
    /// Parent choices of the final ordering; `None` when its score is
    /// [`Score::Infeasible`].
    pub assignment: Option<Assignment>,
    /// Number of committed swaps.
    pub steps: usize,
}

impl<'a> LocalSearch<'a> {
    /// Hill-climbs from `start` to a swap-local optimum.
    ///
    /// The returned score is never worse than the score of `start`.
    pub fn hill_climb<R: Rng>(&self, start: &Ordering, rng: &mut R) -> SearchResult {
        self.climb(start, rng).result
    }

    /// Like [`hill_climb`](Self::hill_climb), also returning the final
    /// assignment and the number of committed swaps.
    pub fn climb<R: Rng>(&self, start: &Ordering, rng: &mut R) -> Climb {
        let n = start.len();
        let mut cur = start.clone();
        let mut assignment = Assignment::new(n);
        let mut cur_score = self.best_score_with_parents(&cur, &mut assignment);
        let mut trial = Assignment::new(n);
        let mut positions: Vec<usize> = (0..n).collect();
        let mut steps = 0usize;

        loop {
            positions.shuffle(rng);
            let mut improved = false;

            for &pivot in &positions {
                let mut best: Option<(usize, Score)> = None;
                let mut best_assignment = None;

                for j in (0..n).filter(|&j| j != pivot) {
                    cur.swap(pivot, j);
                    let sc = self.best_score_with_parents(&cur, &mut trial);
                    if best.map_or(true, |(_, b)| sc < b) {
                        best = Some((j, sc));
                        best_assignment = Some(trial.clone());
                    }
                    cur.swap(pivot, j);
                }

                if let (Some((j, sc)), Some(a)) = (best, best_assignment) {
                    if sc < cur_score {
                        cur.swap(pivot, j);
                        cur_score = sc;
                        assignment = a;
                        steps += 1;
                        improved = true;
                        break;
                    }
                }
            }

            if !improved {
                break;
            }
        }

        debug!(steps, score = %cur_score, "hill climb converged");
        Climb {
            result: SearchResult::new(cur_score, cur),
            assignment: cur_score.is_finite().then_some(assignment),
            steps,
        }
    }
}
