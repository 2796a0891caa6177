//! Parent selection for crossover.
//!
//! All strategies assume minimisation and treat infeasible individuals as
//! worse than any feasible one.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::search::SearchResult;
use rand::Rng;

/// Selection strategy for choosing crossover parents.
///
/// ```
/// use u_bnsl::ga::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` members at random (with replacement) and keep the best.
    Tournament(usize),
    /// Linear ranking: the member of rank `r` (0 = best) has weight `n - r`.
    Rank,
    /// Every member equally likely.
    Uniform,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Index of the selected member.
    ///
    /// # Panics
    /// Panics if `members` is empty.
    pub fn select<R: Rng>(&self, members: &[SearchResult], rng: &mut R) -> usize {
        assert!(!members.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(members, *k, rng),
            Selection::Rank => rank(members, rng),
            Selection::Uniform => rng.random_range(0..members.len()),
        }
    }
}

fn tournament<R: Rng>(members: &[SearchResult], k: usize, rng: &mut R) -> usize {
    let n = members.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if members[idx].score < members[best].score {
            best = idx;
        }
    }
    best
}

fn rank<R: Rng>(members: &[SearchResult], rng: &mut R) -> usize {
    let n = members.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by_key(|&i| members[i].score);

    let total = (n * (n + 1) / 2) as u64;
    let threshold = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for (r, &idx) in indexed.iter().enumerate() {
        cumulative += (n - r) as u64;
        if cumulative > threshold {
            return idx;
        }
    }
    indexed[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Score;
    use crate::ordering::Ordering;
    use crate::random::create_rng;

    fn members(scores: &[Score]) -> Vec<SearchResult> {
        scores
            .iter()
            .map(|&s| SearchResult::new(s, Ordering::identity(3)))
            .collect()
    }

    fn counts(sel: Selection, pop: &[SearchResult], draws: usize) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..draws {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = members(&[
            Score::Finite(10),
            Score::Finite(5),
            Score::Finite(1),
            Score::Finite(8),
        ]);
        let c = counts(Selection::Tournament(4), &pop, 10_000);
        assert!(c[2] > 6000, "expected best >60% of draws, got {c:?}");
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = members(&[
            Score::Finite(10),
            Score::Finite(5),
            Score::Finite(1),
            Score::Finite(8),
        ]);
        let c = counts(Selection::Tournament(1), &pop, 10_000);
        assert!(c.iter().all(|&x| x > 1500), "expected uniform, got {c:?}");
    }

    #[test]
    fn test_tournament_avoids_infeasible() {
        let pop = members(&[Score::Infeasible, Score::Finite(50)]);
        let c = counts(Selection::Tournament(3), &pop, 4_000);
        assert!(c[1] > c[0] * 4, "infeasible picked too often: {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = members(&[
            Score::Finite(100),
            Score::Finite(50),
            Score::Finite(1),
            Score::Finite(80),
        ]);
        let c = counts(Selection::Rank, &pop, 10_000);
        assert!(c[2] > c[0], "best should beat worst: {c:?}");
        // Rank 0 weight 4 of 10.
        assert!(c[2] > 3500 && c[2] < 4500, "unexpected share: {c:?}");
    }

    #[test]
    fn test_uniform() {
        let pop = members(&[
            Score::Finite(1),
            Score::Finite(2),
            Score::Finite(3),
            Score::Finite(4),
        ]);
        let c = counts(Selection::Uniform, &pop, 10_000);
        assert!(c.iter().all(|&x| x > 2000), "expected uniform, got {c:?}");
    }

    #[test]
    fn test_single_member() {
        let pop = members(&[Score::Finite(5)]);
        let mut rng = create_rng(42);
        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Uniform.select(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&[], &mut rng);
    }
}
