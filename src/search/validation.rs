//! Independent consistency check of a final ordering.

use super::{Ancestry, Assignment, LocalSearch};
use crate::model::{Score, VarId};
use crate::ordering::Ordering;
use std::fmt;
use tracing::debug;

/// Check result for one position of the ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionReport {
    pub position: usize,
    pub var: VarId,
    pub score: i64,
    pub parents: Vec<VarId>,
    /// Every selected parent sits at an earlier position.
    pub valid: bool,
}

/// Diagnostics for a scored ordering.
///
/// Produced by [`LocalSearch::check_solution`]. Nothing here is an error;
/// the caller decides what to do with a failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionReport {
    pub positions: Vec<PositionReport>,
    /// Score returned by the scoring routine.
    pub score: Score,
    /// Sum of the per-variable scores in the assignment.
    pub total_from_scores: i64,
    /// Sum of the scores of the selected parent sets.
    pub total_from_parents: i64,
    /// Constraints realised as directed paths.
    pub constraints_satisfied: usize,
    /// Same count, computed from the transitive closure.
    pub closure_satisfied: usize,
    pub constraints_total: usize,
}

impl SolutionReport {
    /// Every position is valid.
    pub fn positions_valid(&self) -> bool {
        self.positions.iter().all(|p| p.valid)
    }

    /// Every ancestral constraint holds.
    pub fn constraints_valid(&self) -> bool {
        self.constraints_satisfied == self.constraints_total
    }

    /// All checks pass and the three totals agree.
    pub fn is_valid(&self) -> bool {
        self.positions_valid()
            && self.constraints_valid()
            && self.closure_satisfied == self.constraints_satisfied
            && self.total_from_scores == self.total_from_parents
            && self.score == Score::Finite(self.total_from_parents)
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "Good"
    } else {
        "Bad"
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.positions {
            write!(f, "Ordering[{}]\t= {}\tScore:\t{}\tParents:\t{{ ", p.position, p.var, p.score)?;
            for q in &p.parents {
                write!(f, "{q} ")?;
            }
            writeln!(f, "}}\tValid: {}", p.valid)?;
        }
        writeln!(
            f,
            "Total Score: {} {} {}",
            self.total_from_scores, self.total_from_parents, self.score
        )?;
        writeln!(f, "Validity Check: {}", verdict(self.positions_valid()))?;
        write!(
            f,
            "Ancestral constraints check: {} ({}/{})",
            verdict(self.constraints_valid()),
            self.constraints_satisfied,
            self.constraints_total
        )
    }
}

impl<'a> LocalSearch<'a> {
    /// Re-scores `ordering` and verifies the resulting structure.
    pub fn check_solution(&self, ordering: &Ordering) -> SolutionReport {
        let instance = self.instance();
        let mut assignment = Assignment::new(instance.n());
        let score = self.best_score_with_parents(ordering, &mut assignment);
        let pos = ordering.positions();

        let mut positions = Vec::with_capacity(ordering.len());
        let mut total_from_scores = 0;
        let mut total_from_parents = 0;

        for (i, var) in ordering.iter().enumerate() {
            let chosen = instance.var(var).candidate(assignment.parents[var]);
            let valid = chosen.parents().iter().all(|&p| pos[p] < i);
            total_from_scores += assignment.scores[var];
            total_from_parents += chosen.score();
            positions.push(PositionReport {
                position: i,
                var,
                score: assignment.scores[var],
                parents: chosen.parents().to_vec(),
                valid,
            });
        }

        let closure = Ancestry::build(instance, ordering, &assignment);
        let report = SolutionReport {
            positions,
            score,
            total_from_scores,
            total_from_parents,
            constraints_satisfied: self.constraints_satisfied(&assignment),
            closure_satisfied: closure.satisfied(instance),
            constraints_total: instance.m(),
        };
        debug!("solution check:\n{report}");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::test_support::{chain, ladder};

    #[test]
    fn test_chain_report() {
        let inst = chain(&[(0, 2)]);
        let ls = LocalSearch::new(&inst);
        let report = ls.check_solution(&Ordering::identity(3));

        assert!(report.is_valid());
        assert_eq!(report.score, Score::Finite(18));
        assert_eq!(report.total_from_scores, 18);
        assert_eq!(report.positions[2].parents, vec![0, 1]);
        assert_eq!(report.constraints_satisfied, 1);
        assert_eq!(report.closure_satisfied, 1);

        let text = report.to_string();
        assert!(text.contains("Validity Check: Good"));
        assert!(text.contains("Ancestral constraints check: Good (1/1)"));
    }

    #[test]
    fn test_unmet_constraint_reported() {
        // Ordering is position-feasible but 0 can never be an ancestor of 1.
        let inst = crate::test_support::instance(&[&[(1, &[])], &[(1, &[])]], &[(0, 1)]);
        let ls = LocalSearch::new(&inst);
        let report = ls.check_solution(&Ordering::identity(2));
        assert_eq!(report.score, Score::Infeasible);
        assert!(report.positions_valid());
        assert!(!report.constraints_valid());
        assert!(!report.is_valid());
        assert!(report.to_string().contains("Ancestral constraints check: Bad"));
    }

    #[test]
    fn test_hill_climb_result_positions_valid() {
        let inst = ladder(&[]);
        let ls = LocalSearch::new(&inst);
        let mut rng = create_rng(21);
        for _ in 0..10 {
            let start = Ordering::random(5, &mut rng);
            let result = ls.hill_climb(&start, &mut rng);
            let report = ls.check_solution(&result.ordering);
            assert!(report.positions_valid());
            assert!(report.is_valid());
            assert_eq!(report.score, result.score);
        }
    }
}
