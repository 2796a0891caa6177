//! Score values for orderings and parent-set choices.

use std::fmt;

/// Total or per-variable score of a structure. Lower is better.
///
/// `Infeasible` marks an ordering that violates an ancestral constraint by
/// position, or a repair that ran out of rounds. It compares worse than any
/// finite score, so sorting a population pushes such individuals to the end.
///
/// ```
/// use u_bnsl::model::Score;
///
/// assert!(Score::Finite(i64::MAX) < Score::Infeasible);
/// assert!(Score::Finite(-5) < Score::Finite(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Score {
    /// A feasible structure with the given integer score.
    Finite(i64),
    /// No feasible structure was found.
    Infeasible,
}

impl Score {
    /// Returns `true` for [`Score::Finite`].
    pub fn is_finite(self) -> bool {
        matches!(self, Score::Finite(_))
    }

    /// Returns the finite value, if any.
    pub fn value(self) -> Option<i64> {
        match self {
            Score::Finite(v) => Some(v),
            Score::Infeasible => None,
        }
    }

    /// Converts to `f64` for statistics. `Infeasible` maps to `+inf`.
    pub fn to_f64(self) -> f64 {
        match self {
            Score::Finite(v) => v as f64,
            Score::Infeasible => f64::INFINITY,
        }
    }
}

impl From<i64> for Score {
    fn from(v: i64) -> Self {
        Score::Finite(v)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Finite(v) => write!(f, "{v}"),
            Score::Infeasible => write!(f, "infeasible"),
        }
    }
}
