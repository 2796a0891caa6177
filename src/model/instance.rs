//! Problem instances: variables plus ancestral constraints.

use super::variable::{VarId, Variable};
use std::fmt;
use thiserror::Error;

/// Structural problems found while assembling an [`Instance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A variable id is not below the declared variable count.
    #[error("variable id {id} is out of range for {n} variables")]
    VariableOutOfRange { id: VarId, n: usize },
    /// Two variables share the same id.
    #[error("variable {0} is defined more than once")]
    DuplicateVariable(VarId),
    /// No variable was supplied for this id.
    #[error("variable {0} is missing")]
    MissingVariable(VarId),
    /// A variable has no candidate parent sets.
    #[error("variable {0} has no candidate parent sets")]
    NoCandidates(VarId),
    /// A parent set refers to a variable that does not exist.
    #[error("parent set of variable {var} refers to variable {member}, but n = {n}")]
    MemberOutOfRange { var: VarId, member: VarId, n: usize },
    /// A constraint refers to a variable that does not exist.
    #[error("ancestral constraint ({ancestor}, {descendant}) is out of range for {n} variables")]
    ConstraintOutOfRange {
        ancestor: VarId,
        descendant: VarId,
        n: usize,
    },
    /// A parent-set score is so large that a total over all variables could
    /// overflow.
    #[error("score {score} of variable {var} exceeds the bound {bound} for {n} variables")]
    ScoreOutOfRange {
        var: VarId,
        score: i64,
        bound: i64,
        n: usize,
    },
}

/// Ancestral constraint: `ancestor` must be an ancestor of `descendant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ancestral {
    pub ancestor: VarId,
    pub descendant: VarId,
}

impl Ancestral {
    pub fn new(ancestor: VarId, descendant: VarId) -> Self {
        Self {
            ancestor,
            descendant,
        }
    }
}

/// An immutable search instance.
///
/// Index `i` of [`variables`](Self::variables) holds the variable with id `i`.
#[derive(Debug, Clone)]
pub struct Instance {
    variables: Vec<Variable>,
    constraints: Vec<Ancestral>,
}

impl Instance {
    /// Assembles an instance from variables given in any order.
    ///
    /// # Errors
    /// Returns a [`ModelError`] if the ids do not cover `0..n` exactly once,
    /// a variable has no candidates, a member or constraint endpoint is
    /// out of range, or a score magnitude exceeds `i64::MAX / n` (so no
    /// total over one set per variable can overflow).
    pub fn new(variables: Vec<Variable>, constraints: Vec<Ancestral>) -> Result<Self, ModelError> {
        let n = variables.len();
        let mut slots: Vec<Option<Variable>> = vec![None; n];
        let bound = i64::MAX / n.max(1) as i64;

        for var in variables {
            let id = var.id();
            if id >= n {
                return Err(ModelError::VariableOutOfRange { id, n });
            }
            if var.num_candidates() == 0 {
                return Err(ModelError::NoCandidates(id));
            }
            for cand in var.candidates() {
                if let Some(&member) = cand.parents().iter().find(|&&p| p >= n) {
                    return Err(ModelError::MemberOutOfRange {
                        var: id,
                        member,
                        n,
                    });
                }
                if cand.score().unsigned_abs() > bound as u64 {
                    return Err(ModelError::ScoreOutOfRange {
                        var: id,
                        score: cand.score(),
                        bound,
                        n,
                    });
                }
            }
            if slots[id].is_some() {
                return Err(ModelError::DuplicateVariable(id));
            }
            slots[id] = Some(var);
        }

        for c in &constraints {
            if c.ancestor >= n || c.descendant >= n {
                return Err(ModelError::ConstraintOutOfRange {
                    ancestor: c.ancestor,
                    descendant: c.descendant,
                    n,
                });
            }
        }

        let variables = slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| slot.ok_or(ModelError::MissingVariable(id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            variables,
            constraints,
        })
    }

    /// Number of variables.
    pub fn n(&self) -> usize {
        self.variables.len()
    }

    /// Number of ancestral constraints.
    pub fn m(&self) -> usize {
        self.constraints.len()
    }

    /// Variable with id `i`.
    ///
    /// # Panics
    /// Panics if `i >= n`.
    pub fn var(&self, i: VarId) -> &Variable {
        &self.variables[i]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Constraint number `i`.
    pub fn ancestral(&self, i: usize) -> Ancestral {
        self.constraints[i]
    }

    pub fn constraints(&self) -> &[Ancestral] {
        &self.constraints
    }

    /// Total number of candidate parent sets over all variables.
    pub fn num_parent_sets(&self) -> usize {
        self.variables.iter().map(Variable::num_candidates).sum()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instance with {} variables, {} constraints", self.n(), self.m())?;
        for v in &self.variables {
            write!(f, "{v}")?;
        }
        for c in &self.constraints {
            writeln!(f, "  {} -> {}", c.ancestor, c.descendant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParentSet;

    fn var(id: VarId, n: usize, sets: &[(i64, &[VarId])]) -> Variable {
        Variable::new(
            id,
            sets.iter()
                .map(|(s, p)| ParentSet::new(id, *s, p.to_vec(), n))
                .collect(),
        )
    }

    #[test]
    fn test_variables_placed_by_id() {
        let inst = Instance::new(
            vec![var(1, 2, &[(3, &[])]), var(0, 2, &[(7, &[])])],
            vec![Ancestral::new(0, 1)],
        )
        .unwrap();
        assert_eq!(inst.n(), 2);
        assert_eq!(inst.m(), 1);
        assert_eq!(inst.var(0).candidate(0).score(), 7);
        assert_eq!(inst.var(1).candidate(0).score(), 3);
        assert_eq!(inst.num_parent_sets(), 2);
    }

    #[test]
    fn test_duplicate_variable() {
        let err = Instance::new(
            vec![var(0, 2, &[(1, &[])]), var(0, 2, &[(2, &[])])],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, ModelError::DuplicateVariable(0));
    }

    #[test]
    fn test_variable_out_of_range() {
        let err = Instance::new(vec![var(3, 4, &[(1, &[])])], vec![]).unwrap_err();
        assert_eq!(err, ModelError::VariableOutOfRange { id: 3, n: 1 });
    }

    #[test]
    fn test_no_candidates() {
        let err = Instance::new(vec![Variable::new(0, vec![])], vec![]).unwrap_err();
        assert_eq!(err, ModelError::NoCandidates(0));
    }

    #[test]
    fn test_constraint_out_of_range() {
        let err = Instance::new(vec![var(0, 1, &[(1, &[])])], vec![Ancestral::new(0, 5)])
            .unwrap_err();
        assert!(matches!(err, ModelError::ConstraintOutOfRange { descendant: 5, .. }));
    }

    #[test]
    fn test_member_out_of_range() {
        // Built over a wider universe than the instance ends up with.
        let err = Instance::new(vec![var(0, 8, &[(1, &[6])])], vec![]).unwrap_err();
        assert_eq!(
            err,
            ModelError::MemberOutOfRange {
                var: 0,
                member: 6,
                n: 1
            }
        );
    }

    #[test]
    fn test_score_bound_scales_with_n() {
        let big = i64::MAX / 2;
        // One variable may use the whole range.
        assert!(Instance::new(vec![var(0, 1, &[(i64::MAX, &[])])], vec![]).is_ok());
        assert!(Instance::new(
            vec![var(0, 2, &[(big, &[])]), var(1, 2, &[(-big, &[])])],
            vec![]
        )
        .is_ok());

        let err = Instance::new(
            vec![var(0, 2, &[(big + 1, &[])]), var(1, 2, &[(1, &[])])],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ScoreOutOfRange {
                var: 0,
                score: big + 1,
                bound: big,
                n: 2
            }
        );

        let err = Instance::new(
            vec![var(0, 2, &[(1, &[])]), var(1, 2, &[(i64::MIN, &[])])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::ScoreOutOfRange { var: 1, .. }));
    }
}
