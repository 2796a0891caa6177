//! Small hand-built instances shared by unit tests.

use crate::model::{Ancestral, Instance, ParentSet, VarId, Variable};

/// Builds an instance from `(score, parents)` lists indexed by variable id.
pub(crate) fn instance(sets: &[&[(i64, &[VarId])]], constraints: &[(VarId, VarId)]) -> Instance {
    let n = sets.len();
    let variables = sets
        .iter()
        .enumerate()
        .map(|(id, cands)| {
            Variable::new(
                id,
                cands
                    .iter()
                    .map(|(s, p)| ParentSet::new(id, *s, p.to_vec(), n))
                    .collect(),
            )
        })
        .collect();
    let constraints = constraints
        .iter()
        .map(|&(x, y)| Ancestral::new(x, y))
        .collect();
    Instance::new(variables, constraints).unwrap()
}

/// 0: {} 10; 1: {0} 5, {} 9; 2: {0,1} 3, {} 8.
///
/// The ordering `0 1 2` scores 18.
pub(crate) fn chain(constraints: &[(VarId, VarId)]) -> Instance {
    instance(
        &[
            &[(10, &[])],
            &[(5, &[0]), (9, &[])],
            &[(3, &[0, 1]), (8, &[])],
        ],
        constraints,
    )
}

/// Five variables where every variable prefers all lower-numbered ones as
/// parents, so the identity ordering is optimal.
pub(crate) fn ladder(constraints: &[(VarId, VarId)]) -> Instance {
    instance(
        &[
            &[(20, &[])],
            &[(4, &[0]), (20, &[])],
            &[(3, &[0, 1]), (6, &[1]), (20, &[])],
            &[(2, &[1, 2]), (7, &[2]), (20, &[])],
            &[(1, &[3]), (9, &[0]), (20, &[])],
        ],
        constraints,
    )
}
