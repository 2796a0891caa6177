//! Permutation crossover and mutation operators.
//!
//! These work on raw `&[usize]` permutations; [`Ordering`](super::Ordering)
//! wraps them for the population.
//!
//! - [`order_crossover`] (OX): Davis (1985), keeps relative order
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), keeps absolute position
//! - [`swap_mutation`]: exchange two random positions

use fixedbitset::FixedBitSet;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Order Crossover (OX).
///
/// Copies a random segment from one parent and fills the remaining
/// positions with the other parent's elements in their original order,
/// starting after the segment and wrapping around.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);
    (
        ox_child(parent1, parent2, start, end),
        ox_child(parent2, parent1, start, end),
    )
}

/// Keeps `keep[start..=end]` in place; the free positions, read from just
/// after the segment with wrap-around, take the remaining values in the
/// order they appear in `fill` from the same starting point.
fn ox_child(keep: &[usize], fill: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = keep.len();
    let in_segment: FixedBitSet = keep[start..=end].iter().copied().collect();
    let rest = (end + 1..n)
        .chain(0..=end)
        .map(|i| fill[i])
        .filter(|&v| !in_segment.contains(v));

    let mut child = keep.to_vec();
    for (pos, v) in (end + 1..n).chain(0..start).zip(rest) {
        child[pos] = v;
    }
    child
}

/// Partially Mapped Crossover (PMX).
///
/// Copies a random segment from one parent and takes every other position
/// from the other parent, resolving duplicates through the segment's
/// value mapping.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn pmx_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = random_segment(n, rng);
    (
        pmx_child(parent1, parent2, start, end),
        pmx_child(parent2, parent1, start, end),
    )
}

/// Keeps `keep[start..=end]` in place. Every other position takes the value
/// `fill` has there; if that value is already inside the kept segment it is
/// mapped through the segment (`v -> fill[pos of v in keep]`) until it is not.
fn pmx_child(keep: &[usize], fill: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = keep.len();
    let mut seg_pos = vec![None; n];
    for i in start..=end {
        seg_pos[keep[i]] = Some(i);
    }

    (0..n)
        .map(|i| {
            if (start..=end).contains(&i) {
                return keep[i];
            }
            let mut v = fill[i];
            while let Some(p) = seg_pos[v] {
                v = fill[p];
            }
            v
        })
        .collect()
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swaps two random positions `power` times.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], power: usize, rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    for _ in 0..power {
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        perm.swap(i, j);
    }
}

/// Random segment `[start, end]` within `0..n`, `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn is_permutation(perm: &[usize], n: usize) -> bool {
        let set: HashSet<usize> = perm.iter().copied().collect();
        perm.len() == n && set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- OX ----

    #[test]
    fn test_ox_produces_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2: Vec<usize> = (0..8).rev().collect();
        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 8), "OX child1 invalid: {c1:?}");
            assert!(is_permutation(&c2, 8), "OX child2 invalid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_segment_copied() {
        let p1 = vec![0, 1, 2, 3, 4];
        let p2 = vec![4, 3, 2, 1, 0];
        let child = ox_child(&p1, &p2, 1, 2);
        assert_eq!(&child[1..=2], &[1, 2]);
        // Filled from p2 after position 2, wrapping: 1 0 4 3 -> skip taken.
        assert_eq!(child, vec![3, 1, 2, 0, 4]);
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = order_crossover(&[0], &[0], &mut rng);
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    // ---- PMX ----

    #[test]
    fn test_pmx_produces_permutations() {
        let mut rng = create_rng(42);
        let p1: Vec<usize> = (0..8).collect();
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];
        for _ in 0..100 {
            let (c1, c2) = pmx_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 8), "PMX child1 invalid: {c1:?}");
            assert!(is_permutation(&c2, 8), "PMX child2 invalid: {c2:?}");
        }
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![0, 1, 2, 3, 4];
        let (c1, c2) = pmx_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_pmx_keeps_positions_outside_conflicts() {
        let p1 = vec![0, 1, 2, 3, 4];
        let p2 = vec![1, 0, 2, 4, 3];
        let child = pmx_child(&p1, &p2, 3, 4);
        assert_eq!(child, vec![1, 0, 2, 3, 4]);
    }

    #[test]
    fn test_pmx_follows_mapping_chain() {
        // 1 -> 2 -> 3 through the kept segment [1, 2].
        let child = pmx_child(&[0, 1, 2, 3], &[1, 2, 3, 0], 1, 2);
        assert_eq!(child, vec![3, 1, 2, 0]);
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_mutation_preserves_permutation() {
        let mut rng = create_rng(42);
        for power in 0..6 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, power, &mut rng);
            assert!(is_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_mutation_zero_power_is_identity() {
        let mut rng = create_rng(1);
        let mut perm: Vec<usize> = (0..5).collect();
        swap_mutation(&mut perm, 0, &mut rng);
        assert_eq!(perm, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end && end < 10);
        }
    }
}
