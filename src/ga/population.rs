//! Population of hill-climbed orderings.
//!
//! Every offspring produced here is hill-climbed before it is returned, so
//! all members are swap-local optima of the engine's scoring.

use super::selection::Selection;
use crate::ordering::operators::{order_crossover, pmx_crossover, swap_mutation};
use crate::ordering::Ordering;
use crate::random::create_rng;
use crate::search::{LocalSearch, SearchResult};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Recombination operator for crossover offspring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    /// Order crossover (OX).
    #[default]
    Order,
    /// Partially mapped crossover (PMX).
    PartiallyMapped,
}

impl CrossoverKind {
    fn apply<R: Rng>(self, p1: &[usize], p2: &[usize], rng: &mut R) -> (Vec<usize>, Vec<usize>) {
        match self {
            CrossoverKind::Order => order_crossover(p1, p2, rng),
            CrossoverKind::PartiallyMapped => pmx_crossover(p1, p2, rng),
        }
    }
}

/// Scored orderings evolved by [`GeneticRunner`](super::GeneticRunner).
#[derive(Debug, Clone)]
pub struct Population<'a> {
    engine: LocalSearch<'a>,
    selection: Selection,
    members: Vec<SearchResult>,
}

impl<'a> Population<'a> {
    /// An empty population over `engine`.
    pub fn new(engine: LocalSearch<'a>, selection: Selection) -> Self {
        Self {
            engine,
            selection,
            members: Vec::new(),
        }
    }

    pub fn engine(&self) -> LocalSearch<'a> {
        self.engine
    }

    pub fn members(&self) -> &[SearchResult] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn add_specimen(&mut self, result: SearchResult) {
        self.members.push(result);
    }

    /// Produces `count` hill-climbed crossover children.
    ///
    /// Parents are drawn with the configured [`Selection`]; each recombination
    /// yields two children. The population itself is left unchanged.
    pub fn add_crossovers<R: Rng>(
        &self,
        count: usize,
        kind: CrossoverKind,
        rng: &mut R,
    ) -> Vec<SearchResult> {
        if self.members.is_empty() || count == 0 {
            return Vec::new();
        }

        let mut children = Vec::with_capacity(count);
        while children.len() < count {
            let a = self.selection.select(&self.members, rng);
            let b = self.selection.select(&self.members, rng);
            let (c1, c2) = kind.apply(
                self.members[a].ordering.as_slice(),
                self.members[b].ordering.as_slice(),
                rng,
            );
            for child in [c1, c2] {
                if children.len() < count {
                    if let Some(o) = Ordering::from_vec(child) {
                        children.push(o);
                    }
                }
            }
        }
        self.climb_all(children, rng)
    }

    /// Produces `count` hill-climbed mutants of uniformly chosen members,
    /// each after `power` random swaps.
    pub fn mutate<R: Rng>(&self, count: usize, power: usize, rng: &mut R) -> Vec<SearchResult> {
        if self.members.is_empty() || count == 0 {
            return Vec::new();
        }

        let starts: Vec<Ordering> = (0..count)
            .map(|_| {
                let idx = rng.random_range(0..self.members.len());
                let mut o = self.members[idx].ordering.clone();
                swap_mutation(o.as_mut_slice(), power, rng);
                o
            })
            .collect();
        self.climb_all(starts, rng)
    }

    pub fn append(&mut self, offspring: Vec<SearchResult>) {
        self.members.extend(offspring);
    }

    /// Sorts by score, drops duplicate orderings and keeps the `keep` best.
    pub fn filter_best(&mut self, keep: usize) {
        self.members.sort();
        self.members.dedup_by(|a, b| a.ordering == b.ordering);
        self.members.truncate(keep);
    }

    /// Mean score over the feasible members, `None` if there are none.
    pub fn average_fitness(&self) -> Option<f64> {
        let (sum, count) = self
            .members
            .iter()
            .filter_map(|m| m.score.value())
            .fold((0.0, 0usize), |(s, c), v| (s + v as f64, c + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Member at `rank` in the current member order (0 is the best after
    /// [`filter_best`](Self::filter_best)).
    pub fn specimen(&self, rank: usize) -> Option<&SearchResult> {
        self.members.get(rank)
    }

    /// Best member regardless of the current order.
    pub fn best(&self) -> Option<&SearchResult> {
        self.members.iter().min()
    }

    /// Keeps the `keep` best members and refills the population to its
    /// previous size with hill-climbed random orderings.
    pub fn diversify<R: Rng>(&mut self, keep: usize, rng: &mut R) {
        let size = self.members.len();
        self.filter_best(keep);
        let n = self.engine.instance().n();
        let starts: Vec<Ordering> = (self.members.len()..size)
            .map(|_| Ordering::random(n, rng))
            .collect();
        let fresh = self.climb_all(starts, rng);
        self.members.extend(fresh);
    }

    /// Hill-climbs every start, each with its own RNG seeded from `rng`.
    fn climb_all<R: Rng>(&self, starts: Vec<Ordering>, rng: &mut R) -> Vec<SearchResult> {
        let seeds: Vec<u64> = starts.iter().map(|_| rng.random()).collect();
        let engine = self.engine;

        #[cfg(feature = "parallel")]
        {
            starts
                .into_par_iter()
                .zip(seeds.into_par_iter())
                .map(|(o, seed)| engine.hill_climb(&o, &mut create_rng(seed)))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            starts
                .into_iter()
                .zip(seeds)
                .map(|(o, seed)| engine.hill_climb(&o, &mut create_rng(seed)))
                .collect()
        }
    }
}
