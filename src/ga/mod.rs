//! Genetic search over variable orderings.
//!
//! Every individual is a hill-climbed [`SearchResult`](crate::search::SearchResult):
//! initial orderings, crossover children and mutants are all pushed to a
//! swap-local optimum before they enter the [`Population`].
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: population sizes, operators, stagnation window,
//!   time limit
//! - [`Population`]: offspring generation, truncation, diversification
//! - [`GeneticRunner`]: executes the generation loop
//! - [`GeneticResult`]: best-ever result with run statistics
//!
//! # Stagnation escape
//!
//! The average feasible score of the population is tracked over a sliding
//! window of `diversify_lookahead` generations. When it changes by less than
//! `diversify_tolerance` (relative) across the window, all but the
//! `diversify_keep` best members are replaced by fresh hill-climbed random
//! orderings.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Teyssier & Koller (2005), "Ordering-Based Search: A Simple and Effective
//!   Algorithm for Learning Bayesian Networks"

mod config;
mod population;
mod runner;
mod selection;

pub use config::GeneticConfig;
pub use population::{CrossoverKind, Population};
pub use runner::{GeneticResult, GeneticRunner};
pub use selection::Selection;
