//! Ordering-based Bayesian network structure search under ancestral
//! constraints.
//!
//! Every variable comes with a list of candidate parent sets, each with a
//! precomputed score (lower is better). A variable ordering induces an
//! acyclic network by giving each variable its best candidate drawn from the
//! variables placed before it. Ancestral constraints `(x, y)` additionally
//! require a directed path from `x` to `y`.
//!
//! - **Model** ([`model`]): instances, candidate parent sets, the
//!   [`Score`](model::Score) type and the instance file loader.
//! - **Orderings** ([`ordering`]): permutations, random and greedy
//!   construction, permutation crossover and mutation.
//! - **Local search** ([`search`]): best-parent scoring, constraint repair,
//!   swap hill climbing and solution checks.
//! - **Genetic search** ([`ga`]): a population of hill-climbed orderings
//!   evolved under a wall-clock limit with stagnation-triggered
//!   diversification.
//! - **Recording** ([`register`]): sink for candidate solutions found along
//!   the way.
//!
//! # Example
//!
//! ```
//! use u_bnsl::model::InstanceLoader;
//! use u_bnsl::ordering::Ordering;
//! use u_bnsl::search::LocalSearch;
//!
//! // Two variables; 1 prefers 0 as its parent.
//! let text = "2\n0 1\n-1.0 0\n0\n1 2\n-0.5 1 0\n-2.0 0\n0\n";
//! let instance = InstanceLoader::new().from_str(text).unwrap();
//! let engine = LocalSearch::new(&instance);
//! let score = engine.score(&Ordering::identity(2));
//! assert_eq!(score.value(), Some(1_500_000));
//! ```

pub mod ga;
pub mod model;
pub mod ordering;
pub mod random;
pub mod register;
pub mod search;

#[cfg(test)]
mod test_support;
