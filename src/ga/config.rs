//! Genetic search configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary
//! loop of [`GeneticRunner`](super::GeneticRunner).

use super::population::CrossoverKind;
use super::selection::Selection;

/// Configuration for the genetic search over orderings.
///
/// # Defaults
///
/// ```
/// use u_bnsl::ga::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.time_limit_ms, 60_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bnsl::ga::{CrossoverKind, GeneticConfig};
///
/// let config = GeneticConfig::default()
///     .with_population_size(40)
///     .with_crossover(CrossoverKind::PartiallyMapped)
///     .with_greediness(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Number of individuals kept after each generation, and the number of
    /// hill-climbed individuals generated up front.
    pub population_size: usize,

    /// Crossover offspring produced per generation.
    pub crossovers: usize,

    /// Mutation offspring produced per generation.
    pub mutations: usize,

    /// Random swaps applied to each mutation offspring.
    pub mutation_power: usize,

    /// Length of the average-fitness window used to detect stagnation.
    pub diversify_lookahead: usize,

    /// Best individuals kept when the population is diversified.
    pub diversify_keep: usize,

    /// Relative change of the average fitness across the window below
    /// which the population is diversified.
    ///
    /// `None` disables diversification.
    pub diversify_tolerance: Option<f64>,

    /// Recombination operator for crossover offspring.
    pub crossover: CrossoverKind,

    /// Parent selection for crossover.
    pub selection: Selection,

    /// Width of the restricted candidate list for greedy construction of
    /// the initial population.
    ///
    /// `None` starts from uniformly random orderings instead.
    pub greediness: Option<usize>,

    /// Wall-clock limit in milliseconds. Checked once per generation, after
    /// the generation completes; at least one generation always runs.
    pub time_limit_ms: u64,

    /// Stop as soon as the best score reaches this value.
    pub target_score: Option<i64>,

    /// Random seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            crossovers: 20,
            mutations: 20,
            mutation_power: 10,
            diversify_lookahead: 10,
            diversify_keep: 5,
            diversify_tolerance: Some(0.001),
            crossover: CrossoverKind::default(),
            selection: Selection::default(),
            greediness: None,
            time_limit_ms: 60_000,
            target_score: None,
            seed: None,
        }
    }
}

impl GeneticConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_crossovers(mut self, n: usize) -> Self {
        self.crossovers = n;
        self
    }

    pub fn with_mutations(mut self, n: usize) -> Self {
        self.mutations = n;
        self
    }

    pub fn with_mutation_power(mut self, power: usize) -> Self {
        self.mutation_power = power;
        self
    }

    pub fn with_diversify_lookahead(mut self, n: usize) -> Self {
        self.diversify_lookahead = n;
        self
    }

    pub fn with_diversify_keep(mut self, n: usize) -> Self {
        self.diversify_keep = n;
        self
    }

    /// Sets the stagnation tolerance. Negative values are clamped to zero.
    pub fn with_diversify_tolerance(mut self, tolerance: f64) -> Self {
        self.diversify_tolerance = Some(tolerance.max(0.0));
        self
    }

    /// Turns stagnation-triggered diversification off.
    pub fn without_diversification(mut self) -> Self {
        self.diversify_tolerance = None;
        self
    }

    pub fn with_crossover(mut self, kind: CrossoverKind) -> Self {
        self.crossover = kind;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Starts from greedy orderings with the given candidate-list width.
    pub fn with_greediness(mut self, width: usize) -> Self {
        self.greediness = Some(width);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_target_score(mut self, score: i64) -> Self {
        self.target_score = Some(score);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if self.diversify_keep > self.population_size {
            return Err("diversify_keep cannot exceed population_size".into());
        }
        if self.diversify_tolerance.is_some() && self.diversify_lookahead == 0 {
            return Err("diversify_lookahead must be at least 1 when diversification is on".into());
        }
        if let Some(t) = self.diversify_tolerance {
            if !t.is_finite() || t < 0.0 {
                return Err("diversify_tolerance must be finite and non-negative".into());
            }
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        if self.time_limit_ms == 0 {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}
