//! Genetic search loop.
//!
//! [`GeneticRunner`] orchestrates the evolutionary process:
//! initialization → crossover → mutation → truncation → stagnation check →
//! best-ever update → repeat until the time limit.

use super::config::GeneticConfig;
use super::population::Population;
use crate::model::Score;
use crate::ordering::Ordering;
use crate::random::rng_from;
use crate::register::ResultRegister;
use crate::search::{LocalSearch, SearchResult};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

/// Result of a genetic search run.
#[derive(Debug, Clone)]
pub struct GeneticResult {
    /// The best result found during the entire run.
    pub best: SearchResult,

    /// Number of completed generations.
    pub generations: usize,

    /// Number of stagnation-triggered diversifications.
    pub diversifications: usize,

    /// Best-ever score after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the genetic search.
///
/// # Usage
///
/// ```ignore
/// let engine = LocalSearch::new(&instance);
/// let config = GeneticConfig::default().with_time_limit_ms(1_000).with_seed(42);
/// let mut recorder = Recorder::new();
/// let result = GeneticRunner::run(engine, &config, &mut recorder);
/// println!("Best score: {}", result.best.score);
/// ```
pub struct GeneticRunner;

impl GeneticRunner {
    /// Runs the genetic search.
    ///
    /// The time limit is measured by `register`. Every initial individual
    /// and every improvement of the best-ever result is recorded there.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`GeneticConfig::validate`] first to get a descriptive error).
    pub fn run<G: ResultRegister>(
        engine: LocalSearch<'_>,
        config: &GeneticConfig,
        register: &mut G,
    ) -> GeneticResult {
        if let Err(e) = config.validate() {
            panic!("invalid GeneticConfig: {e}");
        }

        let mut rng = rng_from(config.seed);
        let n = engine.instance().n();
        let cutoff = Duration::from_millis(config.time_limit_ms);
        let target = config.target_score.map(Score::Finite);

        // 1. Initial population
        info!(
            size = config.population_size,
            greedy = config.greediness.is_some(),
            "generating initial population"
        );
        let mut population = Population::new(engine, config.selection);
        for i in 0..config.population_size {
            let start = match config.greediness {
                Some(g) => Ordering::greedy(engine.instance(), g, &mut rng),
                None => Ordering::random(n, &mut rng),
            };
            let result = engine.hill_climb(&start, &mut rng);
            debug!(i, score = %result.score, "initial individual");
            register.record(result.score, &result.ordering);
            population.add_specimen(result);
        }

        let mut best = match population.best() {
            Some(b) => b.clone(),
            None => SearchResult::new(Score::Infeasible, Ordering::identity(n)),
        };
        info!(score = %best.score, "initial population ready");

        let mut fitness_history = vec![best.score.to_f64()];
        let mut window: VecDeque<f64> = VecDeque::with_capacity(config.diversify_lookahead + 1);
        let mut generations = 0usize;
        let mut diversifications = 0usize;

        let reached = |s: Score| target.is_some_and(|t| s <= t);

        // 2. Generation loop, at least once unless the target is already met
        while !reached(best.score) {
            let mut offspring = population.add_crossovers(config.crossovers, config.crossover, &mut rng);
            offspring.extend(population.mutate(config.mutations, config.mutation_power, &mut rng));
            population.append(offspring);
            population.filter_best(config.population_size);

            // 3. Stagnation window
            if let (Some(fitness), Some(tolerance)) =
                (population.average_fitness(), config.diversify_tolerance)
            {
                window.push_back(fitness);
                if window.len() > config.diversify_lookahead {
                    if let Some(old) = window.pop_front() {
                        let change = ((fitness - old) / old).abs();
                        if change < tolerance {
                            info!(change, old, new = fitness, "diversifying population");
                            population.diversify(config.diversify_keep, &mut rng);
                            diversifications += 1;
                            window.clear();
                        }
                    }
                }
            }

            // 4. Best-ever update
            if let Some(cur) = population.best() {
                if cur.score < best.score {
                    info!(generation = generations + 1, score = %cur.score, "new best");
                    register.record(cur.score, &cur.ordering);
                    best = cur.clone();
                }
            }

            generations += 1;
            fitness_history.push(best.score.to_f64());
            debug!(
                generation = generations,
                best = %best.score,
                average = ?population.average_fitness(),
                "generation done"
            );

            if register.elapsed() >= cutoff {
                break;
            }
        }

        info!(generations, diversifications, score = %best.score, "genetic search finished");
        GeneticResult {
            best,
            generations,
            diversifications,
            fitness_history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
