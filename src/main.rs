use anyhow::{anyhow, Context, Result};
use clap::{arg, value_parser, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use u_bnsl::ga::{CrossoverKind, GeneticConfig, GeneticRunner};
use u_bnsl::model::InstanceLoader;
use u_bnsl::register::Recorder;
use u_bnsl::search::LocalSearch;

fn cli() -> Command {
    Command::new("u-bnsl")
        .about("Searches variable orderings for a high-scoring Bayesian network under ancestral constraints")
        .arg(
            arg!(<INSTANCE> "Path to the candidate parent set instance file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(--time <MS> "Wall-clock limit in milliseconds")
                .default_value("60000")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--population <N> "Population size")
                .default_value("20")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--crossovers <N> "Crossover offspring per generation")
                .default_value("20")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--mutations <N> "Mutation offspring per generation")
                .default_value("20")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"mutation-power" <N> "Random swaps per mutation")
                .default_value("10")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--lookahead <N> "Generations in the stagnation window")
                .default_value("10")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--keep <N> "Best individuals kept on diversification")
                .default_value("5")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--tolerance <TOL> "Relative fitness change that triggers diversification")
                .default_value("0.001")
                .value_parser(value_parser!(f64))
                .conflicts_with("no-diversify"),
        )
        .arg(arg!(--"no-diversify" "Never diversify the population"))
        .arg(
            arg!(--crossover <KIND> "Crossover operator")
                .default_value("ox")
                .value_parser(["ox", "pmx"]),
        )
        .arg(
            arg!(--greediness <WIDTH> "Build the initial population greedily with this candidate list width")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--target <SCORE> "Stop once the best score reaches this value")
                .required(false)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
        )
        .arg(
            arg!(--seed <SEED> "Random seed")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
}

fn config_from(matches: &ArgMatches) -> Result<GeneticConfig> {
    let get = |id: &str| -> Result<usize> {
        matches
            .get_one::<usize>(id)
            .copied()
            .ok_or_else(|| anyhow!("missing --{id}"))
    };

    let mut config = GeneticConfig::default()
        .with_population_size(get("population")?)
        .with_crossovers(get("crossovers")?)
        .with_mutations(get("mutations")?)
        .with_mutation_power(get("mutation-power")?)
        .with_diversify_lookahead(get("lookahead")?)
        .with_diversify_keep(get("keep")?);

    if let Some(&ms) = matches.get_one::<u64>("time") {
        config = config.with_time_limit_ms(ms);
    }
    config = if matches.get_flag("no-diversify") {
        config.without_diversification()
    } else {
        match matches.get_one::<f64>("tolerance") {
            Some(&t) => config.with_diversify_tolerance(t),
            None => config,
        }
    };
    if let Some(kind) = matches.get_one::<String>("crossover") {
        config = config.with_crossover(match kind.as_str() {
            "pmx" => CrossoverKind::PartiallyMapped,
            _ => CrossoverKind::Order,
        });
    }
    if let Some(&g) = matches.get_one::<usize>("greediness") {
        config = config.with_greediness(g);
    }
    if let Some(&t) = matches.get_one::<i64>("target") {
        config = config.with_target_score(t);
    }
    if let Some(&s) = matches.get_one::<u64>("seed") {
        config = config.with_seed(s);
    }

    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let path = matches
        .get_one::<PathBuf>("INSTANCE")
        .ok_or_else(|| anyhow!("missing instance path"))?;
    let config = config_from(&matches).context("invalid search parameters")?;

    let instance = InstanceLoader::new()
        .from_path(path)
        .with_context(|| format!("failed to load instance {}", path.display()))?;
    tracing::info!(
        "Loaded {} with {} variables, {} parent sets and {} ancestral constraints",
        path.display(),
        instance.n(),
        instance.num_parent_sets(),
        instance.m()
    );

    let engine = LocalSearch::new(&instance);
    let mut recorder = Recorder::new();
    let result = GeneticRunner::run(engine, &config, &mut recorder);

    println!("Generations: {}", result.generations);
    println!("Best score: {}", result.best.score);
    println!("Best ordering: {}", result.best.ordering);
    println!("{}", engine.check_solution(&result.best.ordering));
    Ok(())
}
