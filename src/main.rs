use clap::{arg, Command};
use std::{fs::File, io, path::PathBuf};
use tracing::Level;

use knapsack_evolve::{
    error::{GeneticError, Result, ResultExt},
    evolution::{EvolutionLauncher, EvolutionOptions, StdoutSink},
    fitness::Knapsack,
    input::{read_instance, write_instance, Instance},
    rng::RandomNumberGenerator,
    Catalog,
};

fn cli() -> Command {
    Command::new("knapsack-evolve")
        .about("Approximates the 0/1 knapsack optimum with a barrier-synchronized genetic algorithm")
        .arg_required_else_help(true)
        .arg(
            arg!(--"log-level" [LEVEL] "Diagnostics written to stderr: error, warn, info, debug, trace")
                .value_parser(clap::value_parser!(Level))
                .default_value("warn")
                .global(true),
        )
        .subcommand(
            Command::new("solve")
                .about("Evolves a solution for an instance file")
                .arg(arg!(<INPUT> "Path to the instance file").value_parser(clap::value_parser!(PathBuf)))
                .arg(
                    arg!(<GENERATIONS> "Number of generations")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(arg!(<THREADS> "Number of worker threads").value_parser(clap::value_parser!(usize)))
                .arg(arg!(--"show-best" "Print the items selected by the best individual")),
        )
        .subcommand(
            Command::new("generate")
                .about("Writes a random instance to stdout")
                .arg(arg!(<ITEMS> "Number of items, a multiple of 10").value_parser(clap::value_parser!(usize)))
                .arg(arg!(<CAPACITY> "Sack capacity").value_parser(clap::value_parser!(i64)))
                .arg(arg!(--seed [SEED] "Seed for reproducible instances").value_parser(clap::value_parser!(u64)))
                .arg(
                    arg!(--"max-profit" [PROFIT] "Largest item profit")
                        .value_parser(clap::value_parser!(i64).range(1..))
                        .default_value("100"),
                )
                .arg(
                    arg!(--"max-weight" [WEIGHT] "Largest item weight")
                        .value_parser(clap::value_parser!(i64).range(1..))
                        .default_value("100"),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<Level>("log-level")
        .copied()
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<PathBuf>("INPUT").unwrap().clone(),
            *sub_m.get_one::<usize>("GENERATIONS").unwrap(),
            *sub_m.get_one::<usize>("THREADS").unwrap(),
            sub_m.get_flag("show-best"),
        ),
        Some(("generate", sub_m)) => generate(
            *sub_m.get_one::<usize>("ITEMS").unwrap(),
            *sub_m.get_one::<i64>("CAPACITY").unwrap(),
            sub_m.get_one::<u64>("seed").copied(),
            *sub_m.get_one::<i64>("max-profit").unwrap(),
            *sub_m.get_one::<i64>("max-weight").unwrap(),
        ),
        _ => Err(GeneticError::Other("Invalid subcommand".to_string())),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn solve(input: PathBuf, generations: usize, threads: usize, show_best: bool) -> Result<()> {
    let file = File::open(&input).context(format!("Failed to open {}", input.display()))?;
    let instance = read_instance(file)?;

    let options = EvolutionOptions::builder()
        .population_size(instance.catalog.len())
        .sack_capacity(instance.sack_capacity)
        .num_generations(generations)
        .num_workers(threads)
        .build();

    let result = EvolutionLauncher::new(&instance.catalog).evolve_with_sink(&options, &StdoutSink)?;

    if show_best {
        let sack = Knapsack::new(&instance.catalog, instance.sack_capacity);
        let (profit, weight) = sack.totals(&result.best.chromosome)?;
        let selected: Vec<String> = result
            .best
            .chromosome
            .selected()
            .map(|index| index.to_string())
            .collect();
        println!("items: {}", selected.join(" "));
        println!("profit: {} weight: {}/{}", profit, weight, sack.capacity());
    }

    Ok(())
}

fn generate(
    items: usize,
    capacity: i64,
    seed: Option<u64>,
    max_profit: i64,
    max_weight: i64,
) -> Result<()> {
    if items == 0 || items % 10 != 0 {
        return Err(GeneticError::Configuration(format!(
            "Item count must be a positive multiple of 10, got {}",
            items
        )));
    }

    let mut rng = match seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };
    let instance = Instance {
        catalog: Catalog::random(items, max_profit, max_weight, &mut rng),
        sack_capacity: capacity,
    };
    write_instance(io::stdout().lock(), &instance)
}
