//! Caveman Simulation runner
//!
//! Runs the tribe for a number of years and optionally writes a JSON report
//! with the yearly statistics and the final population.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use simulation::names::RandomNames;
use simulation::narrator::Narrator;
use simulation::{Caveman, Couple, SharingPolicy, SimulationConfig, SimulationWorld, YearStatistics};

#[derive(Parser, Debug)]
#[command(name = "caveman-sim", about = "Simulate a caveman tribe competing for food")]
struct Args {
    /// JSON file with a `SimulationConfig`; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial number of cavemen
    #[arg(short, long)]
    population: Option<usize>,

    /// Food units per caveman per year
    #[arg(short, long)]
    food_supply: Option<f64>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Let donors feed several cavemen instead of only their favourite
    #[arg(long)]
    waterfall: bool,

    /// Years to simulate
    #[arg(short, long, default_value_t = 100)]
    years: u32,

    /// Print the narrative of every stage
    #[arg(short, long)]
    narrate: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Write the JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    config: &'a SimulationConfig,
    statistics: &'a [YearStatistics],
    population: Vec<Caveman>,
    couples: &'a [Couple],
}

fn load_config(args: &Args) -> anyhow::Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(population) = args.population {
        config.initial_population = population;
    }
    if let Some(food_supply) = args.food_supply {
        config.food_supply_ratio = food_supply;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.waterfall {
        config.sharing = SharingPolicy::Waterfall;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&args)?;
    info!(
        population = config.initial_population,
        food_supply = config.food_supply_ratio,
        years = args.years,
        "Caveman simulation starting..."
    );

    let mut world = SimulationWorld::from_config(config)?;
    if args.narrate {
        world.add_sink(Box::new(Narrator::new(RandomNames)));
    }

    let start = std::time::Instant::now();
    world.run(args.years);
    let elapsed = start.elapsed();

    let last = world.cumulative_statistics().last();
    info!(
        years = world.cumulative_statistics().len(),
        final_population = last.map_or(0, |s| s.population),
        hunger_deaths = world.deaths().hunger,
        old_age_deaths = world.deaths().old_age,
        couples = world.couples().len(),
        "Simulation complete in {:?}",
        elapsed
    );

    if let Some(path) = &args.output {
        let report = Report {
            config: world.config(),
            statistics: world.cumulative_statistics(),
            population: world.current_population_snapshot(),
            couples: world.couples(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
