use std::path::PathBuf;

use chrono::Utc;
use evoflap_training::simulation::Simulation;

use crate::{config::RunArg, schema::report::TrainingReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    run: RunArg,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 100)]
    generations: u32,
    /// Override the population size from the config
    #[arg(long)]
    population_size: Option<usize>,
    /// Output file path for the JSON report (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        run,
        generations,
        population_size,
        output,
    } = arg;
    util::init_tracing();

    let mut config = run.load_config()?;
    if let Some(size) = population_size {
        config.evolution.population_size = *size;
    }
    config.validate()?;

    let seed = run.seed();
    tracing::debug!(?config, "loaded configuration");
    eprintln!("Training {generations} generations");
    eprintln!("  Seed:       {seed}");
    eprintln!("  Population: {}", config.evolution.population_size);

    let mut sim = Simulation::new(config.world.clone(), config.evolution.clone(), seed)?;
    for _ in 0..*generations {
        sim.run_generation();
    }

    let population = sim.population();
    let restarts = sim.history().iter().filter(|s| s.restarted).count();
    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Best fitness ever: {}", population.best_fitness_ever());
    eprintln!("  Last best:         {}", population.last_best_fitness());
    eprintln!("  Last average:      {}", population.last_average_fitness());
    eprintln!("  Restarts:          {restarts}");
    eprintln!("  Total ticks:       {}", sim.ticks());

    let report = TrainingReport {
        generated_at: Utc::now(),
        seed,
        world: &config.world,
        evolution: &config.evolution,
        total_ticks: sim.ticks(),
        best_fitness_ever: population.best_fitness_ever(),
        generations: sim.history(),
    };
    util::Output::save_json(&report, output.clone())?;

    if let Some(path) = output {
        tracing::info!(path = %path.display(), "report saved");
    }
    Ok(())
}
