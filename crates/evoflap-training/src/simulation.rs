//! Seeded driver that evolves a population on an obstacle course.

use evoflap_engine::{ObstacleCourse, RunSeed, WorldConfig, WorldConfigError};
use rand_pcg::Pcg32;

use crate::{
    params::{EvolutionParams, ParamsError},
    population::Population,
    stats::GenerationSummary,
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SimulationError {
    #[display("invalid world configuration")]
    World(WorldConfigError),
    #[display("invalid evolution parameters")]
    Params(ParamsError),
}

/// Drives a [`Population`] through an [`ObstacleCourse`], one tick at a time.
///
/// All randomness (founder weights, mutations, obstacle gaps) comes from a
/// single generator seeded by [`RunSeed`], so two simulations created with the
/// same inputs produce identical histories.
#[derive(Debug, Clone)]
pub struct Simulation {
    seed: RunSeed,
    rng: Pcg32,
    course: ObstacleCourse,
    population: Population,
    ticks: u64,
    generation_ticks: u64,
    history: Vec<GenerationSummary>,
}

impl Simulation {
    pub fn new(
        world: WorldConfig,
        params: EvolutionParams,
        seed: RunSeed,
    ) -> Result<Self, SimulationError> {
        world.validate()?;
        let mut rng = seed.rng();
        let population = Population::new(world.clone(), params, &mut rng)?;
        let course = ObstacleCourse::new(world, &mut rng);
        Ok(Self {
            seed,
            rng,
            course,
            population,
            ticks: 0,
            generation_ticks: 0,
            history: vec![],
        })
    }

    #[must_use]
    pub fn seed(&self) -> RunSeed {
        self.seed
    }

    #[must_use]
    pub fn world(&self) -> &WorldConfig {
        self.course.world()
    }

    #[must_use]
    pub fn course(&self) -> &ObstacleCourse {
        &self.course
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Total ticks simulated.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks simulated in the current generation.
    #[must_use]
    pub fn generation_ticks(&self) -> u64 {
        self.generation_ticks
    }

    /// Summaries of every finished generation, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    /// Advances the world by one tick.
    ///
    /// Returns the summary of the generation if this tick ended it. The next
    /// generation then starts on a fresh course.
    pub fn tick(&mut self) -> Option<GenerationSummary> {
        let state = self.population.step(&self.course);
        self.course.advance(&mut self.rng);
        self.ticks += 1;
        self.generation_ticks += 1;

        if state.is_running() {
            return None;
        }

        let summary = self.population.end_generation(&mut self.rng);
        self.course.reset(&mut self.rng);
        tracing::info!(
            generation = summary.generation,
            ticks = self.generation_ticks,
            best_fitness = summary.best_fitness,
            average_fitness = summary.average_fitness,
            best_fitness_ever = summary.best_fitness_ever,
            restarted = summary.restarted,
            "generation finished"
        );
        self.generation_ticks = 0;
        self.history.push(summary.clone());
        Some(summary)
    }

    /// Ticks until the current generation ends.
    ///
    /// Terminates because every agent is retired at `max_fitness`.
    pub fn run_generation(&mut self) -> GenerationSummary {
        loop {
            if let Some(summary) = self.tick() {
                return summary;
            }
        }
    }
}
