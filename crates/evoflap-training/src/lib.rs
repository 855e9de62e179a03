//! Neuroevolution of flappy-bird agents.
//!
//! Builds on the world model in [`evoflap_engine`] and the controllers in
//! [`evoflap_brain`]:
//!
//! - [`agent`] - One bird: physics, fitness, and who pilots it
//! - [`environment`] - The [`Environment`](environment::Environment) seam a population is evaluated against
//! - [`population`] - Selection and reproduction across generations
//! - [`params`] - Tunable evolution parameters
//! - [`stats`] - Per-generation fitness statistics
//! - [`simulation`] - Seeded driver tying a population to an obstacle course
//! - [`manual`] - Keyboard-controlled single-player game
//!
//! # Example
//!
//! ```
//! use evoflap_engine::{RunSeed, WorldConfig};
//! use evoflap_training::{params::EvolutionParams, simulation::Simulation};
//!
//! let params = EvolutionParams {
//!     population_size: 8,
//!     max_fitness: 500,
//!     ..EvolutionParams::default()
//! };
//! let seed = RunSeed::from_bytes([42; 16]);
//! let mut sim = Simulation::new(WorldConfig::default(), params, seed)?;
//!
//! let summary = sim.run_generation();
//! assert_eq!(summary.generation, 1);
//! assert!(summary.best_fitness <= 500);
//! # Ok::<(), evoflap_training::simulation::SimulationError>(())
//! ```

pub mod agent;
pub mod environment;
pub mod manual;
pub mod params;
pub mod population;
pub mod simulation;
pub mod stats;
