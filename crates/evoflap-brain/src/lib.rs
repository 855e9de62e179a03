//! Neural controllers that decide when an agent jumps.
//!
//! A controller is a fixed-topology feedforward network with one hidden layer:
//!
//! ```text
//! sensor input (3) ──W_hidden──▶ sigmoid (HIDDEN) ──W_output──▶ sigmoid (1) ──▶ jump score
//! ```
//!
//! - [`sensor`] - Maps raw world coordinates to the three network inputs
//! - [`matrix`] - Owned weight matrices, random initialization, and mutation
//! - [`controller`] - The network itself (founder and offspring construction, forward pass)
//!
//! # Genetic Variation
//!
//! Controllers never change after construction. Variation comes only from building
//! an offspring: the parent's matrices are deep-copied and a random subset of the
//! entries is perturbed within [`Mutation::change`](matrix::Mutation::change). There
//! is no crossover.
//!
//! # Example
//!
//! ```
//! use evoflap_brain::{
//!     controller::NeuralController,
//!     matrix::{Mutation, WeightRange},
//!     sensor::SensorInput,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(42);
//! let range = WeightRange::default();
//! let parent = NeuralController::founder(6, range, &mut rng);
//! let child = parent.offspring(Mutation { rate: 0.03, change: 0.03 }, range, &mut rng);
//!
//! let input = SensorInput::new([0.4, 0.5, 0.9]);
//! let score = child.decide(&input);
//! assert!((0.0..=1.0).contains(&score));
//! ```

pub mod controller;
pub mod matrix;
pub mod sensor;
