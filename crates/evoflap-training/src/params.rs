//! Evolution parameters.

use evoflap_brain::matrix::{Mutation, WeightRange};
use evoflap_engine::WorldConfig;
use serde::{Deserialize, Serialize};

/// Controls how a population is built, evaluated, and reproduced.
///
/// Fields omitted from a deserialized config fall back to
/// [`EvolutionParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Number of agents per generation.
    pub population_size: usize,
    /// Width of the controller's hidden layer.
    pub hidden_nodes: usize,
    /// Bounds for every network weight.
    pub weight_range: WeightRange,
    /// A controller jumps when its output is at least this value.
    pub jump_threshold: f64,
    /// Fraction of the population (rounded down) considered for reproduction.
    pub selection_rate: f64,
    /// Per-weight mutation applied to every offspring.
    pub mutation: Mutation,
    /// Fitness an agent must exceed to reproduce.
    ///
    /// `None` derives the threshold from the world (see [`WorldConfig::min_fitness`]).
    pub min_fitness: Option<u32>,
    /// Agents reaching this fitness are retired so the generation can end.
    pub max_fitness: u32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: 50,
            hidden_nodes: 6,
            weight_range: WeightRange::default(),
            jump_threshold: 0.5,
            selection_rate: 0.04,
            mutation: Mutation {
                rate: 0.03,
                change: 0.03,
            },
            min_fitness: None,
            max_fitness: 10_000,
        }
    }
}

/// Invalid [`EvolutionParams`] value.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("population_size must be at least 1")]
    EmptyPopulation,
    #[display("hidden_nodes must be at least 1")]
    NoHiddenNodes,
    #[display("weight range [{min}, {max}] is empty or not finite")]
    InvalidWeightRange { min: f64, max: f64 },
    #[display("{field} must be within [0, 1] (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[display("mutation change must be non-negative and finite (got {value})")]
    InvalidMutationChange { value: f64 },
    #[display("jump_threshold must be finite (got {value})")]
    InvalidJumpThreshold { value: f64 },
    #[display("max_fitness must be at least 1")]
    ZeroMaxFitness,
}

impl EvolutionParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.population_size == 0 {
            return Err(ParamsError::EmptyPopulation);
        }
        if self.hidden_nodes == 0 {
            return Err(ParamsError::NoHiddenNodes);
        }
        let WeightRange { min, max } = self.weight_range;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(ParamsError::InvalidWeightRange { min, max });
        }
        for (field, value) in [
            ("selection_rate", self.selection_rate),
            ("mutation.rate", self.mutation.rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::RateOutOfRange { field, value });
            }
        }
        if !(self.mutation.change >= 0.0 && self.mutation.change.is_finite()) {
            return Err(ParamsError::InvalidMutationChange {
                value: self.mutation.change,
            });
        }
        if !self.jump_threshold.is_finite() {
            return Err(ParamsError::InvalidJumpThreshold {
                value: self.jump_threshold,
            });
        }
        if self.max_fitness == 0 {
            return Err(ParamsError::ZeroMaxFitness);
        }
        Ok(())
    }

    /// Number of top-ranked agents considered for reproduction.
    ///
    /// `floor(population_size × selection_rate)`.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    #[must_use]
    pub fn elite_count(&self) -> usize {
        let count = (self.population_size as f64 * self.selection_rate).floor() as usize;
        count.min(self.population_size)
    }

    /// Reproduction threshold, derived from `world` unless set explicitly.
    #[must_use]
    pub fn min_fitness(&self, world: &WorldConfig) -> u32 {
        self.min_fitness.unwrap_or_else(|| world.min_fitness())
    }
}
