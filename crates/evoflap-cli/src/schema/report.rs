use chrono::{DateTime, Utc};
use evoflap_engine::{RunSeed, WorldConfig};
use evoflap_training::{params::EvolutionParams, stats::GenerationSummary};
use serde::Serialize;

/// Statistics written by `evoflap train`. No weights are stored.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub seed: RunSeed,
    pub world: &'a WorldConfig,
    pub evolution: &'a EvolutionParams,
    pub total_ticks: u64,
    pub best_fitness_ever: u32,
    pub generations: &'a [GenerationSummary],
}
