use std::path::{Path, PathBuf};

use anyhow::Context as _;
use evoflap_engine::{RunSeed, WorldConfig};
use evoflap_training::params::EvolutionParams;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::util;

/// Contents of a `--config` file.
///
/// ```json
/// { "world": { "pipe_gap": 220.0 }, "evolution": { "population_size": 80 } }
/// ```
///
/// Omitted sections and fields keep their defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub world: WorldConfig,
    pub evolution: EvolutionParams,
}

impl RunConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config: Self = util::read_json_file("config", path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.world
            .validate()
            .context("Invalid world configuration")?;
        self.evolution
            .validate()
            .context("Invalid evolution parameters")?;
        Ok(())
    }
}

/// Arguments shared by every command.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<RunSeed>,
    /// JSON file with `world` and `evolution` settings
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RunArg {
    pub fn seed(&self) -> RunSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub fn load_config(&self) -> anyhow::Result<RunConfig> {
        RunConfig::load(self.config.as_deref())
    }
}
