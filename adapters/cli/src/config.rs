//! TOML configuration for the command-line runner.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_runner_core::SimulationConfig;
use serde::Deserialize;

/// Frame clock and run length settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunnerSettings {
    /// Milliseconds between two ticks.
    pub(crate) frame_millis: u64,
    /// Upper bound on the number of ticks in one run.
    pub(crate) max_ticks: u64,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            frame_millis: 16,
            max_ticks: 10_000,
        }
    }
}

/// Contents of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    /// Simulation constants.
    pub(crate) simulation: SimulationConfig,
    /// Runner settings.
    pub(crate) runner: RunnerSettings,
}

impl FileConfig {
    /// Reads and parses the configuration at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config
            .simulation
            .validate()
            .context("simulation constants out of range")?;
        Ok(config)
    }
}
