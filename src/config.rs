//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section has defaults, so a partial file (or none at all) is usable.
//! Range checks happen when converting into engine types, not at parse time.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use crate::sim::profile::DEFAULT_BINS;
use crate::sim::SweepMode;
use crate::strategy::{PercentRange, DEFAULT_RUIN_CAP};
use crate::types::{SimError, SimParams};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub grid: GridConfig,
    pub recommend: RecommendConfig,
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Prediction accuracy, i.e. per-bet win probability.
    pub p_win: f64,
    /// Average decimal odds.
    pub odds: f64,
    pub matches_per_day: u32,
    pub days_per_month: u32,
    /// Monte Carlo runs per grid cell.
    pub runs: u32,
    pub start_bank: f64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let d = SimParams::default();
        Self {
            p_win: d.p_win(),
            odds: d.odds(),
            matches_per_day: d.matches_per_day(),
            days_per_month: d.days_per_month(),
            runs: d.runs(),
            start_bank: d.start_bank(),
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn params(&self) -> Result<SimParams, SimError> {
        SimParams::new(
            self.p_win,
            self.odds,
            self.matches_per_day,
            self.days_per_month,
            self.runs,
            self.start_bank,
        )
    }
}

/// Grid axes. A range table may set any subset of `min`, `max` and `step`;
/// the rest come from that axis' default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    #[serde(deserialize_with = "stake_range")]
    pub stake: PercentRange,
    #[serde(deserialize_with = "skim_range")]
    pub skim: PercentRange,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            stake: PercentRange::new(5, 25, 5),
            skim: PercentRange::new(10, 30, 5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PartialRange {
    min: Option<u32>,
    max: Option<u32>,
    step: Option<u32>,
}

impl PartialRange {
    fn or(self, base: PercentRange) -> PercentRange {
        PercentRange::new(
            self.min.unwrap_or(base.min),
            self.max.unwrap_or(base.max),
            self.step.unwrap_or(base.step),
        )
    }
}

fn stake_range<'de, D: Deserializer<'de>>(de: D) -> Result<PercentRange, D::Error> {
    Ok(PartialRange::deserialize(de)?.or(GridConfig::default().stake))
}

fn skim_range<'de, D: Deserializer<'de>>(de: D) -> Result<PercentRange, D::Error> {
    Ok(PartialRange::deserialize(de)?.or(GridConfig::default().skim))
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RecommendConfig {
    pub ruin_cap: f64,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            ruin_cap: DEFAULT_RUIN_CAP,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    /// Run cells on the rayon pool with per-cell streams. Results are
    /// reproducible but differ from the sequential single-stream sweep.
    pub parallel: bool,
}

impl SweepConfig {
    pub fn mode(&self) -> SweepMode {
        if self.parallel {
            SweepMode::Parallel
        } else {
            SweepMode::Sequential
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Sample a risk profile of the recommended pair.
    pub profile: bool,
    pub histogram_bins: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            profile: true,
            histogram_bins: DEFAULT_BINS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated simulation parameters.
    pub fn params(&self) -> Result<SimParams> {
        self.simulation
            .params()
            .context("Invalid [simulation] section")
    }

    /// Stake and skim axes as fractions.
    pub fn grids(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        let stake = self.grid.stake.fractions().context("Invalid [grid.stake] range")?;
        let skim = self.grid.skim.fractions().context("Invalid [grid.skim] range")?;
        Ok((stake, skim))
    }
}
