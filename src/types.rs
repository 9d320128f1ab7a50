//! Shared types for the tipster simulator.
//!
//! These types form the data model used across the simulation, sweep,
//! and recommendation modules. `SimParams` is the only validated type;
//! everything else is produced by the engine itself.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

/// Immutable configuration of one simulated betting month.
///
/// Built through [`SimParams::new`], which rejects out-of-range fields.
/// Fields are private so a constructed value can never drift out of range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimParams {
    p_win: f64,
    odds: f64,
    matches_per_day: u32,
    days_per_month: u32,
    runs: u32,
    start_bank: f64,
}

impl SimParams {
    /// Validate and build a parameter set.
    ///
    /// `p_win` is accepted on the closed interval [0, 1] so the degenerate
    /// always-win / always-lose cases stay expressible.
    pub fn new(
        p_win: f64,
        odds: f64,
        matches_per_day: u32,
        days_per_month: u32,
        runs: u32,
        start_bank: f64,
    ) -> Result<Self, SimError> {
        if !(0.0..=1.0).contains(&p_win) {
            return Err(SimError::invalid("p_win", format!("must be within [0, 1], got {p_win}")));
        }
        if !odds.is_finite() || odds <= 1.0 {
            return Err(SimError::invalid("odds", format!("decimal odds must be > 1, got {odds}")));
        }
        if matches_per_day == 0 {
            return Err(SimError::invalid("matches_per_day", "must be at least 1"));
        }
        if days_per_month == 0 {
            return Err(SimError::invalid("days_per_month", "must be at least 1"));
        }
        if runs == 0 {
            return Err(SimError::invalid("runs", "must be at least 1"));
        }
        if !start_bank.is_finite() || start_bank <= 0.0 {
            return Err(SimError::invalid(
                "start_bank",
                format!("must be a positive amount, got {start_bank}"),
            ));
        }

        Ok(Self {
            p_win,
            odds,
            matches_per_day,
            days_per_month,
            runs,
            start_bank,
        })
    }

    pub fn p_win(&self) -> f64 {
        self.p_win
    }

    pub fn odds(&self) -> f64 {
        self.odds
    }

    pub fn matches_per_day(&self) -> u32 {
        self.matches_per_day
    }

    pub fn days_per_month(&self) -> u32 {
        self.days_per_month
    }

    /// Trajectories sampled per grid cell.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn start_bank(&self) -> f64 {
        self.start_bank
    }

    /// Bets resolved in one simulated month (= uniform draws consumed).
    pub fn bets_per_month(&self) -> u64 {
        u64::from(self.matches_per_day) * u64::from(self.days_per_month)
    }

    /// Equity at or below this level counts towards `prob_half_or_worse`.
    pub fn ruin_line(&self) -> f64 {
        self.start_bank * 0.5
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            p_win: 0.78,
            odds: 1.90,
            matches_per_day: 10,
            days_per_month: 4,
            runs: 20_000,
            start_bank: 250.0,
        }
    }
}

impl fmt::Display for SimParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p_win={:.0}% odds={:.2} {}x{} bets/month runs={} bank={:.2}",
            self.p_win * 100.0,
            self.odds,
            self.matches_per_day,
            self.days_per_month,
            self.runs,
            self.start_bank,
        )
    }
}

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

/// Outcome of one simulated month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryResult {
    /// Working bank at month end (may be negative).
    pub bank: f64,
    /// Skimmed profits set aside, never staked again.
    pub safe: f64,
    /// `bank + safe`
    pub equity: f64,
    /// (peak − trough) / peak of equity observed after each bet.
    pub max_dd: f64,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A (stake fraction, skim fraction) grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridKey {
    pub stake: f64,
    pub skim: f64,
}

impl GridKey {
    pub fn new(stake: f64, skim: f64) -> Self {
        Self { stake, skim }
    }

    /// Stake as a whole percent (0.15 → 15).
    pub fn stake_pct(&self) -> i64 {
        (self.stake * 100.0).round() as i64
    }

    /// Skim as a whole percent.
    pub fn skim_pct(&self) -> i64 {
        (self.skim * 100.0).round() as i64
    }
}

impl fmt::Display for GridKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stake {}% / skim {}%", self.stake_pct(), self.skim_pct())
    }
}

/// Equity distribution statistics for one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellStats {
    pub avg_equity: f64,
    pub med_equity: f64,
    pub p10_equity: f64,
    pub p90_equity: f64,
    pub best: f64,
    pub worst: f64,
    pub avg_safe: f64,
    /// Share of runs ending with equity at or below half the start bank.
    pub prob_half_or_worse: f64,
    pub avg_dd: f64,
}

impl fmt::Display for CellStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P10={:.2} Median={:.2} Avg={:.2} Avg DD={:.2}% Prob<=50% start={:.2}%",
            self.p10_equity,
            self.med_equity,
            self.avg_equity,
            self.avg_dd * 100.0,
            self.prob_half_or_worse * 100.0,
        )
    }
}

/// One entry of a sweep: the grid coordinate and its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepCell {
    pub key: GridKey,
    pub stats: CellStats,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the simulator.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParam { field: &'static str, reason: String },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("No sweep results to recommend from")]
    NoData,
}

impl SimError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParam {
            field,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
