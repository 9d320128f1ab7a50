//! Ruin-capped parameter recommendation.
//!
//! Picks the (stake, skim) cell with the best downside (10th percentile
//! equity), breaking ties on median equity, among cells whose probability
//! of ending at or below half the start bank is within the cap. When no
//! cell meets the cap, the best p10 across all cells is returned instead.

use tracing::{info, warn};

use crate::sim::SweepResults;
use crate::types::{CellStats, GridKey, SimError, SweepCell};

/// Default cap on `prob_half_or_worse`.
pub const DEFAULT_RUIN_CAP: f64 = 0.05;

/// A selected cell of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation<'a> {
    pub cell: &'a SweepCell,
    /// False when no cell met the cap and the fallback rule picked this one.
    pub within_cap: bool,
}

impl<'a> Recommendation<'a> {
    pub fn key(&self) -> GridKey {
        self.cell.key
    }

    pub fn stats(&self) -> &'a CellStats {
        &self.cell.stats
    }
}

/// Select the best cell of `results` under `ruin_cap`.
///
/// Ties are resolved in favour of the cell that comes first in grid order.
pub fn recommend(results: &SweepResults, ruin_cap: f64) -> Result<Recommendation<'_>, SimError> {
    if results.is_empty() {
        return Err(SimError::NoData);
    }

    let mut best: Option<&SweepCell> = None;
    for cell in results {
        if cell.stats.prob_half_or_worse > ruin_cap {
            continue;
        }
        let score = (cell.stats.p10_equity, cell.stats.med_equity);
        let better = match best {
            None => true,
            Some(b) => score > (b.stats.p10_equity, b.stats.med_equity),
        };
        if better {
            best = Some(cell);
        }
    }

    if let Some(cell) = best {
        info!(
            key = %cell.key,
            p10 = format!("{:.2}", cell.stats.p10_equity),
            median = format!("{:.2}", cell.stats.med_equity),
            ruin = format!("{:.2}%", cell.stats.prob_half_or_worse * 100.0),
            ruin_cap,
            "Recommendation within ruin cap"
        );
        return Ok(Recommendation { cell, within_cap: true });
    }

    let mut fallback: Option<&SweepCell> = None;
    for cell in results {
        match fallback {
            Some(f) if cell.stats.p10_equity <= f.stats.p10_equity => {}
            _ => fallback = Some(cell),
        }
    }
    let cell = fallback.ok_or(SimError::NoData)?;

    warn!(
        key = %cell.key,
        p10 = format!("{:.2}", cell.stats.p10_equity),
        ruin = format!("{:.2}%", cell.stats.prob_half_or_worse * 100.0),
        ruin_cap,
        "No cell within ruin cap; falling back to best P10"
    );
    Ok(Recommendation { cell, within_cap: false })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
