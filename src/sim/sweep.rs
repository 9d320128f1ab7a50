//! Grid sweep over (stake, skim) pairs.
//!
//! For every stake value (outer loop) and skim value (inner loop) runs
//! `params.runs()` independent months and reduces them to [`CellStats`].
//!
//! In [`SweepMode::Sequential`] (the default) one random stream seeded by
//! `seed` is shared by the whole sweep, so the same seed and grid reproduce
//! the table exactly, while changing the grid shape changes every cell.
//! [`SweepMode::Parallel`] gives each cell its own stream derived from
//! `seed` and the cell's grid index and runs cells on the rayon pool. Its
//! output is reproducible for a given seed and grid but differs from the
//! sequential output.

use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use super::stats::summarise;
use super::trajectory::simulate_month;
use super::{SeededSource, UniformSource};
use crate::types::{CellStats, GridKey, SimParams, SweepCell};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Mapping from grid key to cell statistics, kept in grid order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepResults {
    cells: Vec<SweepCell>,
}

impl SweepResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell. A key already present keeps its position and has its
    /// statistics replaced.
    pub fn insert(&mut self, key: GridKey, stats: CellStats) {
        match self.cells.iter_mut().find(|c| c.key == key) {
            Some(existing) => existing.stats = stats,
            None => self.cells.push(SweepCell { key, stats }),
        }
    }

    pub fn get(&self, key: &GridKey) -> Option<&CellStats> {
        self.cells.iter().find(|c| c.key == *key).map(|c| &c.stats)
    }

    pub fn contains_key(&self, key: &GridKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in grid order.
    pub fn iter(&self) -> std::slice::Iter<'_, SweepCell> {
        self.cells.iter()
    }

    pub fn cells(&self) -> &[SweepCell] {
        &self.cells
    }
}

impl<'a> IntoIterator for &'a SweepResults {
    type Item = &'a SweepCell;
    type IntoIter = std::slice::Iter<'a, SweepCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// How grid cells draw their randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SweepMode {
    /// One stream for the whole sweep, consumed in grid order.
    #[default]
    Sequential,
    /// One independently seeded stream per cell, cells run on rayon.
    Parallel,
}

/// Sweep the full grid sequentially with one shared random stream.
pub fn sweep(params: &SimParams, stake_grid: &[f64], skim_grid: &[f64], seed: u64) -> SweepResults {
    sweep_with_mode(params, stake_grid, skim_grid, seed, SweepMode::Sequential)
}

/// Sweep the full grid in the given mode.
pub fn sweep_with_mode(
    params: &SimParams,
    stake_grid: &[f64],
    skim_grid: &[f64],
    seed: u64,
    mode: SweepMode,
) -> SweepResults {
    let keys: Vec<GridKey> = stake_grid
        .iter()
        .flat_map(|&stake| skim_grid.iter().map(move |&skim| GridKey::new(stake, skim)))
        .collect();

    info!(
        cells = keys.len(),
        runs = params.runs(),
        seed,
        mode = ?mode,
        "Starting sweep"
    );
    let started = Instant::now();

    let computed: Vec<(GridKey, CellStats)> = match mode {
        SweepMode::Sequential => {
            let mut source = SeededSource::new(seed);
            keys.iter()
                .map(|&key| (key, run_cell(params, key, &mut source)))
                .collect()
        }
        SweepMode::Parallel => keys
            .par_iter()
            .enumerate()
            .map(|(index, &key)| {
                let mut source = SeededSource::new(cell_seed(seed, index));
                (key, run_cell(params, key, &mut source))
            })
            .collect(),
    };

    let mut results = SweepResults::new();
    for (key, stats) in computed {
        results.insert(key, stats);
    }

    info!(
        cells = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Sweep complete"
    );
    results
}

/// Run `params.runs()` trajectories for one cell and reduce them.
fn run_cell<S>(params: &SimParams, key: GridKey, source: &mut S) -> CellStats
where
    S: UniformSource + ?Sized,
{
    let runs = params.runs() as usize;
    let mut equities = Vec::with_capacity(runs);
    let mut safes = Vec::with_capacity(runs);
    let mut drawdowns = Vec::with_capacity(runs);

    for _ in 0..runs {
        let out = simulate_month(params, key.stake, key.skim, source);
        equities.push(out.equity);
        safes.push(out.safe);
        drawdowns.push(out.max_dd);
    }

    let stats = summarise(&mut equities, &safes, &drawdowns, params.ruin_line());
    debug!(
        stake_pct = key.stake_pct(),
        skim_pct = key.skim_pct(),
        median = format!("{:.2}", stats.med_equity),
        p10 = format!("{:.2}", stats.p10_equity),
        ruin = format!("{:.2}%", stats.prob_half_or_worse * 100.0),
        "Cell reduced"
    );
    stats
}

/// Per-cell seed for parallel sweeps (SplitMix64 finaliser over seed + index).
fn cell_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
