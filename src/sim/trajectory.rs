//! Single-month trajectory simulator.
//!
//! Every match stakes a fixed fraction of the current working bank at the
//! configured decimal odds. After the last match of each day a fixed
//! fraction of the bank is skimmed into a safe pot that is never staked.

use tracing::trace;

use super::UniformSource;
use crate::types::{SimParams, TrajectoryResult};

/// Simulate one month of betting for a (stake, skim) pair.
///
/// Fractions are used as given: callers are responsible for keeping them in
/// [0, 1]. The bank is allowed to go negative. Consumes exactly
/// `params.bets_per_month()` draws from `source`.
///
/// Running peak/trough equity is sampled after each bet only, starting from
/// the first resolved bet; the opening bank is not a sample. Skim transfers
/// move value between bank and safe pot without touching total equity and
/// are not sampled.
pub fn simulate_month<S>(
    params: &SimParams,
    stake_frac: f64,
    skim_frac: f64,
    source: &mut S,
) -> TrajectoryResult
where
    S: UniformSource + ?Sized,
{
    let win_multiple = params.odds() - 1.0;
    let mut bank = params.start_bank();
    let mut safe = 0.0_f64;
    // (peak, trough) of post-bet equity
    let mut extremes: Option<(f64, f64)> = None;

    for _day in 0..params.days_per_month() {
        for _match in 0..params.matches_per_day() {
            let stake = bank * stake_frac;
            if source.next_uniform() < params.p_win() {
                bank += stake * win_multiple;
            } else {
                bank -= stake;
            }

            let equity = bank + safe;
            extremes = Some(match extremes {
                None => (equity, equity),
                Some((peak, trough)) => (peak.max(equity), trough.min(equity)),
            });
        }

        let skim_amt = bank * skim_frac;
        bank -= skim_amt;
        safe += skim_amt;
    }

    // matches_per_day and days_per_month are at least 1, so a bet was sampled
    let (max_equity, min_equity) = extremes.unwrap_or((bank, bank));
    let max_dd = if max_equity == 0.0 {
        0.0
    } else {
        (max_equity - min_equity) / max_equity
    };

    trace!(bank, safe, max_equity, min_equity, max_dd, "Month simulated");

    TrajectoryResult {
        bank,
        safe,
        equity: bank + safe,
        max_dd,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
