//! Sample statistics used to reduce trajectory batches.

use crate::types::CellStats;

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile `q` (0–100) of an ascending-sorted slice.
///
/// Linear interpolation between the two nearest order statistics at rank
/// `q / 100 × (n − 1)`, lerping from the nearer endpoint so results are
/// bit-compatible with numpy's default `linear` method. Returns 0 for an
/// empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            let (a, b) = (sorted[lo], sorted[hi]);
            let diff = b - a;
            if frac >= 0.5 {
                b - diff * (1.0 - frac)
            } else {
                a + diff * frac
            }
        }
    }
}

/// Median of an ascending-sorted slice: the middle element, or the mean of
/// the two middle elements for an even length. Returns 0 for an empty slice.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Reduce per-run samples of one grid cell into [`CellStats`].
///
/// `equities` is sorted in place. `ruin_line` is the equity level at or
/// below which a run counts towards `prob_half_or_worse`.
pub fn summarise(equities: &mut [f64], safes: &[f64], drawdowns: &[f64], ruin_line: f64) -> CellStats {
    let avg_equity = mean(equities);
    let ruined = equities.iter().filter(|&&e| e <= ruin_line).count();
    let prob_half_or_worse = if equities.is_empty() {
        0.0
    } else {
        ruined as f64 / equities.len() as f64
    };

    equities.sort_by(f64::total_cmp);

    CellStats {
        avg_equity,
        med_equity: median_sorted(equities),
        p10_equity: percentile_sorted(equities, 10.0),
        p90_equity: percentile_sorted(equities, 90.0),
        best: equities.last().copied().unwrap_or(0.0),
        worst: equities.first().copied().unwrap_or(0.0),
        avg_safe: mean(safes),
        prob_half_or_worse,
        avg_dd: mean(drawdowns),
    }
}
