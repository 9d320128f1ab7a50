//! Risk profile of a single (stake, skim) pair.
//!
//! Draws raw monthly equity samples outside the aggregated sweep, for
//! callers that want the whole distribution (e.g. to chart it), and bins
//! them into equal-width buckets.

use serde::Serialize;
use tracing::debug;

use super::stats::{mean, median_sorted, percentile_sorted};
use super::trajectory::simulate_month;
use super::{SeededSource, UniformSource};
use crate::types::{GridKey, SimParams};

/// Number of buckets used when none is configured.
pub const DEFAULT_BINS: usize = 60;

/// `params.runs()` raw month-end equities for one pair.
pub fn equity_samples<S>(params: &SimParams, key: GridKey, source: &mut S) -> Vec<f64>
where
    S: UniformSource + ?Sized,
{
    (0..params.runs())
        .map(|_| simulate_month(params, key.stake, key.skim, source).equity)
        .collect()
}

/// One equal-width histogram bucket. `upper` is exclusive except for the last bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bin samples into `bins` equal-width buckets spanning [min, max].
///
/// A sample set with zero spread is widened to [v − 0.5, v + 0.5].
pub fn histogram(samples: &[f64], bins: usize) -> Vec<HistogramBucket> {
    if samples.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in samples {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

/// Distribution summary of a pair's month-end equity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskProfile {
    pub key: GridKey,
    pub samples: usize,
    pub mean: f64,
    pub p10: f64,
    pub median: f64,
    pub p90: f64,
    pub histogram: Vec<HistogramBucket>,
}

impl RiskProfile {
    /// Sample `params.runs()` months on a fresh stream seeded by `seed`.
    pub fn sample(params: &SimParams, key: GridKey, seed: u64, bins: usize) -> Self {
        let mut source = SeededSource::new(seed);
        let samples = equity_samples(params, key, &mut source);
        Self::from_samples(key, samples, bins)
    }

    pub fn from_samples(key: GridKey, mut samples: Vec<f64>, bins: usize) -> Self {
        let histogram = histogram(&samples, bins);
        let avg = mean(&samples);
        samples.sort_by(f64::total_cmp);

        let profile = Self {
            key,
            samples: samples.len(),
            mean: avg,
            p10: percentile_sorted(&samples, 10.0),
            median: median_sorted(&samples),
            p90: percentile_sorted(&samples, 90.0),
            histogram,
        };
        debug!(key = %key, samples = profile.samples, median = profile.median, "Risk profile built");
        profile
    }
}
