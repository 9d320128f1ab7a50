//! Sweep reports: ranked result rows, text table, JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write as _};
use uuid::Uuid;

use crate::sim::{RiskProfile, SweepMode, SweepResults};
use crate::strategy::Recommendation;
use crate::types::{GridKey, SimParams};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One display row of the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub stake_pct: i64,
    pub skim_pct: i64,
    pub med_equity: f64,
    pub avg_equity: f64,
    pub p10_equity: f64,
    pub p90_equity: f64,
    pub best: f64,
    pub worst: f64,
    pub avg_safe: f64,
    pub prob_half_or_worse: f64,
    pub avg_dd: f64,
}

/// Rows sorted by median equity, highest first. Equal medians keep grid order.
pub fn rank_by_median(results: &SweepResults) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = results
        .iter()
        .map(|c| ReportRow {
            stake_pct: c.key.stake_pct(),
            skim_pct: c.key.skim_pct(),
            med_equity: round2(c.stats.med_equity),
            avg_equity: round2(c.stats.avg_equity),
            p10_equity: round2(c.stats.p10_equity),
            p90_equity: round2(c.stats.p90_equity),
            best: round2(c.stats.best),
            worst: round2(c.stats.worst),
            avg_safe: round2(c.stats.avg_safe),
            prob_half_or_worse: c.stats.prob_half_or_worse,
            avg_dd: c.stats.avg_dd,
        })
        .collect();

    rows.sort_by(|a, b| b.med_equity.total_cmp(&a.med_equity));
    rows
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Fixed-width text table of ranked rows.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>7} {:>6} {:>12} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9} {:>8}",
        "Stake%", "Skim%", "Median", "Avg", "P10", "P90", "Best", "Worst", "AvgSafe", "P<=50%", "AvgDD"
    );
    let _ = writeln!(out, "{}", "-".repeat(115));
    for r in rows {
        let _ = writeln!(
            out,
            "{:>7} {:>6} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.2}% {:>7.2}%",
            r.stake_pct,
            r.skim_pct,
            r.med_equity,
            r.avg_equity,
            r.p10_equity,
            r.p90_equity,
            r.best,
            r.worst,
            r.avg_safe,
            r.prob_half_or_worse * 100.0,
            r.avg_dd * 100.0,
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Report document
// ---------------------------------------------------------------------------

/// Full result of one sweep-and-recommend invocation.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub params: SimParams,
    pub seed: u64,
    pub mode: SweepMode,
    pub ruin_cap: f64,
    pub rows: Vec<ReportRow>,
    pub recommendation: RecommendedPair,
    pub profile: Option<RiskProfile>,
}

/// Owned copy of the selected cell for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedPair {
    pub key: GridKey,
    pub stake_pct: i64,
    pub skim_pct: i64,
    pub p10_equity: f64,
    pub med_equity: f64,
    pub avg_dd: f64,
    pub prob_half_or_worse: f64,
    pub within_cap: bool,
}

impl From<&Recommendation<'_>> for RecommendedPair {
    fn from(rec: &Recommendation<'_>) -> Self {
        let s = rec.stats();
        Self {
            key: rec.key(),
            stake_pct: rec.key().stake_pct(),
            skim_pct: rec.key().skim_pct(),
            p10_equity: s.p10_equity,
            med_equity: s.med_equity,
            avg_dd: s.avg_dd,
            prob_half_or_worse: s.prob_half_or_worse,
            within_cap: rec.within_cap,
        }
    }
}

impl fmt::Display for RecommendedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stake {}% and skim {}% (P10={:.2}, Median={:.2}, Avg DD={:.2}%, Prob<=50% start={:.2}%)",
            self.stake_pct,
            self.skim_pct,
            self.p10_equity,
            self.med_equity,
            self.avg_dd * 100.0,
            self.prob_half_or_worse * 100.0,
        )?;
        if !self.within_cap {
            write!(f, " [no pair met the ruin cap]")?;
        }
        Ok(())
    }
}

impl SweepReport {
    pub fn new(
        params: &SimParams,
        seed: u64,
        mode: SweepMode,
        ruin_cap: f64,
        results: &SweepResults,
        recommendation: &Recommendation<'_>,
        profile: Option<RiskProfile>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            params: params.clone(),
            seed,
            mode,
            ruin_cap,
            rows: rank_by_median(results),
            recommendation: recommendation.into(),
            profile,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tipster strategy sweep {} ({})", self.run_id, self.params)?;
        writeln!(f)?;
        write!(f, "{}", render_table(&self.rows))?;
        writeln!(f)?;
        writeln!(f, "Recommendation: {}", self.recommendation)?;
        if let Some(p) = &self.profile {
            writeln!(
                f,
                "Risk profile ({} months): mean={:.2} P10={:.2} median={:.2} P90={:.2}",
                p.samples, p.mean, p.p10, p.median, p.p90
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::recommend;
    use crate::types::CellStats;

    fn cell(med: f64, p10: f64, ruin: f64) -> CellStats {
        CellStats {
            avg_equity: med + 1.0,
            med_equity: med,
            p10_equity: p10,
            p90_equity: med + 50.0,
            best: med + 100.0,
            worst: p10 - 10.0,
            avg_safe: 12.346,
            prob_half_or_worse: ruin,
            avg_dd: 0.125,
        }
    }

    fn sample_results() -> SweepResults {
        let mut r = SweepResults::new();
        r.insert(GridKey::new(0.05, 0.1), cell(260.111, 240.0, 0.0));
        r.insert(GridKey::new(0.15, 0.1), cell(310.0, 200.0, 0.02));
        r.insert(GridKey::new(0.25, 0.3), cell(300.0, 150.0, 0.12));
        r
    }

    #[test]
    fn test_rows_ranked_by_median() {
        let rows = rank_by_median(&sample_results());
        let order: Vec<i64> = rows.iter().map(|r| r.stake_pct).collect();
        assert_eq!(order, vec![15, 25, 5]);
        assert_eq!(rows[2].med_equity, 260.11);
        assert_eq!(rows[2].avg_safe, 12.35);
        assert_eq!(rows[1].skim_pct, 30);
    }

    #[test]
    fn test_table_has_row_per_cell() {
        let rows = rank_by_median(&sample_results());
        let table = render_table(&rows);
        assert_eq!(table.lines().count(), 2 + rows.len());
        assert!(table.contains("12.00%"));
    }

    #[test]
    fn test_report_json_contains_recommendation() {
        let results = sample_results();
        let rec = recommend(&results, 0.05).unwrap();
        let report = SweepReport::new(
            &SimParams::default(),
            42,
            SweepMode::Sequential,
            0.05,
            &results,
            &rec,
            None,
        );
        assert_eq!(report.recommendation.stake_pct, 5);
        assert!(report.recommendation.within_cap);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["seed"], 42);
        assert_eq!(json["mode"], "Sequential");
        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
        assert_eq!(json["recommendation"]["skim_pct"], 10);
        assert_eq!(json["params"]["runs"], 20000);
        assert!(json["profile"].is_null());
    }

    #[test]
    fn test_fallback_flagged_in_display() {
        let mut results = SweepResults::new();
        results.insert(GridKey::new(0.5, 0.0), cell(100.0, 20.0, 0.6));
        let rec = recommend(&results, 0.05).unwrap();
        let pair = RecommendedPair::from(&rec);
        assert!(pair.to_string().contains("no pair met the ruin cap"));
    }
}
