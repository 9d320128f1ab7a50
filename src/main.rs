//! Tipster strategy simulator — command-line entry point.
//!
//! Loads configuration, initialises structured logging, runs the stake ×
//! skim sweep, recommends a pair under the ruin cap, and prints the ranked
//! table (or a JSON report).

use anyhow::{Context, Result};
use tracing::info;

use tipster_sim::config::{self, OutputFormat};
use tipster_sim::report::SweepReport;
use tipster_sim::sim::{sweep_with_mode, RiskProfile};
use tipster_sim::strategy::recommend;

const DEFAULT_CONFIG: &str = "config.toml";

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let path = std::env::args().nth(1);
    let cfg = match path.as_deref() {
        Some(p) => config::AppConfig::load(p)?,
        None => config::AppConfig::load_or_default(DEFAULT_CONFIG)?,
    };

    let params = cfg.params()?;
    let (stake_grid, skim_grid) = cfg.grids()?;
    let seed = cfg.simulation.seed;
    let mode = cfg.sweep.mode();

    info!(
        params = %params,
        stake_points = stake_grid.len(),
        skim_points = skim_grid.len(),
        seed,
        "Running Monte Carlo sweep"
    );

    let results = sweep_with_mode(&params, &stake_grid, &skim_grid, seed, mode);
    let rec = recommend(&results, cfg.recommend.ruin_cap)
        .context("Grid produced no cells; widen [grid] ranges")?;

    let profile = cfg
        .output
        .profile
        .then(|| RiskProfile::sample(&params, rec.key(), seed, cfg.output.histogram_bins));

    let report = SweepReport::new(
        &params,
        seed,
        mode,
        cfg.recommend.ruin_cap,
        &results,
        &rec,
        profile,
    );

    match cfg.output.format {
        OutputFormat::Table => println!("{report}"),
        OutputFormat::Json => println!("{}", report.to_json().context("Failed to serialise report")?),
    }

    info!(
        run_id = %report.run_id,
        stake_pct = report.recommendation.stake_pct,
        skim_pct = report.recommendation.skim_pct,
        within_cap = report.recommendation.within_cap,
        "Done"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so stdout carries
/// only the report.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tipster_sim=info"));

    let json_logging = std::env::var("TIPSTER_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
