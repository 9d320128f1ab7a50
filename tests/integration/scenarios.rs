//! Hand-checkable single-bet scenarios through the public API.

use tipster_sim::sim::{simulate_month, sweep, SeededSource};
use tipster_sim::strategy::{recommend, DEFAULT_RUIN_CAP};
use tipster_sim::types::{GridKey, SimParams};

fn one_bet(p_win: f64) -> SimParams {
    SimParams::new(p_win, 2.0, 1, 1, 1, 100.0).unwrap()
}

#[test]
fn test_always_win_single_bet() {
    let out = simulate_month(&one_bet(1.0), 0.1, 0.0, &mut SeededSource::new(42));
    assert!((out.bank - 110.0).abs() < 1e-9);
    assert!((out.equity - 110.0).abs() < 1e-9);
    assert_eq!(out.max_dd, 0.0);
}

#[test]
fn test_always_lose_single_bet() {
    let out = simulate_month(&one_bet(0.0), 0.1, 0.0, &mut SeededSource::new(42));
    assert!((out.bank - 90.0).abs() < 1e-9);
    assert!((out.equity - 90.0).abs() < 1e-9);
}

#[test]
fn test_full_skim_single_bet() {
    let out = simulate_month(&one_bet(1.0), 0.5, 1.0, &mut SeededSource::new(42));
    assert_eq!(out.bank, 0.0);
    assert!((out.safe - 150.0).abs() < 1e-9);
    assert!((out.equity - 150.0).abs() < 1e-9);
}

#[test]
fn test_deterministic_grid_recommends_largest_stake() {
    // Every bet wins, so equity grows with stake and nothing approaches ruin.
    let params = SimParams::new(1.0, 2.0, 2, 2, 3, 100.0).unwrap();
    let results = sweep(&params, &[0.05, 0.10, 0.20], &[0.0, 0.5], 1);
    assert_eq!(results.len(), 6);

    let cell = results.get(&GridKey::new(0.20, 0.0)).unwrap();
    // 100 × 1.2^4
    assert!((cell.med_equity - 207.36).abs() < 1e-9);
    assert_eq!(cell.p10_equity, cell.p90_equity);
    assert_eq!(cell.prob_half_or_worse, 0.0);

    let rec = recommend(&results, DEFAULT_RUIN_CAP).unwrap();
    assert_eq!(rec.key(), GridKey::new(0.20, 0.0));
    assert!(rec.within_cap);
}

#[test]
fn test_deterministic_ruin_forces_fallback() {
    // Every bet loses: 50% stake halves the bank on the first bet.
    let params = SimParams::new(0.0, 2.0, 1, 1, 4, 100.0).unwrap();
    let results = sweep(&params, &[0.5, 0.6], &[0.0], 9);
    assert!(results.iter().all(|c| c.stats.prob_half_or_worse == 1.0));

    let rec = recommend(&results, DEFAULT_RUIN_CAP).unwrap();
    assert_eq!(rec.key(), GridKey::new(0.5, 0.0));
    assert!(!rec.within_cap);
}
