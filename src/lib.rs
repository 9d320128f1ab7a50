//! Tipster strategy simulator.
//!
//! Monte Carlo estimate of a fixed-fraction betting strategy with daily
//! profit skimming, swept over a stake × skim grid, with a ruin-capped
//! recommendation. Library crate exposing all modules for use by
//! integration tests and the binary entry point.

pub mod config;
pub mod report;
pub mod sim;
pub mod strategy;
pub mod types;
