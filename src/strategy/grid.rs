//! Percent-step grid axes.

use serde::{Deserialize, Serialize};

use crate::types::SimError;

/// An inclusive arithmetic range of whole percents, e.g. 5..=25 step 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PercentRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl PercentRange {
    pub fn new(min: u32, max: u32, step: u32) -> Self {
        Self { min, max, step }
    }

    /// Expand into fractions: `min/100, (min+step)/100, …` while `<= max`.
    pub fn fractions(&self) -> Result<Vec<f64>, SimError> {
        if self.step == 0 {
            return Err(SimError::InvalidGrid("step must be at least 1".into()));
        }
        if self.min > self.max {
            return Err(SimError::InvalidGrid(format!(
                "min {}% exceeds max {}%",
                self.min, self.max
            )));
        }
        if self.max > 100 {
            return Err(SimError::InvalidGrid(format!(
                "max {}% exceeds 100%",
                self.max
            )));
        }

        Ok((self.min..=self.max)
            .step_by(self.step as usize)
            .map(|pct| pct as f64 / 100.0)
            .collect())
    }
}
