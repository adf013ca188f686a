//! Underwriting assumptions held fixed across every scenario
//!
//! The deal inputs a user varies live in [`crate::deal::ScenarioInputs`]; the
//! values here describe the house underwriting model (going-in yield, leverage
//! and projection horizon) and only change through an explicit override file.

use crate::error::{Result, ScenarioError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Going-in cap rate applied to the purchase price to seed year-0 NOI
pub const DEFAULT_GOING_IN_CAP_RATE: f64 = 0.055;

/// Fraction of the purchase price financed with interest-only debt
pub const DEFAULT_LOAN_TO_VALUE: f64 = 0.70;

/// Number of years every projection covers, independent of hold period
pub const DEFAULT_PROJECTION_YEARS: u32 = 7;

/// Longest horizon an override file may request
pub const MAX_PROJECTION_YEARS: u32 = 50;

/// Container for the fixed underwriting assumptions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnderwritingAssumptions {
    /// Going-in cap rate as a decimal (0.055 = 5.5%)
    pub going_in_cap_rate: f64,

    /// Loan-to-value as a decimal; the loan never amortizes
    pub loan_to_value: f64,

    /// Projection horizon in years
    pub projection_years: u32,
}

impl UnderwritingAssumptions {
    /// House defaults: 5.5% going-in yield, 70% LTV, 7-year horizon
    pub fn default_underwriting() -> Self {
        Self {
            going_in_cap_rate: DEFAULT_GOING_IN_CAP_RATE,
            loan_to_value: DEFAULT_LOAN_TO_VALUE,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }

    /// Load assumptions from a JSON file; omitted keys keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let assumptions: Self = serde_json::from_reader(BufReader::new(file))?;
        assumptions.validate()?;
        debug!("Loaded underwriting assumptions from {}: {:?}", path.display(), assumptions);
        Ok(assumptions)
    }

    /// Reject assumption sets that would make the projection meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.going_in_cap_rate.is_finite() || self.going_in_cap_rate < 0.0 {
            return Err(ScenarioError::invalid(
                "going_in_cap_rate",
                format!("must be a finite, non-negative decimal (got {})", self.going_in_cap_rate),
            ));
        }
        if !self.loan_to_value.is_finite() || !(0.0..=1.0).contains(&self.loan_to_value) {
            return Err(ScenarioError::invalid(
                "loan_to_value",
                format!("must lie within [0, 1] (got {})", self.loan_to_value),
            ));
        }
        if !(1..=MAX_PROJECTION_YEARS).contains(&self.projection_years) {
            return Err(ScenarioError::invalid(
                "projection_years",
                format!(
                    "must lie within 1..={} (got {})",
                    MAX_PROJECTION_YEARS, self.projection_years
                ),
            ));
        }
        Ok(())
    }

    /// Loan balance for a given purchase price (constant across all years)
    pub fn loan_amount(&self, purchase_price: f64) -> f64 {
        purchase_price * self.loan_to_value
    }

    /// Equity share of the purchase price
    pub fn equity_share(&self) -> f64 {
        1.0 - self.loan_to_value
    }
}

impl Default for UnderwritingAssumptions {
    fn default() -> Self {
        Self::default_underwriting()
    }
}
