//! Deal assumptions a user varies between scenario runs

use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Interest rate range (percent) offered by the scenario controls
pub const TYPICAL_INTEREST_RATE: RangeInclusive<f64> = 3.0..=10.0;

/// Rent growth range (percent per year) offered by the scenario controls
pub const TYPICAL_RENT_GROWTH: RangeInclusive<f64> = -2.0..=10.0;

/// Exit cap rate range (percent) offered by the scenario controls
pub const TYPICAL_EXIT_CAP_RATE: RangeInclusive<f64> = 3.0..=10.0;

/// Deal assumptions for one scenario evaluation
///
/// Rates are percentages (5.5 = 5.5%), money amounts are in dollars.
/// Serializes with camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInputs {
    pub purchase_price: f64,
    pub exit_cap_rate: f64,
    pub rent_growth: f64,
    pub interest_rate: f64,
    pub hold_period: u32,
    pub capex_budget: f64,
}

impl ScenarioInputs {
    /// Base case for the Multifamily Fund IV underwriting model
    pub fn base_case() -> Self {
        Self {
            purchase_price: 22_000_000.0,
            exit_cap_rate: 5.5,
            rent_growth: 3.0,
            interest_rate: 6.5,
            hold_period: 5,
            capex_budget: 1_500_000.0,
        }
    }

    /// Check every field before the inputs reach the projection engine
    ///
    /// A hold period past the projection horizon is accepted here: the series
    /// is still well defined, only the return summary needs an exit year.
    pub fn validate(&self) -> Result<()> {
        finite("purchase_price", self.purchase_price)?;
        if self.purchase_price <= 0.0 {
            return Err(ScenarioError::invalid(
                "purchase_price",
                format!("must be greater than zero (got {})", self.purchase_price),
            ));
        }

        finite("exit_cap_rate", self.exit_cap_rate)?;
        if self.exit_cap_rate <= 0.0 {
            return Err(ScenarioError::invalid(
                "exit_cap_rate",
                format!("must be greater than zero (got {})", self.exit_cap_rate),
            ));
        }

        finite("rent_growth", self.rent_growth)?;
        finite("interest_rate", self.interest_rate)?;

        finite("capex_budget", self.capex_budget)?;
        if self.capex_budget < 0.0 {
            return Err(ScenarioError::invalid(
                "capex_budget",
                format!("must not be negative (got {})", self.capex_budget),
            ));
        }

        if self.hold_period == 0 {
            return Err(ScenarioError::invalid("hold_period", "must be at least 1 year"));
        }

        Ok(())
    }

    /// Fields that fall outside the ranges the scenario controls offer
    ///
    /// These are evaluated normally; callers may surface the notes as warnings.
    pub fn atypical_notes(&self) -> Vec<String> {
        let mut notes = Vec::new();
        let checks = [
            ("interest rate", self.interest_rate, &TYPICAL_INTEREST_RATE),
            ("rent growth", self.rent_growth, &TYPICAL_RENT_GROWTH),
            ("exit cap rate", self.exit_cap_rate, &TYPICAL_EXIT_CAP_RATE),
        ];

        for (label, value, range) in checks {
            if !range.contains(&value) {
                notes.push(format!(
                    "{} of {}% is outside the typical {}%..{}% range",
                    label,
                    value,
                    range.start(),
                    range.end()
                ));
            }
        }

        notes
    }
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self::base_case()
    }
}

fn finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must be finite (got {})", value)))
    }
}
