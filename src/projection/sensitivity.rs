//! Sensitivity grid of exit cap rate against interest rate
//!
//! The cell formula is a deliberately simple heuristic for display. It is not
//! derived from the projection engine and its values are not expected to match
//! [`ReturnSummary::estimated_irr`](super::ReturnSummary) for the same inputs.

use crate::deal::ScenarioInputs;
use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};

/// Exit cap rates (percent) shown as grid rows
pub const DEFAULT_EXIT_CAP_RATES: [f64; 4] = [4.5, 5.0, 5.5, 6.0];

/// Interest rates (percent) shown as grid columns
pub const DEFAULT_INTEREST_RATES: [f64; 4] = [5.5, 6.0, 6.5, 7.0];

/// Illustrative IRR (percent) for one cap rate / interest rate pair
pub fn sensitivity_cell(cap_rate: f64, interest_rate: f64, rent_growth: f64) -> f64 {
    22.0 - (interest_rate * 1.5) - (cap_rate * 0.8) + rent_growth
}

/// Display band for a sensitivity cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrBand {
    /// Above 18%
    Strong,
    /// Above 12%, up to 18%
    Moderate,
    /// 12% or less
    Weak,
}

impl IrrBand {
    pub fn classify(irr: f64) -> Self {
        if irr > 18.0 {
            IrrBand::Strong
        } else if irr > 12.0 {
            IrrBand::Moderate
        } else {
            IrrBand::Weak
        }
    }
}

/// Grid of heuristic IRRs, rows by exit cap rate, columns by interest rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityGrid {
    pub exit_cap_rates: Vec<f64>,
    pub interest_rates: Vec<f64>,
    pub rent_growth: f64,
    pub cells: Vec<Vec<f64>>,
}

impl SensitivityGrid {
    pub fn build(exit_cap_rates: &[f64], interest_rates: &[f64], rent_growth: f64) -> Result<Self> {
        if !rent_growth.is_finite() {
            return Err(ScenarioError::invalid("rent_growth", "must be finite"));
        }
        if exit_cap_rates.iter().any(|v| !v.is_finite()) {
            return Err(ScenarioError::invalid("exit_cap_rates", "axis values must be finite"));
        }
        if interest_rates.iter().any(|v| !v.is_finite()) {
            return Err(ScenarioError::invalid("interest_rates", "axis values must be finite"));
        }

        let cells = exit_cap_rates
            .iter()
            .map(|&cap| {
                interest_rates
                    .iter()
                    .map(|&rate| sensitivity_cell(cap, rate, rent_growth))
                    .collect()
            })
            .collect();

        Ok(Self {
            exit_cap_rates: exit_cap_rates.to_vec(),
            interest_rates: interest_rates.to_vec(),
            rent_growth,
            cells,
        })
    }

    /// Standard 4x4 grid at the scenario's rent growth
    pub fn for_inputs(inputs: &ScenarioInputs) -> Result<Self> {
        Self::build(&DEFAULT_EXIT_CAP_RATES, &DEFAULT_INTEREST_RATES, inputs.rent_growth)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn band(&self, row: usize, col: usize) -> Option<IrrBand> {
        self.cell(row, col).map(IrrBand::classify)
    }
}
