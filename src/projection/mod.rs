//! Projection engine, return metrics and sensitivity estimates

mod cashflows;
mod engine;
mod irr;
mod returns;
mod sensitivity;

pub use cashflows::{exit_year, YearProjection};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use irr::{calculate_irr, equity_cash_flows};
pub use returns::{
    summarize_returns, summarize_with, ReturnSummary, EQUITY_MULTIPLE_TARGET, IRR_HURDLE_PCT,
};
pub use sensitivity::{
    sensitivity_cell, IrrBand, SensitivityGrid, DEFAULT_EXIT_CAP_RATES, DEFAULT_INTEREST_RATES,
};

use crate::deal::ScenarioInputs;
use crate::error::Result;

/// Project a scenario under the house underwriting assumptions
pub fn project(inputs: &ScenarioInputs) -> Result<Vec<YearProjection>> {
    ProjectionEngine::default().project(inputs)
}
