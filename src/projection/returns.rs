//! Hold-period return metrics derived from a projection series

use crate::assumptions::UnderwritingAssumptions;
use crate::deal::ScenarioInputs;
use crate::error::{Result, ScenarioError};
use serde::{Deserialize, Serialize};
use super::cashflows::{exit_year, YearProjection};
use super::irr::{calculate_irr, equity_cash_flows};

/// IRR below this (percent) is flagged as missing the hurdle
pub const IRR_HURDLE_PCT: f64 = 12.0;

/// Equity multiple below this is flagged as under target
pub const EQUITY_MULTIPLE_TARGET: f64 = 1.5;

/// Return metrics over the hold period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSummary {
    pub hold_period: u32,

    /// Sum of rounded cash flows for years 1..=hold_period
    pub total_cash_flow: f64,

    /// Exit-year valuation less the original loan balance
    pub sale_proceeds: f64,

    /// Operating cash flow plus sale proceeds
    pub total_return: f64,

    /// Equity share of the purchase price plus the capex budget
    pub equity_invested: f64,

    pub equity_multiple: f64,

    /// Annualized multiple, in percent. Non-positive multiples clamp to -100%.
    pub estimated_irr: f64,

    /// Total return less equity invested
    pub total_profit: f64,

    /// IRR of the dated equity cash flows, in percent, when one exists
    pub cash_flow_irr: Option<f64>,
}

impl ReturnSummary {
    pub fn irr_below_hurdle(&self) -> bool {
        self.estimated_irr < IRR_HURDLE_PCT
    }

    pub fn multiple_below_target(&self) -> bool {
        self.equity_multiple < EQUITY_MULTIPLE_TARGET
    }
}

/// Summarize returns under the house underwriting assumptions
pub fn summarize_returns(
    inputs: &ScenarioInputs,
    projections: &[YearProjection],
) -> Result<ReturnSummary> {
    summarize_with(&UnderwritingAssumptions::default_underwriting(), inputs, projections)
}

/// Summarize returns for a series produced under `assumptions`
///
/// A hold period past the end of the series has no exit valuation and is an
/// error rather than a sale at zero.
pub fn summarize_with(
    assumptions: &UnderwritingAssumptions,
    inputs: &ScenarioInputs,
    projections: &[YearProjection],
) -> Result<ReturnSummary> {
    inputs.validate()?;

    let hold_period = inputs.hold_period;
    if hold_period as usize > projections.len() {
        return Err(ScenarioError::HoldPeriodBeyondHorizon {
            hold_period,
            horizon: projections.len() as u32,
        });
    }

    let exit = exit_year(projections)
        .filter(|p| p.year == hold_period)
        .ok_or_else(|| {
            ScenarioError::invalid(
                "projections",
                format!("no exit row for year {}; series was built from other inputs", hold_period),
            )
        })?;

    let held = &projections[..hold_period as usize];
    let total_cash_flow = finite("total_cash_flow", held.iter().map(|p| p.cash_flow).sum())?;

    // The loan never amortizes, so the full original balance is repaid at sale
    let sale_proceeds = exit.valuation - assumptions.loan_amount(inputs.purchase_price);
    let sale_proceeds = finite("sale_proceeds", sale_proceeds)?;
    let total_return = finite("total_return", total_cash_flow + sale_proceeds)?;

    let equity_invested = inputs.purchase_price * assumptions.equity_share() + inputs.capex_budget;
    if equity_invested == 0.0 {
        return Err(ScenarioError::DivisionByZero { quantity: "equity_invested" });
    }

    let equity_multiple = finite("equity_multiple", total_return / equity_invested)?;
    let estimated_irr = finite(
        "estimated_irr",
        (equity_multiple.max(0.0).powf(1.0 / hold_period as f64) - 1.0) * 100.0,
    )?;
    let total_profit = finite("total_profit", total_return - equity_invested)?;

    let flows = equity_cash_flows(equity_invested, held, sale_proceeds);
    let cash_flow_irr = calculate_irr(&flows).map(|rate| rate * 100.0);

    Ok(ReturnSummary {
        hold_period,
        total_cash_flow,
        sale_proceeds,
        total_return,
        equity_invested,
        equity_multiple,
        estimated_irr,
        total_profit,
        cash_flow_irr,
    })
}

/// Sums of individually finite rows can still overflow
fn finite(quantity: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScenarioError::invalid(
            quantity,
            format!("overflowed to a non-finite value ({})", value),
        ))
    }
}
