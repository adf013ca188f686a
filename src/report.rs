//! CSV reports for projections and batch runs

use crate::error::Result;
use crate::projection::YearProjection;
use crate::scenario::BatchOutcome;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ProjectionCsvRow<'a> {
    #[serde(rename = "Year")]
    year: &'a str,
    #[serde(rename = "NOI")]
    noi: f64,
    #[serde(rename = "CashFlow")]
    cash_flow: f64,
    #[serde(rename = "Valuation")]
    valuation: f64,
    #[serde(rename = "ExitYear")]
    is_exit_year: bool,
}

#[derive(Serialize)]
struct BatchCsvRow<'a> {
    #[serde(rename = "Scenario")]
    name: &'a str,
    #[serde(rename = "HoldPeriod")]
    hold_period: Option<u32>,
    #[serde(rename = "TotalCashFlow")]
    total_cash_flow: Option<f64>,
    #[serde(rename = "SaleProceeds")]
    sale_proceeds: Option<f64>,
    #[serde(rename = "EquityInvested")]
    equity_invested: Option<f64>,
    #[serde(rename = "EquityMultiple")]
    equity_multiple: Option<f64>,
    #[serde(rename = "EstimatedIRR")]
    estimated_irr: Option<f64>,
    #[serde(rename = "CashFlowIRR")]
    cash_flow_irr: Option<f64>,
    #[serde(rename = "TotalProfit")]
    total_profit: Option<f64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Write one row per projected year
pub fn write_projection_csv<W: Write>(writer: W, projections: &[YearProjection]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for p in projections {
        let label = p.label();
        csv.serialize(ProjectionCsvRow {
            year: &label,
            noi: p.noi,
            cash_flow: p.cash_flow,
            valuation: p.valuation,
            is_exit_year: p.is_exit_year,
        })?;
    }

    csv.flush()?;
    Ok(())
}

/// Write one row per batch scenario; failed scenarios carry only their error
pub fn write_batch_csv<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    for outcome in outcomes {
        let row = match &outcome.result {
            Ok(result) => {
                let s = &result.summary;
                BatchCsvRow {
                    name: &outcome.name,
                    hold_period: Some(s.hold_period),
                    total_cash_flow: Some(s.total_cash_flow),
                    sale_proceeds: Some(s.sale_proceeds),
                    equity_invested: Some(s.equity_invested),
                    equity_multiple: Some(s.equity_multiple),
                    estimated_irr: Some(s.estimated_irr),
                    cash_flow_irr: s.cash_flow_irr,
                    total_profit: Some(s.total_profit),
                    error: None,
                }
            }
            Err(e) => BatchCsvRow {
                name: &outcome.name,
                hold_period: None,
                total_cash_flow: None,
                sale_proceeds: None,
                equity_invested: None,
                equity_multiple: None,
                estimated_irr: None,
                cash_flow_irr: None,
                total_profit: None,
                error: Some(e.to_string()),
            },
        };
        csv.serialize(row)?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{ScenarioInputs, ScenarioLibrary};
    use crate::scenario::ScenarioRunner;

    #[test]
    fn test_projection_csv() {
        let result = ScenarioRunner::new().run(&ScenarioInputs::base_case()).unwrap();
        let mut buf = Vec::new();
        write_projection_csv(&mut buf, &result.projections).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Year,NOI,CashFlow,Valuation,ExitYear");
        assert_eq!(lines[1], "Year 1,1246300.0,245300.0,22660000.0,false");
        assert!(lines[5].ends_with(",true"));
    }

    #[test]
    fn test_batch_csv_includes_failures() {
        let library = ScenarioLibrary::with_presets();
        let outcomes = ScenarioRunner::new().run_batch(library.as_slice());
        let mut buf = Vec::new();
        write_batch_csv(&mut buf, &outcomes).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Scenario,HoldPeriod,"));
        assert!(lines[1].starts_with("Conservative 10Y Hold,,"));
        assert!(lines[1].contains("exceeds the 7-year projection horizon"));
        assert!(lines[3].starts_with("Base Case 5Y,5,1611777.0,"));
    }
}
