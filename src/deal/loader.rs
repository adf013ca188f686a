//! Load saved scenarios from CSV

use super::{SavedScenario, ScenarioInputs};
use crate::error::Result;
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Default scenario file read by the batch runner
pub const DEFAULT_SCENARIOS_PATH: &str = "scenarios.csv";

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "ExitCapRate")]
    exit_cap_rate: f64,
    #[serde(rename = "RentGrowth")]
    rent_growth: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "HoldPeriod")]
    hold_period: u32,
    #[serde(rename = "CapexBudget")]
    capex_budget: f64,
    #[serde(rename = "SavedAt")]
    saved_at: NaiveDate,
}

impl CsvRow {
    fn into_scenario(self, id: u64) -> Result<SavedScenario> {
        let inputs = ScenarioInputs {
            purchase_price: self.purchase_price,
            exit_cap_rate: self.exit_cap_rate,
            rent_growth: self.rent_growth,
            interest_rate: self.interest_rate,
            hold_period: self.hold_period,
            capex_budget: self.capex_budget,
        };
        inputs.validate()?;

        Ok(SavedScenario {
            id,
            name: self.name.trim().to_string(),
            inputs,
            saved_at: self.saved_at,
        })
    }
}

/// Load all scenarios from a CSV file; ids follow row order starting at 1
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<SavedScenario>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SavedScenario>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<SavedScenario>> {
    let mut scenarios = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario(i as u64 + 1)?);
    }

    Ok(scenarios)
}
