//! In-memory library of named scenarios

use super::ScenarioInputs;
use crate::error::{Result, ScenarioError};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// A named snapshot of scenario inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScenario {
    pub id: u64,
    pub name: String,
    pub inputs: ScenarioInputs,
    pub saved_at: NaiveDate,
}

/// Saved scenarios, newest first
#[derive(Debug, Clone)]
pub struct ScenarioLibrary {
    scenarios: Vec<SavedScenario>,
    next_id: u64,
}

impl ScenarioLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
            next_id: 1,
        }
    }

    /// Library seeded with the standard Multifamily Fund IV cases
    pub fn with_presets() -> Self {
        let base = ScenarioInputs::base_case();
        let presets = [
            (
                "Conservative 10Y Hold",
                ScenarioInputs {
                    exit_cap_rate: 6.5,
                    rent_growth: 2.0,
                    interest_rate: 7.0,
                    hold_period: 10,
                    capex_budget: 2_000_000.0,
                    ..base
                },
                (2024, 1, 15),
            ),
            (
                "Aggressive 3Y Flip",
                ScenarioInputs {
                    exit_cap_rate: 5.0,
                    rent_growth: 5.0,
                    interest_rate: 6.0,
                    hold_period: 3,
                    capex_budget: 1_000_000.0,
                    ..base
                },
                (2024, 2, 1),
            ),
            ("Base Case 5Y", base, (2024, 2, 5)),
        ];

        let scenarios = presets
            .into_iter()
            .enumerate()
            .filter_map(|(i, (name, inputs, (y, m, d)))| {
                NaiveDate::from_ymd_opt(y, m, d).map(|saved_at| SavedScenario {
                    id: i as u64 + 1,
                    name: name.to_string(),
                    inputs,
                    saved_at,
                })
            })
            .collect::<Vec<_>>();

        Self {
            next_id: scenarios.len() as u64 + 1,
            scenarios,
        }
    }

    /// Build a library from already-saved scenarios (e.g. loaded from CSV)
    pub fn from_scenarios(scenarios: Vec<SavedScenario>) -> Self {
        let next_id = scenarios.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self { scenarios, next_id }
    }

    /// Save a snapshot of `inputs` under `name`, dated today
    pub fn save(&mut self, name: &str, inputs: ScenarioInputs) -> Result<&SavedScenario> {
        self.save_on(name, inputs, Utc::now().date_naive())
    }

    /// Save a snapshot with an explicit date; the new scenario goes to the front
    pub fn save_on(
        &mut self,
        name: &str,
        inputs: ScenarioInputs,
        saved_at: NaiveDate,
    ) -> Result<&SavedScenario> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::EmptyScenarioName);
        }

        let scenario = SavedScenario {
            id: self.next_id,
            name: name.to_string(),
            inputs,
            saved_at,
        };
        self.next_id += 1;

        info!("Saved scenario {} ({:?})", scenario.name, scenario.id);
        self.scenarios.insert(0, scenario);
        Ok(&self.scenarios[0])
    }

    /// Look up a scenario by id
    pub fn get(&self, id: u64) -> Option<&SavedScenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Look up a scenario by name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Result<&SavedScenario> {
        let wanted = name.trim();
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScenarioError::UnknownScenario(wanted.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedScenario> {
        self.scenarios.iter()
    }

    pub fn as_slice(&self) -> &[SavedScenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self::with_presets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let library = ScenarioLibrary::with_presets();
        assert_eq!(library.len(), 3);

        let flip = library.find_by_name("aggressive 3y flip").unwrap();
        assert_eq!(flip.inputs.hold_period, 3);
        assert_eq!(flip.saved_at, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let base = library.find_by_name("Base Case 5Y").unwrap();
        assert_eq!(base.inputs, ScenarioInputs::base_case());
    }

    #[test]
    fn test_save_prepends_with_fresh_id() {
        let mut library = ScenarioLibrary::with_presets();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let inputs = ScenarioInputs { rent_growth: 6.0, ..ScenarioInputs::base_case() };

        let id = library.save_on("  Optimistic Growth Case ", inputs, date).unwrap().id;
        assert_eq!(id, 4);
        assert_eq!(library.len(), 4);

        let first = &library.as_slice()[0];
        assert_eq!(first.name, "Optimistic Growth Case");
        assert_eq!(first.inputs.rent_growth, 6.0);
        assert_eq!(library.get(id).map(|s| s.saved_at), Some(date));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut library = ScenarioLibrary::new();
        let result = library.save("   ", ScenarioInputs::base_case());
        assert!(matches!(result, Err(ScenarioError::EmptyScenarioName)));
        assert!(library.is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let library = ScenarioLibrary::with_presets();
        assert!(matches!(
            library.find_by_name("Nope"),
            Err(ScenarioError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_from_scenarios_continues_ids() {
        let presets = ScenarioLibrary::with_presets();
        let mut library = ScenarioLibrary::from_scenarios(presets.as_slice().to_vec());
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(library.save_on("Next", ScenarioInputs::base_case(), date).unwrap().id, 4);
    }
}
