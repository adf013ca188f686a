//! Scenario runner for single and batch evaluations
//!
//! Holds the underwriting assumptions once, then evaluates any number of
//! scenario inputs against them. Batch runs fan out across threads; each
//! evaluation is independent.

use crate::assumptions::UnderwritingAssumptions;
use crate::deal::{SavedScenario, ScenarioInputs};
use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionEngine, ReturnSummary, YearProjection};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Projection series and return metrics for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub inputs: ScenarioInputs,
    pub projections: Vec<YearProjection>,
    pub summary: ReturnSummary,
}

/// Outcome of one named scenario in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub name: String,
    pub result: Result<ScenarioResult>,
}

/// Pre-configured scenario runner
///
/// # Example
/// ```
/// use underwriting_system::{ScenarioInputs, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let result = runner.run(&ScenarioInputs::base_case()).unwrap();
/// assert_eq!(result.projections.len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with the house underwriting assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner with custom assumptions and config
    pub fn with_assumptions(assumptions: UnderwritingAssumptions, config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(assumptions, config),
        }
    }

    pub fn assumptions(&self) -> &UnderwritingAssumptions {
        self.engine.assumptions()
    }

    /// Project and summarize a single scenario
    pub fn run(&self, inputs: &ScenarioInputs) -> Result<ScenarioResult> {
        for note in inputs.atypical_notes() {
            warn!("{}", note);
        }

        let projections = self.engine.project(inputs)?;
        let summary = self.engine.summarize(inputs, &projections)?;

        Ok(ScenarioResult {
            inputs: *inputs,
            projections,
            summary,
        })
    }

    /// Evaluate saved scenarios in parallel; outcomes keep the input order
    pub fn run_batch(&self, scenarios: &[SavedScenario]) -> Vec<BatchOutcome> {
        let start = Instant::now();

        let outcomes: Vec<BatchOutcome> = scenarios
            .par_iter()
            .map(|scenario| BatchOutcome {
                name: scenario.name.clone(),
                result: self.run(&scenario.inputs),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "Evaluated {} scenarios ({} failed) in {:?}",
            outcomes.len(),
            failed,
            start.elapsed()
        );

        outcomes
    }
}
