//! Core projection engine for annual deal cash flows

use crate::assumptions::UnderwritingAssumptions;
use crate::deal::ScenarioInputs;
use crate::error::{Result, ScenarioError};
use log::debug;
use super::cashflows::YearProjection;
use super::returns::{summarize_with, ReturnSummary};

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Round NOI, cash flow and valuation to whole dollars.
    /// Rounding is half away from zero (`f64::round`).
    pub round_outputs: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { round_outputs: true }
    }
}

/// Main projection engine
///
/// Stateless apart from its fixed assumptions; every call recomputes the full
/// series, so one engine may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: UnderwritingAssumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: UnderwritingAssumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &UnderwritingAssumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project NOI, cash flow and valuation for every year of the horizon
    ///
    /// The horizon is fixed by the assumptions and does not depend on the hold
    /// period; when the hold period runs past it, no row is flagged as the exit.
    pub fn project(&self, inputs: &ScenarioInputs) -> Result<Vec<YearProjection>> {
        self.assumptions.validate()?;
        inputs.validate()?;

        // Interest-only on the original loan balance, identical every year
        let loan_amount = self.assumptions.loan_amount(inputs.purchase_price);
        let debt_service = loan_amount * (inputs.interest_rate / 100.0);
        let exit_cap = inputs.exit_cap_rate / 100.0;
        let growth = 1.0 + inputs.rent_growth / 100.0;

        let mut noi = inputs.purchase_price * self.assumptions.going_in_cap_rate;
        let mut rows = Vec::with_capacity(self.assumptions.projection_years as usize);

        for year in 1..=self.assumptions.projection_years {
            // Growth lands before the year is recorded
            noi *= growth;

            let cash_flow = noi - debt_service;
            let valuation = noi / exit_cap;

            if !(noi.is_finite() && cash_flow.is_finite() && valuation.is_finite()) {
                return Err(ScenarioError::invalid(
                    "purchase_price",
                    format!("year {} projection overflowed to a non-finite value", year),
                ));
            }

            rows.push(YearProjection {
                year,
                noi: self.money(noi),
                cash_flow: self.money(cash_flow),
                valuation: self.money(valuation),
                is_exit_year: year == inputs.hold_period,
            });
        }

        debug!(
            "Projected {} years: price={} exit_cap={}% growth={}% rate={}% hold={}",
            rows.len(),
            inputs.purchase_price,
            inputs.exit_cap_rate,
            inputs.rent_growth,
            inputs.interest_rate,
            inputs.hold_period
        );

        Ok(rows)
    }

    /// Derive hold-period return metrics from a projection series
    pub fn summarize(
        &self,
        inputs: &ScenarioInputs,
        projections: &[YearProjection],
    ) -> Result<ReturnSummary> {
        summarize_with(&self.assumptions, inputs, projections)
    }

    fn money(&self, value: f64) -> f64 {
        if self.config.round_outputs {
            value.round()
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> ProjectionEngine {
        ProjectionEngine::default()
    }

    #[test]
    fn test_base_case_year_one() {
        let rows = engine().project(&ScenarioInputs::base_case()).unwrap();
        let y1 = &rows[0];

        // 22,000,000 x 5.5% x 1.03; debt service 15,400,000 x 6.5% = 1,001,000
        assert_eq!(y1.year, 1);
        assert_eq!(y1.noi, 1_246_300.0);
        assert_eq!(y1.cash_flow, 245_300.0);
        assert_eq!(y1.valuation, 22_660_000.0);
        assert!(!y1.is_exit_year);
    }

    #[test]
    fn test_base_case_series() {
        let rows = engine().project(&ScenarioInputs::base_case()).unwrap();

        let noi: Vec<f64> = rows.iter().map(|r| r.noi).collect();
        assert_eq!(
            noi,
            vec![1_246_300.0, 1_283_689.0, 1_322_200.0, 1_361_866.0, 1_402_722.0, 1_444_803.0, 1_488_147.0]
        );
        assert_eq!(rows[4].valuation, 25_504_030.0);
        assert_eq!(rows[6].cash_flow, 487_147.0);
        assert!(rows[4].is_exit_year);
    }

    #[test]
    fn test_always_seven_years_in_order() {
        for hold_period in [1, 3, 5, 7, 10, 30] {
            let inputs = ScenarioInputs { hold_period, ..ScenarioInputs::base_case() };
            let rows = engine().project(&inputs).unwrap();
            assert_eq!(rows.len(), 7);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.year, i as u32 + 1);
            }
        }
    }

    #[test]
    fn test_exit_flag_uniqueness() {
        for hold_period in 1..=7 {
            let inputs = ScenarioInputs { hold_period, ..ScenarioInputs::base_case() };
            let rows = engine().project(&inputs).unwrap();
            let flagged: Vec<u32> = rows.iter().filter(|r| r.is_exit_year).map(|r| r.year).collect();
            assert_eq!(flagged, vec![hold_period]);
        }

        let inputs = ScenarioInputs { hold_period: 10, ..ScenarioInputs::base_case() };
        let rows = engine().project(&inputs).unwrap();
        assert!(rows.iter().all(|r| !r.is_exit_year));
    }

    #[test]
    fn test_deterministic() {
        let inputs = ScenarioInputs { rent_growth: 4.25, interest_rate: 7.75, ..ScenarioInputs::base_case() };
        let a = engine().project(&inputs).unwrap();
        let b = engine().project(&inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonic_compounding() {
        let rising = engine()
            .project(&ScenarioInputs { rent_growth: 2.5, ..ScenarioInputs::base_case() })
            .unwrap();
        assert!(rising.windows(2).all(|w| w[1].noi > w[0].noi));

        let flat = engine()
            .project(&ScenarioInputs { rent_growth: 0.0, ..ScenarioInputs::base_case() })
            .unwrap();
        assert!(flat.iter().all(|r| r.noi == 1_210_000.0));

        let falling = engine()
            .project(&ScenarioInputs { rent_growth: -2.0, ..ScenarioInputs::base_case() })
            .unwrap();
        assert!(falling.windows(2).all(|w| w[1].noi < w[0].noi));
        assert!(falling[6].noi < falling[0].noi);
        assert_eq!(falling[0].noi, 1_185_800.0);
        assert_eq!(falling[6].noi, 1_050_432.0);
    }

    #[test]
    fn test_valuation_uses_exit_cap_every_year() {
        let unrounded = ProjectionEngine::new(
            UnderwritingAssumptions::default_underwriting(),
            ProjectionConfig { round_outputs: false },
        );
        let inputs = ScenarioInputs { exit_cap_rate: 4.75, ..ScenarioInputs::base_case() };
        let rows = unrounded.project(&inputs).unwrap();

        for row in &rows {
            assert_relative_eq!(row.valuation, row.noi / (4.75 / 100.0), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_exit_cap_is_invalid_input() {
        let inputs = ScenarioInputs { exit_cap_rate: 0.0, ..ScenarioInputs::base_case() };
        let err = engine().project(&inputs).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidInput { field: "exit_cap_rate", .. }));
    }

    #[test]
    fn test_overflow_is_reported_not_returned() {
        let inputs = ScenarioInputs {
            purchase_price: f64::MAX,
            exit_cap_rate: 0.01,
            ..ScenarioInputs::base_case()
        };
        let err = engine().project(&inputs).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidInput { .. }));
    }

    #[test]
    fn test_unbounded_horizon_rejected_before_allocating() {
        let assumptions = UnderwritingAssumptions {
            projection_years: u32::MAX,
            ..UnderwritingAssumptions::default_underwriting()
        };
        let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());
        let err = engine.project(&ScenarioInputs::base_case()).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidInput { field: "projection_years", .. }));
    }

    #[test]
    fn test_debt_service_constant_across_years() {
        let rows = engine()
            .project(&ScenarioInputs { rent_growth: 0.0, ..ScenarioInputs::base_case() })
            .unwrap();
        // 1,210,000 - 1,001,000 every year
        assert!(rows.iter().all(|r| r.cash_flow == 209_000.0));
    }
}
