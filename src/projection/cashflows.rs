//! Projection output structures

use serde::{Deserialize, Serialize};

/// A single projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    /// 1-indexed projection year
    pub year: u32,

    /// Net operating income after this year's rent growth
    pub noi: f64,

    /// NOI less interest-only debt service
    pub cash_flow: f64,

    /// NOI capitalized at the exit cap rate
    pub valuation: f64,

    /// True for the year the asset is sold (year == hold period)
    pub is_exit_year: bool,
}

impl YearProjection {
    /// Chart label, e.g. "Year 3"
    pub fn label(&self) -> String {
        format!("Year {}", self.year)
    }
}

/// Find the exit-year row of a projection series
pub fn exit_year(projections: &[YearProjection]) -> Option<&YearProjection> {
    projections.iter().find(|p| p.is_exit_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u32, is_exit_year: bool) -> YearProjection {
        YearProjection {
            year,
            noi: 0.0,
            cash_flow: 0.0,
            valuation: 0.0,
            is_exit_year,
        }
    }

    #[test]
    fn test_exit_year_lookup() {
        let rows = vec![row(1, false), row(2, true), row(3, false)];
        assert_eq!(exit_year(&rows).map(|r| r.year), Some(2));
        assert_eq!(rows[1].label(), "Year 2");

        let none = vec![row(1, false), row(2, false)];
        assert!(exit_year(&none).is_none());
    }
}
