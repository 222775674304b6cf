//! Linear net-worth projections.
//!
//! Projections are intentionally simple: the yearly rate is an absolute
//! difference and it is applied linearly, with no compounding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series_reconstructor::SeriesReconstructor;
use crate::ledger::{calendar, SeriesPoint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub as_of: NaiveDate,
    pub years: u32,
    pub current_total: f64,
    pub yearly_rate: f64,
    pub projected_total: f64,
    pub percent_change: Option<f64>,
}

pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn yearly_rate(current_total: f64, total_one_year_ago: f64) -> f64 {
        current_total - total_one_year_ago
    }

    pub fn project(current_total: f64, yearly_rate: f64, years: u32) -> f64 {
        current_total + years as f64 * yearly_rate
    }

    /// Relative change from `current_total` to `projection`; undefined when
    /// the current total is zero.
    pub fn percent_change(projection: f64, current_total: f64) -> Option<f64> {
        if current_total == 0.0 {
            return None;
        }
        Some(projection / current_total - 1.0)
    }

    /// Projects a step series (e.g. net worth) `years` ahead of `as_of`, using
    /// the change over the year preceding `as_of` as the yearly rate. Dates
    /// before the first point read as zero.
    pub fn project_series(series: &[SeriesPoint], as_of: NaiveDate, years: u32) -> Projection {
        let current_total = SeriesReconstructor::value_as_of(series, as_of).unwrap_or(0.0);
        let one_year_ago = calendar::shift_year(as_of, -1);
        let total_one_year_ago =
            SeriesReconstructor::value_as_of(series, one_year_ago).unwrap_or(0.0);
        let yearly_rate = Self::yearly_rate(current_total, total_one_year_ago);
        let projected_total = Self::project(current_total, yearly_rate, years);
        Projection {
            as_of,
            years,
            current_total,
            yearly_rate,
            projected_total,
            percent_change: Self::percent_change(projected_total, current_total),
        }
    }
}
