use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Recorded balance of a savings category on a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategorySnapshot {
    pub category_id: CategoryId,
    pub date: NaiveDate,
    pub amount: f64,
}

impl CategorySnapshot {
    pub fn new(category_id: CategoryId, date: NaiveDate, amount: f64) -> Self {
        Self {
            category_id,
            date,
            amount,
        }
    }
}

/// One point of a dated numeric series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Resolution at which a series keeps one point per distinct period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Day,
    Month,
}
