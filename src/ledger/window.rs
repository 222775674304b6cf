use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use crate::core::errors::{AnalyticsError, AnalyticsResult};

/// Inclusive calendar range used to scope merges and aggregations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AnalyticsResult<Self> {
        if end < start {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`, first through last day.
    pub fn month_containing(date: NaiveDate) -> Self {
        Self {
            start: calendar::month_start(date),
            end: calendar::month_end(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
