use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CategoryId;
use crate::core::errors::{AnalyticsError, AnalyticsResult};

/// Billing cadence of a recurring obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Cycle {
    Monthly,
    Yearly,
    Weekly,
    BiWeekly,
}

/// Calendar unit a cycle advances by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    Months(u32),
    Years(u32),
    Days(u32),
}

impl Cycle {
    /// Months covered by one cycle; the cycle amount is divided by it.
    pub fn monthly_divisor(self) -> f64 {
        match self {
            Cycle::Monthly => 1.0,
            Cycle::Yearly => 12.0,
            Cycle::Weekly => 12.0 / 52.0,
            Cycle::BiWeekly => 12.0 / 26.0,
        }
    }

    pub fn period_unit(self) -> PeriodUnit {
        match self {
            Cycle::Monthly => PeriodUnit::Months(1),
            Cycle::Yearly => PeriodUnit::Years(1),
            Cycle::Weekly => PeriodUnit::Days(7),
            Cycle::BiWeekly => PeriodUnit::Days(14),
        }
    }
}

/// A recurring commitment such as rent or a subscription.
///
/// Construction validates the lifecycle bounds, and the normalized monthly
/// amount is cached and only recomputed when `amount` or `cycle` change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObligationRecord", into = "ObligationRecord")]
pub struct ObligationDefinition {
    amount: f64,
    cycle: Cycle,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    category_id: Option<CategoryId>,
    normalized: f64,
}

impl ObligationDefinition {
    pub fn new(
        amount: f64,
        cycle: Cycle,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        category_id: Option<CategoryId>,
    ) -> AnalyticsResult<Self> {
        validate_bounds(start_date, end_date)?;
        Ok(Self {
            amount,
            cycle,
            start_date,
            end_date,
            category_id,
            normalized: amount / cycle.monthly_divisor(),
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Cached month-equivalent amount.
    pub fn normalized_amount(&self) -> f64 {
        self.normalized
    }

    pub fn set_amount(&mut self, amount: f64) {
        if amount != self.amount {
            self.amount = amount;
            self.refresh_normalized();
        }
    }

    pub fn set_cycle(&mut self, cycle: Cycle) {
        if cycle != self.cycle {
            self.cycle = cycle;
            self.refresh_normalized();
        }
    }

    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) -> AnalyticsResult<()> {
        validate_bounds(self.start_date, end_date)?;
        self.end_date = end_date;
        Ok(())
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }

    fn refresh_normalized(&mut self) {
        self.normalized = self.amount / self.cycle.monthly_divisor();
    }
}

fn validate_bounds(start: NaiveDate, end: Option<NaiveDate>) -> AnalyticsResult<()> {
    match end {
        Some(end) if end < start => Err(AnalyticsError::InvalidObligation { start, end }),
        _ => Ok(()),
    }
}

/// Serialized shape of an obligation; the cached amount is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationRecord {
    pub amount: f64,
    pub cycle: Cycle,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl TryFrom<ObligationRecord> for ObligationDefinition {
    type Error = AnalyticsError;

    fn try_from(record: ObligationRecord) -> Result<Self, Self::Error> {
        ObligationDefinition::new(
            record.amount,
            record.cycle,
            record.start_date,
            record.end_date,
            record.category_id,
        )
    }
}

impl From<ObligationDefinition> for ObligationRecord {
    fn from(definition: ObligationDefinition) -> Self {
        Self {
            amount: definition.amount,
            cycle: definition.cycle,
            start_date: definition.start_date,
            end_date: definition.end_date,
            category_id: definition.category_id,
        }
    }
}
