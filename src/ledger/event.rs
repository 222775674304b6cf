use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// A single inflow or outflow, either recorded by the user or synthesized from
/// a recurring obligation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LedgerEvent {
    pub date: NaiveDate,
    pub amount: f64,
    pub is_outflow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl LedgerEvent {
    pub fn outflow(date: NaiveDate, amount: f64, category_id: Option<CategoryId>) -> Self {
        Self {
            date,
            amount,
            is_outflow: true,
            category_id,
        }
    }

    pub fn inflow(date: NaiveDate, amount: f64, category_id: Option<CategoryId>) -> Self {
        Self {
            date,
            amount,
            is_outflow: false,
            category_id,
        }
    }

    /// Amount with the flow direction applied: negative for outflows.
    pub fn signed_amount(&self) -> f64 {
        if self.is_outflow {
            -self.amount
        } else {
            self.amount
        }
    }
}
