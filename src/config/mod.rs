use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::change_point_advisor::DEFAULT_HISTORY_MONTHS;
use crate::core::errors::{AnalyticsError, AnalyticsResult};

/// Caller-supplied settings for the analytics core.
///
/// The core never reads settings on its own; callers load this struct from
/// their settings store and pass it into each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "AnalyticsConfig::default_include_obligations")]
    pub include_obligations: bool,
    #[serde(default)]
    pub current_budget: f64,
    #[serde(default = "AnalyticsConfig::default_history_months")]
    pub history_months: u32,
    /// When the user last accepted or dismissed a budget suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_acknowledged_at: Option<NaiveDate>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            include_obligations: Self::default_include_obligations(),
            current_budget: 0.0,
            history_months: Self::default_history_months(),
            budget_acknowledged_at: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn default_include_obligations() -> bool {
        true
    }

    pub fn default_history_months() -> u32 {
        DEFAULT_HISTORY_MONTHS
    }

    pub fn from_json(data: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Records that a budget suggestion was handled, re-arming the advisor
    /// from `date` onward.
    pub fn acknowledge_budget(&mut self, date: NaiveDate) {
        self.budget_acknowledged_at = Some(date);
    }

    fn validate(&self) -> AnalyticsResult<()> {
        if !self.current_budget.is_finite() {
            return Err(AnalyticsError::InvalidInput(
                "current_budget must be a finite number".into(),
            ));
        }
        if self.history_months == 0 {
            return Err(AnalyticsError::InvalidInput(
                "history_months must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
