//! Two-sided CUSUM detector that flags when a fixed monthly budget no longer
//! matches actual spending.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::AnalyticsConfig;
use crate::ledger::{calendar, LedgerEvent};

/// Decision threshold `h`, in standard deviations.
pub const THRESHOLD_SIGMAS: f64 = 5.0;
/// Allowed slack `k`, in standard deviations.
pub const SLACK_SIGMAS: f64 = 0.2;
/// Trailing completed months considered by default.
pub const DEFAULT_HISTORY_MONTHS: u32 = 6;
/// Minor units per currency unit; suggestions assume a cents-based currency.
pub const MINOR_UNITS_PER_UNIT: f64 = 100.0;
/// Suggestions are rounded up to this many minor units (a quarter unit).
pub const SUGGESTION_STEP_MINOR_UNITS: f64 = 25.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CusumState {
    pub s_plus: f64,
    pub s_minus: f64,
}

impl CusumState {
    pub fn update(&mut self, deviation: f64, slack: f64) {
        self.s_plus = (self.s_plus + deviation - slack).max(0.0);
        self.s_minus = (self.s_minus + deviation + slack).min(0.0);
    }

    pub fn breached(&self, threshold: f64) -> bool {
        self.s_plus > threshold || self.s_minus < -threshold
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub should_suggest: bool,
    pub suggested_amount: f64,
}

impl BudgetRecommendation {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Detector parameters derived from a reference sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CusumThresholds {
    pub threshold: f64,
    pub slack: f64,
}

impl CusumThresholds {
    pub fn from_stddev(stddev: f64) -> Self {
        Self {
            threshold: THRESHOLD_SIGMAS * stddev,
            slack: SLACK_SIGMAS * stddev,
        }
    }
}

pub struct ChangePointAdvisor;

impl ChangePointAdvisor {
    /// Decides whether `current_budget` should be revised given the monthly
    /// expense totals, oldest first.
    ///
    /// The detector scans the budget deviations `expense - budget` in order.
    /// Its thresholds come from the Bessel-corrected standard deviation of
    /// the reference months, every month before the latest one, so a
    /// sustained shift at the end of the window is measured against the
    /// spread that preceded it. Perfectly flat reference spending yields zero
    /// thresholds: any later deviation breaches, so `[1000.0 x 5, 1001.0]`
    /// against a budget of 1000 already suggests 1000.25.
    pub fn evaluate(monthly_expenses: &[f64], current_budget: f64) -> BudgetRecommendation {
        if monthly_expenses.len() < 2 {
            debug!(
                months = monthly_expenses.len(),
                "not enough history for budget detection"
            );
            return BudgetRecommendation::none();
        }

        let deviations: Vec<f64> = monthly_expenses
            .iter()
            .map(|expense| expense - current_budget)
            .collect();
        let reference = &deviations[..deviations.len() - 1];
        let thresholds = CusumThresholds::from_stddev(bessel_stddev(reference));

        match Self::first_breach(&deviations, thresholds) {
            Some(month) => {
                let suggested_amount = round_up_to_quarter_unit(mean(monthly_expenses));
                debug!(month, suggested_amount, current_budget, "budget drift detected");
                BudgetRecommendation {
                    should_suggest: true,
                    suggested_amount,
                }
            }
            None => BudgetRecommendation::none(),
        }
    }

    /// Index of the first deviation at which the two-sided CUSUM crosses the
    /// threshold. Scanning stops at the first breach.
    pub fn first_breach(deviations: &[f64], thresholds: CusumThresholds) -> Option<usize> {
        let mut state = CusumState::default();
        for (idx, deviation) in deviations.iter().enumerate() {
            state.update(*deviation, thresholds.slack);
            trace!(
                idx,
                s_plus = state.s_plus,
                s_minus = state.s_minus,
                "cusum step"
            );
            if state.breached(thresholds.threshold) {
                state.reset();
                return Some(idx);
            }
        }
        None
    }

    /// Outflow totals of the `months` calendar months preceding the month of
    /// `today`, oldest first.
    ///
    /// Months before the first recorded outflow are not history and are left
    /// out, as are months up to and including the month of `acknowledged_at`,
    /// so after the user accepts or dismisses a suggestion only newer spending
    /// is judged.
    pub fn monthly_expense_totals(
        events: &[LedgerEvent],
        today: NaiveDate,
        acknowledged_at: Option<NaiveDate>,
        months: u32,
    ) -> Vec<f64> {
        let first_spend = match events
            .iter()
            .filter(|event| event.is_outflow)
            .map(|event| calendar::month_index(event.date))
            .min()
        {
            Some(idx) => idx,
            None => return Vec::new(),
        };
        let current = calendar::month_start(today);
        let rearmed_after = acknowledged_at.map(calendar::month_index);
        let window: Vec<i32> = (1..=months as i32)
            .rev()
            .map(|back| calendar::month_index(calendar::shift_month(current, -back)))
            .filter(|idx| *idx >= first_spend)
            .filter(|idx| rearmed_after.map_or(true, |ack| *idx > ack))
            .collect();

        let mut totals: HashMap<i32, f64> = window.iter().map(|idx| (*idx, 0.0)).collect();
        for event in events.iter().filter(|event| event.is_outflow) {
            if let Some(total) = totals.get_mut(&calendar::month_index(event.date)) {
                *total += event.amount;
            }
        }
        window
            .iter()
            .map(|idx| totals.get(idx).copied().unwrap_or(0.0))
            .collect()
    }

    /// Aggregates `events` per the configured history and evaluates the
    /// configured budget against them.
    pub fn evaluate_ledger(
        events: &[LedgerEvent],
        config: &AnalyticsConfig,
        today: NaiveDate,
    ) -> BudgetRecommendation {
        let totals = Self::monthly_expense_totals(
            events,
            today,
            config.budget_acknowledged_at,
            config.history_months,
        );
        Self::evaluate(&totals, config.current_budget)
    }
}

/// Rounds up to the next quarter of a currency unit, working in minor units.
pub fn round_up_to_quarter_unit(value: f64) -> f64 {
    let minor = value * MINOR_UNITS_PER_UNIT;
    let steps = (minor / SUGGESTION_STEP_MINOR_UNITS).ceil();
    steps * SUGGESTION_STEP_MINOR_UNITS / MINOR_UNITS_PER_UNIT
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation scaled by `sqrt(n / (n - 1))`; zero when
/// fewer than two values are available.
fn bessel_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n as f64;
    variance.sqrt() * (n as f64 / (n as f64 - 1.0)).sqrt()
}
