#![doc(test(attr(deny(warnings))))]

//! Budget Analytics turns sparse ledger rows and recurring obligations into
//! running-balance and net-worth series, flags budgets that no longer match
//! spending, and projects future net worth.

pub mod config;
pub mod core;
pub mod ledger;
pub mod utils;

pub use crate::config::AnalyticsConfig;
pub use crate::core::{
    AnalyticsError, AnalyticsResult, BudgetRecommendation, ChangePointAdvisor, EventMerger,
    ObligationAmortizer, ProjectionCalculator, SeriesReconstructor, SnapshotIndex,
};
pub use crate::ledger::{
    CategoryId, CategorySnapshot, Cycle, DateRange, Granularity, LedgerEvent,
    ObligationDefinition, SeriesPoint,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Analytics tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
