//! Financial time-series analytics: obligation amortization, event merging,
//! series reconstruction, budget drift detection and projections.
//!
//! Every component is a stateless unit struct over borrowed inputs that
//! returns owned outputs.

pub mod change_point_advisor;
pub mod errors;
pub mod event_merger;
pub mod obligation_amortizer;
pub mod projection_calculator;
pub mod series_reconstructor;
pub mod time;

pub use change_point_advisor::{
    round_up_to_quarter_unit, BudgetRecommendation, ChangePointAdvisor, CusumState,
    CusumThresholds,
};
pub use errors::{AnalyticsError, AnalyticsResult};
pub use event_merger::EventMerger;
pub use obligation_amortizer::{ObligationAmortizer, ObligationInstances};
pub use projection_calculator::{Projection, ProjectionCalculator};
pub use series_reconstructor::{SeriesReconstructor, SnapshotIndex};
pub use time::{Clock, FixedClock, SystemClock};

#[cfg(test)]
mod tests;
