//! Value types consumed and produced by the analytics core.

pub mod calendar;
pub mod event;
pub mod obligation;
pub mod snapshot;
pub mod window;

use uuid::Uuid;

/// Identifier of a spending or savings category.
pub type CategoryId = Uuid;

pub use event::LedgerEvent;
pub use obligation::{Cycle, ObligationDefinition, ObligationRecord, PeriodUnit};
pub use snapshot::{CategorySnapshot, Granularity, SeriesPoint};
pub use window::DateRange;
