use chrono::NaiveDate;
use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Failures surfaced by the analytics core and its configuration parsing.
///
/// Thin history and zero denominators are not errors: the advisor answers with
/// a non-suggesting recommendation and percentage helpers answer `None`.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("obligation ends ({end}) before it starts ({start})")]
    InvalidObligation { start: NaiveDate, end: NaiveDate },
    #[error("date range ends ({end}) before it starts ({start})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
