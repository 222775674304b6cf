//! Sparse-to-dense series builders.
//!
//! Both builders share one invariant: points are strictly ascending by date
//! with at most one point per date.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::ledger::{calendar, CategoryId, CategorySnapshot, Granularity, LedgerEvent, SeriesPoint};

pub struct SeriesReconstructor;

impl SeriesReconstructor {
    /// Step series of the cumulative signed flow, one point per distinct day.
    ///
    /// The series opens at `anchor_date`; events dated before the anchor are
    /// folded into the opening point so dates never go backwards. An empty
    /// input yields a single zero point at the anchor.
    pub fn build_running_balance(
        events: &[LedgerEvent],
        anchor_date: NaiveDate,
    ) -> Vec<SeriesPoint> {
        let mut ordered: Vec<&LedgerEvent> = events.iter().collect();
        ordered.sort_by_key(|event| event.date);

        let mut points = Vec::new();
        let mut current_amount = 0.0;
        let mut current_date = anchor_date;

        for event in ordered {
            let date = event.date.max(anchor_date);
            if date != current_date {
                points.push(SeriesPoint::new(current_date, current_amount));
                current_date = date;
            }
            current_amount += event.signed_amount();
        }
        points.push(SeriesPoint::new(current_date, current_amount));

        debug!(events = events.len(), points = points.len(), "built running balance");
        points
    }

    /// Net-worth style series: at each query date, the sum over `categories`
    /// of each category's latest snapshot at or before that date.
    pub fn build_snapshot_series(
        snapshots: &[CategorySnapshot],
        categories: &[CategoryId],
        query_dates: &[NaiveDate],
    ) -> Vec<SeriesPoint> {
        let index = SnapshotIndex::new(snapshots, categories);
        let mut dates = query_dates.to_vec();
        dates.sort_unstable();
        dates.dedup();

        let points: Vec<SeriesPoint> = dates
            .into_iter()
            .map(|date| SeriesPoint::new(date, index.value_at(date)))
            .collect();

        debug!(
            snapshots = snapshots.len(),
            categories = index.category_count(),
            points = points.len(),
            "built snapshot series"
        );
        points
    }

    /// Distinct snapshot dates in ascending order; the default query dates
    /// for [`SeriesReconstructor::build_snapshot_series`].
    pub fn snapshot_query_dates(snapshots: &[CategorySnapshot]) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = snapshots.iter().map(|snapshot| snapshot.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Snapshot series evaluated at every date a snapshot was recorded.
    pub fn net_worth_series(
        snapshots: &[CategorySnapshot],
        categories: &[CategoryId],
    ) -> Vec<SeriesPoint> {
        let dates = Self::snapshot_query_dates(snapshots);
        Self::build_snapshot_series(snapshots, categories, &dates)
    }

    /// Value of a step series on `date`: the last point at or before it.
    pub fn value_as_of(series: &[SeriesPoint], date: NaiveDate) -> Option<f64> {
        let idx = series.partition_point(|point| point.date <= date);
        idx.checked_sub(1).map(|last| series[last].value)
    }

    /// Keeps the last value of each period. Monthly points are dated on the
    /// first of their month.
    pub fn resample(series: &[SeriesPoint], granularity: Granularity) -> Vec<SeriesPoint> {
        let mut resampled: Vec<SeriesPoint> = Vec::with_capacity(series.len());
        for point in series {
            let date = match granularity {
                Granularity::Day => point.date,
                Granularity::Month => calendar::month_start(point.date),
            };
            match resampled.last_mut() {
                Some(last) if last.date == date => last.value = point.value,
                _ => resampled.push(SeriesPoint::new(date, point.value)),
            }
        }
        resampled
    }
}

/// Per-category snapshot history sorted by date, answering "latest value at
/// or before a date" lookups.
///
/// Building the index once and querying it repeatedly always sums categories
/// in the same order, so identical queries produce bit-identical values.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex {
    categories: Vec<(CategoryId, Vec<(NaiveDate, f64)>)>,
}

impl SnapshotIndex {
    /// Indexes `snapshots` for the given categories, in the order given.
    /// Snapshots of unlisted categories are ignored.
    pub fn new(snapshots: &[CategorySnapshot], categories: &[CategoryId]) -> Self {
        let mut slots: HashMap<CategoryId, usize> = HashMap::with_capacity(categories.len());
        let mut indexed: Vec<(CategoryId, Vec<(NaiveDate, f64)>)> = Vec::new();
        for category in categories {
            if !slots.contains_key(category) {
                slots.insert(*category, indexed.len());
                indexed.push((*category, Vec::new()));
            }
        }
        for snapshot in snapshots {
            if let Some(&slot) = slots.get(&snapshot.category_id) {
                indexed[slot].1.push((snapshot.date, snapshot.amount));
            }
        }
        // stable: same-day snapshots keep insertion order, so the last inserted wins
        for (_, history) in indexed.iter_mut() {
            history.sort_by_key(|(date, _)| *date);
        }
        Self {
            categories: indexed,
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Latest recorded amount for `category` at or before `date`.
    pub fn category_value_at(&self, category: CategoryId, date: NaiveDate) -> Option<f64> {
        self.categories
            .iter()
            .find(|(id, _)| *id == category)
            .and_then(|(_, history)| latest_at_or_before(history, date))
    }

    /// Sum of every indexed category's latest amount at or before `date`;
    /// categories without a qualifying snapshot contribute zero.
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.categories
            .iter()
            .map(|(_, history)| latest_at_or_before(history, date).unwrap_or(0.0))
            .sum()
    }
}

fn latest_at_or_before(history: &[(NaiveDate, f64)], date: NaiveDate) -> Option<f64> {
    let idx = history.partition_point(|(recorded, _)| *recorded <= date);
    idx.checked_sub(1).map(|last| history[last].1)
}
