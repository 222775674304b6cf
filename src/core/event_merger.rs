//! Combines recorded ledger events with virtualized obligation instances.

use chrono::NaiveDate;
use tracing::debug;

use super::obligation_amortizer::ObligationAmortizer;
use super::time::Clock;
use crate::ledger::{calendar, DateRange, LedgerEvent, ObligationDefinition};

pub struct EventMerger;

impl EventMerger {
    /// Returns the real events inside `window` and, when `include_obligations`
    /// is set, one outflow per active obligation for every month start that
    /// falls inside the window.
    ///
    /// Without a window every real event is kept and obligations are expanded
    /// across their active lifetime up to `reference`. Output order is not
    /// meaningful; downstream builders sort.
    pub fn merge(
        real_events: &[LedgerEvent],
        obligations: &[ObligationDefinition],
        window: Option<DateRange>,
        include_obligations: bool,
        reference: NaiveDate,
    ) -> Vec<LedgerEvent> {
        let mut merged: Vec<LedgerEvent> = match window {
            Some(range) => real_events
                .iter()
                .filter(|event| range.contains(event.date))
                .copied()
                .collect(),
            None => real_events.to_vec(),
        };
        let real_count = merged.len();

        if include_obligations {
            for obligation in obligations {
                merged.extend(Self::instances_for(obligation, window, reference));
            }
        }

        debug!(
            real = real_count,
            virtual_instances = merged.len() - real_count,
            obligations = obligations.len(),
            include_obligations,
            "merged ledger events"
        );
        merged
    }

    /// Same as [`EventMerger::merge`], resolving "today" through `clock`.
    pub fn merge_as_of(
        real_events: &[LedgerEvent],
        obligations: &[ObligationDefinition],
        window: Option<DateRange>,
        include_obligations: bool,
        clock: &dyn Clock,
    ) -> Vec<LedgerEvent> {
        Self::merge(
            real_events,
            obligations,
            window,
            include_obligations,
            clock.today(),
        )
    }

    fn instances_for(
        obligation: &ObligationDefinition,
        window: Option<DateRange>,
        reference: NaiveDate,
    ) -> Vec<LedgerEvent> {
        let up_to = match window {
            Some(range) => {
                if !ObligationAmortizer::is_active_between(obligation, range.start, range.end) {
                    return Vec::new();
                }
                range.end
            }
            None => reference,
        };
        ObligationAmortizer::individual_instances(obligation, up_to)
            .filter(|instance| window.map_or(true, |range| range.contains(instance.date)))
            .filter(|instance| {
                ObligationAmortizer::is_active_between(
                    obligation,
                    instance.date,
                    calendar::month_end(instance.date),
                )
            })
            .collect()
    }
}
