use uuid::Uuid;

use super::date;
use crate::core::{EventMerger, FixedClock};
use crate::ledger::{Cycle, DateRange, LedgerEvent, ObligationDefinition};

fn rent() -> ObligationDefinition {
    ObligationDefinition::new(1200.0, Cycle::Monthly, date(2024, 1, 1), None, None).unwrap()
}

fn real_events() -> Vec<LedgerEvent> {
    vec![
        LedgerEvent::outflow(date(2024, 2, 3), 45.0, None),
        LedgerEvent::inflow(date(2024, 2, 25), 3000.0, None),
        LedgerEvent::outflow(date(2024, 3, 14), 80.0, None),
    ]
}

#[test]
fn excluded_obligations_only_filter_real_events() {
    let window = DateRange::month_containing(date(2024, 2, 10));
    let merged = EventMerger::merge(
        &real_events(),
        &[rent()],
        Some(window),
        false,
        date(2024, 6, 1),
    );
    assert_eq!(merged, real_events()[..2].to_vec());
}

#[test]
fn single_month_window_emits_one_instance_per_obligation() {
    let insurance =
        ObligationDefinition::new(600.0, Cycle::Yearly, date(2023, 7, 19), None, None).unwrap();
    let window = DateRange::month_containing(date(2024, 2, 10));
    let merged = EventMerger::merge(
        &real_events(),
        &[rent(), insurance],
        Some(window),
        true,
        date(2024, 6, 1),
    );
    let virtual_instances: Vec<_> = merged.iter().skip(2).collect();
    assert_eq!(virtual_instances.len(), 2);
    assert!(virtual_instances
        .iter()
        .all(|event| event.date == date(2024, 2, 1) && event.is_outflow));
    assert_eq!(virtual_instances[0].amount, 1200.0);
    assert_eq!(virtual_instances[1].amount, 50.0);
}

#[test]
fn inactive_obligations_are_skipped_for_window() {
    let ended = ObligationDefinition::new(
        15.0,
        Cycle::Monthly,
        date(2023, 1, 1),
        Some(date(2024, 2, 1)),
        None,
    )
    .unwrap();
    let not_started =
        ObligationDefinition::new(15.0, Cycle::Monthly, date(2024, 3, 1), None, None).unwrap();
    let window = DateRange::month_containing(date(2024, 2, 10));
    let merged = EventMerger::merge(
        &[],
        &[ended, not_started],
        Some(window),
        true,
        date(2024, 6, 1),
    );
    assert!(merged.is_empty());
}

#[test]
fn multi_month_window_keeps_instances_inside_range() {
    let category = Uuid::new_v4();
    let streaming =
        ObligationDefinition::new(9.99, Cycle::Monthly, date(2023, 5, 5), None, Some(category))
            .unwrap();
    let window = DateRange::new(date(2024, 1, 15), date(2024, 3, 31)).unwrap();
    let merged = EventMerger::merge(
        &real_events(),
        &[streaming],
        Some(window),
        true,
        date(2024, 6, 1),
    );
    assert!(merged.iter().all(|event| window.contains(event.date)));

    let instances: Vec<_> = merged.iter().filter(|event| event.amount == 9.99).collect();
    let dates: Vec<_> = instances.iter().map(|event| event.date).collect();
    assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 3, 1)]);
    assert!(instances
        .iter()
        .all(|event| event.category_id == Some(category)));
}

#[test]
fn full_month_window_includes_its_first_day() {
    let window = DateRange::new(date(2024, 1, 1), date(2024, 3, 15)).unwrap();
    let merged = EventMerger::merge(&[], &[rent()], Some(window), true, date(2024, 6, 1));
    let dates: Vec<_> = merged.iter().map(|event| event.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]
    );
}

#[test]
fn all_time_mode_expands_lifetime_up_to_today() {
    let merged = EventMerger::merge_as_of(
        &real_events(),
        &[rent()],
        None,
        true,
        &FixedClock(date(2024, 5, 20)),
    );
    assert_eq!(merged.len(), real_events().len() + 5);
    let last_instance = merged.last().expect("instances");
    assert_eq!(last_instance.date, date(2024, 5, 1));
}

#[test]
fn all_time_mode_stops_at_obligation_end() {
    let gym = ObligationDefinition::new(
        40.0,
        Cycle::Monthly,
        date(2024, 1, 1),
        Some(date(2024, 3, 1)),
        None,
    )
    .unwrap();
    let merged = EventMerger::merge(&[], &[gym], None, true, date(2024, 12, 31));
    let dates: Vec<_> = merged.iter().map(|event| event.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1)]);
}
