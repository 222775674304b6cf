use budget_analytics::core::{
    ChangePointAdvisor, EventMerger, ProjectionCalculator, SeriesReconstructor,
};
use budget_analytics::ledger::{
    CategorySnapshot, Cycle, DateRange, LedgerEvent, ObligationDefinition, SeriesPoint,
};
use budget_analytics::AnalyticsConfig;
use chrono::NaiveDate;
use uuid::Uuid;

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monthly_obligation_builds_cumulative_cashflow() {
    let rent = ObligationDefinition::new(120.0, Cycle::Monthly, sample_date(2024, 1, 1), None, None)
        .expect("valid obligation");
    let window = DateRange::new(sample_date(2024, 1, 1), sample_date(2024, 4, 1)).expect("window");

    let merged = EventMerger::merge(&[], &[rent], Some(window), true, sample_date(2024, 4, 1));
    let series = SeriesReconstructor::build_running_balance(&merged, window.start);

    assert_eq!(
        series,
        vec![
            SeriesPoint::new(sample_date(2024, 1, 1), -120.0),
            SeriesPoint::new(sample_date(2024, 2, 1), -240.0),
            SeriesPoint::new(sample_date(2024, 3, 1), -360.0),
            SeriesPoint::new(sample_date(2024, 4, 1), -480.0),
        ]
    );
}

#[test]
fn disabling_obligations_leaves_only_real_cashflow() {
    let rent = ObligationDefinition::new(120.0, Cycle::Monthly, sample_date(2024, 1, 1), None, None)
        .expect("valid obligation");
    let salary = LedgerEvent::inflow(sample_date(2024, 1, 25), 2000.0, None);
    let config = AnalyticsConfig {
        include_obligations: false,
        ..AnalyticsConfig::default()
    };

    let merged = EventMerger::merge(
        &[salary],
        &[rent],
        None,
        config.include_obligations,
        sample_date(2024, 4, 1),
    );
    let series = SeriesReconstructor::build_running_balance(&merged, sample_date(2024, 1, 1));
    assert_eq!(
        series,
        vec![
            SeriesPoint::new(sample_date(2024, 1, 1), 0.0),
            SeriesPoint::new(sample_date(2024, 1, 25), 2000.0),
        ]
    );
}

#[test]
fn net_worth_history_feeds_projection() {
    let savings = Uuid::new_v4();
    let retirement = Uuid::new_v4();
    let snapshots = vec![
        CategorySnapshot::new(savings, sample_date(2023, 3, 1), 2000.0),
        CategorySnapshot::new(retirement, sample_date(2023, 3, 1), 8000.0),
        CategorySnapshot::new(savings, sample_date(2023, 9, 1), 3000.0),
        CategorySnapshot::new(retirement, sample_date(2024, 3, 1), 10000.0),
        CategorySnapshot::new(savings, sample_date(2024, 3, 1), 4000.0),
    ];

    let series = SeriesReconstructor::net_worth_series(&snapshots, &[savings, retirement]);
    let values: Vec<f64> = series.iter().map(|point| point.value).collect();
    assert_eq!(values, vec![10000.0, 11000.0, 14000.0]);

    let projection = ProjectionCalculator::project_series(&series, sample_date(2024, 3, 1), 5);
    assert_eq!(projection.yearly_rate, 4000.0);
    assert_eq!(projection.projected_total, 34000.0);
    let change = projection.percent_change.expect("non-zero net worth");
    assert!((change - (34000.0 / 14000.0 - 1.0)).abs() < 1e-12);
}

#[test]
fn recurring_overspend_is_flagged_from_merged_events() {
    let subscription =
        ObligationDefinition::new(300.0, Cycle::Monthly, sample_date(2023, 1, 1), None, None)
            .expect("valid obligation");
    let groceries: Vec<LedgerEvent> = (1..=6)
        .map(|month| LedgerEvent::outflow(sample_date(2024, month, 12), 900.0, None))
        .collect();
    let today = sample_date(2024, 7, 3);

    let merged = EventMerger::merge(&groceries, &[subscription], None, true, today);
    let config = AnalyticsConfig {
        current_budget: 1000.0,
        ..AnalyticsConfig::default()
    };
    let recommendation = ChangePointAdvisor::evaluate_ledger(&merged, &config, today);
    assert!(recommendation.should_suggest);
    assert_eq!(recommendation.suggested_amount, 1200.0);
}
