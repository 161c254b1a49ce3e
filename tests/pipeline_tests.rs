//! End-to-end pipeline tests against the fixture access log
//!
//! Load -> enrich -> filter -> unit conversion -> aggregation -> charts

use hourglass::dashboard::{Dashboard, DashboardParams};
use hourglass::filter::{DomainSelector, PatternSet, RecordFilter};
use hourglass::record::DataFormatError;
use hourglass::stats::Statistic;
use hourglass::units::TimeUnit;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dashboard() -> Dashboard {
    Dashboard::load(&fixture("access_log.csv")).unwrap()
}

fn push_params(unit: TimeUnit, statistic: Statistic) -> DashboardParams {
    DashboardParams::new(
        RecordFilter::new(
            DomainSelector::Exact("chat.example.com".to_string()),
            PatternSet::parse("/org/"),
            PatternSet::parse("health"),
        ),
        unit,
        statistic,
    )
}

#[test]
fn test_load_fixture() {
    let d = dashboard();
    assert_eq!(d.len(), 7);
    assert_eq!(d.domains(), vec!["chat.example.com", "api.example.com"]);
}

#[test]
fn test_unfiltered_render() {
    let report = dashboard().render(&DashboardParams::default());
    assert_eq!(report.matched_records, 7);
    assert_eq!(report.hourly.len(), 4);
    let counts: Vec<u64> = report.hourly_counts.iter().map(|c| c.count).collect();
    assert_eq!(counts, vec![3, 2, 1, 1]);
}

#[test]
fn test_push_average_in_milliseconds() {
    let report = dashboard().render(&push_params(TimeUnit::Milliseconds, Statistic::Average));

    assert_eq!(report.matched_records, 3);
    assert_eq!(report.unit_label, "(ms)");

    let hourly: Vec<(String, f64)> = report
        .hourly
        .iter()
        .map(|p| (p.key.hour.to_rfc3339(), p.value))
        .collect();
    assert_eq!(hourly.len(), 2);
    assert_eq!(hourly[0].0, "2024-08-22T04:00:00+00:00");
    assert!((hourly[0].1 - 2.0).abs() < 1e-9);
    assert_eq!(hourly[1].0, "2024-08-23T04:00:00+00:00");
    assert!((hourly[1].1 - 5.0).abs() < 1e-9);

    assert_eq!(report.daily.len(), 2);
    assert!(report.daily.iter().all(|p| p.key.hour_of_day == 4));
    assert_eq!(report.daily_counts[0].count, 2);
    assert_eq!(report.daily_counts[1].count, 1);
}

#[test]
fn test_push_average_in_seconds() {
    let report = dashboard().render(&push_params(TimeUnit::Seconds, Statistic::Average));
    assert!((report.hourly[0].value - 0.002).abs() < 1e-12);
    assert_eq!(report.unit_label, "(s)");
}

#[test]
fn test_health_probe_excluded_despite_include() {
    let d = dashboard();
    let with_exclude = d.render(&push_params(TimeUnit::Seconds, Statistic::Max));
    let max_04 = with_exclude.hourly[0].value;
    assert!(max_04 < 0.25, "health check leaked into max: {}", max_04);

    let mut params = push_params(TimeUnit::Seconds, Statistic::Max);
    params.filter.exclude = PatternSet::default();
    let without_exclude = d.render(&params);
    assert_eq!(without_exclude.hourly[0].value, 0.25);
}

#[test]
fn test_statistics_on_mixed_hour() {
    let d = dashboard();
    let params = |statistic| {
        DashboardParams::new(
            RecordFilter::new(
                DomainSelector::Exact("chat.example.com".to_string()),
                PatternSet::default(),
                PatternSet::default(),
            ),
            TimeUnit::Seconds,
            statistic,
        )
    };

    // 2024-08-22 04h holds 0.001, 0.003 and 0.250
    let first = |statistic| d.render(&params(statistic)).hourly[0].value;
    assert_eq!(first(Statistic::Min), 0.001);
    assert_eq!(first(Statistic::Max), 0.25);
    assert!((first(Statistic::Average) - 0.254 / 3.0).abs() < 1e-12);
    // rank 0.9 * 2 = 1.8 -> 0.003 + 0.8 * (0.250 - 0.003)
    assert!((first(Statistic::P90) - 0.2006).abs() < 1e-12);
}

#[test]
fn test_empty_filter_result() {
    let params = DashboardParams::new(
        RecordFilter::new(
            DomainSelector::Exact("nope.example.com".to_string()),
            PatternSet::default(),
            PatternSet::default(),
        ),
        TimeUnit::Milliseconds,
        Statistic::P90,
    );
    let report = dashboard().render(&params);

    assert!(report.is_empty());
    assert!(report.hourly.is_empty());
    assert!(report.hourly_counts.is_empty());
    assert!(report.daily.is_empty());
    assert!(report.daily_counts.is_empty());
    assert_eq!(report.charts().len(), 4);
}

#[test]
fn test_render_is_repeatable() {
    let d = dashboard();
    for statistic in Statistic::ALL {
        let params = push_params(TimeUnit::Milliseconds, statistic);
        assert_eq!(d.render(&params), d.render(&params));
    }
}

#[test]
fn test_bad_timestamp_fails_load() {
    let err = Dashboard::load(&fixture("bad_timestamp.csv")).unwrap_err();
    assert!(matches!(
        err,
        DataFormatError::InvalidTimestamp { row: 2, .. }
    ));
}

#[test]
fn test_chart_ticks_for_hour_of_day_charts() {
    let report = dashboard().render(&DashboardParams::default());
    let charts = report.charts();
    assert!(charts[0].tick_labels.is_none());
    assert!(charts[1].tick_labels.is_none());
    for chart in &charts[2..] {
        let ticks = chart.tick_labels.as_ref().unwrap();
        assert_eq!(ticks.len(), 24);
        assert_eq!(ticks.first().map(String::as_str), Some("0:00"));
        assert_eq!(ticks.last().map(String::as_str), Some("23:00"));
        // One series per calendar day
        assert_eq!(chart.series.len(), 2);
    }
}
