//! Dashboard session: one enriched table, many renders
//!
//! [`Dashboard`] owns the enriched records for the lifetime of a session.
//! Each call to [`Dashboard::render`] runs the full pipeline for one set of
//! parameters: filter, unit conversion, the four aggregations. Renders are
//! synchronous and share no mutable state.

use crate::aggregate::{
    aggregate, count, AggregatedPoint, ByHour, ByHourOfDay, HourKey, HourOfDayKey,
    RequestCount,
};
use crate::chart::{self, ChartSpec};
use crate::enrich::{enrich_rows, EnrichedRecord};
use crate::filter::{DomainSelector, PatternSet, RecordFilter};
use crate::record::{RawLogRow, Result};
use crate::source;
use crate::stats::Statistic;
use crate::units::{scale, TimeUnit};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-selected parameters for one render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardParams {
    pub filter: RecordFilter,
    pub unit: TimeUnit,
    pub statistic: Statistic,
}

impl DashboardParams {
    pub fn new(filter: RecordFilter, unit: TimeUnit, statistic: Statistic) -> Self {
        Self {
            filter,
            unit,
            statistic,
        }
    }
}

/// Everything one render produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub params: DashboardParams,
    /// Records in the session table
    pub total_records: usize,
    /// Records left after filtering
    pub matched_records: usize,
    pub unit_label: String,
    pub hourly: Vec<AggregatedPoint<HourKey>>,
    pub hourly_counts: Vec<RequestCount<HourKey>>,
    pub daily: Vec<AggregatedPoint<HourOfDayKey>>,
    pub daily_counts: Vec<RequestCount<HourOfDayKey>>,
}

impl DashboardReport {
    /// True when the filters matched no records
    pub fn is_empty(&self) -> bool {
        self.matched_records == 0
    }

    /// The four charts, in display order
    pub fn charts(&self) -> Vec<ChartSpec> {
        let name = self.params.statistic.display_name();
        vec![
            chart::hourly_statistic_chart(&self.hourly, name, &self.unit_label),
            chart::hourly_count_chart(&self.hourly_counts),
            chart::daily_statistic_chart(&self.daily, name, &self.unit_label),
            chart::daily_count_chart(&self.daily_counts),
        ]
    }
}

/// An enriched access-log table ready to be rendered
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<EnrichedRecord>,
}

impl Dashboard {
    pub fn new(records: Vec<EnrichedRecord>) -> Self {
        Self { records }
    }

    /// Parse and enrich raw rows
    pub fn from_rows(rows: Vec<RawLogRow>) -> Result<Self> {
        Ok(Self::new(enrich_rows(rows)?))
    }

    /// Load, parse and enrich an access-log CSV file
    pub fn load(path: &Path) -> Result<Self> {
        let dashboard = Self::from_rows(source::load_csv(path)?)?;
        tracing::info!(
            "loaded {} records from {}",
            dashboard.records.len(),
            path.display()
        );
        Ok(dashboard)
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct domains in order of first appearance
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = Vec::new();
        for record in &self.records {
            let domain = record.record().domain.as_str();
            if !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        domains
    }

    /// Domain selector options: `All` followed by every known domain
    pub fn domain_options(&self) -> Vec<DomainSelector> {
        std::iter::once(DomainSelector::All)
            .chain(
                self.domains()
                    .into_iter()
                    .map(|d| DomainSelector::Exact(d.to_string())),
            )
            .collect()
    }

    /// Run filter, unit conversion and aggregation for `params`
    pub fn render(&self, params: &DashboardParams) -> DashboardReport {
        let filtered = params.filter.apply(&self.records);
        tracing::debug!(
            "filter kept {} of {} records (domain={}, include=[{}], exclude=[{}])",
            filtered.len(),
            self.records.len(),
            params.filter.domain,
            params.filter.include,
            params.filter.exclude
        );
        if filtered.is_empty() {
            tracing::warn!("no records matched the current filters; charts will be empty");
        }

        let table = scale(filtered.iter().copied(), params.unit);
        let report = DashboardReport {
            params: params.clone(),
            total_records: self.records.len(),
            matched_records: table.len(),
            unit_label: table.label().to_string(),
            hourly: aggregate::<ByHour>(&table, params.statistic),
            hourly_counts: count::<ByHour>(&table),
            daily: aggregate::<ByHourOfDay>(&table, params.statistic),
            daily_counts: count::<ByHourOfDay>(&table),
        };
        tracing::debug!(
            "aggregated {} hourly and {} hour-of-day groups ({} {})",
            report.hourly.len(),
            report.daily.len(),
            params.statistic,
            report.unit_label
        );
        report
    }

    /// Convenience for callers holding raw pattern text
    pub fn render_with(
        &self,
        domain: &str,
        include: &str,
        exclude: &str,
        unit: TimeUnit,
        statistic: Statistic,
    ) -> DashboardReport {
        let filter = RecordFilter::new(
            domain.parse().unwrap_or_default(),
            PatternSet::parse(include),
            PatternSet::parse(exclude),
        );
        self.render(&DashboardParams::new(filter, unit, statistic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::raw_row;

    fn dashboard() -> Dashboard {
        Dashboard::from_rows(vec![
            raw_row("2024-08-22T04:05:40Z", "0.001", "https://a.com/org/1", "a.com"),
            raw_row("2024-08-22T04:55:00Z", "0.003", "https://a.com/org/2", "a.com"),
            raw_row("2024-08-22T05:10:00Z", "0.500", "https://b.com/org/health", "b.com"),
            raw_row("2024-08-23T04:10:00Z", "0.010", "https://a.com/api/x", "a.com"),
        ])
        .unwrap()
    }

    #[test]
    fn test_domains_first_appearance_order() {
        let d = dashboard();
        assert_eq!(d.domains(), vec!["a.com", "b.com"]);
        let options = d.domain_options();
        assert_eq!(options[0], DomainSelector::All);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn test_render_default_params() {
        let report = dashboard().render(&DashboardParams::default());
        assert_eq!(report.total_records, 4);
        assert_eq!(report.matched_records, 4);
        assert_eq!(report.unit_label, "(s)");
        assert_eq!(report.hourly.len(), 3);
        assert_eq!(report.hourly_counts.iter().map(|c| c.count).sum::<u64>(), 4);
        assert_eq!(report.daily.len(), 3);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_render_scenario_average_milliseconds() {
        let report = dashboard().render_with(
            "a.com",
            "/org/",
            "",
            TimeUnit::Milliseconds,
            Statistic::Average,
        );
        assert_eq!(report.matched_records, 2);
        assert_eq!(report.hourly.len(), 1);
        assert_eq!(
            report.hourly[0].key.hour.to_rfc3339(),
            "2024-08-22T04:00:00+00:00"
        );
        assert!((report.hourly[0].value - 2.0).abs() < 1e-9);
        assert_eq!(report.unit_label, "(ms)");
    }

    #[test]
    fn test_render_empty_result_is_not_an_error() {
        let report = dashboard().render_with(
            "All",
            "/nothing-here/",
            "",
            TimeUnit::Seconds,
            Statistic::P90,
        );
        assert!(report.is_empty());
        assert!(report.hourly.is_empty());
        assert!(report.hourly_counts.is_empty());
        assert!(report.daily.is_empty());
        assert!(report.daily_counts.is_empty());
        assert!(report.charts().iter().all(ChartSpec::is_empty));
    }

    #[test]
    fn test_rerender_does_not_mutate_source() {
        let d = dashboard();
        let _ = d.render_with("All", "", "", TimeUnit::Milliseconds, Statistic::Max);
        let seconds = d.render_with("All", "", "", TimeUnit::Seconds, Statistic::Max);
        let max_hour_5 = seconds
            .hourly
            .iter()
            .find(|p| p.key.hour.to_rfc3339() == "2024-08-22T05:00:00+00:00")
            .unwrap();
        assert_eq!(max_hour_5.value, 0.5);
        assert_eq!(d.records()[2].record().processing_time, 0.5);
    }

    #[test]
    fn test_charts_titles_follow_params() {
        let report = dashboard().render_with(
            "All",
            "",
            "",
            TimeUnit::Milliseconds,
            Statistic::P90,
        );
        let titles: Vec<String> = report.charts().into_iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec![
                "Hourly 90th Percentile of Target Processing Time (ms)",
                "Hourly Request Count",
                "90th Percentile of Target Processing Time by Hour of the Day (ms)",
                "Request Count by Hour of the Day Across All Days",
            ]
        );
    }

    #[test]
    fn test_from_rows_bad_timestamp_fails() {
        let err = Dashboard::from_rows(vec![raw_row("soon", "0.1", "/", "a.com")]).unwrap_err();
        assert!(err.to_string().contains("timestamp"));
    }
}
