//! CSV output format for dashboard reports
//!
//! Writes the four aggregated tables one after another, each preceded by a
//! `# table` comment line and its own header row, for spreadsheet analysis.

use crate::dashboard::DashboardReport;
use crate::stats::Statistic;
use crate::units::TimeUnit;
use chrono::SecondsFormat;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a> {
    report: &'a DashboardReport,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter
    pub fn new(report: &'a DashboardReport) -> Self {
        Self { report }
    }

    /// Header for statistic columns, e.g. `average_ms`
    fn value_column(&self) -> String {
        let stat = match self.report.params.statistic {
            Statistic::Average => "average",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::P90 => "p90",
        };
        let unit = match self.report.params.unit {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
        };
        format!("{}_{}", stat, unit)
    }

    fn section(name: &str, body: Vec<u8>) -> String {
        format!("# {}\n{}", name, String::from_utf8_lossy(&body))
    }

    fn hourly(&self) -> csv::Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["hour", self.value_column().as_str()])?;
        for point in &self.report.hourly {
            wtr.write_record([
                point.key.hour.to_rfc3339_opts(SecondsFormat::Secs, true),
                point.value.to_string(),
            ])?;
        }
        into_bytes(wtr)
    }

    fn hourly_counts(&self) -> csv::Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["hour", "request_count"])?;
        for count in &self.report.hourly_counts {
            wtr.write_record([
                count.key.hour.to_rfc3339_opts(SecondsFormat::Secs, true),
                count.count.to_string(),
            ])?;
        }
        into_bytes(wtr)
    }

    fn daily(&self) -> csv::Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["hour_of_day", "day", self.value_column().as_str()])?;
        for point in &self.report.daily {
            wtr.write_record([
                point.key.hour_of_day.to_string(),
                point.key.day.to_string(),
                point.value.to_string(),
            ])?;
        }
        into_bytes(wtr)
    }

    fn daily_counts(&self) -> csv::Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["hour_of_day", "day", "request_count"])?;
        for count in &self.report.daily_counts {
            wtr.write_record([
                count.key.hour_of_day.to_string(),
                count.key.day.to_string(),
                count.count.to_string(),
            ])?;
        }
        into_bytes(wtr)
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> csv::Result<String> {
        let sections = [
            Self::section("hourly", self.hourly()?),
            Self::section("hourly_request_count", self.hourly_counts()?),
            Self::section("hour_of_day", self.daily()?),
            Self::section("hour_of_day_request_count", self.daily_counts()?),
        ];
        Ok(sections.join("\n"))
    }
}

fn into_bytes(wtr: csv::Writer<Vec<u8>>) -> csv::Result<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
