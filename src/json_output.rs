//! JSON output format for dashboard reports
//!
//! Emits the aggregated tables together with the chart specifications so
//! another renderer can draw them without recomputing anything.

use crate::chart::ChartSpec;
use crate::dashboard::DashboardReport;
use serde::Serialize;

/// Top-level JSON document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub report: &'a DashboardReport,
    pub charts: Vec<ChartSpec>,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a DashboardReport) -> Self {
        Self {
            charts: report.charts(),
            report,
        }
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
