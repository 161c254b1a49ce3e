//! Chart specifications handed to the renderer
//!
//! A [`ChartSpec`] describes one line chart: title, axis labels, the x-axis
//! kind and its series. Renderers (HTML, JSON) consume it without feeding
//! anything back into the pipeline.

use crate::aggregate::{AggregatedPoint, HourKey, HourOfDayKey, RequestCount};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hover format for hour-bucket x values
pub const TIME_HOVER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Hover format for the per-day series name
pub const DAY_HOVER_FORMAT: &str = "%Y-%m-%d";
/// Hover format for statistic values
pub const VALUE_FORMAT: &str = ",.2f";
/// Hover format for request counts
pub const COUNT_FORMAT: &str = ",.0f";

/// What the x axis shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// Hour buckets on a date-time axis
    Time,
    /// Hour of day 0-23, one tick per hour
    HourOfDay,
}

impl XAxis {
    /// Fixed tick labels, `"0:00"` through `"23:00"` for [`XAxis::HourOfDay`]
    pub fn tick_labels(self) -> Option<Vec<String>> {
        match self {
            XAxis::Time => None,
            XAxis::HourOfDay => Some((0..24).map(|h| format!("{}:00", h)).collect()),
        }
    }
}

/// X coordinate of a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Hour(u32),
    Time(String),
}

/// One line of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend entry; `None` for single-series charts
    pub name: Option<String>,
    pub x: Vec<XValue>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// A renderable line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Stable identifier usable as an element id
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: XAxis,
    /// d3-format string for hover values
    pub value_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_labels: Option<Vec<String>>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn new(id: &str, title: String, x_axis: XAxis, y_label: String, value_format: &str) -> Self {
        let x_label = match x_axis {
            XAxis::Time => "Time",
            XAxis::HourOfDay => "Hour of the Day",
        };
        Self {
            id: id.to_string(),
            title,
            x_label: x_label.to_string(),
            y_label,
            x_axis,
            value_format: value_format.to_string(),
            tick_labels: x_axis.tick_labels(),
            series: Vec::new(),
        }
    }

    /// Total number of points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

fn time_x(key: &HourKey) -> XValue {
    XValue::Time(key.hour.format(TIME_HOVER_FORMAT).to_string())
}

fn single_series(x: Vec<XValue>, y: Vec<f64>) -> Vec<Series> {
    vec![Series { name: None, x, y }]
}

/// Split hour-of-day points into one series per day, ordered by day
fn series_per_day<I>(points: I) -> Vec<Series>
where
    I: IntoIterator<Item = (HourOfDayKey, f64)>,
{
    let mut by_day: BTreeMap<NaiveDate, Series> = BTreeMap::new();
    for (key, y) in points {
        let series = by_day.entry(key.day).or_insert_with(|| Series {
            name: Some(key.day.format(DAY_HOVER_FORMAT).to_string()),
            x: Vec::new(),
            y: Vec::new(),
        });
        series.x.push(XValue::Hour(key.hour_of_day));
        series.y.push(y);
    }
    by_day.into_values().collect()
}

/// Chart 1: selected statistic per hour bucket
pub fn hourly_statistic_chart(
    points: &[AggregatedPoint<HourKey>],
    statistic_name: &str,
    unit_label: &str,
) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "hourly-statistic",
        format!(
            "Hourly {} of Target Processing Time {}",
            statistic_name, unit_label
        ),
        XAxis::Time,
        format!("{} Target Processing Time {}", statistic_name, unit_label),
        VALUE_FORMAT,
    );
    chart.series = single_series(
        points.iter().map(|p| time_x(&p.key)).collect(),
        points.iter().map(|p| p.value).collect(),
    );
    chart
}

/// Chart 2: request count per hour bucket
pub fn hourly_count_chart(counts: &[RequestCount<HourKey>]) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "hourly-count",
        "Hourly Request Count".to_string(),
        XAxis::Time,
        "Request Count".to_string(),
        COUNT_FORMAT,
    );
    chart.series = single_series(
        counts.iter().map(|c| time_x(&c.key)).collect(),
        counts.iter().map(|c| c.count as f64).collect(),
    );
    chart
}

/// Chart 3: selected statistic by hour of day, one line per day
pub fn daily_statistic_chart(
    points: &[AggregatedPoint<HourOfDayKey>],
    statistic_name: &str,
    unit_label: &str,
) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "daily-statistic",
        format!(
            "{} of Target Processing Time by Hour of the Day {}",
            statistic_name, unit_label
        ),
        XAxis::HourOfDay,
        format!("{} Target Processing Time {}", statistic_name, unit_label),
        VALUE_FORMAT,
    );
    chart.series = series_per_day(points.iter().map(|p| (p.key, p.value)));
    chart
}

/// Chart 4: request count by hour of day, one line per day
pub fn daily_count_chart(counts: &[RequestCount<HourOfDayKey>]) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "daily-count",
        "Request Count by Hour of the Day Across All Days".to_string(),
        XAxis::HourOfDay,
        "Request Count".to_string(),
        COUNT_FORMAT,
    );
    chart.series = series_per_day(counts.iter().map(|c| (c.key, c.count as f64)));
    chart
}
