//! Processing-time unit conversion
//!
//! Conversion never touches the source records: [`scale`] builds a new table
//! of [`ScaledRecord`]s that borrow the enriched rows and carry the rescaled
//! value alongside them.

use crate::enrich::EnrichedRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit for processing time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Milliseconds,
}

impl TimeUnit {
    /// Axis label suffix, `"(s)"` or `"(ms)"`
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "(s)",
            TimeUnit::Milliseconds => "(ms)",
        }
    }

    fn factor(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1000.0,
        }
    }

    /// Express a duration given in seconds in this unit
    pub fn from_seconds(self, seconds: f64) -> f64 {
        seconds * self.factor()
    }

    /// Inverse of [`TimeUnit::from_seconds`]
    pub fn to_seconds(self, value: f64) -> f64 {
        value / self.factor()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => f.write_str("Seconds"),
            TimeUnit::Milliseconds => f.write_str("Milliseconds"),
        }
    }
}

/// An enriched record with its processing time in the display unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRecord<'a> {
    pub record: &'a EnrichedRecord,
    pub processing_time: f64,
}

/// Filtered rows rescaled to one unit
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledTable<'a> {
    pub unit: TimeUnit,
    pub rows: Vec<ScaledRecord<'a>>,
}

impl ScaledTable<'_> {
    pub fn label(&self) -> &'static str {
        self.unit.label()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rescale processing times into `unit`
pub fn scale<'a, I>(records: I, unit: TimeUnit) -> ScaledTable<'a>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let rows = records
        .into_iter()
        .map(|record| ScaledRecord {
            record,
            processing_time: unit.from_seconds(record.record().processing_time),
        })
        .collect();
    ScaledTable { unit, rows }
}
