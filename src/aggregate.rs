//! Grouped aggregation of scaled processing times
//!
//! A [`Grouping`] maps each record to a group key. [`aggregate`] reduces the
//! processing times of every group with a [`Statistic`] and [`count`] counts
//! the rows per group. Both return one row per key in ascending key order,
//! which makes the output reproducible for a given input.

use crate::enrich::EnrichedRecord;
use crate::stats::Statistic;
use crate::units::ScaledTable;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Partitioning of records into groups
pub trait Grouping {
    type Key: Ord + Clone;

    fn key(record: &EnrichedRecord) -> Self::Key;
}

/// One group per hour bucket
#[derive(Debug, Clone, Copy)]
pub struct ByHour;

/// Key of the [`ByHour`] grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourKey {
    pub hour: DateTime<Utc>,
}

impl Grouping for ByHour {
    type Key = HourKey;

    fn key(record: &EnrichedRecord) -> Self::Key {
        HourKey {
            hour: record.hour_bucket(),
        }
    }
}

/// One group per (hour of day, calendar day) pair
#[derive(Debug, Clone, Copy)]
pub struct ByHourOfDay;

/// Key of the [`ByHourOfDay`] grouping, ordered by hour first, then day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourOfDayKey {
    pub hour_of_day: u32,
    pub day: NaiveDate,
}

impl Grouping for ByHourOfDay {
    type Key = HourOfDayKey;

    fn key(record: &EnrichedRecord) -> Self::Key {
        HourOfDayKey {
            hour_of_day: record.hour_of_day(),
            day: record.day(),
        }
    }
}

/// Reduced processing time of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint<K> {
    #[serde(flatten)]
    pub key: K,
    pub value: f64,
}

/// Number of requests in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCount<K> {
    #[serde(flatten)]
    pub key: K,
    pub count: u64,
}

fn group_values<G: Grouping>(table: &ScaledTable<'_>) -> BTreeMap<G::Key, Vec<f64>> {
    let mut groups: BTreeMap<G::Key, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        groups
            .entry(G::key(row.record))
            .or_default()
            .push(row.processing_time);
    }
    groups
}

/// Reduce each group's processing times with `statistic`
pub fn aggregate<G: Grouping>(
    table: &ScaledTable<'_>,
    statistic: Statistic,
) -> Vec<AggregatedPoint<G::Key>> {
    group_values::<G>(table)
        .into_iter()
        .filter_map(|(key, values)| {
            statistic
                .reduce(&values)
                .map(|value| AggregatedPoint { key, value })
        })
        .collect()
}

/// Count the rows in each group
pub fn count<G: Grouping>(table: &ScaledTable<'_>) -> Vec<RequestCount<G::Key>> {
    let mut counts: BTreeMap<G::Key, u64> = BTreeMap::new();
    for row in &table.rows {
        *counts.entry(G::key(row.record)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| RequestCount { key, count })
        .collect()
}
