//! Time enrichment: derives hourly bucketing fields from each timestamp

use crate::record::{DataFormatError, LogRecord, RawLogRow, Result};
use chrono::{DateTime, Duration, DurationRound, NaiveDate, Timelike, Utc};

/// A log record together with its hour bucket, hour of day and calendar day
///
/// The derived fields are computed once in [`EnrichedRecord::new`] and are
/// only reachable through accessors, so they always agree with the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    record: LogRecord,
    hour_bucket: DateTime<Utc>,
    hour_of_day: u32,
    day: NaiveDate,
}

impl EnrichedRecord {
    pub fn new(record: LogRecord) -> std::result::Result<Self, chrono::RoundingError> {
        let hour_bucket = record.timestamp.duration_trunc(Duration::hours(1))?;
        Ok(Self {
            hour_of_day: record.timestamp.hour(),
            day: record.timestamp.date_naive(),
            hour_bucket,
            record,
        })
    }

    pub fn record(&self) -> &LogRecord {
        &self.record
    }

    /// Timestamp floored to the start of its hour
    pub fn hour_bucket(&self) -> DateTime<Utc> {
        self.hour_bucket
    }

    /// Hour of the day, 0-23
    pub fn hour_of_day(&self) -> u32 {
        self.hour_of_day
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

/// Enrich already-typed records
pub fn enrich(records: Vec<LogRecord>) -> Result<Vec<EnrichedRecord>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let ts = record.timestamp;
            EnrichedRecord::new(record).map_err(|_| DataFormatError::OutOfRange {
                row: i + 1,
                value: ts.to_rfc3339(),
            })
        })
        .collect()
}

/// Parse raw CSV rows and enrich them in one pass
///
/// The first unparseable row aborts the whole load.
pub fn enrich_rows(rows: Vec<RawLogRow>) -> Result<Vec<EnrichedRecord>> {
    let total = rows.len();
    let enriched = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let row = i + 1;
            let record = LogRecord::from_raw(raw, row)?;
            let ts = record.timestamp;
            EnrichedRecord::new(record).map_err(|_| DataFormatError::OutOfRange {
                row,
                value: ts.to_rfc3339(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("enriched {} of {} rows", enriched.len(), total);
    Ok(enriched)
}
