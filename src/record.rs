//! Access-log records and their parsing
//!
//! A [`RawLogRow`] is one CSV row exactly as exported from the load balancer
//! log table. [`LogRecord::from_raw`] turns it into a typed record, failing
//! with [`DataFormatError`] when a timestamp or numeric field is unusable.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or parsing access-log data
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("row {row}: unparseable timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: invalid {field} value {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: timestamp {value} cannot be bucketed")]
    OutOfRange { row: usize, value: String },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DataFormatError>;

/// One untyped access-log row, using the exported column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogRow {
    pub time: String,
    pub client_ip: String,
    pub target_processing_time: String,
    pub target_status_code: String,
    pub request_verb: String,
    pub request_url: String,
    pub request_proto: String,
    pub user_agent: String,
    pub target_group_arn: String,
    pub domain_name: String,
}

/// A single HTTP request served by the load balancer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub client_ip: String,
    /// Time the target took to answer, in seconds
    pub processing_time: f64,
    pub status_code: u16,
    pub verb: String,
    pub url: String,
    pub protocol: String,
    pub user_agent: String,
    pub target_group_id: String,
    pub domain: String,
}

impl LogRecord {
    /// Parse a raw row; `row` is the 1-based data row used in error messages
    pub fn from_raw(raw: RawLogRow, row: usize) -> Result<Self> {
        let timestamp = parse_timestamp(&raw.time).ok_or_else(|| {
            DataFormatError::InvalidTimestamp {
                row,
                value: raw.time.clone(),
            }
        })?;
        let processing_time = parse_processing_time(&raw.target_processing_time, row)?;
        let status_code = raw.target_status_code.trim().parse::<u16>().map_err(|_| {
            DataFormatError::InvalidNumber {
                row,
                field: "target_status_code",
                value: raw.target_status_code.clone(),
            }
        })?;

        Ok(Self {
            timestamp,
            client_ip: raw.client_ip,
            processing_time,
            status_code,
            verb: raw.request_verb,
            url: raw.request_url,
            protocol: raw.request_proto,
            user_agent: raw.user_agent,
            target_group_id: raw.target_group_arn,
            domain: raw.domain_name,
        })
    }
}

fn parse_processing_time(value: &str, row: usize) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
        _ => Err(DataFormatError::InvalidNumber {
            row,
            field: "target_processing_time",
            value: value.to_string(),
        }),
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an RFC 3339 instant, or a naive date-time taken as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) fn raw_row(time: &str, seconds: &str, url: &str, domain: &str) -> RawLogRow {
    RawLogRow {
        time: time.to_string(),
        client_ip: "3.208.102.136".to_string(),
        target_processing_time: seconds.to_string(),
        target_status_code: "200".to_string(),
        request_verb: "POST".to_string(),
        request_url: url.to_string(),
        request_proto: "HTTP/1.1".to_string(),
        user_agent: "NING/1.0".to_string(),
        target_group_arn: "arn:aws:elasticloadbalancing:us-east-1:1:targetgroup/push/1"
            .to_string(),
        domain_name: domain.to_string(),
    }
}
