//! Hourglass - hourly latency dashboards from HTTP access logs
//!
//! This library loads load-balancer access logs, filters them by domain and
//! URL substrings, and aggregates target processing time per hour bucket and
//! per hour of day. The results are rendered as line charts (HTML), or
//! exported as JSON or CSV tables.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dashboard;
pub mod enrich;
pub mod filter;
pub mod html_output;
pub mod json_output;
pub mod record;
pub mod source;
pub mod stats;
pub mod units;
