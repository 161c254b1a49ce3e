//! CLI argument parsing for Hourglass

use crate::config::DashboardConfig;
use crate::dashboard::DashboardParams;
use crate::filter::{PatternSet, RecordFilter};
use crate::stats::Statistic;
use crate::units::TimeUnit;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the rendered dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML page with interactive charts (default)
    Html,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "hourglass")]
#[command(version)]
#[command(about = "Hourly latency and request-volume dashboards from HTTP access logs", long_about = None)]
pub struct Cli {
    /// Access-log CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with default dashboard settings
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Domain to show ("All" for every domain)
    #[arg(short = 'd', long = "domain", value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Keep requests whose URL contains any of these comma-separated substrings
    #[arg(short = 'i', long = "include", value_name = "PATTERNS")]
    pub include: Option<String>,

    /// Drop requests whose URL contains any of these comma-separated substrings
    #[arg(short = 'x', long = "exclude", value_name = "PATTERNS")]
    pub exclude: Option<String>,

    /// Unit for processing time
    #[arg(short = 'u', long = "unit", value_enum)]
    pub unit: Option<TimeUnit>,

    /// Statistic applied to processing time per group
    #[arg(short = 's', long = "statistic", value_enum)]
    pub statistic: Option<Statistic>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Page title for HTML output
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Print the selectable domains and exit
    #[arg(long = "list-domains")]
    pub list_domains: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Dashboard parameters: flags first, then the config file, then defaults
    pub fn params(&self, config: &DashboardConfig) -> DashboardParams {
        let domain = match &self.domain {
            Some(domain) => domain.parse().unwrap_or_default(),
            None => config.domain.clone(),
        };
        let include = match &self.include {
            Some(raw) => PatternSet::parse(raw),
            None => config.include.clone(),
        };
        let exclude = match &self.exclude {
            Some(raw) => PatternSet::parse(raw),
            None => config.exclude.clone(),
        };
        DashboardParams::new(
            RecordFilter::new(domain, include, exclude),
            self.unit.unwrap_or(config.unit),
            self.statistic.unwrap_or(config.statistic),
        )
    }

    pub fn title(&self, config: &DashboardConfig) -> String {
        self.title.clone().unwrap_or_else(|| config.title.clone())
    }
}
