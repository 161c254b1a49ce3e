//! Record filtering by domain and URL substring patterns
//!
//! Supports:
//! - Domain selection: `All` or one exact domain name
//! - Include patterns: keep rows whose URL contains any pattern
//! - Exclude patterns: drop rows whose URL contains any pattern
//!
//! Patterns are literal, case-sensitive substrings (not regular expressions).

use crate::enrich::EnrichedRecord;
use crate::record::LogRecord;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which domain(s) a render covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DomainSelector {
    #[default]
    All,
    Exact(String),
}

impl DomainSelector {
    pub fn matches(&self, domain: &str) -> bool {
        match self {
            DomainSelector::All => true,
            DomainSelector::Exact(wanted) => wanted == domain,
        }
    }
}

impl FromStr for DomainSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "All" {
            Ok(DomainSelector::All)
        } else {
            Ok(DomainSelector::Exact(s.to_string()))
        }
    }
}

impl From<String> for DomainSelector {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }
}

impl From<DomainSelector> for String {
    fn from(selector: DomainSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for DomainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainSelector::All => f.write_str("All"),
            DomainSelector::Exact(domain) => f.write_str(domain),
        }
    }
}

/// An ordered, de-duplicated list of URL substrings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PatternSet {
    patterns: Vec<String>,
}

impl PatternSet {
    /// Parse comma-separated text, e.g. `"/org/, /api/v2"`
    ///
    /// Entries are trimmed; entries empty after trimming are dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_iter(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    /// True if `text` contains at least one pattern
    pub fn any_in(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }
}

impl<S: AsRef<str>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut patterns: Vec<String> = Vec::new();
        for part in iter {
            let part = part.as_ref().trim();
            if !part.is_empty() && !patterns.iter().any(|p| p == part) {
                patterns.push(part.to_string());
            }
        }
        Self { patterns }
    }
}

impl From<Vec<String>> for PatternSet {
    fn from(patterns: Vec<String>) -> Self {
        patterns.into_iter().collect()
    }
}

impl From<PatternSet> for Vec<String> {
    fn from(set: PatternSet) -> Self {
        set.patterns
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.patterns.join(", "))
    }
}

/// Domain plus include/exclude URL filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub domain: DomainSelector,
    pub include: PatternSet,
    pub exclude: PatternSet,
}

impl RecordFilter {
    /// Create a filter that keeps every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(domain: DomainSelector, include: PatternSet, exclude: PatternSet) -> Self {
        Self {
            domain,
            include,
            exclude,
        }
    }

    /// Check if a record should be kept
    pub fn matches(&self, record: &LogRecord) -> bool {
        self.domain.matches(&record.domain)
            && (self.include.is_empty() || self.include.any_in(&record.url))
            && !self.exclude.any_in(&record.url)
    }

    /// Keep the matching rows, preserving their order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a EnrichedRecord>
    where
        I: IntoIterator<Item = &'a EnrichedRecord>,
    {
        records
            .into_iter()
            .filter(|r| self.matches(r.record()))
            .collect()
    }
}
