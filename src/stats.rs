//! Per-group reduction statistics for processing time
//!
//! One [`Statistic`] tag selects the reduction; the grouping it runs over is
//! chosen separately in [`crate::aggregate`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reduction applied to the processing times of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean
    #[default]
    Average,
    Min,
    Max,
    /// 90th percentile, linear interpolation between order statistics
    #[value(name = "p90", alias = "90th-percentile")]
    #[serde(rename = "p90", alias = "90th percentile")]
    P90,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Average,
        Statistic::Min,
        Statistic::Max,
        Statistic::P90,
    ];

    /// Name shown in chart titles and axis labels
    pub fn display_name(self) -> &'static str {
        match self {
            Statistic::Average => "Average",
            Statistic::Min => "Min",
            Statistic::Max => "Max",
            Statistic::P90 => "90th Percentile",
        }
    }

    /// Reduce a group of values; `None` only for an empty group
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let value = match self {
            Statistic::Average => mean(values),
            Statistic::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Statistic::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Statistic::P90 => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                calculate_percentile(&sorted, 90.0)
            }
        };
        Some(value)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate percentile from sorted data
///
/// Uses the inclusive rank `p/100 * (n - 1)` and interpolates linearly
/// between the two neighbouring order statistics.
pub fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] + (sorted_data[upper] - sorted_data[lower]) * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_has_no_value() {
        for stat in Statistic::ALL {
            assert_eq!(stat.reduce(&[]), None);
        }
    }

    #[test]
    fn test_single_value_group() {
        for stat in Statistic::ALL {
            assert_eq!(stat.reduce(&[0.042]), Some(0.042), "{stat}");
        }
    }

    #[test]
    fn test_average() {
        let v = Statistic::Average.reduce(&[0.001, 0.003]).unwrap();
        assert!((v - 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_min_max() {
        let data = [5.0, 1.0, 9.0, 3.0];
        assert_eq!(Statistic::Min.reduce(&data), Some(1.0));
        assert_eq!(Statistic::Max.reduce(&data), Some(9.0));
    }

    #[test]
    fn test_p90_interpolates() {
        // rank = 0.9 * 9 = 8.1 -> 9 + 0.1 * (10 - 9)
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let v = Statistic::P90.reduce(&data).unwrap();
        assert!((v - 9.1).abs() < 1e-12);
    }

    #[test]
    fn test_p90_unsorted_input() {
        let v = Statistic::P90.reduce(&[10.0, 1.0, 5.0]).unwrap();
        // rank = 1.8 over [1, 5, 10] -> 5 + 0.8 * 5
        assert!((v - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_exact_rank() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0];
        assert_eq!(calculate_percentile(&data, 90.0), 10.0);
        assert_eq!(calculate_percentile(&data, 0.0), 1.0);
        assert_eq!(calculate_percentile(&data, 100.0), 11.0);
    }

    #[test]
    fn test_percentile_constant_data() {
        assert_eq!(calculate_percentile(&[2.5, 2.5, 2.5], 90.0), 2.5);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Statistic::P90.to_string(), "90th Percentile");
        assert_eq!(Statistic::Average.to_string(), "Average");
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(Statistic::from_str("p90", true).unwrap(), Statistic::P90);
        assert_eq!(
            Statistic::from_str("90th-percentile", true).unwrap(),
            Statistic::P90
        );
        assert_eq!(Statistic::from_str("max", true).unwrap(), Statistic::Max);
        assert!(Statistic::from_str("median", true).is_err());
    }
}
