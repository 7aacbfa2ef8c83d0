#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart derivations for the analytics view.
//!
//! Every function here is a pure reshaping of an already-fetched payload:
//! month labels for the trend axis, bar heights scaled to the busiest month,
//! the top subfactor per risk category, and pie arc geometry for the
//! severity donut.

use drive_smart_api_models::{MonthlyTrends, RiskFactors, SeverityDistribution};

/// Dash-array circumference of the severity donut (radius-40 unit circle).
pub const FULL_CIRCUMFERENCE: f64 = 251.2;

/// Smallest bar height in percent, so low months stay visible.
pub const MIN_BAR_HEIGHT: f64 = 5.0;

/// One bar of the monthly trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBar {
    /// Short month label (`"Jan"`), or the raw string when unparseable.
    pub label: String,
    /// Incident count for the month.
    pub count: u64,
    /// Bar height in percent of the tallest bar, floored at
    /// [`MIN_BAR_HEIGHT`].
    pub height: f64,
}

/// The highest-count subfactor within one risk category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskFactorSummary {
    /// Category label (weather, road surface, ...).
    pub category: String,
    /// Count of the single largest subfactor, not the category sum.
    pub top_count: u64,
}

/// One arc of the severity pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Severity name for this slice.
    pub label: String,
    /// Incident count in this slice.
    pub count: u64,
    /// Arc length along the donut circumference.
    pub length: f64,
    /// Cumulative length of all prior arcs.
    pub offset: f64,
}

/// Converts a `"YYYY-MM"` month key to its short month name.
///
/// Returns the input unchanged when it does not parse.
#[must_use]
pub fn month_label(month: &str) -> String {
    let Some((year, month_num)) = month.split_once('-') else {
        return month.to_string();
    };
    let parsed = year
        .parse::<i32>()
        .ok()
        .zip(month_num.parse::<u32>().ok())
        .and_then(|(y, m)| chrono::NaiveDate::from_ymd_opt(y, m, 1));
    parsed.map_or_else(|| month.to_string(), |date| date.format("%b").to_string())
}

/// Builds trend-chart bars, linearly scaled against the busiest month.
#[must_use]
pub fn monthly_bars(trends: &MonthlyTrends) -> Vec<MonthBar> {
    let max = trends
        .trends
        .iter()
        .map(|t| t.incidents)
        .max()
        .unwrap_or(0);

    trends
        .trends
        .iter()
        .map(|trend| {
            #[allow(clippy::cast_precision_loss)]
            let height = if max == 0 {
                MIN_BAR_HEIGHT
            } else {
                (trend.incidents as f64 / max as f64 * 100.0).max(MIN_BAR_HEIGHT)
            };
            MonthBar {
                label: month_label(&trend.month),
                count: trend.incidents,
                height,
            }
        })
        .collect()
}

/// Reduces each risk category to its single highest-count subfactor.
///
/// The accumulator starts at 0 and is replaced only on a strictly greater
/// count, so an empty category yields 0 and ties keep the first entry.
#[must_use]
pub fn top_risk_factors(factors: &RiskFactors) -> Vec<RiskFactorSummary> {
    factors
        .factors
        .iter()
        .map(|(category, subfactors)| {
            let mut top_count = 0;
            for subfactor in subfactors {
                if subfactor.count > top_count {
                    top_count = subfactor.count;
                }
            }
            RiskFactorSummary {
                category: category.clone(),
                top_count,
            }
        })
        .collect()
}

/// Computes pie arc lengths and offsets for the severity distribution.
///
/// Arc length is `count / total * 251.2` with the denominator floored at 1,
/// and each offset is the cumulative length of the arcs before it.
#[must_use]
pub fn severity_pie(distribution: &SeverityDistribution) -> Vec<PieSlice> {
    #[allow(clippy::cast_precision_loss)]
    let total = distribution.total_incidents.max(1) as f64;

    let mut offset = 0.0;
    distribution
        .distribution
        .iter()
        .map(|bucket| {
            #[allow(clippy::cast_precision_loss)]
            let length = bucket.count as f64 / total * FULL_CIRCUMFERENCE;
            let slice = PieSlice {
                label: bucket.severity_level.clone(),
                count: bucket.count,
                length,
                offset,
            };
            offset += length;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_smart_api_models::{MonthlyTrend, RiskSubfactor, SeverityBucket};

    fn bucket(level: &str, count: u64) -> SeverityBucket {
        SeverityBucket {
            severity_level: level.to_string(),
            count,
            percentage: None,
        }
    }

    #[test]
    fn month_label_parses_and_falls_back() {
        assert_eq!(month_label("2024-01"), "Jan");
        assert_eq!(month_label("2023-12"), "Dec");
        assert_eq!(month_label("not-a-month"), "not-a-month");
        assert_eq!(month_label("2024-13"), "2024-13");
        assert_eq!(month_label("202401"), "202401");
    }

    #[test]
    fn bars_scale_against_max_month() {
        let trends = MonthlyTrends {
            trends: vec![
                MonthlyTrend {
                    month: "2024-01".to_string(),
                    incidents: 50,
                },
                MonthlyTrend {
                    month: "2024-02".to_string(),
                    incidents: 100,
                },
                MonthlyTrend {
                    month: "2024-03".to_string(),
                    incidents: 1,
                },
            ],
        };
        let bars = monthly_bars(&trends);
        assert!((bars[0].height - 50.0).abs() < 1e-9);
        assert!((bars[1].height - 100.0).abs() < 1e-9);
        // 1% would be invisible; floored at the minimum height.
        assert!((bars[2].height - MIN_BAR_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn bars_with_no_incidents_use_floor_height() {
        let trends = MonthlyTrends {
            trends: vec![MonthlyTrend {
                month: "2024-01".to_string(),
                incidents: 0,
            }],
        };
        let bars = monthly_bars(&trends);
        assert!((bars[0].height - MIN_BAR_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn category_reduces_to_top_subfactor_not_sum() {
        let mut factors = RiskFactors::default();
        factors.factors.insert(
            "weather".to_string(),
            [3, 7, 2]
                .into_iter()
                .map(|count| RiskSubfactor {
                    count,
                    ..RiskSubfactor::default()
                })
                .collect(),
        );

        let summaries = top_risk_factors(&factors);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].top_count, 7);
    }

    #[test]
    fn empty_category_reduces_to_zero() {
        let mut factors = RiskFactors::default();
        factors.factors.insert("light".to_string(), Vec::new());
        assert_eq!(top_risk_factors(&factors)[0].top_count, 0);
    }

    #[test]
    fn pie_arcs_cover_full_circumference() {
        let distribution = SeverityDistribution {
            distribution: vec![
                bucket("Fatal", 25),
                bucket("Serious", 35),
                bucket("Slight", 40),
            ],
            total_incidents: 100,
        };
        let slices = severity_pie(&distribution);
        let total_length: f64 = slices.iter().map(|s| s.length).sum();
        assert!((total_length - FULL_CIRCUMFERENCE).abs() < 1e-9);

        // Offsets are the cumulative sum of the prior lengths.
        assert!((slices[0].offset - 0.0).abs() < 1e-9);
        assert!((slices[1].offset - slices[0].length).abs() < 1e-9);
        assert!((slices[2].offset - (slices[0].length + slices[1].length)).abs() < 1e-9);
    }

    #[test]
    fn zero_total_does_not_divide_by_zero() {
        let distribution = SeverityDistribution {
            distribution: vec![bucket("Fatal", 0)],
            total_incidents: 0,
        };
        let slices = severity_pie(&distribution);
        assert!((slices[0].length - 0.0).abs() < 1e-9);
        assert!(slices[0].length.is_finite());
    }
}
