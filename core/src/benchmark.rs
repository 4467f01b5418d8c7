//! Benchmark comparator — category spend against industry reference.
//!
//! Bands:
//!   |delta| ≤ band  → OnTarget   (boundary inclusive)
//!   delta  > band   → AboveAverage
//!   delta  < -band  → BelowAverage
//!
//! Trend: mean of the last window vs the window before it.
//! Ties resolve to Declining.

use crate::{
    config::BenchmarkConfig,
    error::{AnalyticsError, AnalyticsResult},
    model::{BenchmarkEntry, SpendCategory},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};

/// Samples per trend window in the reference configuration.
pub const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    OnTarget,
    AboveAverage,
    BelowAverage,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Improving,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkComparison {
    pub category: SpendCategory,
    pub delta_pct: Percent,
    /// Absolute delta rounded to a whole percent, for display.
    pub delta_display_pct: Percent,
    pub band: PerformanceBand,
    /// None when the trend series is too short to classify.
    pub direction: Option<Direction>,
    pub above_average: bool,
    pub user_amount: Money,
    pub industry_amount: Money,
}

/// Relative deviation of the user's share from the industry average, in percent.
pub fn delta_pct(entry: &BenchmarkEntry) -> AnalyticsResult<Percent> {
    if entry.industry_average == 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            context: "benchmark delta with zero industry average",
        });
    }
    // Multiply before dividing so whole-number inputs land on exact deltas.
    Ok((entry.user_percentage - entry.industry_average) * 100.0 / entry.industry_average)
}

pub fn classify(entry: &BenchmarkEntry) -> AnalyticsResult<PerformanceBand> {
    classify_with(entry, &BenchmarkConfig::default())
}

pub fn classify_with(
    entry: &BenchmarkEntry,
    config: &BenchmarkConfig,
) -> AnalyticsResult<PerformanceBand> {
    let delta = delta_pct(entry)?;
    let band = config.on_target_band_pct;
    Ok(if delta.abs() <= band {
        PerformanceBand::OnTarget
    } else if delta > band {
        PerformanceBand::AboveAverage
    } else {
        PerformanceBand::BelowAverage
    })
}

pub fn trend_direction(series: &[f64]) -> AnalyticsResult<Direction> {
    trend_direction_with(series, TREND_WINDOW)
}

pub fn trend_direction_with(series: &[f64], window: usize) -> AnalyticsResult<Direction> {
    let required = match window.checked_mul(2) {
        Some(required) if window > 0 => required,
        _ => {
            return Err(AnalyticsError::InsufficientData {
                required: usize::MAX,
                actual: series.len(),
            })
        }
    };
    if series.len() < required {
        return Err(AnalyticsError::InsufficientData {
            required,
            actual: series.len(),
        });
    }

    let n = series.len();
    let earlier = &series[n - required..n - window];
    let recent = &series[n - window..];

    if mean(recent) > mean(earlier) {
        Ok(Direction::Improving)
    } else {
        Ok(Direction::Declining)
    }
}

pub fn compare(
    entry: &BenchmarkEntry,
    config: &BenchmarkConfig,
) -> AnalyticsResult<BenchmarkComparison> {
    let delta = delta_pct(entry)?;
    let band = classify_with(entry, config)?;
    let direction = match trend_direction_with(&entry.trend, config.trend_window) {
        Ok(direction) => Some(direction),
        Err(AnalyticsError::InsufficientData { required, actual }) => {
            log::debug!(
                "benchmark {}: trend has {actual} samples, need {required}",
                entry.category
            );
            None
        }
        Err(e) => return Err(e),
    };

    Ok(BenchmarkComparison {
        category: entry.category,
        delta_pct: delta,
        delta_display_pct: delta.abs().round(),
        band,
        direction,
        above_average: entry.user_percentage > entry.industry_average,
        user_amount: entry.user_percentage * config.reference_budget / 100.0,
        industry_amount: entry.industry_average * config.reference_budget / 100.0,
    })
}

/// Compare every entry, keeping per-entry failures so one bad row
/// does not hide the others.
pub fn compare_all(
    entries: &[BenchmarkEntry],
    config: &BenchmarkConfig,
) -> Vec<AnalyticsResult<BenchmarkComparison>> {
    entries.iter().map(|e| compare(e, config)).collect()
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}
