use crate::{
    error::{AnalyticsError, AnalyticsResult},
    model::NudgeKind,
    types::{Money, Percent, HIGH_PERFORMER_ROI, UNDERPERFORMING_ROI},
};
use serde::{Deserialize, Serialize};

// ── Synthesizer ──────────────────────────────────────────────────────────────

/// A fixed recommendation appended after every pairing pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineNudge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: NudgeKind,
    pub impact: Money,
    pub confidence: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesizerConfig {
    pub low_roi_threshold: f64,
    pub high_roi_threshold: f64,
    /// Share of the low performer's spend proposed for reallocation.
    pub reallocation_share: f64,
    pub confidence_base: Percent,
    /// Jitter span added on top of the base: confidence ∈ [base, base + span).
    pub confidence_jitter_span: Percent,
    pub baseline_nudges: Vec<BaselineNudge>,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            low_roi_threshold: UNDERPERFORMING_ROI,
            high_roi_threshold: HIGH_PERFORMER_ROI,
            reallocation_share: 0.3,
            confidence_base: 85.0,
            confidence_jitter_span: 10.0,
            baseline_nudges: vec![BaselineNudge {
                id: "nudge_opt_1".into(),
                title: "Reduce Marketing Spend".into(),
                description: "Your marketing spend is 28% above industry average. \
                              Consider optimizing ad targeting."
                    .into(),
                kind: NudgeKind::Optimization,
                impact: 2500.0,
                confidence: 78.0,
            }],
        }
    }
}

// ── Benchmark ────────────────────────────────────────────────────────────────

/// Upper bound on samples per trend window.
pub const MAX_TREND_WINDOW: usize = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkConfig {
    /// |delta| at or under this percentage is on target.
    pub on_target_band_pct: Percent,
    /// Samples per trend window; two windows are compared.
    pub trend_window: usize,
    /// Budget used to express percentages as dollar figures.
    pub reference_budget: Money,
    pub alert_confidence: Percent,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            on_target_band_pct: 10.0,
            trend_window: 3,
            reference_budget: 100_000.0,
            alert_confidence: 70.0,
        }
    }
}

// ── Feed ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    /// One transaction per day, counting back from the as-of instant.
    pub transaction_days: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { transaction_days: 90 }
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

impl EngineConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    /// In tests, use EngineConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
    }

    pub fn from_json(content: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        let s = &self.synthesizer;
        if s.low_roi_threshold > s.high_roi_threshold {
            return Err(invalid(
                "low_roi_threshold",
                format!("{} exceeds high_roi_threshold {}", s.low_roi_threshold, s.high_roi_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&s.reallocation_share) {
            return Err(invalid(
                "reallocation_share",
                format!("{} outside [0, 1]", s.reallocation_share),
            ));
        }

        // Reallocation confidence lies in [base, base + span) on the 0–100 scale.
        if !is_percent(s.confidence_base) {
            return Err(invalid(
                "confidence_base",
                format!("{} outside [0, 100]", s.confidence_base),
            ));
        }
        if !is_percent(s.confidence_jitter_span) {
            return Err(invalid(
                "confidence_jitter_span",
                format!("{} outside [0, 100]", s.confidence_jitter_span),
            ));
        }
        if s.confidence_base + s.confidence_jitter_span > 100.0 {
            return Err(invalid(
                "confidence_base",
                format!(
                    "base {} + span {} exceeds 100",
                    s.confidence_base, s.confidence_jitter_span
                ),
            ));
        }

        if !s.baseline_nudges.iter().any(|b| b.kind == NudgeKind::Optimization) {
            return Err(invalid(
                "baseline_nudges",
                "at least one optimization nudge is required".into(),
            ));
        }
        for b in &s.baseline_nudges {
            if !is_percent(b.confidence) {
                return Err(invalid(
                    "baseline_nudges",
                    format!("nudge {} confidence {} outside [0, 100]", b.id, b.confidence),
                ));
            }
        }

        let bm = &self.benchmark;
        if bm.trend_window == 0 || bm.trend_window > MAX_TREND_WINDOW {
            return Err(invalid(
                "trend_window",
                format!("{} outside [1, {MAX_TREND_WINDOW}]", bm.trend_window),
            ));
        }
        if !is_percent(bm.alert_confidence) {
            return Err(invalid(
                "alert_confidence",
                format!("{} outside [0, 100]", bm.alert_confidence),
            ));
        }
        Ok(())
    }
}

fn is_percent(value: Percent) -> bool {
    (0.0..=100.0).contains(&value)
}

fn invalid(field: &'static str, reason: String) -> AnalyticsError {
    AnalyticsError::InvalidConfig { field, reason }
}
