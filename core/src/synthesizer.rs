//! Recommendation synthesizer — budget reallocation nudges.
//!
//! Algorithm:
//!   1. Partition campaigns into low (ROI < low threshold) and high
//!      (ROI > high threshold), keeping input order in each partition.
//!   2. Pair the i-th low performer with the i-th high performer.
//!      Excess campaigns in the longer partition get no nudge.
//!   3. Move round(low.spend × share); impact = amount × (high.roi − low.roi).
//!   4. Append the baseline nudges after the pairs.
//!
//! Pairing is positional, not best-match. See DESIGN.md.

use crate::{
    benchmark::{self, PerformanceBand},
    config::{BenchmarkConfig, SynthesizerConfig},
    model::{BenchmarkEntry, Campaign, Nudge, NudgeKind},
    rng::JitterSource,
    types::Money,
};
use serde::{Deserialize, Serialize};

/// One low→high pairing, before it is rendered as a nudge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReallocationPlan {
    pub from_campaign: String,
    pub to_campaign: String,
    pub from_roi: f64,
    pub to_roi: f64,
    pub amount: Money,
    pub impact: Money,
}

/// Pair underperformers with high performers by position.
/// Campaigns with undefined ROI join neither partition.
pub fn plan_reallocations(campaigns: &[Campaign], config: &SynthesizerConfig) -> Vec<ReallocationPlan> {
    let mut low: Vec<(&Campaign, f64)> = Vec::new();
    let mut high: Vec<(&Campaign, f64)> = Vec::new();

    for campaign in campaigns {
        let Some(roi) = campaign.roi_opt() else {
            log::warn!(
                "campaign {} has zero spend; ROI undefined, skipped for reallocation",
                campaign.id
            );
            continue;
        };
        if roi < config.low_roi_threshold {
            low.push((campaign, roi));
        } else if roi > config.high_roi_threshold {
            high.push((campaign, roi));
        }
    }

    if low.len() != high.len() {
        log::debug!(
            "reallocation: {} low vs {} high performers; {} left unpaired",
            low.len(),
            high.len(),
            low.len().abs_diff(high.len())
        );
    }

    low.iter()
        .zip(high.iter())
        .map(|(&(lo, lo_roi), &(hi, hi_roi))| {
            let amount = (lo.spend * config.reallocation_share).round();
            ReallocationPlan {
                from_campaign: lo.name.clone(),
                to_campaign: hi.name.clone(),
                from_roi: lo_roi,
                to_roi: hi_roi,
                amount,
                impact: amount * (hi_roi - lo_roi),
            }
        })
        .collect()
}

pub fn synthesize(
    campaigns: &[Campaign],
    config: &SynthesizerConfig,
    jitter: &mut impl JitterSource,
) -> Vec<Nudge> {
    let plans = plan_reallocations(campaigns, config);
    let mut nudges = Vec::with_capacity(plans.len() + config.baseline_nudges.len());

    // Confidence lies in [base, base + span); rounding must not reach the ceiling.
    let ceiling = config.confidence_base + config.confidence_jitter_span;

    for (i, plan) in plans.iter().enumerate() {
        let raw = config.confidence_base + jitter.next_unit() * config.confidence_jitter_span;
        let confidence = if config.confidence_jitter_span > 0.0 && raw >= ceiling {
            ceiling.next_down()
        } else {
            raw
        };
        nudges.push(Nudge {
            id: format!("nudge_{}", i + 1),
            title: format!(
                "Reallocate Budget: {} → {}",
                plan.from_campaign, plan.to_campaign
            ),
            description: format!(
                "Move ${} from underperforming campaign ({:.2}x ROI) \
                 to high-performing campaign ({:.2}x ROI)",
                plan.amount, plan.from_roi, plan.to_roi
            ),
            kind: NudgeKind::Reallocation,
            impact: plan.impact,
            confidence,
        });
    }

    nudges.extend(config.baseline_nudges.iter().map(|b| Nudge {
        id: b.id.clone(),
        title: b.title.clone(),
        description: b.description.clone(),
        kind: b.kind,
        impact: b.impact,
        confidence: b.confidence,
    }));

    log::debug!(
        "synthesize: {} campaigns → {} reallocation + {} baseline nudges",
        campaigns.len(),
        plans.len(),
        config.baseline_nudges.len()
    );

    nudges
}

/// Synthesize with the reference thresholds and baseline nudge.
pub fn synthesize_default(campaigns: &[Campaign], jitter: &mut impl JitterSource) -> Vec<Nudge> {
    synthesize(campaigns, &SynthesizerConfig::default(), jitter)
}

/// One alert per category spending above the industry band.
/// Entries with a zero industry average are skipped.
pub fn benchmark_alerts(entries: &[BenchmarkEntry], config: &BenchmarkConfig) -> Vec<Nudge> {
    let mut alerts = Vec::new();

    for entry in entries {
        let (band, delta) = match (
            benchmark::classify_with(entry, config),
            benchmark::delta_pct(entry),
        ) {
            (Ok(band), Ok(delta)) => (band, delta),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("benchmark alert for {} skipped: {e}", entry.category);
                continue;
            }
        };
        if band != PerformanceBand::AboveAverage {
            continue;
        }

        let excess_pts = entry.user_percentage - entry.industry_average;
        alerts.push(Nudge {
            id: format!("nudge_alert_{}", alerts.len() + 1),
            title: format!("{} Spend Above Benchmark", entry.category),
            description: format!(
                "Your {} spend is {:.0}% above industry average ({}% vs {}%).",
                entry.category.label().to_lowercase(),
                delta.round(),
                entry.user_percentage,
                entry.industry_average
            ),
            kind: NudgeKind::Alert,
            impact: excess_pts * config.reference_budget / 100.0,
            confidence: config.alert_confidence,
        });
    }

    alerts
}
