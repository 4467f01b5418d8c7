//! Aggregator — reduces transactions and campaigns into dashboard metrics.
//!
//! Every function here is pure: identical inputs produce bit-identical
//! outputs. Sums are taken in input order.

use crate::{
    config::SynthesizerConfig,
    error::{AnalyticsError, AnalyticsResult},
    model::{Campaign, CampaignStatus, SpendCategory, Transaction},
    types::{Money, Percent},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeMap};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub total_spend: Money,
    pub total_revenue: Money,
    /// None when total spend is zero.
    pub overall_roi: Option<f64>,
    pub active_campaigns: usize,
    /// ROI below the low threshold.
    pub underperforming_campaigns: usize,
    /// ROI at or above the high threshold.
    pub high_performers: usize,
}

impl Metrics {
    /// Overall ROI, or DivisionByZero when nothing was spent.
    pub fn roi(&self) -> AnalyticsResult<f64> {
        self.overall_roi.ok_or(AnalyticsError::DivisionByZero {
            context: "overall ROI with zero total spend",
        })
    }

    pub fn is_profitable(&self) -> bool {
        matches!(self.overall_roi, Some(roi) if roi > 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub category: SpendCategory,
    pub amount: Money,
    /// Whole-percent share of total spend.
    pub percentage: Percent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RoiBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl RoiBand {
    pub fn from_roi(roi: f64) -> Self {
        if roi >= 1.5 {
            Self::Excellent
        } else if roi >= 1.0 {
            Self::Good
        } else if roi >= 0.7 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

// ── Operations ───────────────────────────────────────────────────────────────

pub fn summarize(transactions: &[Transaction], campaigns: &[Campaign]) -> Metrics {
    summarize_with(transactions, campaigns, &SynthesizerConfig::default())
}

/// Summarize against the synthesizer's ROI thresholds. The high count is
/// inclusive of the threshold; the synthesizer's pairing partition is not.
/// `active_campaigns` follows `Campaign::status`, which keeps the fixed 0.7 policy.
pub fn summarize_with(
    transactions: &[Transaction],
    campaigns: &[Campaign],
    thresholds: &SynthesizerConfig,
) -> Metrics {
    let total_spend: Money = transactions.iter().map(|t| t.amount).sum();
    let total_revenue: Money = campaigns.iter().map(|c| c.revenue).sum();

    let overall_roi = if total_spend == 0.0 {
        None
    } else {
        Some(total_revenue / total_spend)
    };

    let active_campaigns = campaigns
        .iter()
        .filter(|c| c.status() == CampaignStatus::Active)
        .count();
    let underperforming_campaigns = campaigns
        .iter()
        .filter(|c| matches!(c.roi_opt(), Some(roi) if roi < thresholds.low_roi_threshold))
        .count();
    let high_performers = campaigns
        .iter()
        .filter(|c| matches!(c.roi_opt(), Some(roi) if roi >= thresholds.high_roi_threshold))
        .count();

    log::debug!(
        "summarize: txns={} campaigns={} spend={:.2} revenue={:.2} active={} under={} high={}",
        transactions.len(),
        campaigns.len(),
        total_spend,
        total_revenue,
        active_campaigns,
        underperforming_campaigns,
        high_performers
    );

    Metrics {
        total_spend,
        total_revenue,
        overall_roi,
        active_campaigns,
        underperforming_campaigns,
        high_performers,
    }
}

/// Mean ROI across campaigns with a defined ROI.
/// Fails with InsufficientData when none has one.
pub fn average_roi<'a>(campaigns: impl IntoIterator<Item = &'a Campaign>) -> AnalyticsResult<f64> {
    let (sum, count) = campaigns
        .into_iter()
        .filter_map(Campaign::roi_opt)
        .fold((0.0, 0usize), |(sum, count), roi| (sum + roi, count + 1));
    if count == 0 {
        return Err(AnalyticsError::InsufficientData { required: 1, actual: 0 });
    }
    Ok(sum / count as f64)
}

/// Mean ROI of campaigns run on ad platforms ("... Ads").
pub fn average_ad_platform_roi(campaigns: &[Campaign]) -> AnalyticsResult<f64> {
    average_roi(campaigns.iter().filter(|c| c.platform.contains("Ads")))
}

/// Per-category spend, largest first. Ties break on category order.
pub fn spend_by_category(transactions: &[Transaction]) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<SpendCategory, Money> = BTreeMap::new();
    for txn in transactions {
        *totals.entry(txn.category).or_insert(0.0) += txn.amount;
    }

    let grand_total: Money = totals.values().sum();

    let mut breakdown: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category,
            amount,
            percentage: if grand_total > 0.0 {
                (amount / grand_total * 100.0).round()
            } else {
                0.0
            },
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then(a.category.cmp(&b.category))
    });
    breakdown
}

/// Campaigns ordered by ascending ROI; undefined ROI sorts last.
pub fn rank_by_roi(campaigns: &[Campaign]) -> Vec<&Campaign> {
    let mut ranked: Vec<&Campaign> = campaigns.iter().collect();
    ranked.sort_by(|a, b| match (a.roi_opt(), b.roi_opt()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}
