//! Value records consumed and produced by the engine.
//!
//! All records are immutable snapshots. Invariants are checked at
//! construction; derived values (campaign ROI and status) are computed
//! on demand and never stored.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::{EntityId, Money, Percent, UNDERPERFORMING_ROI},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Transactions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    Stripe,
    Shopify,
    Meta,
    Manual,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpendCategory {
    Marketing,
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[serde(rename = "Payment Processing")]
    PaymentProcessing,
    Infrastructure,
    SaaS,
    Inventory,
    Operations,
    #[serde(rename = "Professional Services")]
    ProfessionalServices,
    Technology,
}

impl SpendCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Marketing            => "Marketing",
            Self::Ecommerce            => "E-commerce",
            Self::PaymentProcessing    => "Payment Processing",
            Self::Infrastructure       => "Infrastructure",
            Self::SaaS                 => "SaaS",
            Self::Inventory            => "Inventory",
            Self::Operations           => "Operations",
            Self::ProfessionalServices => "Professional Services",
            Self::Technology           => "Technology",
        }
    }
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deserialization runs through `Transaction::new`, so decoded records
/// carry the same guarantees as constructed ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    pub id:          EntityId,
    pub vendor:      String,
    pub category:    SpendCategory,
    pub amount:      Money,
    pub timestamp:   DateTime<Utc>,
    pub description: String,
    pub source:      TransactionSource,
}

impl Transaction {
    /// Build a transaction, rejecting negative or non-finite amounts.
    pub fn new(
        id: impl Into<EntityId>,
        vendor: impl Into<String>,
        category: SpendCategory,
        amount: Money,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        source: TransactionSource,
    ) -> AnalyticsResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AnalyticsError::InvalidRecord {
                field: "amount",
                reason: format!("must be a non-negative amount, got {amount}"),
            });
        }
        Ok(Self {
            id: id.into(),
            vendor: vendor.into(),
            category,
            amount,
            timestamp,
            description: description.into(),
            source,
        })
    }

    /// Parse an RFC 3339 timestamp as carried by upstream records.
    pub fn parse_timestamp(raw: &str) -> AnalyticsResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AnalyticsError::InvalidRecord {
                field: "timestamp",
                reason: format!("'{raw}' is not a valid instant: {e}"),
            })
    }
}

#[derive(Deserialize)]
struct TransactionRecord {
    id:          EntityId,
    vendor:      String,
    category:    SpendCategory,
    amount:      Money,
    timestamp:   DateTime<Utc>,
    description: String,
    source:      TransactionSource,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = AnalyticsError;

    fn try_from(r: TransactionRecord) -> AnalyticsResult<Self> {
        Self::new(r.id, r.vendor, r.category, r.amount, r.timestamp, r.description, r.source)
    }
}

// ── Campaigns ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CampaignRecord")]
pub struct Campaign {
    pub id:          EntityId,
    pub name:        String,
    pub platform:    String,
    pub spend:       Money,
    pub clicks:      u64,
    pub conversions: u64,
    pub revenue:     Money,
    /// Set once a campaign has run its course. Paused/active is derived.
    pub ended:       bool,
}

impl Campaign {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        platform: impl Into<String>,
        spend: Money,
        clicks: u64,
        conversions: u64,
        revenue: Money,
    ) -> AnalyticsResult<Self> {
        if !spend.is_finite() || spend < 0.0 {
            return Err(AnalyticsError::InvalidRecord {
                field: "spend",
                reason: format!("must be non-negative, got {spend}"),
            });
        }
        if !revenue.is_finite() || revenue < 0.0 {
            return Err(AnalyticsError::InvalidRecord {
                field: "revenue",
                reason: format!("must be non-negative, got {revenue}"),
            });
        }
        if conversions > clicks {
            return Err(AnalyticsError::InvalidRecord {
                field: "conversions",
                reason: format!("{conversions} conversions exceed {clicks} clicks"),
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            platform: platform.into(),
            spend,
            clicks,
            conversions,
            revenue,
            ended: false,
        })
    }

    pub fn into_ended(mut self) -> Self {
        self.ended = true;
        self
    }

    /// Revenue over spend. Undefined when nothing was spent.
    pub fn roi(&self) -> AnalyticsResult<f64> {
        if self.spend == 0.0 {
            return Err(AnalyticsError::DivisionByZero {
                context: "campaign ROI with zero spend",
            });
        }
        Ok(self.revenue / self.spend)
    }

    /// ROI if defined.
    pub fn roi_opt(&self) -> Option<f64> {
        self.roi().ok()
    }

    pub fn is_underperforming(&self) -> bool {
        matches!(self.roi_opt(), Some(roi) if roi < UNDERPERFORMING_ROI)
    }

    /// Ended wins; otherwise paused below the underperforming line.
    /// A campaign with no spend has no ROI evidence and stays active.
    pub fn status(&self) -> CampaignStatus {
        if self.ended {
            CampaignStatus::Ended
        } else if self.is_underperforming() {
            CampaignStatus::Paused
        } else {
            CampaignStatus::Active
        }
    }
}

#[derive(Deserialize)]
struct CampaignRecord {
    id:          EntityId,
    name:        String,
    platform:    String,
    spend:       Money,
    clicks:      u64,
    conversions: u64,
    revenue:     Money,
    #[serde(default)]
    ended:       bool,
}

impl TryFrom<CampaignRecord> for Campaign {
    type Error = AnalyticsError;

    fn try_from(r: CampaignRecord) -> AnalyticsResult<Self> {
        let campaign = Self::new(
            r.id, r.name, r.platform, r.spend, r.clicks, r.conversions, r.revenue,
        )?;
        Ok(if r.ended { campaign.into_ended() } else { campaign })
    }
}

// ── Nudges ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    Reallocation,
    Optimization,
    Alert,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nudge {
    pub id:          EntityId,
    pub title:       String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind:        NudgeKind,
    pub impact:      Money,
    /// 0–100.
    pub confidence:  Percent,
}

// ── Benchmarks ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkEntry {
    pub category:         SpendCategory,
    pub user_percentage:  Percent,
    pub industry_average: Percent,
    /// Chronological samples, oldest first.
    pub trend:            Vec<Percent>,
}
