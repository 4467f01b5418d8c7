//! Deterministic mock feed — the upstream source of records.
//!
//! Stands in for the connected data sources. Same seed + same as-of
//! instant = same transactions, campaigns and benchmarks.

use crate::{
    config::FeedConfig,
    error::AnalyticsResult,
    model::{BenchmarkEntry, Campaign, SpendCategory, Transaction, TransactionSource},
    rng::{RngBank, SeededRng, StreamSlot},
    types::Money,
};
use chrono::{DateTime, Duration, Utc};

struct Vendor {
    name: &'static str,
    category: SpendCategory,
    source: TransactionSource,
}

static VENDORS: [Vendor; 10] = [
    Vendor { name: "Meta Ads",           category: SpendCategory::Marketing,            source: TransactionSource::Meta },
    Vendor { name: "Google Ads",         category: SpendCategory::Marketing,            source: TransactionSource::Meta },
    Vendor { name: "Shopify",            category: SpendCategory::Ecommerce,            source: TransactionSource::Shopify },
    Vendor { name: "Stripe Processing",  category: SpendCategory::PaymentProcessing,    source: TransactionSource::Stripe },
    Vendor { name: "AWS",                category: SpendCategory::Infrastructure,       source: TransactionSource::Manual },
    Vendor { name: "Slack",              category: SpendCategory::SaaS,                 source: TransactionSource::Manual },
    Vendor { name: "Notion",             category: SpendCategory::SaaS,                 source: TransactionSource::Manual },
    Vendor { name: "Inventory Purchase", category: SpendCategory::Inventory,            source: TransactionSource::Manual },
    Vendor { name: "Office Supplies",    category: SpendCategory::Operations,           source: TransactionSource::Manual },
    Vendor { name: "Legal Services",     category: SpendCategory::ProfessionalServices, source: TransactionSource::Manual },
];

const CAMPAIGN_NAMES: [&str; 10] = [
    "Black Friday Sale",
    "Summer Collection Launch",
    "Brand Awareness Drive",
    "Retargeting Campaign",
    "Product Demo Videos",
    "Customer Acquisition",
    "Holiday Promotion",
    "Back to School",
    "New Customer Discount",
    "Loyalty Program Push",
];

const PLATFORMS: [&str; 4] = ["Meta Ads", "Google Ads", "TikTok Ads", "LinkedIn Ads"];

fn base_amount(category: SpendCategory) -> Money {
    match category {
        SpendCategory::Marketing => 500.0,
        SpendCategory::Inventory => 2000.0,
        SpendCategory::Ecommerce => 1000.0,
        _ => 200.0,
    }
}

pub struct MockFeed {
    bank: RngBank,
    as_of: DateTime<Utc>,
    config: FeedConfig,
}

impl MockFeed {
    pub fn new(seed: u64, as_of: DateTime<Utc>) -> Self {
        Self::with_config(seed, as_of, FeedConfig::default())
    }

    pub fn with_config(seed: u64, as_of: DateTime<Utc>, config: FeedConfig) -> Self {
        Self {
            bank: RngBank::new(seed),
            as_of,
            config,
        }
    }

    /// One transaction per day, newest first.
    pub fn transactions(&self) -> AnalyticsResult<Vec<Transaction>> {
        let mut rng = self.bank.for_stream(StreamSlot::Transactions);
        let mut txns = Vec::with_capacity(self.config.transaction_days as usize);

        for day in 0..self.config.transaction_days {
            let vendor = &VENDORS[rng.next_index(VENDORS.len())];
            let base = base_amount(vendor.category);
            let amount = rng.next_in(base, base);

            txns.push(Transaction::new(
                transaction_id(&mut rng),
                vendor.name,
                vendor.category,
                amount,
                self.as_of - Duration::days(i64::from(day)),
                format!("{} - {} expense", vendor.name, vendor.category),
                vendor.source,
            )?);
        }

        log::debug!("feed: generated {} transactions", txns.len());
        Ok(txns)
    }

    /// Ten campaigns with whole-dollar spend and revenue.
    pub fn campaigns(&self) -> AnalyticsResult<Vec<Campaign>> {
        let mut rng = self.bank.for_stream(StreamSlot::Campaigns);

        let campaigns = CAMPAIGN_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let spend = rng.next_in(1000.0, 5000.0).round();
                let clicks = (spend * rng.next_in(0.5, 1.0)).floor() as u64;
                let conversions = (clicks as f64 * rng.next_in(0.02, 0.08)).floor() as u64;
                let revenue = (spend * rng.next_in(0.3, 2.7)).round();
                let platform = PLATFORMS[rng.next_index(PLATFORMS.len())];

                Campaign::new(
                    format!("camp_{}", index + 1),
                    *name,
                    platform,
                    spend,
                    clicks,
                    conversions,
                    revenue,
                )
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        log::debug!(
            "feed: generated {} campaigns ({} underperforming)",
            campaigns.len(),
            campaigns.iter().filter(|c| c.is_underperforming()).count()
        );
        Ok(campaigns)
    }

    /// Industry reference values for the DTC retail cohort.
    pub fn benchmarks(&self) -> Vec<BenchmarkEntry> {
        vec![
            BenchmarkEntry {
                category: SpendCategory::Marketing,
                user_percentage: 26.0,
                industry_average: 18.0,
                trend: vec![15.0, 16.0, 18.0, 19.0, 18.0, 17.0, 18.0, 19.0, 20.0, 18.0, 17.0, 18.0],
            },
            BenchmarkEntry {
                category: SpendCategory::Operations,
                user_percentage: 15.0,
                industry_average: 22.0,
                trend: vec![20.0, 21.0, 22.0, 23.0, 22.0, 21.0, 22.0, 23.0, 24.0, 22.0, 21.0, 22.0],
            },
            BenchmarkEntry {
                category: SpendCategory::Technology,
                user_percentage: 8.0,
                industry_average: 12.0,
                trend: vec![10.0, 11.0, 12.0, 13.0, 12.0, 11.0, 12.0, 13.0, 14.0, 12.0, 11.0, 12.0],
            },
            BenchmarkEntry {
                category: SpendCategory::ProfessionalServices,
                user_percentage: 5.0,
                industry_average: 8.0,
                trend: vec![6.0, 7.0, 8.0, 9.0, 8.0, 7.0, 8.0, 9.0, 10.0, 8.0, 7.0, 8.0],
            },
        ]
    }
}

fn transaction_id(rng: &mut SeededRng) -> String {
    let id = uuid::Builder::from_random_bytes(rng.next_bytes16()).into_uuid();
    let hex = id.simple().to_string();
    format!("txn_{}", &hex[..9])
}
