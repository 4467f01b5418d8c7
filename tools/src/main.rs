//! dashboard-runner: headless analysis pass for the spend dashboard.
//!
//! Usage:
//!   dashboard-runner --seed 12345
//!   dashboard-runner --seed 12345 --json
//!   dashboard-runner --config engine.json --as-of 2026-01-31T00:00:00Z

use anyhow::Result;
use chrono::{DateTime, Utc};
use finops_core::{
    aggregator::{self, CategorySpend, Metrics, RoiBand},
    benchmark::{self, BenchmarkComparison},
    config::EngineConfig,
    feed::MockFeed,
    model::{Nudge, Transaction},
    review::NudgeBoard,
    rng::{RngBank, StreamSlot},
    synthesizer,
};
use std::env;

#[derive(serde::Serialize)]
struct DashboardState {
    seed: u64,
    as_of: DateTime<Utc>,
    metrics: Metrics,
    /// Mean ROI over campaigns with defined ROI; None when there are none.
    average_roi: Option<f64>,
    average_ad_platform_roi: Option<f64>,
    spend_by_category: Vec<CategorySpend>,
    nudges: Vec<Nudge>,
    total_potential_impact: f64,
    average_confidence: f64,
    benchmarks: Vec<BenchmarkComparison>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let json_mode = args.iter().any(|a| a == "--json");
    let config = match flag_value(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let as_of = match flag_value(&args, "--as-of") {
        Some(raw) => Transaction::parse_timestamp(raw)?,
        None => Utc::now(),
    };

    let state = build_state(seed, as_of, &config)?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state);
    }
    Ok(())
}

fn build_state(seed: u64, as_of: DateTime<Utc>, config: &EngineConfig) -> Result<DashboardState> {
    let feed = MockFeed::with_config(seed, as_of, config.feed.clone());
    let transactions = feed.transactions()?;
    let campaigns = feed.campaigns()?;
    let entries = feed.benchmarks();

    let metrics = aggregator::summarize_with(&transactions, &campaigns, &config.synthesizer);
    let average_roi = aggregator::average_roi(&campaigns).ok();
    let average_ad_platform_roi = aggregator::average_ad_platform_roi(&campaigns).ok();
    let spend_by_category = aggregator::spend_by_category(&transactions);

    let mut jitter = RngBank::new(seed).for_stream(StreamSlot::Confidence);
    let mut nudges = synthesizer::synthesize(&campaigns, &config.synthesizer, &mut jitter);
    nudges.extend(synthesizer::benchmark_alerts(&entries, &config.benchmark));

    let board = NudgeBoard::new(nudges.clone());

    let benchmarks = benchmark::compare_all(&entries, &config.benchmark)
        .into_iter()
        .filter_map(|result| match result {
            Ok(comparison) => Some(comparison),
            Err(e) => {
                log::warn!("benchmark comparison dropped: {e}");
                None
            }
        })
        .collect();

    for campaign in aggregator::rank_by_roi(&campaigns) {
        log::debug!(
            "campaign {} roi={:?} band={:?} status={:?}",
            campaign.name,
            campaign.roi_opt(),
            campaign.roi_opt().map(RoiBand::from_roi),
            campaign.status()
        );
    }

    Ok(DashboardState {
        seed,
        as_of,
        metrics,
        average_roi,
        average_ad_platform_roi,
        spend_by_category,
        total_potential_impact: board.total_potential_impact(),
        average_confidence: board.average_confidence(),
        nudges,
        benchmarks,
    })
}

fn format_roi(roi: Option<f64>) -> String {
    roi.map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}x"))
}

fn print_summary(state: &DashboardState) {
    let m = &state.metrics;

    println!("=== DASHBOARD SUMMARY ===");
    println!("  seed:            {}", state.seed);
    println!("  as of:           {}", state.as_of.to_rfc3339());
    println!("  total spend:     ${:.2}", m.total_spend);
    println!("  total revenue:   ${:.2}", m.total_revenue);
    match m.overall_roi {
        Some(roi) => println!(
            "  overall ROI:     {roi:.2}x ({})",
            if m.is_profitable() { "Profitable" } else { "Needs attention" }
        ),
        None => println!("  overall ROI:     N/A"),
    }
    println!(
        "  campaigns:       {} active, {} underperforming, {} high performers",
        m.active_campaigns, m.underperforming_campaigns, m.high_performers
    );
    println!("  average ROI:     {}", format_roi(state.average_roi));
    println!("  ad platform ROI: {}", format_roi(state.average_ad_platform_roi));

    println!();
    println!("=== SPEND BY CATEGORY ===");
    for c in &state.spend_by_category {
        println!("  {:<22} ${:>10.2} ({:.0}%)", c.category.label(), c.amount, c.percentage);
    }

    println!();
    println!("=== RECOMMENDATIONS ===");
    for n in &state.nudges {
        println!(
            "  [{:?}] {} | impact ${:.0} | confidence {:.0}%",
            n.kind, n.title, n.impact, n.confidence
        );
    }
    println!(
        "  potential impact: ${:.0} | avg confidence: {:.0}%",
        state.total_potential_impact, state.average_confidence
    );

    println!();
    println!("=== BENCHMARKS ===");
    for b in &state.benchmarks {
        let trend = match b.direction {
            Some(d) => format!("{d:?}"),
            None => "N/A".to_string(),
        };
        println!(
            "  {:<22} {:?} | {:.0}% {} avg | trend {}",
            b.category.label(),
            b.band,
            b.delta_display_pct,
            if b.above_average { "above" } else { "below" },
            trend
        );
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
