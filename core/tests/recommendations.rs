//! Recommendation synthesizer tests — positional pairing, impact, baseline nudges.

use finops_core::{
    config::{BenchmarkConfig, SynthesizerConfig},
    model::{BenchmarkEntry, Campaign, Nudge, NudgeKind, SpendCategory},
    rng::{FixedJitter, RngBank, StreamSlot},
    synthesizer::{benchmark_alerts, plan_reallocations, synthesize, synthesize_default},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn campaign(name: &str, spend: f64, roi: f64) -> Campaign {
    Campaign::new(name, name, "Meta Ads", spend, 1000, 50, spend * roi).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn one_pair_produces_one_reallocation_plus_baseline() {
    let campaigns = vec![campaign("A", 1000.0, 0.5), campaign("B", 1000.0, 2.0)];

    let plans = plan_reallocations(&campaigns, &SynthesizerConfig::default());
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].amount, 300.0);
    assert_eq!(plans[0].impact, 450.0);

    let nudges = synthesize_default(&campaigns, &mut FixedJitter::zero());
    assert_eq!(nudges.len(), 2, "one reallocation + one baseline");

    let realloc = &nudges[0];
    assert_eq!(realloc.kind, NudgeKind::Reallocation);
    assert_eq!(realloc.id, "nudge_1");
    assert_eq!(realloc.impact, 450.0);
    assert_eq!(realloc.title, "Reallocate Budget: A → B");
    assert_eq!(
        realloc.description,
        "Move $300 from underperforming campaign (0.50x ROI) \
         to high-performing campaign (2.00x ROI)"
    );

    let baseline = &nudges[1];
    assert_eq!(baseline.kind, NudgeKind::Optimization);
    assert_eq!(baseline.id, "nudge_opt_1");
    assert_eq!(baseline.impact, 2500.0);
    assert_eq!(baseline.confidence, 78.0);
}

#[test]
fn no_low_or_high_performers_leaves_only_baseline() {
    let campaigns = vec![
        campaign("Mid1", 1000.0, 0.7),
        campaign("Mid2", 1000.0, 1.0),
        campaign("Mid3", 1000.0, 1.5),
    ];

    let nudges = synthesize_default(&campaigns, &mut FixedJitter::zero());

    assert_eq!(nudges.len(), 1);
    assert_eq!(nudges[0].kind, NudgeKind::Optimization);
}

#[test]
fn empty_campaign_list_yields_baseline_only() {
    let nudges = synthesize_default(&[], &mut FixedJitter::zero());
    assert_eq!(nudges.len(), 1);
    assert_eq!(nudges[0].id, "nudge_opt_1");
}

#[test]
fn pairs_positionally_and_drops_unpaired_excess() {
    let campaigns = vec![
        campaign("Low1", 1000.0, 0.5),
        campaign("High1", 2000.0, 3.0),
        campaign("Low2", 500.0, 0.2),
        campaign("Low3", 800.0, 0.6),
        campaign("High2", 1000.0, 2.0),
    ];

    let plans = plan_reallocations(&campaigns, &SynthesizerConfig::default());

    let pairs: Vec<(&str, &str)> = plans
        .iter()
        .map(|p| (p.from_campaign.as_str(), p.to_campaign.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Low1", "High1"), ("Low2", "High2")]);

    assert_eq!(plans[1].amount, 150.0);
    assert_eq!(plans[1].impact, 150.0 * (2.0 - 0.2));
}

#[test]
fn baseline_nudges_come_last() {
    let campaigns = vec![
        campaign("Low1", 1000.0, 0.5),
        campaign("Low2", 1000.0, 0.4),
        campaign("High1", 1000.0, 2.0),
        campaign("High2", 1000.0, 1.6),
    ];

    let nudges = synthesize_default(&campaigns, &mut FixedJitter::zero());

    let kinds: Vec<NudgeKind> = nudges.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![NudgeKind::Reallocation, NudgeKind::Reallocation, NudgeKind::Optimization]
    );
    assert_eq!(nudges[1].id, "nudge_2");
}

#[test]
fn confidence_uses_injected_jitter() {
    let campaigns = vec![campaign("A", 1000.0, 0.5), campaign("B", 1000.0, 2.0)];

    let low = synthesize_default(&campaigns, &mut FixedJitter::new(0.0));
    let mid = synthesize_default(&campaigns, &mut FixedJitter::new(0.5));
    let top = synthesize_default(&campaigns, &mut FixedJitter::new(1.0));

    assert_eq!(low[0].confidence, 85.0);
    assert_eq!(mid[0].confidence, 90.0);
    assert!(top[0].confidence < 95.0, "confidence must stay below 95");
}

#[test]
fn seeded_confidence_stays_in_range() {
    let campaigns: Vec<Campaign> = (0..20)
        .flat_map(|i| {
            vec![
                campaign(&format!("L{i}"), 1000.0, 0.3),
                campaign(&format!("H{i}"), 1000.0, 2.5),
            ]
        })
        .collect();

    let mut rng = RngBank::new(7).for_stream(StreamSlot::Confidence);
    let nudges = synthesize(&campaigns, &SynthesizerConfig::default(), &mut rng);

    assert_eq!(nudges.len(), 21);
    for n in nudges.iter().filter(|n| n.kind == NudgeKind::Reallocation) {
        assert!(
            (85.0..95.0).contains(&n.confidence),
            "confidence {} outside [85, 95)",
            n.confidence
        );
    }
}

#[test]
fn zero_spend_campaigns_are_not_paired() {
    let free = Campaign::new("Free", "Free", "Meta Ads", 0.0, 0, 0, 0.0).unwrap();
    let campaigns = vec![free, campaign("High", 1000.0, 2.0)];

    let plans = plan_reallocations(&campaigns, &SynthesizerConfig::default());
    assert!(plans.is_empty());
}

#[test]
fn synthesizer_does_not_touch_campaign_status() {
    let campaigns = vec![campaign("A", 1000.0, 0.5), campaign("B", 1000.0, 2.0)];
    let before = campaigns.clone();

    let _ = synthesize_default(&campaigns, &mut FixedJitter::zero());

    assert_eq!(campaigns, before);
}

#[test]
fn alerts_only_for_above_average_categories() {
    let entries = vec![
        BenchmarkEntry {
            category: SpendCategory::Marketing,
            user_percentage: 26.0,
            industry_average: 18.0,
            trend: vec![],
        },
        BenchmarkEntry {
            category: SpendCategory::Operations,
            user_percentage: 15.0,
            industry_average: 22.0,
            trend: vec![],
        },
        BenchmarkEntry {
            category: SpendCategory::Technology,
            user_percentage: 5.0,
            industry_average: 0.0,
            trend: vec![],
        },
    ];

    let alerts = benchmark_alerts(&entries, &BenchmarkConfig::default());

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, NudgeKind::Alert);
    assert_eq!(alerts[0].impact, 8000.0);
    assert_eq!(alerts[0].confidence, 70.0);
    assert!(alerts[0].description.contains("44% above"));
}

#[test]
fn nudges_serialize_with_dashboard_field_names() {
    let nudges = synthesize_default(
        &[campaign("A", 1000.0, 0.5), campaign("B", 1000.0, 2.0)],
        &mut FixedJitter::zero(),
    );

    let value = serde_json::to_value(&nudges[0]).unwrap();
    assert_eq!(value["type"], "reallocation");
    assert!(value.get("kind").is_none());
    assert_eq!(serde_json::to_value(&nudges[1]).unwrap()["type"], "optimization");

    let back: Nudge = serde_json::from_value(value).unwrap();
    assert_eq!(back, nudges[0]);
}

#[test]
fn categories_serialize_as_display_labels() {
    assert_eq!(serde_json::to_value(SpendCategory::Ecommerce).unwrap(), "E-commerce");
    assert_eq!(
        serde_json::to_value(SpendCategory::PaymentProcessing).unwrap(),
        "Payment Processing"
    );
    assert_eq!(
        serde_json::to_value(SpendCategory::ProfessionalServices).unwrap(),
        "Professional Services"
    );

    let parsed: SpendCategory = serde_json::from_str("\"Payment Processing\"").unwrap();
    assert_eq!(parsed, SpendCategory::PaymentProcessing);
}
