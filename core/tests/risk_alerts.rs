use churnscope_core::{
    alert::{
        build_alerts, AlertFeed, AlertPolicy, AlertPriority, AlertStatus, Resolution,
        ResolveOutcome, HIGH_PRIORITY_ACTIONS, MEDIUM_PRIORITY_ACTIONS,
    },
    clock::ReferenceClock,
    customer::CustomerRecord,
    error::DashError,
    rng::RngBank,
    store::RecordStore,
    types::RiskTier,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn template() -> CustomerRecord {
    RecordStore::reference().customers()[0].clone()
}

fn customer(id: &str, tier: RiskTier, monthly: f64) -> CustomerRecord {
    let mut c = template();
    c.id = id.into();
    c.name = format!("Customer {id}");
    c.churn_risk = tier;
    c.monthly_charges = monthly;
    c
}

/// 3 High, 5 Medium, 2 Low, interleaved.
fn mixed_records() -> Vec<CustomerRecord> {
    vec![
        customer("M1", RiskTier::Medium, 50.0),
        customer("H1", RiskTier::High, 30.0),
        customer("L1", RiskTier::Low, 10.0),
        customer("M2", RiskTier::Medium, 60.0),
        customer("H2", RiskTier::High, 40.0),
        customer("M3", RiskTier::Medium, 70.0),
        customer("M4", RiskTier::Medium, 80.0),
        customer("H3", RiskTier::High, 55.5),
        customer("L2", RiskTier::Low, 20.0),
        customer("M5", RiskTier::Medium, 90.0),
    ]
}

fn feed_for(records: &[CustomerRecord]) -> AlertFeed {
    AlertFeed::build(records, &AlertPolicy::default(), &ReferenceClock::default(), &RngBank::new(42))
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Reference data: 2 High + 1 Medium → 3 alerts.
#[test]
fn reference_data_yields_three_alerts() {
    let store = RecordStore::reference();
    let feed = feed_for(store.customers());

    assert_eq!(feed.len(), 3);
    let high: Vec<&str> = feed
        .entries()
        .iter()
        .filter(|a| a.priority == AlertPriority::High)
        .map(|a| a.id.as_str())
        .collect();
    assert_eq!(high.len(), 2);
    assert!(high.contains(&"CUST002") && high.contains(&"CUST004"));
    assert!(feed.get("CUST005").is_some(), "the Medium customer gets an alert");
}

/// 3 High + 5 Medium → 3 + 2 alerts; the first two Mediums in record order.
#[test]
fn medium_alerts_capped_at_two_in_record_order() {
    let records = mixed_records();
    let feed = feed_for(&records);

    assert_eq!(feed.len(), 5);
    let mut medium: Vec<&str> = feed
        .entries()
        .iter()
        .filter(|a| a.priority == AlertPriority::Medium)
        .map(|a| a.id.as_str())
        .collect();
    medium.sort();
    assert_eq!(medium, vec!["M1", "M2"]);
}

/// High: monthly × 12. Medium: monthly × 6.
#[test]
fn revenue_at_risk_uses_priority_multiplier() {
    let records = mixed_records();
    let feed = feed_for(&records);

    for alert in feed.entries() {
        let source = records.iter().find(|c| c.id == alert.id).unwrap();
        let expected = match alert.priority {
            AlertPriority::High   => source.monthly_charges * 12.0,
            AlertPriority::Medium => source.monthly_charges * 6.0,
        };
        assert!(
            (alert.revenue_at_risk - expected).abs() < 1e-9,
            "{}: revenue_at_risk={} expected={expected}", alert.id, alert.revenue_at_risk
        );
    }
}

/// Fixed action lists and messages per priority.
#[test]
fn actions_and_messages_follow_priority() {
    let store = RecordStore::reference();
    let feed = feed_for(store.customers());

    let high = feed.get("CUST004").unwrap();
    assert_eq!(high.recommended_actions, HIGH_PRIORITY_ACTIONS.map(String::from).to_vec());
    assert_eq!(high.message, "Customer David Thompson has 82% churn probability");
    assert_eq!(high.alert_type, "Churn Risk");
    assert_eq!(high.top_factors.len(), 3);
    assert_eq!(high.top_factors[0].name, "Contract Type");

    let medium = feed.get("CUST005").unwrap();
    assert_eq!(medium.recommended_actions, MEDIUM_PRIORITY_ACTIONS.map(String::from).to_vec());
    assert_eq!(medium.message, "Customer Lisa Wang showing early churn indicators");
}

/// Timestamps fall inside the priority's window and the feed is newest first.
#[test]
fn timestamps_bounded_and_sorted_newest_first() {
    let clock = ReferenceClock::default();
    let policy = AlertPolicy::default();
    let records = mixed_records();
    let alerts = build_alerts(&records, &policy, &clock, &RngBank::new(7));

    for a in &alerts {
        let days = match a.priority {
            AlertPriority::High   => policy.high_window_days,
            AlertPriority::Medium => policy.medium_window_days,
        };
        assert!(a.timestamp <= clock.now, "{} is in the future", a.id);
        assert!(a.timestamp > clock.window_start(days), "{} older than {days} days", a.id);
    }
    for pair in alerts.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp, "feed not sorted newest first");
    }
}

/// A customer's timestamp depends on seed and id, not on its neighbours.
#[test]
fn timestamps_stable_per_customer() {
    let clock = ReferenceClock::default();
    let policy = AlertPolicy::default();
    let bank = RngBank::new(99);

    let all = build_alerts(&mixed_records(), &policy, &clock, &bank);
    let only_h2: Vec<CustomerRecord> =
        mixed_records().into_iter().filter(|c| c.id == "H2").collect();
    let alone = build_alerts(&only_h2, &policy, &clock, &bank);

    let ts_in_all = all.iter().find(|a| a.id == "H2").unwrap().timestamp;
    assert_eq!(alone[0].timestamp, ts_in_all);
}

/// mark_actioned then dismiss equals a single resolve; no error the second time.
#[test]
fn resolution_is_idempotent_and_first_wins() {
    let store = RecordStore::reference();
    let mut feed = feed_for(store.customers());

    assert_eq!(
        feed.mark_actioned("CUST002").unwrap(),
        ResolveOutcome::Resolved(Resolution::Actioned)
    );
    assert_eq!(
        feed.dismiss("CUST002").unwrap(),
        ResolveOutcome::AlreadyResolved(Resolution::Actioned)
    );
    assert_eq!(
        feed.mark_actioned("CUST002").unwrap(),
        ResolveOutcome::AlreadyResolved(Resolution::Actioned)
    );
    assert_eq!(
        feed.get("CUST002").unwrap().status,
        AlertStatus::Resolved { resolution: Resolution::Actioned }
    );

    feed.dismiss("CUST004").unwrap();
    feed.mark_actioned("CUST004").unwrap();
    assert_eq!(
        feed.get("CUST004").unwrap().status,
        AlertStatus::Resolved { resolution: Resolution::Dismissed }
    );

    assert_eq!(feed.get("CUST005").unwrap().status, AlertStatus::Active);
}

/// Resolving an unknown alert reports NotFound and changes nothing.
#[test]
fn resolving_unknown_alert_is_not_found() {
    let store = RecordStore::reference();
    let mut feed = feed_for(store.customers());

    // CUST001 is Low risk and has no alert.
    let err = feed.dismiss("CUST001").unwrap_err();
    assert!(matches!(err, DashError::NotFound { kind: "alert", .. }), "got {err}");
    assert!(feed.entries().iter().all(|a| a.status == AlertStatus::Active));
}

/// Summary counts all High/Medium customers; revenue covers the feed only.
#[test]
fn summary_counts_and_revenue() {
    let records = mixed_records();
    let mut feed = feed_for(&records);
    feed.dismiss("H1").unwrap();

    let s = feed.summary(&records);
    assert_eq!(s.high_priority, 3);
    assert_eq!(s.medium_priority, 5, "summary is not capped");
    assert_eq!(s.active, 4);
    assert_eq!(s.resolved, 1);

    let expected = (30.0 + 40.0 + 55.5) * 12.0 + (50.0 + 60.0) * 6.0;
    assert!((s.revenue_at_risk - expected).abs() < 1e-9);
}

/// No at-risk customers → empty feed, zeroed summary.
#[test]
fn empty_and_low_only_sets_yield_empty_feed() {
    let feed = feed_for(&[]);
    assert!(feed.is_empty());

    let low_only = vec![customer("L1", RiskTier::Low, 10.0), customer("N1", RiskTier::None, 5.0)];
    let feed = feed_for(&low_only);
    assert!(feed.is_empty());
    let s = feed.summary(&low_only);
    assert_eq!((s.high_priority, s.medium_priority, s.active), (0, 0, 0));
    assert_eq!(s.revenue_at_risk, 0.0);
}

/// A custom policy changes the cap and the multipliers.
#[test]
fn policy_overrides_apply() {
    let policy = AlertPolicy {
        medium_cap: 0,
        high_revenue_months: 24.0,
        ..AlertPolicy::default()
    };
    let alerts = build_alerts(&mixed_records(), &policy, &ReferenceClock::default(), &RngBank::new(1));
    assert_eq!(alerts.len(), 3);
    let h1 = alerts.iter().find(|a| a.id == "H1").unwrap();
    assert!((h1.revenue_at_risk - 720.0).abs() < 1e-9);
}

#[test]
fn display_time_format() {
    let store = RecordStore::reference();
    let feed = feed_for(store.customers());
    let shown = feed.entries()[0].display_time();
    // e.g. "Jan 14, 2024 03:27"
    assert!(shown.starts_with("Jan "), "got {shown}");
    assert!(shown.contains(", 2024 "), "got {shown}");
}
