use churnscope_core::{
    alert::Resolution,
    command::DashboardCommand,
    error::DashError,
    event::SessionEvent,
    filter::{RegionFilter, RiskFilter},
    session::DashboardSession,
    types::{Region, RiskTier},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn session() -> DashboardSession {
    let _ = env_logger::builder().is_test(true).try_init();
    DashboardSession::reference_test()
}

fn cmd(json: &str) -> DashboardCommand {
    serde_json::from_str(json).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A fresh session logs its start and shows everything.
#[test]
fn session_starts_with_full_view() {
    let s = session();
    assert_eq!(
        s.events(),
        &[SessionEvent::SessionStarted { seed: 42, customers: 6, alerts: 3 }]
    );

    let snap = s.snapshot();
    assert_eq!(snap.customers.len(), 6);
    assert!(snap.selected.is_none());
    assert_eq!(snap.alerts.len(), 3);
    assert_eq!(snap.regions.len(), 4);
    assert_eq!(snap.plans.len(), 3);
    assert_eq!(snap.trend.len(), 12);
    assert_eq!(snap.model.cards.len(), 4);
}

/// Filter commands narrow the visible list and report the new count.
#[test]
fn filter_commands_update_visible_list() {
    let mut s = session();

    let ev = s.apply(cmd(r#"{"cmd":"set_risk","risk":"High"}"#)).unwrap();
    assert_eq!(
        ev,
        vec![SessionEvent::RiskFilterChanged { filter: RiskFilter::Only(RiskTier::High), visible: 2 }]
    );

    let ev = s.apply(cmd(r#"{"cmd":"set_region","region":"East"}"#)).unwrap();
    assert_eq!(
        ev,
        vec![SessionEvent::RegionFilterChanged { filter: RegionFilter::Only(Region::East), visible: 1 }]
    );

    let ev = s.apply(cmd(r#"{"cmd":"set_search","text":"nobody"}"#)).unwrap();
    assert_eq!(ev, vec![SessionEvent::SearchChanged { text: "nobody".into(), visible: 0 }]);
    assert!(s.snapshot().customers.is_empty());
}

/// A bad filter value is an error, emits nothing and keeps state.
#[test]
fn invalid_filter_command_is_recoverable() {
    let mut s = session();
    let before = s.events().len();

    let err = s.apply(cmd(r#"{"cmd":"set_region","region":"Atlantis"}"#)).unwrap_err();
    assert!(matches!(err, DashError::InvalidFilter { .. }), "got {err}");
    assert!(err.is_recoverable());
    assert_eq!(s.events().len(), before);
    assert_eq!(s.filter().query.region, RegionFilter::All);
}

/// Select, then an unknown select: selection cleared, NotFound reported.
#[test]
fn select_then_unknown_select() {
    let mut s = session();

    s.apply(DashboardCommand::Select { customer_id: "CUST005".into() }).unwrap();
    let snap = s.snapshot();
    assert_eq!(snap.selected.as_ref().map(|d| d.record.id.as_str()), Some("CUST005"));

    let err = s.apply(DashboardCommand::Select { customer_id: "GHOST".into() }).unwrap_err();
    assert!(matches!(err, DashError::NotFound { .. }));
    assert!(s.snapshot().selected.is_none());

    s.apply(DashboardCommand::Select { customer_id: "CUST001".into() }).unwrap();
    let ev = s.apply(DashboardCommand::ClearSelection).unwrap();
    assert_eq!(ev, vec![SessionEvent::SelectionCleared]);
    assert!(s.filter().selected_id().is_none());
}

/// Resolving twice emits AlertAlreadyResolved the second time.
#[test]
fn resolve_commands_are_idempotent() {
    let mut s = session();

    let first = s.apply(cmd(r#"{"cmd":"dismiss","alert_id":"CUST005"}"#)).unwrap();
    assert_eq!(
        first,
        vec![SessionEvent::AlertResolved { alert_id: "CUST005".into(), resolution: Resolution::Dismissed }]
    );

    let second = s.apply(cmd(r#"{"cmd":"mark_actioned","alert_id":"CUST005"}"#)).unwrap();
    assert_eq!(
        second,
        vec![SessionEvent::AlertAlreadyResolved { alert_id: "CUST005".into(), resolution: Resolution::Dismissed }]
    );

    let summary = s.snapshot().alert_summary;
    assert_eq!((summary.active, summary.resolved), (2, 1));
}

/// Resolving an alert never touches the source record.
#[test]
fn resolution_leaves_records_untouched() {
    let mut s = session();
    let before = s.store().customers().to_vec();
    s.apply(DashboardCommand::MarkActioned { alert_id: "CUST002".into() }).unwrap();
    assert_eq!(s.store().customers(), before.as_slice());
}

/// The snapshot serializes to JSON for the presentation layer.
#[test]
fn snapshot_serializes() {
    let s = session();
    let json = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(json["alerts"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["customers"][0]["id"], "CUST001");
    assert_eq!(json["customers"][0]["planType"], "Premium");
    assert_eq!(json["alerts"][0]["status"]["state"], "active");
}
