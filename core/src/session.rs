//! The dashboard session: owns all per-session state.
//!
//! RULES:
//!   - The record store is loaded before the session starts and never
//!     mutated afterwards.
//!   - Selection lives in FilterState, resolution state in AlertFeed.
//!     Neither is global; the presentation layer holds the session.
//!   - All synthetic values come from the session's RngBank.
//!   - Every applied command is recorded in the session event log.

use crate::{
    alert::{AlertFeed, ResolveOutcome},
    clock::ReferenceClock,
    command::DashboardCommand,
    config::DashboardConfig,
    derivation::{self, TrendRow},
    error::DashResult,
    event::SessionEvent,
    filter::FilterState,
    model_performance::ModelPerformanceView,
    rng::{RngBank, StreamSlot},
    snapshot::DashboardSnapshot,
    store::RecordStore,
};

pub struct DashboardSession {
    pub config:   DashboardConfig,
    pub clock:    ReferenceClock,
    pub rng_bank: RngBank,
    store:        RecordStore,
    filter:       FilterState,
    alerts:       AlertFeed,
    events:       Vec<SessionEvent>,
}

impl DashboardSession {
    /// Start a session over a loaded store. Builds the alert feed once.
    pub fn start(store: RecordStore, config: DashboardConfig) -> Self {
        let clock = config.clock();
        let rng_bank = RngBank::new(config.seed);
        let alerts = AlertFeed::build(store.customers(), &config.alert_policy, &clock, &rng_bank);

        let started = SessionEvent::SessionStarted {
            seed:      config.seed,
            customers: store.len(),
            alerts:    alerts.len(),
        };
        log::info!(
            "session: started seed={} customers={} alerts={}",
            config.seed, store.len(), alerts.len(),
        );

        Self {
            config,
            clock,
            rng_bank,
            store,
            filter: FilterState::new(),
            alerts,
            events: vec![started],
        }
    }

    /// Reference dataset with the test config. Used by tests and demos.
    pub fn reference_test() -> Self {
        Self::start(RecordStore::reference(), DashboardConfig::default_test())
    }

    /// Apply one user intent. Recoverable failures (unknown id, bad filter
    /// value) return the error and leave state as it was, except that an
    /// unknown selection clears the current selection.
    pub fn apply(&mut self, cmd: DashboardCommand) -> DashResult<Vec<SessionEvent>> {
        log::debug!("session: apply {}", cmd.name());

        let emitted = match cmd {
            DashboardCommand::SetSearch { text } => {
                self.filter.set_search(&text);
                vec![SessionEvent::SearchChanged { text, visible: self.visible_count() }]
            }
            DashboardCommand::SetRegion { region } => {
                let filter = self.filter.set_region(&region)?;
                vec![SessionEvent::RegionFilterChanged { filter, visible: self.visible_count() }]
            }
            DashboardCommand::SetRisk { risk } => {
                let filter = self.filter.set_risk(&risk)?;
                vec![SessionEvent::RiskFilterChanged { filter, visible: self.visible_count() }]
            }
            DashboardCommand::Select { customer_id } => {
                let record = self.filter.select(&self.store, &customer_id)?;
                vec![SessionEvent::CustomerSelected { customer_id: record.id.clone() }]
            }
            DashboardCommand::ClearSelection => {
                self.filter.clear_selection();
                vec![SessionEvent::SelectionCleared]
            }
            DashboardCommand::MarkActioned { alert_id } => {
                let outcome = self.alerts.mark_actioned(&alert_id)?;
                vec![resolve_event(alert_id, outcome)]
            }
            DashboardCommand::Dismiss { alert_id } => {
                let outcome = self.alerts.dismiss(&alert_id)?;
                vec![resolve_event(alert_id, outcome)]
            }
        };

        self.events.extend(emitted.iter().cloned());
        Ok(emitted)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    fn visible_count(&self) -> usize {
        self.filter.visible(&self.store).len()
    }

    /// The synthetic monthly trend. Same seed → same series on every call.
    pub fn trend_series(&self) -> Vec<TrendRow> {
        let mut rng = self.rng_bank.for_stream(StreamSlot::TrendSeries);
        derivation::trend_series(&mut rng)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let records = self.store.customers();
        DashboardSnapshot {
            seed:          self.config.seed,
            reference_now: self.clock.now,
            stats:         self.store.dashboard_stats().clone(),
            kpis:          derivation::dashboard_kpis(records, &self.config.alert_policy),
            trend:         self.trend_series(),
            regions:       derivation::region_summary(records),
            plans:         derivation::plan_summary(records),
            query:         self.filter.query.clone(),
            customers:     self.filter.visible(&self.store).into_iter().cloned().collect(),
            selected:      self.filter.selected_detail(&self.store),
            alerts:        self.alerts.entries().to_vec(),
            alert_summary: self.alerts.summary(records),
            model:         ModelPerformanceView::build(self.store.model_metrics()),
        }
    }
}

fn resolve_event(alert_id: String, outcome: ResolveOutcome) -> SessionEvent {
    match outcome {
        ResolveOutcome::Resolved(resolution) => {
            SessionEvent::AlertResolved { alert_id, resolution }
        }
        ResolveOutcome::AlreadyResolved(resolution) => {
            SessionEvent::AlertAlreadyResolved { alert_id, resolution }
        }
    }
}
