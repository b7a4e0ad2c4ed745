//! Alert synthesizer: turns at-risk customers into a prioritized feed.
//!
//! Every High-risk customer gets a High alert. The first
//! `medium_cap` Medium-risk customers (record-set order) get a Medium
//! alert. Timestamps are pseudo-random but stable: each is derived from
//! the session seed and the customer id, never from the platform clock
//! or RNG. The feed is ordered newest first.
//!
//! STATE MACHINE (per alert): Active → Resolved. Resolved is terminal.
//! Both mark_actioned and dismiss resolve; the first one wins and
//! repeat calls are no-ops.

use crate::{
    clock::ReferenceClock,
    customer::{ChurnFactor, CustomerRecord},
    error::{DashError, DashResult},
    rng::{RngBank, StreamSlot},
    types::{AlertId, CustomerId, PlanTier, Region, RiskTier},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ALERT_TYPE: &str = "Churn Risk";

/// Number of churn factors shown on each alert card.
pub const TOP_FACTOR_COUNT: usize = 3;

pub const HIGH_PRIORITY_ACTIONS: [&str; 4] = [
    "Contact customer within 24 hours",
    "Offer retention discount",
    "Schedule technical support call",
    "Review service satisfaction",
];

pub const MEDIUM_PRIORITY_ACTIONS: [&str; 4] = [
    "Send satisfaction survey",
    "Offer service upgrade",
    "Schedule check-in call",
    "Monitor usage patterns",
];

// ── Policy ───────────────────────────────────────────────────────────────────

/// Longest alert window a loaded config may ask for (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertPolicy {
    /// Months of charges counted as revenue at risk for a High alert.
    pub high_revenue_months:   f64,
    pub medium_revenue_months: f64,
    /// High alert timestamps fall within this many days before now.
    pub high_window_days:      u32,
    pub medium_window_days:    u32,
    /// Max Medium alerts in the feed.
    pub medium_cap:            usize,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            high_revenue_months:   12.0,
            medium_revenue_months: 6.0,
            high_window_days:      7,
            medium_window_days:    3,
            medium_cap:            2,
        }
    }
}

// ── Types ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertPriority {
    High,
    Medium,
}

impl AlertPriority {
    pub fn recommended_actions(&self) -> &'static [&'static str; 4] {
        match self {
            Self::High   => &HIGH_PRIORITY_ACTIONS,
            Self::Medium => &MEDIUM_PRIORITY_ACTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Actioned,
    Dismissed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Resolved { resolution: Resolution },
}

impl AlertStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// The slice of the source record an alert card displays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertCustomer {
    pub id:                CustomerId,
    pub name:              String,
    pub plan_type:         PlanTier,
    pub region:            Region,
    pub tenure:            u32,
    pub churn_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEntry {
    pub id:                  AlertId,
    pub customer:            AlertCustomer,
    pub priority:            AlertPriority,
    pub alert_type:          String,
    pub message:             String,
    pub timestamp:           DateTime<Utc>,
    pub revenue_at_risk:     f64,
    pub recommended_actions: Vec<String>,
    pub top_factors:         Vec<ChurnFactor>,
    pub status:              AlertStatus,
}

impl AlertEntry {
    fn synthesize(
        c: &CustomerRecord,
        priority: AlertPriority,
        policy: &AlertPolicy,
        clock: &ReferenceClock,
        bank: &RngBank,
    ) -> Self {
        let (message, months, window_days) = match priority {
            AlertPriority::High => (
                format!(
                    "Customer {} has {:.0}% churn probability",
                    c.name,
                    c.churn_percent(),
                ),
                policy.high_revenue_months,
                policy.high_window_days,
            ),
            AlertPriority::Medium => (
                format!("Customer {} showing early churn indicators", c.name),
                policy.medium_revenue_months,
                policy.medium_window_days,
            ),
        };

        let mut rng = bank.for_key(StreamSlot::AlertTimestamps, &c.id);
        let timestamp = clock.back_within(window_days, rng.next_f64());

        Self {
            id: c.id.clone(),
            customer: AlertCustomer {
                id:                c.id.clone(),
                name:              c.name.clone(),
                plan_type:         c.plan_type,
                region:            c.region,
                tenure:            c.tenure,
                churn_probability: c.churn_probability,
            },
            priority,
            alert_type: ALERT_TYPE.to_string(),
            message,
            timestamp,
            revenue_at_risk: c.monthly_charges * months,
            recommended_actions: priority
                .recommended_actions()
                .iter()
                .map(|a| a.to_string())
                .collect(),
            top_factors: c.top_churn_factors.iter().take(TOP_FACTOR_COUNT).cloned().collect(),
            status: AlertStatus::Active,
        }
    }

    /// Timestamp as shown on the feed, e.g. "Jan 12, 2024 09:41".
    pub fn display_time(&self) -> String {
        self.timestamp.format("%b %d, %Y %H:%M").to_string()
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }
}

/// Build the feed for `records`, newest first.
/// Equal timestamps are ordered by customer id.
pub fn build_alerts(
    records: &[CustomerRecord],
    policy: &AlertPolicy,
    clock: &ReferenceClock,
    bank: &RngBank,
) -> Vec<AlertEntry> {
    let high = records
        .iter()
        .filter(|c| c.churn_risk == RiskTier::High)
        .map(|c| AlertEntry::synthesize(c, AlertPriority::High, policy, clock, bank));

    let medium = records
        .iter()
        .filter(|c| c.churn_risk == RiskTier::Medium)
        .take(policy.medium_cap)
        .map(|c| AlertEntry::synthesize(c, AlertPriority::Medium, policy, clock, bank));

    let mut alerts: Vec<AlertEntry> = high.chain(medium).collect();
    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
    alerts
}

// ── Feed ─────────────────────────────────────────────────────────────────────

/// Outcome of a resolve call on a known alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(Resolution),
    /// Already resolved; carries the resolution that stuck.
    AlreadyResolved(Resolution),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertSummary {
    /// All High-risk customers, whether or not the feed shows them.
    pub high_priority:   usize,
    /// All Medium-risk customers; the feed caps how many it shows.
    pub medium_priority: usize,
    pub active:          usize,
    pub resolved:        usize,
    /// Sum over the feed's alerts.
    pub revenue_at_risk: f64,
}

/// The session-owned alert feed and its resolution state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlertFeed {
    entries: Vec<AlertEntry>,
}

impl AlertFeed {
    pub fn build(
        records: &[CustomerRecord],
        policy: &AlertPolicy,
        clock: &ReferenceClock,
        bank: &RngBank,
    ) -> Self {
        let entries = build_alerts(records, policy, clock, bank);
        log::info!(
            "alerts: built feed of {} ({} high)",
            entries.len(),
            entries.iter().filter(|a| a.priority == AlertPriority::High).count(),
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[AlertEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&AlertEntry> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mark_actioned(&mut self, id: &str) -> DashResult<ResolveOutcome> {
        self.resolve(id, Resolution::Actioned)
    }

    pub fn dismiss(&mut self, id: &str) -> DashResult<ResolveOutcome> {
        self.resolve(id, Resolution::Dismissed)
    }

    fn resolve(&mut self, id: &str, resolution: Resolution) -> DashResult<ResolveOutcome> {
        let entry = self
            .entries
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DashError::NotFound { kind: "alert", id: id.to_string() })?;

        match entry.status {
            AlertStatus::Resolved { resolution: existing } => {
                log::debug!("alerts: {id} already resolved ({existing:?}), ignoring {resolution:?}");
                Ok(ResolveOutcome::AlreadyResolved(existing))
            }
            AlertStatus::Active => {
                entry.status = AlertStatus::Resolved { resolution };
                log::info!("alerts: {id} resolved ({resolution:?})");
                Ok(ResolveOutcome::Resolved(resolution))
            }
        }
    }

    pub fn summary(&self, records: &[CustomerRecord]) -> AlertSummary {
        let resolved = self.entries.iter().filter(|a| a.is_resolved()).count();
        AlertSummary {
            high_priority:   records.iter().filter(|c| c.churn_risk == RiskTier::High).count(),
            medium_priority: records.iter().filter(|c| c.churn_risk == RiskTier::Medium).count(),
            active:          self.entries.len() - resolved,
            resolved,
            revenue_at_risk: self.entries.iter().map(|a| a.revenue_at_risk).sum(),
        }
    }
}
