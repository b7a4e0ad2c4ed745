//! Session events: what each applied command changed.
//!
//! RULE: Every state change in a session is reported as an event.
//! Rejected commands (unknown id, bad filter value) emit nothing
//! and return the error instead.

use crate::{
    alert::Resolution,
    filter::{RegionFilter, RiskFilter},
    types::{AlertId, CustomerId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        seed:      u64,
        customers: usize,
        alerts:    usize,
    },

    // ── Customer list ──────────────────────────────
    SearchChanged {
        text:    String,
        visible: usize,
    },
    RegionFilterChanged {
        filter:  RegionFilter,
        visible: usize,
    },
    RiskFilterChanged {
        filter:  RiskFilter,
        visible: usize,
    },
    CustomerSelected {
        customer_id: CustomerId,
    },
    SelectionCleared,

    // ── Alerts feed ────────────────────────────────
    AlertResolved {
        alert_id:   AlertId,
        resolution: Resolution,
    },
    /// A resolve on an already-resolved alert. State is unchanged.
    AlertAlreadyResolved {
        alert_id:   AlertId,
        resolution: Resolution,
    },
}

impl SessionEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }       => "session_started",
            Self::SearchChanged { .. }        => "search_changed",
            Self::RegionFilterChanged { .. }  => "region_filter_changed",
            Self::RiskFilterChanged { .. }    => "risk_filter_changed",
            Self::CustomerSelected { .. }     => "customer_selected",
            Self::SelectionCleared            => "selection_cleared",
            Self::AlertResolved { .. }        => "alert_resolved",
            Self::AlertAlreadyResolved { .. } => "alert_already_resolved",
        }
    }
}
