use serde::{Deserialize, Serialize};
use crate::types::{AlertId, CustomerId};

/// Every user intent the presentation layer forwards to the core.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DashboardCommand {
    // ── Customer list ─────────────────────────────
    SetSearch { text: String },
    SetRegion { region: String },
    SetRisk { risk: String },
    Select { customer_id: CustomerId },
    ClearSelection,

    // ── Alerts feed ───────────────────────────────
    MarkActioned { alert_id: AlertId },
    Dismiss { alert_id: AlertId },
}

impl DashboardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetSearch { .. }    => "set_search",
            Self::SetRegion { .. }    => "set_region",
            Self::SetRisk { .. }      => "set_risk",
            Self::Select { .. }       => "select",
            Self::ClearSelection      => "clear_selection",
            Self::MarkActioned { .. } => "mark_actioned",
            Self::Dismiss { .. }      => "dismiss",
        }
    }
}
