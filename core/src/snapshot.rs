//! Snapshot: the full view state handed to the presentation layer.
//!
//! A snapshot is plain data: serializable, detached from the session,
//! and complete enough to render every tab without calling back in.

use crate::{
    alert::{AlertEntry, AlertSummary},
    customer::{CustomerDetail, CustomerRecord},
    derivation::{DashboardKpis, PlanRow, RegionRow, TrendRow},
    filter::CustomerQuery,
    model_performance::ModelPerformanceView,
    store::DashboardStats,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub seed:          u64,
    pub reference_now: DateTime<Utc>,

    // Overview tab
    pub stats:   DashboardStats,
    pub kpis:    DashboardKpis,
    pub trend:   Vec<TrendRow>,
    pub regions: Vec<RegionRow>,
    pub plans:   Vec<PlanRow>,

    // Customer analysis tab
    pub query:     CustomerQuery,
    pub customers: Vec<CustomerRecord>,
    pub selected:  Option<CustomerDetail>,

    // Risk alerts tab
    pub alerts:        Vec<AlertEntry>,
    pub alert_summary: AlertSummary,

    // Model performance tab
    pub model: ModelPerformanceView,
}
