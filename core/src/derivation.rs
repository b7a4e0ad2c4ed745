//! Derivation functions: chart rows computed from the record set.
//!
//! All functions are total: an empty record set yields the same number of
//! rows with zeroed values. The trend series is synthetic and draws from
//! an injected StreamRng so it is reproducible per seed.

use crate::{
    alert::AlertPolicy,
    customer::CustomerRecord,
    rng::StreamRng,
    types::{PlanTier, Region, RiskTier},
};
use serde::Serialize;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Synthetic rates are drawn from [TREND_LOW, TREND_LOW + TREND_SPAN).
pub const TREND_LOW:  f64 = 10.0;
pub const TREND_SPAN: f64 = 20.0;

// ── Row types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendRow {
    pub month:      &'static str,
    pub churn_rate: f64,
    pub actual:     f64,
    pub predicted:  f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionRow {
    pub region:     Region,
    pub customers:  usize,
    pub churn_rate: f64, // percent
    pub revenue:    f64, // annualized
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanRow {
    pub plan_type:   PlanTier,
    pub customers:   usize,
    pub churn_rate:  f64, // percent
    pub avg_revenue: f64, // monthly
}

/// Live KPIs computed from the loaded records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardKpis {
    pub total_customers:       usize,
    pub high_risk_customers:   usize,
    pub medium_risk_customers: usize,
    pub avg_churn_probability: f64,
    pub monthly_revenue:       f64,
    /// Annualized exposure of every High and Medium customer under the
    /// alert multipliers (uncapped).
    pub revenue_at_risk:       f64,
}

// ── Derivations ──────────────────────────────────────────────────────────────

/// One row per calendar month, Jan through Dec.
pub fn trend_series(rng: &mut StreamRng) -> Vec<TrendRow> {
    let rows: Vec<TrendRow> = MONTHS
        .iter()
        .map(|&month| TrendRow {
            month,
            churn_rate: rng.next_in(TREND_LOW, TREND_SPAN),
            predicted:  rng.next_in(TREND_LOW, TREND_SPAN),
            actual:     rng.next_in(TREND_LOW, TREND_SPAN),
        })
        .collect();
    log::debug!("derivation: trend series from stream '{}'", rng.name);
    rows
}

/// Exactly four rows in `Region::ALL` order.
pub fn region_summary(records: &[CustomerRecord]) -> Vec<RegionRow> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let group: Vec<&CustomerRecord> =
                records.iter().filter(|c| c.region == region).collect();
            RegionRow {
                region,
                customers:  group.len(),
                churn_rate: mean_probability(&group) * 100.0,
                revenue:    group.iter().map(|c| c.monthly_charges).sum::<f64>() * 12.0,
            }
        })
        .collect()
}

/// Exactly three rows in `PlanTier::ALL` order.
pub fn plan_summary(records: &[CustomerRecord]) -> Vec<PlanRow> {
    PlanTier::ALL
        .into_iter()
        .map(|plan_type| {
            let group: Vec<&CustomerRecord> =
                records.iter().filter(|c| c.plan_type == plan_type).collect();
            let avg_revenue = if group.is_empty() {
                0.0
            } else {
                group.iter().map(|c| c.monthly_charges).sum::<f64>() / group.len() as f64
            };
            PlanRow {
                plan_type,
                customers: group.len(),
                churn_rate: mean_probability(&group) * 100.0,
                avg_revenue,
            }
        })
        .collect()
}

pub fn dashboard_kpis(records: &[CustomerRecord], policy: &AlertPolicy) -> DashboardKpis {
    let all: Vec<&CustomerRecord> = records.iter().collect();
    let high = records.iter().filter(|c| c.churn_risk == RiskTier::High);
    let medium = records.iter().filter(|c| c.churn_risk == RiskTier::Medium);

    let high_exposure: f64 = high.clone().map(|c| c.monthly_charges * policy.high_revenue_months).sum();
    let medium_exposure: f64 = medium.clone().map(|c| c.monthly_charges * policy.medium_revenue_months).sum();

    DashboardKpis {
        total_customers:       records.len(),
        high_risk_customers:   high.count(),
        medium_risk_customers: medium.count(),
        avg_churn_probability: mean_probability(&all),
        monthly_revenue:       records.iter().map(|c| c.monthly_charges).sum(),
        revenue_at_risk:       high_exposure + medium_exposure,
    }
}

fn mean_probability(group: &[&CustomerRecord]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    group.iter().map(|c| c.churn_probability).sum::<f64>() / group.len() as f64
}
