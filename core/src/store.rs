//! Record store: the static customer collection and summary statistics.
//!
//! RULE: The store is loaded once, in full, at session start and is
//! read-only afterwards. A load either yields a complete validated record
//! set or fails; there is no partial store.

pub mod reference;

use crate::{
    customer::CustomerRecord,
    error::{DashError, DashResult},
    model_performance::ModelMetrics,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;

/// Headline figures for the whole customer base, authored alongside the data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers:       u64,
    pub churned_customers:     u64,
    pub high_risk_customers:   u64,
    pub churn_rate:            f64, // percent
    pub avg_churn_probability: f64,
    pub revenue_at_risk:       f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    customers:       Vec<CustomerRecord>,
    model_metrics:   ModelMetrics,
    dashboard_stats: DashboardStats,
}

impl RecordStore {
    /// Build a store from already-parsed parts. Every record is validated
    /// and ids must be unique.
    pub fn from_parts(
        customers: Vec<CustomerRecord>,
        model_metrics: ModelMetrics,
        dashboard_stats: DashboardStats,
    ) -> DashResult<Self> {
        Self::validate_all(&customers)?;
        log::debug!("store: loaded {} customer records", customers.len());

        Ok(Self { customers, model_metrics, dashboard_stats })
    }

    fn validate_all(customers: &[CustomerRecord]) -> DashResult<()> {
        let mut seen = HashSet::with_capacity(customers.len());
        for c in customers {
            c.validate()?;
            if !seen.insert(c.id.as_str()) {
                return Err(DashError::InvalidRecord {
                    id:     c.id.clone(),
                    reason: "duplicate id".into(),
                });
            }
            if c.tier_disagrees() {
                log::warn!(
                    "store: {} tier {} disagrees with probability {:.2}",
                    c.id, c.churn_risk, c.churn_probability,
                );
            }
        }
        Ok(())
    }

    /// Load from a data directory holding `customers.json`,
    /// `model_metrics.json` and `dashboard_stats.json`.
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let customers: Vec<CustomerRecord> = read_json(&format!("{data_dir}/customers.json"))?;
        let model_metrics: ModelMetrics = read_json(&format!("{data_dir}/model_metrics.json"))?;
        let dashboard_stats: DashboardStats =
            read_json(&format!("{data_dir}/dashboard_stats.json"))?;

        Self::from_parts(customers, model_metrics, dashboard_stats)
    }

    /// The built-in six-customer dataset the dashboard ships with.
    pub fn reference() -> Self {
        Self {
            customers:       reference::customers(),
            model_metrics:   reference::model_metrics(),
            dashboard_stats: reference::dashboard_stats(),
        }
    }

    /// A store with no customers. Valid; every view degrades to empty rows.
    pub fn empty() -> Self {
        Self {
            customers:       Vec::new(),
            model_metrics:   reference::model_metrics(),
            dashboard_stats: reference::dashboard_stats(),
        }
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    pub fn get(&self, id: &str) -> Option<&CustomerRecord> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn model_metrics(&self) -> &ModelMetrics {
        &self.model_metrics
    }

    pub fn dashboard_stats(&self) -> &DashboardStats {
        &self.dashboard_stats
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> DashResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| DashError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DashError::Serialization {
        path: path.to_string(),
        source,
    })
}
