use crate::{
    alert::{AlertPolicy, MAX_WINDOW_DAYS},
    clock::ReferenceClock,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Seed for every synthetic stream (trend series, alert timestamps).
    pub seed: u64,
    /// Pinned "now". When absent the session uses wall time.
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub alert_policy: AlertPolicy,
}

impl DashboardConfig {
    /// Load from a JSON file.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;

        let p = &config.alert_policy;
        if p.high_window_days == 0 || p.medium_window_days == 0 {
            anyhow::bail!("{path}: alert windows must be at least one day");
        }
        if p.high_window_days > MAX_WINDOW_DAYS || p.medium_window_days > MAX_WINDOW_DAYS {
            anyhow::bail!("{path}: alert windows must be at most {MAX_WINDOW_DAYS} days");
        }
        if p.high_revenue_months < 0.0 || p.medium_revenue_months < 0.0 {
            anyhow::bail!("{path}: revenue multipliers must be non-negative");
        }
        Ok(config)
    }

    /// Runner default: wall-clock time, given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            reference_time: None,
            alert_policy: AlertPolicy::default(),
        }
    }

    /// Config with a pinned clock and fixed seed for use in tests.
    pub fn default_test() -> Self {
        Self {
            seed: 42,
            reference_time: Some(ReferenceClock::default().now),
            alert_policy: AlertPolicy::default(),
        }
    }

    pub fn clock(&self) -> ReferenceClock {
        self.reference_time
            .map(ReferenceClock::fixed)
            .unwrap_or_else(ReferenceClock::wall)
    }
}
