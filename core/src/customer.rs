//! Customer records and their churn explanations.
//!
//! Records are immutable once loaded. The JSON layout uses the camelCase
//! keys the dashboard's data files are authored in.

use crate::{
    error::{DashError, DashResult},
    types::{CustomerId, PlanTier, Region, RiskTier},
};
use serde::{Deserialize, Serialize};

/// One signed contribution to a customer's churn probability.
/// Positive impact raises risk, negative lowers it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChurnFactor {
    #[serde(rename = "factor")]
    pub name:        String,
    pub description: String,
    pub impact:      f64,
}

impl ChurnFactor {
    pub fn increases_risk(&self) -> bool {
        self.impact > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    // Identity
    pub id:   CustomerId,
    pub name: String,
    // Demographic
    pub age:    u32,
    #[serde(default)]
    pub gender: Option<String>,
    pub region: Region,
    // Account
    pub plan_type:      PlanTier,
    pub tenure:         u32, // months
    pub contract_type:  String,
    pub payment_method: String,
    // Services
    pub internet_service: String,
    pub online_security:  bool,
    pub tech_support:     bool,
    #[serde(rename = "streamingTV")]
    pub streaming_tv:     bool,
    pub streaming_movies: bool,
    // Financial
    pub monthly_charges: f64,
    pub total_charges:   f64,
    // Risk
    pub churn_probability: f64,
    pub churn_risk:        RiskTier,
    /// Most important first. Not guaranteed sorted by magnitude.
    pub top_churn_factors: Vec<ChurnFactor>,
    // Engagement
    #[serde(default)]
    pub last_activity:     Option<String>,
    #[serde(default)]
    pub support_tickets:   u32,
    #[serde(default)]
    pub avg_call_duration: f64,
    #[serde(default)]
    pub data_usage:        f64,
}

impl CustomerRecord {
    /// Reject records that cannot be displayed meaningfully.
    /// Tier/probability disagreement is NOT an error; see `tier_disagrees`.
    pub fn validate(&self) -> DashResult<()> {
        let fail = |reason: &str| DashError::InvalidRecord {
            id:     self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(fail("empty id"));
        }
        if self.age == 0 {
            return Err(fail("age must be positive"));
        }
        if !(0.0..=1.0).contains(&self.churn_probability) {
            return Err(fail("churn probability outside [0, 1]"));
        }
        let charges_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !charges_ok(self.monthly_charges) || !charges_ok(self.total_charges) {
            return Err(fail("charges must be non-negative"));
        }
        Ok(())
    }

    /// True when the authored tier differs from the threshold suggestion.
    pub fn tier_disagrees(&self) -> bool {
        RiskTier::suggested_for(self.churn_probability) != self.churn_risk
    }

    /// Churn factors sorted by absolute impact, largest first.
    /// Equal magnitudes keep their authored order.
    pub fn factors_by_magnitude(&self) -> Vec<&ChurnFactor> {
        let mut factors: Vec<&ChurnFactor> = self.top_churn_factors.iter().collect();
        factors.sort_by(|a, b| {
            b.impact
                .abs()
                .partial_cmp(&a.impact.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        factors
    }

    /// Sum of positive impacts and sum of negative impacts.
    pub fn impact_split(&self) -> (f64, f64) {
        self.top_churn_factors.iter().fold((0.0, 0.0), |(up, down), f| {
            if f.increases_risk() {
                (up + f.impact, down)
            } else {
                (up, down + f.impact)
            }
        })
    }

    pub fn churn_percent(&self) -> f64 {
        self.churn_probability * 100.0
    }
}

/// Colour band of the probability gauge on the customer detail panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    /// Strict thresholds: exactly 0.7 is Medium, exactly 0.4 is Low.
    pub fn of(probability: f64) -> Self {
        if probability > 0.7 {
            Self::High
        } else if probability > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Everything the detail panel shows for the selected customer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDetail {
    pub record:           CustomerRecord,
    pub probability_band: ProbabilityBand,
    pub sorted_factors:   Vec<ChurnFactor>,
    pub risk_increase:    f64,
    pub risk_decrease:    f64,
}

impl CustomerDetail {
    pub fn of(record: &CustomerRecord) -> Self {
        let (risk_increase, risk_decrease) = record.impact_split();
        Self {
            probability_band: ProbabilityBand::of(record.churn_probability),
            sorted_factors:   record.factors_by_magnitude().into_iter().cloned().collect(),
            risk_increase,
            risk_decrease,
            record:           record.clone(),
        }
    }
}
