//! Shared primitive types used across the dashboard core.
//!
//! RULE: Region, risk tier and plan tier are closed sets.
//! Anything arriving as a string (filter fields, JSON) is parsed here
//! and rejected if unknown. Nothing downstream matches on raw strings.

use crate::error::{DashError, DashResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable, unique customer identifier (e.g. "CUST002").
pub type CustomerId = String;

/// Alerts are keyed by the customer they were synthesized from.
pub type AlertId = String;

// ── Region ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    /// Display order used by every per-region aggregate.
    pub const ALL: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East  => "East",
            Self::West  => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Region {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        Region::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| DashError::InvalidFilter {
                field: "region",
                value: s.to_string(),
            })
    }
}

// ── Risk tier ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskTier {
    High,
    Medium,
    Low,
    None,
}

/// Probability at or above which a record would be suggested as High.
pub const HIGH_TIER_THRESHOLD: f64 = 0.7;
/// Probability at or above which a record would be suggested as Medium.
pub const MEDIUM_TIER_THRESHOLD: f64 = 0.4;

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [RiskTier::High, RiskTier::Medium, RiskTier::Low, RiskTier::None];

    pub fn name(&self) -> &'static str {
        match self {
            Self::High   => "High",
            Self::Medium => "Medium",
            Self::Low    => "Low",
            Self::None   => "None",
        }
    }

    /// The tier a probability would map to under fixed thresholds.
    ///
    /// Tier and probability are authored independently in the record set.
    /// This is used only to flag disagreements; it never overwrites a tier.
    pub fn suggested_for(probability: f64) -> Self {
        if probability >= HIGH_TIER_THRESHOLD {
            Self::High
        } else if probability >= MEDIUM_TIER_THRESHOLD {
            Self::Medium
        } else if probability > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for RiskTier {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        RiskTier::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| DashError::InvalidFilter {
                field: "risk",
                value: s.to_string(),
            })
    }
}

// ── Plan tier ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlanTier {
    Basic,
    Premium,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Basic, PlanTier::Premium, PlanTier::Enterprise];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic      => "Basic",
            Self::Premium    => "Premium",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
