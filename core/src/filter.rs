//! Filter/selection engine: the customer list and its single selection.
//!
//! `filter_customers` is pure: same records and query, same ordered
//! output. `FilterState` is the session-owned half: the current query and
//! the one selected customer id.

use crate::{
    customer::{CustomerDetail, CustomerRecord},
    error::{DashError, DashResult},
    store::RecordStore,
    types::{CustomerId, Region, RiskTier},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The token the UI sends for "no restriction".
pub const ALL_TOKEN: &str = "All";

// ── Query ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn admits(&self, region: Region) -> bool {
        match self {
            Self::All     => true,
            Self::Only(r) => *r == region,
        }
    }
}

impl FromStr for RegionFilter {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        if s == ALL_TOKEN {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Only(RiskTier),
}

impl RiskFilter {
    pub fn admits(&self, tier: RiskTier) -> bool {
        match self {
            Self::All     => true,
            Self::Only(t) => *t == tier,
        }
    }
}

impl FromStr for RiskFilter {
    type Err = DashError;

    fn from_str(s: &str) -> DashResult<Self> {
        if s == ALL_TOKEN {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomerQuery {
    pub search_text: String,
    pub region:      RegionFilter,
    pub risk:        RiskFilter,
}

impl CustomerQuery {
    /// Parse the raw strings the filter bar holds.
    pub fn parse(search_text: &str, region: &str, risk: &str) -> DashResult<Self> {
        Ok(Self {
            search_text: search_text.to_string(),
            region:      region.parse()?,
            risk:        risk.parse()?,
        })
    }

    pub fn matches(&self, c: &CustomerRecord) -> bool {
        self.matches_search(c) && self.region.admits(c.region) && self.risk.admits(c.churn_risk)
    }

    fn matches_search(&self, c: &CustomerRecord) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        c.name.to_lowercase().contains(&needle) || c.id.to_lowercase().contains(&needle)
    }
}

/// Records matching every predicate of `query`, in record-set order.
pub fn filter_customers<'a>(
    records: &'a [CustomerRecord],
    query: &CustomerQuery,
) -> Vec<&'a CustomerRecord> {
    let kept: Vec<&CustomerRecord> = records.iter().filter(|c| query.matches(c)).collect();
    log::debug!(
        "filter: kept {}/{} (search={:?}, region={:?}, risk={:?})",
        kept.len(), records.len(), query.search_text, query.region, query.risk,
    );
    kept
}

// ── Session state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub query:    CustomerQuery,
    selected:     Option<CustomerId>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search(&mut self, text: &str) {
        self.query.search_text = text.to_string();
    }

    /// On an unrecognized value the previous filter is kept.
    pub fn set_region(&mut self, raw: &str) -> DashResult<RegionFilter> {
        let parsed = raw.parse::<RegionFilter>().inspect_err(|e| {
            log::warn!("filter: {e}; keeping {:?}", self.query.region);
        })?;
        self.query.region = parsed;
        Ok(parsed)
    }

    /// On an unrecognized value the previous filter is kept.
    pub fn set_risk(&mut self, raw: &str) -> DashResult<RiskFilter> {
        let parsed = raw.parse::<RiskFilter>().inspect_err(|e| {
            log::warn!("filter: {e}; keeping {:?}", self.query.risk);
        })?;
        self.query.risk = parsed;
        Ok(parsed)
    }

    /// Select the customer with `id`. An unknown id clears the selection
    /// and is reported as NotFound.
    pub fn select<'a>(&mut self, store: &'a RecordStore, id: &str) -> DashResult<&'a CustomerRecord> {
        match store.get(id) {
            Some(record) => {
                self.selected = Some(record.id.clone());
                Ok(record)
            }
            None => {
                self.selected = None;
                log::warn!("filter: select of unknown customer '{id}', selection cleared");
                Err(DashError::NotFound { kind: "customer", id: id.to_string() })
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected<'a>(&self, store: &'a RecordStore) -> Option<&'a CustomerRecord> {
        self.selected.as_deref().and_then(|id| store.get(id))
    }

    pub fn selected_detail(&self, store: &RecordStore) -> Option<CustomerDetail> {
        self.selected(store).map(CustomerDetail::of)
    }

    pub fn visible<'a>(&self, store: &'a RecordStore) -> Vec<&'a CustomerRecord> {
        filter_customers(store.customers(), &self.query)
    }
}
