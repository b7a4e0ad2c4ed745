//! Churn analytics dashboard core.
//!
//! Filtering and selection over an in-memory customer set, chart-row
//! derivations, and a synthesized risk alert feed. Rendering lives
//! outside this crate; it consumes `DashboardSnapshot`s and forwards
//! user intents as `DashboardCommand`s.

pub mod alert;
pub mod clock;
pub mod command;
pub mod config;
pub mod customer;
pub mod derivation;
pub mod error;
pub mod event;
pub mod filter;
pub mod model_performance;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;
