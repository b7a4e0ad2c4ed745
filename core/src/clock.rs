//! Reference clock: the session's notion of "now".
//!
//! Alert timestamps are expressed relative to this instant.
//! Sessions built from config pin it; the runner uses wall time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceClock {
    pub now: DateTime<Utc>,
}

impl ReferenceClock {
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn wall() -> Self {
        Self { now: Utc::now() }
    }

    /// The instant `fraction` of the way back through a window of `days`.
    /// `fraction` is clamped to [0, 1). Saturates at the earliest
    /// representable instant.
    pub fn back_within(&self, days: u32, fraction: f64) -> DateTime<Utc> {
        let window_ms = i64::from(days) * 24 * 60 * 60 * 1000;
        let offset_ms = (window_ms as f64 * fraction.clamp(0.0, 1.0 - f64::EPSILON)) as i64;
        self.saturating_back(Duration::milliseconds(offset_ms))
    }

    /// Start of the window of `days` ending at now.
    pub fn window_start(&self, days: u32) -> DateTime<Utc> {
        self.saturating_back(Duration::days(i64::from(days)))
    }

    fn saturating_back(&self, offset: Duration) -> DateTime<Utc> {
        self.now
            .checked_sub_signed(offset)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for ReferenceClock {
    /// Mid-January 2024, matching the activity dates in the reference dataset.
    fn default() -> Self {
        Self {
            now: Utc
                .with_ymd_and_hms(2024, 1, 16, 12, 0, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}
