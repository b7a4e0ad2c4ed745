//! Seeded streams for the dashboard's synthetic values.
//!
//! The trend series and alert timestamps are not in the data files, so
//! they are drawn here, from the session seed only. A session replayed
//! with the same seed renders the same charts and the same feed.
//!
//! Alert timestamps use a stream keyed by customer id rather than one
//! shared stream, so a change elsewhere in the record set never moves
//! the timestamp of an unrelated alert.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the session seed and a stable
    /// stream index. The index must never change once assigned.
    pub fn new(session_seed: u64, stream_index: u64) -> Self {
        let derived_seed = session_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [low, low + span).
    pub fn next_in(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_f64() * span
    }
}

/// Hands out stream RNGs for one session, indexed by stable slot.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    session_seed: u64,
}

impl RngBank {
    pub fn new(session_seed: u64) -> Self {
        Self { session_seed }
    }

    pub fn seed(&self) -> u64 {
        self.session_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.session_seed, slot as u64).with_name(slot.name())
    }

    /// A stream keyed by a record id. Same (seed, slot, key) → same draws.
    pub fn for_key(&self, slot: StreamSlot, key: &str) -> StreamRng {
        StreamRng::new(self.session_seed ^ fnv1a_64(key.as_bytes()), slot as u64)
            .with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    TrendSeries     = 0,
    AlertTimestamps = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TrendSeries     => "trend_series",
            Self::AlertTimestamps => "alert_timestamps",
        }
    }
}

/// 64-bit FNV-1a. Stable across platforms and releases, unlike `DefaultHasher`.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME:  u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}
