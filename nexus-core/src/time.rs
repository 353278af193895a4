//! Time management for pipelines
//!
//! Provides clock implementations behind [`TimeSource`]:
//! - System clock (wall clock, default for every pipeline)
//! - Manual clock (advanced explicitly, for deterministic tests)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::constants::US_PER_SECOND;
pub use crate::traits::TimeSource;

/// Timestamp in microseconds since the Unix epoch (or an arbitrary origin
/// for manual clocks)
pub type Timestamp = u64;

/// Convert a microsecond timestamp or duration to seconds
pub fn to_seconds(us: u64) -> f64 {
    us as f64 / US_PER_SECOND as f64
}

/// System time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }

    fn precision_us(&self) -> u32 {
        1
    }
}

/// Manually advanced time source for testing
///
/// Clones share the same counter, so a test can keep one handle while a
/// pipeline (or a stage inside it) holds another:
///
/// ```rust
/// use nexus_core::time::{ManualTime, TimeSource};
///
/// let clock = ManualTime::new(1_000);
/// let handle = clock.clone();
/// handle.advance(500);
/// assert_eq!(clock.now(), 1_500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    timestamp: Arc<AtomicU64>,
}

impl ManualTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp: Arc::new(AtomicU64::new(timestamp)) }
    }

    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance(&self, us: u64) {
        self.timestamp.fetch_add(us, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Timestamp {
        self.timestamp.load(Ordering::SeqCst)
    }

    fn is_wall_clock(&self) -> bool {
        false
    }

    fn precision_us(&self) -> u32 {
        1
    }
}
