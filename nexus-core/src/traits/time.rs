//! Time Source Abstraction
//!
//! Pipelines never read the system clock directly. They ask a
//! [`TimeSource`], which keeps timing deterministic under test.
//!
//! ## Common Implementations
//!
//! - `SystemTime`: Wall clock time (may jump due to NTP)
//! - `ManualTime`: Controllable time for testing

use crate::time::Timestamp;

/// Source of time for pipelines
///
/// ## Implementation Requirements
///
/// - `now()` must be cheap; it is called around every stage
/// - Timestamp overflow must be handled gracefully
/// - Precision should be documented for each implementation
///
/// ## Example Implementation
///
/// ```rust
/// use nexus_core::traits::TimeSource;
/// use nexus_core::time::Timestamp;
///
/// struct FrozenClock(Timestamp);
///
/// impl TimeSource for FrozenClock {
///     fn now(&self) -> Timestamp {
///         self.0
///     }
///
///     fn is_wall_clock(&self) -> bool {
///         false
///     }
///
///     fn precision_us(&self) -> u32 {
///         1
///     }
/// }
/// ```
pub trait TimeSource: Send {
    /// Get current timestamp in microseconds
    ///
    /// The epoch depends on the implementation:
    /// - Wall clock sources: microseconds since Unix epoch
    /// - Test sources: arbitrary starting point
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;

    /// Smallest difference this source can measure, in microseconds
    fn precision_us(&self) -> u32;
}
