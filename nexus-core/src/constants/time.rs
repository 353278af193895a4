//! Time-Related Constants
//!
//! Nexus timestamps are microseconds; statistics report seconds.

/// Microseconds per second.
pub const US_PER_SECOND: u64 = 1_000_000;
