//! Buffer Sizes and Manager Defaults

/// Number of raw inputs a stream pipeline retains for inspection.
///
/// Appending the 101st input evicts the oldest one.
pub const STREAM_BUFFER_CAPACITY: usize = 100;

/// Advisory throughput label of a manager, in streams per second.
///
/// Not enforced; reported back through the system statistics.
pub const DEFAULT_MANAGER_CAPACITY: usize = 1000;

/// Number of recovery events a manager keeps.
pub const RECOVERY_LOG_CAPACITY: usize = 32;
