//! Constants for Nexus Core
//!
//! Centralized values used across the pipeline, manager and collaborator
//! modules. Use these instead of magic numbers or string literals.
//!
//! ## Organization
//!
//! - **Buffers**: capacities of the stream history buffer and manager
//! - **Markers**: field names and separators understood by the standard stages
//! - **Time**: unit conversions for the microsecond timestamps

/// Buffer capacities and manager defaults.
pub mod buffers;

/// Marker fields, wrapper keys and separators used by the standard stages.
pub mod markers;

/// Time unit conversions.
pub mod time;

pub use buffers::{DEFAULT_MANAGER_CAPACITY, RECOVERY_LOG_CAPACITY, STREAM_BUFFER_CAPACITY};
pub use markers::{MARKER_PREFIX, PROCESSED_MARKER, TIMESTAMP_MARKER, CSV_SEPARATOR};
pub use time::US_PER_SECOND;
