//! Data Pipelines with Composable Stages
//!
//! ## Overview
//!
//! A pipeline owns an ordered list of [`Stage`](crate::traits::Stage)s, an
//! [`Adapter`] that prepares raw input for the first stage, and running
//! statistics. Every standard pipeline uses the same three stages:
//!
//! ```text
//! raw input → Adapter → InputStage → TransformStage → OutputStage → String
//!               ↓           ↓               ↓               ↓
//!           normalize   parse/split     add markers      render
//! ```
//!
//! ## Module Organization
//!
//! - `adapter` - JSON / CSV / Stream input normalization
//! - `stages` - Built-in stages
//! - `builder` - [`Pipeline`] and [`PipelineBuilder`]
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::pipeline::Pipeline;
//! use serde_json::json;
//!
//! let mut pipeline = Pipeline::csv("CSV_001");
//! let out = pipeline.process(json!("user,action,timestamp")).unwrap();
//! assert_eq!(out, "Output: List with 3 items");
//! assert_eq!(pipeline.get_stats().efficiency, 100.0);
//! ```

use serde::Serialize;

use crate::time;

pub mod adapter;
pub mod builder;
pub mod stages;

pub use adapter::{Adapter, BufferStats, StreamBuffer};
pub use builder::{Pipeline, PipelineBuilder};
pub use stages::{display_value, InputStage, OutputStage, TransformStage};

/// Round half away from zero to `digits` decimals
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Snapshot of a pipeline's run statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStats {
    pub id: String,
    /// Every `process` call, successful or not
    pub processed: u64,
    /// Failed calls, captured or uncaptured
    pub errors: u64,
    /// Success percentage, one decimal
    pub efficiency: f64,
    /// Seconds spent in `process`, two decimals
    pub total_time: f64,
}

impl PipelineStats {
    pub(crate) fn new(id: &str, processed: u64, errors: u64, accumulated_us: u64) -> Self {
        Self {
            id: id.to_owned(),
            processed,
            errors,
            efficiency: efficiency(processed, errors),
            total_time: round_to(time::to_seconds(accumulated_us), 2),
        }
    }
}

/// Share of successful runs in percent; 100 before the first run
pub fn efficiency(processed: u64, errors: u64) -> f64 {
    if processed == 0 {
        return 100.0;
    }
    let succeeded = processed.saturating_sub(errors) as f64;
    round_to(succeeded / processed as f64 * 100.0, 1)
}
