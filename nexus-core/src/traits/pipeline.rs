//! Pipeline Stage Trait
//!
//! ## Pipeline Architecture
//!
//! ```text
//! input → [normalize] → [Stage 1] → [Stage 2] → ... → [Stage N] → String
//!              ↓             ↓           ↓                 ↓
//!          per adapter   value → value → value   ...     value
//! ```
//!
//! Each stage consumes the previous stage's output and produces the next
//! stage's input. Stages are stateless; anything they need from the run
//! (the capture timestamp) arrives through [`StageContext`].

use serde_json::Value;

use crate::errors::PipelineResult;
use crate::time::{self, Timestamp};

/// Per-run information handed to every stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageContext {
    /// Time the pipeline run started, read once from the pipeline's clock
    pub timestamp: Timestamp,
}

impl StageContext {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Run start in seconds since the epoch of the pipeline's clock
    pub fn timestamp_secs(&self) -> f64 {
        time::to_seconds(self.timestamp)
    }
}

/// A single transformation step within a pipeline
///
/// ## Implementation Guidelines
///
/// 1. **Stateless**: a stage may run for many pipelines and many inputs
/// 2. **Bounded processing time**: pipelines may enforce a deadline per stage
/// 3. **Error reporting**: return `PipelineError::Format` or
///    `PipelineError::Stage` for bad data; the pipeline captures those.
///    `PipelineError::Unrecovered` escapes the pipeline and reaches the
///    manager's backup path.
///
/// ## Example: Uppercasing Stage
///
/// ```rust
/// use nexus_core::traits::{Stage, StageContext};
/// use nexus_core::errors::PipelineResult;
/// use serde_json::Value;
///
/// struct Uppercase;
///
/// impl Stage for Uppercase {
///     fn transform(&self, value: Value, _ctx: &StageContext) -> PipelineResult<Value> {
///         Ok(match value {
///             Value::String(s) => Value::String(s.to_uppercase()),
///             other => other,
///         })
///     }
///
///     fn name(&self) -> &'static str {
///         "Uppercase"
///     }
/// }
/// ```
pub trait Stage: Send {
    /// Transform one value into the next stage's input
    fn transform(&self, value: Value, context: &StageContext) -> PipelineResult<Value>;

    /// Stage name for logs and error messages
    fn name(&self) -> &'static str;
}
