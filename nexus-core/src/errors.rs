//! Error Types for Pipeline Failures
//!
//! ## Capture Policy
//!
//! Nexus prefers local capture over propagation. Every error a pipeline can
//! meet falls in one of two classes:
//!
//! ### Captured
//! - `Format`: raw input cannot be normalized (e.g. null input)
//! - `Stage`: a stage rejected malformed intermediate data
//! - `DeadlineExceeded`: a stage overran the pipeline's per-stage deadline
//!
//! The pipeline counts these, then renders them as a result string
//! (`"Error processing JSON: ..."`). They never reach the manager.
//!
//! ### Uncaptured
//! - `Unrecovered`: a defect escaping the pipeline (a non-standard stage
//!   reporting a defect, or any stage that panics)
//!
//! Only this class reaches [`NexusManager`](crate::manager::NexusManager),
//! which reroutes the original input to its backup pipeline.
//!
//! `InvalidIndex` and `InvalidConfig` belong to routing and construction;
//! the manager renders routing errors as strings as well.
//!
//! ```rust
//! use nexus_core::PipelineError;
//!
//! let err = PipelineError::Format("Input data cannot be null".into());
//! assert!(err.is_captured());
//!
//! let err = PipelineError::Unrecovered("Invalid data format".into());
//! assert!(!err.is_captured());
//! ```

use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline processing error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Input cannot be normalized for the target pipeline
    #[error("{0}")]
    Format(String),

    /// A stage failed on malformed intermediate data
    #[error("{stage}: {reason}")]
    Stage {
        /// Name of the failing stage
        stage: &'static str,
        /// What the stage rejected
        reason: String,
    },

    /// A stage ran longer than the pipeline allows
    #[error("{stage} exceeded its deadline ({elapsed_us}us > {limit_us}us)")]
    DeadlineExceeded {
        /// Name of the slow stage
        stage: &'static str,
        /// Measured stage duration in microseconds
        elapsed_us: u64,
        /// Configured per-stage limit in microseconds
        limit_us: u64,
    },

    /// Routing to a pipeline that is not registered
    #[error("Invalid pipeline index")]
    InvalidIndex,

    /// Invalid configuration or construction request
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Defect-class failure that escaped a pipeline's own capture
    #[error("{0}")]
    Unrecovered(String),
}

impl PipelineError {
    /// Shorthand for a stage rejection
    pub fn stage(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::Stage { stage, reason: reason.into() }
    }

    /// Whether a pipeline turns this error into a result string
    /// instead of returning it to the caller
    pub fn is_captured(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::Stage { .. } | Self::DeadlineExceeded { .. }
        )
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

/// Reasons a data processor rejects its input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorError {
    /// Expected a sequence
    #[error("Data is not a List")]
    NotAList,

    /// Sequence has no elements
    #[error("Data is empty")]
    Empty,

    /// An element is not a number
    #[error("Data is not numeric")]
    NotNumeric,

    /// Expected text
    #[error("Data is not a string")]
    NotText,

    /// Text does not start with a known log level
    #[error("Data is not log type")]
    UnknownLogLevel,
}
