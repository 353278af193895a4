//! Core pipeline engine for Nexus
//!
//! Routes dynamic data through composable multi-stage pipelines.
//!
//! Key properties:
//! - Three pipeline variants (JSON, CSV, Stream) sharing one stage contract
//! - Stream pipelines retain their last 100 raw inputs
//! - A manager routes by index, chains pipelines, and reroutes failed
//!   inputs to a backup pipeline
//!
//! ```
//! use nexus_core::{NexusManager, Pipeline};
//! use serde_json::json;
//!
//! let mut manager = NexusManager::default();
//! let json = manager.add_pipeline(Pipeline::json("JSON_001"));
//! let csv = manager.add_pipeline(Pipeline::csv("CSV_001"));
//!
//! let out = manager.process_data(json, json!({"sensor": "temp", "value": 23.5}));
//! assert_eq!(out, "Output: sensor=temp, value=23.5");
//!
//! let out = manager.process_data(csv, json!("user,action,timestamp"));
//! assert_eq!(out, "Output: List with 3 items");
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod manager;
pub mod pipeline;
pub mod processors;
pub mod stream;
pub mod time;
pub mod traits;

// Public API
pub use config::NexusConfig;
pub use errors::{PipelineError, PipelineResult, ProcessorError};
pub use manager::{NexusManager, RecoveryEvent, SharedPipeline, SystemStats};
pub use pipeline::{Adapter, Pipeline, PipelineBuilder, PipelineStats};
pub use traits::{DataProcessor, DataStream, Stage, StageContext, TimeSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
