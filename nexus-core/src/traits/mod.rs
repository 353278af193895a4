//! Core Traits and Abstractions for Nexus
//!
//! The trait definitions that make up Nexus's extension points, organized by
//! functional area:
//!
//! - [`pipeline`] - The [`Stage`] capability every pipeline step implements
//! - [`time`] - Time source abstraction used for timing and timestamps
//! - [`stream`] - Batch stream aggregators ([`DataStream`])
//! - [`processor`] - Single-input data processors ([`DataProcessor`])
//!
//! The pipeline core only depends on [`Stage`] and [`TimeSource`]. Streams and
//! processors are independent collaborators exposing a
//! `validate` / `summarize` style contract.
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::traits::{Stage, StageContext};
//! use nexus_core::pipeline::InputStage;
//! use serde_json::json;
//!
//! let ctx = StageContext::new(0);
//! let parsed = InputStage.transform(json!("x,y,z"), &ctx).unwrap();
//! assert_eq!(parsed, json!(["x", "y", "z"]));
//! ```

pub mod pipeline;
pub mod processor;
pub mod stream;
pub mod time;

pub use pipeline::{Stage, StageContext};
pub use processor::DataProcessor;
pub use stream::DataStream;
pub use time::TimeSource;
