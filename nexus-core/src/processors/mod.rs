//! Single-Input Data Processors
//!
//! ## Overview
//!
//! Processors are small collaborators of the pipeline core. Each one checks
//! a single input and, when it is acceptable, summarizes it in one line
//! prefixed with `"Output: "`:
//!
//! | Processor            | Accepts                                  |
//! |----------------------|------------------------------------------|
//! | [`NumericProcessor`] | non-empty sequence of numbers            |
//! | [`TextProcessor`]    | text                                     |
//! | [`LogProcessor`]     | `LEVEL: message` text with a known level |
//!
//! Rejected input produces `"Output: Error was found"`; the reason is a
//! [`ProcessorError`](crate::errors::ProcessorError) logged at debug level.
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::processors::{LogProcessor, NumericProcessor, TextProcessor};
//! use nexus_core::traits::DataProcessor;
//! use serde_json::json;
//!
//! let processors: Vec<(Box<dyn DataProcessor>, _)> = vec![
//!     (Box::new(NumericProcessor), json!([3, 2, 1])),
//!     (Box::new(TextProcessor), json!("Hey Mouse!!!")),
//!     (Box::new(LogProcessor), json!("INFO: System ready")),
//! ];
//!
//! let results: Vec<String> = processors.iter().map(|(p, data)| p.process(data)).collect();
//! assert_eq!(results[0], "Output: Processed 3 numeric values, sum=6, avg=2.0");
//! assert_eq!(results[2], "Output: [INFO] INFO level detected: System ready");
//! ```

mod log_entry;
mod numeric;
mod text;

pub use log_entry::{LogLevel, LogProcessor};
pub use numeric::NumericProcessor;
pub use text::TextProcessor;
