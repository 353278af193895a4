//! Data Processor Trait
//!
//! Processors validate a single input and, when it is acceptable, describe
//! it in one line. They share the `"Output: "` formatting of the pipeline
//! output stage.

use serde_json::Value;

use crate::constants::markers::OUTPUT_PREFIX;
use crate::errors::ProcessorError;

/// Validate-then-summarize contract for single inputs
pub trait DataProcessor {
    /// Processor name for logs
    fn name(&self) -> &'static str;

    /// Check the input, naming the first problem found
    fn check(&self, data: &Value) -> Result<(), ProcessorError>;

    /// Describe input that passed [`check`](Self::check)
    fn describe(&self, data: &Value) -> String;

    /// Whether the input is acceptable for this processor
    fn validate(&self, data: &Value) -> bool {
        match self.check(data) {
            Ok(()) => true,
            Err(err) => {
                log_debug!("{}: validation failed: {}", self.name(), err);
                false
            }
        }
    }

    /// Validate, then summarize
    fn process(&self, data: &Value) -> String {
        if !self.validate(data) {
            return self.format_output("Error was found");
        }
        self.format_output(&self.describe(data))
    }

    fn format_output(&self, result: &str) -> String {
        format!("{OUTPUT_PREFIX}{result}")
    }
}
