//! Batch Stream Traits
//!
//! A [`DataStream`] aggregates a batch of `"kind:value"` items into a one-line
//! report and keeps statistics about the last batch it saw.

use serde_json::Value;

use crate::stream::{text_of, StreamStats};

/// Aggregator over batches of raw items
pub trait DataStream: Send {
    /// Identifier reported in the statistics
    fn stream_id(&self) -> &str;

    /// Aggregate one batch into a report line
    ///
    /// Never fails: empty or unparsable batches produce an explanatory
    /// report instead.
    fn process_batch(&mut self, batch: &[Value]) -> String;

    /// Snapshot of the stream statistics
    fn stats(&self) -> StreamStats;

    /// Whether the batch holds at least one `kind:value` text item
    fn validate(&self, batch: &[Value]) -> bool {
        batch
            .iter()
            .any(|item| matches!(item, Value::String(s) if s.contains(':')))
    }

    /// Keep the items whose textual form contains `criteria`
    ///
    /// Without criteria the batch is returned as is.
    fn filter_data(&self, batch: &[Value], criteria: Option<&str>) -> Vec<Value> {
        match criteria {
            None => batch.to_vec(),
            Some(needle) => batch
                .iter()
                .filter(|item| text_of(item).contains(needle))
                .cloned()
                .collect(),
        }
    }
}
