//! Batch Streams and Polymorphic Dispatch
//!
//! ## Overview
//!
//! A batch stream turns a list of `"kind:value"` items into a one-line
//! report. Three kinds ship with the crate:
//!
//! | Stream                | Items                  | Report                        |
//! |-----------------------|------------------------|-------------------------------|
//! | [`SensorStream`]      | `temp:22.5`            | reading count, first-kind avg |
//! | [`TransactionStream`] | `buy:100`, `sell:150`  | operation count, net flow     |
//! | [`EventStream`]       | `login`, `error`       | event count, error count      |
//!
//! [`StreamProcessor`] drives several streams through the
//! [`DataStream`](crate::traits::DataStream) trait, one batch each.
//!
//! ## Usage Example
//!
//! ```rust
//! use nexus_core::stream::{EventStream, SensorStream, StreamProcessor, TransactionStream};
//! use serde_json::json;
//!
//! let mut processor = StreamProcessor::new();
//! processor.add_stream(SensorStream::new("SENSOR_002"));
//! processor.add_stream(TransactionStream::new("TRANS_002"));
//! processor.add_stream(EventStream::new("EVENT_002"));
//!
//! let batches = vec![
//!     vec![json!("temp:20.0"), json!("temp:21.5")],
//!     vec![json!("buy:50"), json!("sell:75"), json!("buy:25"), json!("sell:100")],
//!     vec![json!("login"), json!("logout"), json!("login")],
//! ];
//!
//! let reports = processor.process_all(&batches);
//! assert_eq!(reports[0], "Sensor analysis: 2 readings processed, avg temp: 20.8°C");
//! assert_eq!(reports[1], "Transaction analysis: 4 operations, net flow: +100 units");
//! assert_eq!(reports[2], "Event analysis: 3 events, 0 errors detected");
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::pipeline::display_value;
use crate::traits::DataStream;

mod event;
mod sensor;
mod transaction;

pub use event::EventStream;
pub use sensor::SensorStream;
pub use transaction::TransactionStream;

/// Report for an empty batch
pub const NO_DATA: &str = "No data to process";

/// Textual form used for filtering and event matching
pub fn text_of(item: &Value) -> String {
    display_value(item)
}

/// Split a `"kind:value"` item into its kind and numeric value
///
/// Items with more or fewer than one `:` or a non-numeric value yield
/// `None`.
pub fn parse_reading(item: &Value) -> Option<(&str, f64)> {
    let text = item.as_str()?;
    let mut parts = text.split(':');
    let (kind, value) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some((kind, value.trim().parse().ok()?))
}

/// Statistics of the last batch a stream accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamStats {
    pub stream_id: String,
    #[serde(rename = "type")]
    pub stream_type: &'static str,
    #[serde(flatten)]
    pub metrics: StreamMetrics,
}

/// Stream-specific counters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamMetrics {
    Sensor { total_readings: usize, avg_value: f64 },
    Transaction { total_transactions: usize, net_flow: f64 },
    Event { total_events: usize, error_count: usize },
}

/// Drives heterogeneous streams with one batch each
#[derive(Default)]
pub struct StreamProcessor {
    streams: Vec<Box<dyn DataStream>>,
}

impl StreamProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stream<S: DataStream + 'static>(&mut self, stream: S) {
        self.streams.push(Box::new(stream));
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Give stream `i` batch `i`; extra streams or batches are skipped
    pub fn process_all(&mut self, batches: &[Vec<Value>]) -> Vec<String> {
        self.streams
            .iter_mut()
            .zip(batches)
            .map(|(stream, batch)| {
                let report = stream.process_batch(batch);
                log_debug!("{}: {}", stream.stream_id(), report);
                report
            })
            .collect()
    }

    pub fn stats(&self) -> Vec<StreamStats> {
        self.streams.iter().map(|stream| stream.stats()).collect()
    }
}
