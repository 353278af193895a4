//! System events

use serde_json::Value;

use super::{text_of, StreamMetrics, StreamStats, NO_DATA};
use crate::traits::DataStream;

/// Counts events and the ones mentioning an error
///
/// Every item is an event; non-text items are matched by their JSON text.
#[derive(Debug, Clone)]
pub struct EventStream {
    stream_id: String,
    total_events: usize,
    error_count: usize,
}

impl EventStream {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self { stream_id: stream_id.into(), total_events: 0, error_count: 0 }
    }
}

impl DataStream for EventStream {
    fn stream_id(&self) -> &str {
        &self.stream_id
    }

    fn process_batch(&mut self, batch: &[Value]) -> String {
        if batch.is_empty() {
            return NO_DATA.to_owned();
        }

        let events: Vec<String> = batch.iter().map(text_of).collect();

        self.total_events = events.len();
        self.error_count = events
            .iter()
            .filter(|event| event.to_lowercase().contains("error"))
            .count();

        let noun = if self.error_count == 1 { "error" } else { "errors" };
        format!(
            "Event analysis: {} events, {} {} detected",
            self.total_events, self.error_count, noun
        )
    }

    fn stats(&self) -> StreamStats {
        StreamStats {
            stream_id: self.stream_id.clone(),
            stream_type: "System Events",
            metrics: StreamMetrics::Event {
                total_events: self.total_events,
                error_count: self.error_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_errors_case_insensitively() {
        let mut stream = EventStream::new("EVENT_001");
        assert_eq!(
            stream.process_batch(&[json!("login"), json!("error"), json!("logout")]),
            "Event analysis: 3 events, 1 error detected"
        );
        assert_eq!(
            stream.process_batch(&[json!("ERROR: disk"), json!("Network Error"), json!(404)]),
            "Event analysis: 3 events, 2 errors detected"
        );
    }

    #[test]
    fn every_item_is_an_event() {
        let mut stream = EventStream::new("EVENT_001");
        assert_eq!(
            stream.process_batch(&[Value::Null, json!("boot")]),
            "Event analysis: 2 events, 0 errors detected"
        );
        assert_eq!(
            stream.process_batch(&[Value::Null]),
            "Event analysis: 1 events, 0 errors detected"
        );
        assert_eq!(stream.process_batch(&[]), "No data to process");
    }

    #[test]
    fn filtering_uses_text_form() {
        let stream = EventStream::new("EVENT_001");
        let batch = [json!("login"), json!(404), json!({"code": 404})];
        assert_eq!(
            stream.filter_data(&batch, Some("404")),
            vec![json!(404), json!({"code": 404})]
        );
    }
}
