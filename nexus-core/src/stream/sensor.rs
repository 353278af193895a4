//! Environmental sensor readings

use serde_json::Value;

use super::{parse_reading, StreamMetrics, StreamStats, NO_DATA};
use crate::traits::DataStream;

/// Display unit of a sensor kind; unknown kinds have none
fn unit_of(kind: &str) -> &'static str {
    match kind {
        "temp" => "°C",
        "humidity" => "g/m3",
        "pressure" => "bar",
        _ => "",
    }
}

/// Aggregates `kind:value` sensor readings
///
/// The report averages the kind seen first in the batch; readings of every
/// kind count toward the total.
#[derive(Debug, Clone)]
pub struct SensorStream {
    stream_id: String,
    total_readings: usize,
    avg_value: f64,
}

impl SensorStream {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self { stream_id: stream_id.into(), total_readings: 0, avg_value: 0.0 }
    }
}

impl DataStream for SensorStream {
    fn stream_id(&self) -> &str {
        &self.stream_id
    }

    fn process_batch(&mut self, batch: &[Value]) -> String {
        if batch.is_empty() {
            return NO_DATA.to_owned();
        }

        let readings: Vec<(&str, f64)> = batch.iter().filter_map(parse_reading).collect();
        let Some(&(first_kind, _)) = readings.first() else {
            return "Error: No valid sensor reading".to_owned();
        };

        let first_values: Vec<f64> = readings
            .iter()
            .filter(|(kind, _)| *kind == first_kind)
            .map(|&(_, value)| value)
            .collect();
        let avg = first_values.iter().sum::<f64>() / first_values.len() as f64;

        self.total_readings = readings.len();
        self.avg_value = avg;

        format!(
            "Sensor analysis: {} readings processed, avg {}: {:.1}{}",
            self.total_readings,
            first_kind,
            avg,
            unit_of(first_kind)
        )
    }

    fn stats(&self) -> StreamStats {
        StreamStats {
            stream_id: self.stream_id.clone(),
            stream_type: "Environmental Data",
            metrics: StreamMetrics::Sensor {
                total_readings: self.total_readings,
                avg_value: self.avg_value,
            },
        }
    }
}
