//! Financial transactions

use serde_json::Value;

use super::{parse_reading, StreamMetrics, StreamStats, NO_DATA};
use crate::traits::DataStream;

/// Net flow of `buy:<amount>` / `sell:<amount>` items
///
/// Buys flow out, sells flow in. Items of any other kind count as
/// operations without moving the flow.
#[derive(Debug, Clone)]
pub struct TransactionStream {
    stream_id: String,
    total_transactions: usize,
    net_flow: f64,
}

impl TransactionStream {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self { stream_id: stream_id.into(), total_transactions: 0, net_flow: 0.0 }
    }
}

impl DataStream for TransactionStream {
    fn stream_id(&self) -> &str {
        &self.stream_id
    }

    fn process_batch(&mut self, batch: &[Value]) -> String {
        if batch.is_empty() {
            return NO_DATA.to_owned();
        }

        let operations: Vec<(&str, f64)> = batch.iter().filter_map(parse_reading).collect();
        if operations.is_empty() {
            return "Error: No valid transaction".to_owned();
        }

        self.total_transactions = operations.len();
        let flow: f64 = operations
            .iter()
            .map(|&(kind, amount)| match kind {
                "buy" => -amount,
                "sell" => amount,
                _ => 0.0,
            })
            .sum();
        // Buys of zero sum to -0.0, which would render as "+-0"
        self.net_flow = flow + 0.0;

        let sign = if self.net_flow >= 0.0 { "+" } else { "" };
        format!(
            "Transaction analysis: {} operations, net flow: {}{:.0} units",
            self.total_transactions, sign, self.net_flow
        )
    }

    fn stats(&self) -> StreamStats {
        StreamStats {
            stream_id: self.stream_id.clone(),
            stream_type: "Financial Data",
            metrics: StreamMetrics::Transaction {
                total_transactions: self.total_transactions,
                net_flow: self.net_flow,
            },
        }
    }
}
