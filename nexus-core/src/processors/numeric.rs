//! Numeric sequence processor
//!
//! Elements may be JSON numbers or integer text (`"42"`, `" -3 "`). The sum
//! stays integral while every element is an integer; the average is always
//! reported as a float (`avg=3.0`).

use serde_json::Value;

use crate::errors::ProcessorError;
use crate::traits::DataProcessor;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn parse(item: &Value) -> Option<Self> {
        match item {
            Value::Number(n) => n
                .as_i64()
                .map(Number::Int)
                .or_else(|| n.as_f64().map(Number::Float)),
            Value::String(text) => text.trim().parse().ok().map(Number::Int),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// Sums and averages a non-empty sequence of numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericProcessor;

impl NumericProcessor {
    fn numbers(data: &Value) -> Vec<Number> {
        data.as_array()
            .map(|items| items.iter().filter_map(Number::parse).collect())
            .unwrap_or_default()
    }

    /// Integer sum when every element is an integer and nothing overflows
    fn exact_sum(numbers: &[Number]) -> Option<i64> {
        numbers.iter().try_fold(0i64, |acc, n| match n {
            Number::Int(i) => acc.checked_add(*i),
            Number::Float(_) => None,
        })
    }
}

impl DataProcessor for NumericProcessor {
    fn name(&self) -> &'static str {
        "NumericProcessor"
    }

    fn check(&self, data: &Value) -> Result<(), ProcessorError> {
        let items = data.as_array().ok_or(ProcessorError::NotAList)?;
        if items.is_empty() {
            return Err(ProcessorError::Empty);
        }
        if items.iter().any(|item| Number::parse(item).is_none()) {
            return Err(ProcessorError::NotNumeric);
        }
        Ok(())
    }

    fn describe(&self, data: &Value) -> String {
        let numbers = Self::numbers(data);
        let count = numbers.len();
        let float_sum: f64 = numbers.iter().map(|n| n.as_f64()).sum();
        let avg = if count == 0 { 0.0 } else { float_sum / count as f64 };

        let sum = match Self::exact_sum(&numbers) {
            Some(sum) => sum.to_string(),
            None => format!("{float_sum:?}"),
        };
        format!("Processed {count} numeric values, sum={sum}, avg={avg:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_sequence() {
        assert_eq!(
            NumericProcessor.process(&json!([1, 2, 3, 4, 5])),
            "Output: Processed 5 numeric values, sum=15, avg=3.0"
        );
    }

    #[test]
    fn mixed_floats_and_integer_text() {
        assert_eq!(
            NumericProcessor.process(&json!([1.5, "2", 3])),
            "Output: Processed 3 numeric values, sum=6.5, avg=2.1666666666666665"
        );
    }

    #[test]
    fn rejection_reasons() {
        assert_eq!(NumericProcessor.check(&json!("1,2")), Err(ProcessorError::NotAList));
        assert_eq!(NumericProcessor.check(&json!([])), Err(ProcessorError::Empty));
        assert_eq!(
            NumericProcessor.check(&json!([1, 2, 3, 4, 5, "a"])),
            Err(ProcessorError::NotNumeric)
        );
        assert_eq!(NumericProcessor.check(&json!([true])), Err(ProcessorError::NotNumeric));
        assert_eq!(NumericProcessor.check(&json!(["2.5"])), Err(ProcessorError::NotNumeric));
    }

    #[test]
    fn invalid_input_reports_error() {
        assert_eq!(
            NumericProcessor.process(&json!([1, null])),
            "Output: Error was found"
        );
    }
}
