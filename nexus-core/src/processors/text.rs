//! Free-text processor

use serde_json::Value;

use crate::errors::ProcessorError;
use crate::traits::DataProcessor;

/// Counts characters and whitespace-separated words
#[derive(Debug, Clone, Copy, Default)]
pub struct TextProcessor;

impl DataProcessor for TextProcessor {
    fn name(&self) -> &'static str {
        "TextProcessor"
    }

    fn check(&self, data: &Value) -> Result<(), ProcessorError> {
        match data {
            Value::String(_) => Ok(()),
            _ => Err(ProcessorError::NotText),
        }
    }

    fn describe(&self, data: &Value) -> String {
        let text = data.as_str().unwrap_or_default();
        format!(
            "Processed text: {} characters, {} words",
            text.chars().count(),
            text.split_whitespace().count()
        )
    }
}
