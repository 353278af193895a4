//! Built-in pipeline stages
//!
//! Every standard pipeline runs the same three stages:
//!
//! ```text
//! InputStage ──▶ TransformStage ──▶ OutputStage
//!  parse/split     enrich + mark      render string
//! ```

use serde_json::{Map, Value};

use crate::{
    constants::markers::{
        COUNT_KEY, CSV_SEPARATOR, ITEMS_KEY, LENGTH_KEY, MARKER_PREFIX, OUTPUT_PREFIX,
        PROCESSED_MARKER, TEXT_KEY, TIMESTAMP_MARKER, VALUE_KEY,
    },
    errors::{PipelineError, PipelineResult},
    traits::{Stage, StageContext},
};

/// Render a value the way results are reported: text verbatim, everything
/// else in its JSON form
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// InputStage - Normalizes raw input
// ============================================================================

/// Stage that parses structured text and splits delimited text
///
/// - null input is rejected with a format error
/// - text starting with `{` or `[` is parsed as JSON when it parses
/// - text containing `,` is split into a sequence of strings
/// - anything else passes through
#[derive(Debug, Clone, Copy, Default)]
pub struct InputStage;

impl InputStage {
    fn parse_text(text: String) -> Value {
        if text.starts_with('{') || text.starts_with('[') {
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => return parsed,
                Err(_e) => log_debug!("InputStage: not JSON, falling through: {}", _e),
            }
        }

        if text.contains(CSV_SEPARATOR) {
            return Value::Array(
                text.split(CSV_SEPARATOR)
                    .map(|field| Value::String(field.to_owned()))
                    .collect(),
            );
        }

        Value::String(text)
    }
}

impl Stage for InputStage {
    fn transform(&self, value: Value, _context: &StageContext) -> PipelineResult<Value> {
        match value {
            Value::Null => Err(PipelineError::Format("Input data cannot be null".into())),
            Value::String(text) => Ok(Self::parse_text(text)),
            other => Ok(other),
        }
    }

    fn name(&self) -> &'static str {
        "InputStage"
    }
}

// ============================================================================
// TransformStage - Enriches data with marker fields
// ============================================================================

/// Stage that marks data as processed
///
/// Mappings gain `_processed` and `_timestamp` in place. Sequences, text and
/// scalars are wrapped into a mapping that carries `_processed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformStage;

fn wrap<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect::<Map<String, Value>>(),
    )
}

impl Stage for TransformStage {
    fn transform(&self, value: Value, context: &StageContext) -> PipelineResult<Value> {
        let enriched = match value {
            Value::Object(mut map) => {
                map.insert(PROCESSED_MARKER.to_owned(), Value::Bool(true));
                map.insert(
                    TIMESTAMP_MARKER.to_owned(),
                    Value::from(context.timestamp_secs()),
                );
                Value::Object(map)
            }
            Value::Array(items) => {
                let count = items.len();
                wrap([
                    (ITEMS_KEY, Value::Array(items)),
                    (COUNT_KEY, Value::from(count)),
                    (PROCESSED_MARKER, Value::Bool(true)),
                ])
            }
            Value::String(text) => {
                let length = text.chars().count();
                wrap([
                    (TEXT_KEY, Value::String(text)),
                    (LENGTH_KEY, Value::from(length)),
                    (PROCESSED_MARKER, Value::Bool(true)),
                ])
            }
            other => wrap([(VALUE_KEY, other), (PROCESSED_MARKER, Value::Bool(true))]),
        };

        Ok(enriched)
    }

    fn name(&self) -> &'static str {
        "TransformStage"
    }
}

// ============================================================================
// OutputStage - Renders the final display string
// ============================================================================

/// Stage that renders structured data to a display string
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputStage;

impl OutputStage {
    /// Length of a sequence wrapped by [`TransformStage`], if `map` is one
    fn wrapped_len(map: &Map<String, Value>) -> Option<usize> {
        if map.get(PROCESSED_MARKER) != Some(&Value::Bool(true)) {
            return None;
        }
        let items = map.get(ITEMS_KEY)?.as_array()?;
        let count = map.get(COUNT_KEY)?.as_u64()?;
        (count == items.len() as u64).then_some(items.len())
    }

    fn list_summary(len: usize) -> String {
        format!("{OUTPUT_PREFIX}List with {len} items")
    }
}

impl Stage for OutputStage {
    fn transform(&self, value: Value, _context: &StageContext) -> PipelineResult<Value> {
        let rendered = match &value {
            Value::Array(items) => Self::list_summary(items.len()),
            Value::Object(map) => match Self::wrapped_len(map) {
                Some(len) => Self::list_summary(len),
                None => {
                    let fields: Vec<String> = map
                        .iter()
                        .filter(|(key, _)| !key.starts_with(MARKER_PREFIX))
                        .map(|(key, value)| format!("{key}={}", display_value(value)))
                        .collect();
                    format!("{OUTPUT_PREFIX}{}", fields.join(", "))
                }
            },
            other => format!("{OUTPUT_PREFIX}{}", display_value(other)),
        };

        Ok(Value::String(rendered))
    }

    fn name(&self) -> &'static str {
        "OutputStage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> StageContext {
        StageContext::new(1_700_000_000_000_000)
    }

    #[test]
    fn input_parses_json_object() {
        let parsed = InputStage.transform(json!("{\"a\":1}"), &ctx()).unwrap();
        assert_eq!(parsed, json!({"a": 1}));
    }

    #[test]
    fn input_splits_delimited_text() {
        let parsed = InputStage.transform(json!("x,y,z"), &ctx()).unwrap();
        assert_eq!(parsed, json!(["x", "y", "z"]));

        // Empty fields survive the split
        let parsed = InputStage.transform(json!("a,,b"), &ctx()).unwrap();
        assert_eq!(parsed, json!(["a", "", "b"]));
    }

    #[test]
    fn input_falls_through_on_bad_json() {
        let parsed = InputStage.transform(json!("[a,b"), &ctx()).unwrap();
        assert_eq!(parsed, json!(["[a", "b"]));

        let parsed = InputStage.transform(json!("{oops"), &ctx()).unwrap();
        assert_eq!(parsed, json!("{oops"));
    }

    #[test]
    fn input_rejects_null() {
        let err = InputStage.transform(Value::Null, &ctx()).unwrap_err();
        assert_eq!(err, PipelineError::Format("Input data cannot be null".into()));
    }

    #[test]
    fn input_passes_other_values() {
        assert_eq!(InputStage.transform(json!(42), &ctx()).unwrap(), json!(42));
        assert_eq!(InputStage.transform(json!("plain"), &ctx()).unwrap(), json!("plain"));
    }

    #[test]
    fn transform_marks_mapping_in_place() {
        let out = TransformStage.transform(json!({"a": 1}), &ctx()).unwrap();
        assert_eq!(out["a"], json!(1));
        assert_eq!(out[PROCESSED_MARKER], json!(true));
        assert_eq!(out[TIMESTAMP_MARKER].as_f64(), Some(1_700_000_000.0));
    }

    #[test]
    fn transform_wraps_other_shapes() {
        let out = TransformStage.transform(json!(["x", "y", "z"]), &ctx()).unwrap();
        assert_eq!(out, json!({"items": ["x", "y", "z"], "count": 3, "_processed": true}));

        let out = TransformStage.transform(json!("héllo"), &ctx()).unwrap();
        assert_eq!(out, json!({"text": "héllo", "length": 5, "_processed": true}));

        let out = TransformStage.transform(json!(2.5), &ctx()).unwrap();
        assert_eq!(out, json!({"value": 2.5, "_processed": true}));
    }

    #[test]
    fn output_hides_markers() {
        let marked = TransformStage.transform(json!({"a": 1}), &ctx()).unwrap();
        let out = OutputStage.transform(marked, &ctx()).unwrap();
        assert_eq!(out, json!("Output: a=1"));
    }

    #[test]
    fn output_keeps_insertion_order_and_unquotes_text() {
        let out = OutputStage
            .transform(json!({"sensor": "temp", "value": 23.5, "unit": "C"}), &ctx())
            .unwrap();
        assert_eq!(out, json!("Output: sensor=temp, value=23.5, unit=C"));
    }

    #[test]
    fn output_summarizes_sequences() {
        let out = OutputStage.transform(json!([1, 2]), &ctx()).unwrap();
        assert_eq!(out, json!("Output: List with 2 items"));

        let wrapped = json!({"items": ["x", "y", "z"], "count": 3, "_processed": true});
        let out = OutputStage.transform(wrapped, &ctx()).unwrap();
        assert_eq!(out, json!("Output: List with 3 items"));
    }

    #[test]
    fn output_renders_unmarked_items_as_mapping() {
        // Not produced by TransformStage, so it is a plain mapping
        let out = OutputStage.transform(json!({"items": [1], "count": 1}), &ctx()).unwrap();
        assert_eq!(out, json!("Output: items=[1], count=1"));
    }

    #[test]
    fn output_renders_scalars() {
        assert_eq!(OutputStage.transform(json!(7), &ctx()).unwrap(), json!("Output: 7"));
        assert_eq!(OutputStage.transform(json!("hi"), &ctx()).unwrap(), json!("Output: hi"));
    }
}
