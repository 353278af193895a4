//! Input adapters for the three pipeline variants
//!
//! Variants differ only in how raw input is prepared before the first stage:
//!
//! | Variant | Normalization                                          |
//! |---------|--------------------------------------------------------|
//! | JSON    | mapping → serialized JSON text, everything else as is  |
//! | CSV     | non-text → its JSON text form                          |
//! | Stream  | raw input recorded in the history buffer, then as is   |

use serde::Serialize;
use serde_json::Value;

use crate::{
    buffer::BoundedBuffer,
    constants::STREAM_BUFFER_CAPACITY,
    errors::PipelineResult,
};

/// History of raw inputs kept by a stream pipeline
pub type StreamBuffer = BoundedBuffer<Value, STREAM_BUFFER_CAPACITY>;

/// Occupancy of a stream pipeline's history buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BufferStats {
    pub buffer_size: usize,
    pub buffer_capacity: usize,
}

/// Input normalization strategy of a pipeline
#[derive(Debug)]
pub enum Adapter {
    /// Structured data; mappings are re-serialized for the input stage
    Json,
    /// Delimited text; everything is coerced to text
    Csv,
    /// Real-time items; raw inputs are retained for inspection
    Stream(Box<StreamBuffer>),
}

impl Adapter {
    pub fn stream() -> Self {
        Self::Stream(Box::default())
    }

    /// Label used in error results (`"Error processing <label>: ..."`)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::Stream(_) => "stream",
        }
    }

    /// Prepare raw input for the first stage
    pub fn normalize(&mut self, input: Value) -> PipelineResult<Value> {
        match self {
            Self::Json => {
                if input.is_object() {
                    Ok(Value::String(serde_json::to_string(&input)?))
                } else {
                    Ok(input)
                }
            }
            Self::Csv => match input {
                Value::String(_) => Ok(input),
                other => Ok(Value::String(other.to_string())),
            },
            Self::Stream(buffer) => {
                buffer.push(input.clone());
                Ok(input)
            }
        }
    }

    /// Raw inputs retained by a stream adapter
    pub fn buffer(&self) -> Option<&StreamBuffer> {
        match self {
            Self::Stream(buffer) => Some(&**buffer),
            _ => None,
        }
    }

    pub fn buffer_stats(&self) -> Option<BufferStats> {
        self.buffer().map(|buffer| BufferStats {
            buffer_size: buffer.len(),
            buffer_capacity: buffer.capacity(),
        })
    }
}
