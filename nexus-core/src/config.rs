//! Runtime configuration document
//!
//! Hosts that keep settings in a file can load them as JSON:
//!
//! ```rust
//! use nexus_core::config::NexusConfig;
//!
//! let config = NexusConfig::from_json_str(r#"{"capacity": 500, "stage_deadline_ms": 20}"#).unwrap();
//! assert_eq!(config.capacity, 500);
//! assert_eq!(config.stage_deadline().map(|d| d.as_millis()), Some(20));
//! ```
//!
//! Every field is optional; missing fields take their defaults. Unknown
//! fields are rejected.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MANAGER_CAPACITY;
use crate::errors::{PipelineError, PipelineResult};

/// Manager and pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NexusConfig {
    /// Advisory manager capacity label
    pub capacity: usize,
    /// Per-stage deadline in milliseconds, none for unlimited
    pub stage_deadline_ms: Option<u64>,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_MANAGER_CAPACITY,
            stage_deadline_ms: None,
        }
    }
}

impl NexusConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(text: &str) -> PipelineResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.stage_deadline_ms == Some(0) {
            return Err(PipelineError::InvalidConfig(
                "stage_deadline_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn stage_deadline(&self) -> Option<Duration> {
        self.stage_deadline_ms.map(Duration::from_millis)
    }
}
