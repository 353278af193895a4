//! Pipeline Registry with Routing, Chaining and Backup Recovery
//!
//! ## Overview
//!
//! [`NexusManager`] holds an index-addressed list of pipelines. Callers
//! route input to one pipeline by index, or thread it through several.
//!
//! ```text
//!                 ┌──────────────┐
//! process_data ──▶│ pipelines[i] │──▶ result
//!                 └──────┬───────┘
//!                        │ uncaptured failure
//!                        ▼
//!                 ┌──────────────┐
//!                 │    backup    │──▶ result (same input)
//!                 └──────────────┘
//! ```
//!
//! ## Sharing
//!
//! Entries are [`SharedPipeline`] handles, so one pipeline may sit in the
//! registry and in the backup slot at the same time. Each handle serializes
//! its own `process` calls.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::{
    buffer::BoundedBuffer,
    config::NexusConfig,
    constants::{DEFAULT_MANAGER_CAPACITY, RECOVERY_LOG_CAPACITY},
    errors::{PipelineError, PipelineResult},
    pipeline::{round_to, Pipeline, PipelineStats},
};

/// Reference-counted pipeline handle
#[derive(Clone)]
pub struct SharedPipeline(Arc<Mutex<Pipeline>>);

impl SharedPipeline {
    pub fn new(pipeline: Pipeline) -> Self {
        Self(Arc::new(Mutex::new(pipeline)))
    }

    /// Run one input through the pipeline behind this handle
    ///
    /// Stage panics are caught by the pipeline itself, so a poisoned lock
    /// can only come from a panic inside [`with`](Self::with); the pipeline
    /// keeps serving inputs either way.
    pub fn process(&self, input: Value) -> PipelineResult<String> {
        self.with(|pipeline| pipeline.process(input))
    }

    /// Statistics snapshot
    pub fn stats(&self) -> PipelineStats {
        self.with(|pipeline| pipeline.get_stats())
    }

    pub fn id(&self) -> String {
        self.with(|pipeline| pipeline.id().to_owned())
    }

    /// Run `f` with exclusive access to the pipeline
    pub fn with<R>(&self, f: impl FnOnce(&mut Pipeline) -> R) -> R {
        let mut pipeline = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut pipeline)
    }

    /// Whether both handles point to the same pipeline
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Pipeline> for SharedPipeline {
    fn from(pipeline: Pipeline) -> Self {
        Self::new(pipeline)
    }
}

impl core::fmt::Debug for SharedPipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SharedPipeline").field(&self.id()).finish()
    }
}

/// One rerouting of an input to the backup pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryEvent {
    /// Registry index the input was routed to
    pub pipeline_index: usize,
    pub failed_pipeline: String,
    pub backup_pipeline: String,
    /// Uncaptured failure of the primary pipeline
    pub error: PipelineError,
    /// Whether the backup produced a result
    pub recovered: bool,
}

/// System-wide statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    pub capacity: usize,
    pub active_pipelines: usize,
    pub total_processed: u64,
    /// Mean pipeline efficiency, one decimal
    pub avg_efficiency: f64,
    /// Summed pipeline time in seconds, two decimals
    pub total_time: f64,
    pub total_recovered: u64,
}

/// Registry of pipelines with index routing and backup recovery
pub struct NexusManager {
    capacity: usize,
    pipelines: Vec<SharedPipeline>,
    total_processed: u64,
    total_recovered: u64,
    backup: Option<SharedPipeline>,
    recoveries: BoundedBuffer<RecoveryEvent, RECOVERY_LOG_CAPACITY>,
}

impl NexusManager {
    /// Create an empty manager with an advisory capacity label
    pub fn new(capacity: usize) -> Self {
        log_info!("Initializing Nexus Manager (capacity {})", capacity);
        Self {
            capacity,
            pipelines: Vec::new(),
            total_processed: 0,
            total_recovered: 0,
            backup: None,
            recoveries: BoundedBuffer::new(),
        }
    }

    pub fn from_config(config: &NexusConfig) -> Self {
        Self::new(config.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a pipeline, returning its index
    pub fn add_pipeline(&mut self, pipeline: impl Into<SharedPipeline>) -> usize {
        let pipeline = pipeline.into();
        log_debug!("registering pipeline {}", pipeline.id());
        self.pipelines.push(pipeline);
        self.pipelines.len() - 1
    }

    /// Swap the pipeline at `index`, returning the previous one
    pub fn replace_pipeline(
        &mut self,
        index: usize,
        pipeline: impl Into<SharedPipeline>,
    ) -> PipelineResult<SharedPipeline> {
        let slot = self
            .pipelines
            .get_mut(index)
            .ok_or(PipelineError::InvalidIndex)?;
        Ok(std::mem::replace(slot, pipeline.into()))
    }

    pub fn pipeline(&self, index: usize) -> Option<&SharedPipeline> {
        self.pipelines.get(index)
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Set the pipeline that receives inputs of failed pipelines
    ///
    /// Replaces any previous backup.
    pub fn set_backup_pipeline(&mut self, pipeline: impl Into<SharedPipeline>) {
        self.backup = Some(pipeline.into());
    }

    pub fn backup_pipeline(&self) -> Option<&SharedPipeline> {
        self.backup.as_ref()
    }

    /// Route input to the pipeline at `index`
    ///
    /// Always returns a string. Routing errors and unrecovered failures are
    /// rendered as `"Error: <message>"`.
    pub fn process_data(&mut self, index: usize, input: Value) -> String {
        let Some(pipeline) = self.pipelines.get(index) else {
            log_warn!("no pipeline at index {} ({} registered)", index, self.pipelines.len());
            return format!("Error: {}", PipelineError::InvalidIndex);
        };

        // The input is consumed by the primary; keep a copy only if it can be rerouted
        let retained = self.backup.as_ref().map(|_| input.clone());

        match pipeline.process(input) {
            Ok(result) => {
                self.total_processed += 1;
                result
            }
            Err(err) => self.recover(index, err, retained),
        }
    }

    fn recover(&mut self, index: usize, err: PipelineError, input: Option<Value>) -> String {
        let failed_pipeline = self
            .pipelines
            .get(index)
            .map(SharedPipeline::id)
            .unwrap_or_default();

        let (Some(backup), Some(input)) = (self.backup.clone(), input) else {
            log_error!("pipeline {} failed with no backup: {}", failed_pipeline, err);
            return format!("Error: {err}");
        };

        let backup_pipeline = backup.id();
        log_warn!("Error detected in pipeline {}: {}", failed_pipeline, err);
        log_info!("Recovery initiated: switching to backup pipeline {}", backup_pipeline);

        let outcome = backup.process(input);
        self.recoveries.push(RecoveryEvent {
            pipeline_index: index,
            failed_pipeline,
            backup_pipeline,
            error: err,
            recovered: outcome.is_ok(),
        });

        match outcome {
            Ok(result) => {
                self.total_recovered += 1;
                log_info!("Recovery successful: input served by backup");
                result
            }
            Err(backup_err) => {
                log_error!("backup pipeline failed as well: {}", backup_err);
                format!("Error: {backup_err}")
            }
        }
    }

    /// Thread `input` through the pipelines at `indices`, in order
    ///
    /// Each pipeline receives the previous one's result string. A bad index
    /// stops the chain with an error value; an uncaptured failure is
    /// returned as `Err` without recovery.
    pub fn chain_pipelines(&self, input: Value, indices: &[usize]) -> PipelineResult<Value> {
        let mut current = input;
        for &index in indices {
            let Some(pipeline) = self.pipelines.get(index) else {
                return Ok(Value::String(format!("Error: Invalid pipeline index {index}")));
            };
            current = Value::String(pipeline.process(current)?);
        }
        Ok(current)
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    pub fn total_recovered(&self) -> u64 {
        self.total_recovered
    }

    /// Recent recovery events, oldest first
    pub fn recoveries(&self) -> impl Iterator<Item = &RecoveryEvent> + '_ {
        self.recoveries.iter()
    }

    pub fn last_recovery(&self) -> Option<&RecoveryEvent> {
        self.recoveries.last()
    }

    pub fn get_system_stats(&self) -> SystemStats {
        let stats: Vec<PipelineStats> = self.pipelines.iter().map(SharedPipeline::stats).collect();

        let avg_efficiency = if stats.is_empty() {
            0.0
        } else {
            let sum: f64 = stats.iter().map(|s| s.efficiency).sum();
            round_to(sum / stats.len() as f64, 1)
        };
        let total_time = round_to(stats.iter().map(|s| s.total_time).sum(), 2);

        SystemStats {
            capacity: self.capacity,
            active_pipelines: self.pipelines.len(),
            total_processed: self.total_processed,
            avg_efficiency,
            total_time,
            total_recovered: self.total_recovered,
        }
    }
}

impl Default for NexusManager {
    fn default() -> Self {
        Self::new(DEFAULT_MANAGER_CAPACITY)
    }
}

impl core::fmt::Debug for NexusManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NexusManager")
            .field("capacity", &self.capacity)
            .field("pipelines", &self.pipelines)
            .field("backup", &self.backup)
            .field("total_processed", &self.total_processed)
            .field("total_recovered", &self.total_recovered)
            .finish()
    }
}
