//! Common test utilities for integration tests
//!
//! This module provides:
//! - Stages that misbehave on purpose (defects, slow stages)
//! - Pipeline and manager fixtures
//! - Sample inputs for the three pipeline variants

#![allow(dead_code)]

use nexus_core::{
    pipeline::{Adapter, InputStage, OutputStage, Pipeline, TransformStage},
    time::ManualTime,
    NexusManager, PipelineError, PipelineResult, Stage, StageContext,
};
use serde_json::{json, Value};

/// Stage that always reports an uncaptured defect
pub struct FailingStage {
    pub message: &'static str,
}

impl FailingStage {
    pub fn new() -> Self {
        Self { message: "Invalid data format" }
    }
}

impl Stage for FailingStage {
    fn transform(&self, _value: Value, _context: &StageContext) -> PipelineResult<Value> {
        Err(PipelineError::Unrecovered(self.message.to_owned()))
    }

    fn name(&self) -> &'static str {
        "FailingStage"
    }
}

/// Stage with an indexing bug: it panics on every input
pub struct PanickingStage;

impl Stage for PanickingStage {
    fn transform(&self, _value: Value, _context: &StageContext) -> PipelineResult<Value> {
        let fields: Vec<Value> = Vec::new();
        Ok(fields[0].clone())
    }

    fn name(&self) -> &'static str {
        "PanickingStage"
    }
}

/// Stage that advances a manual clock instead of doing work
pub struct SlowStage {
    pub clock: ManualTime,
    pub cost_us: u64,
}

impl Stage for SlowStage {
    fn transform(&self, value: Value, _context: &StageContext) -> PipelineResult<Value> {
        self.clock.advance(self.cost_us);
        Ok(value)
    }

    fn name(&self) -> &'static str {
        "SlowStage"
    }
}

/// JSON pipeline whose transform stage is replaced by a defect
pub fn failing_pipeline(id: &str) -> Pipeline {
    let mut pipeline = Pipeline::json(id);
    pipeline
        .replace_stage(1, FailingStage::new())
        .expect("standard pipelines have a transform stage");
    pipeline
}

/// JSON pipeline whose transform stage panics
pub fn panicking_pipeline(id: &str) -> Pipeline {
    let mut pipeline = Pipeline::json(id);
    pipeline
        .replace_stage(1, PanickingStage)
        .expect("standard pipelines have a transform stage");
    pipeline
}

/// Standard stages driven by a manual clock, each costing `cost_us`
pub fn timed_pipeline(id: &str, adapter: Adapter, clock: &ManualTime, cost_us: u64) -> Pipeline {
    Pipeline::builder(id, adapter)
        .time_source(clock.clone())
        .add_stage(InputStage)
        .add_stage(SlowStage { clock: clock.clone(), cost_us })
        .add_stage(TransformStage)
        .add_stage(OutputStage)
        .build()
}

/// Manager with JSON, CSV and stream pipelines at indices 0, 1, 2
pub fn standard_manager() -> NexusManager {
    let mut manager = NexusManager::default();
    manager.add_pipeline(Pipeline::json("JSON_001"));
    manager.add_pipeline(Pipeline::csv("CSV_001"));
    manager.add_pipeline(Pipeline::stream("STREAM_001"));
    manager
}

pub fn sensor_record() -> Value {
    json!({"sensor": "temp", "value": 23.5, "unit": "C"})
}

pub fn csv_header() -> Value {
    json!("user,action,timestamp")
}

pub fn stream_readings() -> Value {
    json!(["temp:20.5", "temp:21.0", "temp:22.1", "temp:21.8", "temp:20.9"])
}
