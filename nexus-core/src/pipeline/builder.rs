//! Pipeline builder and core implementation
//!
//! This module provides the main Pipeline struct and its builder.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use serde_json::Value;

use crate::{
    config::NexusConfig,
    errors::{PipelineError, PipelineResult},
    time::{SystemTime, TimeSource},
    traits::{Stage, StageContext},
};

use super::{
    adapter::{Adapter, BufferStats, StreamBuffer},
    stages::{display_value, InputStage, OutputStage, TransformStage},
    PipelineStats,
};

/// Ordered stage sequence plus running statistics
///
/// ## Run Lifecycle
///
/// Each [`process`](Pipeline::process) call moves through two states:
///
/// 1. **running**: start time read, `processed` incremented, input
///    normalized by the adapter and folded through the stages
/// 2. **settled**: elapsed time accumulated, `errors` incremented on
///    failure, result (or error string) returned
///
/// ## Failure Handling
///
/// Captured errors (format, stage, deadline) become
/// `"Error processing <kind>: <message>"` results. Uncaptured errors are
/// counted the same way, then returned as `Err` so a
/// [`NexusManager`](crate::manager::NexusManager) can reroute the input.
pub struct Pipeline {
    id: String,
    adapter: Adapter,
    stages: Vec<Box<dyn Stage>>,
    clock: Box<dyn TimeSource>,
    /// Per-stage limit in microseconds
    stage_deadline_us: Option<u64>,
    processed_count: u64,
    error_count: u64,
    accumulated_us: u64,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder(id: impl Into<String>, adapter: Adapter) -> PipelineBuilder {
        PipelineBuilder::new(id, adapter)
    }

    /// JSON pipeline with the standard stages
    pub fn json(id: impl Into<String>) -> Self {
        Self::builder(id, Adapter::Json).standard_stages().build()
    }

    /// CSV pipeline with the standard stages
    pub fn csv(id: impl Into<String>) -> Self {
        Self::builder(id, Adapter::Csv).standard_stages().build()
    }

    /// Stream pipeline with the standard stages
    pub fn stream(id: impl Into<String>) -> Self {
        Self::builder(id, Adapter::stream()).standard_stages().build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Append a stage; it runs after all existing stages
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) {
        self.stages.push(Box::new(stage));
    }

    /// Swap the stage at `position`, returning the previous one
    pub fn replace_stage<S: Stage + 'static>(
        &mut self,
        position: usize,
        stage: S,
    ) -> PipelineResult<Box<dyn Stage>> {
        let slot = self.stages.get_mut(position).ok_or_else(|| {
            PipelineError::InvalidConfig(format!(
                "no stage at position {position} in pipeline {}",
                self.id
            ))
        })?;
        Ok(std::mem::replace(slot, Box::new(stage)))
    }

    /// Limit every stage of this pipeline to `deadline`
    pub fn set_stage_deadline(&mut self, deadline: Option<Duration>) {
        self.stage_deadline_us = deadline.map(micros);
    }

    /// Run one input through the pipeline
    ///
    /// Returns the rendered result, or the error string of a captured
    /// failure. Only uncaptured failures come back as `Err`.
    pub fn process(&mut self, input: Value) -> PipelineResult<String> {
        let started = self.clock.now();
        self.processed_count += 1;

        let context = StageContext::new(started);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(input, context)))
            .unwrap_or_else(|payload| Err(PipelineError::Unrecovered(panic_message(&*payload))));
        self.accumulated_us += self.clock.now().saturating_sub(started);

        match outcome {
            Ok(value) => Ok(display_value(&value)),
            Err(err) => {
                self.error_count += 1;
                if err.is_captured() {
                    log_warn!("pipeline {}: captured failure: {}", self.id, err);
                    Ok(format!("Error processing {}: {}", self.adapter.label(), err))
                } else {
                    log_error!("pipeline {}: uncaptured failure: {}", self.id, err);
                    Err(err)
                }
            }
        }
    }

    fn run(&mut self, input: Value, context: StageContext) -> PipelineResult<Value> {
        let mut current = self.adapter.normalize(input)?;

        for stage in &self.stages {
            let stage_started = self.clock.now();
            current = stage.transform(current, &context)?;

            if let Some(limit_us) = self.stage_deadline_us {
                let elapsed_us = self.clock.now().saturating_sub(stage_started);
                if elapsed_us > limit_us {
                    return Err(PipelineError::DeadlineExceeded {
                        stage: stage.name(),
                        elapsed_us,
                        limit_us,
                    });
                }
            }
            log_debug!("pipeline {}: {} done", self.id, stage.name());
        }

        Ok(current)
    }

    /// Snapshot of the run statistics
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats::new(
            &self.id,
            self.processed_count,
            self.error_count,
            self.accumulated_us,
        )
    }

    /// Occupancy of the history buffer (stream pipelines only)
    pub fn get_buffer_stats(&self) -> Option<BufferStats> {
        self.adapter.buffer_stats()
    }

    /// Raw inputs retained by a stream pipeline, oldest first
    pub fn buffer(&self) -> Option<&StreamBuffer> {
        self.adapter.buffer()
    }
}

impl core::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("id", &self.id)
            .field("adapter", &self.adapter.label())
            .field("stages", &self.stage_names())
            .field("stage_deadline_us", &self.stage_deadline_us)
            .field("processed_count", &self.processed_count)
            .field("error_count", &self.error_count)
            .finish()
    }
}

/// Duration in microseconds, saturating at `u64::MAX`
fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Text of a panic payload raised inside a stage
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("stage panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("stage panicked: {message}")
    } else {
        "stage panicked".to_owned()
    }
}

/// Pipeline builder for constructing pipelines
pub struct PipelineBuilder {
    id: String,
    adapter: Adapter,
    stages: Vec<Box<dyn Stage>>,
    clock: Option<Box<dyn TimeSource>>,
    stage_deadline: Option<Duration>,
}

impl core::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("id", &self.id)
            .field("adapter", &self.adapter.label())
            .field("stages", &self.stages.len())
            .field("stage_deadline", &self.stage_deadline)
            .finish_non_exhaustive()
    }
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new(id: impl Into<String>, adapter: Adapter) -> Self {
        Self {
            id: id.into(),
            adapter,
            stages: Vec::new(),
            clock: None,
            stage_deadline: None,
        }
    }

    /// Add a processing stage
    pub fn add_stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add input, transform and output stages, in that order
    pub fn standard_stages(self) -> Self {
        self.add_stage(InputStage)
            .add_stage(TransformStage)
            .add_stage(OutputStage)
    }

    /// Read time from `clock` instead of the system clock
    pub fn time_source<T: TimeSource + 'static>(mut self, clock: T) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Fail any stage running longer than `deadline`
    pub fn stage_deadline(mut self, deadline: Duration) -> Self {
        self.stage_deadline = Some(deadline);
        self
    }

    /// Apply the pipeline settings of a configuration document
    ///
    /// Fails with `InvalidConfig` when the document does not validate.
    pub fn config(mut self, config: &NexusConfig) -> PipelineResult<Self> {
        config.validate()?;
        self.stage_deadline = config.stage_deadline();
        Ok(self)
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            id: self.id,
            adapter: self.adapter,
            stages: self.stages,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemTime)),
            stage_deadline_us: self.stage_deadline.map(micros),
            processed_count: 0,
            error_count: 0,
            accumulated_us: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualTime;
    use serde_json::json;

    /// Stage that consumes a fixed amount of (manual) time
    struct Sleepy {
        clock: ManualTime,
        cost_us: u64,
    }

    impl Stage for Sleepy {
        fn transform(&self, value: Value, _ctx: &StageContext) -> PipelineResult<Value> {
            self.clock.advance(self.cost_us);
            Ok(value)
        }

        fn name(&self) -> &'static str {
            "Sleepy"
        }
    }

    struct Defect;

    impl Stage for Defect {
        fn transform(&self, _value: Value, _ctx: &StageContext) -> PipelineResult<Value> {
            Err(PipelineError::Unrecovered("Invalid data format".into()))
        }

        fn name(&self) -> &'static str {
            "Defect"
        }
    }

    struct Rejecting;

    impl Stage for Rejecting {
        fn transform(&self, _value: Value, _ctx: &StageContext) -> PipelineResult<Value> {
            Err(PipelineError::stage("Rejecting", "malformed record"))
        }

        fn name(&self) -> &'static str {
            "Rejecting"
        }
    }

    #[test]
    fn test_standard_constructors() {
        let pipeline = Pipeline::json("JSON_001");
        assert_eq!(pipeline.id(), "JSON_001");
        assert_eq!(
            pipeline.stage_names(),
            vec!["InputStage", "TransformStage", "OutputStage"]
        );
        assert_eq!(Pipeline::csv("CSV_001").adapter().label(), "CSV");
        assert!(Pipeline::stream("STREAM_001").get_buffer_stats().is_some());
    }

    #[test]
    fn test_json_processing() {
        let mut pipeline = Pipeline::json("JSON_001");
        let out = pipeline
            .process(json!({"sensor": "temp", "value": 23.5, "unit": "C"}))
            .unwrap();
        assert_eq!(out, "Output: sensor=temp, value=23.5, unit=C");

        let stats = pipeline.get_stats();
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.efficiency, 100.0);
    }

    #[test]
    fn test_csv_processing() {
        let mut pipeline = Pipeline::csv("CSV_001");
        assert_eq!(
            pipeline.process(json!("user,action,timestamp")).unwrap(),
            "Output: List with 3 items"
        );
        assert_eq!(
            pipeline.process(json!(42)).unwrap(),
            "Output: text=42, length=2"
        );
    }

    #[test]
    fn test_captured_error_string() {
        let mut pipeline = Pipeline::json("JSON_001");
        let out = pipeline.process(Value::Null).unwrap();
        assert_eq!(out, "Error processing JSON: Input data cannot be null");

        let stats = pipeline.get_stats();
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.efficiency, 0.0);
    }

    #[test]
    fn test_stage_error_is_captured() {
        let mut pipeline = Pipeline::builder("CSV_X", Adapter::Csv)
            .add_stage(InputStage)
            .add_stage(Rejecting)
            .build();
        assert_eq!(
            pipeline.process(json!("a,b")).unwrap(),
            "Error processing CSV: Rejecting: malformed record"
        );
    }

    #[test]
    fn test_uncaptured_error_propagates_and_counts() {
        let mut pipeline = Pipeline::json("FAIL_001");
        pipeline.replace_stage(1, Defect).unwrap();

        let err = pipeline.process(json!({"test": "data"})).unwrap_err();
        assert_eq!(err, PipelineError::Unrecovered("Invalid data format".into()));

        let stats = pipeline.get_stats();
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.errors, 1);
    }

    #[test]
    fn test_replace_stage_out_of_range() {
        let mut pipeline = Pipeline::json("JSON_001");
        assert!(matches!(
            pipeline.replace_stage(3, Defect),
            Err(PipelineError::InvalidConfig(_))
        ));
        assert_eq!(pipeline.stage_count(), 3);
    }

    #[test]
    fn test_time_accumulates_on_success_and_failure() {
        let clock = ManualTime::new(0);
        let mut pipeline = Pipeline::builder("STREAM_T", Adapter::stream())
            .time_source(clock.clone())
            .add_stage(InputStage)
            .add_stage(Sleepy { clock: clock.clone(), cost_us: 250_000 })
            .add_stage(TransformStage)
            .add_stage(OutputStage)
            .build();

        pipeline.process(json!("a")).unwrap();
        let out = pipeline.process(Value::Null).unwrap();
        assert!(out.starts_with("Error processing stream:"));

        // Only the successful run reached Sleepy
        assert_eq!(pipeline.get_stats().total_time, 0.25);
        assert_eq!(pipeline.buffer().map(|b| b.len()), Some(2));
    }

    #[test]
    fn test_stage_deadline() {
        let clock = ManualTime::new(0);
        let mut pipeline = Pipeline::builder("CSV_D", Adapter::Csv)
            .time_source(clock.clone())
            .stage_deadline(Duration::from_millis(10))
            .standard_stages()
            .add_stage(Sleepy { clock: clock.clone(), cost_us: 20_000 })
            .build();

        let out = pipeline.process(json!("a,b")).unwrap();
        assert_eq!(
            out,
            "Error processing CSV: Sleepy exceeded its deadline (20000us > 10000us)"
        );
        assert_eq!(pipeline.get_stats().errors, 1);

        pipeline.set_stage_deadline(None);
        assert_eq!(pipeline.process(json!("a,b")).unwrap(), "Output: List with 2 items");
    }

    struct Panicking;

    impl Stage for Panicking {
        fn transform(&self, _value: Value, _ctx: &StageContext) -> PipelineResult<Value> {
            let empty: Vec<Value> = Vec::new();
            Ok(empty[0].clone())
        }

        fn name(&self) -> &'static str {
            "Panicking"
        }
    }

    #[test]
    fn test_panicking_stage_becomes_uncaptured_error() {
        let clock = ManualTime::new(0);
        let mut pipeline = Pipeline::builder("PANIC_001", Adapter::Json)
            .time_source(clock.clone())
            .add_stage(InputStage)
            .add_stage(Sleepy { clock: clock.clone(), cost_us: 10_000 })
            .add_stage(Panicking)
            .build();

        let err = pipeline.process(json!({"a": 1})).unwrap_err();
        assert!(matches!(&err, PipelineError::Unrecovered(msg) if msg.starts_with("stage panicked")));

        // The next call still runs and counts
        assert!(pipeline.process(json!({"a": 1})).is_err());
        let stats = pipeline.get_stats();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.errors, 2);
        assert_eq!(stats.total_time, 0.02);
    }

    #[test]
    fn test_panic_message_text() {
        assert_eq!(panic_message(&"boom"), "stage panicked: boom");
        assert_eq!(panic_message(&String::from("bad")), "stage panicked: bad");
        assert_eq!(panic_message(&42u8), "stage panicked");
    }

    #[test]
    fn test_huge_deadline_saturates() {
        assert_eq!(micros(Duration::MAX), u64::MAX);
        assert_eq!(micros(Duration::from_millis(3)), 3_000);

        let mut pipeline = Pipeline::csv("CSV_001");
        pipeline.set_stage_deadline(Some(Duration::MAX));
        assert_eq!(pipeline.process(json!("a,b")).unwrap(), "Output: List with 2 items");
    }

    #[test]
    fn test_config_is_validated() {
        let config = NexusConfig { capacity: 10, stage_deadline_ms: Some(0) };
        let err = Pipeline::builder("CSV_C", Adapter::Csv).config(&config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));

        let config = NexusConfig { capacity: 10, stage_deadline_ms: Some(5) };
        let pipeline = Pipeline::builder("CSV_C", Adapter::Csv).config(&config).unwrap().build();
        assert_eq!(pipeline.stage_deadline_us, Some(5_000));
    }

    #[test]
    fn test_empty_pipeline_returns_normalized_input() {
        let mut pipeline = Pipeline::builder("RAW", Adapter::Json).build();
        assert_eq!(pipeline.process(json!({"k": 1})).unwrap(), r#"{"k":1}"#);
        assert_eq!(pipeline.process(json!(3)).unwrap(), "3");
    }
}
