//! Pipeline composition and execution for project frequencies.

mod runner;

pub use runner::{Pipeline, PipelineConfig, PipelineOutput, PipelineStep, ScaleMode};
