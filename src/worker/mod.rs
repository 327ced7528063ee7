//! Worker module for consuming and processing translation requests
//!
//! This module provides:
//! - TaskRunner: Main worker loop that polls the request topic
//! - TaskProcessor: Processes individual messages (decode + translate + publish)
//! - WorkerConfig: Configuration for the worker

pub mod config;
pub mod processor;
pub mod stats;
pub mod task_runner;

pub use config::WorkerConfig;
pub use processor::TaskProcessor;
pub use stats::WorkerStats;
pub use task_runner::{setup_signal_handler, Iteration, TaskRunner};
