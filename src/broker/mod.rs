//! Kafka plumbing for the worker
//!
//! This module provides:
//! - TaskSource: polls the request topic for raw messages
//! - ResponseSink: publishes serialized responses and flushes them
//! - BrokerConfig: connection, consumer group and topic settings

pub mod config;
pub mod sink;
pub mod source;

pub use config::{
    create_client_config, BrokerConfig, OffsetReset, DEFAULT_REQUEST_TOPIC,
    DEFAULT_RESPONSE_TOPIC,
};
pub use sink::{KafkaResponseSink, ResponseSink};
pub use source::{KafkaTaskSource, PollOutcome, TaskSource};
