//! Task source backed by a Kafka consumer

use crate::broker::config::{create_client_config, BrokerConfig};
use crate::error::{Result, WorkerError};
use async_trait::async_trait;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::Message;
use std::time::Duration;
use tracing::{debug, error, info};

/// Result of a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing arrived within the timeout
    NoMessage,
    /// The broker has no more data on an assigned partition right now
    EndOfPartition,
    /// Raw payload of one inbound message
    Message(Vec<u8>),
}

/// Source of raw inbound messages
///
/// Any `Err` returned from `poll` is a broker-level failure and stops the worker.
#[async_trait]
pub trait TaskSource: Send {
    async fn poll(&mut self, timeout: Duration) -> Result<PollOutcome>;

    /// Release the underlying connection
    fn close(&mut self);
}

/// Kafka consumer subscribed to the request topic
///
/// Offsets are committed by the client according to its own policy
/// (`enable.auto.commit` is left at the librdkafka default).
pub struct KafkaTaskSource {
    consumer: StreamConsumer,
    topic: String,
    closed: bool,
}

impl KafkaTaskSource {
    /// Create a consumer and subscribe it to `config.request_topic`
    pub fn new(config: &BrokerConfig) -> Result<Self> {
        info!("Initializing Kafka consumer...");

        let consumer: StreamConsumer = create_client_config(config)
            .set("group.id", &config.group_id)
            .set("auto.offset.reset", config.offset_reset.as_str())
            // Surface partition EOF so it can be told apart from a real error
            .set("enable.partition.eof", "true")
            .create()?;

        consumer.subscribe(&[config.request_topic.as_str()])?;

        info!(
            "Kafka consumer subscribed to '{}' in group '{}' (offset reset: {})",
            config.request_topic, config.group_id, config.offset_reset
        );

        Ok(Self {
            consumer,
            topic: config.request_topic.clone(),
            closed: false,
        })
    }
}

#[async_trait]
impl TaskSource for KafkaTaskSource {
    async fn poll(&mut self, timeout: Duration) -> Result<PollOutcome> {
        match tokio::time::timeout(timeout, self.consumer.recv()).await {
            Err(_) => Ok(PollOutcome::NoMessage),
            Ok(Ok(message)) => {
                debug!(
                    partition = message.partition(),
                    offset = message.offset(),
                    "Received message from '{}'",
                    self.topic
                );
                let payload = message.payload().map(<[u8]>::to_vec).unwrap_or_default();
                Ok(PollOutcome::Message(payload))
            }
            Ok(Err(KafkaError::PartitionEOF(partition))) => {
                debug!(partition, "Reached end of partition on '{}'", self.topic);
                Ok(PollOutcome::EndOfPartition)
            }
            Ok(Err(e)) => {
                error!(error = %e, "Kafka consumer error");
                Err(WorkerError::Broker(e.to_string()))
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.consumer.unsubscribe();
        self.closed = true;
        info!("Kafka consumer for '{}' closed", self.topic);
    }
}

impl Drop for KafkaTaskSource {
    fn drop(&mut self) {
        self.close();
    }
}
