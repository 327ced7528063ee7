//! Response sink backed by a Kafka producer

use crate::broker::config::{create_client_config, BrokerConfig};
use crate::error::{Result, WorkerError};
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, error, info};

/// How long `produce` may wait to enqueue when the local queue is full.
/// Delivery itself is bounded by `message.timeout.ms`.
const ENQUEUE_TIMEOUT: Duration = Duration::from_secs(5);

/// Destination for serialized responses
#[async_trait]
pub trait ResponseSink: Send {
    async fn produce(&mut self, topic: &str, payload: &[u8]) -> Result<()>;

    /// Block until everything produced so far has been acknowledged
    async fn flush(&mut self, timeout: Duration) -> Result<()>;
}

/// Kafka producer for the response topic
pub struct KafkaResponseSink {
    producer: FutureProducer,
}

impl KafkaResponseSink {
    /// Create a producer for the configured broker
    ///
    /// `acks=all` so a response counts as published only once every
    /// in-sync replica has it.
    pub fn new(config: &BrokerConfig) -> Result<Self> {
        info!("Initializing Kafka producer...");

        let producer: FutureProducer = create_client_config(config)
            .set("acks", "all")
            .set("message.timeout.ms", "30000")
            .create()?;

        info!("Kafka producer initialized for '{}'", config.broker_address);

        Ok(Self { producer })
    }
}

#[async_trait]
impl ResponseSink for KafkaResponseSink {
    async fn produce(&mut self, topic: &str, payload: &[u8]) -> Result<()> {
        let record: FutureRecord<'_, (), [u8]> = FutureRecord::to(topic).payload(payload);

        match self
            .producer
            .send(record, Timeout::After(ENQUEUE_TIMEOUT))
            .await
        {
            Ok((partition, offset)) => {
                debug!(partition, offset, "Response written to '{}'", topic);
                Ok(())
            }
            Err((kafka_err, _)) => {
                error!(error = %kafka_err, topic = %topic, "Failed to send response");
                Err(WorkerError::Publish(kafka_err.to_string()))
            }
        }
    }

    async fn flush(&mut self, timeout: Duration) -> Result<()> {
        self.producer
            .flush(Timeout::After(timeout))
            .map_err(|e| WorkerError::Publish(format!("flush failed: {}", e)))
    }
}
