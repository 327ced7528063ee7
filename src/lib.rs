//! Translation Worker - consumes translation requests from Kafka and publishes results
//!
//! Each message on the request topic is a JSON object with a `text` field and
//! an optional `id`. The worker translates the text and publishes
//! `{"id", "translated_text", "status": "completed"}` to the response topic.
//!
//! Messages are handled strictly one at a time. A bad message (malformed
//! payload, empty text, failed translation or publish) is logged and dropped;
//! only a broker failure stops the worker.

pub mod broker;
pub mod config;
pub mod error;
pub mod models;
pub mod transformer;
pub mod worker;

pub use broker::{KafkaResponseSink, KafkaTaskSource, PollOutcome, ResponseSink, TaskSource};
pub use config::ServiceConfig;
pub use error::{ErrorKind, Result, WorkerError};
pub use models::{TaskStatus, TranslationRequest, TranslationResponse};
pub use transformer::{HttpTransformer, Transformer, TransformerConfig};
pub use worker::{Iteration, TaskProcessor, TaskRunner, WorkerConfig, WorkerStats};

use std::sync::Arc;

/// Wire the Kafka source/sink and the HTTP transformer into a runner
///
/// This is the only place broker clients and the transformer are created;
/// they are owned by the returned runner for its whole lifetime.
pub fn build_worker(config: &ServiceConfig) -> Result<TaskRunner> {
    use tracing::info;

    let transformer = HttpTransformer::new(config.transformer.clone())?;
    let sink = KafkaResponseSink::new(&config.broker)?;
    let source = KafkaTaskSource::new(&config.broker)?;
    info!("Broker connection established: {}", config.broker.broker_address);

    let processor = TaskProcessor::new(
        config.worker.clone(),
        Arc::new(transformer),
        Box::new(sink),
    );

    Ok(TaskRunner::new(
        config.worker.clone(),
        Box::new(source),
        processor,
    ))
}

/// Translate one piece of text without touching the broker
///
/// Produces the same response document the worker would publish.
pub async fn translate_once(
    transformer: &dyn Transformer,
    id: serde_json::Value,
    text: &str,
) -> Result<TranslationResponse> {
    let request = TranslationRequest {
        id,
        text: text.to_string(),
    };
    if request.text.is_empty() {
        return Err(WorkerError::InvalidRequest("empty text".to_string()));
    }

    let translated = transformer.transform(&request.text).await?;
    Ok(TranslationResponse::completed(&request, translated))
}
