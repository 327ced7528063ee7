//! Task processor for handling individual translation requests

use crate::broker::ResponseSink;
use crate::error::{Result, WorkerError};
use crate::models::{TranslationRequest, TranslationResponse};
use crate::transformer::Transformer;
use crate::worker::WorkerConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// Decodes, translates and publishes one message at a time
pub struct TaskProcessor {
    config: WorkerConfig,
    transformer: Arc<dyn Transformer>,
    sink: Box<dyn ResponseSink>,
}

impl TaskProcessor {
    /// Create a new task processor
    pub fn new(
        config: WorkerConfig,
        transformer: Arc<dyn Transformer>,
        sink: Box<dyn ResponseSink>,
    ) -> Self {
        Self {
            config,
            transformer,
            sink,
        }
    }

    /// Process a single raw message
    ///
    /// Returns the published response. Every error returned here is
    /// per-message: `MalformedMessage`, `InvalidRequest`, or a processing
    /// failure (`Transform` / `Publish`). Nothing is published on error.
    pub async fn process(&mut self, payload: &[u8]) -> Result<TranslationResponse> {
        // Step 1: Decode + validate
        let request = TranslationRequest::from_bytes(payload)?;
        info!("Received request {} ({} chars)", request.id, request.text.chars().count());

        // Step 2: Translate
        let translated_text = self.translate(&request).await?;

        // Step 3: Publish
        let response = TranslationResponse::completed(&request, translated_text);
        self.publish(&response).await?;

        Ok(response)
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        debug!("Translating text for request {}: {}", request.id, request.text);

        self.transformer
            .transform(&request.text)
            .await
            .map_err(|e| {
                let reason = match e {
                    WorkerError::Transform(msg) => msg,
                    other => other.to_string(),
                };
                WorkerError::Transform(format!(
                    "{} (request {}, text: {:?})",
                    reason, request.id, request.text
                ))
            })
    }

    /// Produce the response and flush before returning
    async fn publish(&mut self, response: &TranslationResponse) -> Result<()> {
        let payload = response.to_bytes()?;
        let topic = self.config.response_topic.as_str();

        self.sink
            .produce(topic, &payload)
            .await
            .map_err(into_publish_error)?;
        self.sink
            .flush(self.config.flush_timeout)
            .await
            .map_err(into_publish_error)?;

        debug!("Flushed response for request {} to '{}'", response.id, topic);
        Ok(())
    }
}

fn into_publish_error(e: WorkerError) -> WorkerError {
    match e {
        WorkerError::Publish(_) => e,
        other => WorkerError::Publish(other.to_string()),
    }
}
