//! Error types for translation-worker

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Broker error: {0}")]
    Broker(String),

    #[error("Invalid message format: {0}")]
    MalformedMessage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Translation failed: {0}")]
    Transform(String),

    #[error("Failed to publish response: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Classification used by the worker loop to decide continue vs. stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BrokerError,
    MalformedMessage,
    InvalidRequest,
    ProcessingError,
    ConfigError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BrokerError => "broker_error",
            ErrorKind::MalformedMessage => "malformed_message",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::ProcessingError => "processing_error",
            ErrorKind::ConfigError => "config_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkerError::Broker(_) => ErrorKind::BrokerError,
            WorkerError::MalformedMessage(_) => ErrorKind::MalformedMessage,
            WorkerError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            WorkerError::Transform(_) | WorkerError::Publish(_) => ErrorKind::ProcessingError,
            WorkerError::ConfigError(_) => ErrorKind::ConfigError,
        }
    }

    /// Only broker-level failures stop the loop; everything else is per-message
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::BrokerError)
    }
}

impl From<rdkafka::error::KafkaError> for WorkerError {
    fn from(e: rdkafka::error::KafkaError) -> Self {
        WorkerError::Broker(e.to_string())
    }
}

impl From<url::ParseError> for WorkerError {
    fn from(e: url::ParseError) -> Self {
        WorkerError::ConfigError(format!("invalid URL: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, WorkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_broker_errors_are_fatal() {
        assert!(WorkerError::Broker("down".into()).is_fatal());
        assert!(!WorkerError::MalformedMessage("x".into()).is_fatal());
        assert!(!WorkerError::InvalidRequest("x".into()).is_fatal());
        assert!(!WorkerError::Transform("x".into()).is_fatal());
        assert!(!WorkerError::Publish("x".into()).is_fatal());
    }

    #[test]
    fn test_transform_and_publish_share_processing_kind() {
        assert_eq!(
            WorkerError::Transform("x".into()).kind(),
            ErrorKind::ProcessingError
        );
        assert_eq!(
            WorkerError::Publish("x".into()).kind(),
            ErrorKind::ProcessingError
        );
        assert_eq!(ErrorKind::ProcessingError.to_string(), "processing_error");
    }
}
