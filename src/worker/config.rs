//! Worker configuration

use std::time::Duration;

/// Default time to wait for a message before polling again
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Default time to wait for the producer to flush a response
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How long a single poll waits for a message
    pub poll_timeout: Duration,

    /// How long publishing waits for the producer flush
    pub flush_timeout: Duration,

    /// Topic responses are published to
    pub response_topic: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            response_topic: crate::broker::DEFAULT_RESPONSE_TOPIC.to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create a new config builder
    pub fn builder() -> WorkerConfigBuilder {
        WorkerConfigBuilder::default()
    }
}

/// Builder for WorkerConfig
#[derive(Default)]
pub struct WorkerConfigBuilder {
    config: WorkerConfig,
}

impl WorkerConfigBuilder {
    /// Set poll timeout in milliseconds
    pub fn poll_timeout_ms(mut self, millis: u64) -> Self {
        self.config.poll_timeout = Duration::from_millis(millis);
        self
    }

    /// Set flush timeout
    pub fn flush_timeout(mut self, duration: Duration) -> Self {
        self.config.flush_timeout = duration;
        self
    }

    /// Set response topic
    pub fn response_topic(mut self, topic: &str) -> Self {
        self.config.response_topic = topic.to_string();
        self
    }

    /// Build the config
    pub fn build(self) -> WorkerConfig {
        self.config
    }
}
