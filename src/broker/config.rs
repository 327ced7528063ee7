//! Broker connection settings

use crate::config::{parse_or, string_or};
use crate::error::Result;
use rdkafka::config::ClientConfig;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BROKER_ADDRESS: &str = "localhost:9092";
pub const DEFAULT_GROUP_ID: &str = "translation_worker_group";
pub const DEFAULT_REQUEST_TOPIC: &str = "translationArToEnRequest";
pub const DEFAULT_RESPONSE_TOPIC: &str = "translationArToEnResponse";

/// Where a consumer group without committed offsets starts reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetReset {
    #[default]
    Earliest,
    Latest,
}

impl OffsetReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetReset::Earliest => "earliest",
            OffsetReset::Latest => "latest",
        }
    }
}

impl fmt::Display for OffsetReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OffsetReset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earliest" => Ok(OffsetReset::Earliest),
            "latest" => Ok(OffsetReset::Latest),
            other => Err(format!(
                "unknown offset reset policy '{}' (expected earliest or latest)",
                other
            )),
        }
    }
}

/// Broker connection, consumer group and topic names
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub broker_address: String,
    pub group_id: String,
    pub offset_reset: OffsetReset,
    pub request_topic: String,
    pub response_topic: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            broker_address: DEFAULT_BROKER_ADDRESS.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            offset_reset: OffsetReset::default(),
            request_topic: DEFAULT_REQUEST_TOPIC.to_string(),
            response_topic: DEFAULT_RESPONSE_TOPIC.to_string(),
        }
    }
}

impl BrokerConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            broker_address: string_or(lookup, "KAFKA_BROKER", DEFAULT_BROKER_ADDRESS),
            group_id: string_or(lookup, "KAFKA_GROUP_ID", DEFAULT_GROUP_ID),
            offset_reset: parse_or(lookup, "KAFKA_OFFSET_RESET", OffsetReset::default())?,
            request_topic: string_or(lookup, "REQUEST_TOPIC", DEFAULT_REQUEST_TOPIC),
            response_topic: string_or(lookup, "RESPONSE_TOPIC", DEFAULT_RESPONSE_TOPIC),
        })
    }
}

/// Creates the `ClientConfig` shared by the consumer and the producer.
///
/// Only `bootstrap.servers` is common; consumer and producer add their own
/// settings on top.
pub fn create_client_config(config: &BrokerConfig) -> ClientConfig {
    let mut client_config = ClientConfig::new();
    client_config.set("bootstrap.servers", &config.broker_address);
    client_config
}
