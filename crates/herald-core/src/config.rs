//! Destination configuration.
//!
//! Values are read once at composition time and handed to client
//! constructors; nothing here is global.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the SNS topic ARN.
pub const TOPIC_ARN_VAR: &str = "HERALD_TOPIC_ARN";

/// Environment variable holding the SQS queue URL.
pub const QUEUE_URL_VAR: &str = "HERALD_QUEUE_URL";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(String),
}

/// Where outbound messages go.
///
/// Can be embedded in a larger service configuration file
/// (`#[serde(default)]`), or loaded from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationConfig {
    pub topic_arn: Option<String>,
    pub queue_url: Option<String>,
}

impl DestinationConfig {
    /// Reads `HERALD_TOPIC_ARN` and `HERALD_QUEUE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the destination variables through `lookup`; empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            topic_arn: read(TOPIC_ARN_VAR),
            queue_url: read(QUEUE_URL_VAR),
        }
    }

    pub fn topic_arn(&self) -> Result<&str, ConfigError> {
        self.topic_arn
            .as_deref()
            .ok_or_else(|| ConfigError::Missing(TOPIC_ARN_VAR.to_string()))
    }

    pub fn queue_url(&self) -> Result<&str, ConfigError> {
        self.queue_url
            .as_deref()
            .ok_or_else(|| ConfigError::Missing(QUEUE_URL_VAR.to_string()))
    }
}
