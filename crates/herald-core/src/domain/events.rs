//! Transport envelopes: SNS notifications and SQS messages as delivered to a
//! function handler.
//!
//! Field names follow the Lambda event JSON so the same types can be fed
//! straight from an invocation payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// SNS invocation event. Usually carries exactly one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsRecord {
    #[serde(default)]
    pub event_source: Option<String>,

    #[serde(default)]
    pub event_subscription_arn: Option<String>,

    pub sns: SnsMessage,
}

/// A single SNS notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessage {
    pub message_id: String,

    pub topic_arn: String,

    #[serde(default)]
    pub subject: Option<String>,

    /// Notification body (the payload handed to typed handlers).
    pub message: String,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub message_attributes: HashMap<String, SnsMessageAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsMessageAttribute {
    #[serde(rename = "Type")]
    pub data_type: String,

    pub value: String,
}

/// SQS invocation event: a batch of received messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SqsEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<SqsMessage>,
}

/// A single SQS message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqsMessage {
    pub message_id: String,

    pub receipt_handle: String,

    pub body: String,

    #[serde(default)]
    pub attributes: HashMap<String, String>,

    #[serde(rename = "eventSourceARN", default)]
    pub event_source_arn: Option<String>,
}
