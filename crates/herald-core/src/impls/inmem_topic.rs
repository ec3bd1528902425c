//! InMemoryTopic - 開発用・テスト用の SNS topic
//!
//! publish された通知を topic ごとに溜めておき、`take_event` で
//! Lambda と同じ形の `SnsEvent` として取り出せます。

use crate::domain::errors::TransportError;
use crate::domain::events::{SnsEvent, SnsMessage, SnsRecord};
use crate::ports::{Clock, DeliveryReceipt, IdGenerator, SystemClock, TopicPublisher, UlidGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// InMemoryTopic は topic ARN ごとに通知を保持する
///
/// 作成されていない topic への publish は `DestinationNotFound` になります。
///
/// # 使用例
/// ```ignore
/// let topic = InMemoryTopic::new();
/// topic.create_topic("arn:aws:sns:eu-central-1:123:orders");
/// let client = TopicClient::new(&topic, JsonCodec::compact(), "arn:aws:sns:eu-central-1:123:orders");
/// client.publish(&order)?;
/// handler.process(&topic.take_event("arn:aws:sns:eu-central-1:123:orders")?)?;
/// ```
pub struct InMemoryTopic {
    topics: Mutex<HashMap<String, Vec<SnsMessage>>>,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl InMemoryTopic {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// タイムスタンプと ID の時刻部分に `clock` を使う
    pub fn with_clock<C: Clock + Clone + 'static>(clock: C) -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
            clock: Arc::new(clock.clone()),
            ids: Box::new(UlidGenerator::new(clock)),
        }
    }

    /// topic を作成する（既にあれば何もしない）
    pub fn create_topic(&self, topic_arn: &str) {
        self.topics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(topic_arn.to_string())
            .or_default();
    }

    /// まだ取り出されていない通知のコピー
    pub fn published(&self, topic_arn: &str) -> Result<Vec<SnsMessage>, TransportError> {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics
            .get(topic_arn)
            .cloned()
            .ok_or_else(|| TransportError::DestinationNotFound(topic_arn.to_string()))
    }

    /// 溜まった通知をすべて取り出し、1 つの `SnsEvent` にまとめる
    pub fn take_event(&self, topic_arn: &str) -> Result<SnsEvent, TransportError> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        let pending = topics
            .get_mut(topic_arn)
            .ok_or_else(|| TransportError::DestinationNotFound(topic_arn.to_string()))?;

        let records = pending
            .drain(..)
            .map(|sns| SnsRecord {
                event_source: Some("aws:sns".to_string()),
                event_subscription_arn: Some(format!("{topic_arn}:in-memory")),
                sns,
            })
            .collect();
        Ok(SnsEvent { records })
    }
}

impl Default for InMemoryTopic {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicPublisher for InMemoryTopic {
    fn publish(&self, topic_arn: &str, payload: &str) -> Result<DeliveryReceipt, TransportError> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        let pending = topics
            .get_mut(topic_arn)
            .ok_or_else(|| TransportError::DestinationNotFound(topic_arn.to_string()))?;

        let message_id = self.ids.next_message_id();
        pending.push(SnsMessage {
            message_id: message_id.to_string(),
            topic_arn: topic_arn.to_string(),
            subject: None,
            message: payload.to_string(),
            timestamp: self.clock.now(),
            message_attributes: HashMap::new(),
        });
        debug!(topic_arn, %message_id, "notification stored");

        Ok(DeliveryReceipt {
            message_id,
            destination: topic_arn.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::{NotificationHandler, TopicClient};
    use crate::ports::FixedClock;
    use crate::typed::JsonCodec;
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    const ORDERS: &str = "arn:aws:sns:eu-central-1:123:orders";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct OrderPlaced {
        order_id: u32,
    }

    #[test]
    fn publish_to_unknown_topic_fails() {
        let topic = InMemoryTopic::new();

        let result = topic.publish(ORDERS, "{}");

        assert!(matches!(result, Err(TransportError::DestinationNotFound(arn)) if arn == ORDERS));
    }

    #[test]
    fn publish_stamps_notification_with_clock() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let topic = InMemoryTopic::with_clock(FixedClock::new(at));
        topic.create_topic(ORDERS);

        let receipt = topic.publish(ORDERS, "hello").unwrap();

        let published = topic.published(ORDERS).unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].message, "hello");
        assert_eq!(published[0].timestamp, at);
        assert_eq!(published[0].message_id, receipt.message_id.to_string());
        assert_eq!(
            receipt.message_id.as_ulid().timestamp_ms(),
            at.timestamp_millis() as u64
        );
    }

    #[test]
    fn take_event_drains_pending_notifications() {
        let topic = InMemoryTopic::new();
        topic.create_topic(ORDERS);
        topic.publish(ORDERS, "1").unwrap();
        topic.publish(ORDERS, "2").unwrap();

        let event = topic.take_event(ORDERS).unwrap();

        let bodies: Vec<_> = event.records.iter().map(|r| r.sns.message.as_str()).collect();
        assert_eq!(bodies, vec!["1", "2"]);
        assert!(topic.take_event(ORDERS).unwrap().records.is_empty());
    }

    #[test]
    fn typed_round_trip_through_topic() {
        let topic = InMemoryTopic::new();
        topic.create_topic(ORDERS);
        let client = TopicClient::new(&topic, JsonCodec::compact(), ORDERS);

        client.publish(&OrderPlaced { order_id: 7 }).unwrap();
        client.publish(&OrderPlaced { order_id: 8 }).unwrap();

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let handler = NotificationHandler::typed(JsonCodec::compact(), move |order: OrderPlaced| {
            sink.lock().unwrap().push(order.order_id);
        });
        handler.process(&topic.take_event(ORDERS).unwrap()).unwrap();

        assert_eq!(*received.lock().unwrap(), vec![7, 8]);
    }
}
