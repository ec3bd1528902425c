//! Transport ports - 配送先（SNS topic / SQS queue）の抽象化
//!
//! 実際の AWS SDK クライアントは外部の協力者です。ここでは同期的な
//! 最小インターフェースだけを定義し、`impls` に in-memory 実装を置きます。

use crate::domain::errors::TransportError;
use crate::domain::ids::MessageId;

/// 配送成功時に transport が返す受領情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: MessageId,
    pub destination: String,
}

/// TopicPublisher は topic へ通知を publish する
pub trait TopicPublisher: Send + Sync {
    fn publish(&self, topic_arn: &str, payload: &str) -> Result<DeliveryReceipt, TransportError>;
}

/// QueueSender は queue へメッセージを送る
pub trait QueueSender: Send + Sync {
    fn send(&self, queue_url: &str, body: &str) -> Result<DeliveryReceipt, TransportError>;
}

// 共有された transport（`&InMemoryTopic` など）をそのままクライアントに渡せるようにする
impl<P: TopicPublisher + ?Sized> TopicPublisher for &P {
    fn publish(&self, topic_arn: &str, payload: &str) -> Result<DeliveryReceipt, TransportError> {
        (**self).publish(topic_arn, payload)
    }
}

impl<S: QueueSender + ?Sized> QueueSender for &S {
    fn send(&self, queue_url: &str, body: &str) -> Result<DeliveryReceipt, TransportError> {
        (**self).send(queue_url, body)
    }
}
