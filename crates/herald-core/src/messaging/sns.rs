//! SNS - 通知の受信 handler と topic への publish クライアント
//!
//! handler の階層は関数合成で表現します:
//! `typed` = `simple`（本文を取り出す）∘ `MessageHandler`（デコード）∘ 利用者の関数

use crate::config::{ConfigError, DestinationConfig};
use crate::domain::errors::{DispatchError, MessagingError};
use crate::domain::events::{SnsEvent, SnsMessage};
use crate::ports::{DeliveryReceipt, TopicPublisher};
use crate::typed::{Codec, JsonCodec, MessageDispatcher, MessageHandler};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

type NotificationFn = Box<dyn Fn(&SnsMessage) -> Result<(), DispatchError> + Send + Sync>;

/// NotificationHandler は SNS イベントの各レコードを順に処理する
///
/// # 使用例
/// ```ignore
/// let handler = NotificationHandler::typed(JsonCodec::compact(), |order: Order| ship(order));
/// handler.process(&event)?;
/// ```
pub struct NotificationHandler {
    handler: NotificationFn,
}

impl NotificationHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&SnsMessage) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// 通知本文だけを受け取る handler
    pub fn simple<F>(body_handler: F) -> Self
    where
        F: Fn(&str) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self::new(move |notification| body_handler(&notification.message))
    }

    /// 通知本文を T にデコードして受け取る handler
    pub fn typed<T, C, F>(codec: C, handler: F) -> Self
    where
        T: DeserializeOwned + 'static,
        C: Codec + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let message_handler = MessageHandler::new(codec, handler);
        Self::simple(move |body| message_handler.handle(body))
    }

    /// 全レコードを順に処理し、最初のエラーで止める
    pub fn process(&self, event: &SnsEvent) -> Result<(), DispatchError> {
        // Lambda からの SNS イベントは常に 1 レコードだが、複数でも同じ扱いにする
        for record in &event.records {
            (self.handler)(&record.sns)?;
        }
        Ok(())
    }
}

/// TopicClient は topic に束縛された publish クライアント
pub struct TopicClient<P, C = JsonCodec> {
    publisher: P,
    codec: C,
    topic_arn: String,
}

impl<P: TopicPublisher, C: Codec> TopicClient<P, C> {
    pub fn new(publisher: P, codec: C, topic_arn: impl Into<String>) -> Self {
        Self {
            publisher,
            codec,
            topic_arn: topic_arn.into(),
        }
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }

    pub fn publish<T: Serialize + ?Sized>(
        &self,
        message: &T,
    ) -> Result<DeliveryReceipt, MessagingError> {
        let dispatcher = MessageDispatcher::new(&self.codec, |payload: String| {
            self.publisher.publish(&self.topic_arn, &payload)
        });
        let receipt = dispatcher.send(message)??;
        debug!(topic_arn = %self.topic_arn, message_id = %receipt.message_id, "notification published");
        Ok(receipt)
    }
}

impl<P: TopicPublisher> TopicClient<P, JsonCodec> {
    pub fn from_config(publisher: P, config: &DestinationConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(publisher, JsonCodec::compact(), config.topic_arn()?))
    }
}
