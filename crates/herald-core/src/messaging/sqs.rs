//! SQS - メッセージの受信 handler と queue への送信クライアント

use crate::config::{ConfigError, DestinationConfig};
use crate::domain::errors::{DispatchError, MessagingError};
use crate::domain::events::{SqsEvent, SqsMessage};
use crate::ports::{DeliveryReceipt, QueueSender};
use crate::typed::{Codec, JsonCodec, MessageDispatcher, MessageHandler};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

type MessageFn = Box<dyn Fn(&SqsMessage) -> Result<(), DispatchError> + Send + Sync>;

/// EventHandler は SQS イベントのメッセージを順に処理する
///
/// 受信したメッセージの削除（ack）は呼び出し側の責務です。
pub struct EventHandler {
    handler: MessageFn,
}

impl EventHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&SqsMessage) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    /// メッセージ本文だけを受け取る handler
    pub fn simple<F>(body_handler: F) -> Self
    where
        F: Fn(&str) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self::new(move |message| body_handler(&message.body))
    }

    /// メッセージ本文を T にデコードして受け取る handler
    pub fn typed<T, C, F>(codec: C, handler: F) -> Self
    where
        T: DeserializeOwned + 'static,
        C: Codec + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let message_handler = MessageHandler::new(codec, handler);
        Self::simple(move |body| message_handler.handle(body))
    }

    pub fn process(&self, event: &SqsEvent) -> Result<(), DispatchError> {
        for message in &event.records {
            (self.handler)(message)?;
        }
        Ok(())
    }
}

/// QueueClient は queue に束縛された送信クライアント
pub struct QueueClient<S, C = JsonCodec> {
    sender: S,
    codec: C,
    queue_url: String,
}

impl<S: QueueSender, C: Codec> QueueClient<S, C> {
    pub fn new(sender: S, codec: C, queue_url: impl Into<String>) -> Self {
        Self {
            sender,
            codec,
            queue_url: queue_url.into(),
        }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }

    pub fn send<T: Serialize + ?Sized>(&self, message: &T) -> Result<DeliveryReceipt, MessagingError> {
        let dispatcher = MessageDispatcher::new(&self.codec, |body: String| {
            self.sender.send(&self.queue_url, &body)
        });
        let receipt = dispatcher.send(message)??;
        debug!(queue_url = %self.queue_url, message_id = %receipt.message_id, "message queued");
        Ok(receipt)
    }
}

impl<S: QueueSender> QueueClient<S, JsonCodec> {
    pub fn from_config(sender: S, config: &DestinationConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(sender, JsonCodec::compact(), config.queue_url()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{CodecError, TransportError};
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct GenericMessage {
        id: String,
    }

    fn event(bodies: &[&str]) -> SqsEvent {
        SqsEvent {
            records: bodies
                .iter()
                .enumerate()
                .map(|(i, body)| SqsMessage {
                    message_id: format!("m{i}"),
                    receipt_handle: format!("r{i}"),
                    body: body.to_string(),
                    attributes: HashMap::new(),
                    event_source_arn: None,
                })
                .collect(),
        }
    }

    struct MissingQueue;

    impl QueueSender for MissingQueue {
        fn send(&self, queue_url: &str, _: &str) -> Result<DeliveryReceipt, TransportError> {
            Err(TransportError::DestinationNotFound(queue_url.to_string()))
        }
    }

    #[test]
    fn process_passes_every_message_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = EventHandler::new(move |message| {
            sink.lock().unwrap().push(message.receipt_handle.clone());
            Ok(())
        });

        handler.process(&event(&["a", "b", "c"])).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["r0", "r1", "r2"]);
    }

    #[test]
    fn typed_handler_decodes_body() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = EventHandler::typed(JsonCodec::compact(), move |message: GenericMessage| {
            sink.lock().unwrap().push(message.id);
        });

        handler.process(&event(&[r#"{"id":"abc"}"#])).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[test]
    fn typed_handler_rejects_invalid_body() {
        let handler = EventHandler::typed(JsonCodec::compact(), |_: GenericMessage| {});

        let result = handler.process(&event(&["not json"]));

        assert!(matches!(result, Err(DispatchError::Decode(CodecError::Json(_)))));
    }

    #[test]
    fn send_reports_missing_queue() {
        let client = QueueClient::new(MissingQueue, JsonCodec::compact(), "https://sqs/123/gone");

        let result = client.send(&GenericMessage {
            id: "abc".to_string(),
        });

        assert!(matches!(
            result,
            Err(MessagingError::Transport(TransportError::DestinationNotFound(url))) if url == "https://sqs/123/gone"
        ));
    }

    #[test]
    fn send_encode_failure_never_reaches_queue() {
        let mut value = HashMap::new();
        value.insert((1, 2), "pair");
        let client = QueueClient::new(MissingQueue, JsonCodec::compact(), "https://sqs/123/gone");

        let result = client.send(&value);

        assert!(matches!(result, Err(MessagingError::Dispatch(DispatchError::Encode(_)))));
    }

    #[test]
    fn from_config_uses_queue_url() {
        let config = DestinationConfig {
            topic_arn: None,
            queue_url: Some("https://sqs/123/jobs".to_string()),
        };

        let client = QueueClient::from_config(MissingQueue, &config).unwrap();

        assert_eq!(client.queue_url(), "https://sqs/123/jobs");
    }
}
