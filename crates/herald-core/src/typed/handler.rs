//! Handler - 受信メッセージをデコードして型付き handler に渡す
//!
//! # 学習ポイント
//! - クロージャを型パラメータ `F: Fn(T)` で受け取る（Box 不要、静的ディスパッチ）
//! - Object-safe trait (DynHandler)
//! - Type erasure パターン (TypedHandler<M, F> → DynHandler)

use super::codec::{Codec, JsonCodec};
use super::message::Message;
use crate::domain::errors::DispatchError;
use std::marker::PhantomData;
use tracing::{debug, error, info};

/// MessageHandler は生のメッセージ文字列を T にデコードして handler を呼ぶ
///
/// # 使用例
/// ```ignore
/// let handler = MessageHandler::new(JsonCodec::compact(), |order: Order| {
///     println!("received {}", order.id);
/// });
/// handler.handle(r#"{"id":"abc"}"#)?;
/// ```
///
/// # 保証
/// - デコード成功時: handler をちょうど 1 回、呼び出し元のスレッドで同期的に呼ぶ
/// - デコード失敗時: `DispatchError::Decode` を返し、handler は呼ばない
pub struct MessageHandler<T, C, F> {
    codec: C,
    handler: F,
    _marker: PhantomData<fn(T)>,
}

impl<T, C, F> MessageHandler<T, C, F>
where
    T: serde::de::DeserializeOwned,
    C: Codec,
    F: Fn(T),
{
    pub fn new(codec: C, handler: F) -> Self {
        Self {
            codec,
            handler,
            _marker: PhantomData,
        }
    }

    pub fn handle(&self, message: &str) -> Result<(), DispatchError> {
        info!(payload = message, "incoming message");
        match self.codec.decode::<T>(message) {
            Ok(data) => {
                (self.handler)(data);
                debug!("message processed");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to parse message payload");
                Err(DispatchError::Decode(e))
            }
        }
    }
}

impl<T, F> MessageHandler<T, JsonCodec, F>
where
    T: serde::de::DeserializeOwned,
    F: Fn(T),
{
    /// JsonCodec::compact() を使う MessageHandler
    pub fn json(handler: F) -> Self {
        Self::new(JsonCodec::compact(), handler)
    }
}

/// DynHandler は object-safe な handler の抽象化
///
/// TypedHandler<M, F> を DynHandler に変換することで、
/// HashMap<String, Arc<dyn DynHandler>> に格納可能にします。
pub trait DynHandler: Send + Sync {
    fn handle_dyn(&self, payload: serde_json::Value) -> Result<(), DispatchError>;
    fn message_type(&self) -> &str;
}

pub struct TypedHandler<M: Message, F: Fn(M) + Send + Sync> {
    handler: F,
    _marker: PhantomData<fn(M)>,
}

impl<M: Message, F: Fn(M) + Send + Sync> TypedHandler<M, F> {
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<M: Message, F: Fn(M) + Send + Sync> DynHandler for TypedHandler<M, F> {
    fn handle_dyn(&self, payload: serde_json::Value) -> Result<(), DispatchError> {
        let message: M = serde_json::from_value(payload)
            .map_err(|e| DispatchError::Decode(e.into()))?;
        (self.handler)(message);
        Ok(())
    }

    fn message_type(&self) -> &str {
        M::TYPE
    }
}
