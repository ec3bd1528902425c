//! MultiHandler - discriminator による handler の振り分け
//!
//! 1 つのエントリポイントで複数種類のメッセージを受ける場合に使います。
//! ペイロード（JSON object）の discriminator フィールドの値で handler を引き、
//! ペイロード全体をその handler の Message 型にデコードします。
//!
//! # 学習ポイント
//! - HashMap での型消去された trait object の管理
//! - Generic methods での登録と型安全性
//! - Arc による共有所有権

use super::handler::{DynHandler, TypedHandler};
use super::message::{Heartbeat, Message};
use crate::domain::errors::{CodecError, DispatchError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, trace};

/// discriminator フィールド名のデフォルト
pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// MultiHandler は型付き handler を登録・管理し、ペイロードを振り分ける
///
/// # 使用例
/// ```ignore
/// let mut handler = MultiHandler::new();
/// handler.register::<OrderPlaced, _>(|event| ship(event))?;
/// handler.handle(r#"{"type":"shop:order:placed","order_id":"42"}"#)?;
/// ```
pub struct MultiHandler {
    discriminator: String,
    handlers: HashMap<String, Arc<dyn DynHandler>>,
}

/// RegistryError は MultiHandler の登録エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Handler for message type '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl Default for MultiHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiHandler {
    pub fn new() -> Self {
        Self::with_discriminator(DEFAULT_DISCRIMINATOR)
    }

    pub fn with_discriminator(field: impl Into<String>) -> Self {
        Self {
            discriminator: field.into(),
            handlers: HashMap::new(),
        }
    }

    pub fn register<M, F>(&mut self, handler: F) -> Result<(), RegistryError>
    where
        M: Message,
        F: Fn(M) + Send + Sync + 'static,
    {
        let message_type = M::TYPE.to_string();
        if self.handlers.contains_key(&message_type) {
            return Err(RegistryError::AlreadyRegistered(message_type));
        }
        self.handlers
            .insert(message_type, Arc::new(TypedHandler::<M, F>::new(handler)));
        Ok(())
    }

    /// pre-warm 用の Heartbeat を受け付ける（ログを出すだけ）
    pub fn with_heartbeat(mut self) -> Result<Self, RegistryError> {
        self.register::<Heartbeat, _>(|_| info!("heartbeat"))?;
        Ok(self)
    }

    pub fn get(&self, message_type: &str) -> Option<Arc<dyn DynHandler>> {
        self.handlers.get(message_type).cloned()
    }

    pub fn registered_types(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// ペイロードを振り分けて handler をちょうど 1 つ呼ぶ
    pub fn handle(&self, payload: &str) -> Result<(), DispatchError> {
        info!(payload, "incoming message");
        let root: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
            error!(error = %e, "failed to parse message payload");
            DispatchError::Decode(CodecError::from(e))
        })?;

        let Some(message_type) = root
            .get(&self.discriminator)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
        else {
            error!(discriminator = %self.discriminator, "message payload has no discriminator");
            return Err(DispatchError::MissingDiscriminator(self.discriminator.clone()));
        };

        let Some(handler) = self.handlers.get(&message_type) else {
            error!(message_type = %message_type, "no handler was able to handle payload");
            return Err(DispatchError::NoHandler(message_type));
        };

        trace!(message_type = %message_type, "dispatching to handler");
        handler.handle_dyn(root)
    }
}
