//! MessageDispatcher - 値をエンコードして送信関数に渡す
//!
//! TopicClient / QueueClient はこの dispatcher に送信関数を合成したものです。

use super::codec::{Codec, JsonCodec};
use crate::domain::errors::DispatchError;
use serde::Serialize;
use tracing::{debug, error, info};

/// MessageDispatcher はシリアライズ + 送信関数の呼び出し
///
/// # 使用例
/// ```ignore
/// let dispatcher = MessageDispatcher::json(|payload: String| payload.len());
/// assert_eq!(dispatcher.send(&44)?, 2);
/// ```
///
/// # 保証
/// - エンコード成功時: 送信関数をちょうど 1 回呼び、その結果をそのまま返す
/// - エンコード失敗時: `DispatchError::Encode` を返し、送信関数は呼ばない
pub struct MessageDispatcher<C, F> {
    codec: C,
    sender: F,
}

impl<C, F, R> MessageDispatcher<C, F>
where
    C: Codec,
    F: Fn(String) -> R,
{
    pub fn new(codec: C, sender: F) -> Self {
        Self { codec, sender }
    }

    pub fn send<T: Serialize + ?Sized>(&self, message: &T) -> Result<R, DispatchError> {
        let payload = self.codec.encode(message).map_err(|e| {
            error!(error = %e, "failed to serialize message payload");
            DispatchError::Encode(e)
        })?;

        info!(payload = %payload, "dispatching message");
        let result = (self.sender)(payload);
        debug!("message sent");
        Ok(result)
    }
}

impl<F, R> MessageDispatcher<JsonCodec, F>
where
    F: Fn(String) -> R,
{
    /// JsonCodec::compact() を使う MessageDispatcher
    pub fn json(sender: F) -> Self {
        Self::new(JsonCodec::compact(), sender)
    }
}
