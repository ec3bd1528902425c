//! Message - discriminator の値と Rust の型を結びつける
//!
//! `MultiHandler` は受信側でこの値を見て handler を選びます。
//! 送信側は [`tagged`] で discriminator を埋め込んだペイロードを作れます。

use crate::domain::errors::CodecError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// # 使用例
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct OrderPlaced {
///     order_id: String,
/// }
///
/// impl Message for OrderPlaced {
///     const TYPE: &'static str = "shop:order:placed";
/// }
/// ```
pub trait Message: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TYPE: &'static str;
}

/// `message` を JSON object にして `discriminator` フィールドに `M::TYPE` を入れる
///
/// object にならない型（数値、配列など）は振り分けできないのでエラーです。
pub fn tagged<M: Message>(message: &M, discriminator: &str) -> Result<Value, CodecError> {
    match serde_json::to_value(message)? {
        Value::Object(mut fields) => {
            fields.insert(discriminator.to_string(), Value::String(M::TYPE.to_string()));
            Ok(Value::Object(fields))
        }
        other => Err(CodecError::custom(format!(
            "{} must serialize to a JSON object, got {other}",
            M::TYPE
        ))),
    }
}

/// Lambda の pre-warm 用 ping。discriminator 以外は空。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {}

impl Message for Heartbeat {
    const TYPE: &'static str = "heartbeat";
}
