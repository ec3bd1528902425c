//! Codec - 型付きの値とシリアライズされた文字列の相互変換
//!
//! # 学習ポイント
//! - ジェネリックメソッドを持つ trait（object-safe ではないので型パラメータで受け取る）
//! - グローバルな設定の代わりに、設定値をコンストラクタで渡す

use crate::domain::errors::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Codec は encode / decode の純粋関数ペア
///
/// 状態を持たないので、同じ Codec を複数スレッドから共有できます。
pub trait Codec: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError>;

    fn decode<T: DeserializeOwned>(&self, payload: &str) -> Result<T, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        (**self).encode(value)
    }

    fn decode<T: DeserializeOwned>(&self, payload: &str) -> Result<T, CodecError> {
        (**self).decode(payload)
    }
}

/// JsonCodec は serde_json による Codec
///
/// # 使用例
/// ```ignore
/// let codec = JsonCodec::compact();
/// let payload = codec.encode(&44)?;
/// assert_eq!(payload, "44");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// 1 行の JSON を出力（メッセージ送信のデフォルト）
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// インデント付きの JSON を出力
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CodecError> {
        let payload = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(payload)
    }

    fn decode<T: DeserializeOwned>(&self, payload: &str) -> Result<T, CodecError> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: String,
        quantity: u32,
    }

    #[test]
    fn decode_reverses_encode() {
        let codec = JsonCodec::compact();
        let order = Order {
            id: "abc".to_string(),
            quantity: 3,
        };

        let payload = codec.encode(&order).unwrap();
        let decoded: Order = codec.decode(&payload).unwrap();

        assert_eq!(payload, r#"{"id":"abc","quantity":3}"#);
        assert_eq!(decoded, order);
    }

    #[test]
    fn pretty_codec_indents_output() {
        let payload = JsonCodec::pretty().encode(&vec![1, 2]).unwrap();
        assert_eq!(payload, "[\n  1,\n  2\n]");
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let result: Result<Order, _> = JsonCodec::compact().decode("not json");
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn encode_rejects_non_string_map_keys() {
        let mut value = HashMap::new();
        value.insert((1, 2), "pair");

        let result = JsonCodec::compact().encode(&value);
        assert!(matches!(result, Err(CodecError::Json(_))));
    }
}
