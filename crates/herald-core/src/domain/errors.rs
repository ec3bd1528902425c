//! Errors - エラー型と分類
//!
//! 失敗はすべて呼び出し元へ同期的に返します（ログ出力は追加情報であって、
//! 伝播の代わりにはなりません）。
//!
//! # 分類
//! - **CodecError**: シリアライズ / デシリアライズの失敗
//! - **DispatchError**: 型付きディスパッチの失敗（Decode / Encode / ルーティング）
//! - **TransportError**: 配送先（SNS topic / SQS queue）の失敗
//! - **MessagingError**: クライアント層でのまとめ（Dispatch | Transport）
//!
//! ページソースのエラーは型パラメータ `E` のまま、そのまま伝播します。

use thiserror::Error;

/// ErrorKind はエラーの運用分類
///
/// - Transient: 一時的なエラー（リトライで回復しうる）
/// - Permanent: 恒久的なエラー（同じ入力で何度試しても失敗する）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
}

/// CodecError は Codec の失敗
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// DispatchError は型付きディスパッチの失敗
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 受信ペイロードを対象の型にデコードできなかった
    #[error("could not parse message payload: {0}")]
    Decode(#[source] CodecError),

    /// 送信する値をシリアライズできなかった
    #[error("could not serialize message payload: {0}")]
    Encode(#[source] CodecError),

    /// ペイロードに discriminator フィールドが無い
    #[error("message payload has no '{0}' discriminator")]
    MissingDiscriminator(String),

    /// discriminator の値に対応する handler が登録されていない
    #[error("no handler registered for message type '{0}'")]
    NoHandler(String),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Permanent
    }
}

/// TransportError は配送先の失敗
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("destination not found: {0}")]
    DestinationNotFound(String),

    #[error("transport failed: {0}")]
    Failed(String),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DestinationNotFound(_) => ErrorKind::Permanent,
            Self::Failed(_) => ErrorKind::Transient,
        }
    }
}

/// MessagingError は TopicClient / QueueClient の失敗
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl MessagingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Dispatch(error) => error.kind(),
            Self::Transport(error) => error.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_error_wraps_codec_error() {
        let cause = serde_json::from_str::<i32>("not json").unwrap_err();
        let error = DispatchError::Decode(CodecError::from(cause));

        assert!(error.to_string().starts_with("could not parse message payload"));
        assert!(error.source().is_some());
    }

    #[test]
    fn messaging_error_kinds() {
        let dispatch = MessagingError::from(DispatchError::NoHandler("x".to_string()));
        let missing = MessagingError::from(TransportError::DestinationNotFound("q".to_string()));
        let failed = MessagingError::from(TransportError::Failed("timeout".to_string()));

        assert_eq!(dispatch.kind(), ErrorKind::Permanent);
        assert_eq!(missing.kind(), ErrorKind::Permanent);
        assert_eq!(failed.kind(), ErrorKind::Transient);
    }
}
