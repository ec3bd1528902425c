use thiserror::Error;

/// テキスト処理のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("no handler for format \"{0}\" registered")]
    UnknownFormat(String),

    /// 利用者が登録した `Format` の失敗
    #[error("{format} transformation failed: {reason}")]
    Transform { format: String, reason: String },
}

impl TextError {
    pub fn transform(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transform {
            format: format.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_names_the_format() {
        let err = TextError::UnknownFormat("markdown".to_string());
        assert_eq!(err.to_string(), "no handler for format \"markdown\" registered");
    }

    #[test]
    fn transform_error_carries_reason() {
        let err = TextError::transform("rst", "unterminated directive");
        assert_eq!(err.to_string(), "rst transformation failed: unterminated directive");
    }
}
