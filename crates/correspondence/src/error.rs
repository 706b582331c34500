//! # 送信エラー
//!
//! `Outcome` ではなくエラー伝播を期待する呼び出し元向けのエラー型。

use thiserror::Error;

/// 送信失敗を表すエラー
///
/// メッセージは常に `Could not send correspondence to Altinn 3: ` で始まる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not send correspondence to Altinn 3: {reason}")]
pub struct CorrespondenceServiceError {
    reason: String,
}

/// 送信失敗メッセージの接頭辞
pub const SEND_FAILURE_PREFIX: &str = "Could not send correspondence to Altinn 3: ";

impl CorrespondenceServiceError {
    /// 失敗理由から作成する
    ///
    /// 理由がすでに接頭辞を含む場合は二重に付けない。
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let reason = match reason.strip_prefix(SEND_FAILURE_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => reason,
        };
        Self { reason }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
