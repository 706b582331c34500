//! # ドメイン層エラー定義
//!
//! 送信前に検出できる入力不備を表現する。
//!
//! メッセージは呼び出し元（Altinn 連携を使う業務システム）へそのまま返すため、
//! `Display` は英文のメッセージ本文のみを出力する。
//!
//! ## 使用例
//!
//! ```rust
//! use oed_domain::DomainError;
//!
//! fn require_resource_id(resource_id: Option<&str>) -> Result<&str, DomainError> {
//!     resource_id.ok_or_else(|| {
//!         DomainError::Validation("ResourceId is required.".to_string())
//!     })
//! }
//!
//! assert!(require_resource_id(None).is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須項目の欠落など、Altinn へ問い合わせる前に確定する失敗。
    #[error("{0}")]
    Validation(String),

    /// 設定値が不正
    ///
    /// 国コードの桁数など、起動時に検出すべき値の不備。
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        name:   &'static str,
        reason: String,
    },
}

impl DomainError {
    /// 呼び出し元へ返すメッセージ本文
    pub fn message(&self) -> String {
        self.to_string()
    }
}
