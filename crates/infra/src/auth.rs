//! # アクセストークン取得
//!
//! Altinn への各リクエストに付ける Bearer トークンの取得を抽象化する。
//!
//! トークンの発行・キャッシュ・更新は [`AccessTokenProvider`] の実装側の責務。
//! このクレートは試行のたびに `access_token()` を呼ぶだけで、値を保持しない。

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Altinn コレスポンデンス API の送信に必要なスコープ
pub const CORRESPONDENCE_SCOPE: &str = "altinn:serviceowner altinn:correspondence.write";

/// トークン取得エラー
#[derive(Debug, Error)]
#[error("could not acquire access token: {message}")]
pub struct TokenError {
    message: String,
    #[source]
    source:  Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TokenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source:  None,
        }
    }

    /// 下位エラーを原因として保持する
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source:  Some(Box::new(source)),
        }
    }
}

/// アクセストークンプロバイダ
///
/// Maskinporten クライアントなど、外部のトークン発行元をこのトレイトで包む。
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// 現在有効なアクセストークンを返す
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// 発行済みトークンをそのまま返すプロバイダ
///
/// 外部で取得したトークンを使う場合やテスト用。
#[derive(Clone)]
pub struct StaticAccessTokenProvider {
    token: String,
}

impl StaticAccessTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticAccessTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAccessTokenProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        if self.token.is_empty() {
            return Err(TokenError::new("static token is empty"));
        }
        Ok(self.token.clone())
    }
}

/// Maskinporten クライアント設定
///
/// トークンプロバイダを組み立てるための値。スコープは [`CORRESPONDENCE_SCOPE`] 固定。
#[derive(Clone)]
pub struct MaskinportenSettings {
    pub client_id:   String,
    pub environment: String,
    /// Base64 エンコード済みの JWK
    pub encoded_jwk: Option<String>,
}

impl MaskinportenSettings {
    pub fn scope(&self) -> &'static str {
        CORRESPONDENCE_SCOPE
    }
}

impl fmt::Debug for MaskinportenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskinportenSettings")
            .field("client_id", &self.client_id)
            .field("environment", &self.environment)
            .field(
                "encoded_jwk",
                &self.encoded_jwk.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
