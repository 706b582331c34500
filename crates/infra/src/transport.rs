//! # 認証付きトランスポート
//!
//! 送信内容を一度だけ組み立てた [`PreparedRequest`] を、
//! 試行ごとに新しい Bearer トークンを付けて送る。
//!
//! ```text
//! PreparedRequest ──▶ RetryPolicy ──▶ attempt ──▶ access_token() ──▶ reqwest
//!                        ▲                                          │
//!                        └──────────── 408 / 429 / 5xx ◀────────────┘
//! ```

use std::sync::Arc;

use bytes::Bytes;
use reqwest::{
    Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Serialize;
use url::Url;

use crate::{auth::AccessTokenProvider, error::ClientError, retry::RetryPolicy};

/// 送信準備済みのリクエスト
///
/// ボディはシリアライズ済みのバイト列で保持し、再試行では同じバイト列を再送する。
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    method: Method,
    url:    Url,
    body:   Option<Bytes>,
}

impl PreparedRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    /// JSON ボディ付きの POST を組み立てる
    pub fn post_json<B: Serialize + ?Sized>(url: Url, body: &B) -> Result<Self, ClientError> {
        let bytes = serde_json::to_vec(body)?;
        Ok(Self {
            method: Method::POST,
            url,
            body: Some(Bytes::from(bytes)),
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// 試行ごとにトークンを付与して送信するトランスポート
#[derive(Clone)]
pub struct AuthenticatingTransport {
    http:   reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
    retry:  RetryPolicy,
}

impl AuthenticatingTransport {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn AccessTokenProvider>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            tokens,
            retry,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// リトライポリシーに従ってリクエストを送信する
    ///
    /// 再試行を使い切った場合は最後の応答（5xx など）またはエラーを返す。
    pub async fn send(&self, request: &PreparedRequest) -> Result<reqwest::Response, ClientError> {
        self.retry.execute(move |_| self.attempt(request)).await
    }

    async fn attempt(&self, request: &PreparedRequest) -> Result<reqwest::Response, ClientError> {
        let token = self.tokens.access_token().await?;

        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        tracing::debug!(method = %request.method, url = %request.url, "Altinn へリクエストを送信");
        Ok(builder.send().await?)
    }
}
