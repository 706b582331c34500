//! # Altinn クライアントエラー定義
//!
//! トークン取得・HTTP 通信・応答の解釈で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`ClientError`]: エラー種別（[`ClientErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`ClientErrorKind`]: エラーの具体的な種別（Problem, Timeout, Network 等）
//!
//! `Display` の文言は送信失敗メッセージとして呼び出し元へそのまま渡るため英語で書く。
//!
//! ## リトライ対象
//!
//! [`ClientError::is_transient`] が `true` を返すのは `Timeout` と `Network` のみ。
//! HTTP ステータスによる判定は [`crate::retry`] が行う。

use std::fmt;

use derive_more::Display;
use oed_shared::ProblemDetails;
use reqwest::StatusCode;
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::{auth::TokenError, retry::is_transient_status};

/// Altinn クライアントで発生するエラー
///
/// エラー種別（[`ClientErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From` 変換や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct ClientError {
    kind:       ClientErrorKind,
    span_trace: SpanTrace,
}

/// Altinn クライアントエラーの種別
#[derive(Debug, Error)]
pub enum ClientErrorKind {
    /// Altinn が Problem Details を返した
    ///
    /// 入力不備や存在しない ID など、呼び出し元が対処すべき失敗。
    #[error("{}", .problem.message())]
    Problem {
        status:  u16,
        problem: ProblemDetails,
    },

    /// Problem Details を伴わない非成功ステータス
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// タイムアウト
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// 接続・送受信の失敗
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// アクセストークンを取得できなかった
    #[error("{0}")]
    Token(#[source] TokenError),

    /// 成功応答のボディを解釈できなかった
    #[error("could not decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// リクエストボディのシリアライズに失敗した
    #[error("could not serialize request: {0}")]
    Serialization(#[source] serde_json::Error),

    /// URL の組み立てなど、送信前に検出したリクエストの不備
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// ===== ClientError のメソッド =====

impl ClientError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &ClientErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ClientError を分解して ClientErrorKind と SpanTrace を取り出す
    pub fn into_parts(self) -> (ClientErrorKind, SpanTrace) {
        (self.kind, self.span_trace)
    }

    /// 再試行で回復しうる失敗か
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ClientErrorKind::Timeout(_) | ClientErrorKind::Network(_)
        )
    }

    /// Problem Details を伴う失敗なら、その内容を返す
    pub fn as_problem(&self) -> Option<&ProblemDetails> {
        match &self.kind {
            ClientErrorKind::Problem { problem, .. } => Some(problem),
            _ => None,
        }
    }

    /// 応答の HTTP ステータス（応答を受け取れた場合のみ）
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ClientErrorKind::Problem { status, .. }
            | ClientErrorKind::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 再試行対象のステータス（408 / 429 / 5xx）の応答による失敗か
    ///
    /// リトライを使い切った後に残る失敗はこれに当たる。
    pub fn has_transient_status(&self) -> bool {
        self.status()
            .and_then(|status| StatusCode::from_u16(status).ok())
            .is_some_and(is_transient_status)
    }

    // ===== Convenience constructors =====

    fn capture(kind: ClientErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Problem Details エラーを生成する
    pub fn problem(status: u16, problem: ProblemDetails) -> Self {
        Self::capture(ClientErrorKind::Problem { status, problem })
    }

    /// 想定外ステータスのエラーを生成する
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::capture(ClientErrorKind::UnexpectedStatus {
            status,
            body: body.into(),
        })
    }

    /// 応答ボディの解釈エラーを生成する
    pub fn decode(source: serde_json::Error) -> Self {
        Self::capture(ClientErrorKind::Decode(source))
    }

    /// リクエスト不備のエラーを生成する
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::capture(ClientErrorKind::InvalidRequest(msg.into()))
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        let kind = if source.is_timeout() {
            ClientErrorKind::Timeout(source)
        } else if source.is_builder() {
            ClientErrorKind::InvalidRequest(source.to_string())
        } else {
            ClientErrorKind::Network(source)
        };
        Self::capture(kind)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(source: serde_json::Error) -> Self {
        Self::capture(ClientErrorKind::Serialization(source))
    }
}

impl From<TokenError> for ClientError {
    fn from(source: TokenError) -> Self {
        Self::capture(ClientErrorKind::Token(source))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(source: url::ParseError) -> Self {
        Self::capture(ClientErrorKind::InvalidRequest(source.to_string()))
    }
}
