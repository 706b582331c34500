//! # OED correspondence インフラ層
//!
//! Altinn 3 コレスポンデンス API との通信を担当する。
//!
//! ## 責務
//!
//! - **トークン取得**: [`auth::AccessTokenProvider`] による Bearer トークンの取得
//! - **リトライ**: [`retry::RetryPolicy`] による一時的な失敗の再試行
//! - **送信**: [`transport::AuthenticatingTransport`] による試行ごとのトークン付与
//! - **API クライアント**: [`client::CorrespondenceClient`] による送信・検索・取得
//!
//! ## 依存関係
//!
//! ```text
//! correspondence → infra → domain
//!                    ↘
//!                     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`auth`] - アクセストークンプロバイダ
//! - [`client`] - API クライアントとリクエスト型
//! - [`error`] - クライアントエラー定義
//! - [`retry`] - リトライポリシー
//! - [`transport`] - 認証付きトランスポート

pub mod auth;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod retry;
pub mod transport;

pub use auth::{AccessTokenProvider, StaticAccessTokenProvider};
pub use client::{AltinnCorrespondenceClient, CorrespondenceClient};
pub use error::{ClientError, ClientErrorKind};
pub use retry::RetryPolicy;
