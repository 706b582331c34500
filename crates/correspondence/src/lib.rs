//! # OED correspondence
//!
//! Altinn 3 のコレスポンデンス（デジタル郵便）を送信・検索・取得するクライアントライブラリ。
//!
//! ## 使用例
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use oed_correspondence::{CorrespondenceConfig, CorrespondenceService};
//! use oed_domain::correspondence::CorrespondenceDetails;
//! use oed_infra::StaticAccessTokenProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CorrespondenceConfig::load()?;
//! let tokens = Arc::new(StaticAccessTokenProvider::new("eyJhbGciOi..."));
//! let service = CorrespondenceService::from_config(&config, tokens)?;
//!
//! let details = CorrespondenceDetails {
//!     recipient: Some("01010112345".to_string()),
//!     title: Some("Skifteattest".to_string()),
//!     ..CorrespondenceDetails::default()
//! };
//! let outcome = service.send(&details).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`usecase`] - 送信・検索・取得のハンドラ
//! - [`service`] - ハンドラをまとめたサービス
//! - [`error`] - エラー伝播用の送信エラー

pub mod config;
pub mod error;
pub mod service;
pub mod usecase;

pub use config::{ApiEnvironment, ConfigError, CorrespondenceConfig};
pub use error::CorrespondenceServiceError;
#[cfg(feature = "observability")]
pub use oed_shared::observability;
pub use service::CorrespondenceService;
