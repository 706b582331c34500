//! # ユースケース層
//!
//! 送信・検索・取得の各ハンドラを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: API クライアントを `Arc<dyn CorrespondenceClient>` で外部から注入
//! - **Result の一貫性**: 想定内の失敗は `Outcome::Failure` で返し、エラー伝播しない
//!
//! ## モジュール構成
//!
//! - `send`: コレスポンデンス送信
//! - `request_builder`: 送信リクエストの組み立て
//! - `search`: コレスポンデンス検索
//! - `get`: コレスポンデンス取得

pub mod get;
pub mod request_builder;
pub mod search;
pub mod send;

pub use get::GetHandler;
pub use request_builder::{BuiltRequest, LANGUAGE_CODE, RequestBuilder};
pub use search::SearchHandler;
pub use send::SendHandler;
