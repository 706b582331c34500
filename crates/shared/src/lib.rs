//! # OED 共有ユーティリティ
//!
//! correspondence クライアントの全クレートで使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, correspondence）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える

pub mod event_log;
pub mod observability;
pub mod problem_details;

pub use problem_details::ProblemDetails;
