//! # OED correspondence ドメイン層
//!
//! Altinn 3 へ送るコレスポンデンス（デジタル郵便）と、その送信結果を表すドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! correspondence → infra → domain
//!        ↘                    ↑
//!          ───────────────────
//! ```
//!
//! ドメイン層は HTTP やトークン取得に一切依存しない。
//! 受信者の正規化・通知チャネルの選択といった純粋なルールはすべてここに置く。
//!
//! ## モジュール構成
//!
//! - [`correspondence`] - 送信入力（`CorrespondenceDetails`）と冪等キー
//! - [`recipient`] - 受信者識別子の正規化戦略
//! - [`notification`] - 通知チャネルの選択
//! - [`outcome`] - 成功 / 失敗の結果型
//! - [`receipt`] - 送信受領（Altinn の応答）
//! - [`search`] - 検索条件
//! - [`overview`] - コレスポンデンス詳細
//! - [`product_line`] - DD / OED の製品ライン別の既定値
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー

#[macro_use]
mod macros;

pub mod clock;
pub mod correspondence;
pub mod error;
pub mod notification;
pub mod outcome;
pub mod overview;
pub mod product_line;
pub mod receipt;
pub mod recipient;
pub mod search;

pub use error::DomainError;
pub use outcome::Outcome;
