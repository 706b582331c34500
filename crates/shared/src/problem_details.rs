//! # Problem Details（RFC 9457）
//!
//! Altinn が業務エラー・バリデーションエラー時に返すエラーボディを表現する。
//!
//! ## 設計
//!
//! - 受信専用のデータ構造。Altinn はフィールドを省略することがあるため、すべて `Option`
//! - `errors` などの拡張メンバーは `extensions` にそのまま保持する
//! - 人間向けメッセージは [`ProblemDetails::message`] で一箇所に集約する

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title:        Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status:       Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail:       Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance:     Option<String>,
    /// 拡張メンバー（`errors`、`traceId` など）
    #[serde(flatten)]
    pub extensions:   BTreeMap<String, serde_json::Value>,
}

impl ProblemDetails {
    /// ステータスと詳細メッセージから作成する
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            status: Some(status),
            detail: Some(detail.into()),
            ..Self::default()
        }
    }

    /// JSON ボディから Problem Details を読み取る
    ///
    /// `title` / `detail` / `status` のいずれも持たないオブジェクトは
    /// Problem Details とみなさず `None` を返す。
    pub fn parse(body: &str) -> Option<Self> {
        let problem: Self = serde_json::from_str(body).ok()?;
        if problem.title.is_none() && problem.detail.is_none() && problem.status.is_none() {
            return None;
        }
        Some(problem)
    }

    /// 呼び出し元に返す人間向けメッセージ
    ///
    /// `detail` → `title` → ステータスコードの順にフォールバックし、空文字は返さない。
    pub fn message(&self) -> String {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.trim().is_empty())
        }

        if let Some(detail) = non_empty(&self.detail) {
            return detail.to_string();
        }
        if let Some(title) = non_empty(&self.title) {
            return title.to_string();
        }
        match self.status {
            Some(status) => format!("Request failed with status {status}"),
            None => "Request failed".to_string(),
        }
    }
}
