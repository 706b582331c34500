//! # リトライポリシー
//!
//! 一時的な失敗だけを指数バックオフで再試行する。
//!
//! | 結果 | 再試行 |
//! |------|--------|
//! | 408 / 429 / 5xx | する |
//! | タイムアウト・接続失敗 | する |
//! | その他の 4xx | しない |
//! | トークン取得失敗・リクエスト不備 | しない |
//!
//! 既定値は初回 + 最大 3 回の再試行で、待機時間は 2 秒 → 4 秒 → 8 秒。
//! 上限に達したら最後の結果（応答またはエラー）をそのまま返し、解釈は呼び出し側に任せる。

use std::{future::Future, time::Duration};

use oed_shared::event_log::error::{category, kind};
use reqwest::StatusCode;

use crate::error::ClientError;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// 再試行すべき HTTP ステータスか
pub fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

/// 試行結果の分類
pub trait RetryClassify {
    /// 再試行で回復しうる結果か
    fn is_transient(&self) -> bool;

    /// ログ出力用の要約
    fn describe(&self) -> String;
}

impl RetryClassify for Result<reqwest::Response, ClientError> {
    fn is_transient(&self) -> bool {
        match self {
            Ok(response) => is_transient_status(response.status()),
            Err(err) => err.is_transient(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Ok(response) => format!("status {}", response.status().as_u16()),
            Err(err) => err.to_string(),
        }
    }
}

/// 指数バックオフ付きリトライポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries:  u32,
    backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries:  DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
        }
    }

    /// 再試行しないポリシー
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// n 回目（1 始まり）の再試行前の待機時間: `base × 2^n`
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(retry))
    }

    /// 試行を実行し、一時的な失敗なら待機して再試行する
    ///
    /// `attempt` には 0 始まりの試行番号が渡される。試行は必ず直列に実行する。
    /// 返された Future を drop すると、実行中の試行または待機ごと中断される。
    pub async fn execute<T, F, Fut>(&self, mut attempt: F) -> T
    where
        T: RetryClassify,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = T>,
    {
        let mut retry = 0;
        loop {
            let outcome = attempt(retry).await;

            if !outcome.is_transient() {
                return outcome;
            }

            if retry == self.max_retries {
                tracing::error!(
                    error.category = category::EXTERNAL_SERVICE,
                    error.kind = kind::RETRY_EXHAUSTED,
                    attempts = retry + 1,
                    last_outcome = %outcome.describe(),
                    "リトライ上限に達したため最後の結果を返す"
                );
                return outcome;
            }

            retry += 1;
            let delay = self.delay_for(retry);
            tracing::warn!(
                retry,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                reason = %outcome.describe(),
                "一時的な失敗のため再試行する"
            );
            drop(outcome);
            tokio::time::sleep(delay).await;
        }
    }
}
