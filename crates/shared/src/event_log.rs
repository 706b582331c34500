//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! 送信結果を `jq` で追跡できるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。
//! JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存していること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `correspondence.idempotency_key`: 冪等キー
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const CORRESPONDENCE: &str = "correspondence";
    }

    /// イベントアクション
    pub mod action {
        pub const CORRESPONDENCE_SENT: &str = "correspondence.sent";
        pub const CORRESPONDENCE_FAILED: &str = "correspondence.failed";
        pub const CORRESPONDENCE_SEARCHED: &str = "correspondence.searched";
        pub const CORRESPONDENCE_FETCHED: &str = "correspondence.fetched";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const CORRESPONDENCE: &str = "correspondence";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（Altinn、Maskinporten）
        pub const EXTERNAL_SERVICE: &str = "external_service";
    }

    /// エラー種別
    pub mod kind {
        pub const SERVICE_COMMUNICATION: &str = "service_communication";
        pub const TOKEN_ACQUISITION: &str = "token_acquisition";
        pub const RETRY_EXHAUSTED: &str = "retry_exhausted";
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// 出力されたログを文字列として蓄積する Writer
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_business_eventでマーカーとフィールドが出力される() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_writer(move || writer.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            log_business_event!(
                event.category = event::category::CORRESPONDENCE,
                event.action = event::action::CORRESPONDENCE_SENT,
                event.result = event::result::SUCCESS,
                "送信成功"
            );
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["event.kind"], "business_event");
        assert_eq!(line["event.category"], "correspondence");
        assert_eq!(line["event.action"], "correspondence.sent");
        assert_eq!(line["event.result"], "success");
    }
}
