//! # コレスポンデンス送信入力
//!
//! 呼び出し元が組み立てる送信内容と、その送信を一意に識別する冪等キーを定義する。
//!
//! ## 冪等キー
//!
//! [`CorrespondenceDetails`] を構築した時点で [`IdempotencyKey`] が確定する。
//! 送信パイプラインは `&CorrespondenceDetails` しか受け取らないため、
//! リトライや同じ値の再送信でもキーと送信者参照は変わらない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// 送信の冪等キー
    ///
    /// Altinn はこのキーが一致する送信を重複として扱う。
    pub struct IdempotencyKey;
}

define_uuid_id! {
    /// Altinn が払い出すコレスポンデンス ID
    pub struct CorrespondenceId;
}

/// メール通知本文の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmailContentType {
    #[default]
    Plain,
    Html,
}

/// 通知内容（メール / SMS）
///
/// どのフィールドも省略できる。どのチャネルで通知するかは
/// [`crate::notification::select_notification`] が判定する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationDetails {
    pub email_subject:      Option<String>,
    pub email_body:         Option<String>,
    pub email_content_type: EmailContentType,
    pub sms_text:           Option<String>,
}

/// コレスポンデンス送信入力
///
/// # 使用例
///
/// ```rust
/// use oed_domain::correspondence::CorrespondenceDetails;
///
/// let details = CorrespondenceDetails {
///     recipient: Some("01010112345".to_string()),
///     title: Some("Skifteattest".to_string()),
///     ..CorrespondenceDetails::default()
/// };
///
/// let again = details.clone();
/// assert_eq!(details.idempotency_key, again.idempotency_key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrespondenceDetails {
    /// 組織番号・個人番号、または整形済みの URN
    pub recipient:          Option<String>,
    pub title:              Option<String>,
    pub summary:            Option<String>,
    pub body:               Option<String>,
    /// 受信箱に組織名の代わりに表示する送信者名
    pub sender:             Option<String>,
    /// 受信者に公開する時刻（未指定なら送信時点）
    pub visible_date_time:  Option<DateTime<Utc>>,
    /// 通知を送る時刻（未指定なら送信時点）
    pub shipment_date_time: Option<DateTime<Utc>>,
    pub notification:       Option<NotificationDetails>,
    /// Altinn 2 インターフェースとの互換用。Altinn 3 には送信しない
    pub allow_forwarding:   bool,
    /// KRR の予約を無視するか（未指定なら設定値）
    pub ignore_reservation: Option<bool>,
    pub idempotency_key:    IdempotencyKey,
    /// 送信者参照（未指定なら冪等キーから導出）
    pub senders_reference:  Option<String>,
}

impl Default for CorrespondenceDetails {
    fn default() -> Self {
        Self {
            recipient:          None,
            title:              None,
            summary:            None,
            body:               None,
            sender:             None,
            visible_date_time:  None,
            shipment_date_time: None,
            notification:       None,
            allow_forwarding:   false,
            ignore_reservation: None,
            idempotency_key:    IdempotencyKey::new(),
            senders_reference:  None,
        }
    }
}

impl CorrespondenceDetails {
    /// 送信者参照を解決する
    ///
    /// 呼び出し元が指定していればそれを、なければ `{prefix}{冪等キー}` を返す。
    pub fn resolve_senders_reference(&self, prefix: &str) -> String {
        match &self.senders_reference {
            Some(reference) => reference.clone(),
            None => format!("{prefix}{}", self.idempotency_key),
        }
    }
}
