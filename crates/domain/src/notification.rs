//! # 通知チャネルの選択
//!
//! [`NotificationDetails`] のうち実際に中身があるフィールドから、
//! Altinn に依頼する通知（メール / SMS / 両方）を決める。
//!
//! ## ルール
//!
//! - メールは件名と本文の両方が空でないときだけ有効
//! - SMS は本文が空でないときだけ有効
//! - どちらも無効なら通知しない（`NotificationDetails` 自体が渡されていても）
//! - テンプレートは常に `CustomMessage`、送信時刻の既定値は現在時刻

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::correspondence::{EmailContentType, NotificationDetails};

/// 通知テンプレート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationTemplate {
    CustomMessage,
    GenericAltinnMessage,
}

/// 通知チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationChannel {
    Email,
    Sms,
    EmailPreferred,
    SmsPreferred,
    EmailAndSms,
}

/// メール通知の内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject:      String,
    pub body:         String,
    pub content_type: EmailContentType,
}

/// 選択済みの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedNotification {
    pub template:            NotificationTemplate,
    pub channel:             NotificationChannel,
    pub email:               Option<EmailContent>,
    pub sms_body:            Option<String>,
    pub requested_send_time: DateTime<Utc>,
}

/// 通知内容と送信時刻から、依頼する通知を選ぶ
///
/// 通知しない場合は `None` を返す。
pub fn select_notification(
    details: Option<&NotificationDetails>,
    send_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<SelectedNotification> {
    let details = details?;

    let email = match (non_empty(&details.email_subject), non_empty(&details.email_body)) {
        (Some(subject), Some(body)) => Some(EmailContent {
            subject:      subject.to_string(),
            body:         body.to_string(),
            content_type: details.email_content_type,
        }),
        _ => None,
    };
    let sms_body = non_empty(&details.sms_text).map(str::to_string);

    let channel = match (&email, &sms_body) {
        (Some(_), Some(_)) => NotificationChannel::EmailAndSms,
        (Some(_), None) => NotificationChannel::Email,
        (None, Some(_)) => NotificationChannel::Sms,
        (None, None) => return None,
    };

    Some(SelectedNotification {
        template: NotificationTemplate::CustomMessage,
        channel,
        email,
        sms_body,
        requested_send_time: send_time.unwrap_or(now),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn details(subject: &str, body: &str, sms: &str) -> NotificationDetails {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        NotificationDetails {
            email_subject:      opt(subject),
            email_body:         opt(body),
            email_content_type: EmailContentType::Plain,
            sms_text:           opt(sms),
        }
    }

    #[rstest]
    #[case::メールのみ("Emne", "Innhold", "", NotificationChannel::Email)]
    #[case::smsのみ("", "", "Du har fått post", NotificationChannel::Sms)]
    #[case::両方("Emne", "Innhold", "Du har fått post", NotificationChannel::EmailAndSms)]
    #[case::件名のみのメールはsmsにフォールバック("Emne", "", "Du har fått post", NotificationChannel::Sms)]
    fn test_有効なフィールドからチャネルを選ぶ(
        now: DateTime<Utc>,
        #[case] subject: &str,
        #[case] body: &str,
        #[case] sms: &str,
        #[case] expected: NotificationChannel,
    ) {
        let selected = select_notification(Some(&details(subject, body, sms)), None, now).unwrap();

        assert_eq!(selected.channel, expected);
        assert_eq!(selected.template, NotificationTemplate::CustomMessage);
    }

    #[rstest]
    #[case::すべて空("", "", "")]
    #[case::件名のみ("Emne", "", "")]
    #[case::本文のみ("", "Innhold", "")]
    fn test_有効なチャネルがなければ通知しない(
        now: DateTime<Utc>,
        #[case] subject: &str,
        #[case] body: &str,
        #[case] sms: &str,
    ) {
        assert_eq!(select_notification(Some(&details(subject, body, sms)), None, now), None);
    }

    #[rstest]
    fn test_通知内容がなければ通知しない(now: DateTime<Utc>) {
        assert_eq!(select_notification(None, None, now), None);
    }

    #[rstest]
    fn test_空文字のフィールドは未指定と同じに扱う(now: DateTime<Utc>) {
        let details = NotificationDetails {
            email_subject: Some(String::new()),
            email_body: Some(String::new()),
            sms_text: Some(String::new()),
            ..NotificationDetails::default()
        };

        assert_eq!(select_notification(Some(&details), None, now), None);
    }

    #[rstest]
    fn test_メール通知は形式と本文を引き継ぐ(now: DateTime<Utc>) {
        let details = NotificationDetails {
            email_content_type: EmailContentType::Html,
            ..details("Emne", "<p>Innhold</p>", "")
        };

        let selected = select_notification(Some(&details), None, now).unwrap();

        assert_eq!(
            selected.email,
            Some(EmailContent {
                subject:      "Emne".to_string(),
                body:         "<p>Innhold</p>".to_string(),
                content_type: EmailContentType::Html,
            })
        );
        assert_eq!(selected.sms_body, None);
    }

    #[rstest]
    fn test_送信時刻の既定値は現在時刻(now: DateTime<Utc>) {
        let selected = select_notification(Some(&details("", "", "sms")), None, now).unwrap();

        assert_eq!(selected.requested_send_time, now);
    }

    #[rstest]
    fn test_指定された送信時刻を使う(now: DateTime<Utc>) {
        let shipment = Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap();

        let selected =
            select_notification(Some(&details("", "", "sms")), Some(shipment), now).unwrap();

        assert_eq!(selected.requested_send_time, shipment);
    }
}
