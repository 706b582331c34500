//! 送信リクエストの組み立て

use std::{collections::HashMap, sync::Arc};

use chrono::Months;

use oed_domain::{
    clock::Clock,
    correspondence::CorrespondenceDetails,
    notification::select_notification,
    recipient::RecipientFormatter,
};
use oed_infra::client::types::{
    BaseCorrespondence,
    InitializeCorrespondenceContent,
    InitializeCorrespondenceNotification,
    InitializeCorrespondencesRequest,
};

use crate::config::CorrespondenceConfig;

/// 公開からシステム削除を許可するまでの期間
const RETENTION: Months = Months::new(12);

/// コレスポンデンス本文の言語コード
pub const LANGUAGE_CODE: &str = "nb";

/// 組み立て済みの送信リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub request:           InitializeCorrespondencesRequest,
    pub senders_reference: String,
}

/// 送信入力と設定から `InitializeCorrespondencesRequest` を組み立てる
///
/// 入力は借用するだけで変更しない。同じ入力からは（時刻の既定値を除き）同じリクエストができる。
pub struct RequestBuilder {
    resource_id:              String,
    default_sender:           Option<String>,
    formatter:                RecipientFormatter,
    senders_reference_prefix: &'static str,
    ignore_reservation:       bool,
    clock:                    Arc<dyn Clock>,
}

impl RequestBuilder {
    pub fn new(config: &CorrespondenceConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            resource_id: config.resource_id.clone(),
            default_sender: config.default_sender.clone(),
            formatter: config.recipient_formatter(),
            senders_reference_prefix: config.product_line.senders_reference_prefix(),
            ignore_reservation: config.ignore_reservation,
            clock,
        }
    }

    pub fn build(&self, details: &CorrespondenceDetails) -> BuiltRequest {
        let now = self.clock.now();
        let senders_reference = details.resolve_senders_reference(self.senders_reference_prefix);

        let notification = select_notification(
            details.notification.as_ref(),
            details.shipment_date_time,
            now,
        )
        .map(InitializeCorrespondenceNotification::from);

        let publish_time = details.visible_date_time.unwrap_or(now);

        let recipient = self
            .formatter
            .format(details.recipient.as_deref().unwrap_or_default());

        let request = InitializeCorrespondencesRequest {
            correspondence:       BaseCorrespondence {
                resource_id: self.resource_id.clone(),
                senders_reference: senders_reference.clone(),
                message_sender: details.sender.clone().or_else(|| self.default_sender.clone()),
                content: InitializeCorrespondenceContent {
                    language:        LANGUAGE_CODE.to_string(),
                    message_title:   details.title.clone(),
                    message_summary: details.summary.clone(),
                    message_body:    details.body.clone(),
                    attachments:     Vec::new(),
                },
                requested_publish_time: publish_time,
                allow_system_delete_after: publish_time.checked_add_months(RETENTION),
                property_list: HashMap::new(),
                notification,
                ignore_reservation: Some(
                    details.ignore_reservation.unwrap_or(self.ignore_reservation),
                ),
            },
            recipients:           vec![recipient],
            existing_attachments: Vec::new(),
            idempotent_key:       details.idempotency_key,
        };

        BuiltRequest {
            request,
            senders_reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use oed_domain::{
        clock::FixedClock,
        correspondence::{EmailContentType, NotificationDetails},
        notification::NotificationChannel,
        product_line::ProductLine,
    };
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::test_config;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[fixture]
    fn builder() -> RequestBuilder {
        RequestBuilder::new(&test_config(), Arc::new(FixedClock::new(now())))
    }

    #[rstest]
    fn test_設定と入力からリクエストを組み立てる(builder: RequestBuilder) {
        let details = CorrespondenceDetails {
            recipient: Some("123456785".to_string()),
            title: Some("Skifteattest".to_string()),
            summary: Some("Oppsummering".to_string()),
            body: Some("Innhold".to_string()),
            ..CorrespondenceDetails::default()
        };

        let built = builder.build(&details);

        let json = serde_json::to_value(&built.request).unwrap();
        let expected_reference = format!("EXT_DD_SHIP_{}", details.idempotency_key);
        assert_eq!(
            json,
            serde_json::json!({
                "correspondence": {
                    "resourceId": "test-resource-id",
                    "sendersReference": expected_reference,
                    "messageSender": "Digitalt dødsbo",
                    "content": {
                        "language": "nb",
                        "messageTitle": "Skifteattest",
                        "messageSummary": "Oppsummering",
                        "messageBody": "Innhold",
                        "attachments": []
                    },
                    "requestedPublishTime": "2026-01-15T12:00:00Z",
                    "allowSystemDeleteAfter": "2027-01-15T12:00:00Z",
                    "propertyList": {},
                    "ignoreReservation": true
                },
                "recipients": ["0192:123456785"],
                "existingAttachments": [],
                "idempotentKey": details.idempotency_key.to_string()
            })
        );
        assert_eq!(built.senders_reference, expected_reference);
    }

    #[rstest]
    fn test_同じ入力からは同じ冪等キーと送信者参照ができる(builder: RequestBuilder) {
        let details = CorrespondenceDetails::default();

        let first = builder.build(&details);
        let second = builder.build(&details);

        assert_eq!(first, second);
        assert_eq!(first.request.idempotent_key, details.idempotency_key);
    }

    #[rstest]
    fn test_受信者が未指定なら空文字を1件送る(builder: RequestBuilder) {
        let built = builder.build(&CorrespondenceDetails::default());

        assert_eq!(built.request.recipients, vec![String::new()]);
    }

    #[rstest]
    fn test_入力の値が設定の既定値より優先される(builder: RequestBuilder) {
        let visible = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let details = CorrespondenceDetails {
            sender: Some("Tingretten".to_string()),
            visible_date_time: Some(visible),
            ignore_reservation: Some(false),
            senders_reference: Some("case-42".to_string()),
            ..CorrespondenceDetails::default()
        };

        let built = builder.build(&details);

        let correspondence = &built.request.correspondence;
        assert_eq!(correspondence.message_sender.as_deref(), Some("Tingretten"));
        assert_eq!(correspondence.requested_publish_time, visible);
        assert_eq!(
            correspondence.allow_system_delete_after,
            Some(Utc.with_ymd_and_hms(2027, 3, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(correspondence.ignore_reservation, Some(false));
        assert_eq!(correspondence.senders_reference, "case-42");
        assert_eq!(built.senders_reference, "case-42");
    }

    #[rstest]
    fn test_通知内容からメール通知を組み立てる(builder: RequestBuilder) {
        let shipment = Utc.with_ymd_and_hms(2026, 1, 16, 7, 0, 0).unwrap();
        let details = CorrespondenceDetails {
            shipment_date_time: Some(shipment),
            notification: Some(NotificationDetails {
                email_subject:      Some("Emne".to_string()),
                email_body:         Some("Innhold".to_string()),
                email_content_type: EmailContentType::Plain,
                sms_text:           None,
            }),
            ..CorrespondenceDetails::default()
        };

        let built = builder.build(&details);

        let notification = built.request.correspondence.notification.unwrap();
        assert_eq!(notification.notification_channel, NotificationChannel::Email);
        assert_eq!(notification.requested_send_time, shipment);
        assert_eq!(notification.sms_body, None);
    }

    #[rstest]
    fn test_空の通知内容では通知を送らない(builder: RequestBuilder) {
        let details = CorrespondenceDetails {
            notification: Some(NotificationDetails::default()),
            ..CorrespondenceDetails::default()
        };

        assert_eq!(builder.build(&details).request.correspondence.notification, None);
    }

    #[test]
    fn test_oed製品ラインは個人番号をurnにしてoedの接頭辞を使う() {
        let config = CorrespondenceConfig {
            product_line: ProductLine::Oed,
            ..test_config()
        };
        let builder = RequestBuilder::new(&config, Arc::new(FixedClock::new(now())));
        let details = CorrespondenceDetails {
            recipient: Some("01010112345".to_string()),
            ..CorrespondenceDetails::default()
        };

        let built = builder.build(&details);

        assert_eq!(
            built.request.recipients,
            vec!["urn:altinn:person:identifier-no:01010112345".to_string()]
        );
        assert!(built.senders_reference.starts_with("EXT_OED_SHIP_"));
    }
}
