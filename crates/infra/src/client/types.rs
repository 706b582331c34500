//! Altinn コレスポンデンス API のリクエスト型
//!
//! JSON のフィールド名は camelCase。`None` のフィールドは送信しない。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use oed_domain::{
    correspondence::{EmailContentType, IdempotencyKey},
    notification::{NotificationChannel, NotificationTemplate, SelectedNotification},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `POST /correspondence` のリクエストボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeCorrespondencesRequest {
    pub correspondence:       BaseCorrespondence,
    pub recipients:           Vec<String>,
    pub existing_attachments: Vec<Uuid>,
    pub idempotent_key:       IdempotencyKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseCorrespondence {
    pub resource_id:               String,
    pub senders_reference:         String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_sender:            Option<String>,
    pub content:                   InitializeCorrespondenceContent,
    pub requested_publish_time:    DateTime<Utc>,
    /// この時刻を過ぎると Altinn がコレスポンデンスを削除してよい
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_system_delete_after: Option<DateTime<Utc>>,
    pub property_list:             HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification:              Option<InitializeCorrespondenceNotification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_reservation:        Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeCorrespondenceContent {
    pub language:        String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_title:   Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_body:    Option<String>,
    pub attachments:     Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeCorrespondenceNotification {
    pub notification_template: NotificationTemplate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_body:            Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_content_type:    Option<EmailContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_body:              Option<String>,
    pub send_reminder:         bool,
    pub notification_channel:  NotificationChannel,
    pub requested_send_time:   DateTime<Utc>,
}

impl From<SelectedNotification> for InitializeCorrespondenceNotification {
    fn from(selected: SelectedNotification) -> Self {
        let (email_subject, email_body, email_content_type) = match selected.email {
            Some(email) => (Some(email.subject), Some(email.body), Some(email.content_type)),
            None => (None, None, None),
        };

        Self {
            notification_template: selected.template,
            email_subject,
            email_body,
            email_content_type,
            sms_body: selected.sms_body,
            send_reminder: false,
            notification_channel: selected.channel,
            requested_send_time: selected.requested_send_time,
        }
    }
}

/// `GET /correspondence` の応答
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}
