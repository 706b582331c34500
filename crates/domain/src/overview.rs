//! # コレスポンデンス詳細
//!
//! `GET /correspondence/{id}` が返す詳細レコード。
//! Altinn が省略しうるフィールドは `Option` または `#[serde(default)]` で受ける。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{correspondence::CorrespondenceId, receipt::CorrespondenceStatus};

/// コレスポンデンスの詳細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceOverview {
    pub resource_id:               String,
    pub senders_reference:         String,
    #[serde(default)]
    pub message_sender:            Option<String>,
    #[serde(default)]
    pub content:                   Option<CorrespondenceContent>,
    #[serde(default)]
    pub requested_publish_time:    Option<DateTime<Utc>>,
    #[serde(default)]
    pub allow_system_delete_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date_time:             Option<DateTime<Utc>>,
    #[serde(default)]
    pub external_references:       Option<Vec<ExternalReference>>,
    #[serde(default)]
    pub property_list:             Option<HashMap<String, String>>,
    #[serde(default)]
    pub reply_options:             Option<Vec<CorrespondenceReplyOption>>,
    #[serde(default)]
    pub ignore_reservation:        Option<bool>,
    /// 公開されるまでは `None`
    #[serde(default)]
    pub published:                 Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_confirmation_needed:    bool,
    #[serde(default)]
    pub is_confidential:           bool,
    #[serde(default)]
    pub recipient:                 Option<String>,
    pub correspondence_id:         CorrespondenceId,
    pub created:                   DateTime<Utc>,
    pub status:                    CorrespondenceStatus,
    #[serde(default)]
    pub status_text:               Option<String>,
    pub status_changed:            DateTime<Utc>,
    #[serde(default)]
    pub notifications:             Option<Vec<CorrespondenceNotificationOverview>>,
    /// Altinn 2 から移行されたコレスポンデンスのみ
    #[serde(default)]
    pub altinn2_correspondence_id: Option<i64>,
}

/// 本文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceContent {
    #[serde(default)]
    pub language:        Option<String>,
    #[serde(default)]
    pub message_title:   Option<String>,
    #[serde(default)]
    pub message_summary: Option<String>,
    #[serde(default)]
    pub message_body:    Option<String>,
    #[serde(default)]
    pub attachments:     Option<Vec<CorrespondenceAttachment>>,
}

/// 添付ファイル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceAttachment {
    pub id:                 Uuid,
    #[serde(default)]
    pub file_name:          Option<String>,
    #[serde(default)]
    pub display_name:       Option<String>,
    #[serde(default)]
    pub is_encrypted:       bool,
    #[serde(default)]
    pub checksum:           Option<String>,
    #[serde(default)]
    pub senders_reference:  Option<String>,
    #[serde(default)]
    pub data_location_type: Option<AttachmentDataLocationType>,
    #[serde(default)]
    pub status:             Option<AttachmentStatus>,
    #[serde(default)]
    pub status_text:        Option<String>,
    #[serde(default)]
    pub expiration_time:    Option<DateTime<Utc>>,
    #[serde(default)]
    pub data_type:          Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentDataLocationType {
    AltinnCorrespondenceAttachment,
    ExternalStorage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentStatus {
    Initialized,
    UploadProcessing,
    Published,
    Purged,
    Failed,
}

/// Altinn 内の別アイテムへの参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReference {
    #[serde(default)]
    pub reference_value: Option<String>,
    pub reference_type:  ReferenceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    Generic,
    AltinnAppInstance,
    AltinnBrokerFileTransfer,
    DialogportenDialogId,
    DialogportenProcessId,
    DialogportenTransmissionId,
}

/// 返信オプション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceReplyOption {
    #[serde(rename = "linkURL", default)]
    pub link_url:  Option<String>,
    #[serde(rename = "linkText", default)]
    pub link_text: Option<String>,
}

/// 通知注文の概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondenceNotificationOverview {
    #[serde(default)]
    pub notification_order_id: Option<Uuid>,
    #[serde(default)]
    pub is_reminder:           bool,
}
