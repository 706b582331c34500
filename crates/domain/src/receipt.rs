//! # 送信受領
//!
//! Altinn が送信を受け付けたときの応答と、呼び出し元に返す [`Receipt`] を定義する。

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use uuid::Uuid;

use crate::correspondence::{CorrespondenceId, IdempotencyKey};

/// コレスポンデンスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
pub enum CorrespondenceStatus {
    Initialized,
    ReadyForPublish,
    Published,
    Fetched,
    Read,
    Replied,
    Confirmed,
    PurgedByRecipient,
    PurgedByAltinn,
    Archived,
    Reserved,
    Failed,
    AttachmentsDownloaded,
}

/// 通知注文の受付状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitializedNotificationStatus {
    Success,
    MissingContact,
    Failure,
}

/// 通知注文の受付結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializedNotification {
    #[serde(default)]
    pub order_id:    Option<Uuid>,
    #[serde(default)]
    pub is_reminder: Option<bool>,
    pub status:      InitializedNotificationStatus,
}

/// 受信者ごとの受付結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializedCorrespondence {
    pub correspondence_id: CorrespondenceId,
    pub status:            CorrespondenceStatus,
    pub recipient:         String,
    #[serde(default)]
    pub notifications:     Option<Vec<InitializedNotification>>,
}

/// 送信の受付結果（`POST /correspondence` の応答）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializedCorrespondences {
    #[serde(default)]
    pub correspondences: Vec<InitializedCorrespondence>,
    #[serde(default)]
    pub attachment_ids:  Vec<Uuid>,
}

/// 呼び出し元に返す送信受領
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub initialized_correspondences: InitializedCorrespondences,
    pub idempotency_key:             IdempotencyKey,
    pub senders_reference:           String,
}

impl Receipt {
    /// 受付されたコレスポンデンス ID の一覧
    pub fn correspondence_ids(&self) -> Vec<CorrespondenceId> {
        self.initialized_correspondences
            .correspondences
            .iter()
            .map(|c| c.correspondence_id)
            .collect()
    }
}
