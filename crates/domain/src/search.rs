//! # 検索条件
//!
//! `GET /correspondence` の検索条件。ロールとリソース ID は Altinn 側で必須のため、
//! 問い合わせ前に [`Query::validate`] で検証する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::{DomainError, correspondence::IdempotencyKey, receipt::CorrespondenceStatus};

/// 検索するロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr)]
pub enum CorrespondencesRoleType {
    Recipient,
    Sender,
    RecipientAndSender,
}

/// コレスポンデンスの検索条件
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub resource_id:       Option<String>,
    pub from:              Option<DateTime<Utc>>,
    pub to:                Option<DateTime<Utc>>,
    pub status:            Option<CorrespondenceStatus>,
    pub role:              Option<CorrespondencesRoleType>,
    pub on_behalf_of:      Option<String>,
    pub senders_reference: Option<String>,
    pub idempotency_key:   Option<IdempotencyKey>,
}

impl Query {
    /// 必須条件を検証する
    ///
    /// ロール → リソース ID の順に確認し、最初に欠けていたものを返す。
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.role.is_none() {
            return Err(DomainError::Validation(
                "Role is required for searching correspondences.".to_string(),
            ));
        }
        if self.resource_id.is_none() {
            return Err(DomainError::Validation(
                "ResourceId is required for searching correspondences.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ロールがなければ検証に失敗する() {
        let query = Query {
            resource_id: Some("oed-resource".to_string()),
            ..Query::default()
        };

        assert_eq!(
            query.validate(),
            Err(DomainError::Validation(
                "Role is required for searching correspondences.".to_string()
            ))
        );
    }

    #[test]
    fn test_ロールを先に検証する() {
        let error = Query::default().validate().unwrap_err();

        assert_eq!(error.message(), "Role is required for searching correspondences.");
    }

    #[test]
    fn test_リソースidがなければ検証に失敗する() {
        let query = Query {
            role: Some(CorrespondencesRoleType::Sender),
            ..Query::default()
        };

        assert_eq!(
            query.validate().unwrap_err().message(),
            "ResourceId is required for searching correspondences."
        );
    }

    #[test]
    fn test_必須条件が揃っていれば検証に成功する() {
        let query = Query {
            resource_id: Some("oed-resource".to_string()),
            role: Some(CorrespondencesRoleType::RecipientAndSender),
            ..Query::default()
        };

        assert_eq!(query.validate(), Ok(()));
    }
}
