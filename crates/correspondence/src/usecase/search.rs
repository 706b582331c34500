//! コレスポンデンス検索ユースケース

use std::sync::Arc;

use oed_domain::{Outcome, search::Query};
use oed_infra::{ClientError, CorrespondenceClient};
use oed_shared::{event_log::event, log_business_event};
use uuid::Uuid;

/// コレスポンデンス検索ユースケース
///
/// ロールとリソース ID は必須。欠けていれば Altinn に問い合わせずに失敗を返す。
pub struct SearchHandler {
    client: Arc<dyn CorrespondenceClient>,
}

impl SearchHandler {
    pub fn new(client: Arc<dyn CorrespondenceClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all, fields(resource_id = ?query.resource_id, role = ?query.role))]
    pub async fn handle(&self, query: &Query) -> Outcome<Vec<Uuid>> {
        if let Err(e) = query.validate() {
            return Outcome::failure(e.message());
        }

        match self.client.search_correspondences(query).await {
            Ok(ids) => {
                log_business_event!(
                    event.category = event::category::CORRESPONDENCE,
                    event.action = event::action::CORRESPONDENCE_SEARCHED,
                    event.result = event::result::SUCCESS,
                    correspondence.count = ids.len(),
                    "コレスポンデンスを検索"
                );
                Outcome::success(ids)
            }
            Err(err) => {
                tracing::warn!(error = %err, "コレスポンデンスの検索に失敗");
                Outcome::failure(failure_message("Could not search correspondences in Altinn 3", &err))
            }
        }
    }
}

/// 再試行対象でない Problem Details ならその内容、それ以外は接頭辞付きの原因を返す
pub(super) fn failure_message(prefix: &str, err: &ClientError) -> String {
    match err.as_problem() {
        Some(problem) if !err.has_transient_status() => problem.message(),
        _ => format!("{prefix}: {err}"),
    }
}
