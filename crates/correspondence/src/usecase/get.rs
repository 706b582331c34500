//! コレスポンデンス取得ユースケース

use std::sync::Arc;

use oed_domain::{Outcome, correspondence::CorrespondenceId, overview::CorrespondenceOverview};
use oed_infra::CorrespondenceClient;
use oed_shared::{event_log::event, log_business_event};

use super::search::failure_message;

/// コレスポンデンス取得ユースケース
pub struct GetHandler {
    client: Arc<dyn CorrespondenceClient>,
}

impl GetHandler {
    pub fn new(client: Arc<dyn CorrespondenceClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all, fields(%id))]
    pub async fn handle(&self, id: CorrespondenceId) -> Outcome<CorrespondenceOverview> {
        match self.client.get_correspondence(id).await {
            Ok(overview) => {
                log_business_event!(
                    event.category = event::category::CORRESPONDENCE,
                    event.action = event::action::CORRESPONDENCE_FETCHED,
                    event.entity_type = event::entity_type::CORRESPONDENCE,
                    event.entity_id = %id,
                    event.result = event::result::SUCCESS,
                    "コレスポンデンスを取得"
                );
                Outcome::success(overview)
            }
            Err(err) => {
                tracing::warn!(error = %err, "コレスポンデンスの取得に失敗");
                Outcome::failure(failure_message("Could not get correspondence from Altinn 3", &err))
            }
        }
    }
}
