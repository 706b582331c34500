//! コレスポンデンス送信ユースケース

use std::sync::Arc;

use oed_domain::{
    Outcome,
    correspondence::CorrespondenceDetails,
    receipt::Receipt,
};
use oed_infra::{ClientError, ClientErrorKind, CorrespondenceClient};
use oed_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use super::request_builder::{BuiltRequest, RequestBuilder};
use crate::error::SEND_FAILURE_PREFIX;

/// コレスポンデンス送信ユースケース
///
/// 1. 入力からリクエストを組み立てる（冪等キー・送信者参照はここで確定）
/// 2. トークン付与・リトライ付きで送信する
/// 3. 応答を [`Outcome<Receipt>`] に変換する
pub struct SendHandler {
    client:  Arc<dyn CorrespondenceClient>,
    builder: RequestBuilder,
}

impl SendHandler {
    pub fn new(client: Arc<dyn CorrespondenceClient>, builder: RequestBuilder) -> Self {
        Self { client, builder }
    }

    /// コレスポンデンスを送信する
    ///
    /// 想定内の失敗はすべて [`Outcome::Failure`] で返し、パニックもエラー伝播もしない。
    /// - Problem Details 付きの応答: その `detail`
    /// - それ以外（再試行の使い切り、トークン取得失敗など）: `Could not send correspondence to Altinn 3: <原因>`
    #[tracing::instrument(skip_all, fields(idempotency_key = %details.idempotency_key))]
    pub async fn handle(&self, details: &CorrespondenceDetails) -> Outcome<Receipt> {
        let BuiltRequest {
            request,
            senders_reference,
        } = self.builder.build(details);

        match self.client.initialize_correspondence(&request).await {
            Ok(acknowledgment) => {
                log_business_event!(
                    event.category = event::category::CORRESPONDENCE,
                    event.action = event::action::CORRESPONDENCE_SENT,
                    event.entity_type = event::entity_type::CORRESPONDENCE,
                    event.result = event::result::SUCCESS,
                    correspondence.idempotency_key = %details.idempotency_key,
                    correspondence.senders_reference = %senders_reference,
                    correspondence.count = acknowledgment.correspondences.len(),
                    "コレスポンデンスを送信"
                );
                Outcome::success(Receipt {
                    initialized_correspondences: acknowledgment,
                    idempotency_key: details.idempotency_key,
                    senders_reference,
                })
            }
            Err(err) => {
                let message = send_failure_message(&err);
                log_business_event!(
                    event.category = event::category::CORRESPONDENCE,
                    event.action = event::action::CORRESPONDENCE_FAILED,
                    event.entity_type = event::entity_type::CORRESPONDENCE,
                    event.result = event::result::FAILURE,
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = failure_kind(&err),
                    correspondence.idempotency_key = %details.idempotency_key,
                    http.status = err.status(),
                    error.message = %message,
                    "コレスポンデンスの送信に失敗"
                );
                Outcome::failure(message)
            }
        }
    }
}

/// ログに出すエラー種別
fn failure_kind(err: &ClientError) -> &'static str {
    match err.kind() {
        ClientErrorKind::Token(_) => log_error::kind::TOKEN_ACQUISITION,
        _ => log_error::kind::SERVICE_COMMUNICATION,
    }
}

/// 送信失敗を呼び出し元向けのメッセージに変換する
///
/// Problem Details の `detail` をそのまま返すのは、再試行対象でないステータス（400 など）のときだけ。
/// リトライを使い切った 5xx などは本文が Problem Details でも接頭辞付きで返す。
fn send_failure_message(err: &ClientError) -> String {
    match err.as_problem() {
        Some(problem) if !err.has_transient_status() => problem.message(),
        _ => format!("{SEND_FAILURE_PREFIX}{err}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use oed_domain::{
        clock::FixedClock,
        correspondence::CorrespondenceId,
        receipt::{CorrespondenceStatus, InitializedCorrespondence, InitializedCorrespondences},
    };
    use oed_infra::{auth::TokenError, mock::MockCorrespondenceClient};
    use oed_shared::ProblemDetails;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::test_config;

    fn handler(client: &MockCorrespondenceClient) -> SendHandler {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        ));
        SendHandler::new(
            Arc::new(client.clone()),
            RequestBuilder::new(&test_config(), clock),
        )
    }

    fn acknowledgment(recipient: &str) -> InitializedCorrespondences {
        InitializedCorrespondences {
            correspondences: vec![InitializedCorrespondence {
                correspondence_id: CorrespondenceId::new(),
                status:            CorrespondenceStatus::Initialized,
                recipient:         recipient.to_string(),
                notifications:     None,
            }],
            attachment_ids:  vec![],
        }
    }

    #[tokio::test]
    async fn test_送信に成功すると受領を返す() {
        let client = MockCorrespondenceClient::new();
        let ack = acknowledgment("0192:123456785");
        client.push_send_result(Ok(ack.clone()));
        let details = CorrespondenceDetails {
            recipient: Some("123456785".to_string()),
            ..CorrespondenceDetails::default()
        };

        let outcome = handler(&client).handle(&details).await;

        let receipt = outcome.value().unwrap();
        assert_eq!(receipt.idempotency_key, details.idempotency_key);
        assert_eq!(
            receipt.senders_reference,
            format!("EXT_DD_SHIP_{}", details.idempotency_key)
        );
        assert_eq!(receipt.initialized_correspondences, ack);
        assert_eq!(client.sent_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_同じ入力を2回送ると同じ冪等キーと送信者参照で送る() {
        let client = MockCorrespondenceClient::new();
        let handler = handler(&client);
        let details = CorrespondenceDetails::default();

        let first = handler.handle(&details).await;
        let second = handler.handle(&details).await;

        assert_eq!(first, second);
        let sent = client.sent_requests();
        assert_eq!(sent[0].idempotent_key, sent[1].idempotent_key);
        assert_eq!(
            sent[0].correspondence.senders_reference,
            sent[1].correspondence.senders_reference
        );
    }

    #[tokio::test]
    async fn test_problem_detailsの失敗はdetailをそのまま返す() {
        let client = MockCorrespondenceClient::new();
        client.push_send_result(Err(ClientError::problem(
            400,
            ProblemDetails::new(400, "Bad Request", "Recipient is required"),
        )));

        let outcome = handler(&client).handle(&CorrespondenceDetails::default()).await;

        assert_eq!(outcome, Outcome::failure("Recipient is required"));
    }

    #[tokio::test]
    async fn test_その他の失敗は接頭辞付きのメッセージを返す() {
        let client = MockCorrespondenceClient::new();
        client.push_send_result(Err(TokenError::new("maskinporten unavailable").into()));

        let outcome = handler(&client).handle(&CorrespondenceDetails::default()).await;

        assert_eq!(
            outcome.error(),
            Some(
                "Could not send correspondence to Altinn 3: could not acquire access token: maskinporten unavailable"
            )
        );
    }

    #[tokio::test]
    async fn test_リトライを使い切った5xxはproblem_detailsでも接頭辞付きで返す() {
        let client = MockCorrespondenceClient::new();
        client.push_send_result(Err(ClientError::problem(
            503,
            ProblemDetails::new(503, "Service Unavailable", "Maintenance"),
        )));

        let outcome = handler(&client).handle(&CorrespondenceDetails::default()).await;

        assert_eq!(
            outcome.error(),
            Some("Could not send correspondence to Altinn 3: Maintenance")
        );
    }

    #[test]
    fn test_トークン取得の失敗はログ上で通信エラーと区別する() {
        let token: ClientError = TokenError::new("maskinporten unavailable").into();
        let status = ClientError::unexpected_status(503, "");

        assert_eq!(failure_kind(&token), "token_acquisition");
        assert_eq!(failure_kind(&status), "service_communication");
    }

    #[tokio::test]
    async fn test_想定外ステータスの失敗も接頭辞付きで返す() {
        let client = MockCorrespondenceClient::new();
        client.push_send_result(Err(ClientError::unexpected_status(503, "Service Unavailable")));

        let outcome = handler(&client).handle(&CorrespondenceDetails::default()).await;

        assert!(outcome.is_failure());
        assert!(outcome.error().unwrap().starts_with(SEND_FAILURE_PREFIX));
        assert!(outcome.error().unwrap().contains("503"));
    }
}
