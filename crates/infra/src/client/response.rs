//! Altinn レスポンスの共通ハンドリング

use oed_shared::ProblemDetails;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Altinn レスポンスの共通ハンドリング
///
/// 成功時はボディを `T` にデシリアライズする。
/// 非成功時は Problem Details として読めれば [`ClientError::problem`]、
/// 読めなければステータスとボディを [`ClientError::unexpected_status`] で返す。
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(ClientError::decode);
    }

    match ProblemDetails::parse(&body) {
        Some(problem) => Err(ClientError::problem(status.as_u16(), problem)),
        None => Err(ClientError::unexpected_status(status.as_u16(), body)),
    }
}
