//! # Altinn コレスポンデンス API クライアント
//!
//! `/correspondence/api/v1/correspondence` への送信・検索・取得を担当する。
//! すべての呼び出しは [`AuthenticatingTransport`] を経由し、
//! トークン付与とリトライが適用される。

mod response;
pub mod types;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::SecondsFormat;
use oed_domain::{
    correspondence::CorrespondenceId,
    overview::CorrespondenceOverview,
    receipt::InitializedCorrespondences,
    search::Query,
};
use url::Url;
use uuid::Uuid;

use self::{
    response::handle_response,
    types::{InitializeCorrespondencesRequest, SearchResponse},
};
use crate::{
    auth::AccessTokenProvider,
    error::ClientError,
    retry::RetryPolicy,
    transport::{AuthenticatingTransport, PreparedRequest},
};

const CORRESPONDENCE_PATH: &str = "/correspondence/api/v1/correspondence";

/// Altinn コレスポンデンス API クライアントトレイト
#[async_trait]
pub trait CorrespondenceClient: Send + Sync {
    /// コレスポンデンスを送信する
    ///
    /// `POST /correspondence/api/v1/correspondence` を呼び出す。
    async fn initialize_correspondence(
        &self,
        request: &InitializeCorrespondencesRequest,
    ) -> Result<InitializedCorrespondences, ClientError>;

    /// コレスポンデンスを検索し、ID の一覧を返す
    ///
    /// `GET /correspondence/api/v1/correspondence` を呼び出す。
    /// 必須条件の検証は呼び出し側で済ませておくこと。
    async fn search_correspondences(&self, query: &Query) -> Result<Vec<Uuid>, ClientError>;

    /// コレスポンデンスの詳細を取得する
    ///
    /// `GET /correspondence/api/v1/correspondence/{id}` を呼び出す。
    async fn get_correspondence(
        &self,
        id: CorrespondenceId,
    ) -> Result<CorrespondenceOverview, ClientError>;
}

/// Altinn コレスポンデンス API クライアント実装
#[derive(Clone)]
pub struct AltinnCorrespondenceClient {
    base_url:  String,
    transport: AuthenticatingTransport,
}

impl AltinnCorrespondenceClient {
    /// 新しいクライアントを作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Altinn プラットフォームのベース URL（例: `https://platform.tt02.altinn.no`）
    /// - `timeout`: 1 回の試行あたりのタイムアウト
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: Arc<dyn AccessTokenProvider>,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_transport(
            base_url,
            AuthenticatingTransport::new(http, tokens, retry),
        ))
    }

    pub fn with_transport(base_url: &str, transport: AuthenticatingTransport) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    fn endpoint(&self, suffix: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}{CORRESPONDENCE_PATH}{suffix}", self.base_url))?)
    }
}

/// 検索条件をクエリパラメータに変換する
///
/// 値のない条件は送らない。
fn search_params(query: &Query) -> Vec<(&'static str, String)> {
    let timestamp =
        |t: &chrono::DateTime<chrono::Utc>| t.to_rfc3339_opts(SecondsFormat::AutoSi, true);

    let mut params = Vec::new();
    if let Some(resource_id) = &query.resource_id {
        params.push(("resourceId", resource_id.clone()));
    }
    if let Some(from) = &query.from {
        params.push(("from", timestamp(from)));
    }
    if let Some(to) = &query.to {
        params.push(("to", timestamp(to)));
    }
    if let Some(status) = query.status {
        params.push(("status", status.to_string()));
    }
    if let Some(role) = query.role {
        params.push(("role", role.to_string()));
    }
    if let Some(on_behalf_of) = &query.on_behalf_of {
        params.push(("onBehalfOf", on_behalf_of.clone()));
    }
    if let Some(senders_reference) = &query.senders_reference {
        params.push(("sendersReference", senders_reference.clone()));
    }
    if let Some(key) = query.idempotency_key {
        params.push(("idempotentKey", key.to_string()));
    }
    params
}

#[async_trait]
impl CorrespondenceClient for AltinnCorrespondenceClient {
    async fn initialize_correspondence(
        &self,
        request: &InitializeCorrespondencesRequest,
    ) -> Result<InitializedCorrespondences, ClientError> {
        let prepared = PreparedRequest::post_json(self.endpoint("")?, request)?;

        let response = self.transport.send(&prepared).await?;
        handle_response(response).await
    }

    async fn search_correspondences(&self, query: &Query) -> Result<Vec<Uuid>, ClientError> {
        let mut url = self.endpoint("")?;
        let params = search_params(query);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let response = self.transport.send(&PreparedRequest::get(url)).await?;
        let body: SearchResponse = handle_response(response).await?;
        Ok(body.ids)
    }

    async fn get_correspondence(
        &self,
        id: CorrespondenceId,
    ) -> Result<CorrespondenceOverview, ClientError> {
        let url = self.endpoint(&format!("/{id}"))?;

        let response = self.transport.send(&PreparedRequest::get(url)).await?;
        handle_response(response).await
    }
}
