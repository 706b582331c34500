//! # コレスポンデンスサービス
//!
//! 1 つの設定とトークンプロバイダから送信・検索・取得のハンドラをまとめて組み立てる。

use std::sync::Arc;

use oed_domain::{
    Outcome,
    clock::{Clock, SystemClock},
    correspondence::{CorrespondenceDetails, CorrespondenceId},
    overview::CorrespondenceOverview,
    receipt::Receipt,
    search::Query,
};
use oed_infra::{
    AccessTokenProvider,
    AltinnCorrespondenceClient,
    ClientError,
    CorrespondenceClient,
    RetryPolicy,
};
use uuid::Uuid;

use crate::{
    config::CorrespondenceConfig,
    error::CorrespondenceServiceError,
    usecase::{GetHandler, RequestBuilder, SearchHandler, SendHandler},
};

/// コレスポンデンスサービス
///
/// ハンドラは読み取り専用の状態しか持たないため、`Arc` で共有して並行に呼び出せる。
pub struct CorrespondenceService {
    send:   SendHandler,
    search: SearchHandler,
    get:    GetHandler,
}

impl CorrespondenceService {
    /// 設定から Altinn クライアントを組み立ててサービスを作成する
    ///
    /// 既定のリトライポリシー（初回 + 3 回、2 / 4 / 8 秒）を使う。
    pub fn from_config(
        config: &CorrespondenceConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ClientError> {
        Self::with_retry_policy(config, tokens, RetryPolicy::default())
    }

    pub fn with_retry_policy(
        config: &CorrespondenceConfig,
        tokens: Arc<dyn AccessTokenProvider>,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let client = AltinnCorrespondenceClient::new(
            &config.base_url,
            config.request_timeout,
            tokens,
            retry,
        )?;
        tracing::info!(
            base_url = %config.base_url,
            environment = %config.environment,
            product_line = %config.product_line,
            "Altinn コレスポンデンスクライアントを初期化"
        );
        Ok(Self::with_client(config, Arc::new(client), Arc::new(SystemClock)))
    }

    /// 任意のクライアントと時刻プロバイダでサービスを作成する
    pub fn with_client(
        config: &CorrespondenceConfig,
        client: Arc<dyn CorrespondenceClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            send:   SendHandler::new(Arc::clone(&client), RequestBuilder::new(config, clock)),
            search: SearchHandler::new(Arc::clone(&client)),
            get:    GetHandler::new(client),
        }
    }

    /// コレスポンデンスを送信する
    pub async fn send(&self, details: &CorrespondenceDetails) -> Outcome<Receipt> {
        self.send.handle(details).await
    }

    /// 送信し、失敗をエラーとして返す
    ///
    /// エラー伝播で失敗を扱う既存の呼び出し元向け。
    pub async fn send_or_error(
        &self,
        details: &CorrespondenceDetails,
    ) -> Result<Receipt, CorrespondenceServiceError> {
        self.send
            .handle(details)
            .await
            .into_result()
            .map_err(CorrespondenceServiceError::new)
    }

    /// コレスポンデンスを検索する
    pub async fn search(&self, query: &Query) -> Outcome<Vec<Uuid>> {
        self.search.handle(query).await
    }

    /// コレスポンデンスの詳細を取得する
    pub async fn get(&self, id: CorrespondenceId) -> Outcome<CorrespondenceOverview> {
        self.get.handle(id).await
    }
}
