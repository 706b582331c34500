//! # テスト用モッククライアント
//!
//! ハンドラのテストで使用するインメモリの [`CorrespondenceClient`] 実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! oed-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use oed_domain::{
    correspondence::CorrespondenceId,
    overview::CorrespondenceOverview,
    receipt::InitializedCorrespondences,
    search::Query,
};
use uuid::Uuid;

use crate::{
    client::{CorrespondenceClient, types::InitializeCorrespondencesRequest},
    error::ClientError,
};

/// 呼び出しを記録し、登録された結果を順に返すモック
///
/// 結果が登録されていない送信・検索は空の成功を返す。
/// 取得は結果が登録されていなければ 404 相当の失敗を返す。
#[derive(Clone, Default)]
pub struct MockCorrespondenceClient {
    sent:           Arc<Mutex<Vec<InitializeCorrespondencesRequest>>>,
    searched:       Arc<Mutex<Vec<Query>>>,
    fetched:        Arc<Mutex<Vec<CorrespondenceId>>>,
    send_results:   Arc<Mutex<VecDeque<Result<InitializedCorrespondences, ClientError>>>>,
    search_results: Arc<Mutex<VecDeque<Result<Vec<Uuid>, ClientError>>>>,
    get_results:    Arc<Mutex<VecDeque<Result<CorrespondenceOverview, ClientError>>>>,
}

impl MockCorrespondenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_send_result(&self, result: Result<InitializedCorrespondences, ClientError>) {
        self.send_results.lock().unwrap().push_back(result);
    }

    pub fn push_search_result(&self, result: Result<Vec<Uuid>, ClientError>) {
        self.search_results.lock().unwrap().push_back(result);
    }

    pub fn push_get_result(&self, result: Result<CorrespondenceOverview, ClientError>) {
        self.get_results.lock().unwrap().push_back(result);
    }

    /// 送信されたリクエスト
    pub fn sent_requests(&self) -> Vec<InitializeCorrespondencesRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// 検索に使われた条件
    pub fn search_calls(&self) -> Vec<Query> {
        self.searched.lock().unwrap().clone()
    }

    /// 取得された ID
    pub fn get_calls(&self) -> Vec<CorrespondenceId> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl CorrespondenceClient for MockCorrespondenceClient {
    async fn initialize_correspondence(
        &self,
        request: &InitializeCorrespondencesRequest,
    ) -> Result<InitializedCorrespondences, ClientError> {
        self.sent.lock().unwrap().push(request.clone());
        self.send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(InitializedCorrespondences::default()))
    }

    async fn search_correspondences(&self, query: &Query) -> Result<Vec<Uuid>, ClientError> {
        self.searched.lock().unwrap().push(query.clone());
        self.search_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_correspondence(
        &self,
        id: CorrespondenceId,
    ) -> Result<CorrespondenceOverview, ClientError> {
        self.fetched.lock().unwrap().push(id);
        self.get_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::problem(
                    404,
                    oed_shared::ProblemDetails::new(404, "Not Found", "Correspondence not found"),
                ))
            })
    }
}
