//! Fake catalog records API for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /records?limit=&offset=&where=` with the same
//! `{ "total_count": N, "results": [...] }` envelope as the real endpoint,
//! slicing the configured records by `offset`/`limit`.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeCatalogApi::start(sample_raw_json()).await.unwrap();
//! let config = config_for_api(dir.path(), &api.records_url(), 100);
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One request as seen by the fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub limit: u64,
    pub offset: u64,
    pub filter: Option<String>,
}

#[derive(Default)]
struct ApiState {
    records: Vec<Value>,
    /// Reported `total_count`; defaults to `records.len()`.
    total_count: Option<Value>,
    /// When set, every request answers with this status.
    failure: Option<StatusCode>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    limit: u64,
    offset: u64,
    #[serde(rename = "where")]
    filter: Option<String>,
}

/// Handle to the running fake catalog API.
pub struct FakeCatalogApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeCatalogApi {
    /// Start serving `records` (a JSON array) on a random port.
    pub async fn start(records: Value) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState {
            records: records.as_array().cloned().unwrap_or_default(),
            ..ApiState::default()
        }));

        let app = Router::new()
            .route("/records", get(list_records))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full records endpoint URL (e.g. `http://127.0.0.1:PORT/records`).
    pub fn records_url(&self) -> String {
        format!("http://{}/records", self.addr)
    }

    /// Override the `total_count` reported on every page.
    pub async fn report_total(&self, total: Value) {
        self.state.lock().await.total_count = Some(total);
    }

    /// Make every subsequent request fail with `status`.
    pub async fn fail_with(&self, status: StatusCode) {
        self.state.lock().await.failure = Some(status);
    }

    /// Requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

async fn list_records(
    Query(query): Query<PageQuery>,
    State(state): State<Arc<Mutex<ApiState>>>,
) -> Response {
    let mut state = state.lock().await;
    state.requests.push(RecordedRequest {
        limit: query.limit,
        offset: query.offset,
        filter: query.filter,
    });

    if let Some(status) = state.failure {
        return (status, "upstream unavailable").into_response();
    }

    let total = state
        .total_count
        .clone()
        .unwrap_or_else(|| Value::from(state.records.len()));
    let page: Vec<Value> = state
        .records
        .iter()
        .skip(query.offset as usize)
        .take(query.limit as usize)
        .cloned()
        .collect();

    Json(serde_json::json!({ "total_count": total, "results": page })).into_response()
}
