//! A small search API for exercising the harness without real backends.
//!
//! `GET /search` and `POST /search` echo what they received (query pairs or
//! JSON body, plus headers) next to a `data.results` list of hits. Helper
//! routes produce the failure modes a search backend can show: arbitrary
//! status codes, a non-JSON 200 body, a body that is not UTF-8, slow answers and a bare `null`.
//! Every request except the log routes is recorded and served back from
//! `GET /requests`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

const HITS_PER_QUERY: usize = 3;
const MAX_SLOW_MS: u64 = 30_000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hit {
    pub id: Uuid,
    pub rank: usize,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchData {
    pub total: usize,
    pub results: Vec<Hit>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub method: String,
    /// Query pairs for GET (in order, duplicates kept), the JSON body for POST.
    pub received: Value,
    pub headers: BTreeMap<String, String>,
    pub data: SearchData,
}

#[derive(Deserialize)]
pub struct SlowParams {
    #[serde(default)]
    pub ms: u64,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

pub fn app() -> Router {
    let log: RequestLog = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/search", get(search_get).post(search_post))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .route("/invalid-utf8", get(invalid_utf8))
        .route("/slow", get(slow))
        .route("/null", get(null))
        .route("/requests", get(list_requests).delete(clear_requests))
        .layer(middleware::from_fn_with_state(log.clone(), record))
        .with_state(log)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock search API listening");
    }
    axum::serve(listener, app()).await
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    if request.uri().path() != "/requests" {
        log.write().await.push(RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
        });
    }
    next.run(request).await
}

async fn search_get(
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<SearchResponse> {
    let keyword = pairs.first().map(|(_, v)| v.clone()).unwrap_or_default();
    let received = Value::Array(pairs.iter().map(|(k, v)| json!([k, v])).collect());
    Json(search_response(Method::GET, received, &headers, &keyword))
}

async fn search_post(headers: HeaderMap, Json(body): Json<Value>) -> Json<SearchResponse> {
    let keyword = first_string(&body).unwrap_or_default();
    Json(search_response(Method::POST, body, &headers, &keyword))
}

async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    let reason = status.canonical_reason().unwrap_or("unknown");
    (status, Json(json!({ "error": reason }))).into_response()
}

async fn malformed() -> Response {
    (StatusCode::OK, "<html>this is not json</html>").into_response()
}

async fn invalid_utf8() -> Response {
    (StatusCode::OK, vec![0xff_u8, 0xfe, b'{', b'}']).into_response()
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Value> {
    let ms = params.ms.min(MAX_SLOW_MS);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "slept_ms": ms }))
}

async fn null() -> Json<Value> {
    Json(Value::Null)
}

async fn list_requests(State(log): State<RequestLog>) -> Json<Vec<RecordedRequest>> {
    Json(log.read().await.clone())
}

async fn clear_requests(State(log): State<RequestLog>) -> StatusCode {
    log.write().await.clear();
    StatusCode::NO_CONTENT
}

fn search_response(method: Method, received: Value, headers: &HeaderMap, keyword: &str) -> SearchResponse {
    let results = if keyword.is_empty() {
        Vec::new()
    } else {
        (1..=HITS_PER_QUERY)
            .map(|rank| Hit {
                id: Uuid::new_v4(),
                rank,
                title: format!("{keyword} result {rank}"),
            })
            .collect()
    };
    SearchResponse {
        method: method.to_string(),
        received,
        headers: headers
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect(),
        data: SearchData {
            total: results.len(),
            results,
        },
    }
}

/// First string value in a JSON object, in key order.
fn first_string(body: &Value) -> Option<String> {
    body.as_object()?
        .values()
        .find_map(|v| v.as_str().map(str::to_string))
}
