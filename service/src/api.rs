//! Thin JSON adapter over the engine operations.
//!
//! One route per operation; responses are the engine's result shapes
//! serialized as-is. Expected errors come back as structured JSON with a
//! machine-readable code; rendering is the caller's job.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use carddrop_engine::{Engine, EngineError, StoreError};
use carddrop_types::{
    Account, CatalogEntry, CollectionItem, DrawReceipt, GameReceipt, LeaderboardEntry, UserId,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::reset::unix_now;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine<SqliteStore>>,
    /// Default leaderboard page size.
    pub page_size: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/accounts", post(create_account))
        .route("/draw/:user_id", post(draw))
        .route("/game/:user_id", post(play_game))
        .route("/leaderboard", get(leaderboard))
        .route("/rank/:user_id", get(rank))
        .route("/collection/:user_id", get(collection))
        .route("/collection/:user_id/next", post(browse_next))
        .route("/collection/:user_id/prev", post(browse_prev))
        .route("/collection/:user_id/reset", post(browse_reset))
        .with_state(state)
}

struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(EngineError::Store(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            EngineError::CooldownActive { remaining_secs } => (
                StatusCode::CONFLICT,
                json!({ "error": "cooldown_active", "remaining_secs": remaining_secs }),
            ),
            EngineError::NoAttemptsLeft => (
                StatusCode::CONFLICT,
                json!({ "error": "no_attempts_left" }),
            ),
            EngineError::CatalogEmpty => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "catalog_empty" }),
            ),
            EngineError::Store(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "storage_unavailable", "detail": err.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct AccountRequest {
    user_id: UserId,
    #[serde(default)]
    display_name: String,
}

async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<AccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .engine
        .get_or_create(request.user_id, &request.display_name)?;
    Ok(Json(account))
}

async fn draw(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<DrawReceipt>, ApiError> {
    let mut rng = rand::thread_rng();
    let receipt = state.engine.draw(user_id, unix_now(), &mut rng)?;
    Ok(Json(receipt))
}

async fn play_game(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<GameReceipt>, ApiError> {
    let mut rng = rand::thread_rng();
    let receipt = state.engine.play_game(user_id, &mut rng)?;
    Ok(Json(receipt))
}

#[derive(Debug, Deserialize)]
struct LeaderboardParams {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    entries: Vec<LeaderboardEntry>,
}

async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let limit = params.limit.unwrap_or(state.page_size);
    let entries = state.engine.top_n(limit)?;
    Ok(Json(LeaderboardResponse { entries }))
}

#[derive(Debug, Serialize)]
struct RankResponse {
    rank: u64,
}

async fn rank(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<RankResponse>, ApiError> {
    let rank = state.engine.rank_of(user_id)?;
    Ok(Json(RankResponse { rank }))
}

async fn collection(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<CollectionItem>>, ApiError> {
    let report = state.engine.collection_report(user_id)?;
    Ok(Json(report))
}

async fn browse_next(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Option<CatalogEntry>>, ApiError> {
    let card = state.engine.browse_next(user_id)?;
    Ok(Json(card))
}

async fn browse_prev(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Option<CatalogEntry>>, ApiError> {
    let card = state.engine.browse_prev(user_id)?;
    Ok(Json(card))
}

async fn browse_reset(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> StatusCode {
    state.engine.browse_reset(user_id);
    StatusCode::NO_CONTENT
}
