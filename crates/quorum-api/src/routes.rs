use std::sync::Arc;

use axum::extract::{Path, State};
use axum::middleware;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use quorum_core::auth::Requester;
use quorum_core::models::{
    Discussion, DiscussionId, DiscussionWithAuthor, NewDiscussion, UpdateDiscussion,
};
use quorum_core::store::FixtureStore;

use crate::auth::require_auth;
use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<FixtureStore>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<FixtureStore>) -> Self {
        Self { config, store }
    }
}

pub fn app_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/discussions", get(list_discussions).post(create_discussion))
        .route(
            "/discussions/{id}",
            get(get_discussion)
                .patch(update_discussion)
                .delete(delete_discussion),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    persistent: bool,
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
        persistent: state.config.fixture_path.is_some(),
    })
}

async fn list_discussions(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
) -> Result<Json<Vec<DiscussionWithAuthor>>, AppError> {
    Ok(Json(state.store.list_discussions(&requester).await))
}

async fn get_discussion(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<String>,
) -> Result<Json<DiscussionWithAuthor>, AppError> {
    let discussion = state
        .store
        .get_discussion(&DiscussionId::from(id), &requester)
        .await?;
    Ok(Json(discussion))
}

async fn create_discussion(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Json(input): Json<NewDiscussion>,
) -> Result<Json<Discussion>, AppError> {
    let discussion = state.store.create_discussion(input, &requester).await?;
    tracing::info!(
        discussion = %discussion.id,
        team = %requester.team_id,
        "Created discussion"
    );
    Ok(Json(discussion))
}

async fn update_discussion(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDiscussion>,
) -> Result<Json<Discussion>, AppError> {
    let discussion = state
        .store
        .update_discussion(&DiscussionId::from(id), input, &requester)
        .await?;
    tracing::info!(
        discussion = %discussion.id,
        team = %requester.team_id,
        "Updated discussion"
    );
    Ok(Json(discussion))
}

async fn delete_discussion(
    State(state): State<AppState>,
    Extension(requester): Extension<Requester>,
    Path(id): Path<String>,
) -> Result<Json<Discussion>, AppError> {
    let discussion = state
        .store
        .delete_discussion(&DiscussionId::from(id), &requester)
        .await?;
    tracing::info!(
        discussion = %discussion.id,
        team = %requester.team_id,
        "Deleted discussion"
    );
    Ok(Json(discussion))
}
