use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use matchday_api::NotificationCenter;
use matchday_core::{CatalogError, Match, Notification, NotificationQuery};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const OPENAPI_YAML: &str = include_str!("../../../openapi/openapi.yaml");

#[derive(Debug, Clone)]
struct ServiceState {
    center: Arc<NotificationCenter>,
}

/// Error body rendered for every failed lookup: a short category, the
/// numeric code, and a human-readable message.
#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
    code: u16,
    message: String,
}

#[derive(Debug, Clone)]
struct ServiceError(CatalogError);

impl From<CatalogError> for ServiceError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.category().to_string(),
            code: self.0.code(),
            message: self.0.to_string(),
        };
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    time: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
struct ListNotificationsParams {
    match_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MatchNotificationsParams {
    #[serde(rename = "type")]
    kind: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImportantNotificationsParams {
    limit: Option<String>,
}

/// Lenient limit handling: anything that does not parse as an integer is
/// treated as absent, and the engine falls back to the default.
fn parse_limit(raw: Option<String>) -> Option<i64> {
    raw.and_then(|value| value.parse().ok())
}

#[derive(Debug, Parser)]
#[command(name = "matchday-service")]
#[command(about = "HTTP service for soccer match notifications")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
    /// Seed for the generated catalog; omit for a fresh random catalog.
    #[arg(long)]
    seed: Option<u64>,
}

fn app(state: ServiceState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/openapi", get(openapi))
        .route("/v1/matches", get(list_matches))
        .route("/v1/matches/:match_id", get(get_match))
        .route("/v1/matches/:match_id/notifications", get(list_match_notifications))
        .route("/v1/notifications", get(list_notifications))
        .route("/v1/notifications/important", get(list_important_notifications))
        .route("/v1/notifications/:notification_id", get(get_notification))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    tracing::info!("starting matchday-service v{}", env!("CARGO_PKG_VERSION"));
    let center = NotificationCenter::with_sample_data(args.seed, OffsetDateTime::now_utc());
    let state = ServiceState { center: Arc::new(center) };

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("listening on {}", args.bind);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        time: OffsetDateTime::now_utc(),
    })
}

async fn openapi() -> impl IntoResponse {
    (StatusCode::OK, [("content-type", "application/yaml; charset=utf-8")], OPENAPI_YAML)
}

async fn list_matches(State(state): State<ServiceState>) -> Json<Vec<Match>> {
    Json(state.center.list_matches())
}

async fn get_match(
    State(state): State<ServiceState>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ServiceError> {
    Ok(Json(state.center.get_match(&match_id)?))
}

async fn list_match_notifications(
    State(state): State<ServiceState>,
    Path(match_id): Path<String>,
    Query(params): Query<MatchNotificationsParams>,
) -> Result<Json<Vec<Notification>>, ServiceError> {
    let notifications = state.center.list_match_notifications(
        &match_id,
        params.kind.as_deref(),
        params.priority.as_deref(),
    )?;
    Ok(Json(notifications))
}

async fn list_notifications(
    State(state): State<ServiceState>,
    Query(params): Query<ListNotificationsParams>,
) -> Json<Vec<Notification>> {
    let query = NotificationQuery {
        match_id: params.match_id,
        kind: params.kind,
        priority: params.priority,
        limit: parse_limit(params.limit),
    };
    Json(state.center.list_notifications(&query))
}

async fn get_notification(
    State(state): State<ServiceState>,
    Path(notification_id): Path<String>,
) -> Result<Json<Notification>, ServiceError> {
    Ok(Json(state.center.get_notification(&notification_id)?))
}

async fn list_important_notifications(
    State(state): State<ServiceState>,
    Query(params): Query<ImportantNotificationsParams>,
) -> Json<Vec<Notification>> {
    Json(state.center.list_important_notifications(parse_limit(params.limit)))
}
