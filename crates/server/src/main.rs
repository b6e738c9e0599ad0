// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tds_api::{Api, ApiError, DisruptionInfo};
use tds_domain::{Consequence, Disruption, ImageRef, SocialMediaPost};
use tds_history::Actor;
use tds_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::{error, info};

/// TDS Server - HTTP server for the Transport Disruptions Service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The API boundary is wrapped in a Mutex to allow safe concurrent
/// access; each request holds it for one operation.
#[derive(Clone)]
struct AppState {
    /// The API boundary, owning persistence and collaborators.
    api: Arc<Mutex<Api>>,
}

/// Acting identity fields carried on every mutating request.
///
/// Resolved by the caller's identity layer; the service treats them as
/// an opaque trusted input.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActorFields {
    /// Display name, recorded on history entries.
    actor_name: String,
    /// The organisation the actor belongs to.
    actor_org_id: String,
    /// True for privileged approvers.
    actor_is_staff: bool,
    /// True when the actor represents an external operator.
    #[serde(default)]
    actor_is_operator: bool,
    /// The operator organisation the actor represents, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actor_operator_org_id: Option<String>,
}

impl ActorFields {
    fn to_actor(&self) -> Actor {
        Actor {
            name: self.actor_name.clone(),
            org_id: self.actor_org_id.clone(),
            is_org_staff: self.actor_is_staff,
            is_operator_user: self.actor_is_operator,
            operator_org_id: self.actor_operator_org_id.clone(),
        }
    }
}

/// API request for creating or amending a disruption overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpsertInfoRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// True when creating a template.
    #[serde(default)]
    is_template: bool,
    /// The authoring operator organisation, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operator_org_id: Option<String>,
    /// The overview fields.
    info: DisruptionInfo,
}

/// API request for inserting or replacing a consequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpsertConsequenceRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// The consequence payload.
    consequence: Consequence,
}

/// API request for removing a consequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoveConsequenceRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// The disruption the consequence belongs to.
    disruption_id: String,
    /// The index to remove.
    index: u32,
}

/// API request for inserting or replacing a social media post.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpsertPostRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// True when the post is written as part of a publish action.
    #[serde(default)]
    is_publishing: bool,
    /// The post payload.
    post: SocialMediaPost,
}

/// API request for removing a social media post.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemovePostRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// The disruption the post belongs to.
    disruption_id: String,
    /// The index to remove.
    index: u32,
}

/// API request for the workflow operations (publish, reject, cancel,
/// delete), which all address a disruption by id and organisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkflowRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The owning organisation.
    org_id: String,
    /// The disruption to act on.
    disruption_id: String,
}

/// API request for storing a post image.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PutPostImageRequest {
    /// The object-store key to store under.
    key: String,
    /// The image payload.
    data: String,
    /// Original file name, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_filename: Option<String>,
}

/// Query parameters for fetching one disruption.
#[derive(Debug, Deserialize)]
struct DisruptionQuery {
    /// The disruption id.
    id: String,
    /// The owning organisation.
    org_id: String,
}

/// Query parameters for listing disruptions.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// The owning organisation.
    org_id: String,
    /// True to list templates instead of disruptions.
    #[serde(default)]
    template: bool,
}

/// API response for write operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Success indicator.
    success: bool,
    /// Optional message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// API response for consequence upserts.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UpsertConsequenceResponse {
    /// Success indicator.
    success: bool,
    /// The highest consequence index now in use.
    max_index_used: u32,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Forbidden(_) => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::TooManyConsequences { .. } | ApiError::ValidationFailed { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::StorageFailure(_) => {
                error!(error = %err, "Storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handler for POST `/disruptions` endpoint.
///
/// Creates a disruption or template, or amends an existing overview.
async fn handle_upsert_info(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpsertInfoRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        id = %req.info.id,
        org_id = %req.org_id,
        actor = %req.actor.actor_name,
        "Handling disruption info upsert"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.create_or_update_disruption_info(
        &req.info,
        &req.org_id,
        &actor,
        req.is_template,
        req.operator_org_id.as_deref(),
    )?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/consequences` endpoint.
async fn handle_upsert_consequence(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpsertConsequenceRequest>,
) -> Result<Json<UpsertConsequenceResponse>, HttpError> {
    info!(
        disruption_id = %req.consequence.disruption_id,
        index = req.consequence.consequence_index,
        org_id = %req.org_id,
        "Handling consequence upsert"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    let max_index_used: u32 = api.upsert_consequence(req.consequence, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(UpsertConsequenceResponse {
        success: true,
        max_index_used,
    }))
}

/// Handler for POST `/consequences/remove` endpoint.
async fn handle_remove_consequence(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RemoveConsequenceRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        index = req.index,
        org_id = %req.org_id,
        "Handling consequence removal"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.remove_consequence(req.index, &req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/social_media_posts` endpoint.
async fn handle_upsert_post(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpsertPostRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.post.disruption_id,
        index = req.post.social_media_post_index,
        org_id = %req.org_id,
        "Handling social media post upsert"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.upsert_social_media_post(req.post, &req.org_id, &actor, req.is_publishing)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/social_media_posts/remove` endpoint.
async fn handle_remove_post(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RemovePostRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        index = req.index,
        org_id = %req.org_id,
        "Handling social media post removal"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.remove_social_media_post(req.index, &req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/publish_draft` endpoint.
///
/// Publishes a draft directly (staff) or submits it for approval.
async fn handle_publish_draft(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        org_id = %req.org_id,
        actor = %req.actor.actor_name,
        "Handling publish_draft request"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.publish_draft(&req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/publish_edit` endpoint.
///
/// Publishes an in-progress edit (staff) or advances it towards
/// approval.
async fn handle_publish_edit(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        org_id = %req.org_id,
        actor = %req.actor.actor_name,
        "Handling publish_edit request"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.publish_edit(&req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/reject` endpoint.
async fn handle_reject(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        org_id = %req.org_id,
        actor = %req.actor.actor_name,
        "Handling reject request"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.reject_disruption(&req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/cancel_edit` endpoint.
async fn handle_cancel_edit(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        org_id = %req.org_id,
        "Handling cancel_edit request"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.cancel_edit(&req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/delete` endpoint.
async fn handle_delete(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        disruption_id = %req.disruption_id,
        org_id = %req.org_id,
        actor = %req.actor.actor_name,
        "Handling delete request"
    );

    let actor: Actor = req.actor.to_actor();
    let mut api = app_state.api.lock().await;
    api.delete_disruption(&req.disruption_id, &req.org_id, &actor)?;
    drop(api);

    Ok(Json(WriteResponse {
        success: true,
        message: None,
    }))
}

/// Handler for POST `/post_images` endpoint.
///
/// Stores image bytes and returns the reference to attach to a post.
async fn handle_put_post_image(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PutPostImageRequest>,
) -> Result<Json<ImageRef>, HttpError> {
    info!(key = %req.key, "Handling post image upload");

    let mut api = app_state.api.lock().await;
    let image: ImageRef =
        api.put_post_image(&req.key, req.data.as_bytes(), req.original_filename)?;
    drop(api);

    Ok(Json(image))
}

/// Handler for GET `/disruptions` endpoint.
///
/// Returns the effective snapshot of one disruption.
async fn handle_get_disruption(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DisruptionQuery>,
) -> Result<Json<Disruption>, HttpError> {
    info!(id = %query.id, org_id = %query.org_id, "Handling disruption fetch");

    let mut api = app_state.api.lock().await;
    let snapshot: Option<Disruption> = api.get_effective_disruption(&query.id, &query.org_id)?;
    drop(api);

    snapshot.map_or_else(
        || {
            Err(HttpError {
                status: StatusCode::NOT_FOUND,
                message: format!(
                    "No disruption '{}' for organisation '{}'",
                    query.id, query.org_id
                ),
            })
        },
        |snapshot| Ok(Json(snapshot)),
    )
}

/// Handler for GET `/disruptions/list` endpoint.
///
/// Lists the effective snapshots of all disruptions (or templates) for
/// an organisation.
async fn handle_list_disruptions(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Disruption>>, HttpError> {
    info!(org_id = %query.org_id, template = query.template, "Handling disruption listing");

    let mut api = app_state.api.lock().await;
    let snapshots: Vec<Disruption> = api.list_disruptions(&query.org_id, query.template)?;
    drop(api);

    Ok(Json(snapshots))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/disruptions",
            post(handle_upsert_info).get(handle_get_disruption),
        )
        .route("/disruptions/list", get(handle_list_disruptions))
        .route("/consequences", post(handle_upsert_consequence))
        .route("/consequences/remove", post(handle_remove_consequence))
        .route("/social_media_posts", post(handle_upsert_post))
        .route("/social_media_posts/remove", post(handle_remove_post))
        .route("/post_images", post(handle_put_post_image))
        .route("/publish_draft", post(handle_publish_draft))
        .route("/publish_edit", post(handle_publish_edit))
        .route("/reject", post(handle_reject))
        .route("/cancel_edit", post(handle_cancel_edit))
        .route("/delete", post(handle_delete))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TDS Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        api: Arc::new(Mutex::new(Api::new(persistence))),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
