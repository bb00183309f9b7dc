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

mod notify;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use intern_link_api::{
    ApiError, ApplicationInfo, ChangeStateRequest, IdentityInfo, ListOffersResponse, LoginRequest,
    OfferInfo, OfferQuery, ProfileInfo, RegisterAccountRequest, RegisterAccountResponse,
    ReviewDecisionResponse, SubmitOfferRequest, UpdateProfileRequest, UpdateStatusRequest,
};
use intern_link_domain::{AccountId, Identity};
use intern_link_persistence::{Persistence, PersistenceError};
use notify::{LogNotifier, Notifier};
use time::format_description::well_known::Rfc3339;

/// InternLink Server - HTTP server for the internship-offer marketplace
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
/// The persistence layer sits behind a Mutex: one mutation at a time,
/// which also serializes the capacity check with the insert it guards.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The notification delivery backend.
    notifier: Arc<dyn Notifier>,
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
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Formats the current instant as RFC 3339.
fn now_rfc3339() -> Result<String, HttpError> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Formats the instant one year back, the dashboard's monthly-series cutoff.
fn one_year_ago_rfc3339() -> Result<String, HttpError> {
    (time::OffsetDateTime::now_utc() - time::Duration::days(365))
        .format(&Rfc3339)
        .map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Resolves an acting account to its identity.
///
/// Session handling lives outside this service; requests name their
/// actor explicitly and an unknown actor is treated as unauthenticated.
fn resolve_actor(persistence: &mut Persistence, actor_id: i64) -> Result<Identity, HttpError> {
    persistence
        .get_account(AccountId::new(actor_id))
        .map_err(|err| match err {
            PersistenceError::NotFound(_) => HttpError {
                status: StatusCode::UNAUTHORIZED,
                message: format!("Unknown account {actor_id}"),
            },
            other => other.into(),
        })
}

fn resolve_optional_actor(
    persistence: &mut Persistence,
    actor_id: Option<i64>,
) -> Result<Option<Identity>, HttpError> {
    actor_id
        .map(|id| resolve_actor(persistence, id))
        .transpose()
}

/// API request to submit an offer, with an optional acting account.
#[derive(Debug, Clone, Deserialize)]
struct SubmitOfferApiRequest {
    /// The acting account, if authenticated.
    actor_id: Option<i64>,
    /// The offer payload.
    #[serde(flatten)]
    offer: SubmitOfferRequest,
}

/// Query parameters for offer listings.
#[derive(Debug, Deserialize)]
struct ListOffersApiQuery {
    /// The acting account, if authenticated.
    actor_id: Option<i64>,
    /// Substring search over title, description, and organization.
    search: Option<String>,
    /// Substring match over the city.
    city: Option<String>,
    /// Exact duration bucket.
    duration: Option<String>,
    /// Exact domain tag.
    domain: Option<String>,
    /// Remote flag.
    remote: Option<bool>,
}

/// Request body carrying only the acting account.
#[derive(Debug, Deserialize)]
struct ActorApiRequest {
    /// The acting account.
    actor_id: i64,
}

/// Query parameters carrying only the acting account.
#[derive(Debug, Deserialize)]
struct ActorApiQuery {
    /// The acting account.
    actor_id: i64,
}

/// API request for a manual close.
#[derive(Debug, Deserialize)]
struct CloseOfferApiRequest {
    /// The acting account.
    actor_id: i64,
    /// Optional closing reason wording.
    reason: Option<String>,
}

/// API request for an admin state change.
#[derive(Debug, Deserialize)]
struct ChangeStateApiRequest {
    /// The acting account.
    actor_id: i64,
    /// The target state literal.
    new_state: String,
}

/// API request for an application decision.
#[derive(Debug, Deserialize)]
struct UpdateStatusApiRequest {
    /// The acting account.
    actor_id: i64,
    /// The status literal.
    status: String,
}

/// API request for a role reassignment.
#[derive(Debug, Deserialize)]
struct ChangeRoleApiRequest {
    /// The acting account.
    actor_id: i64,
    /// The role literal.
    role: String,
}

/// API request for a profile update.
#[derive(Debug, Clone, Deserialize)]
struct UpdateProfileApiRequest {
    /// The acting account.
    actor_id: i64,
    /// The profile fields to change.
    #[serde(flatten)]
    profile: UpdateProfileRequest,
}

async fn handle_submit_offer(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SubmitOfferApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let submitted_at: String = now_rfc3339()?;
    let mut persistence = state.persistence.lock().await;
    let submitter: Option<Identity> = resolve_optional_actor(&mut persistence, request.actor_id)?;

    let result = intern_link_api::submit_offer(
        &mut persistence,
        request.offer,
        submitter.as_ref(),
        &submitted_at,
    )
    .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok((StatusCode::CREATED, Json(result.response)))
}

async fn handle_list_offers(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListOffersApiQuery>,
) -> Result<Json<ListOffersResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let viewer: Option<Identity> = resolve_optional_actor(&mut persistence, query.actor_id)?;

    let offer_query: OfferQuery = OfferQuery {
        search: query.search,
        city: query.city,
        duration: query.duration,
        domain: query.domain,
        remote: query.remote,
    };

    let response = intern_link_api::list_offers(&mut persistence, viewer.as_ref(), &offer_query)
        .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_get_offer(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
) -> Result<Json<OfferInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response =
        intern_link_api::get_offer(&mut persistence, offer_id).map_err(HttpError::from)?;
    Ok(Json(response))
}

/// Shared shape of the staff/admin offer moves: resolve, call, dispatch.
macro_rules! offer_action_handler {
    ($name:ident, $api_fn:path) => {
        async fn $name(
            AxumState(state): AxumState<AppState>,
            Path(offer_id): Path<i64>,
            Json(request): Json<ActorApiRequest>,
        ) -> Result<Json<ReviewDecisionResponse>, HttpError> {
            let mut persistence = state.persistence.lock().await;
            let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;
            let result =
                $api_fn(&mut persistence, offer_id, &actor).map_err(HttpError::from)?;
            drop(persistence);

            notify::dispatch_events(state.notifier.as_ref(), &result.events);
            Ok(Json(result.response))
        }
    };
}

offer_action_handler!(handle_validate_offer, intern_link_api::validate_offer);
offer_action_handler!(handle_refuse_offer, intern_link_api::refuse_offer);
offer_action_handler!(handle_reopen_offer, intern_link_api::reopen_offer);

async fn handle_close_offer(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Json(request): Json<CloseOfferApiRequest>,
) -> Result<Json<ReviewDecisionResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;
    let result =
        intern_link_api::close_offer(&mut persistence, offer_id, request.reason, &actor)
            .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok(Json(result.response))
}

async fn handle_change_offer_state(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Json(request): Json<ChangeStateApiRequest>,
) -> Result<Json<ReviewDecisionResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;
    let change: ChangeStateRequest = ChangeStateRequest {
        new_state: request.new_state,
    };
    let result =
        intern_link_api::change_offer_state(&mut persistence, offer_id, &change, &actor)
            .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok(Json(result.response))
}

async fn handle_apply(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Json(request): Json<ActorApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let applied_at: String = now_rfc3339()?;
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;

    let result = intern_link_api::apply_to_offer(&mut persistence, offer_id, &actor, &applied_at)
        .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok((StatusCode::CREATED, Json(result.response)))
}

async fn handle_withdraw(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<ActorApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;

    let result = intern_link_api::withdraw_application(&mut persistence, application_id, &actor)
        .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok(Json(result.response))
}

async fn handle_update_status(
    AxumState(state): AxumState<AppState>,
    Path(application_id): Path<i64>,
    Json(request): Json<UpdateStatusApiRequest>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;
    let update: UpdateStatusRequest = UpdateStatusRequest {
        status: request.status,
    };

    let result = intern_link_api::update_application_status(
        &mut persistence,
        application_id,
        &update,
        &actor,
    )
    .map_err(HttpError::from)?;
    drop(persistence);

    notify::dispatch_events(state.notifier.as_ref(), &result.events);
    Ok(Json(result.response))
}

async fn handle_list_offer_applications(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<Vec<ApplicationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let response =
        intern_link_api::list_offer_applications(&mut persistence, offer_id, &actor)
            .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_list_my_applications(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<Vec<ApplicationInfo>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let response = intern_link_api::list_my_applications(&mut persistence, &actor)
        .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_export_roster(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let csv_text: String =
        intern_link_api::export_roster_csv(&mut persistence, offer_id, &actor)
            .map_err(HttpError::from)?;

    let disposition: String = format!("attachment; filename=\"offer_{offer_id}_roster.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv_text,
    )
        .into_response())
}

async fn handle_toggle_favorite(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Json(request): Json<ActorApiRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;

    let response =
        intern_link_api::toggle_favorite_bookmark(&mut persistence, offer_id, &actor)
            .map_err(HttpError::from)?;
    Ok(Json(response))
}

/// Response for the single-bookmark check.
#[derive(Debug, Serialize)]
struct IsFavoriteResponse {
    /// Whether the offer is bookmarked.
    is_favorite: bool,
}

async fn handle_check_favorite(
    AxumState(state): AxumState<AppState>,
    Path(offer_id): Path<i64>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<IsFavoriteResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let is_favorite: bool = intern_link_api::check_favorite(&mut persistence, offer_id, &actor)
        .map_err(HttpError::from)?;
    Ok(Json(IsFavoriteResponse { is_favorite }))
}

async fn handle_list_favorites(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<ListOffersResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let response = intern_link_api::list_favorite_offers(&mut persistence, &actor)
        .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_register(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let created_at: String = now_rfc3339()?;
    let mut persistence = state.persistence.lock().await;

    let response: RegisterAccountResponse =
        intern_link_api::register_account(&mut persistence, &request, &created_at)
            .map_err(HttpError::from)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn handle_login(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<IdentityInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;

    let response: IdentityInfo =
        intern_link_api::login(&mut persistence, &request).map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_change_role(
    AxumState(state): AxumState<AppState>,
    Path(account_id): Path<i64>,
    Json(request): Json<ChangeRoleApiRequest>,
) -> Result<Json<IdentityInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;

    let response =
        intern_link_api::change_account_role(&mut persistence, account_id, &request.role, &actor)
            .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_get_profile(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<ProfileInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let response = intern_link_api::get_student_profile(&mut persistence, &actor)
        .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_update_profile(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<UpdateProfileApiRequest>,
) -> Result<Json<ProfileInfo>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, request.actor_id)?;

    let response =
        intern_link_api::update_student_profile(&mut persistence, &actor, &request.profile)
            .map_err(HttpError::from)?;
    Ok(Json(response))
}

async fn handle_dashboard_stats(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ActorApiQuery>,
) -> Result<Json<intern_link_persistence::DashboardStats>, HttpError> {
    let since: String = one_year_ago_rfc3339()?;
    let mut persistence = state.persistence.lock().await;
    let actor: Identity = resolve_actor(&mut persistence, query.actor_id)?;

    let response = intern_link_api::dashboard_stats(&mut persistence, &actor, &since)
        .map_err(HttpError::from)?;
    Ok(Json(response))
}

/// Builds the HTTP router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/offers", post(handle_submit_offer))
        .route("/offers", get(handle_list_offers))
        .route("/offers/{offer_id}", get(handle_get_offer))
        .route("/offers/{offer_id}/validate", post(handle_validate_offer))
        .route("/offers/{offer_id}/refuse", post(handle_refuse_offer))
        .route("/offers/{offer_id}/close", post(handle_close_offer))
        .route("/offers/{offer_id}/reopen", post(handle_reopen_offer))
        .route("/offers/{offer_id}/state", post(handle_change_offer_state))
        .route("/offers/{offer_id}/apply", post(handle_apply))
        .route(
            "/offers/{offer_id}/applications",
            get(handle_list_offer_applications),
        )
        .route("/offers/{offer_id}/roster.csv", get(handle_export_roster))
        .route("/offers/{offer_id}/favorite", post(handle_toggle_favorite))
        .route("/offers/{offer_id}/favorite", get(handle_check_favorite))
        .route(
            "/applications/{application_id}/withdraw",
            post(handle_withdraw),
        )
        .route(
            "/applications/{application_id}/status",
            post(handle_update_status),
        )
        .route("/applications", get(handle_list_my_applications))
        .route("/favorites", get(handle_list_favorites))
        .route("/accounts", post(handle_register))
        .route("/accounts/{account_id}/role", post(handle_change_role))
        .route("/login", post(handle_login))
        .route("/profile", get(handle_get_profile))
        .route("/profile", post(handle_update_profile))
        .route("/stats", get(handle_dashboard_stats))
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

    info!("Initializing InternLink Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::open(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: Arc::new(LogNotifier),
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
