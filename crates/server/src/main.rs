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

mod live;
mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use hunterboard_api::{
    ApiError, AssetStore, ContributorRequest, ContributorResponse, DeleteResponse,
    FileSystemAssetStore, ImageUpload, ListBuildsResponse, ListContributorsResponse,
    ListRolesResponse, ListWeaponsResponse, RoleNameExistsResponse, RoleRequest, RoleResponse,
    SaveTierListRequest, SaveTierListResponse, SetRoleActiveRequest, TierListExistsResponse,
    TierListResponse, create_contributor, create_role, delete_contributor, delete_role, get_build,
    get_saved_tier_list, get_weapon, has_saved_tier_list, list_builds, list_contributors,
    list_roles, list_weapons, list_weapons_by_element, role_name_exists, save_tier_list,
    toggle_contributor_active, toggle_role_active, update_contributor, update_role,
};
use hunterboard_domain::{
    ChasseurBuild, Contributor, DomainError, ImageAttachment, MAX_IMAGE_BYTES, Role, StatusFilter,
    Weapon, filter_contributors, filter_roles,
};
use hunterboard_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::live::{Collection, LiveEventBroadcaster, live_events_handler};
use crate::session::AdminSession;

/// Hunterboard Server - admin and public API for the hunter showcase site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "HUNTERBOARD_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "HUNTERBOARD_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Bearer token required by write endpoints. Without it every write is rejected.
    #[arg(long, env = "HUNTERBOARD_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,

    /// Directory where uploaded contributor images are stored
    #[arg(long, default_value = "./assets")]
    asset_dir: PathBuf,

    /// JSON file of catalog weapons imported at startup
    #[arg(long)]
    weapons_seed: Option<PathBuf>,

    /// Seconds a request may wait for the database before giving up
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// The single persistence adapter. Each request holds the lock for its
    /// whole operation sequence.
    pub(crate) persistence: Arc<Mutex<Persistence>>,
    pub(crate) assets: Arc<dyn AssetStore>,
    pub(crate) admin_token: Option<Arc<str>>,
    pub(crate) live_events: Arc<LiveEventBroadcaster>,
    /// Upper bound on waiting for the persistence lock.
    pub(crate) request_timeout: Duration,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    /// Error indicator.
    pub(crate) error: bool,
    /// Error message.
    pub(crate) message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub(crate) struct HttpError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
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
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error while handling request");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Waits for the persistence lock, bounded by the request timeout.
async fn lock_persistence(app_state: &AppState) -> Result<MutexGuard<'_, Persistence>, HttpError> {
    tokio::time::timeout(app_state.request_timeout, app_state.persistence.lock())
        .await
        .map_err(|_| {
            warn!(
                timeout_ms = app_state.request_timeout.as_millis(),
                "Timed out waiting for the database"
            );
            HttpError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: String::from("The database is busy. Please try again."),
            }
        })
}

/// Parses an optional `status` query value.
fn parse_status(status: Option<&str>) -> Result<StatusFilter, HttpError> {
    status
        .map_or(Ok(StatusFilter::All), str::parse::<StatusFilter>)
        .map_err(|e: DomainError| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        })
}

/// Decodes the optional image upload of a contributor request.
fn decode_image(request: &ContributorRequest) -> Result<Option<ImageAttachment>, HttpError> {
    request
        .image_upload
        .as_ref()
        .map(ImageUpload::decode)
        .transpose()
        .map_err(HttpError::from)
}

/// Response for GET `/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Query parameters for listing contributors.
#[derive(Debug, Deserialize)]
struct ListContributorsQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Query parameters for listing roles.
#[derive(Debug, Deserialize)]
struct ListRolesQuery {
    #[serde(default)]
    search: Option<String>,
}

/// Query parameters for the role name check.
#[derive(Debug, Deserialize)]
struct RoleNameExistsQuery {
    name: String,
    #[serde(default)]
    exclude_id: Option<i64>,
}

/// Query parameters for listing weapons.
#[derive(Debug, Deserialize)]
struct ListWeaponsQuery {
    #[serde(default)]
    element: Option<String>,
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for GET `/contributors` endpoint.
///
/// Fetches the whole roster and filters it in memory.
async fn handle_list_contributors(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListContributorsQuery>,
) -> Result<Json<ListContributorsResponse>, HttpError> {
    let status: StatusFilter = parse_status(query.status.as_deref())?;
    let search: &str = query.search.as_deref().unwrap_or_default();
    info!(search, status = status.as_str(), "Handling list_contributors request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: ListContributorsResponse = list_contributors(&mut persistence)?;
    drop(persistence);

    let contributors: Vec<Contributor> = filter_contributors(&response.contributors, search, status)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListContributorsResponse { contributors }))
}

/// Handler for POST `/contributors` endpoint.
async fn handle_create_contributor(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ContributorRequest>,
) -> Result<Json<ContributorResponse>, HttpError> {
    info!(name = %req.contributor.name, "Handling create_contributor request");

    let image: Option<ImageAttachment> = decode_image(&req)?;
    let mut persistence = lock_persistence(&app_state).await?;
    let response: ContributorResponse = create_contributor(
        &mut persistence,
        app_state.assets.as_ref(),
        req.contributor,
        image.as_ref(),
    )?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for PUT `/contributors/{id}` endpoint.
async fn handle_update_contributor(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(contributor_id): Path<i64>,
    Json(req): Json<ContributorRequest>,
) -> Result<Json<ContributorResponse>, HttpError> {
    info!(contributor_id, "Handling update_contributor request");

    let image: Option<ImageAttachment> = decode_image(&req)?;
    let mut persistence = lock_persistence(&app_state).await?;
    let response: ContributorResponse = update_contributor(
        &mut persistence,
        app_state.assets.as_ref(),
        contributor_id,
        req.contributor,
        image.as_ref(),
    )?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for DELETE `/contributors/{id}` endpoint.
async fn handle_delete_contributor(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(contributor_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(contributor_id, "Handling delete_contributor request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: DeleteResponse = delete_contributor(&mut persistence, contributor_id)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for POST `/contributors/{id}/toggle_active` endpoint.
async fn handle_toggle_contributor_active(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(contributor_id): Path<i64>,
) -> Result<Json<ContributorResponse>, HttpError> {
    info!(contributor_id, "Handling toggle_contributor_active request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: ContributorResponse = toggle_contributor_active(&mut persistence, contributor_id)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for GET `/roles` endpoint.
async fn handle_list_roles(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListRolesQuery>,
) -> Result<Json<ListRolesResponse>, HttpError> {
    let search: &str = query.search.as_deref().unwrap_or_default();
    info!(search, "Handling list_roles request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: ListRolesResponse = list_roles(&mut persistence)?;
    drop(persistence);

    let roles: Vec<Role> = filter_roles(&response.roles, search)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListRolesResponse { roles }))
}

/// Handler for POST `/roles` endpoint.
async fn handle_create_role(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<RoleResponse>, HttpError> {
    info!(name = %req.name, "Handling create_role request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: RoleResponse = create_role(&mut persistence, &req)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Roles);
    Ok(Json(response))
}

/// Handler for PUT `/roles/{id}` endpoint.
async fn handle_update_role(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(role_id): Path<i64>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<RoleResponse>, HttpError> {
    info!(role_id, "Handling update_role request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: RoleResponse = update_role(&mut persistence, role_id, &req)?;
    drop(persistence);

    // Contributors carry the role's display name.
    app_state.live_events.collection_changed(Collection::Roles);
    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for DELETE `/roles/{id}` endpoint.
///
/// Contributors holding the role lose it.
async fn handle_delete_role(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(role_id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(role_id, "Handling delete_role request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: DeleteResponse = delete_role(&mut persistence, role_id)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Roles);
    app_state.live_events.collection_changed(Collection::Contributors);
    Ok(Json(response))
}

/// Handler for POST `/roles/{id}/active` endpoint.
async fn handle_set_role_active(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Path(role_id): Path<i64>,
    Json(req): Json<SetRoleActiveRequest>,
) -> Result<Json<RoleResponse>, HttpError> {
    info!(role_id, active = req.active, "Handling set_role_active request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: RoleResponse = toggle_role_active(&mut persistence, role_id, req.active)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::Roles);
    Ok(Json(response))
}

/// Handler for GET `/roles/name_exists` endpoint.
async fn handle_role_name_exists(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RoleNameExistsQuery>,
) -> Result<Json<RoleNameExistsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    let response: RoleNameExistsResponse =
        role_name_exists(&mut persistence, &query.name, query.exclude_id)?;
    Ok(Json(response))
}

/// Handler for GET `/weapons` endpoint.
async fn handle_list_weapons(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListWeaponsQuery>,
) -> Result<Json<ListWeaponsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    let response: ListWeaponsResponse = match query.element.as_deref() {
        Some(element) if !element.is_empty() => {
            list_weapons_by_element(&mut persistence, element)?
        }
        _ => list_weapons(&mut persistence)?,
    };
    Ok(Json(response))
}

/// Handler for GET `/weapons/{id}` endpoint.
async fn handle_get_weapon(
    AxumState(app_state): AxumState<AppState>,
    Path(weapon_id): Path<i64>,
) -> Result<Json<Weapon>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    let weapon: Option<Weapon> = get_weapon(&mut persistence, weapon_id)?;
    drop(persistence);

    weapon.map(Json).ok_or_else(|| HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("Weapon {weapon_id} does not exist"),
    })
}

/// Handler for GET `/tier_list` endpoint.
async fn handle_get_tier_list(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<TierListResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(get_saved_tier_list(&mut persistence)?))
}

/// Handler for GET `/tier_list/exists` endpoint.
async fn handle_tier_list_exists(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<TierListExistsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(has_saved_tier_list(&mut persistence)))
}

/// Handler for PUT `/tier_list` endpoint.
///
/// Replaces the stored tier list.
async fn handle_save_tier_list(
    _admin: AdminSession,
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveTierListRequest>,
) -> Result<Json<SaveTierListResponse>, HttpError> {
    info!(buckets = req.tiers.len(), "Handling save_tier_list request");

    let mut persistence = lock_persistence(&app_state).await?;
    let response: SaveTierListResponse = save_tier_list(&mut persistence, &req.tiers)?;
    drop(persistence);

    app_state.live_events.collection_changed(Collection::TierList);
    Ok(Json(response))
}

/// Handler for GET `/builds` endpoint.
async fn handle_list_builds() -> Result<Json<ListBuildsResponse>, HttpError> {
    Ok(Json(list_builds()?))
}

/// Handler for GET `/builds/{character_id}` endpoint.
async fn handle_get_build(
    Path(character_id): Path<String>,
) -> Result<Json<ChasseurBuild>, HttpError> {
    Ok(Json(get_build(&character_id)?))
}

/// Largest accepted request body: a base64 encoded image of
/// [`MAX_IMAGE_BYTES`] plus room for the surrounding JSON fields.
const MAX_REQUEST_BODY_BYTES: usize = MAX_IMAGE_BYTES.div_ceil(3) * 4 + 64 * 1024;

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/contributors",
            get(handle_list_contributors).post(handle_create_contributor),
        )
        .route(
            "/contributors/{id}",
            put(handle_update_contributor).delete(handle_delete_contributor),
        )
        .route(
            "/contributors/{id}/toggle_active",
            post(handle_toggle_contributor_active),
        )
        .route("/roles", get(handle_list_roles).post(handle_create_role))
        .route("/roles/name_exists", get(handle_role_name_exists))
        .route(
            "/roles/{id}",
            put(handle_update_role).delete(handle_delete_role),
        )
        .route("/roles/{id}/active", post(handle_set_role_active))
        .route("/weapons", get(handle_list_weapons))
        .route("/weapons/{id}", get(handle_get_weapon))
        .route(
            "/tier_list",
            get(handle_get_tier_list).put(handle_save_tier_list),
        )
        .route("/tier_list/exists", get(handle_tier_list_exists))
        .route("/builds", get(handle_list_builds))
        .route("/builds/{character_id}", get(handle_get_build))
        .route("/live", get(live_events_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(app_state)
}

/// Reads a weapon catalog seed file.
fn load_weapon_seed(path: &std::path::Path) -> Result<Vec<Weapon>, Box<dyn std::error::Error>> {
    let contents: String = std::fs::read_to_string(path)?;
    let catalog: Vec<Weapon> = serde_json::from_str(&contents)?;
    Ok(catalog)
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

    info!("Initializing Hunterboard Server");

    let mut persistence: Persistence = if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed_path) = &args.weapons_seed {
        let catalog: Vec<Weapon> = load_weapon_seed(seed_path)?;
        let inserted: usize = persistence.import_weapons(&catalog)?;
        info!(
            path = %seed_path.display(),
            seeded = catalog.len(),
            inserted,
            "Imported weapon catalog"
        );
    }

    if args.admin_token.is_none() {
        warn!("No admin token configured; all write endpoints will reject requests");
    }

    let assets: FileSystemAssetStore = FileSystemAssetStore::new(&args.asset_dir)?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        assets: Arc::new(assets),
        admin_token: args.admin_token.map(Arc::from),
        live_events: Arc::new(LiveEventBroadcaster::new()),
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
