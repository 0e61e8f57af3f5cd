//! HTTP API: routing, handlers, and the error envelope.

use crate::icons::IconResolver;
use crate::static_files;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dock_launch::{LaunchError, build_launch_command, detect_platform, dispatch};
use dock_registry::{Application, RegistryError, RegistryStore};
use futures_util::future::join_all;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RegistryStore>,
    pub icons: Arc<IconResolver>,
    pub icon_dir: PathBuf,
    pub dist_dir: PathBuf,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/getApps", get(get_apps))
        .route("/api/addApps", post(add_app))
        .route("/api/removeApp", post(remove_app))
        .route("/api/launch", post(launch_app))
        .route("/api/icons/{file}", get(static_files::serve_icon))
        .fallback(static_files::spa_fallback)
        .with_state(state)
}

/// A registry record with its resolved display icon attached.
#[derive(Serialize)]
struct ApplicationWithIcon {
    #[serde(flatten)]
    app: Application,
    icon: String,
}

#[derive(Deserialize)]
struct AddRequest {
    name: Option<String>,
    path: Option<String>,
    params: Option<String>,
}

#[derive(Deserialize)]
struct RemoveRequest {
    path: Option<String>,
}

#[derive(Deserialize)]
struct LaunchRequest {
    name: Option<String>,
    path: Option<String>,
    args: Option<String>,
}

async fn get_apps(State(state): State<AppState>) -> Json<Vec<ApplicationWithIcon>> {
    let apps = state.store.list();

    // Icon lookups fan out concurrently; a slow or failing one only
    // affects its own entry.
    let icons = join_all(apps.iter().map(|app| state.icons.resolve(app))).await;

    Json(
        apps.into_iter()
            .zip(icons)
            .map(|(app, icon)| ApplicationWithIcon { app, icon })
            .collect(),
    )
}

async fn add_app(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = req.name.unwrap_or_default();
    let path = req.path.unwrap_or_default();

    let apps = state.store.add(&name, &path, req.params.as_deref())?;
    Ok(Json(json!({
        "message": "Application added successfully",
        "apps": apps,
    })))
}

async fn remove_app(
    State(state): State<AppState>,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<Value>, ApiError> {
    let path = req.path.unwrap_or_default();

    let apps = state.store.remove(&path)?;
    Ok(Json(json!({
        "message": "Application removed successfully",
        "apps": apps,
    })))
}

async fn launch_app(
    State(_state): State<AppState>,
    Json(req): Json<LaunchRequest>,
) -> Result<Json<Value>, ApiError> {
    let path = req.path.unwrap_or_default();
    if path.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Application path is required",
        ));
    }
    let name = req.name.unwrap_or_default();

    let command = match build_launch_command(&path, req.args.as_deref(), detect_platform()) {
        Ok(command) => command,
        Err(LaunchError::UnsupportedPlatform) => {
            return Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unsupported OS",
            ));
        }
        Err(e) => return Err(launch_failure(&name, &e)),
    };

    // Contract: report dispatch failures and non-zero exits alike, with the
    // underlying error text for diagnosis.
    let outcome = match dispatch(&command) {
        Ok(handle) => handle.wait().await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => Ok(Json(json!({
            "message": format!("{name} launched successfully!"),
        }))),
        Err(e) => Err(launch_failure(&name, &e)),
    }
}

fn launch_failure(name: &str, err: &LaunchError) -> ApiError {
    error!("Launch failed for {name}: {err}");
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to launch {name}: {err}"),
    )
}

/// API error envelope, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let status = match err {
            RegistryError::InvalidInput(_) | RegistryError::DuplicatePath => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::NotFound => StatusCode::NOT_FOUND,
            RegistryError::StorageRead(_)
            | RegistryError::StorageCorrupt(_)
            | RegistryError::StorageWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}
