//! Cached-icon and frontend bundle serving.

use crate::routes::AppState;
use axum::extract::{Path as UrlPath, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use log::debug;
use tokio::fs;

/// GET /api/icons/{file} — serve a file from the icon cache directory.
pub async fn serve_icon(
    State(state): State<AppState>,
    UrlPath(file): UrlPath<String>,
) -> Response {
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return StatusCode::NOT_FOUND.into_response();
    }

    match fs::read(state.icon_dir.join(&file)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(&file))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Fallback for unmatched routes: serve a matching file from the frontend
/// bundle when one exists, otherwise its index.html (SPA routing), otherwise
/// 404 when no bundle is installed.
pub async fn spa_fallback(State(state): State<AppState>, uri: Uri) -> Response {
    let rel = uri.path().trim_start_matches('/');
    if !rel.is_empty() && !rel.contains("..") {
        if let Ok(bytes) = fs::read(state.dist_dir.join(rel)).await {
            return ([(header::CONTENT_TYPE, content_type_for(rel))], bytes).into_response();
        }
    }

    match fs::read(state.dist_dir.join("index.html")).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            bytes,
        )
            .into_response(),
        Err(_) => {
            debug!("No frontend bundle to serve for {uri}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit('.').next() {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("xpm") => "image/x-xpixmap",
        Some("ico") => "image/x-icon",
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
