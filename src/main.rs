//! AppDock - local HTTP service for registering and launching applications.
//!
//! One process, one registry file: the API mutates the registry through a
//! single-writer store and launches applications through the host shell.

mod cors;
mod icons;
mod paths;
mod routes;
mod static_files;

use axum::middleware;
use dock_registry::RegistryStore;
use icons::IconResolver;
use log::info;
use routes::AppState;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let icon_dir = paths::icon_cache_dir();
    let state = AppState {
        store: Arc::new(RegistryStore::new(paths::data_file())),
        icons: Arc::new(IconResolver::new(icon_dir.clone())),
        icon_dir,
        dist_dir: paths::dist_dir(),
    };

    // Index host icons off the request path.
    let resolver = state.icons.clone();
    tokio::task::spawn_blocking(move || resolver.prewarm());

    let app = routes::router(state).layer(middleware::from_fn(cors::cors));

    let addr = SocketAddr::from(([0, 0, 0, 0], paths::server_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
