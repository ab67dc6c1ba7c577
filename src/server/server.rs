use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{error, info};

use super::acceptance_routes::make_acceptance_routes;
use super::account_routes::make_account_routes;
use super::job_routes::make_job_routes;
use super::{log_requests, state::ServerState, ServerConfig};
use crate::store::BoardStore;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Logs an unexpected failure and answers 500.
pub(super) fn internal_error(err: anyhow::Error) -> Response {
    error!("Internal error: {:#}", err);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn status(State(state): State<ServerState>) -> Json<ServerStats> {
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    })
}

pub fn make_app<S: BoardStore + 'static>(config: ServerConfig, store: Arc<S>) -> Router {
    let state = ServerState::new(config.clone(), store);

    let status_routes: Router = Router::new()
        .route("/status", get(status))
        .with_state(state.clone());

    let mut app: Router = make_account_routes(state.clone())
        .merge(make_job_routes(state.clone()))
        .merge(make_acceptance_routes(state.clone()))
        .merge(status_routes);

    if let Some(static_dir) = config.static_dir {
        app = app.nest_service("/static", ServeDir::new(static_dir));
    }

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server<S: BoardStore + 'static>(config: ServerConfig, store: Arc<S>) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", err);
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
