//! HTTP surface of the site.
//!
//! Every request resolves its own path; there is no fallback locale, so an
//! unresolvable path always gets the not-found page.

mod shell;

pub use shell::{Shell, ShellError};

use crate::config::Config;
use crate::i18n::Locale;
use crate::routing::{switch_to, Resolver};
use anyhow::{Context, Result};
use axum::{
    extract::{OriginalUri, Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    resolver: Resolver,
    shell: Arc<Shell>,
}

impl AppState {
    pub fn new(resolver: Resolver, shell: Shell) -> Self {
        Self {
            resolver,
            shell: Arc::new(shell),
        }
    }

    fn not_found(&self) -> Response {
        match self.shell.render_not_found() {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => {
                error!("Failed to render not-found page: {}", e);
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/_metrics", get(metrics))
        .route("/_switch", get(switch_locale))
        .fallback(page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.listen_addr()` and serve until Ctrl-C.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal");
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.resolver.store().metrics().report())
}

/// Any path not claimed by another route is a page path.
async fn page(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, HEAD")]).into_response();
    }

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let ctx = match state.resolver.resolve(path).await {
        Ok(ctx) => ctx,
        Err(_) => return state.not_found(),
    };

    match state.shell.render_page(&ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SwitchParams {
    from: Option<String>,
    to: Option<String>,
}

/// `GET /_switch?from=<path>&to=<code>` redirects to `from` under `to`.
///
/// The fragment never reaches the server in a page request, so clients that
/// want the anchor kept pass the full path here.
async fn switch_locale(
    State(state): State<AppState>,
    Query(params): Query<SwitchParams>,
) -> Response {
    let (Some(from), Some(to)) = (params.from, params.to) else {
        return state.not_found();
    };

    let target = match Locale::from_code(&to) {
        Ok(locale) => locale,
        Err(e) => {
            debug!("Switch rejected: {}", e);
            return state.not_found();
        }
    };

    match switch_to(&from, target) {
        // Control characters cannot go into a Location header
        Ok(location) if !location.chars().any(char::is_control) => {
            Redirect::to(&location).into_response()
        }
        Ok(_) => state.not_found(),
        Err(e) => {
            debug!("Switch rejected for {}: {}", from, e.kind());
            state.not_found()
        }
    }
}
