//! HTTP view layer: one HTML page per route, rendered on the server.

pub(crate) mod components;
pub mod handlers;

use crate::{APP_USER_AGENT, registration::RegistrationFlow, session::SessionContext};
use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
};
use handlers::{dashboard, forgot, health, login, register, root};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{Span, error, info, info_span};
use ulid::Ulid;

/// Build the page router around a session holder.
#[must_use]
pub fn router(session: Arc<SessionContext>, flow: Arc<RegistrationFlow>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/login", get(login::show).post(login::submit))
        .route("/forgot", get(forgot::show).post(forgot::submit))
        .route("/register", get(register::show).post(register::submit))
        .route("/dashboard", get(dashboard::show))
        .route("/logout", post(dashboard::logout))
        .route("/health", get(health::health))
        .fallback(root)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(session))
                .layer(Extension(flow))
                .layer(Extension(Arc::new(forgot::ResetRequests::default()))),
        )
}

/// Start the server
///
/// The session holder is hydrated in the background; pages render the loading
/// screen until it is ready.
/// # Errors
/// Return error if the listener cannot be bound or the server fails
pub async fn serve(addr: SocketAddr, session: Arc<SessionContext>) -> Result<()> {
    let hydrate = {
        let session = session.clone();
        tokio::spawn(async move { session.init().await })
    };

    let app = router(session.clone(), Arc::new(RegistrationFlow::new()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("{APP_USER_AGENT} listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    if let Err(err) = hydrate.await {
        error!("Session hydration task failed: {err}");
    }
    session.teardown().await;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
