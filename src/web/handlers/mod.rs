//! Page handlers.
//!
//! Every page checks the session phase first: while the holder is still
//! hydrating from storage the page renders a loading screen and never
//! redirects.

pub mod dashboard;
pub mod forgot;
pub mod health;
pub mod login;
pub mod register;

use crate::{
    auth::AuthError,
    session::{SessionContext, SessionPhase},
    web::components::{LoadingScreen, render},
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use leptos::prelude::*;
use std::sync::Arc;

pub const LOADING_MESSAGE: &str = "Loading session...";

/// Returns the loading page while the session holder is initializing.
///
/// # Errors
/// The `Err` variant is the response to send instead of the page.
pub async fn ensure_ready(session: &SessionContext) -> Result<(), Response> {
    match session.phase().await {
        SessionPhase::Ready => Ok(()),
        SessionPhase::Initializing => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            render(|| view! { <LoadingScreen message=LOADING_MESSAGE /> }),
        )
            .into_response()),
    }
}

/// `/` and unknown paths land on the login page.
pub async fn root(session: Extension<Arc<SessionContext>>) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    Redirect::to("/login").into_response()
}

pub(crate) const fn status_for(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::WrongPassword => StatusCode::UNAUTHORIZED,
        AuthError::InvalidEmail | AuthError::PasswordTooShort => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::EmailTaken | AuthError::UsernameTaken | AuthError::Busy => StatusCode::CONFLICT,
        AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
