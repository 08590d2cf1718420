use super::{ensure_ready, status_for};
use crate::{
    auth::{AuthError, InFlight, InFlightGuard},
    registration::RegistrationFlow,
    session::SessionContext,
    validation::{Field, FieldErrors, validate_reset},
    web::components::{Alert, AlertKind, AuthLayout, Button, TextInput, render},
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use leptos::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

pub const RESET_STATUS: &str =
    "If this email exists in our system, you will receive reset instructions shortly.";

/// Rejects a second reset request while one is outstanding.
#[derive(Debug, Default)]
pub struct ResetRequests(InFlight);

impl ResetRequests {
    #[must_use]
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.0.try_begin()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ForgotForm {
    pub email: String,
}

#[derive(Default)]
struct ForgotView {
    email: String,
    errors: FieldErrors,
    error: Option<String>,
    status: Option<&'static str>,
}

#[component]
fn ForgotPage(state: ForgotView) -> impl IntoView {
    let error = state
        .error
        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> });
    let status = state
        .status
        .map(|message| view! { <Alert kind=AlertKind::Success message=message /> });

    view! {
        <AuthLayout
            title="Forgot your password?"
            description="Enter the email associated with your account and we will send you instructions to reset it."
        >
            <form method="post" action="/forgot" novalidate>
                <TextInput
                    label="Email address"
                    name=Field::Email.name()
                    kind="email"
                    value=state.email
                    error=state.errors.get(Field::Email)
                />
                {error}
                {status}
                <Button>"Send reset link"</Button>
            </form>
            <p>"Remembered your password? " <a href="/login">"Return to login"</a></p>
        </AuthLayout>
    }
}

fn page(status: StatusCode, view: ForgotView) -> Response {
    (status, render(|| view! { <ForgotPage state=view /> })).into_response()
}

pub async fn show(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    flow.reset().await;
    page(StatusCode::OK, ForgotView::default())
}

pub async fn submit(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
    requests: Extension<Arc<ResetRequests>>,
    Form(form): Form<ForgotForm>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    flow.reset().await;

    if let Err(errors) = validate_reset(&form.email) {
        let view = ForgotView {
            email: form.email,
            errors,
            ..ForgotView::default()
        };
        return page(StatusCode::UNPROCESSABLE_ENTITY, view);
    }

    let Some(_guard) = requests.try_begin() else {
        let err = AuthError::Busy;
        let view = ForgotView {
            email: form.email,
            error: Some(err.to_string()),
            ..ForgotView::default()
        };
        return page(status_for(&err), view);
    };

    let result = session
        .request_password_reset(&form.email)
        .instrument(info_span!("password_reset"))
        .await;

    match result {
        Ok(()) => {
            debug!("Password reset accepted");
            let view = ForgotView {
                status: Some(RESET_STATUS),
                ..ForgotView::default()
            };
            page(StatusCode::OK, view)
        }
        Err(err) => {
            let view = ForgotView {
                email: form.email,
                error: Some(err.to_string()),
                ..ForgotView::default()
            };
            page(status_for(&err), view)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RESET_STATUS, ResetRequests};
    use crate::{
        validation::MSG_EMAIL_LOGIN,
        web::tests::{fixture, get_page, post_form, with_latency},
    };
    use axum::http::StatusCode;
    use std::time::Duration;

    #[test]
    fn reset_requests_allow_one_at_a_time() {
        let requests = ResetRequests::default();
        let guard = requests.try_begin();
        assert!(guard.is_some());
        assert!(requests.try_begin().is_none());
        drop(guard);
        assert!(requests.try_begin().is_some());
    }

    #[tokio::test]
    async fn overlapping_submissions_are_rejected() -> anyhow::Result<()> {
        let fixture = with_latency(Duration::from_millis(300));
        fixture.session.init().await;

        let first = {
            let app = fixture.app.clone();
            tokio::spawn(async move {
                post_form(&app, "/forgot", "email=alice%40example.com").await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let page = post_form(&fixture.app, "/forgot", "email=alice%40example.com").await?;
        assert_eq!(page.status, StatusCode::CONFLICT);
        assert!(!page.body.contains(RESET_STATUS));

        let page = first.await??;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains(RESET_STATUS));
        Ok(())
    }

    #[tokio::test]
    async fn shows_the_reset_form() -> anyhow::Result<()> {
        let fixture = fixture().await;
        let page = get_page(&fixture.app, "/forgot").await?;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Forgot your password?"));
        assert!(page.body.contains("Return to login"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() -> anyhow::Result<()> {
        let fixture = fixture().await;
        let page = post_form(&fixture.app, "/forgot", "email=nobody").await?;
        assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(page.body.contains(MSG_EMAIL_LOGIN));
        assert!(!page.body.contains(RESET_STATUS));
        Ok(())
    }

    #[tokio::test]
    async fn outcome_does_not_reveal_whether_the_account_exists() -> anyhow::Result<()> {
        let fixture = fixture().await;
        let page = post_form(&fixture.app, "/forgot", "email=nobody%40example.com").await?;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains(RESET_STATUS));
        Ok(())
    }
}
