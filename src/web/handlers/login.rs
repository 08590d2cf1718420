use super::{ensure_ready, status_for};
use crate::{
    registration::RegistrationFlow,
    session::{Credentials, SessionContext},
    validation::{Field, FieldErrors, validate_login},
    web::components::{Alert, AlertKind, AuthLayout, Button, TextInput, render},
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use leptos::prelude::*;
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "keep-logged-in")]
    pub keep_logged_in: Option<String>,
}

#[derive(Clone, Default)]
struct LoginView {
    email: String,
    keep_logged_in: bool,
    errors: FieldErrors,
    form_error: Option<String>,
}

#[component]
fn LoginPage(state: LoginView) -> impl IntoView {
    let checked = state.keep_logged_in.then_some("");
    let form_error = state
        .form_error
        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> });

    view! {
        <AuthLayout
            title="Welcome back"
            description="Sign in to access your personalized dashboard and team updates."
        >
            <form method="post" action="/login" novalidate>
                <TextInput
                    label="Email address"
                    name=Field::Email.name()
                    kind="email"
                    value=state.email
                    error=state.errors.get(Field::Email)
                />
                // Passwords are never echoed back.
                <TextInput
                    label="Password"
                    name=Field::Password.name()
                    kind="password"
                    value=""
                    error=state.errors.get(Field::Password)
                />
                <label>
                    <input id="keep-logged-in" name="keep-logged-in" type="checkbox" checked=checked />
                    "Keep me logged in"
                </label>
                <a href="/forgot">"Forgot password?"</a>
                {form_error}
                <Button>"Sign in"</Button>
            </form>
            <p>"Do not have an account yet? " <a href="/register">"Sign up"</a></p>
        </AuthLayout>
    }
}

fn page(status: StatusCode, view: LoginView) -> Response {
    (status, render(|| view! { <LoginPage state=view /> })).into_response()
}

pub async fn show(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    flow.reset().await;
    page(StatusCode::OK, LoginView::default())
}

pub async fn submit(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    flow.reset().await;

    let keep_logged_in = form.keep_logged_in.is_some();

    if let Err(errors) = validate_login(&form.email, &form.password) {
        debug!("Login form rejected: {errors}");
        let view = LoginView {
            email: form.email,
            keep_logged_in,
            errors,
            form_error: None,
        };
        return page(StatusCode::UNPROCESSABLE_ENTITY, view);
    }

    let credentials = Credentials {
        email: form.email.clone(),
        password: SecretString::from(form.password),
        keep_logged_in,
    };

    match session.login(credentials).await {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(err) => {
            warn!("Login failed: {err:?}");
            let view = LoginView {
                email: form.email,
                keep_logged_in,
                errors: FieldErrors::new(),
                form_error: Some(err.to_string()),
            };
            page(status_for(&err), view)
        }
    }
}
