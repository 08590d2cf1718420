use super::ensure_ready;
use crate::{
    registration::{
        AccountSetup, Designation, Draft, Event, FlowSnapshot, PersonalDetails, ROLE_OPTIONS,
        RegistrationFlow, RolePreference, Step, StepError,
    },
    session::SessionContext,
    validation::{Field, FieldErrors},
    web::components::{
        Alert, AlertKind, AuthLayout, Button, Select, TextArea, TextInput, render,
    },
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use leptos::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const ACTION_BACK: &str = "back";

/// One submission of the wizard. `step` names the step the form was rendered
/// for; `action` is `next` or `back`.
#[derive(Clone, Deserialize, Default)]
#[serde(default)]
pub struct RegisterForm {
    pub step: String,
    pub action: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub department: String,
    pub position: String,
    pub description: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    fn event(&self, step: Step) -> Option<Event> {
        if self.action == ACTION_BACK {
            return Some(Event::Back);
        }
        let event = match step {
            Step::Personal => Event::SubmitPersonal(PersonalDetails {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                phone_number: self.phone_number.clone(),
            }),
            Step::Role => Event::SubmitRole(RolePreference {
                role: self.role.clone(),
            }),
            Step::Designation => Event::SubmitDesignation(Designation {
                department: self.department.clone(),
                position: self.position.clone(),
                description: self.description.clone(),
            }),
            Step::Account => Event::SubmitAccount(AccountSetup {
                username: self.username.clone(),
                password: self.password.clone(),
                confirm_password: self.confirm_password.clone(),
            }),
            Step::Congratulations => return None,
        };
        Some(event)
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::Role => &self.role,
            Field::Department => &self.department,
            Field::Position => &self.position,
            Field::Description => &self.description,
            Field::Username => &self.username,
            Field::Password | Field::ConfirmPassword => "",
        }
    }
}

fn draft_value(draft: &Draft, field: Field) -> &str {
    let value = match field {
        Field::FullName => &draft.full_name,
        Field::Email => &draft.email,
        Field::PhoneNumber => &draft.phone_number,
        Field::Role => &draft.role,
        Field::Department => &draft.department,
        Field::Position => &draft.position,
        Field::Description => &draft.description,
        Field::Username => &draft.username,
        Field::Password | Field::ConfirmPassword => return "",
    };
    value.as_deref().unwrap_or_default()
}

/// Values and errors for the fields of one step. Typed values win over the
/// draft when the step was rejected.
struct StepForm {
    draft: Draft,
    submitted: Option<RegisterForm>,
    errors: FieldErrors,
}

impl StepForm {
    fn value(&self, field: Field) -> String {
        self.submitted
            .as_ref()
            .map_or_else(|| draft_value(&self.draft, field), |form| form.value(field))
            .to_string()
    }

    fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field)
    }

    fn input(&self, label: &'static str, field: Field, kind: &'static str) -> AnyView {
        view! {
            <TextInput
                label=label
                name=field.name()
                kind=kind
                value=self.value(field)
                error=self.error(field)
            />
        }
        .into_any()
    }

    fn fields(&self, step: Step) -> AnyView {
        match step {
            Step::Personal => view! {
                {self.input("Full name", Field::FullName, "text")}
                {self.input("Email address", Field::Email, "email")}
                {self.input("Phone number", Field::PhoneNumber, "tel")}
            }
            .into_any(),
            Step::Role => view! {
                <Select
                    label="What role are you most interested in?"
                    name=Field::Role.name()
                    options=&ROLE_OPTIONS
                    selected=self.value(Field::Role)
                    error=self.error(Field::Role)
                />
            }
            .into_any(),
            Step::Designation => view! {
                {self.input("Department", Field::Department, "text")}
                {self.input("Position title", Field::Position, "text")}
                <TextArea
                    label="Brief description"
                    name=Field::Description.name()
                    value=self.value(Field::Description)
                    error=self.error(Field::Description)
                />
            }
            .into_any(),
            // Passwords are never echoed back.
            Step::Account => view! {
                {self.input("Username", Field::Username, "text")}
                {self.input("Password", Field::Password, "password")}
                {self.input("Confirm password", Field::ConfirmPassword, "password")}
            }
            .into_any(),
            Step::Congratulations => ().into_any(),
        }
    }
}

fn buttons(step: Step) -> AnyView {
    match step {
        Step::Personal => view! { <Button action="next">"Continue"</Button> }.into_any(),
        Step::Role | Step::Designation => view! {
            <Button action=ACTION_BACK skip_validation=true>"Back"</Button>
            <Button action="next">"Continue"</Button>
        }
        .into_any(),
        Step::Account => view! {
            <Button action=ACTION_BACK skip_validation=true>"Back"</Button>
            <Button action="next">"Create account"</Button>
        }
        .into_any(),
        Step::Congratulations => {
            view! { <Button action="next">"Continue to login"</Button> }.into_any()
        }
    }
}

#[component]
fn Summary(draft: Draft) -> impl IntoView {
    let entries = draft
        .summary()
        .into_iter()
        .map(|(label, value)| {
            let value = value.to_string();
            view! {
                <dt>{label}</dt>
                <dd>{value}</dd>
            }
        })
        .collect_view();

    view! {
        <div>
            <h2>"You are all set!"</h2>
            <p>
                "Thank you for sharing your details. We have created your account and saved your preferences. You can now sign in to explore the dashboard."
            </p>
        </div>
        <h3>"Summary"</h3>
        <dl>{entries}</dl>
    }
}

#[component]
fn RegisterPage(snapshot: FlowSnapshot, submitted: Option<RegisterForm>) -> impl IntoView {
    let FlowSnapshot { step, draft, error } = snapshot;
    let (errors, form_error) = match error {
        Some(StepError::Invalid(errors)) => (errors, None),
        Some(other) => (FieldErrors::new(), Some(other.to_string())),
        None => (FieldErrors::new(), None),
    };
    let form_error =
        form_error.map(|message| view! { <Alert kind=AlertKind::Error message=message /> });
    let progress = format!("Step {} of 5", step.number());
    let summary =
        (step == Step::Congratulations).then(|| view! { <Summary draft=draft.clone() /> });
    let form = StepForm {
        draft,
        submitted,
        errors,
    };
    let fields = form.fields(step);

    view! {
        <AuthLayout
            title=step.title()
            description=step.description()
            action_label="Back to login"
            action_href="/login"
            aside_title="Collaborate with a world-class team"
            aside_description="Discover a supportive community of engineers, designers, and product leaders shaping the future of digital experiences."
        >
            <p>{progress}</p>
            {summary}
            <form method="post" action="/register" novalidate>
                <input type="hidden" name="step" value=step.as_str() />
                {fields}
                {form_error}
                {buttons(step)}
            </form>
        </AuthLayout>
    }
}

fn page(status: StatusCode, snapshot: FlowSnapshot, submitted: Option<RegisterForm>) -> Response {
    let html = render(|| view! { <RegisterPage snapshot=snapshot submitted=submitted /> });
    (status, html).into_response()
}

const fn status_for(error: Option<&StepError>) -> StatusCode {
    match error {
        None => StatusCode::OK,
        Some(StepError::Rejected(_) | StepError::Pending) => StatusCode::CONFLICT,
        Some(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

pub async fn show(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }
    let snapshot = flow.snapshot().await;
    page(StatusCode::OK, snapshot, None)
}

pub async fn submit(
    session: Extension<Arc<SessionContext>>,
    flow: Extension<Arc<RegistrationFlow>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Err(loading) = ensure_ready(&session).await {
        return loading;
    }

    let current = flow.snapshot().await;
    if form.step.parse::<Step>().ok() != Some(current.step) {
        debug!(
            "Stale registration form for step {:?}, wizard is at {}",
            form.step, current.step
        );
        return page(StatusCode::OK, current, None);
    }

    let Some(event) = form.event(current.step) else {
        flow.reset().await;
        return Redirect::to("/login").into_response();
    };

    let snapshot = flow.dispatch(&session, event).await;

    // Keep what the user typed when the step did not advance.
    let submitted = (snapshot.step == current.step && snapshot.error.is_some()).then_some(form);
    page(status_for(snapshot.error.as_ref()), snapshot, submitted)
}
