//! Banners for form-level errors and confirmations. Messages must never carry
//! passwords.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
}

#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: String) -> impl IntoView {
    let role = match kind {
        AlertKind::Error => "alert",
        AlertKind::Success => "status",
    };

    view! { <div role=role>{message}</div> }
}
