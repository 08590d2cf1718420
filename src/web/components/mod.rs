//! Shared leptos components for the server-rendered pages.

pub(crate) mod layout;
pub(crate) mod ui;

pub(crate) use layout::{AuthLayout, Document, LoadingScreen, render};
pub(crate) use ui::{Alert, AlertKind, Button, Select, TextArea, TextInput};
