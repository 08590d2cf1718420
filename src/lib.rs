//! # Onboard
//!
//! `onboard` serves the sign-in side of a small team portal: login with an
//! optional "keep me logged in" preference, a password reset request, a
//! five-step registration wizard and a dashboard that only signed-in users
//! can open.
//!
//! There is no backend. Accounts live in a JSON document under the data
//! directory, and the auth service is a mock that waits a fixed latency
//! before answering, so the pages behave like they would against a network
//! service.
//!
//! ## Layout
//!
//! - [`validation`]: field rules and their user-facing messages.
//! - [`storage`]: string key-value store (file-backed or in memory).
//! - [`accounts`]: account records and the registered-users collection.
//! - [`auth`]: the auth service seam and its mock.
//! - [`session`]: the current user, hydrated from storage at startup.
//! - [`registration`]: the wizard state machine.
//! - [`web`]: axum router and HTML pages.
//! - [`cli`]: argument parsing, telemetry and the server action.

pub mod accounts;
pub mod auth;
pub mod cli;
pub mod registration;
pub mod session;
pub mod storage;
pub mod validation;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_names_the_package() {
        assert_eq!(
            APP_USER_AGENT,
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn commit_hash_is_never_empty() {
        assert!(!GIT_COMMIT_HASH.is_empty());
    }
}
