//! Auth service capability and its mock implementation.
//!
//! Views and the session holder talk to [`AuthService`] only, so the mock
//! (fixed latency, local account store) can be replaced by a networked
//! implementation without touching validation or the registration wizard.
//! Passwords must never be logged.

mod error;
mod in_flight;
mod mock;

pub use error::AuthError;
pub use in_flight::{InFlight, InFlightGuard};
pub use mock::{DEFAULT_LATENCY, MockAuthService};

use crate::accounts::{Registration, SessionUser};
use secrecy::SecretString;
use std::{future::Future, pin::Pin};

pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + Send + 'a>>;

pub trait AuthService: Send + Sync {
    /// Authenticates by email (case-insensitive) and exact password.
    fn login<'a>(&'a self, email: &'a str, password: &'a SecretString)
    -> AuthFuture<'a, SessionUser>;

    /// Accepts any well-formed email without revealing whether an account exists.
    fn request_password_reset<'a>(&'a self, email: &'a str) -> AuthFuture<'a, ()>;

    /// Creates an account and returns its session projection.
    fn register(&self, registration: Registration) -> AuthFuture<'_, SessionUser>;
}
