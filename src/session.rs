//! Session holder for the current user.
//!
//! [`SessionContext`] is created once at startup and injected into the view
//! layer. It starts in [`SessionPhase::Initializing`] and must be hydrated
//! from local storage with [`SessionContext::init`] before guards may redirect
//! or render protected content. Only the reduced [`SessionUser`] projection is
//! kept in memory and in storage.

use crate::{
    accounts::{Registration, SessionUser},
    auth::{AuthError, AuthService, InFlight},
    storage::{AUTH_USER_KEY, KEEP_LOGGED_IN_KEY, KeyValueStore, StorageError},
};
use secrecy::SecretString;
use std::{fmt, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

const KEEP_LOGGED_IN_SENTINEL: &str = "true";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Ready,
}

/// Login form input handed to [`SessionContext::login`].
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub keep_logged_in: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .field("keep_logged_in", &self.keep_logged_in)
            .finish()
    }
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    user: Option<SessionUser>,
    keep_logged_in: bool,
}

impl SessionState {
    const fn initializing() -> Self {
        Self {
            phase: SessionPhase::Initializing,
            user: None,
            keep_logged_in: false,
        }
    }
}

pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    auth: Arc<dyn AuthService>,
    state: RwLock<SessionState>,
    in_flight: InFlight,
}

impl SessionContext {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, auth: Arc<dyn AuthService>) -> Self {
        Self {
            store,
            auth,
            state: RwLock::new(SessionState::initializing()),
            in_flight: InFlight::new(),
        }
    }

    /// Hydrates the session from storage and marks the holder ready.
    #[instrument(skip(self))]
    pub async fn init(&self) {
        let user = self.read_stored_user();
        let keep_logged_in = match self.store.get(KEEP_LOGGED_IN_KEY) {
            Ok(value) => value.is_some(),
            Err(err) => {
                warn!("Failed to read keep-logged-in preference: {err}");
                false
            }
        };

        let mut state = self.state.write().await;
        if let Some(user) = &user {
            info!("Restored session for {}", user.id);
        }
        state.user = user;
        state.keep_logged_in = keep_logged_in;
        state.phase = SessionPhase::Ready;
    }

    /// Drops the in-memory session; storage is left untouched.
    pub async fn teardown(&self) {
        *self.state.write().await = SessionState::initializing();
        debug!("Session holder torn down");
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.user.clone()
    }

    pub async fn keep_logged_in(&self) -> bool {
        self.state.read().await.keep_logged_in
    }

    /// Authenticates, persists the user and preference, and updates memory.
    ///
    /// # Errors
    /// Returns the auth service failure, `Busy` while another call is
    /// outstanding, or `Storage` if the session cannot be persisted.
    #[instrument(skip(self, credentials), fields(keep_logged_in = credentials.keep_logged_in))]
    pub async fn login(&self, credentials: Credentials) -> Result<SessionUser, AuthError> {
        let _guard = self.in_flight.try_begin().ok_or(AuthError::Busy)?;

        let user = self
            .auth
            .login(&credentials.email, &credentials.password)
            .await?;

        self.persist_session(&user, credentials.keep_logged_in)?;

        let mut state = self.state.write().await;
        state.user = Some(user.clone());
        state.keep_logged_in = credentials.keep_logged_in;
        Ok(user)
    }

    /// Clears the in-memory session and both persisted keys.
    ///
    /// # Errors
    /// Returns an error if storage cannot be written; memory is cleared regardless.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StorageError> {
        {
            let mut state = self.state.write().await;
            state.user = None;
            state.keep_logged_in = false;
        }
        self.store.remove(AUTH_USER_KEY)?;
        self.store.remove(KEEP_LOGGED_IN_KEY)?;
        info!("Logged out");
        Ok(())
    }

    /// Creates an account; the caller still has to log in afterwards.
    ///
    /// # Errors
    /// Returns the auth service failure, or `Busy` while another call is outstanding.
    #[instrument(skip_all)]
    pub async fn register(&self, registration: Registration) -> Result<SessionUser, AuthError> {
        let _guard = self.in_flight.try_begin().ok_or(AuthError::Busy)?;
        self.auth.register(registration).await
    }

    /// Password reset goes straight to the auth service; it never touches the session.
    ///
    /// # Errors
    /// Returns `InvalidEmail` for malformed addresses.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.auth.request_password_reset(email).await
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    fn persist_session(&self, user: &SessionUser, keep_logged_in: bool) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(user)?;
        self.store.set(AUTH_USER_KEY, &serialized)?;
        if keep_logged_in {
            self.store.set(KEEP_LOGGED_IN_KEY, KEEP_LOGGED_IN_SENTINEL)
        } else {
            self.store.remove(KEEP_LOGGED_IN_KEY)
        }
    }

    fn read_stored_user(&self) -> Option<SessionUser> {
        let raw = match self.store.get(AUTH_USER_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("Failed to read stored session: {err}");
                return None;
            }
        };

        // Anything that is not an object with a string `id` counts as no session;
        // other fields are optional.
        serde_json::from_str::<SessionUser>(&raw)
            .map_err(|err| warn!("Ignoring malformed stored session: {err}"))
            .ok()
    }
}
