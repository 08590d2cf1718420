use super::{AuthError, AuthFuture, AuthService};
use crate::{
    accounts::{Account, AccountRepository, Registration, SessionUser},
    validation::{valid_email, valid_login_password, valid_new_password},
};
use secrecy::{ExposeSecret, SecretString};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::sleep;
use tracing::{debug, info, instrument};
use ulid::{Generator, Ulid};

/// Simulated round-trip time of every call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(600);

/// Auth service backed by the local account store with an artificial delay.
pub struct MockAuthService {
    accounts: Arc<dyn AccountRepository>,
    latency: Duration,
    ids: Mutex<Generator>,
}

impl MockAuthService {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self {
            accounts,
            latency: DEFAULT_LATENCY,
            ids: Mutex::new(Generator::new()),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }

    /// Monotonic ULIDs keep identifiers unique within the process, even when
    /// two accounts are created in the same millisecond.
    fn next_id(&self) -> String {
        let generated = self
            .ids
            .lock()
            .ok()
            .and_then(|mut generator| generator.generate().ok());
        format!("user-{}", generated.unwrap_or_else(Ulid::new))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<SessionUser, AuthError> {
        self.simulate_latency().await;

        let password = password.expose_secret();
        if !valid_email(email) || !valid_login_password(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let accounts = self.accounts.list();
        let Some(account) = accounts
            .iter()
            .find(|account| account.email.to_lowercase() == email.to_lowercase())
        else {
            debug!("No account registered for this email");
            return Err(AuthError::InvalidCredentials);
        };

        if account.password != password {
            debug!("Password mismatch for account {}", account.id);
            return Err(AuthError::WrongPassword);
        }

        info!("Account {} logged in", account.id);
        Ok(account.session_user())
    }

    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.simulate_latency().await;

        if !valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        // Nothing is sent; the outcome is the same whether or not the account exists.
        debug!("Password reset requested");
        Ok(())
    }

    #[instrument(skip_all, fields(username = %registration.username.trim()))]
    pub async fn register(&self, registration: Registration) -> Result<SessionUser, AuthError> {
        self.simulate_latency().await;

        let registration = registration.trimmed();

        if !valid_email(&registration.email) {
            return Err(AuthError::InvalidEmail);
        }

        if !valid_new_password(&registration.password) {
            return Err(AuthError::PasswordTooShort);
        }

        let mut accounts = self.accounts.list();
        let email = registration.email.to_lowercase();
        let username = registration.username.to_lowercase();

        if accounts
            .iter()
            .any(|account| account.email.to_lowercase() == email)
        {
            return Err(AuthError::EmailTaken);
        }

        if accounts
            .iter()
            .any(|account| account.username.to_lowercase() == username)
        {
            return Err(AuthError::UsernameTaken);
        }

        let account = Account::new(self.next_id(), registration);
        let user = account.session_user();
        accounts.push(account);
        self.accounts.persist(&accounts)?;

        info!("Registered account {}", user.id);
        Ok(user)
    }
}

impl AuthService for MockAuthService {
    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
    ) -> AuthFuture<'a, SessionUser> {
        Box::pin(self.login(email, password))
    }

    fn request_password_reset<'a>(&'a self, email: &'a str) -> AuthFuture<'a, ()> {
        Box::pin(self.request_password_reset(email))
    }

    fn register(&self, registration: Registration) -> AuthFuture<'_, SessionUser> {
        Box::pin(self.register(registration))
    }
}
