use crate::storage::StorageError;

/// Failures returned by the auth service. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email, or input that fails the login shape checks.
    #[error("Invalid email or password.")]
    InvalidCredentials,
    /// Known email, password mismatch. Shares the message of `InvalidCredentials`.
    #[error("Invalid email or password.")]
    WrongPassword,
    #[error("Please provide a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
    #[error("An account with this email already exists.")]
    EmailTaken,
    #[error("This username is already taken.")]
    UsernameTaken,
    #[error("A request is already in progress. Please wait.")]
    Busy,
    #[error("Unable to save your data. Please try again.")]
    Storage(#[from] StorageError),
}
