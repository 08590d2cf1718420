//! Field-level validation rules shared by the login, password reset and
//! registration forms.
//!
//! Every rule is a pure predicate over the raw form input. Failures are
//! collected per field into [`FieldErrors`] so a form can surface all of its
//! messages at once. These checks run before any service call.

use regex::Regex;
use std::{collections::BTreeMap, fmt};

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_PHONE_CHARS: usize = 9;
pub const MIN_DESCRIPTION_CHARS: usize = 20;
pub const MIN_USERNAME_CHARS: usize = 4;

pub const MSG_EMAIL: &str = "Please provide a valid email address.";
pub const MSG_EMAIL_LOGIN: &str = "Please enter a valid email address.";
pub const MSG_PASSWORD: &str = "Password must be at least 6 characters.";
pub const MSG_FULL_NAME: &str = "Please enter your full name.";
pub const MSG_PHONE: &str = "Phone number must contain at least 9 digits.";
pub const MSG_ROLE: &str = "Please select a role that best matches your interests.";
pub const MSG_DEPARTMENT: &str = "Please specify the department you would join.";
pub const MSG_POSITION: &str = "Please enter the position title.";
pub const MSG_DESCRIPTION: &str = "Tell us a bit more (at least 20 characters).";
pub const MSG_USERNAME: &str = "Username must be at least 4 characters.";
pub const MSG_CONFIRM_PASSWORD: &str = "Confirmation does not match the password.";

/// Form fields that can carry a validation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    PhoneNumber,
    Role,
    Department,
    Position,
    Description,
    Username,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Form input name used by the HTML views.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Role => "role",
            Self::Department => "department",
            Self::Position => "position",
            Self::Description => "description",
            Self::Username => "username",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
        }
    }
}

/// Messages for every field that failed validation, ordered by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` when `valid` is false.
    pub fn check(&mut self, field: Field, valid: bool, message: &'static str) {
        if !valid {
            self.0.insert(field, message);
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// Returns `value` when no field failed, otherwise the collected errors.
    ///
    /// # Errors
    /// Returns `self` if at least one rule failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(_, message)| message).collect();
        write!(formatter, "{}", messages.join(" "))
    }
}

impl std::error::Error for FieldErrors {}

/// Minimal email shape check: something, `@`, something, `.`, something.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"\S+@\S+\.\S+").is_ok_and(|re| re.is_match(email))
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[must_use]
pub fn valid_login_password(password: &str) -> bool {
    has_min_chars(password.trim(), MIN_PASSWORD_CHARS)
}

#[must_use]
pub fn valid_new_password(password: &str) -> bool {
    has_min_chars(password, MIN_PASSWORD_CHARS)
}

#[must_use]
pub fn valid_required(value: &str) -> bool {
    !value.trim().is_empty()
}

#[must_use]
pub fn valid_phone_number(phone_number: &str) -> bool {
    has_min_chars(phone_number.trim(), MIN_PHONE_CHARS)
}

#[must_use]
pub fn valid_description(description: &str) -> bool {
    has_min_chars(description.trim(), MIN_DESCRIPTION_CHARS)
}

#[must_use]
pub fn valid_username(username: &str) -> bool {
    has_min_chars(username.trim(), MIN_USERNAME_CHARS)
}

/// Checks the login form before the credentials are sent to the auth service.
///
/// # Errors
/// Returns the messages for the email and/or password fields.
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(Field::Email, valid_email(email), MSG_EMAIL_LOGIN);
    errors.check(Field::Password, valid_login_password(password), MSG_PASSWORD);
    errors.into_result(())
}

/// Checks the forgot-password form.
///
/// # Errors
/// Returns the email message when the address is malformed.
pub fn validate_reset(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.check(Field::Email, valid_email(email), MSG_EMAIL_LOGIN);
    errors.into_result(())
}
