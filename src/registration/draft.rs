//! Per-step form input and the draft accumulated across the wizard.

use crate::{
    accounts::Registration,
    validation::{
        Field, FieldErrors, MSG_CONFIRM_PASSWORD, MSG_DEPARTMENT, MSG_DESCRIPTION, MSG_EMAIL,
        MSG_FULL_NAME, MSG_PASSWORD, MSG_PHONE, MSG_POSITION, MSG_ROLE, MSG_USERNAME,
        valid_description, valid_email, valid_new_password, valid_phone_number, valid_required,
        valid_username,
    },
};
use std::fmt;

/// Roles offered by the role preference step.
pub const ROLE_OPTIONS: [&str; 5] = [
    "Frontend Developer",
    "Backend Developer",
    "Full-stack Developer",
    "Product Manager",
    "UI/UX Designer",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl PersonalDetails {
    /// Checks the step and returns the trimmed values.
    ///
    /// # Errors
    /// Returns every failing field of the step.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::FullName, valid_required(&self.full_name), MSG_FULL_NAME);
        errors.check(Field::Email, valid_email(&self.email), MSG_EMAIL);
        errors.check(
            Field::PhoneNumber,
            valid_phone_number(&self.phone_number),
            MSG_PHONE,
        );
        errors.into_result(Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RolePreference {
    pub role: String,
}

impl RolePreference {
    /// # Errors
    /// Returns the role message when nothing was selected.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Role, valid_required(&self.role), MSG_ROLE);
        errors.into_result(Self {
            role: self.role.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Designation {
    pub department: String,
    pub position: String,
    pub description: String,
}

impl Designation {
    /// # Errors
    /// Returns every failing field of the step.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(
            Field::Department,
            valid_required(&self.department),
            MSG_DEPARTMENT,
        );
        errors.check(Field::Position, valid_required(&self.position), MSG_POSITION);
        errors.check(
            Field::Description,
            valid_description(&self.description),
            MSG_DESCRIPTION,
        );
        errors.into_result(Self {
            department: self.department.trim().to_string(),
            position: self.position.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountSetup {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl AccountSetup {
    /// Checks the credentials; the username is trimmed, the password kept verbatim.
    ///
    /// # Errors
    /// Returns every failing field of the step.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Username, valid_username(&self.username), MSG_USERNAME);
        errors.check(
            Field::Password,
            valid_new_password(&self.password),
            MSG_PASSWORD,
        );
        errors.check(
            Field::ConfirmPassword,
            self.password == self.confirm_password,
            MSG_CONFIRM_PASSWORD,
        );
        errors.into_result(Self {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

impl fmt::Debug for AccountSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSetup")
            .field("username", &self.username)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .finish()
    }
}

/// Registration fields collected so far. Lives in memory only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn filled(value: Option<&String>) -> Option<String> {
    value.filter(|value| !value.is_empty()).cloned()
}

impl Draft {
    #[must_use]
    pub fn with_personal(mut self, personal: PersonalDetails) -> Self {
        self.full_name = Some(personal.full_name);
        self.email = Some(personal.email);
        self.phone_number = Some(personal.phone_number);
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: RolePreference) -> Self {
        self.role = Some(role.role);
        self
    }

    #[must_use]
    pub fn with_designation(mut self, designation: Designation) -> Self {
        self.department = Some(designation.department);
        self.position = Some(designation.position);
        self.description = Some(designation.description);
        self
    }

    #[must_use]
    pub fn with_account(mut self, account: AccountSetup) -> Self {
        self.username = Some(account.username);
        self.password = Some(account.password);
        self
    }

    /// The complete record, if all nine fields are present and non-empty.
    #[must_use]
    pub fn to_registration(&self) -> Option<Registration> {
        Some(Registration {
            full_name: filled(self.full_name.as_ref())?,
            email: filled(self.email.as_ref())?,
            phone_number: filled(self.phone_number.as_ref())?,
            role: filled(self.role.as_ref())?,
            department: filled(self.department.as_ref())?,
            position: filled(self.position.as_ref())?,
            description: filled(self.description.as_ref())?,
            username: filled(self.username.as_ref())?,
            password: filled(self.password.as_ref())?,
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.to_registration().is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Labelled values shown on the congratulations page; the password is left out.
    #[must_use]
    pub fn summary(&self) -> Vec<(&'static str, &str)> {
        [
            ("Full name", &self.full_name),
            ("Email", &self.email),
            ("Phone number", &self.phone_number),
            ("Preferred role", &self.role),
            ("Department", &self.department),
            ("Position", &self.position),
            ("About you", &self.description),
            ("Username", &self.username),
        ]
        .into_iter()
        .map(|(label, value)| (label, value.as_deref().unwrap_or_default()))
        .collect()
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .field("department", &self.department)
            .field("position", &self.position)
            .field("description", &self.description)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn personal() -> PersonalDetails {
        PersonalDetails {
            full_name: "Alice Liddell".to_string(),
            email: "alice@example.com".to_string(),
            phone_number: "+44 1234 5678".to_string(),
        }
    }

    pub(crate) fn role() -> RolePreference {
        RolePreference {
            role: "Backend Developer".to_string(),
        }
    }

    pub(crate) fn designation() -> Designation {
        Designation {
            department: "Engineering".to_string(),
            position: "Senior Engineer".to_string(),
            description: "I enjoy building reliable backend systems.".to_string(),
        }
    }

    pub(crate) fn account(username: &str) -> AccountSetup {
        AccountSetup {
            username: username.to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn personal_validation_trims_values() {
        let input = PersonalDetails {
            full_name: "  Alice Liddell ".to_string(),
            email: " alice@example.com ".to_string(),
            phone_number: " 123456789 ".to_string(),
        };
        let valid = input.validate();
        assert_eq!(
            valid.map(|valid| (valid.full_name, valid.email, valid.phone_number)),
            Ok((
                "Alice Liddell".to_string(),
                "alice@example.com".to_string(),
                "123456789".to_string()
            ))
        );
    }

    #[test]
    fn personal_validation_reports_all_fields() {
        let Err(errors) = PersonalDetails::default().validate() else {
            panic!("expected errors");
        };
        assert_eq!(errors.get(Field::FullName), Some(MSG_FULL_NAME));
        assert_eq!(errors.get(Field::Email), Some(MSG_EMAIL));
        assert_eq!(errors.get(Field::PhoneNumber), Some(MSG_PHONE));
    }

    #[test]
    fn designation_requires_a_long_enough_description() {
        let mut input = designation();
        input.description = "Too short".to_string();
        let Err(errors) = input.validate() else {
            panic!("expected errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Description), Some(MSG_DESCRIPTION));
    }

    #[test]
    fn account_validation_checks_confirmation_verbatim() {
        let mut input = account("alice01");
        input.confirm_password = "secret1 ".to_string();
        let Err(errors) = input.validate() else {
            panic!("expected errors");
        };
        assert_eq!(errors.get(Field::ConfirmPassword), Some(MSG_CONFIRM_PASSWORD));

        let mut input = account(" ab ");
        input.password = "12345".to_string();
        input.confirm_password = "12345".to_string();
        let Err(errors) = input.validate() else {
            panic!("expected errors");
        };
        assert_eq!(errors.get(Field::Username), Some(MSG_USERNAME));
        assert_eq!(errors.get(Field::Password), Some(MSG_PASSWORD));
        assert_eq!(errors.get(Field::ConfirmPassword), None);
    }

    #[test]
    fn draft_completeness_requires_all_nine_fields() {
        let draft = Draft::default()
            .with_personal(personal())
            .with_role(role())
            .with_designation(designation());
        assert!(!draft.is_complete());

        let draft = draft.with_account(account("alice01"));
        assert!(draft.is_complete());

        let mut emptied = draft.clone();
        emptied.position = Some(String::new());
        assert!(!emptied.is_complete());
    }

    #[test]
    fn summary_leaves_out_the_password() {
        let draft = Draft::default()
            .with_personal(personal())
            .with_account(account("alice01"));
        let summary = draft.summary();
        assert_eq!(summary.len(), 8);
        assert!(summary.iter().all(|(_, value)| *value != "secret1"));
        assert!(summary.contains(&("Username", "alice01")));
        assert!(summary.contains(&("Department", "")));
        assert!(!format!("{draft:?}").contains("secret1"));
    }
}
