//! Registration wizard step sequencer.
//!
//! The wizard is a linear state machine over [`Step`]:
//! `personal -> role -> designation -> account -> congratulations`, with a
//! single step back from `role`, `designation` and `account`. [`transition`]
//! is pure: it validates the submitted step, merges it into the [`Draft`] and
//! reports the `register` call as an effect instead of performing it.
//! [`RegistrationFlow`] drives the effect against the session holder.
//!
//! Invariant: `congratulations` is only ever reached with a complete draft.
//! A transition that would break this resets the wizard to `personal` with an
//! empty draft.

mod draft;
mod flow;

pub use draft::{
    AccountSetup, Designation, Draft, PersonalDetails, ROLE_OPTIONS, RolePreference,
};
pub use flow::{FlowSnapshot, RegistrationFlow};

use crate::{accounts::Registration, validation::FieldErrors};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Step {
    #[default]
    Personal,
    Role,
    Designation,
    Account,
    Congratulations,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Role => "role",
            Self::Designation => "designation",
            Self::Account => "account",
            Self::Congratulations => "congratulations",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Tell us about yourself",
            Self::Role => "Choose your role preference",
            Self::Designation => "Share your designation",
            Self::Account => "Set up your account",
            Self::Congratulations => "Welcome aboard!",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Personal => "We use this information to personalize your onboarding experience.",
            Self::Role => "Let us know where you see yourself contributing the most.",
            Self::Designation => "Help us understand the team you expect to collaborate with.",
            Self::Account => "Create the credentials you will use to access the platform.",
            Self::Congratulations => "Your registration is complete. Review your details below.",
        }
    }

    /// One-based position in the wizard.
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::Personal => 1,
            Self::Role => 2,
            Self::Designation => 3,
            Self::Account => 4,
            Self::Congratulations => 5,
        }
    }

    /// The step reached by going back, if going back is allowed.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Role => Some(Self::Personal),
            Self::Designation => Some(Self::Role),
            Self::Account => Some(Self::Designation),
            Self::Personal | Self::Congratulations => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown registration step: {0}")]
pub struct UnknownStep(String);

impl FromStr for Step {
    type Err = UnknownStep;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "personal" => Ok(Self::Personal),
            "role" => Ok(Self::Role),
            "designation" => Ok(Self::Designation),
            "account" => Ok(Self::Account),
            "congratulations" => Ok(Self::Congratulations),
            other => Err(UnknownStep(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Event {
    SubmitPersonal(PersonalDetails),
    SubmitRole(RolePreference),
    SubmitDesignation(Designation),
    SubmitAccount(AccountSetup),
    /// The `register` effect succeeded.
    Registered,
    /// The `register` effect failed with a user-facing message.
    RegisterFailed(String),
    Back,
    /// Leaving the registration flow.
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("Please complete each step before creating your account.")]
    Incomplete,
    #[error("{0}")]
    Rejected(String),
    #[error("That action is not available on this step.")]
    OutOfOrder,
    #[error("Your account is still being created.")]
    Pending,
}

/// Result of applying one event.
#[derive(Clone, Debug)]
pub struct Transition {
    pub step: Step,
    pub draft: Draft,
    pub error: Option<StepError>,
    /// Set when the caller must submit this registration and report back
    /// with [`Event::Registered`] or [`Event::RegisterFailed`].
    pub effect: Option<Registration>,
}

impl Transition {
    const fn to(step: Step, draft: Draft) -> Self {
        Self {
            step,
            draft,
            error: None,
            effect: None,
        }
    }

    const fn stay(step: Step, draft: Draft, error: StepError) -> Self {
        Self {
            step,
            draft,
            error: Some(error),
            effect: None,
        }
    }

    fn guarded(self) -> Self {
        if self.step == Step::Congratulations && !self.draft.is_complete() {
            return Self::to(Step::Personal, Draft::default());
        }
        self
    }
}

/// Applies `event` to the wizard at `step` with the accumulated `draft`.
#[must_use]
pub fn transition(step: Step, draft: Draft, event: Event) -> Transition {
    let next = match (step, event) {
        (_, Event::Reset) => Transition::to(Step::Personal, Draft::default()),

        (Step::Personal, Event::SubmitPersonal(input)) => match input.validate() {
            Ok(valid) => Transition::to(Step::Role, draft.with_personal(valid)),
            Err(errors) => Transition::stay(step, draft, StepError::Invalid(errors)),
        },

        (Step::Role, Event::SubmitRole(input)) => match input.validate() {
            Ok(valid) => Transition::to(Step::Designation, draft.with_role(valid)),
            Err(errors) => Transition::stay(step, draft, StepError::Invalid(errors)),
        },

        (Step::Designation, Event::SubmitDesignation(input)) => match input.validate() {
            Ok(valid) => Transition::to(Step::Account, draft.with_designation(valid)),
            Err(errors) => Transition::stay(step, draft, StepError::Invalid(errors)),
        },

        (Step::Account, Event::SubmitAccount(input)) => match input.validate() {
            Ok(valid) => {
                let draft = draft.with_account(valid);
                match draft.to_registration() {
                    Some(registration) => Transition {
                        step,
                        draft,
                        error: None,
                        effect: Some(registration),
                    },
                    None => Transition::stay(step, draft, StepError::Incomplete),
                }
            }
            Err(errors) => Transition::stay(step, draft, StepError::Invalid(errors)),
        },

        (Step::Account, Event::Registered) => Transition::to(Step::Congratulations, draft),

        (Step::Account, Event::RegisterFailed(message)) => {
            Transition::stay(step, draft, StepError::Rejected(message))
        }

        // A register outcome arriving after the wizard moved on is dropped.
        (_, Event::Registered | Event::RegisterFailed(_)) => Transition::to(step, draft),

        (_, Event::Back) => match step.previous() {
            Some(previous) => Transition::to(previous, draft),
            None => Transition::stay(step, draft, StepError::OutOfOrder),
        },

        (_, _) => Transition::stay(step, draft, StepError::OutOfOrder),
    };

    next.guarded()
}
