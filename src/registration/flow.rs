//! Wizard state shared by the register pages.
//!
//! While a registration is outstanding only `Reset` is accepted; anything
//! else leaves the account step in place with [`StepError::Pending`]. A reset
//! in that window abandons the summary, but the account is still created.

use super::{Draft, Event, Step, StepError, transition};
use crate::{accounts::Registration, session::SessionContext};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct FlowState {
    step: Step,
    draft: Draft,
    error: Option<StepError>,
    submitting: bool,
}

/// What the register view renders after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowSnapshot {
    pub step: Step,
    pub draft: Draft,
    pub error: Option<StepError>,
}

/// Drives the wizard for the single local client.
#[derive(Debug, Default)]
pub struct RegistrationFlow {
    state: Mutex<FlowState>,
}

impl RegistrationFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> FlowSnapshot {
        let state = self.state.lock().await;
        Self::snapshot_of(&state)
    }

    fn snapshot_of(state: &FlowState) -> FlowSnapshot {
        FlowSnapshot {
            step: state.step,
            draft: state.draft.clone(),
            error: state.error.clone(),
        }
    }

    /// Discards the draft and returns to the first step.
    pub async fn reset(&self) {
        self.begin(Event::Reset).await;
    }

    /// Applies `event`, submitting the registration when the account step
    /// completes. The lock is not held while the auth call is outstanding.
    pub async fn dispatch(&self, session: &SessionContext, event: Event) -> FlowSnapshot {
        let Some(registration) = self.begin(event).await else {
            return self.snapshot().await;
        };

        let outcome = match session.register(registration).await {
            Ok(user) => {
                info!("Registration completed for {}", user.id);
                Event::Registered
            }
            Err(err) => {
                warn!("Registration rejected: {err:?}");
                Event::RegisterFailed(err.to_string())
            }
        };

        let mut state = self.state.lock().await;
        Self::apply(&mut state, outcome);
        Self::snapshot_of(&state)
    }

    async fn begin(&self, event: Event) -> Option<Registration> {
        let mut state = self.state.lock().await;
        if state.submitting && !matches!(event, Event::Reset) {
            debug!("Registration outstanding, holding step {}", state.step);
            state.error = Some(StepError::Pending);
            return None;
        }
        let registration = Self::apply(&mut state, event);
        state.submitting = registration.is_some();
        registration
    }

    fn apply(state: &mut FlowState, event: Event) -> Option<Registration> {
        let current = std::mem::take(state);
        let next = transition(current.step, current.draft, event);
        debug!("Registration step {} -> {}", current.step, next.step);
        *state = FlowState {
            step: next.step,
            draft: next.draft,
            error: next.error,
            submitting: false,
        };
        next.effect
    }
}

#[cfg(test)]
mod tests {
    use super::super::draft::tests::{account, designation, personal, role};
    use super::*;
    use crate::{
        accounts::{AccountRepository, StoredAccounts},
        auth::MockAuthService,
        storage::MemoryStore,
    };
    use std::{sync::Arc, time::Duration};

    fn fixture() -> (SessionContext, Arc<StoredAccounts>) {
        fixture_with(Duration::ZERO)
    }

    fn fixture_with(latency: Duration) -> (SessionContext, Arc<StoredAccounts>) {
        let store = Arc::new(MemoryStore::new());
        let accounts = Arc::new(StoredAccounts::new(store.clone()));
        let auth = Arc::new(MockAuthService::new(accounts.clone()).with_latency(latency));
        (SessionContext::new(store, auth), accounts)
    }

    async fn walk_to_account(flow: &RegistrationFlow, session: &SessionContext) {
        for event in [
            Event::SubmitPersonal(personal()),
            Event::SubmitRole(role()),
            Event::SubmitDesignation(designation()),
        ] {
            let snapshot = flow.dispatch(session, event).await;
            assert_eq!(snapshot.error, None);
        }
        assert_eq!(flow.snapshot().await.step, Step::Account);
    }

    #[tokio::test]
    async fn full_wizard_persists_the_account() {
        let (session, accounts) = fixture();
        let flow = RegistrationFlow::new();
        walk_to_account(&flow, &session).await;

        let snapshot = flow
            .dispatch(&session, Event::SubmitAccount(account("alice01")))
            .await;

        assert_eq!(snapshot.step, Step::Congratulations);
        assert_eq!(snapshot.error, None);
        assert!(snapshot.draft.summary().contains(&("Username", "alice01")));

        let stored = accounts.list();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "alice@example.com");
        assert_eq!(stored[0].username, "alice01");
        assert!(stored[0].id.starts_with("user-"));
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn taken_username_stays_on_account_and_keeps_the_draft() {
        let (session, accounts) = fixture();

        let first = RegistrationFlow::new();
        walk_to_account(&first, &session).await;
        first
            .dispatch(&session, Event::SubmitAccount(account("alice01")))
            .await;

        let flow = RegistrationFlow::new();
        let mut other = personal();
        other.email = "alice.second@example.com".to_string();
        flow.dispatch(&session, Event::SubmitPersonal(other)).await;
        flow.dispatch(&session, Event::SubmitRole(role())).await;
        flow.dispatch(&session, Event::SubmitDesignation(designation()))
            .await;

        let snapshot = flow
            .dispatch(&session, Event::SubmitAccount(account("alice01")))
            .await;

        assert_eq!(snapshot.step, Step::Account);
        assert_eq!(
            snapshot.error.map(|error| error.to_string()),
            Some("This username is already taken.".to_string())
        );
        assert_eq!(
            snapshot.draft.email.as_deref(),
            Some("alice.second@example.com")
        );
        assert_eq!(snapshot.draft.role.as_deref(), Some("Backend Developer"));
        assert_eq!(accounts.list().len(), 1);
    }

    #[tokio::test]
    async fn invalid_email_does_not_advance() {
        let (session, _) = fixture();
        let flow = RegistrationFlow::new();
        let mut input = personal();
        input.email = "not-an-email".to_string();

        let snapshot = flow.dispatch(&session, Event::SubmitPersonal(input)).await;

        assert_eq!(snapshot.step, Step::Personal);
        assert!(matches!(snapshot.error, Some(StepError::Invalid(_))));
    }

    #[tokio::test]
    async fn reset_returns_to_an_empty_first_step() {
        let (session, _) = fixture();
        let flow = RegistrationFlow::new();
        walk_to_account(&flow, &session).await;

        flow.reset().await;

        let snapshot = flow.snapshot().await;
        assert_eq!(snapshot.step, Step::Personal);
        assert!(snapshot.draft.is_empty());
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn back_is_held_while_the_account_is_created() {
        let (session, accounts) = fixture_with(Duration::from_millis(300));
        let session = Arc::new(session);
        let flow = Arc::new(RegistrationFlow::new());
        walk_to_account(&flow, &session).await;

        let submit = {
            let (flow, session) = (flow.clone(), session.clone());
            tokio::spawn(async move {
                flow.dispatch(&session, Event::SubmitAccount(account("alice01")))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let held = flow.dispatch(&session, Event::Back).await;
        assert_eq!(held.step, Step::Account);
        assert_eq!(held.error, Some(StepError::Pending));

        let done = submit.await.expect("register task");
        assert_eq!(done.step, Step::Congratulations);
        assert_eq!(done.error, None);
        assert_eq!(accounts.list().len(), 1);

        let back = flow.dispatch(&session, Event::Back).await;
        assert_eq!(back.step, Step::Congratulations);
    }

    #[tokio::test]
    async fn reset_while_creating_drops_the_summary() {
        let (session, accounts) = fixture_with(Duration::from_millis(300));
        let session = Arc::new(session);
        let flow = Arc::new(RegistrationFlow::new());
        walk_to_account(&flow, &session).await;

        let submit = {
            let (flow, session) = (flow.clone(), session.clone());
            tokio::spawn(async move {
                flow.dispatch(&session, Event::SubmitAccount(account("alice01")))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        flow.reset().await;

        let done = submit.await.expect("register task");
        assert_eq!(done.step, Step::Personal);
        assert!(done.draft.is_empty());
        assert_eq!(accounts.list().len(), 1);
    }
}
