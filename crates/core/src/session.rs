//! Session/identity gate.
//!
//! Tracks whether a verified identity is present. The state starts as
//! [`SessionState::Unknown`] and resolves exactly once, asynchronously, by asking the
//! identity provider for an existing session. Until then the app shell must not render.

use crate::identity::{Identity, IdentityProvider};
use crate::IdentityResult;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "identity", rename_all = "snake_case")]
pub enum SessionState {
    Unknown,
    Anonymous,
    Authenticated(Identity),
}

pub struct SessionGate<P> {
    provider: Arc<P>,
    state: SessionState,
}

impl<P: IdentityProvider> SessionGate<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            state: SessionState::Unknown,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, SessionState::Unknown)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Resolves `Unknown` into `Anonymous` or `Authenticated`. Later calls are no-ops.
    pub async fn resolve(&mut self) -> &SessionState {
        if !self.is_resolved() {
            let existing = self.provider.current_identity().await;
            self.resolve_with(existing);
        }
        &self.state
    }

    /// Resolves from an identity check the caller ran itself. No-op once resolved.
    pub fn resolve_with(&mut self, existing: Option<Identity>) -> &SessionState {
        if !self.is_resolved() {
            self.state = match existing {
                Some(identity) => {
                    tracing::info!("restored session for {}", identity.id);
                    SessionState::Authenticated(identity)
                }
                None => SessionState::Anonymous,
            };
        }
        &self.state
    }

    /// Delegates to the provider's interactive flow.
    ///
    /// On failure or cancellation the session stays as it was and the error is returned so
    /// the caller can decide whether to show a message.
    pub async fn sign_in(&mut self) -> IdentityResult<Identity> {
        match self.provider.sign_in_interactive().await {
            Ok(identity) => {
                self.state = SessionState::Authenticated(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                tracing::warn!("sign-in failed: {}", e);
                if !self.is_resolved() {
                    self.state = SessionState::Anonymous;
                }
                Err(e)
            }
        }
    }

    /// Signs out. The local session becomes `Anonymous` even if the provider call fails.
    pub async fn sign_out(&mut self) -> IdentityResult<()> {
        let result = self.provider.sign_out().await;
        if let Err(e) = &result {
            tracing::warn!("sign-out failed at identity provider: {}", e);
        }
        self.state = SessionState::Anonymous;
        result
    }

    /// Applies an identity pushed by the provider's change subscription.
    ///
    /// Returns `true` if the session state changed.
    pub fn apply_identity_change(&mut self, identity: Option<Identity>) -> bool {
        let next = match identity {
            Some(identity) => SessionState::Authenticated(identity),
            None => SessionState::Anonymous,
        };
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::IdentityError;
    use async_trait::async_trait;
    use tokio::sync::{watch, Mutex};

    /// Identity provider whose answers are scripted by the test.
    pub(crate) struct ScriptedIdentityProvider {
        pub existing: Option<Identity>,
        pub sign_in: Mutex<Vec<IdentityResult<Identity>>>,
        pub sign_out_result: IdentityResult<()>,
        pub sender: watch::Sender<Option<Identity>>,
    }

    impl ScriptedIdentityProvider {
        pub(crate) fn new(
            existing: Option<Identity>,
            sign_in: Vec<IdentityResult<Identity>>,
        ) -> Self {
            let (sender, _) = watch::channel(existing.clone());
            Self {
                existing,
                sign_in: Mutex::new(sign_in),
                sign_out_result: Ok(()),
                sender,
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedIdentityProvider {
        async fn current_identity(&self) -> Option<Identity> {
            self.existing.clone()
        }

        fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
            self.sender.subscribe()
        }

        async fn sign_in_interactive(&self) -> IdentityResult<Identity> {
            let mut script = self.sign_in.lock().await;
            if script.is_empty() {
                return Err(IdentityError::Cancelled);
            }
            script.remove(0)
        }

        async fn sign_out(&self) -> IdentityResult<()> {
            self.sign_out_result.clone()
        }
    }

    fn jane() -> Identity {
        Identity::new("u-jane").with_display_name("Jane")
    }

    #[tokio::test]
    async fn test_resolve_without_session_is_anonymous() {
        let provider = Arc::new(ScriptedIdentityProvider::new(None, vec![]));
        let mut gate = SessionGate::new(provider);

        assert_eq!(gate.state(), &SessionState::Unknown);
        assert!(!gate.is_resolved());
        assert_eq!(gate.resolve().await, &SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_resolve_with_existing_session_authenticates() {
        let provider = Arc::new(ScriptedIdentityProvider::new(Some(jane()), vec![]));
        let mut gate = SessionGate::new(provider);

        gate.resolve().await;
        assert_eq!(gate.identity(), Some(&jane()));
    }

    #[tokio::test]
    async fn test_resolve_happens_once() {
        let provider = Arc::new(ScriptedIdentityProvider::new(None, vec![Ok(jane())]));
        let mut gate = SessionGate::new(provider);

        gate.resolve().await;
        gate.sign_in().await.unwrap();
        gate.resolve().await;
        assert_eq!(gate.identity(), Some(&jane()), "resolve must not reset the session");
    }

    #[test]
    fn test_resolve_with_applies_first_answer_only() {
        let provider = Arc::new(ScriptedIdentityProvider::new(None, vec![]));
        let mut gate = SessionGate::new(provider);

        assert_eq!(gate.resolve_with(None), &SessionState::Anonymous);
        gate.resolve_with(Some(jane()));
        assert_eq!(gate.state(), &SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_failed_sign_in_returns_error_and_stays_anonymous() {
        let provider = Arc::new(ScriptedIdentityProvider::new(
            None,
            vec![Err(IdentityError::Rejected("popup blocked".into()))],
        ));
        let mut gate = SessionGate::new(provider);
        gate.resolve().await;

        let err = gate.sign_in().await.unwrap_err();
        assert_eq!(err, IdentityError::Rejected("popup blocked".into()));
        assert_eq!(gate.state(), &SessionState::Anonymous);

        // No automatic retry: the script is exhausted, next attempt is a fresh call.
        assert_eq!(gate.sign_in().await.unwrap_err(), IdentityError::Cancelled);
    }

    #[tokio::test]
    async fn test_sign_out_forces_anonymous_even_on_provider_error() {
        let mut provider = ScriptedIdentityProvider::new(Some(jane()), vec![]);
        provider.sign_out_result = Err(IdentityError::Rejected("offline".into()));
        let mut gate = SessionGate::new(Arc::new(provider));
        gate.resolve().await;

        assert!(gate.sign_out().await.is_err());
        assert_eq!(gate.state(), &SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_apply_identity_change_reports_changes() {
        let provider = Arc::new(ScriptedIdentityProvider::new(None, vec![]));
        let mut gate = SessionGate::new(provider);
        gate.resolve().await;

        assert!(!gate.apply_identity_change(None));
        assert!(gate.apply_identity_change(Some(jane())));
        assert!(!gate.apply_identity_change(Some(jane())));
        assert!(gate.apply_identity_change(None));
    }
}
