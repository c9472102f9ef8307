//! Per-user subscription bootstrap.
//!
//! When a user is created, the resolver evaluates the fixed, statically
//! ordered backend set against the user's linked accounts and persists one
//! `UserMsgSubscription` whose `receive_backends` preserves registration
//! order. A backend failure aborts the whole bootstrap: no partially
//! populated subscription row is ever written.

use std::sync::Arc;

use courier_core::backends::{builtin_backends, NotifyBackend};
use courier_core::error::CoreError;
use courier_core::models::{UserMsgSubscription, UserProfile};
use courier_core::store::SubscriptionStore;

/// Derives and persists the initial backend membership for new users.
pub struct BackendResolver {
    store: Arc<dyn SubscriptionStore>,
    backends: Vec<Arc<dyn NotifyBackend>>,
}

impl BackendResolver {
    /// Resolver over the builtin backend set.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self::with_backends(store, builtin_backends())
    }

    /// Resolver over an explicit backend set (order is preserved).
    pub fn with_backends(
        store: Arc<dyn SubscriptionStore>,
        backends: Vec<Arc<dyn NotifyBackend>>,
    ) -> Self {
        Self { store, backends }
    }

    /// React to a user save event.
    ///
    /// Only creation events bootstrap a subscription; updates never
    /// recompute backend membership. Returns the created subscription, or
    /// `None` for update events.
    pub async fn on_user_saved(
        &self,
        user: &UserProfile,
        created: bool,
    ) -> Result<Option<UserMsgSubscription>, CoreError> {
        if !created {
            return Ok(None);
        }

        let mut receive_backends = Vec::new();
        for backend in &self.backends {
            if backend.has_linked_account(user)? {
                receive_backends.push(backend.id().to_string());
            }
        }

        let subscription = self
            .store
            .create_user_subscription(user.id, &receive_backends)
            .await?;

        tracing::info!(
            user_id = %user.id,
            backends = ?subscription.receive_backends,
            "Created user message subscription"
        );
        Ok(Some(subscription))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    struct FixedBackend {
        id: &'static str,
        linked: bool,
    }

    impl NotifyBackend for FixedBackend {
        fn id(&self) -> &'static str {
            self.id
        }

        fn has_linked_account(&self, _user: &UserProfile) -> Result<bool, CoreError> {
            Ok(self.linked)
        }
    }

    struct FailingBackend;

    impl NotifyBackend for FailingBackend {
        fn id(&self) -> &'static str {
            "flaky"
        }

        fn has_linked_account(&self, _user: &UserProfile) -> Result<bool, CoreError> {
            Err(CoreError::BackendQuery {
                backend: "flaky",
                reason: "account service unreachable".into(),
            })
        }
    }

    fn backend(id: &'static str, linked: bool) -> Arc<dyn NotifyBackend> {
        Arc::new(FixedBackend { id, linked })
    }

    #[tokio::test]
    async fn collects_linked_backends_in_registration_order() {
        let store = Arc::new(MemoryStore::new());
        let resolver = BackendResolver::with_backends(
            store.clone(),
            vec![backend("a", true), backend("b", false), backend("c", true)],
        );

        let user = UserProfile::new(Uuid::new_v4(), "li");
        let sub = resolver.on_user_saved(&user, true).await.unwrap().unwrap();

        assert_eq!(sub.user_id, user.id);
        assert_eq!(sub.receive_backends, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn builtin_set_resolves_from_linked_accounts() {
        let store = Arc::new(MemoryStore::new());
        let resolver = BackendResolver::new(store.clone());

        let user = UserProfile::new(Uuid::new_v4(), "li")
            .with_email("li@example.com")
            .with_dingtalk("d-42");
        let sub = resolver.on_user_saved(&user, true).await.unwrap().unwrap();

        assert_eq!(sub.receive_backends, vec!["site_msg", "email", "dingtalk"]);
    }

    #[tokio::test]
    async fn update_events_are_ignored() {
        let store = Arc::new(MemoryStore::new());
        let resolver = BackendResolver::new(store.clone());

        let user = UserProfile::new(Uuid::new_v4(), "li");
        let result = resolver.on_user_saved(&user, false).await.unwrap();

        assert!(result.is_none());
        assert_eq!(store.user_subscription_count(), 0);
    }

    #[tokio::test]
    async fn backend_failure_aborts_without_partial_state() {
        let store = Arc::new(MemoryStore::new());
        let resolver = BackendResolver::with_backends(
            store.clone(),
            vec![backend("a", true), Arc::new(FailingBackend), backend("c", true)],
        );

        let user = UserProfile::new(Uuid::new_v4(), "li");
        let err = resolver.on_user_saved(&user, true).await.unwrap_err();

        assert_matches!(err, CoreError::BackendQuery { backend: "flaky", .. });
        assert_eq!(store.user_subscription_count(), 0);
    }
}
