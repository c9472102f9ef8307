//! Shared test fixtures for the events integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use uuid::Uuid;

use courier_core::error::CoreError;
use courier_core::models::{SystemMsgSubscription, UserMsgSubscription};
use courier_core::store::SubscriptionStore;

/// In-memory stand-in for the PostgreSQL subscription store.
#[derive(Default)]
pub struct MemoryStore {
    system: Mutex<HashMap<String, SystemMsgSubscription>>,
    users: Mutex<HashMap<Uuid, UserMsgSubscription>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_subscription(&self, user_id: Uuid) -> Option<UserMsgSubscription> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn system_subscription_count(&self) -> usize {
        self.system.lock().unwrap().len()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait::async_trait]
impl SubscriptionStore for MemoryStore {
    async fn get_or_create_system_subscription(
        &self,
        message_type: &str,
        category: &str,
        category_label: &str,
    ) -> Result<(SystemMsgSubscription, bool), CoreError> {
        let mut system = self.system.lock().unwrap();
        if let Some(existing) = system.get(message_type) {
            return Ok((existing.clone(), false));
        }

        let subscription = SystemMsgSubscription {
            id: self.next_id(),
            message_type: message_type.to_string(),
            category: category.to_string(),
            category_label: category_label.to_string(),
        };
        system.insert(message_type.to_string(), subscription.clone());
        Ok((subscription, true))
    }

    async fn create_user_subscription(
        &self,
        user_id: Uuid,
        receive_backends: &[String],
    ) -> Result<UserMsgSubscription, CoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user_id) {
            return Err(CoreError::Conflict(format!(
                "user {user_id} already has a subscription"
            )));
        }

        let subscription = UserMsgSubscription {
            id: self.next_id(),
            user_id,
            receive_backends: receive_backends.to_vec(),
        };
        users.insert(user_id, subscription.clone());
        Ok(subscription)
    }
}

/// Initialize test logging once; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "courier_events=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
