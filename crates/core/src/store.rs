//! Storage interface consumed by the dispatch core.
//!
//! The core never talks to the database directly; it goes through
//! [`SubscriptionStore`]. The production implementation
//! (`PgSubscriptionStore` in `courier-db`) delegates to the sqlx
//! repositories; tests substitute in-memory stores.

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{SystemMsgSubscription, UserMsgSubscription};

/// Durable subscription storage.
#[async_trait::async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Atomically fetch or create the subscription row for `message_type`.
    ///
    /// Returns the row and whether it was newly created. Concurrent callers
    /// racing on the same `message_type` must resolve to exactly one
    /// creation; the implementation relies on a storage-level uniqueness
    /// constraint, not application locking.
    async fn get_or_create_system_subscription(
        &self,
        message_type: &str,
        category: &str,
        category_label: &str,
    ) -> Result<(SystemMsgSubscription, bool), CoreError>;

    /// Create the per-user subscription row.
    ///
    /// Called at most once per user, at user-creation time. A second call
    /// for the same user violates the store's uniqueness constraint and
    /// surfaces as an error.
    async fn create_user_subscription(
        &self,
        user_id: Uuid,
        receive_backends: &[String],
    ) -> Result<UserMsgSubscription, CoreError>;
}
