//! PostgreSQL implementation of the `SubscriptionStore` seam.

use uuid::Uuid;

use courier_core::error::CoreError;
use courier_core::models::{SystemMsgSubscription, UserMsgSubscription};
use courier_core::store::SubscriptionStore;

use crate::repositories::{SystemSubscriptionRepo, UserSubscriptionRepo};
use crate::DbPool;

/// Subscription storage backed by the sqlx repositories.
pub struct PgSubscriptionStore {
    pool: DbPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn get_or_create_system_subscription(
        &self,
        message_type: &str,
        category: &str,
        category_label: &str,
    ) -> Result<(SystemMsgSubscription, bool), CoreError> {
        SystemSubscriptionRepo::get_or_create(&self.pool, message_type, category, category_label)
            .await
            .map(|(row, created)| (row.into(), created))
            .map_err(map_sqlx_error)
    }

    async fn create_user_subscription(
        &self,
        user_id: Uuid,
        receive_backends: &[String],
    ) -> Result<UserMsgSubscription, CoreError> {
        UserSubscriptionRepo::create(&self.pool, user_id, receive_backends)
            .await
            .map(Into::into)
            .map_err(map_sqlx_error)
    }
}

/// Classify a sqlx error into a domain error.
///
/// PostgreSQL unique violations (error code 23505) become conflicts;
/// everything else is a storage failure.
fn map_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return CoreError::Conflict(format!("unique constraint violated: {constraint}"));
        }
    }
    CoreError::Storage(err.to_string())
}
