//! Repository for the `user_msg_subscriptions` table.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::subscription::UserSubscriptionRow;

/// Column list for `user_msg_subscriptions` queries.
const COLUMNS: &str = "id, user_id, receive_backends, created_at";

/// Provides CRUD operations for per-user subscriptions.
pub struct UserSubscriptionRepo;

impl UserSubscriptionRepo {
    /// Create the subscription row for a newly created user.
    ///
    /// The unique constraint on `user_id` rejects a second row for the
    /// same user; callers treat that as a conflict, not a retry.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        receive_backends: &[String],
    ) -> Result<UserSubscriptionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_msg_subscriptions (user_id, receive_backends) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSubscriptionRow>(&query)
            .bind(user_id)
            .bind(Json(receive_backends))
            .fetch_one(pool)
            .await
    }

    /// Get a user's subscription, if one exists.
    pub async fn get_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<UserSubscriptionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_msg_subscriptions WHERE user_id = $1");
        sqlx::query_as::<_, UserSubscriptionRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
