//! Repository for the `system_msg_subscriptions` table.

use sqlx::PgPool;

use crate::models::subscription::SystemSubscriptionRow;

/// Column list for `system_msg_subscriptions` queries.
const COLUMNS: &str = "id, message_type, category, category_label, created_at, updated_at";

/// Provides CRUD operations for system message subscriptions.
pub struct SystemSubscriptionRepo;

impl SystemSubscriptionRepo {
    /// Atomically fetch or create the subscription for `message_type`.
    ///
    /// Relies on the unique constraint on `message_type`: the insert uses
    /// `ON CONFLICT DO NOTHING`, so when two boot processes race, exactly
    /// one insert wins and the loser falls through to the select. Returns
    /// the row and whether this call created it.
    pub async fn get_or_create(
        pool: &PgPool,
        message_type: &str,
        category: &str,
        category_label: &str,
    ) -> Result<(SystemSubscriptionRow, bool), sqlx::Error> {
        let insert = format!(
            "INSERT INTO system_msg_subscriptions (message_type, category, category_label) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (message_type) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, SystemSubscriptionRow>(&insert)
            .bind(message_type)
            .bind(category)
            .bind(category_label)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = inserted {
            return Ok((row, true));
        }

        let select =
            format!("SELECT {COLUMNS} FROM system_msg_subscriptions WHERE message_type = $1");
        let row = sqlx::query_as::<_, SystemSubscriptionRow>(&select)
            .bind(message_type)
            .fetch_one(pool)
            .await?;
        Ok((row, false))
    }

    /// Get the subscription for a specific message type.
    pub async fn get(
        pool: &PgPool,
        message_type: &str,
    ) -> Result<Option<SystemSubscriptionRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM system_msg_subscriptions WHERE message_type = $1");
        sqlx::query_as::<_, SystemSubscriptionRow>(&query)
            .bind(message_type)
            .fetch_optional(pool)
            .await
    }

    /// List all registered subscriptions, grouped by category.
    pub async fn list(pool: &PgPool) -> Result<Vec<SystemSubscriptionRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM system_msg_subscriptions ORDER BY category, message_type");
        sqlx::query_as::<_, SystemSubscriptionRow>(&query)
            .fetch_all(pool)
            .await
    }
}
