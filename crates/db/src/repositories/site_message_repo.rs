//! Repository for the `site_messages` table and its recipient join table.

use sqlx::PgPool;
use uuid::Uuid;

use courier_core::models::SiteMessage;

use crate::models::site_message::SiteMessageRow;

/// Column list for `site_messages` queries.
const COLUMNS: &str = "id, subject, message, created_at";

/// Provides CRUD operations for site messages.
pub struct SiteMessageRepo;

impl SiteMessageRepo {
    /// Persist a site message with its recipient set.
    ///
    /// Recipients are written with an explicit `position` so the
    /// membership query reads them back in the order the caller supplied.
    /// Both inserts share one transaction; the returned domain model
    /// carries the recipients in that same order.
    pub async fn create(
        pool: &PgPool,
        subject: &str,
        message: &str,
        recipients: &[Uuid],
    ) -> Result<SiteMessage, sqlx::Error> {
        let id = Uuid::new_v4();
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO site_messages (id, subject, message) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(subject)
            .bind(message)
            .execute(&mut *tx)
            .await?;

        for (position, user_id) in recipients.iter().enumerate() {
            sqlx::query(
                "INSERT INTO site_message_recipients (site_message_id, user_id, position) \
                 VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(user_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(message_id = %id, recipients = recipients.len(), "Site message stored");
        Ok(SiteMessage {
            id,
            subject: subject.to_string(),
            message: message.to_string(),
            recipients: recipients.to_vec(),
        })
    }

    /// The membership query: recipient ids for a message, in insert order.
    pub async fn recipient_ids(pool: &PgPool, message_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM site_message_recipients \
             WHERE site_message_id = $1 \
             ORDER BY position",
        )
        .bind(message_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch a message with its recipients, or `None` if it does not exist.
    pub async fn get(pool: &PgPool, message_id: Uuid) -> Result<Option<SiteMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_messages WHERE id = $1");
        let row = sqlx::query_as::<_, SiteMessageRow>(&query)
            .bind(message_id)
            .fetch_optional(pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let recipients = Self::recipient_ids(pool, message_id).await?;
        Ok(Some(SiteMessage {
            id: row.id,
            subject: row.subject,
            message: row.message,
            recipients,
        }))
    }
}
