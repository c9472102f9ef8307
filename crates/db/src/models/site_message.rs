//! Site message row models.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use courier_core::types::Timestamp;

/// A row from the `site_messages` table.
///
/// Recipients live in the `site_message_recipients` join table and are
/// fetched separately, in insert order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteMessageRow {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}
