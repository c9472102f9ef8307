//! Subscription row models.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use courier_core::models::{SystemMsgSubscription, UserMsgSubscription};
use courier_core::types::{DbId, Timestamp};

/// A row from the `system_msg_subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemSubscriptionRow {
    pub id: DbId,
    pub message_type: String,
    pub category: String,
    pub category_label: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SystemSubscriptionRow> for SystemMsgSubscription {
    fn from(row: SystemSubscriptionRow) -> Self {
        Self {
            id: row.id,
            message_type: row.message_type,
            category: row.category,
            category_label: row.category_label,
        }
    }
}

/// A row from the `user_msg_subscriptions` table.
///
/// `receive_backends` is stored as a JSONB array of backend identifiers,
/// preserving registration order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSubscriptionRow {
    pub id: DbId,
    pub user_id: Uuid,
    pub receive_backends: Json<Vec<String>>,
    pub created_at: Timestamp,
}

impl From<UserSubscriptionRow> for UserMsgSubscription {
    fn from(row: UserSubscriptionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            receive_backends: row.receive_backends.0,
        }
    }
}
