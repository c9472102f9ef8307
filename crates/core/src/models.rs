//! Domain models shared across the workspace.
//!
//! These are the shapes the dispatch core works with. Database row types
//! (with `sqlx::FromRow`) live in `courier-db` and convert into these.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::DbId;

/// An append-only notification entity, immutable after creation.
///
/// `recipients` holds the user ids returned by the membership query, in
/// query-return order (not sorted). The publisher renders them to strings
/// when building the wire payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMessage {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub recipients: Vec<Uuid>,
}

/// One durable row per distinct `message_type`.
///
/// Created idempotently at boot by the message-type registry; mutated only
/// by administrative action outside this subsystem.
#[derive(Debug, Clone, Serialize)]
pub struct SystemMsgSubscription {
    pub id: DbId,
    pub message_type: String,
    pub category: String,
    pub category_label: String,
}

/// Per-user subscription created once at user-creation time.
///
/// `receive_backends` preserves the static backend-registration order and is
/// not recomputed automatically afterward.
#[derive(Debug, Clone, Serialize)]
pub struct UserMsgSubscription {
    pub id: DbId,
    pub user_id: Uuid,
    pub receive_backends: Vec<String>,
}

/// The user as seen by backend capability checks.
///
/// External linked-account ids are carried on the profile; a backend reports
/// eligibility by inspecting the field it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub wecom_id: Option<String>,
    pub dingtalk_id: Option<String>,
}

impl UserProfile {
    /// Create a profile with no linked accounts.
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            wecom_id: None,
            dingtalk_id: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach a WeCom account id.
    pub fn with_wecom(mut self, wecom_id: impl Into<String>) -> Self {
        self.wecom_id = Some(wecom_id.into());
        self
    }

    /// Attach a DingTalk account id.
    pub fn with_dingtalk(mut self, dingtalk_id: impl Into<String>) -> Self {
        self.dingtalk_id = Some(dingtalk_id.into());
        self
    }
}
