//! Pub/sub channel for new-site-message payloads, backed by a
//! `tokio::sync::broadcast` channel.
//!
//! [`SiteMsgChannel`] is constructed once at boot, shared via
//! `Arc<SiteMsgChannel>` with the components that publish or consume, and
//! closed explicitly at shutdown. There is no lazily materialized global
//! handle; ownership of the lifecycle sits with the boot sequence.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use courier_core::models::SiteMessage;

/// The fixed logical topic new site messages are published on.
///
/// Wire-visible: existing consumers subscribe to this name.
pub const TOPIC_SITE_MSG_CREATED: &str = "notifications.SiteMessageCome";

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// SiteMsgPayload
// ---------------------------------------------------------------------------

/// The published payload for a newly created site message.
///
/// Field order is wire-visible: consumers rely on the JSON keys appearing
/// exactly as `id`, `subject`, `message`, `users`. `users` holds the
/// recipient ids rendered as strings, in membership-query order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteMsgPayload {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub users: Vec<String>,
}

impl SiteMsgPayload {
    /// Build the payload from a site message, rendering recipient ids to
    /// strings in their stored order.
    pub fn from_message(message: &SiteMessage) -> Self {
        Self {
            id: message.id,
            subject: message.subject.clone(),
            message: message.message.clone(),
            users: message.recipients.iter().map(|id| id.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteMsgChannel
// ---------------------------------------------------------------------------

/// Error type for channel publish/subscribe failures.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The channel was closed at shutdown; no further publishes are accepted.
    #[error("Channel '{0}' is closed")]
    Closed(&'static str),
}

/// Process-wide fan-out channel for site message payloads.
///
/// Publishing with zero subscribers is not an error: delivery guarantees
/// beyond in-process fan-out belong to the transport, not this core.
pub struct SiteMsgChannel {
    topic: &'static str,
    sender: RwLock<Option<broadcast::Sender<SiteMsgPayload>>>,
}

impl SiteMsgChannel {
    /// Create the channel with the given broadcast buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            topic: TOPIC_SITE_MSG_CREATED,
            sender: RwLock::new(Some(sender)),
        }
    }

    /// The topic this channel publishes on.
    pub fn topic(&self) -> &'static str {
        self.topic
    }

    /// Publish a payload to all current subscribers.
    ///
    /// Returns the number of subscribers the payload was delivered to.
    /// Fails only if the channel has been closed.
    pub fn publish(&self, payload: SiteMsgPayload) -> Result<usize, PublishError> {
        let guard = self.sender.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(sender) => Ok(sender.send(payload).unwrap_or(0)),
            None => Err(PublishError::Closed(self.topic)),
        }
    }

    /// Subscribe to payloads published on this channel.
    pub fn subscribe(&self) -> Result<broadcast::Receiver<SiteMsgPayload>, PublishError> {
        let guard = self.sender.read().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(sender) => Ok(sender.subscribe()),
            None => Err(PublishError::Closed(self.topic)),
        }
    }

    /// Close the channel at shutdown.
    ///
    /// Subscribers observe `RecvError::Closed` once the buffer drains, and
    /// later publishes fail with [`PublishError::Closed`].
    pub fn close(&self) {
        let mut guard = self.sender.write().unwrap_or_else(|e| e.into_inner());
        if guard.take().is_some() {
            tracing::info!(topic = self.topic, "Site message channel closed");
        }
    }
}

impl Default for SiteMsgChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
