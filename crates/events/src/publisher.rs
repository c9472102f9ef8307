//! Commit-deferred publishing of new site messages.
//!
//! A publish must never describe data that is not yet durable, so the
//! payload is built when the creation event arrives but the actual send is
//! deferred onto the unit of work's after-commit hook list. A rollback
//! discards the hook and nothing is published. The publisher is
//! fire-and-forget: a channel failure is logged, never retried, and never
//! affects the committed write.

use std::sync::Arc;

use courier_core::models::SiteMessage;

use crate::bus::{SiteMsgChannel, SiteMsgPayload};
use crate::uow::UnitOfWork;

/// Publishes a payload for each newly created site message, after commit.
pub struct SiteMsgPublisher {
    channel: Arc<SiteMsgChannel>,
}

impl SiteMsgPublisher {
    pub fn new(channel: Arc<SiteMsgChannel>) -> Self {
        Self { channel }
    }

    /// React to a site message save event.
    ///
    /// Update events (`created == false`) build no payload and schedule
    /// nothing. For creation events the payload is built now, from the
    /// message's stored recipient order, and published only if `uow`
    /// commits.
    pub fn on_message_saved(&self, message: &SiteMessage, created: bool, uow: &mut UnitOfWork) {
        if !created {
            return;
        }

        tracing::debug!(message_id = %message.id, "New site message, deferring publish to commit");

        let payload = SiteMsgPayload::from_message(message);
        let channel = Arc::clone(&self.channel);
        uow.defer_on_commit(move || match channel.publish(payload) {
            Ok(receivers) => {
                tracing::debug!(receivers, topic = channel.topic(), "Site message published");
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    topic = channel.topic(),
                    "Failed to publish site message"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;
    use uuid::Uuid;

    fn message(recipients: Vec<Uuid>) -> SiteMessage {
        SiteMessage {
            id: Uuid::new_v4(),
            subject: "billing".into(),
            message: "invoice ready".into(),
            recipients,
        }
    }

    #[test]
    fn publishes_exactly_once_after_commit() {
        let channel = Arc::new(SiteMsgChannel::default());
        let publisher = SiteMsgPublisher::new(Arc::clone(&channel));
        let mut rx = channel.subscribe().unwrap();

        let recipients = vec![Uuid::new_v4(), Uuid::new_v4()];
        let msg = message(recipients.clone());
        let mut uow = UnitOfWork::new();

        publisher.on_message_saved(&msg, true, &mut uow);

        // Still pending: nothing published while the unit of work is open.
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);

        uow.commit();

        let payload = rx.try_recv().unwrap();
        assert_eq!(payload.id, msg.id);
        assert_eq!(payload.subject, "billing");
        assert_eq!(payload.message, "invoice ready");
        assert_eq!(
            payload.users,
            recipients.iter().map(Uuid::to_string).collect::<Vec<_>>()
        );
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn rollback_suppresses_the_publish() {
        let channel = Arc::new(SiteMsgChannel::default());
        let publisher = SiteMsgPublisher::new(Arc::clone(&channel));
        let mut rx = channel.subscribe().unwrap();

        let mut uow = UnitOfWork::new();
        publisher.on_message_saved(&message(vec![Uuid::new_v4()]), true, &mut uow);
        uow.rollback();

        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn update_events_schedule_nothing() {
        let channel = Arc::new(SiteMsgChannel::default());
        let publisher = SiteMsgPublisher::new(Arc::clone(&channel));
        let mut rx = channel.subscribe().unwrap();

        let mut uow = UnitOfWork::new();
        publisher.on_message_saved(&message(vec![Uuid::new_v4()]), false, &mut uow);

        assert_eq!(uow.pending_hooks(), 0);
        uow.commit();
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn publish_failure_leaves_the_commit_unaffected() {
        let channel = Arc::new(SiteMsgChannel::default());
        let publisher = SiteMsgPublisher::new(Arc::clone(&channel));

        let mut uow = UnitOfWork::new();
        publisher.on_message_saved(&message(vec![]), true, &mut uow);

        // Shutdown races the commit: the hook logs the failure, nothing panics.
        channel.close();
        uow.commit();
    }
}
