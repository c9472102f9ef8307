//! Explicit domain-event dispatch.
//!
//! Write operations return [`DomainEvent`] values; the caller hands them to
//! [`EventDispatcher::dispatch`] together with the open [`UnitOfWork`].
//! There is no framework-owned reactive hook: dispatch happens exactly when
//! and where the caller invokes it, on the same thread of control as the
//! triggering write.

use std::sync::Arc;

use courier_core::error::CoreError;
use courier_core::models::{SiteMessage, UserProfile};
use courier_core::store::SubscriptionStore;

use crate::bus::SiteMsgChannel;
use crate::publisher::SiteMsgPublisher;
use crate::resolver::BackendResolver;
use crate::uow::UnitOfWork;

/// A domain state transition returned by a write operation.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A site message row was saved. `created` distinguishes insert from
    /// update; the message carries its recipients in membership-query order.
    SiteMessageSaved { message: SiteMessage, created: bool },

    /// A user row was saved.
    UserSaved { user: UserProfile, created: bool },
}

/// Routes domain events to the publisher and resolver.
pub struct EventDispatcher {
    publisher: SiteMsgPublisher,
    resolver: BackendResolver,
}

impl EventDispatcher {
    /// Build a dispatcher over the boot-constructed channel and store,
    /// using the builtin backend set.
    pub fn new(channel: Arc<SiteMsgChannel>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            publisher: SiteMsgPublisher::new(channel),
            resolver: BackendResolver::new(store),
        }
    }

    /// Dispatch one event within the caller's open unit of work.
    ///
    /// Site-message publishes are deferred onto `uow`'s after-commit hooks;
    /// user subscription bootstrap runs inline and its failures propagate
    /// to abort the triggering write.
    pub async fn dispatch(
        &self,
        event: &DomainEvent,
        uow: &mut UnitOfWork,
    ) -> Result<(), CoreError> {
        match event {
            DomainEvent::SiteMessageSaved { message, created } => {
                self.publisher.on_message_saved(message, *created, uow);
                Ok(())
            }
            DomainEvent::UserSaved { user, created } => {
                self.resolver.on_user_saved(user, *created).await.map(|_| ())
            }
        }
    }
}
