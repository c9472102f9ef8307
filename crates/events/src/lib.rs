//! Courier event dispatch and idempotent registration.
//!
//! This crate provides the building blocks that turn domain writes into
//! notification-side effects:
//!
//! - [`SiteMsgChannel`] — process-wide pub/sub channel for new-site-message
//!   payloads, backed by `tokio::sync::broadcast`, created at boot and
//!   closed at shutdown.
//! - [`UnitOfWork`] — transactional boundary with an explicit after-commit
//!   hook list; hooks run on commit and are discarded on rollback.
//! - [`SiteMsgPublisher`] — builds the wire payload for a newly created
//!   site message and defers its publish until the unit of work commits.
//! - [`MessageTypeRegistry`] — idempotently materializes one
//!   `SystemMsgSubscription` per catalog-declared message type at boot.
//! - [`BackendResolver`] — derives a new user's `receive_backends` from the
//!   backend capability checks and persists the initial subscription.
//! - [`EventDispatcher`] — routes [`DomainEvent`]s returned by write
//!   operations to the components above.

pub mod bus;
pub mod config;
pub mod dispatch;
pub mod publisher;
pub mod registry;
pub mod resolver;
pub mod uow;

pub use bus::{PublishError, SiteMsgChannel, SiteMsgPayload, TOPIC_SITE_MSG_CREATED};
pub use config::EventsConfig;
pub use dispatch::{DomainEvent, EventDispatcher};
pub use publisher::SiteMsgPublisher;
pub use registry::{
    CatalogError, CatalogSource, MessageTypeDef, MessageTypeRegistry, RegistryError,
    StaticCatalogs,
};
pub use resolver::BackendResolver;
pub use uow::UnitOfWork;

#[cfg(test)]
pub(crate) mod test_support;
