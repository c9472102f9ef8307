//! Courier domain core.
//!
//! Shared building blocks for the notification dispatch subsystem:
//!
//! - [`types`] — workspace-wide type aliases (`DbId`, `Timestamp`).
//! - [`error`] — the central [`CoreError`](error::CoreError) enum.
//! - [`models`] — domain models for site messages, users, and subscriptions.
//! - [`store`] — the [`SubscriptionStore`](store::SubscriptionStore)
//!   interface the dispatch core consumes; the PostgreSQL implementation
//!   lives in `courier-db`.
//! - [`backends`] — notification backend descriptors and the builtin
//!   ordered backend set.

pub mod backends;
pub mod error;
pub mod models;
pub mod store;
pub mod types;

pub use backends::{builtin_backends, NotifyBackend};
pub use error::CoreError;
pub use models::{SiteMessage, SystemMsgSubscription, UserMsgSubscription, UserProfile};
pub use store::SubscriptionStore;
