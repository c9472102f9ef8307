//! Database row models.
//!
//! These map one-to-one onto table rows and convert into the
//! `courier-core` domain models, keeping the DB layer's shapes out of the
//! dispatch core.

pub mod site_message;
pub mod subscription;

pub use site_message::SiteMessageRow;
pub use subscription::{SystemSubscriptionRow, UserSubscriptionRow};
