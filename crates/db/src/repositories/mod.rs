//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod site_message_repo;
pub mod system_subscription_repo;
pub mod user_subscription_repo;

pub use site_message_repo::SiteMessageRepo;
pub use system_subscription_repo::SystemSubscriptionRepo;
pub use user_subscription_repo::UserSubscriptionRepo;
