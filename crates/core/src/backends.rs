//! Notification backend descriptors.
//!
//! A backend is a delivery channel capable of reporting whether a given
//! user is eligible to receive through it. The builtin set is fixed and
//! statically ordered; `receive_backends` lists on user subscriptions
//! preserve this order.

use std::sync::Arc;

use crate::error::CoreError;
use crate::models::UserProfile;

/// In-app site message, stored and shown in the notification bell UI.
pub const BACKEND_SITE_MSG: &str = "site_msg";

/// Email delivery via SMTP.
pub const BACKEND_EMAIL: &str = "email";

/// WeCom (WeChat Work) push to a linked account.
pub const BACKEND_WECOM: &str = "wecom";

/// DingTalk push to a linked account.
pub const BACKEND_DINGTALK: &str = "dingtalk";

/// A notification delivery backend.
pub trait NotifyBackend: Send + Sync {
    /// Stable backend identifier, stored in `receive_backends`.
    fn id(&self) -> &'static str;

    /// Whether the user has an account this backend can deliver to.
    ///
    /// Failures propagate to the caller; the resolver aborts subscription
    /// creation rather than persisting a partial backend list.
    fn has_linked_account(&self, user: &UserProfile) -> Result<bool, CoreError>;
}

/// Every user can receive site messages; no external account is involved.
pub struct SiteMsgBackend;

impl NotifyBackend for SiteMsgBackend {
    fn id(&self) -> &'static str {
        BACKEND_SITE_MSG
    }

    fn has_linked_account(&self, _user: &UserProfile) -> Result<bool, CoreError> {
        Ok(true)
    }
}

/// Email delivery requires a well-formed address on the profile.
pub struct EmailBackend;

impl NotifyBackend for EmailBackend {
    fn id(&self) -> &'static str {
        BACKEND_EMAIL
    }

    fn has_linked_account(&self, user: &UserProfile) -> Result<bool, CoreError> {
        Ok(user.email.as_deref().is_some_and(is_plausible_address))
    }
}

/// WeCom delivery requires a linked WeCom account id.
pub struct WeComBackend;

impl NotifyBackend for WeComBackend {
    fn id(&self) -> &'static str {
        BACKEND_WECOM
    }

    fn has_linked_account(&self, user: &UserProfile) -> Result<bool, CoreError> {
        Ok(user.wecom_id.as_deref().is_some_and(|id| !id.is_empty()))
    }
}

/// DingTalk delivery requires a linked DingTalk account id.
pub struct DingTalkBackend;

impl NotifyBackend for DingTalkBackend {
    fn id(&self) -> &'static str {
        BACKEND_DINGTALK
    }

    fn has_linked_account(&self, user: &UserProfile) -> Result<bool, CoreError> {
        Ok(user.dingtalk_id.as_deref().is_some_and(|id| !id.is_empty()))
    }
}

/// Minimal sanity check: one `@` with non-empty local and domain parts.
/// Full validation belongs to the mailer, not the eligibility check.
fn is_plausible_address(addr: &str) -> bool {
    match addr.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// The builtin backend set, in registration order.
pub fn builtin_backends() -> Vec<Arc<dyn NotifyBackend>> {
    vec![
        Arc::new(SiteMsgBackend),
        Arc::new(EmailBackend),
        Arc::new(WeComBackend),
        Arc::new(DingTalkBackend),
    ]
}
