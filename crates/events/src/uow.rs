//! Unit-of-work abstraction with an explicit after-commit hook list.
//!
//! Effects that must not race ahead of durability (publishing a payload
//! that describes a row still inside an open transaction) are deferred via
//! [`UnitOfWork::defer_on_commit`]. The transaction coordinator flushes the
//! hooks on successful commit and discards them on rollback, so the
//! commit-or-discard contract is explicit and testable without a real
//! transactional store.

type CommitHook = Box<dyn FnOnce() + Send>;

/// The transactional boundary a domain write and its effects are grouped in.
///
/// Commit and rollback are the two terminal outcomes; both consume the
/// value. Dropping an uncommitted unit of work behaves like a rollback.
#[derive(Default)]
pub struct UnitOfWork {
    after_commit: Vec<CommitHook>,
}

impl UnitOfWork {
    /// Open a new unit of work with no pending hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `hook` to run after this unit of work commits.
    ///
    /// Hooks run synchronously, in registration order, on the committing
    /// thread of control. A rolled-back unit of work never runs them.
    pub fn defer_on_commit(&mut self, hook: impl FnOnce() + Send + 'static) {
        self.after_commit.push(Box::new(hook));
    }

    /// Number of hooks currently pending.
    pub fn pending_hooks(&self) -> usize {
        self.after_commit.len()
    }

    /// Commit: run every deferred hook in registration order.
    pub fn commit(self) {
        for hook in self.after_commit {
            hook();
        }
    }

    /// Roll back: discard every deferred hook.
    pub fn rollback(self) {
        if !self.after_commit.is_empty() {
            tracing::debug!(
                discarded = self.after_commit.len(),
                "Unit of work rolled back, after-commit hooks discarded"
            );
        }
    }
}
