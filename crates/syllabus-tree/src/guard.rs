//! Busy guards for renumbering.
//!
//! A renumber pass renames directories, and every rename comes back through
//! the watcher as a change event. While a scope is [`ScopeState::Renumbering`]
//! events for that scope are dropped instead of starting another pass.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The level of the tree a renumber pass works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Module directories under `modules/`.
    Module,
    /// Topic directories inside one module.
    Topic,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Module => f.write_str("module"),
            Scope::Topic => f.write_str("topic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeState {
    #[default]
    Idle,
    Renumbering,
}

/// Two-state guard for one scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeGuard {
    busy: Arc<AtomicBool>,
}

impl ScopeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScopeState {
        if self.busy.load(Ordering::Acquire) {
            ScopeState::Renumbering
        } else {
            ScopeState::Idle
        }
    }

    /// Move from `Idle` to `Renumbering`, or `None` if already busy.
    ///
    /// The returned lease moves the guard back to `Idle` when dropped.
    pub fn acquire(&self) -> Option<ScopeLease> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScopeLease {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Held for the duration of a renumber pass.
#[derive(Debug)]
#[must_use = "the scope is released as soon as the lease is dropped"]
pub struct ScopeLease {
    busy: Arc<AtomicBool>,
}

impl Drop for ScopeLease {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Guards for both scopes.
#[derive(Debug, Clone, Default)]
pub struct ScopeGuards {
    module: ScopeGuard,
    topic: ScopeGuard,
}

impl ScopeGuards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: Scope) -> &ScopeGuard {
        match scope {
            Scope::Module => &self.module,
            Scope::Topic => &self.topic,
        }
    }

    pub fn acquire(&self, scope: Scope) -> Option<ScopeLease> {
        self.get(scope).acquire()
    }

    pub fn state(&self, scope: Scope) -> ScopeState {
        self.get(scope).state()
    }
}
