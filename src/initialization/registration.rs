//! Process-wide bind registration.
//!
//! The document-load auto-binding behavior is process-wide state. Instead of
//! mutating it implicitly, this module exposes an explicit pair: [`install`]
//! swaps in a new registration and hands back the previous one, and
//! [`restore`] puts a previous registration back. Sessions consult
//! [`active_registration`] when a document loads.

use std::sync::{Arc, PoisonError, RwLock};

use crate::navigation::{standard_strategy, ResponseStrategy};

/// Process-wide configuration applied when documents load.
#[derive(Clone)]
pub struct Registration {
    /// Whether elements carrying `data-request-method` are bound
    /// automatically at document load.
    pub auto_bind: bool,

    /// Strategy given to bindings whose options don't supply one.
    pub strategy: ResponseStrategy,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            auto_bind: true,
            strategy: standard_strategy(),
        }
    }
}

static ACTIVE_REGISTRATION: RwLock<Option<Arc<Registration>>> = RwLock::new(None);

/// Installs a registration, returning whatever was installed before.
///
/// The returned value is what [`restore`] expects back, so callers can wrap a
/// temporary registration in an install/restore pair without clobbering
/// whatever another component had installed.
pub fn install(registration: Arc<Registration>) -> Option<Arc<Registration>> {
    let mut active = ACTIVE_REGISTRATION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    active.replace(registration)
}

/// Restores a previously installed registration (or `None` for the built-in
/// default), returning what was active until now.
pub fn restore(previous: Option<Arc<Registration>>) -> Option<Arc<Registration>> {
    let mut active = ACTIVE_REGISTRATION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *active, previous)
}

/// Returns the active registration, falling back to the built-in default
/// when none has been installed.
pub fn active_registration() -> Arc<Registration> {
    let active = ACTIVE_REGISTRATION
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    match active.as_ref() {
        Some(registration) => Arc::clone(registration),
        None => Arc::new(Registration::default()),
    }
}
