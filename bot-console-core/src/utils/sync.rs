//! Mutex helpers
//!
//! Critical sections in this crate never suspend and never panic halfway
//! through an update, so a poisoned lock still guards consistent data.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the guard if a previous holder panicked
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
