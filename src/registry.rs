//! Thread-local home for the page bindings.
//!
//! Click listeners hold the controllers, and the listeners only stay
//! callable while their closures are alive, so the bindings have to outlive
//! the setup call. Thread-local is enough: WASM runs the page on one thread.

use crate::dom::{BindError, PageBindings};
use std::cell::RefCell;

thread_local! {
    static PAGE: RefCell<Option<PageBindings>> = const { RefCell::new(None) };
}

pub fn is_bound() -> bool {
    PAGE.with(|p| p.borrow().is_some())
}

/// Store `bindings` for the lifetime of the page. A page binds once.
pub fn install(bindings: PageBindings) -> Result<(), BindError> {
    PAGE.with(|p| {
        let mut slot = p.borrow_mut();
        if slot.is_some() {
            return Err(BindError::AlreadyBound);
        }
        *slot = Some(bindings);
        Ok(())
    })
}

pub fn with_page<R>(f: impl FnOnce(&PageBindings) -> R) -> Option<R> {
    PAGE.with(|p| p.borrow().as_ref().map(f))
}
