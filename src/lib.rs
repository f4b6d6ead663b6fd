//! Client-side interaction layer of the attendance dashboard: animated
//! counters, face enrollment capture and attendance marking.
//!
//! The core (counters, action controllers, progress simulation) is written
//! against the [`host::Host`], [`transport::ActionTransport`] and [`view`]
//! traits. The browser implementations live next to them; a server-rendered
//! page is wired with [`bind_dashboard`], the Yew front end in `main.rs`
//! drives the same controllers from component state.

use log::{info, warn, LevelFilter};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod counter;
pub mod dom;
pub mod host;
pub mod logging;
pub mod outcome;
pub mod progress;
pub mod registry;
pub mod session;
pub mod transport;
pub mod utils;
pub mod view;

#[cfg(test)]
mod testing;

pub use controller::{ActionBindings, ActionController, ActionProfile, ButtonState, ClickOutcome};
pub use counter::{animate_counter, CounterAnimation, CounterSpec};
pub use host::{BrowserHost, Host};
pub use outcome::{ActionError, ActionResult};
pub use progress::{ProgressSimulation, ProgressState};
pub use transport::{ActionTransport, FetchTransport};

/// Bind the dashboard on the current page.
///
/// Call once after the DOM is ready. Missing elements are skipped; a second
/// call is logged and ignored.
#[wasm_bindgen(js_name = bindDashboard)]
pub fn bind_dashboard() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(LevelFilter::Info);

    if registry::is_bound() {
        warn!("bindDashboard called twice, keeping the existing bindings");
        return Ok(());
    }

    let page = dom::bind_page(
        &gloo_utils::document(),
        Rc::new(BrowserHost),
        Rc::new(FetchTransport::new()),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    registry::install(page).map_err(|e| JsValue::from_str(&e.to_string()))?;
    info!("dashboard ready");
    Ok(())
}

/// Whether an action button on the bound page is currently busy.
///
/// `action` is `"enroll"` or `"attendance"`; unknown names and unbound
/// pages report `false`.
#[wasm_bindgen(js_name = isActionBusy)]
pub fn is_action_busy(action: &str) -> bool {
    registry::with_page(|page| {
        let controller = match action {
            "enroll" => page.enroll.as_ref(),
            "attendance" => page.attendance.as_ref(),
            _ => None,
        };
        controller.is_some_and(|c| c.state() == ButtonState::Busy)
    })
    .unwrap_or(false)
}
