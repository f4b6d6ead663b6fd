//! Cooperative scheduler abstraction.
//!
//! Every suspension point of the dashboard (animation frames, progress ticks,
//! settle delays, spawned click handlers) goes through a [`Host`], so the same
//! control flow runs on the browser event loop and on a deterministic clock
//! in tests.

use futures::future::LocalBoxFuture;
use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

pub trait Host {
    /// Monotonic milliseconds, same time base as [`Host::next_frame`].
    fn now_ms(&self) -> f64;

    /// Resolve after `ms` milliseconds.
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;

    /// Resolve on the next animation frame with its timestamp.
    fn next_frame(&self) -> LocalBoxFuture<'static, f64>;

    /// Run a task on the host event loop.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// [`Host`] backed by the browser window.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHost;

fn performance_now() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

impl Host for BrowserHost {
    fn now_ms(&self) -> f64 {
        performance_now()
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, f64> {
        let promise = Promise::new(&mut |resolve, _reject| {
            if gloo_utils::window().request_animation_frame(&resolve).is_err() {
                // No frame will come; resolve now so callers still progress
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });

        Box::pin(async move {
            match JsFuture::from(promise).await {
                Ok(ts) => ts.as_f64().unwrap_or_else(performance_now),
                Err(_) => performance_now(),
            }
        })
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
