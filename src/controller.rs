//! Action button controller.
//!
//! One instance per button. A click either gets ignored (already busy),
//! rejected (missing identifier) or starts an operation that:
//!
//! 1. marks the button busy, synchronously, before anything is awaited;
//! 2. POSTs to the action endpoint and, when the profile has one, runs the
//!    simulated progress bar alongside the request;
//! 3. renders `glyph + msg` once both the result and the bar are done;
//! 4. waits the settle delay and returns the button to idle, showing the
//!    label it had when the controller was bound.
//!
//! Network and parse failures become ordinary failure results, so step 3
//! and 4 run on every path. Step 4 is also tied to a drop guard, so an
//! operation that is dropped half way still releases the button.

use crate::config::{
    ATTENDANCE_BUSY_LABEL, ATTENDANCE_ENDPOINT, ATTENDANCE_IDLE_LABEL, ATTENDANCE_PENDING_MSG,
    ATTENDANCE_SETTLE_MS, ENROLL_BUSY_LABEL, ENROLL_ENDPOINT, ENROLL_IDLE_LABEL,
    ENROLL_PENDING_MSG, ENROLL_SETTLE_MS,
};
use crate::host::Host;
use crate::outcome::{ActionError, ActionResult};
use crate::progress::ProgressSimulation;
use crate::transport::ActionTransport;
use crate::utils::{endpoint_needs_id, interpolate_endpoint};
use crate::view::{ButtonView, ProgressView, TextView};
use futures::future::LocalBoxFuture;
use log::{debug, error, info, warn};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Busy,
}

/// Static description of one action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionProfile {
    pub name: &'static str,
    /// Path template; `{id}` is replaced by the trigger's identifier.
    pub endpoint: &'static str,
    /// Used only when the bound button has no label of its own.
    pub idle_label: &'static str,
    pub busy_label: &'static str,
    pub pending_message: &'static str,
    pub progress: Option<ProgressSimulation>,
    pub settle_ms: u32,
}

impl ActionProfile {
    /// Face enrollment capture for one student.
    pub fn enrollment() -> Self {
        Self {
            name: "enroll",
            endpoint: ENROLL_ENDPOINT,
            idle_label: ENROLL_IDLE_LABEL,
            busy_label: ENROLL_BUSY_LABEL,
            pending_message: ENROLL_PENDING_MSG,
            progress: Some(ProgressSimulation::default()),
            settle_ms: ENROLL_SETTLE_MS,
        }
    }

    /// Attendance marking by face recognition.
    pub fn attendance() -> Self {
        Self {
            name: "attendance",
            endpoint: ATTENDANCE_ENDPOINT,
            idle_label: ATTENDANCE_IDLE_LABEL,
            busy_label: ATTENDANCE_BUSY_LABEL,
            pending_message: ATTENDANCE_PENDING_MSG,
            progress: None,
            settle_ms: ATTENDANCE_SETTLE_MS,
        }
    }

    pub fn requires_identifier(&self) -> bool {
        endpoint_needs_id(self.endpoint)
    }
}

/// Elements one controller writes to. Never shared between controllers.
#[derive(Clone)]
pub struct ActionBindings {
    pub button: Rc<dyn ButtonView>,
    pub status: Rc<dyn TextView>,
    pub progress: Option<Rc<dyn ProgressView>>,
}

/// What happened to a click.
pub enum ClickOutcome {
    /// The button was busy; nothing changed.
    Ignored,
    /// Precondition failed; the message is shown, the button stays idle.
    Rejected(ActionError),
    /// The button is busy and the operation is ready to be driven.
    Started(LocalBoxFuture<'static, ActionResult>),
}

impl fmt::Debug for ClickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickOutcome::Ignored => write!(f, "Ignored"),
            ClickOutcome::Rejected(e) => write!(f, "Rejected({:?})", e),
            ClickOutcome::Started(_) => write!(f, "Started(..)"),
        }
    }
}

pub struct ActionController {
    profile: ActionProfile,
    bindings: ActionBindings,
    host: Rc<dyn Host>,
    transport: Rc<dyn ActionTransport>,
    idle_label: String,
    state: Cell<ButtonState>,
    dispatched: Cell<u64>,
}

impl ActionController {
    pub fn new(
        profile: ActionProfile,
        bindings: ActionBindings,
        host: Rc<dyn Host>,
        transport: Rc<dyn ActionTransport>,
    ) -> Rc<Self> {
        let current = bindings.button.label();
        let idle_label = if current.trim().is_empty() {
            profile.idle_label.to_string()
        } else {
            current
        };
        Rc::new(Self {
            profile,
            bindings,
            host,
            transport,
            idle_label,
            state: Cell::new(ButtonState::Idle),
            dispatched: Cell::new(0),
        })
    }

    pub fn profile(&self) -> &ActionProfile {
        &self.profile
    }

    /// Label restored whenever the button returns to idle.
    pub fn idle_label(&self) -> &str {
        &self.idle_label
    }

    pub fn state(&self) -> ButtonState {
        self.state.get()
    }

    /// Requests sent since construction.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched.get()
    }

    /// Synchronous half of a click: guard, validate, go busy.
    ///
    /// Everything here happens before the first suspension point, so two
    /// clicks in the same event turn can never both start an operation.
    pub fn click(self: &Rc<Self>) -> ClickOutcome {
        if self.state.get() == ButtonState::Busy {
            debug!("{}: busy, click ignored", self.profile.name);
            return ClickOutcome::Ignored;
        }

        let id = self
            .bindings
            .button
            .identifier()
            .filter(|id| !id.trim().is_empty());
        if self.profile.requires_identifier() && id.is_none() {
            let err = ActionError::MissingIdentifier;
            warn!("{}: {}", self.profile.name, err);
            self.bindings.status.set_text(err.fallback_message());
            return ClickOutcome::Rejected(err);
        }

        let path = interpolate_endpoint(self.profile.endpoint, id.as_deref());
        let guard = self.enter_busy();
        let this = Rc::clone(self);
        ClickOutcome::Started(Box::pin(async move { this.run(path, guard).await }))
    }

    /// Click and hand the resulting operation to the host event loop.
    pub fn handle_click(self: &Rc<Self>) {
        if let ClickOutcome::Started(operation) = self.click() {
            self.host.spawn(Box::pin(async move {
                operation.await;
            }));
        }
    }

    fn enter_busy(self: &Rc<Self>) -> BusyGuard {
        debug!("{}: idle -> busy", self.profile.name);
        self.state.set(ButtonState::Busy);
        let b = &self.bindings;
        b.button.set_busy(true);
        b.button.set_label(self.profile.busy_label);
        if let Some(progress) = &b.progress {
            progress.set_percent(0);
        }
        b.status.set_text(self.profile.pending_message);
        BusyGuard {
            controller: Rc::clone(self),
        }
    }

    fn leave_busy(&self) {
        debug!("{}: busy -> idle", self.profile.name);
        self.bindings.button.set_busy(false);
        self.bindings.button.set_label(&self.idle_label);
        self.state.set(ButtonState::Idle);
    }

    async fn run(self: Rc<Self>, path: String, guard: BusyGuard) -> ActionResult {
        let request = self.request(&path);
        let result = match self.profile.progress {
            Some(simulation) => {
                let ticker =
                    simulation.run(Rc::clone(&self.host), self.bindings.progress.clone());
                let (result, _) = futures::join!(request, ticker);
                result
            }
            None => request.await,
        };

        info!(
            "{}: {} ({})",
            self.profile.name,
            if result.success { "succeeded" } else { "failed" },
            result.msg
        );
        self.bindings.status.set_text(&result.status_line());

        if self.profile.settle_ms > 0 {
            self.host.sleep(self.profile.settle_ms).await;
        }
        drop(guard);
        result
    }

    async fn request(&self, path: &str) -> ActionResult {
        self.dispatched.set(self.dispatched.get() + 1);
        debug!("{}: POST {}", self.profile.name, path);
        match self.transport.post(path).await {
            Ok(body) => ActionResult::from_body(&body),
            Err(e) => {
                error!("{}: POST {} failed: {}", self.profile.name, path, e);
                e.into_result()
            }
        }
    }
}

/// Returns the controller to idle when the operation ends or is dropped.
struct BusyGuard {
    controller: Rc<ActionController>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.controller.leave_busy();
    }
}
