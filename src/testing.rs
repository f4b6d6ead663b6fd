//! Deterministic doubles for the host, transport and views.

use crate::host::Host;
use crate::outcome::ActionError;
use crate::transport::ActionTransport;
use crate::view::{ButtonView, ProgressView, TextView};
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Frame interval used by [`FakeHost::next_frame`].
pub const FRAME_MS: u32 = 16;

struct PendingTimer {
    deadline: f64,
    seq: u64,
    fire: oneshot::Sender<()>,
}

/// Manual clock; timers fire in deadline order when the harness advances.
pub struct FakeHost {
    now: Rc<Cell<f64>>,
    seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    spawner: LocalSpawner,
}

impl FakeHost {
    fn schedule(&self, ms: u32) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer {
            deadline: self.now.get() + ms as f64,
            seq,
            fire: tx,
        });
        rx
    }

    fn pop_due(&self, limit: f64) -> Option<PendingTimer> {
        let mut timers = self.timers.borrow_mut();
        let idx = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= limit)
            .min_by(|(_, a), (_, b)| {
                a.deadline
                    .total_cmp(&b.deadline)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(i, _)| i)?;
        Some(timers.swap_remove(idx))
    }

    pub fn pending_timers(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|t| !t.fire.is_canceled())
            .count()
    }
}

impl Host for FakeHost {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        let rx = self.schedule(ms);
        Box::pin(async move {
            let _ = rx.await;
        })
    }

    fn next_frame(&self) -> LocalBoxFuture<'static, f64> {
        let rx = self.schedule(FRAME_MS);
        let now = Rc::clone(&self.now);
        Box::pin(async move {
            let _ = rx.await;
            now.get()
        })
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).unwrap();
    }
}

/// Executor plus fake clock.
pub struct Harness {
    pool: LocalPool,
    pub host: Rc<FakeHost>,
}

impl Harness {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let host = Rc::new(FakeHost {
            now: Rc::new(Cell::new(0.0)),
            seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
            spawner: pool.spawner(),
        });
        Self { pool, host }
    }

    pub fn host(&self) -> Rc<dyn Host> {
        self.host.clone()
    }

    pub fn spawn<F>(&self, fut: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        self.host.spawn(Box::pin(fut));
    }

    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Move the clock forward, firing every timer due on the way.
    pub fn advance(&mut self, ms: u32) {
        let target = self.host.now.get() + ms as f64;
        loop {
            self.pool.run_until_stalled();
            match self.host.pop_due(target) {
                Some(timer) => {
                    self.host.now.set(timer.deadline);
                    let _ = timer.fire.send(());
                }
                None => break,
            }
        }
        self.host.now.set(target);
        self.pool.run_until_stalled();
    }
}

#[derive(Default)]
pub struct RecordingText {
    pub history: RefCell<Vec<String>>,
}

impl RecordingText {
    pub fn last(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl TextView for RecordingText {
    fn set_text(&self, text: &str) {
        self.history.borrow_mut().push(text.to_string());
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub history: RefCell<Vec<u8>>,
}

impl RecordingProgress {
    pub fn last(&self) -> Option<u8> {
        self.history.borrow().last().copied()
    }
}

impl ProgressView for RecordingProgress {
    fn set_percent(&self, percent: u8) {
        self.history.borrow_mut().push(percent);
    }
}

#[derive(Default)]
pub struct RecordingButton {
    pub id: Option<String>,
    pub busy: Cell<bool>,
    pub label: RefCell<String>,
}

impl RecordingButton {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    /// A button already showing `label`, as rendered by the page.
    pub fn labelled(self, label: &str) -> Self {
        *self.label.borrow_mut() = label.to_string();
        self
    }
}

impl ButtonView for RecordingButton {
    fn identifier(&self) -> Option<String> {
        self.id.clone()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }

    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }
}

/// One canned response: body or error, delivered after `delay_ms`.
pub struct Reply {
    pub delay_ms: u32,
    pub body: Result<String, ActionError>,
}

impl Reply {
    pub fn json(delay_ms: u32, body: &str) -> Self {
        Self {
            delay_ms,
            body: Ok(body.to_string()),
        }
    }

    pub fn fail(delay_ms: u32, detail: &str) -> Self {
        Self {
            delay_ms,
            body: Err(ActionError::Transport(detail.to_string())),
        }
    }
}

/// Replays queued replies and records every request path.
pub struct ScriptedTransport {
    host: Rc<FakeHost>,
    replies: RefCell<VecDeque<Reply>>,
    pub posts: RefCell<Vec<String>>,
    pub gets: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(host: &Rc<FakeHost>, replies: Vec<Reply>) -> Self {
        Self {
            host: Rc::clone(host),
            replies: RefCell::new(replies.into()),
            posts: RefCell::new(Vec::new()),
            gets: RefCell::new(Vec::new()),
        }
    }

    fn reply(&self) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Reply::fail(0, "no scripted reply"));
        let delay = self.host.sleep(reply.delay_ms);
        Box::pin(async move {
            delay.await;
            reply.body
        })
    }
}

impl ActionTransport for ScriptedTransport {
    fn post(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        self.posts.borrow_mut().push(path.to_string());
        self.reply()
    }

    fn get(&self, path: &str) -> LocalBoxFuture<'static, Result<String, ActionError>> {
        self.gets.borrow_mut().push(path.to_string());
        self.reply()
    }
}
