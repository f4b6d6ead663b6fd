//! Simulated progress: a timer-driven bar that gives every action a
//! minimum visible duration, independent of the real request.

use crate::config::{PROGRESS_MAX, PROGRESS_STEP, PROGRESS_TICK_MS};
use crate::host::Host;
use crate::view::ProgressView;
use std::rc::Rc;

/// Percentage in `0..=100`, non-decreasing until [`ProgressState::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState(u8);

impl ProgressState {
    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= PROGRESS_MAX
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Add `step`, clamped to 100. Returns the new percentage.
    pub fn advance(&mut self, step: u8) -> u8 {
        self.0 = self.0.saturating_add(step).min(PROGRESS_MAX);
        self.0
    }
}

/// Tick interval and increment of the simulated bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSimulation {
    pub tick_ms: u32,
    pub step: u8,
}

impl Default for ProgressSimulation {
    fn default() -> Self {
        Self {
            tick_ms: PROGRESS_TICK_MS,
            step: PROGRESS_STEP,
        }
    }
}

impl ProgressSimulation {
    fn effective_step(&self) -> u8 {
        self.step.max(1)
    }

    /// Number of ticks until the bar is full.
    pub fn ticks(&self) -> u32 {
        let step = self.effective_step() as u32;
        (PROGRESS_MAX as u32).div_ceil(step)
    }

    /// Minimum time the bar stays visible.
    pub fn duration_ms(&self) -> u32 {
        self.ticks() * self.tick_ms
    }

    /// Tick until the bar reaches 100, updating `view` on every tick.
    ///
    /// The timer is dropped as soon as the bar is full; nothing keeps
    /// running after this future resolves.
    pub async fn run(
        self,
        host: Rc<dyn Host>,
        view: Option<Rc<dyn ProgressView>>,
    ) -> ProgressState {
        let mut state = ProgressState::default();
        while !state.is_complete() {
            host.sleep(self.tick_ms).await;
            let percent = state.advance(self.effective_step());
            if let Some(view) = &view {
                view.set_percent(percent);
            }
        }
        state
    }
}
