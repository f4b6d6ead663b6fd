//! Numeric counter animation: 0 -> target over a fixed duration, one value
//! per animation frame.

use crate::config::DEFAULT_COUNTER_DURATION_MS;
use crate::host::Host;
use crate::view::TextView;
use log::debug;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSpec {
    pub target: u64,
    pub duration_ms: u32,
}

impl CounterSpec {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            duration_ms: DEFAULT_COUNTER_DURATION_MS,
        }
    }

    /// Zero durations are bumped to 1ms so progress stays well defined.
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms.max(1);
        self
    }

    /// Fraction of the animation done after `elapsed_ms`, in `[0, 1]`.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        let p = elapsed_ms / self.duration_ms.max(1) as f64;
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }

    /// Displayed value after `elapsed_ms`: `floor(target * progress)`,
    /// exactly `target` once progress reaches 1.
    pub fn value_at(&self, elapsed_ms: f64) -> u64 {
        let progress = self.progress(elapsed_ms);
        if progress >= 1.0 {
            self.target
        } else {
            ((self.target as f64 * progress).floor() as u64).min(self.target)
        }
    }
}

/// Running state of one counter, sampled once per frame.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    spec: CounterSpec,
    start_ms: f64,
    displayed: u64,
    finished: bool,
}

impl CounterAnimation {
    pub fn start(spec: CounterSpec, start_ms: f64) -> Self {
        Self {
            spec,
            start_ms,
            displayed: 0,
            finished: false,
        }
    }

    /// Value for the frame at `now_ms`. Never decreases between calls.
    pub fn sample(&mut self, now_ms: f64) -> u64 {
        let elapsed = now_ms - self.start_ms;
        self.displayed = self.displayed.max(self.spec.value_at(elapsed));
        self.finished = self.spec.progress(elapsed) >= 1.0;
        self.displayed
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Lazily map a sequence of frame timestamps onto displayed values,
    /// stopping after the frame that reaches the target.
    pub fn frames<I>(mut self, timestamps: I) -> impl Iterator<Item = u64>
    where
        I: IntoIterator<Item = f64>,
    {
        timestamps.into_iter().map_while(move |ts| {
            if self.finished {
                None
            } else {
                Some(self.sample(ts))
            }
        })
    }
}

/// Drive `view` from 0 to `spec.target`, one write per frame.
///
/// Without a view this is a no-op and returns `None`; otherwise the final
/// displayed value, which always equals the target.
pub async fn animate_counter(
    host: Rc<dyn Host>,
    view: Option<Rc<dyn TextView>>,
    spec: CounterSpec,
) -> Option<u64> {
    let Some(view) = view else {
        debug!("counter has no display element, skipping");
        return None;
    };

    let mut animation = CounterAnimation::start(spec, host.now_ms());
    while !animation.is_finished() {
        let now = host.next_frame().await;
        let value = animation.sample(now);
        view.set_text(&value.to_string());
    }
    Some(animation.displayed())
}
