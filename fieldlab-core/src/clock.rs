//! Per-renderer animation clock: a small state machine that owns the phase
//! accumulator and at most one cancellable frame subscription at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle states of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Cancelled,
}

/// Opaque handle for a pending frame loop. Cloning shares the same
/// cancellation flag, so a stale callback can detect cancellation even after
/// the clock has moved on to a new subscription.
#[derive(Debug, Clone)]
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Drives one renderer's continuous redraw. `start` always cancels the
/// previous subscription before handing out a new one, so two frame loops
/// can never race on the same drawing surface.
#[derive(Debug)]
pub struct AnimationClock {
    state: ClockState,
    subscription: Option<Subscription>,
    phase: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            subscription: None,
            phase: 0.0,
        }
    }

    /// Begins a fresh frame loop: cancels any live subscription first
    /// (mandatory ordering), resets phase time to zero, and returns the new
    /// handle.
    pub fn start(&mut self) -> Subscription {
        if let Some(prev) = self.subscription.take() {
            prev.cancel();
        }
        self.phase = 0.0;
        self.state = ClockState::Running;
        let subscription = Subscription::new();
        self.subscription = Some(subscription.clone());
        subscription
    }

    /// Cancels the current subscription. An already-scheduled callback that
    /// fires afterwards sees `is_cancelled` and must return without drawing.
    pub fn cancel(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
        if self.state == ClockState::Running {
            self.state = ClockState::Cancelled;
        }
    }

    /// Advances the phase accumulator by a renderer's fixed per-frame step.
    /// No-op unless the clock is live.
    pub fn advance(&mut self, step: f64) {
        if self.is_live() {
            self.phase += step;
        }
    }

    /// Current phase time. Monotonic within one subscription, reset to zero
    /// by every `start`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// True when a non-cancelled subscription exists.
    pub fn is_live(&self) -> bool {
        self.state == ClockState::Running
            && self
                .subscription
                .as_ref()
                .map(|s| !s.is_cancelled())
                .unwrap_or(false)
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
