use crate::animation::ease::Ease;

use std::time::Duration;

/// Duration shared by path morphs and label enter/leave transitions.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(700);

/// Timing of chart transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationSettings {
    /// Tween length in milliseconds.
    pub duration_ms: u64,
    /// Easing curve applied to tween progress.
    pub ease: Ease,
}

impl AnimationSettings {
    /// Tween length.
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: TRANSITION_DURATION.as_millis() as u64,
            ease: Ease::InOutCubic,
        }
    }
}

/// Lifecycle of a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Created, not started.
    Idle,
    /// Advancing on every sample.
    Running,
    /// Cancelled before completion.
    Stopped,
    /// Reached progress 1.
    Finished,
}

/// A progress value running from 0 to 1 over a fixed duration.
///
/// Time is supplied by the caller (`now`, a monotonic timestamp from any epoch),
/// so the tween never reads a clock itself.
#[derive(Clone, Debug)]
pub struct Tween {
    duration: Duration,
    ease: Ease,
    started_at: Duration,
    state: TweenState,
}

impl Tween {
    /// A tween that has not started yet.
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            duration: settings.duration(),
            ease: settings.ease,
            started_at: Duration::ZERO,
            state: TweenState::Idle,
        }
    }

    /// Start (or restart) at `now`.
    pub fn start(&mut self, now: Duration) {
        self.started_at = now;
        self.state = TweenState::Running;
    }

    /// Cancel; later samples return `None`.
    pub fn stop(&mut self) {
        if self.state == TweenState::Running {
            self.state = TweenState::Stopped;
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Whether the tween still produces new values.
    pub fn is_active(&self) -> bool {
        self.state == TweenState::Running
    }

    /// Linear progress at `now`, in `[0, 1]`.
    pub fn linear_progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress at `now`, or `None` when not running.
    ///
    /// The sample that reaches the end returns the final value and moves the
    /// tween to [`TweenState::Finished`].
    pub fn sample(&mut self, now: Duration) -> Option<f64> {
        if self.state != TweenState::Running {
            return None;
        }
        let linear = self.linear_progress(now);
        if linear >= 1.0 {
            self.state = TweenState::Finished;
            return Some(1.0);
        }
        Some(self.ease.apply(linear))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
