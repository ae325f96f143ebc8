//! One-shot value animation
//!
//! The interpolation is a pure function of elapsed time; whoever owns the
//! frame loop feeds it instants through [`IntAnimator::tick`].

use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Delay before the entry animation starts moving
pub const ENTRY_DELAY: Duration = Duration::from_millis(200);

/// Length of the entry animation once it starts
pub const ENTRY_DURATION: Duration = Duration::from_millis(1500);

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Ease-in-ease-out curve: slow at both ends, fastest at `t = 0.5`
pub fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Pending,
    Running,
    Finished,
}

/// Animates an integer from `from` to `to` exactly once
#[derive(Debug, Clone)]
pub struct IntAnimator {
    from: u32,
    to: u32,
    delay: Duration,
    duration: Duration,
    started_at: Option<Instant>,
    state: AnimationState,
}

impl IntAnimator {
    pub fn new(from: u32, to: u32, delay: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            delay,
            duration,
            started_at: None,
            state: AnimationState::Pending,
        }
    }

    /// The gauge's entry animation: 0 to `target`
    pub fn entry(target: u32) -> Self {
        Self::new(0, target, ENTRY_DELAY, ENTRY_DURATION)
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == AnimationState::Finished
    }

    /// Interpolated value `elapsed` after the clock started
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        if elapsed < self.delay {
            return self.from;
        }
        let running = elapsed - self.delay;
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let value = lerp(self.from as f64, self.to as f64, accelerate_decelerate(t));
        // Truncate like an integer evaluator; the curve can overshoot by an ulp
        (value.trunc() as u32).clamp(self.from.min(self.to), self.from.max(self.to))
    }

    /// Advance to `now`. The first call starts the clock.
    ///
    /// Returns the value to apply, or `None` during the delay and after the
    /// final value has been delivered.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        if self.state == AnimationState::Finished {
            return None;
        }
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed < self.delay {
            return None;
        }
        if self.state == AnimationState::Pending {
            log::debug!("Animation {} -> {} started", self.from, self.to);
            self.state = AnimationState::Running;
        }
        let value = self.value_at(elapsed);
        if elapsed >= self.delay + self.duration {
            log::debug!("Animation {} -> {} finished", self.from, self.to);
            self.state = AnimationState::Finished;
        }
        Some(value)
    }
}
