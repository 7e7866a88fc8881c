// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-segment animator.
//!
//! An [`Animator`] interpolates one bound property from a start value to an
//! end value over a duration. It is ticked once per redraw; each tick writes
//! the interpolated value through the property binding.

use crate::binding::PropertyBinding;
use crate::easing::EasingCurve;
use crate::evaluator::{Evaluator, EvaluatorParams};
use crate::value::Interpolate;
use std::time::{Duration, Instant};

/// Writes closer than this to the current property value are skipped
const WRITE_EPSILON: f32 = 1e-6;

/// Common surface of everything a widget can tick
pub trait Animate {
    /// Begin playback at `now`
    fn start_at(&mut self, now: Instant);

    /// Advance one tick at `now`
    fn animate_at(&mut self, now: Instant);

    /// Whether playback has completed
    fn is_finished(&self) -> bool;

    /// Begin playback now
    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Advance one tick now
    fn animate(&mut self) {
        self.animate_at(Instant::now());
    }
}

/// Playback state of an animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorState {
    /// Never started
    #[default]
    Idle,
    /// Segment in progress
    Running {
        /// When the segment started
        started_at: Instant,
    },
    /// Segment completed
    Finished,
}

/// Animates one property through one segment
#[derive(Debug, Clone)]
pub struct Animator<T> {
    evaluator: Evaluator<T>,
    binding: PropertyBinding<T>,
    state: AnimatorState,
}

impl<T: Interpolate + Default> Animator<T> {
    /// Create an animator with default values and duration
    pub fn new() -> Self {
        Self::with_params(EvaluatorParams::default())
    }
}

impl<T: Interpolate + Default> Default for Animator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interpolate> Animator<T> {
    /// Create an animator for a segment
    pub fn with_params(params: EvaluatorParams<T>) -> Self {
        Self {
            evaluator: Evaluator::new(params),
            binding: PropertyBinding::unbound(),
            state: AnimatorState::Idle,
        }
    }

    /// Set the start value
    pub fn set_start_value(&mut self, value: T) {
        self.evaluator.params_mut().start_value = value;
    }

    /// Start value
    pub fn start_value(&self) -> &T {
        &self.evaluator.params().start_value
    }

    /// Set the end value
    pub fn set_end_value(&mut self, value: T) {
        self.evaluator.params_mut().end_value = value;
    }

    /// End value
    pub fn end_value(&self) -> &T {
        &self.evaluator.params().end_value
    }

    /// Set the duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.evaluator.params_mut().duration = duration;
    }

    /// Set the duration in milliseconds
    pub fn set_duration_ms(&mut self, millis: u32) {
        self.set_duration(Duration::from_millis(u64::from(millis)));
    }

    /// Duration
    pub fn duration(&self) -> Duration {
        self.evaluator.params().duration
    }

    /// Set the easing curve
    pub fn set_curve_type(&mut self, curve: EasingCurve) {
        self.evaluator.params_mut().curve = curve;
    }

    /// Easing curve
    pub fn curve_type(&self) -> EasingCurve {
        self.evaluator.params().curve
    }

    /// Load a whole segment.
    ///
    /// Does not restart a running segment; the new parameters apply from the
    /// next tick relative to the original start time.
    pub fn set_params(&mut self, params: EvaluatorParams<T>) {
        self.evaluator.set_params(params);
    }

    /// Current segment parameters
    pub fn params(&self) -> &EvaluatorParams<T> {
        self.evaluator.params()
    }

    /// Install the property binding
    pub fn set_binding(&mut self, binding: PropertyBinding<T>) {
        self.binding = binding;
    }

    /// Property binding
    pub fn binding(&self) -> &PropertyBinding<T> {
        &self.binding
    }

    /// Playback state
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Whether a segment is in progress
    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    /// Whether a started segment has completed. An animator that was never
    /// started is not finished.
    pub fn is_finished(&self) -> bool {
        self.state == AnimatorState::Finished
    }

    /// Normalized progress of the segment at `now`
    pub fn progress_at(&self, now: Instant) -> f32 {
        match self.state {
            AnimatorState::Idle => 0.0,
            AnimatorState::Running { started_at } => {
                self.evaluator.progress(now.saturating_duration_since(started_at))
            }
            AnimatorState::Finished => 1.0,
        }
    }

    /// Begin a fresh segment at `now`
    pub fn start_at(&mut self, now: Instant) {
        if !self.binding.has_setter() {
            tracing::debug!("animator started without a property setter");
        }
        self.state = AnimatorState::Running { started_at: now };
    }

    /// Begin a fresh segment now
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Advance one tick at `now`, writing the interpolated value.
    ///
    /// Does nothing unless a segment is running.
    pub fn animate_at(&mut self, now: Instant) {
        let AnimatorState::Running { started_at } = self.state else {
            return;
        };

        let (value, done) = self
            .evaluator
            .evaluate(now.saturating_duration_since(started_at));
        self.write(value);

        if done {
            self.state = AnimatorState::Finished;
            tracing::trace!("segment finished");
        }
    }

    /// Advance one tick now
    pub fn animate(&mut self) {
        self.animate_at(Instant::now());
    }

    fn write(&self, value: T) {
        if let Some(current) = self.binding.get() {
            if current.approx_eq(&value, WRITE_EPSILON) {
                return;
            }
        }
        self.binding.set(value);
    }
}

impl<T: Interpolate> Animate for Animator<T> {
    fn start_at(&mut self, now: Instant) {
        Animator::start_at(self, now);
    }

    fn animate_at(&mut self, now: Instant) {
        Animator::animate_at(self, now);
    }

    fn is_finished(&self) -> bool {
        Animator::is_finished(self)
    }
}
