// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step-by-step animation.
//!
//! A [`StepSequencer`] chains segments: it plays the first queued step when
//! started, and every time the embedded [`Animator`] finishes it loads the
//! next queued step and restarts it. From the widget's point of view it is a
//! single animation ticked once per redraw.

use crate::animator::{Animate, Animator};
use crate::binding::{Getter, PropertyBinding, Setter};
use crate::easing::EasingCurve;
use crate::evaluator::EvaluatorParams;
use crate::value::Interpolate;
use std::rc::Rc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a step sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequencerId(pub Uuid);

impl SequencerId {
    /// Create a new random sequencer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequencerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback state of a step sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// Not started
    #[default]
    Idle,
    /// Playing a step
    Playing {
        /// Index of the active step
        step: usize,
    },
    /// Playing the animator's live configuration rather than a queued step.
    ///
    /// Happens when started with no steps, or after the steps were cleared
    /// while a segment was playing.
    Live,
    /// Last step finished
    Done,
}

/// Plays queued segments one after another
#[derive(Debug, Clone)]
pub struct StepSequencer<T> {
    id: SequencerId,
    steps: Vec<EvaluatorParams<T>>,
    /// Index of the step loaded on the next advance
    next_index: usize,
    animator: Animator<T>,
    binding: PropertyBinding<T>,
    started: bool,
}

impl<T: Interpolate + Default> StepSequencer<T> {
    /// Create an empty sequencer
    pub fn new() -> Self {
        Self::with_animator(Animator::new())
    }
}

impl<T: Interpolate + Default> Default for StepSequencer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interpolate + 'static> StepSequencer<T> {
    /// Install the getter used to read the animated property
    pub fn set_getter(&mut self, getter: impl Fn() -> T + 'static) {
        let getter: Getter<T> = Rc::new(getter);
        self.binding.set_getter(getter);
    }

    /// Install the setter used to write the animated property
    pub fn set_setter(&mut self, setter: impl Fn(T) + 'static) {
        let setter: Setter<T> = Rc::new(setter);
        self.binding.set_setter(setter);
    }
}

impl<T: Interpolate> StepSequencer<T> {
    /// Create an empty sequencer around a preconfigured animator.
    ///
    /// The animator's configuration is what plays when no steps are queued.
    pub fn with_animator(animator: Animator<T>) -> Self {
        Self {
            id: SequencerId::new(),
            steps: Vec::new(),
            next_index: 1,
            animator,
            binding: PropertyBinding::unbound(),
            started: false,
        }
    }

    /// Sequencer ID
    pub fn id(&self) -> SequencerId {
        self.id
    }

    /// Append a step to the end of the sequence
    pub fn add_step(&mut self, step: EvaluatorParams<T>) {
        self.steps.push(step);
    }

    /// Append a step (builder pattern)
    pub fn with_step(mut self, step: EvaluatorParams<T>) -> Self {
        self.add_step(step);
        self
    }

    /// Queued steps in playback order
    pub fn steps(&self) -> &[EvaluatorParams<T>] {
        &self.steps
    }

    /// Number of queued steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Remove every queued step.
    ///
    /// A segment already playing keeps running, and the first step appended
    /// afterwards is loaded once it finishes.
    pub fn clear_steps(&mut self) {
        self.steps.clear();
        self.next_index = if self.animator.is_running() { 0 } else { 1 };
    }

    /// Install both accessors.
    ///
    /// Accessors are handed to the animator on [`start`](Self::start), so a
    /// change made during playback applies from the next start.
    pub fn bind(&mut self, binding: PropertyBinding<T>) {
        self.binding = binding;
    }

    /// Install both accessors (builder pattern)
    pub fn with_binding(mut self, binding: PropertyBinding<T>) -> Self {
        self.bind(binding);
        self
    }

    /// Installed accessors
    pub fn binding(&self) -> &PropertyBinding<T> {
        &self.binding
    }

    /// The embedded single-segment animator
    pub fn animator(&self) -> &Animator<T> {
        &self.animator
    }

    /// Set the animator's live start value. Queued steps are untouched.
    pub fn set_start_value(&mut self, value: T) {
        self.animator.set_start_value(value);
    }

    /// The animator's live start value
    pub fn start_value(&self) -> &T {
        self.animator.start_value()
    }

    /// Set the animator's live end value. Queued steps are untouched.
    pub fn set_end_value(&mut self, value: T) {
        self.animator.set_end_value(value);
    }

    /// The animator's live end value
    pub fn end_value(&self) -> &T {
        self.animator.end_value()
    }

    /// Set the animator's live duration. Queued steps are untouched.
    pub fn set_duration(&mut self, duration: Duration) {
        self.animator.set_duration(duration);
    }

    /// Set the animator's live duration in milliseconds
    pub fn set_duration_ms(&mut self, millis: u32) {
        self.animator.set_duration_ms(millis);
    }

    /// The animator's live duration
    pub fn duration(&self) -> Duration {
        self.animator.duration()
    }

    /// Set the animator's live easing curve. Queued steps are untouched.
    pub fn set_curve_type(&mut self, curve: EasingCurve) {
        self.animator.set_curve_type(curve);
    }

    /// The animator's live easing curve
    pub fn curve_type(&self) -> EasingCurve {
        self.animator.curve_type()
    }

    /// Index of the step loaded on the next advance.
    ///
    /// `start` sets it to 1; `clear_steps` rewinds it to 0 while a segment is
    /// still playing.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Playback state
    pub fn state(&self) -> SequencerState {
        if !self.started {
            SequencerState::Idle
        } else if self.animator.is_finished() && self.next_index >= self.steps.len() {
            SequencerState::Done
        } else {
            match self.next_index.checked_sub(1) {
                Some(step) if step < self.steps.len() => SequencerState::Playing { step },
                _ => SequencerState::Live,
            }
        }
    }

    /// Index of the step being played
    pub fn current_step(&self) -> Option<usize> {
        match self.state() {
            SequencerState::Playing { step } => Some(step),
            SequencerState::Idle | SequencerState::Live | SequencerState::Done => None,
        }
    }

    /// Whether the last step has finished
    pub fn is_finished(&self) -> bool {
        self.state() == SequencerState::Done
    }

    /// Restart playback from the first step at `now`
    pub fn start_at(&mut self, now: Instant) {
        self.next_index = 1;

        if let Some(first) = self.steps.first() {
            self.animator.set_params(first.clone());
        }

        self.animator.set_binding(self.binding.clone());
        self.animator.start_at(now);
        self.started = true;

        tracing::debug!(
            sequencer = %self.id.0,
            steps = self.steps.len(),
            "step sequence started"
        );
    }

    /// Restart playback from the first step now
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Advance one tick at `now`.
    ///
    /// When the current step has finished and another is queued, that step
    /// is loaded and restarted at `now` before the tick is forwarded.
    pub fn animate_at(&mut self, now: Instant) {
        if self.animator.is_finished() && self.next_index < self.steps.len() {
            self.animator.set_params(self.steps[self.next_index].clone());
            self.animator.start_at(now);

            tracing::debug!(
                sequencer = %self.id.0,
                step = self.next_index,
                "advancing to next step"
            );

            self.next_index += 1;
        }

        self.animator.animate_at(now);
    }

    /// Advance one tick now
    pub fn animate(&mut self) {
        self.animate_at(Instant::now());
    }
}

impl<T: Interpolate> Animate for StepSequencer<T> {
    fn start_at(&mut self, now: Instant) {
        StepSequencer::start_at(self, now);
    }

    fn animate_at(&mut self, now: Instant) {
        StepSequencer::animate_at(self, now);
    }

    fn is_finished(&self) -> bool {
        StepSequencer::is_finished(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn step(start: f32, end: f32, millis: u32) -> EvaluatorParams<f32> {
        EvaluatorParams::from_millis(start, end, millis, EasingCurve::Linear)
    }

    fn sequencer(value: &Rc<Cell<f32>>) -> StepSequencer<f32> {
        StepSequencer::new().with_binding(PropertyBinding::cell(value))
    }

    #[test]
    fn test_new_sequencer_is_idle() {
        let seq = StepSequencer::<f32>::new();
        assert_eq!(seq.next_index(), 1);
        assert_eq!(seq.state(), SequencerState::Idle);
        assert_eq!(seq.current_step(), None);
        assert!(!seq.is_finished());
    }

    #[test]
    fn test_animate_before_start_is_inert() {
        let value = Rc::new(Cell::new(-1.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 100))
            .with_step(step(1.0, 2.0, 100));

        seq.animate_at(Instant::now());
        assert_eq!(seq.next_index(), 1);
        assert_eq!(seq.state(), SequencerState::Idle);
        assert_eq!(value.get(), -1.0);
    }

    #[test]
    fn test_start_loads_first_step() {
        let mut seq = StepSequencer::<f32>::new()
            .with_step(EvaluatorParams::from_millis(0.0, 1.0, 250, EasingCurve::OutQuad))
            .with_step(step(1.0, 0.0, 400));

        seq.start_at(Instant::now());
        assert_eq!(seq.animator().params(), &seq.steps()[0]);
        assert_eq!(seq.next_index(), 1);
        assert_eq!(seq.state(), SequencerState::Playing { step: 0 });
    }

    #[test]
    fn test_start_resets_next_index_for_any_length() {
        for count in 0..4 {
            let mut seq = StepSequencer::<f32>::new();
            for i in 0..count {
                seq.add_step(step(i as f32, i as f32 + 1.0, 10));
            }

            let t0 = Instant::now();
            seq.start_at(t0);
            for tick in 1..=10 {
                seq.animate_at(t0 + ms(tick * 10));
            }
            seq.start_at(t0 + ms(200));
            assert_eq!(seq.next_index(), 1, "{count} steps");
        }
    }

    #[test]
    fn test_advances_to_second_step() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 10.0, 100))
            .with_step(step(10.0, 0.0, 300));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(100));
        assert!(seq.animator().is_finished());
        assert_eq!(value.get(), 10.0);
        assert_eq!(seq.next_index(), 1);

        seq.animate_at(t0 + ms(120));
        assert_eq!(seq.next_index(), 2);
        assert_eq!(seq.animator().params(), &seq.steps()[1]);
        assert!(seq.animator().is_running());
        assert_eq!(seq.state(), SequencerState::Playing { step: 1 });

        seq.animate_at(t0 + ms(270));
        assert!((value.get() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_single_step_finishes_without_advancing() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value).with_step(step(0.0, 1.0, 100));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(100));
        seq.animate_at(t0 + ms(150));
        seq.animate_at(t0 + ms(200));

        assert_eq!(seq.next_index(), 1);
        assert_eq!(seq.state(), SequencerState::Done);
        assert!(seq.is_finished());
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn test_every_step_is_played() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 100))
            .with_step(step(1.0, 2.0, 100))
            .with_step(step(2.0, 3.0, 100));
        let t0 = Instant::now();

        seq.start_at(t0);
        let mut played = Vec::new();
        for tick in 0..=40 {
            seq.animate_at(t0 + ms(tick * 10));
            if let Some(step) = seq.current_step() {
                if played.last() != Some(&step) {
                    played.push(step);
                }
            }
        }

        assert_eq!(played, vec![0, 1, 2]);
        assert_eq!(seq.next_index(), 3);
        assert!(seq.is_finished());
        assert_eq!(value.get(), 3.0);
    }

    #[test]
    fn test_empty_sequence_plays_live_configuration() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value);
        seq.set_start_value(2.0);
        seq.set_end_value(4.0);
        seq.set_duration_ms(200);
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(100));
        assert!((value.get() - 3.0).abs() < 1e-4);
        assert_eq!(seq.state(), SequencerState::Live);
        assert_eq!(seq.current_step(), None);

        for tick in 2..10 {
            seq.animate_at(t0 + ms(tick * 100));
            assert_eq!(seq.next_index(), 1);
        }
        assert_eq!(value.get(), 4.0);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_pass_through_does_not_touch_steps() {
        let mut seq = StepSequencer::<f32>::new().with_step(step(0.0, 1.0, 100));
        seq.set_start_value(5.0);
        seq.set_end_value(6.0);
        seq.set_duration(ms(900));
        seq.set_curve_type(EasingCurve::InCubic);

        assert_eq!(*seq.start_value(), 5.0);
        assert_eq!(*seq.end_value(), 6.0);
        assert_eq!(seq.duration(), ms(900));
        assert_eq!(seq.curve_type(), EasingCurve::InCubic);
        assert_eq!(seq.steps()[0], step(0.0, 1.0, 100));

        // Start overwrites the live configuration with step 0
        seq.start_at(Instant::now());
        assert_eq!(*seq.start_value(), 0.0);
        assert_eq!(*seq.end_value(), 1.0);
        assert_eq!(seq.curve_type(), EasingCurve::Linear);
    }

    #[test]
    fn test_duration_overloads_agree() {
        let mut a = StepSequencer::<f32>::new();
        let mut b = StepSequencer::<f32>::new();
        a.set_duration_ms(750);
        b.set_duration(Duration::from_millis(750));
        assert_eq!(a.duration(), b.duration());
    }

    #[test]
    fn test_add_step_during_playback() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value).with_step(step(0.0, 10.0, 100));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(50));
        seq.add_step(step(10.0, 20.0, 100));

        assert_eq!(seq.animator().params(), &seq.steps()[0]);
        assert_eq!(seq.state(), SequencerState::Playing { step: 0 });
        seq.animate_at(t0 + ms(60));
        assert!((value.get() - 6.0).abs() < 1e-4);

        seq.animate_at(t0 + ms(100));
        seq.animate_at(t0 + ms(150));
        assert_eq!(seq.state(), SequencerState::Playing { step: 1 });
        assert_eq!(value.get(), 10.0);

        seq.animate_at(t0 + ms(250));
        assert_eq!(value.get(), 20.0);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_restart_from_done() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 10))
            .with_step(step(1.0, 2.0, 10));
        let t0 = Instant::now();

        seq.start_at(t0);
        for tick in 1..=5 {
            seq.animate_at(t0 + ms(tick * 10));
        }
        assert!(seq.is_finished());
        assert_eq!(seq.next_index(), 2);

        seq.start_at(t0 + ms(100));
        assert_eq!(seq.state(), SequencerState::Playing { step: 0 });
        seq.animate_at(t0 + ms(100));
        assert_eq!(value.get(), 0.0);
    }

    #[test]
    fn test_accessors_installed_on_start() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = StepSequencer::<f32>::new().with_step(step(0.0, 8.0, 100));
        let read = Rc::clone(&value);
        let write = Rc::clone(&value);
        seq.set_getter(move || read.get());
        seq.set_setter(move |v| write.set(v));
        assert!(!seq.animator().binding().has_setter());

        let t0 = Instant::now();
        seq.start_at(t0);
        assert!(seq.animator().binding().has_getter());
        assert!(seq.animator().binding().has_setter());

        seq.animate_at(t0 + ms(50));
        assert!((value.get() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_duration_steps_chain_one_per_tick() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 0))
            .with_step(step(1.0, 2.0, 0));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0);
        assert_eq!(value.get(), 1.0);
        seq.animate_at(t0);
        assert_eq!(value.get(), 2.0);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_clear_steps_keeps_current_segment() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 10.0, 100))
            .with_step(step(10.0, 20.0, 100));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.clear_steps();
        seq.animate_at(t0 + ms(100));
        seq.animate_at(t0 + ms(200));

        assert_eq!(value.get(), 10.0);
        assert_eq!(seq.step_count(), 0);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_clear_then_add_step_plays_new_step() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 10))
            .with_step(step(1.0, 2.0, 10))
            .with_step(step(2.0, 3.0, 10));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(10));
        seq.animate_at(t0 + ms(12));
        assert_eq!(seq.state(), SequencerState::Playing { step: 1 });

        seq.clear_steps();
        seq.add_step(step(50.0, 60.0, 10));
        assert_eq!(seq.next_index(), 0);
        assert_eq!(seq.state(), SequencerState::Live);

        let mut now = t0 + ms(12);
        for _ in 0..18 {
            now += ms(2);
            seq.animate_at(now);
        }

        assert_eq!(value.get(), 60.0);
        assert_eq!(seq.next_index(), 1);
        assert!(seq.is_finished());
    }

    #[test]
    fn test_clear_when_idle_keeps_first_step_index() {
        let mut seq = StepSequencer::<f32>::new()
            .with_step(step(0.0, 1.0, 10))
            .with_step(step(1.0, 2.0, 10));

        seq.clear_steps();
        assert_eq!(seq.next_index(), 1);

        seq.add_step(step(5.0, 6.0, 10));
        seq.start_at(Instant::now());
        assert_eq!(seq.animator().params(), &seq.steps()[0]);
        assert_eq!(seq.state(), SequencerState::Playing { step: 0 });
    }

    #[test]
    fn test_state_never_names_a_missing_step() {
        let value = Rc::new(Cell::new(0.0_f32));
        let mut seq = sequencer(&value)
            .with_step(step(0.0, 1.0, 10))
            .with_step(step(1.0, 2.0, 10));
        let t0 = Instant::now();

        seq.start_at(t0);
        seq.animate_at(t0 + ms(10));
        seq.animate_at(t0 + ms(11));
        seq.clear_steps();

        for tick in 12..30 {
            if let Some(step) = seq.current_step() {
                assert!(step < seq.step_count());
            }
            seq.animate_at(t0 + ms(tick));
        }
        assert!(seq.is_finished());
    }
}
