// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step-sequenced value animation for widget properties.
//!
//! This crate animates a property owned by a widget (position, opacity,
//! color, ...) through a chain of segments:
//! - Easing curves shaping each segment
//! - Interpolation for scalar, array and egui value types
//! - Single-segment animator bound to a getter/setter pair
//! - Step sequencer chaining segments one after another
//! - RON step sequence definitions
//!
//! ## Usage
//!
//! The sequencer is ticked once per redraw from the UI thread:
//!
//! ```ignore
//! let opacity = Rc::new(Cell::new(0.0_f32));
//! let mut fade = StepSequencer::new()
//!     .with_binding(PropertyBinding::cell(&opacity))
//!     .with_step(EvaluatorParams::from_millis(0.0, 1.0, 250, EasingCurve::OutQuad))
//!     .with_step(EvaluatorParams::from_millis(1.0, 0.0, 400, EasingCurve::InOutSine));
//!
//! fade.start();
//! // every frame:
//! fade.animate();
//! ```

use std::time::Duration;

pub mod animator;
pub mod binding;
pub mod config;
pub mod easing;
pub mod error;
pub mod evaluator;
pub mod step;
pub mod value;

pub use animator::{Animate, Animator, AnimatorState};
pub use binding::{Getter, PropertyBinding, Setter};
pub use config::StepSequenceConfig;
pub use easing::EasingCurve;
pub use error::ConfigError;
pub use evaluator::{Evaluator, EvaluatorParams};
pub use step::{SequencerId, SequencerState, StepSequencer};
pub use value::Interpolate;

/// Segment length used until one is configured
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);
