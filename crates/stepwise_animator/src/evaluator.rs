// SPDX-License-Identifier: MIT OR Apache-2.0
//! Segment parameters and their evaluation over elapsed time.

use crate::easing::EasingCurve;
use crate::value::Interpolate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parameters of one interpolation segment.
///
/// Serialized with the duration in milliseconds (`duration_ms`): an integer
/// for whole milliseconds, a fractional number when the duration carries
/// sub-millisecond precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorParams<T> {
    /// Value at the start of the segment
    pub start_value: T,
    /// Value at the end of the segment
    pub end_value: T,
    /// Length of the segment
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    /// Shaping applied to progress
    #[serde(default)]
    pub curve: EasingCurve,
}

impl<T> EvaluatorParams<T> {
    /// Create segment parameters
    pub fn new(start_value: T, end_value: T, duration: Duration, curve: EasingCurve) -> Self {
        Self {
            start_value,
            end_value,
            duration,
            curve,
        }
    }

    /// Create a linear segment
    pub fn linear(start_value: T, end_value: T, duration: Duration) -> Self {
        Self::new(start_value, end_value, duration, EasingCurve::Linear)
    }

    /// Create a segment with a duration in milliseconds
    pub fn from_millis(start_value: T, end_value: T, millis: u32, curve: EasingCurve) -> Self {
        Self::new(
            start_value,
            end_value,
            Duration::from_millis(u64::from(millis)),
            curve,
        )
    }

    /// Set the easing curve
    pub fn with_curve(mut self, curve: EasingCurve) -> Self {
        self.curve = curve;
        self
    }
}

impl<T: Default> Default for EvaluatorParams<T> {
    fn default() -> Self {
        Self::new(
            T::default(),
            T::default(),
            crate::DEFAULT_DURATION,
            EasingCurve::Linear,
        )
    }
}

/// Computes segment values from elapsed time
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator<T> {
    params: EvaluatorParams<T>,
}

impl<T: Interpolate> Evaluator<T> {
    /// Create an evaluator for a segment
    pub fn new(params: EvaluatorParams<T>) -> Self {
        Self { params }
    }

    /// Segment parameters
    pub fn params(&self) -> &EvaluatorParams<T> {
        &self.params
    }

    /// Mutable segment parameters
    pub fn params_mut(&mut self) -> &mut EvaluatorParams<T> {
        &mut self.params
    }

    /// Replace the segment parameters
    pub fn set_params(&mut self, params: EvaluatorParams<T>) {
        self.params = params;
    }

    /// Normalized progress (0.0 to 1.0) after `elapsed`.
    ///
    /// A zero-length segment is complete immediately.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.params.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.params.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Value at a normalized progress
    pub fn value_at(&self, progress: f32) -> T {
        if progress >= 1.0 {
            return self.params.end_value.clone();
        }
        if progress <= 0.0 {
            return self.params.start_value.clone();
        }

        let eased = self.params.curve.apply(progress);
        self.params.start_value.lerp(&self.params.end_value, eased)
    }

    /// Value after `elapsed`, and whether the segment is complete
    pub fn evaluate(&self, elapsed: Duration) -> (T, bool) {
        let progress = self.progress(elapsed);
        (self.value_at(progress), progress >= 1.0)
    }
}

mod duration_ms {
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::time::Duration;

    const NANOS_PER_MILLI: f64 = 1_000_000.0;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if duration.subsec_nanos() % 1_000_000 == 0 {
            let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
            serializer.serialize_u64(millis)
        } else {
            serializer.serialize_f64(duration.as_nanos() as f64 / NANOS_PER_MILLI)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        deserializer.deserialize_any(MillisVisitor)
    }

    struct MillisVisitor;

    impl Visitor<'_> for MillisVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative number of milliseconds")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Duration, E> {
            Ok(Duration::from_millis(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Duration, E> {
            u64::try_from(value)
                .map(Duration::from_millis)
                .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Duration, E> {
            let nanos = (value * NANOS_PER_MILLI).round();
            if !nanos.is_finite() || nanos < 0.0 || nanos > u64::MAX as f64 {
                return Err(E::invalid_value(Unexpected::Float(value), &self));
            }
            Ok(Duration::from_nanos(nanos as u64))
        }
    }
}
