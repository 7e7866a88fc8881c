// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to normalized segment progress.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Shaping function selected for a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum EasingCurve {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic ease-in
    InQuad,
    /// Quadratic ease-out
    OutQuad,
    /// Quadratic ease-in-out
    InOutQuad,
    /// Cubic ease-in
    InCubic,
    /// Cubic ease-out
    OutCubic,
    /// Cubic ease-in-out
    InOutCubic,
    /// Quartic ease-in
    InQuart,
    /// Quartic ease-out
    OutQuart,
    /// Quartic ease-in-out
    InOutQuart,
    /// Quintic ease-in
    InQuint,
    /// Quintic ease-out
    OutQuint,
    /// Quintic ease-in-out
    InOutQuint,
    /// Sine ease-in
    InSine,
    /// Sine ease-out
    OutSine,
    /// Sine ease-in-out
    InOutSine,
    /// Exponential ease-in
    InExpo,
    /// Exponential ease-out
    OutExpo,
    /// Exponential ease-in-out
    InOutExpo,
    /// Circular ease-in
    InCirc,
    /// Circular ease-out
    OutCirc,
    /// Circular ease-in-out
    InOutCirc,
    /// Pulls back before moving forward
    InBack,
    /// Overshoots the end and settles
    OutBack,
    /// Pulls back, then overshoots
    InOutBack,
    /// Bounce ease-in
    InBounce,
    /// Bounce ease-out
    OutBounce,
    /// Bounce ease-in-out
    InOutBounce,
    /// Elastic ease-in
    InElastic,
    /// Elastic ease-out
    OutElastic,
}

const BACK_C1: f32 = 1.701_58;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;

impl EasingCurve {
    /// Every curve, in declaration order
    pub const ALL: [EasingCurve; 30] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
        Self::InElastic,
        Self::OutElastic,
    ];

    /// Apply the curve to normalized progress.
    ///
    /// `t` is clamped to `0.0..=1.0`. Every curve maps 0 to 0 and 1 to 1;
    /// the back and elastic families leave that range in between.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => in_out(t, |t| 2.0 * t * t, 2),
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, |t| 4.0 * t.powi(3), 3),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out(t, |t| 8.0 * t.powi(4), 4),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out(t, |t| 16.0 * t.powi(5), 5),
            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::InBack => BACK_C3 * t.powi(3) - BACK_C1 * t * t,
            Self::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
            Self::InOutBack => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((BACK_C2 + 1.0) * 2.0 * t - BACK_C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((BACK_C2 + 1.0) * (t * 2.0 - 2.0) + BACK_C2) + 2.0)
                        / 2.0
                }
            }
            Self::InBounce => 1.0 - out_bounce(1.0 - t),
            Self::OutBounce => out_bounce(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
            Self::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::InQuad => "In Quad",
            Self::OutQuad => "Out Quad",
            Self::InOutQuad => "In-Out Quad",
            Self::InCubic => "In Cubic",
            Self::OutCubic => "Out Cubic",
            Self::InOutCubic => "In-Out Cubic",
            Self::InQuart => "In Quart",
            Self::OutQuart => "Out Quart",
            Self::InOutQuart => "In-Out Quart",
            Self::InQuint => "In Quint",
            Self::OutQuint => "Out Quint",
            Self::InOutQuint => "In-Out Quint",
            Self::InSine => "In Sine",
            Self::OutSine => "Out Sine",
            Self::InOutSine => "In-Out Sine",
            Self::InExpo => "In Expo",
            Self::OutExpo => "Out Expo",
            Self::InOutExpo => "In-Out Expo",
            Self::InCirc => "In Circ",
            Self::OutCirc => "Out Circ",
            Self::InOutCirc => "In-Out Circ",
            Self::InBack => "In Back",
            Self::OutBack => "Out Back",
            Self::InOutBack => "In-Out Back",
            Self::InBounce => "In Bounce",
            Self::OutBounce => "Out Bounce",
            Self::InOutBounce => "In-Out Bounce",
            Self::InElastic => "In Elastic",
            Self::OutElastic => "Out Elastic",
        }
    }
}

/// Symmetric in-out built from the ease-in half; the second half mirrors
/// the power curve of the given degree.
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32, degree: i32) -> f32 {
    if t < 0.5 {
        ease_in(t)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(degree) / 2.0
    }
}

fn out_bounce(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984_375
    }
}
