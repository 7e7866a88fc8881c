// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable value types.
//!
//! Anything a widget exposes as an animated property implements
//! [`Interpolate`]: scalars, fixed-size float arrays, and the egui
//! geometry and color types.

use egui::{Color32, Pos2, Rgba, Vec2};

/// A value that can be blended between two endpoints
pub trait Interpolate: Clone {
    /// Blend from `self` towards `other` by factor `t`.
    ///
    /// `t` is normally in `0.0..=1.0` but overshooting curves may push it
    /// past either end.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check whether two values are equal within `epsilon`
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * f64::from(t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < f64::from(epsilon)
    }
}

impl<const N: usize> Interpolate for [f32; N] {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        std::array::from_fn(|i| self[i].lerp(&other[i], t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| a.approx_eq(b, epsilon))
    }
}

impl Interpolate for Pos2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        egui::pos2(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        egui::vec2(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Rgba {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Rgba::from_rgba_premultiplied(
            self.r().lerp(&other.r(), t),
            self.g().lerp(&other.g(), t),
            self.b().lerp(&other.b(), t),
            self.a().lerp(&other.a(), t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.r().approx_eq(&other.r(), epsilon)
            && self.g().approx_eq(&other.g(), epsilon)
            && self.b().approx_eq(&other.b(), epsilon)
            && self.a().approx_eq(&other.a(), epsilon)
    }
}

/// Channels are blended in premultiplied byte space and saturate at the
/// byte range when a curve overshoots.
impl Interpolate for Color32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| -> u8 {
            f32::from(a)
                .lerp(&f32::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color32::from_rgba_premultiplied(
            channel(self.r(), other.r()),
            channel(self.g(), other.g()),
            channel(self.b(), other.b()),
            channel(self.a(), other.a()),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let close = |a: u8, b: u8| (f32::from(a) - f32::from(b)).abs() / 255.0 < epsilon;
        close(self.r(), other.r())
            && close(self.g(), other.g())
            && close(self.b(), other.b())
            && close(self.a(), other.a())
    }
}
