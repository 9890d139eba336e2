// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Light sources for the lit demos.
//!
//! Intensities (light, ambient) use the 0 to 255 range of a byte colour
//! channel and reach the shaders as the alpha of a unit colour.

use glam::{Mat3, Vec3, Vec4};

/// Upper bound of every intensity.
pub const MAX_INTENSITY: f32 = 255.0;

/// Packs an RGB colour and a 0..=255 intensity into the `float4` the
/// shaders read.
pub fn color_with_intensity(color: Vec3, intensity: f32) -> Vec4 {
    color.extend(intensity.clamp(0.0, MAX_INTENSITY) / MAX_INTENSITY)
}

/// Moves `value` by `amount` toward the bound selected by `raise`/`lower`
/// and clamps it to `0..=max`. Opposing inputs cancel.
pub fn modulate(value: f32, amount: f32, raise: bool, lower: bool, max: f32) -> f32 {
    let mut value = value;
    if raise && value < max {
        value = (value + amount).min(max);
    }
    if lower && value > 0.0 {
        value = (value - amount).max(0.0);
    }
    value
}

/// A light radiating from a point up to a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub radius: f32,
}

impl PointLight {
    pub const DEFAULT_RADIUS: f32 = 10.0;

    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            color: Vec3::ONE,
            intensity: MAX_INTENSITY,
            position,
            radius,
        }
    }

    /// The `LightColor` shader variable.
    pub fn color_vector(&self) -> Vec4 {
        color_with_intensity(self.color, self.intensity)
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Self::DEFAULT_RADIUS)
    }
}

/// A point light restricted to a cone around its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub light: PointLight,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    /// Cosine of the half angle of full intensity.
    pub inner_angle: f32,
    /// Cosine of the half angle where the light fades out.
    pub outer_angle: f32,
}

impl SpotLight {
    pub const DEFAULT_INNER_ANGLE: f32 = 0.75;
    pub const DEFAULT_OUTER_ANGLE: f32 = 0.25;

    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            light: PointLight::new(position, radius),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            inner_angle: Self::DEFAULT_INNER_ANGLE,
            outer_angle: Self::DEFAULT_OUTER_ANGLE,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Rotates the light's frame.
    pub fn apply_rotation(&mut self, rotation: Mat3) {
        self.direction = (rotation * self.direction).normalize();
        self.up = (rotation * self.up).normalize();
        self.right = self.direction.cross(self.up).normalize();
        self.up = self.right.cross(self.direction).normalize();
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(Vec3::ZERO, PointLight::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_modulate_clamps_to_range() {
        assert_relative_eq!(modulate(250.0, 10.0, true, false, 255.0), 255.0);
        assert_relative_eq!(modulate(5.0, 10.0, false, true, 255.0), 0.0);
        assert_relative_eq!(modulate(0.0, 10.0, false, true, 255.0), 0.0);
        assert_relative_eq!(modulate(100.0, 10.0, true, true, 255.0), 100.0);
        assert_relative_eq!(modulate(100.0, 10.0, false, false, 255.0), 100.0);
    }

    #[test]
    fn test_intensity_becomes_alpha() {
        let light = PointLight {
            intensity: 51.0,
            ..PointLight::default()
        };
        assert_relative_eq!(light.color_vector().w, 0.2);
        assert_relative_eq!(color_with_intensity(Vec3::ONE, 300.0).w, 1.0);
    }

    #[test]
    fn test_spot_rotation_keeps_an_orthonormal_frame() {
        let mut spot = SpotLight::default();
        spot.apply_rotation(Mat3::from_axis_angle(Vec3::Y, FRAC_PI_2));

        assert_relative_eq!(spot.direction().x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(spot.direction().dot(spot.up()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(spot.direction().dot(spot.right()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(spot.right().length(), 1.0, epsilon = 1e-5);
    }
}
