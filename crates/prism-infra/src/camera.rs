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

//! A keyboard-and-mouse driven perspective camera.

use crate::input::{Keyboard, Mouse};
use glam::{Mat3, Mat4, Vec2, Vec3};
use prism_core::input::{KeyCode, MouseButton};
use prism_core::{
    Camera, ComponentState, GameComponent, GameContext, GameTime, Service, ServiceKind,
};
use std::f32::consts::FRAC_PI_4;

/// Default vertical field of view, in radians.
pub const DEFAULT_FIELD_OF_VIEW: f32 = FRAC_PI_4;
/// Default near clip distance.
pub const DEFAULT_NEAR_PLANE: f32 = 0.01;
/// Default far clip distance.
pub const DEFAULT_FAR_PLANE: f32 = 1000.0;
/// Default mouse sensitivity multiplier.
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 100.0;
/// Default rotation rate, in radians per second per unit of input.
pub const DEFAULT_ROTATION_RATE: f32 = 0.017_453_292; // one degree
/// Default movement rate, in units per second.
pub const DEFAULT_MOVEMENT_RATE: f32 = 10.0;

/// A right-handed perspective camera moved with WASD and turned by dragging
/// with the left mouse button.
///
/// Keyboard and mouse are looked up through the service container on every
/// update, so the camera keeps working if either is missing.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    state: ComponentState,
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    field_of_view: f32,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    mouse_sensitivity: f32,
    rotation_rate: f32,
    movement_rate: f32,
}

impl FirstPersonCamera {
    /// Creates a camera with the default projection for `aspect_ratio`.
    pub fn new(aspect_ratio: f32) -> Self {
        Self::with_projection(
            DEFAULT_FIELD_OF_VIEW,
            aspect_ratio,
            DEFAULT_NEAR_PLANE,
            DEFAULT_FAR_PLANE,
        )
    }

    /// Creates a camera with an explicit projection.
    pub fn with_projection(
        field_of_view: f32,
        aspect_ratio: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Self {
        let mut camera = Self {
            state: ComponentState::default(),
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            field_of_view,
            aspect_ratio,
            near_plane,
            far_plane,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            rotation_rate: DEFAULT_ROTATION_RATE,
            movement_rate: DEFAULT_MOVEMENT_RATE,
        };
        camera.update_projection_matrix();
        camera.update_view_matrix();
        camera
    }

    /// The up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// The right vector.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Vertical field of view, in radians.
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Near clip distance.
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    /// Far clip distance.
    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Moves the eye and refreshes the view matrix.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Returns to the origin looking down -Z.
    pub fn reset(&mut self) {
        self.position = Vec3::ZERO;
        self.direction = Vec3::NEG_Z;
        self.up = Vec3::Y;
        self.right = Vec3::X;
        self.update_view_matrix();
    }

    /// Rotates the orientation basis and re-orthogonalizes it.
    pub fn apply_rotation(&mut self, rotation: Mat3) {
        let direction = (rotation * self.direction).normalize();
        let up = (rotation * self.up).normalize();
        self.right = direction.cross(up).normalize();
        self.up = self.right.cross(direction);
        self.direction = direction;
    }

    /// Recomputes the view matrix from position and orientation.
    pub fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_to_rh(self.position, self.direction, self.up);
    }

    /// Recomputes the projection matrix.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(
            self.field_of_view,
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        );
    }

    /// Mouse sensitivity multiplier.
    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    /// Sets the mouse sensitivity multiplier.
    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity;
    }

    /// Rotation rate in radians per second.
    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Sets the rotation rate.
    pub fn set_rotation_rate(&mut self, rate: f32) {
        self.rotation_rate = rate;
    }

    /// Movement rate in units per second.
    pub fn movement_rate(&self) -> f32 {
        self.movement_rate
    }

    /// Sets the movement rate.
    pub fn set_movement_rate(&mut self, rate: f32) {
        self.movement_rate = rate;
    }
}

impl Camera for FirstPersonCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Vec3 {
        self.direction
    }

    fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }
}

impl Service for FirstPersonCamera {
    const KIND: ServiceKind = ServiceKind::Camera;
}

impl GameComponent for FirstPersonCamera {
    fn state(&self) -> &ComponentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        &mut self.state
    }

    fn name(&self) -> &'static str {
        "FirstPersonCamera"
    }

    fn initialize(&mut self, _ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        self.update_projection_matrix();
        self.update_view_matrix();
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        let mut movement = Vec2::ZERO;
        if let Some(keyboard) = ctx.services.get::<Keyboard>() {
            let keyboard = keyboard.borrow();
            if keyboard.is_key_down(KeyCode::W) {
                movement.y = 1.0;
            }
            if keyboard.is_key_down(KeyCode::S) {
                movement.y = -1.0;
            }
            if keyboard.is_key_down(KeyCode::A) {
                movement.x = -1.0;
            }
            if keyboard.is_key_down(KeyCode::D) {
                movement.x = 1.0;
            }
        }

        let mut rotation = Vec2::ZERO;
        if let Some(mouse) = ctx.services.get::<Mouse>() {
            let mouse = mouse.borrow();
            if mouse.is_button_down(MouseButton::Left) {
                rotation.x = -mouse.delta_x() * self.mouse_sensitivity;
                rotation.y = -mouse.delta_y() * self.mouse_sensitivity;
            }
        }

        let elapsed = game_time.elapsed_secs_f32();
        let rotation = rotation * self.rotation_rate * elapsed;
        let pitch = Mat3::from_axis_angle(self.right, rotation.y);
        let yaw = Mat3::from_rotation_y(rotation.x);
        self.apply_rotation(yaw * pitch);

        let movement = movement * self.movement_rate * elapsed;
        self.position += self.right * movement.x + self.direction * movement.y;

        self.update_view_matrix();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_look_down_negative_z() {
        let camera = FirstPersonCamera::new(4.0 / 3.0);
        assert_eq!(camera.direction(), Vec3::NEG_Z);
        assert_relative_eq!(camera.field_of_view(), FRAC_PI_4);
        assert_relative_eq!(camera.near_plane(), 0.01);
        assert_relative_eq!(camera.far_plane(), 1000.0);
    }

    #[test]
    fn test_view_matrix_moves_world_opposite_to_eye() {
        let mut camera = FirstPersonCamera::new(1.0);
        camera.set_position(Vec3::new(0.0, 0.0, 25.0));
        let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert_relative_eq!(origin_in_view.z, -25.0, epsilon = 1e-5);
    }

    #[test]
    fn test_yaw_keeps_basis_orthonormal() {
        let mut camera = FirstPersonCamera::new(1.0);
        camera.apply_rotation(Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert_relative_eq!(camera.direction().x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.direction().dot(camera.up()), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().length(), 1.0, epsilon = 1e-5);
    }
}
