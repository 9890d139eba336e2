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

//! The camera contract drawable components render through.

use crate::component::ComponentHandle;
use glam::{Mat4, Vec3};
use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

/// Read-only view and projection data for rendering.
///
/// The core never looks inside a camera; drawables call these accessors
/// during `update` and `draw`.
pub trait Camera: 'static {
    /// World-space position of the eye.
    fn position(&self) -> Vec3;

    /// Normalized forward direction.
    fn direction(&self) -> Vec3;

    /// World to view transform.
    fn view_matrix(&self) -> Mat4;

    /// View to clip transform.
    fn projection_matrix(&self) -> Mat4;

    /// Combined world to clip transform (`projection * view`).
    fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// A non-owning, shareable reference to a camera.
///
/// Many drawables may hold the same `CameraRef`. Every accessor returns
/// `None` once the camera has been dropped or while it is mutably borrowed.
#[derive(Clone)]
pub struct CameraRef {
    inner: Weak<RefCell<dyn Camera>>,
}

impl CameraRef {
    /// Wraps a weak camera reference.
    pub fn new(inner: Weak<RefCell<dyn Camera>>) -> Self {
        Self { inner }
    }

    /// Runs `f` against a shared borrow of the camera.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Camera) -> R) -> Option<R> {
        let strong = self.inner.upgrade()?;
        let camera = strong.try_borrow().ok()?;
        Some(f(&*camera))
    }

    /// The camera position.
    pub fn position(&self) -> Option<Vec3> {
        self.with(|camera| camera.position())
    }

    /// The camera view matrix.
    pub fn view_matrix(&self) -> Option<Mat4> {
        self.with(|camera| camera.view_matrix())
    }

    /// The camera projection matrix.
    pub fn projection_matrix(&self) -> Option<Mat4> {
        self.with(|camera| camera.projection_matrix())
    }

    /// The combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Option<Mat4> {
        self.with(|camera| camera.view_projection_matrix())
    }

    /// Returns `true` while the camera is still alive.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<T: Camera> From<&ComponentHandle<T>> for CameraRef {
    fn from(handle: &ComponentHandle<T>) -> Self {
        let inner: Weak<RefCell<dyn Camera>> = handle.downgrade();
        Self { inner }
    }
}

impl fmt::Debug for CameraRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
