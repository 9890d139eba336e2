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

//! Traits for the units the frame loop drives.
//!
//! A [`GameComponent`] is initialized once and then updated every frame while
//! it is enabled. A [`DrawableGameComponent`] additionally draws every frame
//! while it is visible, after all updates for that frame have run.
//!
//! To make a component:
//! ```rust
//! use prism_core::{ComponentState, GameComponent, GameContext, GameTime};
//!
//! #[derive(Default)]
//! struct Spinner {
//!     state: ComponentState,
//!     angle: f32,
//! }
//!
//! impl GameComponent for Spinner {
//!     fn state(&self) -> &ComponentState {
//!         &self.state
//!     }
//!
//!     fn state_mut(&mut self) -> &mut ComponentState {
//!         &mut self.state
//!     }
//!
//!     fn update(&mut self, _ctx: &mut GameContext<'_>, time: &GameTime) -> anyhow::Result<()> {
//!         self.angle += time.elapsed_secs_f32();
//!         Ok(())
//!     }
//! }
//! ```

use crate::camera::CameraRef;
use crate::game::{DrawContext, GameContext};
use crate::time::GameTime;
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// A single-threaded shared cell, the storage every registered component lives in.
pub type Shared<T> = Rc<RefCell<T>>;

/// Scheduling flags common to every component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentState {
    enabled: bool,
}

impl ComponentState {
    /// Creates a state with the given enabled flag.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether the component takes part in the update phase.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enabled flag. Takes effect on the next update.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for ComponentState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Scheduling flags and camera reference for drawable components.
#[derive(Debug, Clone)]
pub struct DrawableState {
    component: ComponentState,
    visible: bool,
    camera: Option<CameraRef>,
}

impl DrawableState {
    /// Creates an enabled, visible state that renders through `camera`.
    pub fn new(camera: Option<CameraRef>) -> Self {
        Self {
            component: ComponentState::default(),
            visible: true,
            camera,
        }
    }

    /// The embedded enabled flag.
    pub fn component(&self) -> &ComponentState {
        &self.component
    }

    /// Mutable access to the embedded enabled flag.
    pub fn component_mut(&mut self) -> &mut ComponentState {
        &mut self.component
    }

    /// Whether the component takes part in the draw phase.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Sets the visible flag. Takes effect on the next draw.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The camera used for view/projection, if any.
    pub fn camera(&self) -> Option<&CameraRef> {
        self.camera.as_ref()
    }

    /// Points the component at a different camera.
    pub fn set_camera(&mut self, camera: Option<CameraRef>) {
        self.camera = camera;
    }
}

impl Default for DrawableState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A unit with lifecycle hooks, driven by the [`Game`](crate::Game).
///
/// `initialize` runs exactly once, after registration and before the first
/// `update`. `update` runs once per frame while [`enabled`](Self::enabled)
/// is `true`, in registration order. Hooks must not block, and any error
/// they return is fatal to the frame loop.
#[allow(unused_variables)]
pub trait GameComponent: Any {
    /// The component's scheduling flags.
    fn state(&self) -> &ComponentState;

    /// Mutable access to the component's scheduling flags.
    fn state_mut(&mut self) -> &mut ComponentState;

    /// A human readable name, used in logs and error reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the component takes part in the update phase.
    fn enabled(&self) -> bool {
        self.state().enabled()
    }

    /// Enables or disables the component.
    fn set_enabled(&mut self, enabled: bool) {
        self.state_mut().set_enabled(enabled);
    }

    /// One-time setup. May acquire graphics resources and look up services.
    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Per-frame update. Only mutates the component's own state.
    fn update(&mut self, ctx: &mut GameContext<'_>, game_time: &GameTime) -> anyhow::Result<()> {
        Ok(())
    }

    /// Returns the drawable view of this component, if it has one.
    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        None
    }

    /// Returns the mutable drawable view of this component, if it has one.
    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        None
    }
}

/// A [`GameComponent`] that also participates in the draw phase.
///
/// Implementors must also override [`GameComponent::as_drawable`] and
/// [`GameComponent::as_drawable_mut`] to return `Some(self)`, otherwise the
/// game never sees them as drawable.
pub trait DrawableGameComponent: GameComponent {
    /// The component's drawable flags.
    fn drawable_state(&self) -> &DrawableState;

    /// Mutable access to the component's drawable flags.
    fn drawable_state_mut(&mut self) -> &mut DrawableState;

    /// Whether the component takes part in the draw phase.
    fn visible(&self) -> bool {
        self.drawable_state().visible()
    }

    /// Shows or hides the component.
    fn set_visible(&mut self, visible: bool) {
        self.drawable_state_mut().set_visible(visible);
    }

    /// The camera the component renders through.
    fn camera(&self) -> Option<&CameraRef> {
        self.drawable_state().camera()
    }

    /// Issues rendering work. The pipeline state in `ctx.graphics` is in the
    /// game's default configuration when this is called.
    fn draw(&mut self, ctx: &mut DrawContext<'_>, game_time: &GameTime) -> anyhow::Result<()>;
}

/// A non-owning reference to a component registered with a [`Game`](crate::Game).
///
/// The game holds the only strong reference. Once the game tears down, every
/// handle goes dead and its accessors return `None`.
pub struct ComponentHandle<T: ?Sized> {
    inner: Weak<RefCell<T>>,
}

impl<T: ?Sized> ComponentHandle<T> {
    pub(crate) fn new(inner: Weak<RefCell<T>>) -> Self {
        Self { inner }
    }

    /// Upgrades to a temporary strong reference.
    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.inner.upgrade()
    }

    /// Returns `true` while the owning game still holds the component.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Returns a clone of the underlying weak reference.
    pub fn downgrade(&self) -> Weak<RefCell<T>> {
        self.inner.clone()
    }

    /// Runs `f` against a shared borrow of the component.
    ///
    /// Returns `None` if the component is gone or currently mutably borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let strong = self.inner.upgrade()?;
        let borrowed: Ref<'_, T> = strong.try_borrow().ok()?;
        Some(f(&borrowed))
    }

    /// Runs `f` against a mutable borrow of the component.
    ///
    /// Returns `None` if the component is gone or currently borrowed.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let strong = self.inner.upgrade()?;
        let mut borrowed: RefMut<'_, T> = strong.try_borrow_mut().ok()?;
        Some(f(&mut borrowed))
    }
}

impl<T: ?Sized> Clone for ComponentHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ComponentHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        state: ComponentState,
        ticks: u32,
    }

    impl GameComponent for Counter {
        fn state(&self) -> &ComponentState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ComponentState {
            &mut self.state
        }
    }

    #[test]
    fn test_component_state_defaults_to_enabled() {
        let counter = Counter::default();
        assert!(counter.enabled());
        assert!(counter.as_drawable().is_none());
    }

    #[test]
    fn test_set_enabled_round_trip() {
        let mut counter = Counter::default();
        counter.set_enabled(false);
        assert!(!counter.enabled());
        assert!(!counter.state().enabled());
    }

    #[test]
    fn test_drawable_state_defaults() {
        let state = DrawableState::default();
        assert!(state.visible());
        assert!(state.component().enabled());
        assert!(state.camera().is_none());
    }

    #[test]
    fn test_name_is_type_name() {
        let counter = Counter::default();
        assert!(counter.name().ends_with("Counter"));
    }

    #[test]
    fn test_handle_goes_dead_with_owner() {
        let owner = Rc::new(RefCell::new(Counter::default()));
        let handle = ComponentHandle::new(Rc::downgrade(&owner));
        assert!(handle.is_alive());
        assert_eq!(handle.with_mut(|c| {
            c.ticks += 1;
            c.ticks
        }), Some(1));

        drop(owner);
        assert!(!handle.is_alive());
        assert!(handle.with(|c| c.ticks).is_none());
    }

    #[test]
    fn test_handle_with_fails_while_mutably_borrowed() {
        let owner = Rc::new(RefCell::new(Counter::default()));
        let handle = ComponentHandle::new(Rc::downgrade(&owner));
        let _guard = owner.borrow_mut();
        assert!(handle.with(|c| c.ticks).is_none());
    }
}
