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

//! A service locator for cross-component lookups.
//!
//! The [`ServiceContainer`] maps a [`ServiceKind`] to a service so that a
//! component can reach, say, the keyboard without being statically coupled to
//! whoever created it. Registrations are keyed by [`ServiceKind::id`], so two
//! kinds sharing an id share one slot.
//!
//! # Ownership
//!
//! The container never owns what it holds. Services are stored as weak
//! references; the [`Game`](crate::Game) (for component services) or the
//! caller (for anything else) keeps the strong reference. A lookup whose
//! service has since been dropped behaves exactly like a lookup for an
//! unregistered kind.

use crate::component::{ComponentHandle, Shared};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// The closed set of service abstractions the engine knows about.
///
/// `Custom` leaves room for application-defined services without falling
/// back to reflection-based keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    /// Keyboard input device.
    Keyboard,
    /// Mouse input device.
    Mouse,
    /// The active camera.
    Camera,
    /// Shared rasterizer/sampler presets.
    RenderStates,
    /// An application-defined service, keyed by a caller-chosen number.
    ///
    /// Numbers below [`ServiceKind::FIRST_CUSTOM_ID`] alias the built-in kinds.
    Custom(u32),
}

impl ServiceKind {
    /// First identifier available to [`ServiceKind::Custom`] without
    /// colliding with the built-in kinds.
    pub const FIRST_CUSTOM_ID: u32 = 1000;

    /// The stable numeric identifier of this kind.
    pub fn id(self) -> u32 {
        match self {
            ServiceKind::Keyboard => 1,
            ServiceKind::Mouse => 2,
            ServiceKind::Camera => 3,
            ServiceKind::RenderStates => 4,
            ServiceKind::Custom(id) => id,
        }
    }
}

/// Binds a concrete type to the [`ServiceKind`] it is registered under.
pub trait Service: 'static {
    /// The kind this type is registered and looked up under.
    const KIND: ServiceKind;
}

/// A registry mapping a service id to a non-owning service reference.
///
/// At most one service is registered per [`ServiceKind::id`]; the last
/// registration wins.
///
/// # Example
///
/// ```rust
/// use prism_core::service::{ServiceContainer, ServiceKind};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// struct Clock { ticks: u32 }
///
/// let clock = Rc::new(RefCell::new(Clock { ticks: 3 }));
/// let mut services = ServiceContainer::new();
/// services.add_service(ServiceKind::Custom(1001), Rc::downgrade(&clock));
///
/// let found = services.get_service::<Clock>(ServiceKind::Custom(1001)).unwrap();
/// assert_eq!(found.borrow().ticks, 3);
/// ```
#[derive(Default)]
pub struct ServiceContainer {
    services: HashMap<u32, Weak<dyn Any>>,
}

impl ServiceContainer {
    /// Creates an empty service container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Registers `service` under `kind`, replacing any prior registration.
    pub fn add_service<T: 'static>(&mut self, kind: ServiceKind, service: Weak<RefCell<T>>) {
        let service: Weak<dyn Any> = service;
        if self.services.insert(kind.id(), service).is_some() {
            log::debug!(
                "Service id {} re-registered as {kind:?}; previous registration replaced.",
                kind.id()
            );
        } else {
            log::debug!("Service {kind:?} registered.");
        }
    }

    /// Registers a component under its own [`Service::KIND`].
    pub fn add<T: Service>(&mut self, service: &ComponentHandle<T>) {
        self.add_service(T::KIND, service.downgrade());
    }

    /// Removes the registration for `kind`. Removing an absent kind is a no-op.
    pub fn remove_service(&mut self, kind: ServiceKind) {
        self.services.remove(&kind.id());
    }

    /// Looks up the service registered under `kind` as a `T`.
    ///
    /// Returns `None` if nothing is registered, if the service has been
    /// dropped, or if it is not a `T`.
    #[must_use]
    pub fn get_service<T: 'static>(&self, kind: ServiceKind) -> Option<Shared<T>> {
        self.get_service_any(kind)?.downcast::<RefCell<T>>().ok()
    }

    /// Looks up the service registered under `kind` without naming its type.
    #[must_use]
    pub fn get_service_any(&self, kind: ServiceKind) -> Option<Rc<dyn Any>> {
        self.services.get(&kind.id()).and_then(Weak::upgrade)
    }

    /// Looks up a service by its [`Service::KIND`].
    #[must_use]
    pub fn get<T: Service>(&self) -> Option<Shared<T>> {
        self.get_service::<T>(T::KIND)
    }

    /// Returns `true` if a live service is registered under `kind`.
    #[must_use]
    pub fn contains(&self, kind: ServiceKind) -> bool {
        self.get_service_any(kind).is_some()
    }

    /// Returns the number of registrations, live or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Drops every registration. Used by game teardown.
    pub(crate) fn clear(&mut self) {
        self.services.clear();
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.services.keys().collect();
        ids.sort();
        f.debug_struct("ServiceContainer")
            .field("ids", &ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeKeyboard {
        name: String,
    }

    impl Service for FakeKeyboard {
        const KIND: ServiceKind = ServiceKind::Keyboard;
    }

    struct FakeMouse {}

    fn shared<T>(value: T) -> Shared<T> {
        Rc::new(RefCell::new(value))
    }

    #[test]
    fn test_add_and_get() {
        let keyboard = shared(FakeKeyboard {
            name: "kbd-0".to_string(),
        });
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Keyboard, Rc::downgrade(&keyboard));

        let retrieved = services.get::<FakeKeyboard>().unwrap();
        assert_eq!(retrieved.borrow().name, "kbd-0");
        assert!(Rc::ptr_eq(&retrieved, &keyboard));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let services = ServiceContainer::new();
        assert!(services.get::<FakeKeyboard>().is_none());
        assert!(services.get_service_any(ServiceKind::Mouse).is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let old = shared(FakeKeyboard {
            name: "old".to_string(),
        });
        let new = shared(FakeKeyboard {
            name: "new".to_string(),
        });
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Keyboard, Rc::downgrade(&old));
        services.add_service(ServiceKind::Keyboard, Rc::downgrade(&new));

        assert_eq!(services.len(), 1);
        assert_eq!(services.get::<FakeKeyboard>().unwrap().borrow().name, "new");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut services = ServiceContainer::new();
        services.remove_service(ServiceKind::Camera);
        services.remove_service(ServiceKind::Camera);
        assert!(services.is_empty());
    }

    #[test]
    fn test_remove_then_get_returns_none() {
        let mouse = shared(FakeMouse {});
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Mouse, Rc::downgrade(&mouse));
        assert!(services.contains(ServiceKind::Mouse));

        services.remove_service(ServiceKind::Mouse);
        assert!(!services.contains(ServiceKind::Mouse));
        assert!(services.get_service::<FakeMouse>(ServiceKind::Mouse).is_none());
    }

    #[test]
    fn test_container_does_not_own_services() {
        let mouse = shared(FakeMouse {});
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Mouse, Rc::downgrade(&mouse));
        assert_eq!(Rc::strong_count(&mouse), 1);

        drop(mouse);
        assert!(services.get_service::<FakeMouse>(ServiceKind::Mouse).is_none());
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn test_type_mismatch_returns_none() {
        let mouse = shared(FakeMouse {});
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Keyboard, Rc::downgrade(&mouse));
        assert!(services.get::<FakeKeyboard>().is_none());
        assert!(services.get_service_any(ServiceKind::Keyboard).is_some());
    }

    #[test]
    fn test_add_remove_sequence_tracks_latest() {
        let a = shared(FakeMouse {});
        let b = shared(FakeMouse {});
        let kind = ServiceKind::Custom(ServiceKind::FIRST_CUSTOM_ID);
        let mut services = ServiceContainer::new();

        services.add_service(kind, Rc::downgrade(&a));
        services.add_service(kind, Rc::downgrade(&b));
        let found = services.get_service::<FakeMouse>(kind).unwrap();
        assert!(Rc::ptr_eq(&found, &b));

        services.remove_service(kind);
        assert!(services.get_service::<FakeMouse>(kind).is_none());

        services.add_service(kind, Rc::downgrade(&a));
        let found = services.get_service::<FakeMouse>(kind).unwrap();
        assert!(Rc::ptr_eq(&found, &a));
    }

    #[test]
    fn test_kind_ids_are_stable() {
        assert_eq!(ServiceKind::Keyboard.id(), 1);
        assert_eq!(ServiceKind::Mouse.id(), 2);
        assert_eq!(ServiceKind::Camera.id(), 3);
        assert_eq!(ServiceKind::RenderStates.id(), 4);
        assert_eq!(ServiceKind::Custom(1042).id(), 1042);
    }

    #[test]
    fn test_custom_kind_aliasing_a_builtin_id_replaces_it() {
        let keyboard = shared(FakeKeyboard {
            name: "keys".to_string(),
        });
        let other = shared(FakeMouse {});
        let mut services = ServiceContainer::new();
        services.add_service(ServiceKind::Keyboard, Rc::downgrade(&keyboard));
        services.add_service(ServiceKind::Custom(1), Rc::downgrade(&other));

        assert_eq!(services.len(), 1);
        assert!(services.get::<FakeKeyboard>().is_none());
        let found = services.get_service::<FakeMouse>(ServiceKind::Keyboard).unwrap();
        assert!(Rc::ptr_eq(&found, &other));

        services.remove_service(ServiceKind::Keyboard);
        assert!(!services.contains(ServiceKind::Custom(1)));
        assert!(services.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        let services = ServiceContainer::default();
        assert!(services.is_empty());
    }
}
