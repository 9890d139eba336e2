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

//! The component scheduler.
//!
//! A [`Game`] owns every registered component, the [`ServiceContainer`], the
//! graphics collaborator, and the [`RenderStates`] presets. The frame driver
//! calls [`Game::update`] then [`Game::draw`] once per frame; both fan out to
//! components in registration order.

use crate::camera::CameraRef;
use crate::component::{ComponentHandle, GameComponent, Shared};
use crate::error::GameError;
use crate::graphics::{Graphics, GraphicsContext, GraphicsDevice, RenderStates};
use crate::service::{Service, ServiceContainer};
use crate::time::GameTime;
use std::cell::RefCell;
use std::rc::Rc;

/// Everything a component can reach from `initialize` and `update`.
pub struct GameContext<'a> {
    /// The game's service locator.
    pub services: &'a ServiceContainer,
    /// Resource creation.
    pub device: &'a mut dyn GraphicsDevice,
    /// Rasterizer and sampler presets.
    pub render_states: &'a RenderStates,
    /// The game's current camera, if one was set.
    pub camera: Option<&'a CameraRef>,
    exit_requested: &'a mut bool,
}

impl GameContext<'_> {
    /// Asks the frame driver to stop after the current frame.
    pub fn exit(&mut self) {
        *self.exit_requested = true;
    }

    /// Whether an exit has been requested.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        *self.exit_requested
    }
}

/// Everything a drawable can reach from `draw`.
///
/// `graphics` is in the game's default pipeline state when `draw` starts.
pub struct DrawContext<'a> {
    /// The game's service locator.
    pub services: &'a ServiceContainer,
    /// Draw submission against the shared pipeline state.
    pub graphics: &'a mut dyn GraphicsContext,
    /// Rasterizer and sampler presets.
    pub render_states: &'a RenderStates,
    /// The game's current camera, if one was set.
    pub camera: Option<&'a CameraRef>,
}

struct ComponentEntry {
    component: Rc<RefCell<dyn GameComponent>>,
    name: &'static str,
    initialized: bool,
}

/// Owns components and drives them through initialize, update and draw.
///
/// The component list is append-only. Insertion order is both update order
/// and draw order, so register components in dependency order.
pub struct Game {
    components: Vec<ComponentEntry>,
    services: ServiceContainer,
    graphics: Box<dyn Graphics>,
    render_states: RenderStates,
    camera: Option<CameraRef>,
    exit_requested: bool,
    init_failed: Option<&'static str>,
}

impl Game {
    /// Creates an empty game rendering through `graphics`.
    pub fn new(graphics: Box<dyn Graphics>) -> Self {
        Self::with_render_states(graphics, RenderStates::default())
    }

    /// Creates an empty game with explicit render-state presets.
    pub fn with_render_states(graphics: Box<dyn Graphics>, render_states: RenderStates) -> Self {
        Self {
            components: Vec::new(),
            services: ServiceContainer::new(),
            graphics,
            render_states,
            camera: None,
            exit_requested: false,
            init_failed: None,
        }
    }

    /// Takes ownership of `component` and appends it to the schedule.
    ///
    /// The returned handle is non-owning. A component added after
    /// [`initialize`](Self::initialize) is initialized right before its first update.
    pub fn add_component<T: GameComponent>(&mut self, component: T) -> ComponentHandle<T> {
        let name = component.name();
        let shared: Shared<T> = Rc::new(RefCell::new(component));
        let handle = ComponentHandle::new(Rc::downgrade(&shared));
        log::debug!("Registered component '{name}' at slot {}.", self.components.len());
        self.components.push(ComponentEntry {
            component: shared,
            name,
            initialized: false,
        });
        handle
    }

    /// Adds a component and registers it as a service under its [`Service::KIND`].
    pub fn add_service_component<T: GameComponent + Service>(
        &mut self,
        component: T,
    ) -> ComponentHandle<T> {
        let handle = self.add_component(component);
        self.services.add(&handle);
        handle
    }

    /// Initializes every registered component that has not been initialized yet.
    ///
    /// The first failure stops the pass; later components are left uninitialized.
    /// A failure is terminal: every later `initialize`, `update` or `draw`
    /// returns [`GameError::Halted`] without running any hook.
    pub fn initialize(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        log::info!("Initializing {} component(s)...", self.components.len());
        self.initialize_pending()?;
        log::info!("Game initialized.");
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.init_failed {
            Some(component) => Err(GameError::Halted { component }),
            None => Ok(()),
        }
    }

    fn initialize_pending(&mut self) -> Result<(), GameError> {
        let init_failed = &mut self.init_failed;
        let mut ctx = GameContext {
            services: &self.services,
            device: self.graphics.device(),
            render_states: &self.render_states,
            camera: self.camera.as_ref(),
            exit_requested: &mut self.exit_requested,
        };

        for entry in self.components.iter_mut().filter(|entry| !entry.initialized) {
            let mut component = entry
                .component
                .try_borrow_mut()
                .map_err(|_| GameError::ComponentBusy {
                    component: entry.name,
                })?;
            log::debug!("Initializing component '{}'.", entry.name);
            component.initialize(&mut ctx).map_err(|source| {
                *init_failed = Some(entry.name);
                GameError::Initialization {
                    component: entry.name,
                    source: source.into(),
                }
            })?;
            entry.initialized = true;
        }
        Ok(())
    }

    /// Runs `update` on every enabled component, in registration order.
    pub fn update(&mut self, game_time: &GameTime) -> Result<(), GameError> {
        self.ensure_running()?;
        self.initialize_pending()?;

        let mut ctx = GameContext {
            services: &self.services,
            device: self.graphics.device(),
            render_states: &self.render_states,
            camera: self.camera.as_ref(),
            exit_requested: &mut self.exit_requested,
        };

        for entry in &self.components {
            let mut component = entry
                .component
                .try_borrow_mut()
                .map_err(|_| GameError::ComponentBusy {
                    component: entry.name,
                })?;
            if !component.enabled() {
                continue;
            }
            component
                .update(&mut ctx, game_time)
                .map_err(|source| GameError::Update {
                    component: entry.name,
                    source: source.into(),
                })?;
        }
        Ok(())
    }

    /// Runs `draw` on every visible drawable component, in registration order.
    ///
    /// The pipeline state is reset to the default of [`RenderStates`] before
    /// each draw, so no component inherits state from the one before it.
    pub fn draw(&mut self, game_time: &GameTime) -> Result<(), GameError> {
        self.ensure_running()?;
        let defaults = self.render_states.default_pipeline();

        for entry in self.components.iter().filter(|entry| entry.initialized) {
            let mut component = entry
                .component
                .try_borrow_mut()
                .map_err(|_| GameError::ComponentBusy {
                    component: entry.name,
                })?;
            let Some(drawable) = component.as_drawable_mut() else {
                continue;
            };
            if !drawable.visible() {
                continue;
            }

            self.graphics.reset_state(defaults);
            let mut ctx = DrawContext {
                services: &self.services,
                graphics: self.graphics.context(),
                render_states: &self.render_states,
                camera: self.camera.as_ref(),
            };
            drawable
                .draw(&mut ctx, game_time)
                .map_err(|source| GameError::Draw {
                    component: entry.name,
                    source: source.into(),
                })?;
        }
        Ok(())
    }

    /// Drops every component and clears every service registration.
    ///
    /// Handles held elsewhere go dead. Calling this twice is a no-op.
    pub fn shutdown(&mut self) {
        if self.components.is_empty() && self.services.is_empty() {
            return;
        }
        log::info!("Shutting down {} component(s)...", self.components.len());
        self.services.clear();
        self.camera = None;
        self.components.clear();
    }

    /// The service locator.
    #[must_use]
    pub fn services(&self) -> &ServiceContainer {
        &self.services
    }

    /// Mutable access to the service locator.
    pub fn services_mut(&mut self) -> &mut ServiceContainer {
        &mut self.services
    }

    /// The graphics collaborator.
    #[must_use]
    pub fn graphics(&self) -> &dyn Graphics {
        self.graphics.as_ref()
    }

    /// Mutable access to the graphics collaborator.
    pub fn graphics_mut(&mut self) -> &mut dyn Graphics {
        self.graphics.as_mut()
    }

    /// The render-state presets.
    #[must_use]
    pub fn render_states(&self) -> &RenderStates {
        &self.render_states
    }

    /// Mutable access to the render-state presets, e.g. to redirect the
    /// default render target for post processing.
    pub fn render_states_mut(&mut self) -> &mut RenderStates {
        &mut self.render_states
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> Option<&CameraRef> {
        self.camera.as_ref()
    }

    /// Sets the current camera handed to every context.
    pub fn set_camera(&mut self, camera: Option<CameraRef>) {
        self.camera = camera;
    }

    /// Asks the frame driver to stop after the current frame.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    /// Whether an exit has been requested by the game or a component.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Number of registered components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentState, DrawableGameComponent, DrawableState};
    use crate::graphics::*;
    use glam::Vec2;
    use std::path::Path;

    #[derive(Default)]
    struct NullGraphics {
        state: PipelineState,
        resets: u32,
    }

    impl GraphicsDevice for NullGraphics {
        fn create_vertex_buffer(&mut self, _: &str, _: &[u8]) -> Result<BufferId, GraphicsError> {
            Ok(BufferId(1))
        }
        fn create_index_buffer(&mut self, _: &str, _: &[u32]) -> Result<BufferId, GraphicsError> {
            Ok(BufferId(2))
        }
        fn load_texture(&mut self, _: &Path) -> Result<TextureId, GraphicsError> {
            Ok(TextureId(1))
        }
        fn load_effect(&mut self, _: &Path) -> Result<EffectId, GraphicsError> {
            Ok(EffectId(1))
        }
        fn create_input_layout(
            &mut self,
            _: &EffectPass,
            _: &[VertexElement],
        ) -> Result<InputLayoutId, GraphicsError> {
            Ok(InputLayoutId(1))
        }
        fn create_render_target(
            &mut self,
            _: &str,
            _: u32,
            _: u32,
        ) -> Result<RenderTargetId, GraphicsError> {
            Ok(RenderTargetId(1))
        }
        fn render_target_texture(&self, _: RenderTargetId) -> Option<TextureId> {
            None
        }
        fn release(&mut self, _: ResourceId) {}
    }

    impl GraphicsContext for NullGraphics {
        fn state(&self) -> &PipelineState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut PipelineState {
            &mut self.state
        }
        fn reset_state(&mut self, defaults: &PipelineState) {
            self.resets += 1;
            self.state.clone_from(defaults);
        }
        fn apply_pass(&mut self, _: &EffectPass, _: &[ShaderConstant]) -> Result<(), GraphicsError> {
            Ok(())
        }
        fn draw_indexed(&mut self, _: u32, _: u32, _: i32) -> Result<(), GraphicsError> {
            Ok(())
        }
        fn draw(&mut self, _: u32, _: u32) -> Result<(), GraphicsError> {
            Ok(())
        }
        fn draw_text(&mut self, _: &str, _: Vec2, _: Color) -> Result<(), GraphicsError> {
            Ok(())
        }
        fn clear(&mut self, _: RenderTarget, _: Color) {}
        fn present(&mut self) -> Result<(), GraphicsError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Probe {
        state: DrawableState,
        inits: u32,
        updates: u32,
        draws: u32,
        saw_default_topology: bool,
    }

    impl GameComponent for Probe {
        fn state(&self) -> &ComponentState {
            self.state.component()
        }
        fn state_mut(&mut self) -> &mut ComponentState {
            self.state.component_mut()
        }
        fn initialize(&mut self, _: &mut GameContext<'_>) -> anyhow::Result<()> {
            self.inits += 1;
            Ok(())
        }
        fn update(&mut self, ctx: &mut GameContext<'_>, _: &GameTime) -> anyhow::Result<()> {
            self.updates += 1;
            if self.updates == 3 {
                ctx.exit();
            }
            Ok(())
        }
        fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
            Some(self)
        }
        fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
            Some(self)
        }
    }

    impl DrawableGameComponent for Probe {
        fn drawable_state(&self) -> &DrawableState {
            &self.state
        }
        fn drawable_state_mut(&mut self) -> &mut DrawableState {
            &mut self.state
        }
        fn draw(&mut self, ctx: &mut DrawContext<'_>, _: &GameTime) -> anyhow::Result<()> {
            self.draws += 1;
            self.saw_default_topology = ctx.graphics.state().topology == PrimitiveTopology::TriangleList;
            ctx.graphics.state_mut().topology = PrimitiveTopology::LineList;
            Ok(())
        }
    }

    fn game() -> Game {
        Game::new(Box::new(NullGraphics::default()))
    }

    #[test]
    fn test_initialize_runs_exactly_once() {
        let mut game = game();
        let probe = game.add_component(Probe::default());
        game.initialize().unwrap();
        game.initialize().unwrap();
        game.update(&GameTime::new()).unwrap();
        assert_eq!(probe.with(|p| p.inits), Some(1));
    }

    #[test]
    fn test_late_component_initialized_before_first_update() {
        let mut game = game();
        game.initialize().unwrap();
        let late = game.add_component(Probe::default());
        assert_eq!(late.with(|p| p.inits), Some(0));

        game.update(&GameTime::new()).unwrap();
        assert_eq!(late.with(|p| (p.inits, p.updates)), Some((1, 1)));
    }

    #[test]
    fn test_each_draw_starts_from_default_state() {
        let mut game = game();
        let first = game.add_component(Probe::default());
        let second = game.add_component(Probe::default());
        game.initialize().unwrap();
        game.update(&GameTime::new()).unwrap();
        game.draw(&GameTime::new()).unwrap();

        assert_eq!(first.with(|p| p.saw_default_topology), Some(true));
        assert_eq!(second.with(|p| p.saw_default_topology), Some(true));

        let graphics = game.graphics().as_any().downcast_ref::<NullGraphics>().unwrap();
        assert_eq!(graphics.resets, 2);
    }

    #[test]
    fn test_component_can_request_exit() {
        let mut game = game();
        game.add_component(Probe::default());
        for _ in 0..2 {
            game.update(&GameTime::new()).unwrap();
        }
        assert!(!game.exit_requested());
        game.update(&GameTime::new()).unwrap();
        assert!(game.exit_requested());
    }

    #[test]
    fn test_draw_skips_uninitialized_components() {
        let mut game = game();
        let probe = game.add_component(Probe::default());
        game.draw(&GameTime::new()).unwrap();
        assert_eq!(probe.with(|p| p.draws), Some(0));
    }

    #[test]
    fn test_shutdown_kills_handles_and_services() {
        struct Tagged(ComponentState);
        impl GameComponent for Tagged {
            fn state(&self) -> &ComponentState {
                &self.0
            }
            fn state_mut(&mut self) -> &mut ComponentState {
                &mut self.0
            }
        }
        impl Service for Tagged {
            const KIND: crate::ServiceKind = crate::ServiceKind::Custom(1001);
        }

        let mut game = game();
        let tagged = game.add_service_component(Tagged(ComponentState::default()));
        assert!(game.services().get::<Tagged>().is_some());

        game.shutdown();
        assert!(!tagged.is_alive());
        assert!(game.services().is_empty());
        assert_eq!(game.component_count(), 0);
    }
}
