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

//! A graphics backend with no GPU behind it.
//!
//! [`HeadlessGraphics`] keeps the resource tables and pipeline-state rules a
//! real device would enforce, and records every frame so tests and headless
//! runs can inspect what was drawn.

use super::record::{DrawCall, DrawKind, FrameRecord, TextDraw};
use glam::Vec2;
use prism_core::graphics::{
    BufferId, Color, EffectId, EffectPass, GraphicsContext, GraphicsDevice, GraphicsError,
    InputLayoutId, PipelineState, RenderTarget, RenderTargetId, ResourceId, ShaderConstant,
    ShaderValue, TextureId, VertexElement,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct BufferEntry {
    label: String,
    byte_len: usize,
}

#[derive(Debug)]
struct LayoutEntry {
    pass: EffectPass,
    stride: u32,
}

#[derive(Debug)]
struct RenderTargetEntry {
    label: String,
    width: u32,
    height: u32,
    texture: TextureId,
}

/// A recording, validating, GPU-less [`GraphicsDevice`] and [`GraphicsContext`].
#[derive(Debug)]
pub struct HeadlessGraphics {
    width: u32,
    height: u32,
    asset_root: Option<PathBuf>,
    next_id: u32,
    buffers: HashMap<BufferId, BufferEntry>,
    textures: HashMap<TextureId, PathBuf>,
    effects: HashMap<EffectId, PathBuf>,
    input_layouts: HashMap<InputLayoutId, LayoutEntry>,
    render_targets: HashMap<RenderTargetId, RenderTargetEntry>,
    state: PipelineState,
    bound_pass: Option<(EffectPass, Vec<ShaderConstant>)>,
    current: FrameRecord,
    last: FrameRecord,
    frame_count: u64,
}

impl HeadlessGraphics {
    /// Creates a backend with a back buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        log::info!("Headless graphics created ({width}x{height}).");
        Self {
            width,
            height,
            asset_root: None,
            next_id: 1,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            effects: HashMap::new(),
            input_layouts: HashMap::new(),
            render_targets: HashMap::new(),
            state: PipelineState::default(),
            bound_pass: None,
            current: FrameRecord::default(),
            last: FrameRecord::default(),
            frame_count: 0,
        }
    }

    /// Resolves texture and effect paths against `root` and rejects missing files.
    ///
    /// Without an asset root, any path is accepted.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// Back-buffer width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Back-buffer height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The frame being recorded.
    pub fn current_frame(&self) -> &FrameRecord {
        &self.current
    }

    /// The most recently presented frame.
    pub fn last_frame(&self) -> &FrameRecord {
        &self.last
    }

    /// Number of presents so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of live resources of every kind.
    pub fn live_resources(&self) -> usize {
        self.buffers.len()
            + self.textures.len()
            + self.effects.len()
            + self.input_layouts.len()
            + self.render_targets.len()
    }

    /// Byte length of a live buffer.
    pub fn buffer_len(&self, buffer: BufferId) -> Option<usize> {
        self.buffers.get(&buffer).map(|entry| entry.byte_len)
    }

    /// Size of a live render target.
    pub fn render_target_size(&self, target: RenderTargetId) -> Option<(u32, u32)> {
        self.render_targets
            .get(&target)
            .map(|entry| (entry.width, entry.height))
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, GraphicsError> {
        match &self.asset_root {
            None => Ok(path.to_path_buf()),
            Some(root) => {
                let resolved = root.join(path);
                if resolved.is_file() {
                    Ok(resolved)
                } else {
                    Err(GraphicsError::ResourceNotFound { path: resolved })
                }
            }
        }
    }

    fn validate_pass(&self, pass: &EffectPass) -> Result<(), GraphicsError> {
        if !self.effects.contains_key(&pass.effect) {
            return Err(GraphicsError::InvalidHandle(ResourceId::Effect(pass.effect)));
        }
        if pass.technique.is_empty() || pass.pass.is_empty() {
            return Err(GraphicsError::PassNotFound {
                technique: pass.technique.clone(),
                pass: pass.pass.clone(),
            });
        }
        Ok(())
    }

    fn validate_texture(&self, texture: TextureId) -> Result<(), GraphicsError> {
        if self.textures.contains_key(&texture) {
            Ok(())
        } else {
            Err(GraphicsError::InvalidHandle(ResourceId::Texture(texture)))
        }
    }

    /// Checks everything a draw reads and returns the bound pass.
    fn validate_draw(&self, indexed: bool) -> Result<(EffectPass, Vec<ShaderConstant>), GraphicsError> {
        let layout = self
            .state
            .input_layout
            .ok_or(GraphicsError::IncompleteState("input layout"))?;
        if !self.input_layouts.contains_key(&layout) {
            return Err(GraphicsError::InvalidHandle(ResourceId::InputLayout(layout)));
        }

        let vertices = self
            .state
            .vertex_buffer
            .ok_or(GraphicsError::IncompleteState("vertex buffer"))?;
        if !self.buffers.contains_key(&vertices.buffer) {
            return Err(GraphicsError::InvalidHandle(ResourceId::Buffer(vertices.buffer)));
        }

        if indexed {
            let indices = self
                .state
                .index_buffer
                .ok_or(GraphicsError::IncompleteState("index buffer"))?;
            if !self.buffers.contains_key(&indices) {
                return Err(GraphicsError::InvalidHandle(ResourceId::Buffer(indices)));
            }
        }

        if let RenderTarget::Offscreen(target) = self.state.render_target {
            if !self.render_targets.contains_key(&target) {
                return Err(GraphicsError::InvalidHandle(ResourceId::RenderTarget(target)));
            }
        }

        self.bound_pass
            .clone()
            .ok_or(GraphicsError::IncompleteState("effect pass"))
    }

    fn record_draw(&mut self, kind: DrawKind, indexed: bool) -> Result<(), GraphicsError> {
        let (pass, constants) = self.validate_draw(indexed)?;
        log::trace!("Recorded {kind:?} with {}/{}.", pass.technique, pass.pass);
        self.current.draws.push(DrawCall {
            kind,
            state: self.state.clone(),
            pass,
            constants,
        });
        Ok(())
    }
}

impl GraphicsDevice for HeadlessGraphics {
    fn create_vertex_buffer(&mut self, label: &str, data: &[u8]) -> Result<BufferId, GraphicsError> {
        if data.is_empty() {
            return Err(GraphicsError::EmptyBuffer {
                label: label.to_string(),
            });
        }
        let id = BufferId(self.allocate());
        self.buffers.insert(
            id,
            BufferEntry {
                label: label.to_string(),
                byte_len: data.len(),
            },
        );
        log::debug!("Created vertex buffer '{label}' ({} bytes) as {id}.", data.len());
        Ok(id)
    }

    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> Result<BufferId, GraphicsError> {
        if indices.is_empty() {
            return Err(GraphicsError::EmptyBuffer {
                label: label.to_string(),
            });
        }
        let id = BufferId(self.allocate());
        self.buffers.insert(
            id,
            BufferEntry {
                label: label.to_string(),
                byte_len: std::mem::size_of_val(indices),
            },
        );
        log::debug!("Created index buffer '{label}' ({} indices) as {id}.", indices.len());
        Ok(id)
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureId, GraphicsError> {
        let resolved = self.resolve(path)?;
        let id = TextureId(self.allocate());
        log::debug!("Loaded texture '{}' as {id}.", resolved.display());
        self.textures.insert(id, resolved);
        Ok(id)
    }

    fn load_effect(&mut self, path: &Path) -> Result<EffectId, GraphicsError> {
        let resolved = self.resolve(path)?;
        let id = EffectId(self.allocate());
        log::debug!("Loaded effect '{}' as {id}.", resolved.display());
        self.effects.insert(id, resolved);
        Ok(id)
    }

    fn create_input_layout(
        &mut self,
        pass: &EffectPass,
        elements: &[VertexElement],
    ) -> Result<InputLayoutId, GraphicsError> {
        self.validate_pass(pass)?;
        let id = InputLayoutId(self.allocate());
        self.input_layouts.insert(
            id,
            LayoutEntry {
                pass: pass.clone(),
                stride: VertexElement::stride(elements),
            },
        );
        Ok(id)
    }

    fn create_render_target(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
    ) -> Result<RenderTargetId, GraphicsError> {
        let id = RenderTargetId(self.allocate());
        let texture = TextureId(self.allocate());
        self.textures
            .insert(texture, PathBuf::from(format!("<render target '{label}'>")));
        self.render_targets.insert(
            id,
            RenderTargetEntry {
                label: label.to_string(),
                width,
                height,
                texture,
            },
        );
        log::debug!("Created render target '{label}' ({width}x{height}) as {id}.");
        Ok(id)
    }

    fn render_target_texture(&self, target: RenderTargetId) -> Option<TextureId> {
        self.render_targets.get(&target).map(|entry| entry.texture)
    }

    fn release(&mut self, resource: ResourceId) {
        let released = match resource {
            ResourceId::Buffer(id) => self.buffers.remove(&id).map(|entry| entry.label),
            ResourceId::Texture(id) => self
                .textures
                .remove(&id)
                .map(|path| path.display().to_string()),
            ResourceId::Effect(id) => self
                .effects
                .remove(&id)
                .map(|path| path.display().to_string()),
            ResourceId::InputLayout(id) => self
                .input_layouts
                .remove(&id)
                .map(|entry| format!("{}/{} ({} byte stride)", entry.pass.technique, entry.pass.pass, entry.stride)),
            ResourceId::RenderTarget(id) => self.render_targets.remove(&id).map(|entry| {
                self.textures.remove(&entry.texture);
                entry.label
            }),
        };
        if let Some(name) = released {
            log::trace!("Released {resource} ('{name}').");
        }
    }
}

impl GraphicsContext for HeadlessGraphics {
    fn state(&self) -> &PipelineState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PipelineState {
        &mut self.state
    }

    fn reset_state(&mut self, defaults: &PipelineState) {
        self.state.clone_from(defaults);
        self.bound_pass = None;
    }

    fn apply_pass(&mut self, pass: &EffectPass, constants: &[ShaderConstant]) -> Result<(), GraphicsError> {
        self.validate_pass(pass)?;
        for constant in constants {
            if let ShaderValue::Texture(texture) = constant.value {
                self.validate_texture(texture)?;
            }
        }
        self.bound_pass = Some((pass.clone(), constants.to_vec()));
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) -> Result<(), GraphicsError> {
        self.record_draw(
            DrawKind::Indexed {
                index_count,
                start_index,
                base_vertex,
            },
            true,
        )
    }

    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), GraphicsError> {
        self.record_draw(
            DrawKind::Vertices {
                vertex_count,
                start_vertex,
            },
            false,
        )
    }

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) -> Result<(), GraphicsError> {
        self.current.texts.push(TextDraw {
            text: text.to_string(),
            position,
            color,
            target: self.state.render_target,
        });
        Ok(())
    }

    fn clear(&mut self, target: RenderTarget, color: Color) {
        self.current.clears.push((target, color));
    }

    fn present(&mut self) -> Result<(), GraphicsError> {
        self.last = std::mem::take(&mut self.current);
        self.frame_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::graphics::{VertexBufferBinding, VertexFormat};

    #[test]
    fn test_empty_buffers_are_rejected() {
        let mut graphics = HeadlessGraphics::new(8, 8);
        assert!(matches!(
            graphics.create_vertex_buffer("empty", &[]),
            Err(GraphicsError::EmptyBuffer { .. })
        ));
        assert!(graphics.create_index_buffer("empty", &[]).is_err());
        assert_eq!(graphics.live_resources(), 0);
    }

    #[test]
    fn test_release_render_target_releases_its_texture() {
        let mut graphics = HeadlessGraphics::new(8, 8);
        let target = graphics.create_render_target("scene", 8, 8).unwrap();
        assert!(graphics.render_target_texture(target).is_some());
        assert_eq!(graphics.live_resources(), 2);

        graphics.release(ResourceId::RenderTarget(target));
        assert_eq!(graphics.live_resources(), 0);
        graphics.release(ResourceId::RenderTarget(target));
    }

    #[test]
    fn test_reset_state_unbinds_pass() {
        let mut graphics = HeadlessGraphics::new(8, 8);
        let effect = graphics.load_effect(Path::new("basic.cso")).unwrap();
        let pass = EffectPass::new(effect, "main11", "p0");
        let layout = graphics
            .create_input_layout(&pass, &[VertexElement::new("POSITION", VertexFormat::Float32x4)])
            .unwrap();
        let vertices = graphics.create_vertex_buffer("tri", &[0u8; 48]).unwrap();

        graphics.state_mut().input_layout = Some(layout);
        graphics.state_mut().vertex_buffer = Some(VertexBufferBinding {
            buffer: vertices,
            stride: 16,
            offset: 0,
        });
        graphics.apply_pass(&pass, &[]).unwrap();
        graphics.draw(3, 0).unwrap();

        graphics.reset_state(&PipelineState::default());
        assert!(graphics.state().input_layout.is_none());
        assert!(matches!(
            graphics.draw(3, 0),
            Err(GraphicsError::IncompleteState("input layout"))
        ));
        assert_eq!(graphics.current_frame().draws.len(), 1);
    }
}
