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

//! Device (resource creation) and context (draw submission) traits.

use super::color::Color;
use super::error::GraphicsError;
use super::state::{PipelineState, RenderTarget};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::any::Any;
use std::fmt;
use std::path::Path;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

resource_id!(
    /// A vertex or index buffer.
    BufferId
);
resource_id!(
    /// A shader-readable texture.
    TextureId
);
resource_id!(
    /// A compiled effect (a set of techniques and passes).
    EffectId
);
resource_id!(
    /// A vertex input layout validated against an effect pass.
    InputLayoutId
);
resource_id!(
    /// An off-screen render target.
    RenderTargetId
);

/// Any resource a device can release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// A buffer.
    Buffer(BufferId),
    /// A texture.
    Texture(TextureId),
    /// An effect.
    Effect(EffectId),
    /// An input layout.
    InputLayout(InputLayoutId),
    /// A render target.
    RenderTarget(RenderTargetId),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Buffer(id) => id.fmt(f),
            ResourceId::Texture(id) => id.fmt(f),
            ResourceId::Effect(id) => id.fmt(f),
            ResourceId::InputLayout(id) => id.fmt(f),
            ResourceId::RenderTarget(id) => id.fmt(f),
        }
    }
}

/// The format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Two 32-bit floats.
    Float32x2,
    /// Three 32-bit floats.
    Float32x3,
    /// Four 32-bit floats.
    Float32x4,
}

impl VertexFormat {
    /// Size of the attribute in bytes.
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// One attribute of a vertex layout, matched to a shader input by semantic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexElement {
    /// Shader semantic, e.g. `POSITION`.
    pub semantic: &'static str,
    /// Attribute format.
    pub format: VertexFormat,
}

impl VertexElement {
    /// Creates an element.
    pub const fn new(semantic: &'static str, format: VertexFormat) -> Self {
        Self { semantic, format }
    }

    /// Total byte size of a tightly packed layout.
    pub fn stride(elements: &[VertexElement]) -> u32 {
        elements.iter().map(|element| element.format.size()).sum()
    }
}

/// A technique/pass pair inside a loaded effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectPass {
    /// The effect.
    pub effect: EffectId,
    /// Technique name.
    pub technique: String,
    /// Pass name within the technique.
    pub pass: String,
}

impl EffectPass {
    /// Creates a pass reference.
    pub fn new(effect: EffectId, technique: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            effect,
            technique: technique.into(),
            pass: pass.into(),
        }
    }
}

/// A value bound to a named effect variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShaderValue {
    /// A scalar.
    Float(f32),
    /// A 3-vector.
    Vec3(Vec3),
    /// A 4-vector or color.
    Vec4(Vec4),
    /// A matrix.
    Mat4(Mat4),
    /// A shader resource.
    Texture(TextureId),
}

impl From<f32> for ShaderValue {
    fn from(value: f32) -> Self {
        ShaderValue::Float(value)
    }
}

impl From<Vec3> for ShaderValue {
    fn from(value: Vec3) -> Self {
        ShaderValue::Vec3(value)
    }
}

impl From<Vec4> for ShaderValue {
    fn from(value: Vec4) -> Self {
        ShaderValue::Vec4(value)
    }
}

impl From<Mat4> for ShaderValue {
    fn from(value: Mat4) -> Self {
        ShaderValue::Mat4(value)
    }
}

impl From<TextureId> for ShaderValue {
    fn from(value: TextureId) -> Self {
        ShaderValue::Texture(value)
    }
}

/// A named effect variable and its value for one pass application.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderConstant {
    /// Variable name as declared in the effect.
    pub name: &'static str,
    /// The value.
    pub value: ShaderValue,
}

impl ShaderConstant {
    /// Creates a constant from anything convertible to a [`ShaderValue`].
    pub fn new(name: &'static str, value: impl Into<ShaderValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Creates and releases GPU resources.
pub trait GraphicsDevice {
    /// Creates an immutable vertex buffer from raw vertex bytes.
    fn create_vertex_buffer(&mut self, label: &str, data: &[u8]) -> Result<BufferId, GraphicsError>;

    /// Creates an immutable buffer of 32-bit indices.
    fn create_index_buffer(&mut self, label: &str, indices: &[u32])
        -> Result<BufferId, GraphicsError>;

    /// Loads a texture from disk.
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, GraphicsError>;

    /// Loads a compiled effect from disk.
    fn load_effect(&mut self, path: &Path) -> Result<EffectId, GraphicsError>;

    /// Validates `elements` against a pass's input signature and creates a layout.
    fn create_input_layout(
        &mut self,
        pass: &EffectPass,
        elements: &[VertexElement],
    ) -> Result<InputLayoutId, GraphicsError>;

    /// Creates an off-screen render target of the given size.
    fn create_render_target(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
    ) -> Result<RenderTargetId, GraphicsError>;

    /// The texture a render target resolves into, for sampling it later.
    fn render_target_texture(&self, target: RenderTargetId) -> Option<TextureId>;

    /// Releases a resource. Releasing an unknown resource is a no-op.
    fn release(&mut self, resource: ResourceId);
}

/// Submits rendering work against a shared pipeline state.
pub trait GraphicsContext {
    /// The current pipeline state.
    fn state(&self) -> &PipelineState;

    /// Mutable access to the pipeline state. Changes apply to subsequent draws.
    fn state_mut(&mut self) -> &mut PipelineState;

    /// Replaces the whole pipeline state with `defaults`.
    fn reset_state(&mut self, defaults: &PipelineState) {
        self.state_mut().clone_from(defaults);
    }

    /// Binds an effect pass and its variables for subsequent draws.
    fn apply_pass(
        &mut self,
        pass: &EffectPass,
        constants: &[ShaderConstant],
    ) -> Result<(), GraphicsError>;

    /// Draws indexed primitives from the bound vertex and index buffers.
    fn draw_indexed(
        &mut self,
        index_count: u32,
        start_index: u32,
        base_vertex: i32,
    ) -> Result<(), GraphicsError>;

    /// Draws non-indexed primitives from the bound vertex buffer.
    fn draw(&mut self, vertex_count: u32, start_vertex: u32) -> Result<(), GraphicsError>;

    /// Draws screen-space text with the default sprite font.
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color)
        -> Result<(), GraphicsError>;

    /// Clears a render target to `color` and resets depth.
    fn clear(&mut self, target: RenderTarget, color: Color);

    /// Presents the back buffer and ends the frame.
    fn present(&mut self) -> Result<(), GraphicsError>;
}

/// A backend that is both device and context, as the game holds it.
pub trait Graphics: GraphicsDevice + GraphicsContext + Any {
    /// The device half.
    fn device(&mut self) -> &mut dyn GraphicsDevice;

    /// The context half.
    fn context(&mut self) -> &mut dyn GraphicsContext;

    /// Allows downcasting to the concrete backend.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcasting to the concrete backend.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: GraphicsDevice + GraphicsContext + Any> Graphics for T {
    fn device(&mut self) -> &mut dyn GraphicsDevice {
        self
    }

    fn context(&mut self) -> &mut dyn GraphicsContext {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_sums_formats() {
        let elements = [
            VertexElement::new("POSITION", VertexFormat::Float32x4),
            VertexElement::new("TEXCOORD", VertexFormat::Float32x2),
            VertexElement::new("NORMAL", VertexFormat::Float32x3),
        ];
        assert_eq!(VertexElement::stride(&elements), 36);
    }

    #[test]
    fn test_shader_constant_conversions() {
        let constant = ShaderConstant::new("SpecularPower", 25.0_f32);
        assert_eq!(constant.value, ShaderValue::Float(25.0));

        let constant = ShaderConstant::new("ColorTexture", TextureId(3));
        assert_eq!(constant.value, ShaderValue::Texture(TextureId(3)));
    }

    #[test]
    fn test_resource_id_display() {
        assert_eq!(BufferId(4).to_string(), "BufferId(4)");
        assert_eq!(ResourceId::Effect(EffectId(1)).to_string(), "EffectId(1)");
    }
}
