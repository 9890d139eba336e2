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

//! State descriptors for the shared pipeline.

use super::color::{self, Color};
use super::device::{BufferId, InputLayoutId, RenderTargetId, TextureId};

/// Number of sampler slots tracked by [`PipelineState`].
pub const MAX_SAMPLER_SLOTS: usize = 4;

/// Number of texture slots tracked by [`PipelineState`].
pub const MAX_TEXTURE_SLOTS: usize = 4;

/// Where draws land.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// The swap chain's back buffer.
    #[default]
    BackBuffer,
    /// An off-screen target created through the device.
    Offscreen(RenderTargetId),
}

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Independent triangles.
    #[default]
    TriangleList,
    /// Connected triangles.
    TriangleStrip,
    /// Independent line segments.
    LineList,
    /// Connected line segments.
    LineStrip,
    /// Individual points.
    PointList,
}

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Filled triangles.
    #[default]
    Solid,
    /// Edges only.
    Wireframe,
}

/// Which faces are culled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// Nothing is culled.
    None,
    /// Front faces are culled.
    Front,
    /// Back faces are culled.
    #[default]
    Back,
}

/// Describes primitive rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterizerState {
    /// The fill mode.
    pub fill_mode: FillMode,
    /// The cull mode.
    pub cull_mode: CullMode,
    /// If `true`, counter-clockwise triangles are front facing.
    pub front_counter_clockwise: bool,
    /// If `true`, fragments outside the depth range are clipped.
    pub depth_clip_enabled: bool,
}

impl RasterizerState {
    /// Solid fill, back faces culled.
    pub const BACK_CULLING: Self = Self {
        fill_mode: FillMode::Solid,
        cull_mode: CullMode::Back,
        front_counter_clockwise: true,
        depth_clip_enabled: true,
    };

    /// Solid fill, front faces culled. Used for geometry seen from inside.
    pub const FRONT_CULLING: Self = Self {
        cull_mode: CullMode::Front,
        ..Self::BACK_CULLING
    };

    /// Solid fill, nothing culled.
    pub const DISABLED_CULLING: Self = Self {
        cull_mode: CullMode::None,
        ..Self::BACK_CULLING
    };

    /// Wireframe, nothing culled.
    pub const WIREFRAME: Self = Self {
        fill_mode: FillMode::Wireframe,
        cull_mode: CullMode::None,
        ..Self::BACK_CULLING
    };
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self::BACK_CULLING
    }
}

/// Texture filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    /// Nearest texel.
    Point,
    /// Bilinear within a mip, nearest between mips.
    Bilinear,
    /// Linear within and between mips.
    #[default]
    Trilinear,
    /// Anisotropic filtering.
    Anisotropic,
}

/// Texture coordinate addressing outside `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Tile the texture.
    #[default]
    Wrap,
    /// Tile with mirroring.
    Mirror,
    /// Clamp to the edge texel.
    Clamp,
    /// Use the sampler's border color.
    Border,
}

/// Describes how textures are sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerState {
    /// The filter.
    pub filter: TextureFilter,
    /// Addressing for all three coordinates.
    pub address_mode: AddressMode,
    /// Color returned for [`AddressMode::Border`].
    pub border_color: Color,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            filter: TextureFilter::Trilinear,
            address_mode: AddressMode::Wrap,
            border_color: color::BLACK,
        }
    }
}

/// Describes color blending into the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    /// If `false`, source colors overwrite the target.
    pub enabled: bool,
    /// If `true`, blending uses source alpha over destination.
    pub alpha_blend: bool,
}

impl BlendState {
    /// Blending disabled.
    pub const OPAQUE: Self = Self {
        enabled: false,
        alpha_blend: false,
    };

    /// Standard source-over alpha blending.
    pub const ALPHA_BLEND: Self = Self {
        enabled: true,
        alpha_blend: true,
    };
}

impl Default for BlendState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Describes depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    /// If `true`, fragments are tested against the depth buffer.
    pub depth_enabled: bool,
    /// If `true`, passing fragments write their depth.
    pub depth_write_enabled: bool,
}

impl DepthStencilState {
    /// Depth test and write.
    pub const DEFAULT: Self = Self {
        depth_enabled: true,
        depth_write_enabled: true,
    };

    /// Depth test without writing.
    pub const DEPTH_READ: Self = Self {
        depth_enabled: true,
        depth_write_enabled: false,
    };

    /// No depth testing.
    pub const DISABLED: Self = Self {
        depth_enabled: false,
        depth_write_enabled: false,
    };
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A vertex buffer bound to the input assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBufferBinding {
    /// The buffer.
    pub buffer: BufferId,
    /// Byte distance between consecutive vertices.
    pub stride: u32,
    /// Byte offset of the first vertex.
    pub offset: u32,
}

/// The complete, shared pipeline configuration of a graphics context.
///
/// Every field a component may change lives here, so resetting a context
/// to a `PipelineState` leaves nothing behind from previous draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    /// Where draws land.
    pub render_target: RenderTarget,
    /// Primitive assembly.
    pub topology: PrimitiveTopology,
    /// The bound input layout.
    pub input_layout: Option<InputLayoutId>,
    /// The bound vertex buffer.
    pub vertex_buffer: Option<VertexBufferBinding>,
    /// The bound index buffer (32-bit indices).
    pub index_buffer: Option<BufferId>,
    /// Rasterization.
    pub rasterizer: RasterizerState,
    /// Blending.
    pub blend: BlendState,
    /// Depth testing.
    pub depth_stencil: DepthStencilState,
    /// Sampler slots.
    pub samplers: [Option<SamplerState>; MAX_SAMPLER_SLOTS],
    /// Texture slots.
    pub textures: [Option<TextureId>; MAX_TEXTURE_SLOTS],
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            render_target: RenderTarget::BackBuffer,
            topology: PrimitiveTopology::TriangleList,
            input_layout: None,
            vertex_buffer: None,
            index_buffer: None,
            rasterizer: RasterizerState::default(),
            blend: BlendState::default(),
            depth_stencil: DepthStencilState::default(),
            samplers: [None; MAX_SAMPLER_SLOTS],
            textures: [None; MAX_TEXTURE_SLOTS],
        }
    }
}

/// Rasterizer and sampler presets plus the default pipeline, owned by a game.
///
/// Created with the game and dropped with it; nothing here is process-wide.
#[derive(Debug, Clone)]
pub struct RenderStates {
    border_color: Color,
    default_pipeline: PipelineState,
}

impl RenderStates {
    /// Creates the presets with the given sampler border color.
    pub fn new(border_color: Color) -> Self {
        let mut default_pipeline = PipelineState::default();
        default_pipeline.samplers[0] = Some(Self::sampler(AddressMode::Wrap, border_color));
        Self {
            border_color,
            default_pipeline,
        }
    }

    fn sampler(address_mode: AddressMode, border_color: Color) -> SamplerState {
        SamplerState {
            filter: TextureFilter::Trilinear,
            address_mode,
            border_color,
        }
    }

    /// Border color used by [`trilinear_border`](Self::trilinear_border).
    pub fn border_color(&self) -> Color {
        self.border_color
    }

    /// Solid fill, back faces culled.
    pub fn back_culling(&self) -> RasterizerState {
        RasterizerState::BACK_CULLING
    }

    /// Solid fill, front faces culled.
    pub fn front_culling(&self) -> RasterizerState {
        RasterizerState::FRONT_CULLING
    }

    /// Solid fill, nothing culled.
    pub fn disabled_culling(&self) -> RasterizerState {
        RasterizerState::DISABLED_CULLING
    }

    /// Wireframe.
    pub fn wireframe(&self) -> RasterizerState {
        RasterizerState::WIREFRAME
    }

    /// Trilinear filtering, wrapped addressing.
    pub fn trilinear_wrap(&self) -> SamplerState {
        Self::sampler(AddressMode::Wrap, self.border_color)
    }

    /// Trilinear filtering, mirrored addressing.
    pub fn trilinear_mirror(&self) -> SamplerState {
        Self::sampler(AddressMode::Mirror, self.border_color)
    }

    /// Trilinear filtering, clamped addressing.
    pub fn trilinear_clamp(&self) -> SamplerState {
        Self::sampler(AddressMode::Clamp, self.border_color)
    }

    /// Trilinear filtering, border addressing.
    pub fn trilinear_border(&self) -> SamplerState {
        Self::sampler(AddressMode::Border, self.border_color)
    }

    /// The configuration every draw starts from.
    pub fn default_pipeline(&self) -> &PipelineState {
        &self.default_pipeline
    }

    /// Mutable access to the default pipeline, e.g. to redirect the whole
    /// scene into an off-screen target for post processing.
    pub fn default_pipeline_mut(&mut self) -> &mut PipelineState {
        &mut self.default_pipeline
    }
}

impl Default for RenderStates {
    fn default() -> Self {
        Self::new(color::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_is_unbound() {
        let state = PipelineState::default();
        assert_eq!(state.render_target, RenderTarget::BackBuffer);
        assert_eq!(state.topology, PrimitiveTopology::TriangleList);
        assert!(state.input_layout.is_none());
        assert!(state.vertex_buffer.is_none());
        assert!(state.index_buffer.is_none());
        assert_eq!(state.rasterizer, RasterizerState::BACK_CULLING);
    }

    #[test]
    fn test_rasterizer_presets() {
        assert_eq!(RasterizerState::FRONT_CULLING.cull_mode, CullMode::Front);
        assert_eq!(RasterizerState::DISABLED_CULLING.cull_mode, CullMode::None);
        assert_eq!(RasterizerState::WIREFRAME.fill_mode, FillMode::Wireframe);
        assert_eq!(RasterizerState::WIREFRAME.cull_mode, CullMode::None);
    }

    #[test]
    fn test_sampler_presets_use_border_color() {
        let states = RenderStates::new(color::RED);
        assert_eq!(states.trilinear_border().address_mode, AddressMode::Border);
        assert_eq!(states.trilinear_border().border_color, color::RED);
        assert_eq!(states.trilinear_clamp().address_mode, AddressMode::Clamp);
        assert_eq!(states.trilinear_mirror().address_mode, AddressMode::Mirror);
        assert_eq!(
            states.default_pipeline().samplers[0],
            Some(states.trilinear_wrap())
        );
    }

    #[test]
    fn test_default_pipeline_mut_persists() {
        let mut states = RenderStates::default();
        states.default_pipeline_mut().render_target = RenderTarget::Offscreen(RenderTargetId(7));
        assert_eq!(
            states.default_pipeline().render_target,
            RenderTarget::Offscreen(RenderTargetId(7))
        );
    }
}
