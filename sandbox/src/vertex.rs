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

//! Vertex formats uploaded by the demos.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use prism_core::graphics::{VertexElement, VertexFormat};

/// Position and colour, as the basic effect reads them.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionColor {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl VertexPositionColor {
    pub const LAYOUT: &'static [VertexElement] = &[
        VertexElement::new("POSITION", VertexFormat::Float32x4),
        VertexElement::new("COLOR", VertexFormat::Float32x4),
    ];

    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            color: color.to_array(),
        }
    }
}

/// Position and one texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionTexture {
    pub position: [f32; 4],
    pub texture_coordinates: [f32; 2],
}

impl VertexPositionTexture {
    pub const LAYOUT: &'static [VertexElement] = &[
        VertexElement::new("POSITION", VertexFormat::Float32x4),
        VertexElement::new("TEXCOORD", VertexFormat::Float32x2),
    ];

    pub fn new(position: Vec3, texture_coordinates: Vec2) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            texture_coordinates: texture_coordinates.to_array(),
        }
    }
}

/// Position, texture coordinate and normal, for the lit demos.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionTextureNormal {
    pub position: [f32; 4],
    pub texture_coordinates: [f32; 2],
    pub normal: [f32; 3],
}

impl VertexPositionTextureNormal {
    pub const LAYOUT: &'static [VertexElement] = &[
        VertexElement::new("POSITION", VertexFormat::Float32x4),
        VertexElement::new("TEXCOORD", VertexFormat::Float32x2),
        VertexElement::new("NORMAL", VertexFormat::Float32x3),
    ];

    pub fn new(position: Vec3, texture_coordinates: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            texture_coordinates: texture_coordinates.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Position only, for the skybox.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPosition {
    pub position: [f32; 4],
}

impl VertexPosition {
    pub const LAYOUT: &'static [VertexElement] =
        &[VertexElement::new("POSITION", VertexFormat::Float32x4)];

    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_strides_match_struct_sizes() {
        assert_eq!(
            VertexElement::stride(VertexPositionColor::LAYOUT) as usize,
            std::mem::size_of::<VertexPositionColor>()
        );
        assert_eq!(
            VertexElement::stride(VertexPositionTexture::LAYOUT) as usize,
            std::mem::size_of::<VertexPositionTexture>()
        );
        assert_eq!(
            VertexElement::stride(VertexPositionTextureNormal::LAYOUT) as usize,
            std::mem::size_of::<VertexPositionTextureNormal>()
        );
        assert_eq!(
            VertexElement::stride(VertexPosition::LAYOUT) as usize,
            std::mem::size_of::<VertexPosition>()
        );
    }

    #[test]
    fn test_positions_are_homogeneous() {
        let vertex = VertexPosition::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(vertex.position, [1.0, 2.0, 3.0, 1.0]);
    }
}
