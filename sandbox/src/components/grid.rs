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

//! A line-list reference grid on the XZ plane.

use crate::content::Content;
use crate::material::Material;
use crate::vertex::VertexPositionColor;
use anyhow::Context;
use glam::{Mat4, Vec3, Vec4};
use prism_core::graphics::{BufferId, Color, PrimitiveTopology, ShaderConstant};
use prism_core::{
    ComponentState, DrawContext, DrawableGameComponent, DrawableState, GameComponent,
    GameContext, GameTime,
};

/// Draws `size + 1` lines in each direction, `scale / 10` units apart,
/// centred on the origin.
#[derive(Debug)]
pub struct Grid {
    state: DrawableState,
    content: Content,
    size: u32,
    scale: u32,
    color: Color,
    world_matrix: Mat4,
    material: Option<Material>,
    vertex_buffer: Option<BufferId>,
}

impl Grid {
    pub const DEFAULT_SIZE: u32 = 16;
    pub const DEFAULT_SCALE: u32 = 16;
    pub const DEFAULT_COLOR: Color = Vec4::new(0.961, 0.871, 0.702, 1.0);

    pub fn new(content: Content) -> Self {
        Self::with_dimensions(content, Self::DEFAULT_SIZE, Self::DEFAULT_SCALE, Self::DEFAULT_COLOR)
    }

    pub fn with_dimensions(content: Content, size: u32, scale: u32, color: Color) -> Self {
        Self {
            state: DrawableState::default(),
            content,
            size,
            scale,
            color,
            world_matrix: Mat4::IDENTITY,
            material: None,
            vertex_buffer: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.world_matrix = Mat4::from_translation(position);
    }

    /// Four vertices per step: one line along Z, one along X.
    pub fn vertex_count(&self) -> u32 {
        (self.size + 1) * 4
    }

    /// Builds the line endpoints.
    pub fn build_vertices(&self) -> Vec<VertexPositionColor> {
        let adjusted_scale = self.scale as f32 * 0.1;
        let max_position = self.size as f32 * adjusted_scale / 2.0;

        (0..=self.size)
            .flat_map(|i| {
                let position = max_position - i as f32 * adjusted_scale;
                [
                    Vec3::new(position, 0.0, max_position),
                    Vec3::new(position, 0.0, -max_position),
                    Vec3::new(max_position, 0.0, position),
                    Vec3::new(-max_position, 0.0, position),
                ]
            })
            .map(|point| VertexPositionColor::new(point, self.color))
            .collect()
    }
}

impl GameComponent for Grid {
    fn state(&self) -> &ComponentState {
        self.state.component()
    }

    fn state_mut(&mut self) -> &mut ComponentState {
        self.state.component_mut()
    }

    fn name(&self) -> &'static str {
        "Grid"
    }

    fn initialize(&mut self, ctx: &mut GameContext<'_>) -> anyhow::Result<()> {
        let material = Material::load(
            ctx.device,
            &self.content.effect("BasicEffect.fx"),
            "main11",
            VertexPositionColor::LAYOUT,
        )?;
        let vertices = self.build_vertices();
        self.vertex_buffer = Some(material.create_vertex_buffer(ctx.device, "Grid", &vertices)?);
        self.material = Some(material);
        Ok(())
    }

    fn as_drawable(&self) -> Option<&dyn DrawableGameComponent> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn DrawableGameComponent> {
        Some(self)
    }
}

impl DrawableGameComponent for Grid {
    fn drawable_state(&self) -> &DrawableState {
        &self.state
    }

    fn drawable_state_mut(&mut self) -> &mut DrawableState {
        &mut self.state
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>, _game_time: &GameTime) -> anyhow::Result<()> {
        let (Some(material), Some(vertex_buffer)) = (&self.material, self.vertex_buffer) else {
            anyhow::bail!("grid drawn before initialization");
        };
        let camera = crate::active_camera(self.state.camera(), ctx.camera)?;
        let view_projection = camera
            .view_projection_matrix()
            .context("camera is unavailable")?;

        material.bind(ctx.graphics, PrimitiveTopology::LineList, vertex_buffer, None);
        material.apply(
            ctx.graphics,
            &[ShaderConstant::new(
                "WorldViewProjection",
                view_projection * self.world_matrix,
            )],
        )?;
        ctx.graphics.draw(self.vertex_count(), 0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_grid_spans_sixteen_cells() {
        let grid = Grid::new(Content::default());
        let vertices = grid.build_vertices();

        assert_eq!(vertices.len() as u32, grid.vertex_count());
        assert_eq!(vertices.len(), 68);
        // scale 16 -> 1.6 units per cell, 12.8 from the centre to an edge
        assert_relative_eq!(vertices[0].position[0], 12.8, epsilon = 1e-4);
        assert_relative_eq!(vertices[0].position[2], 12.8, epsilon = 1e-4);
        assert_relative_eq!(vertices[vertices.len() - 1].position[2], -12.8, epsilon = 1e-4);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
    }
}
