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

//! Effect passes paired with the input layout their vertices use.

use bytemuck::Pod;
use prism_core::asset::Mesh;
use prism_core::graphics::{
    BufferId, EffectId, EffectPass, GraphicsContext, GraphicsDevice, GraphicsError,
    InputLayoutId, PrimitiveTopology, ShaderConstant, VertexBufferBinding, VertexElement,
};
use std::path::Path;

/// The pass every demo effect draws with.
pub const DEFAULT_PASS: &str = "p0";

/// One technique/pass of an effect and the input layout it was created for.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pass: EffectPass,
    input_layout: InputLayoutId,
    stride: u32,
}

impl Material {
    /// Loads the effect at `path` and binds `technique`/`p0` to `layout`.
    pub fn load(
        device: &mut dyn GraphicsDevice,
        path: &Path,
        technique: &str,
        layout: &[VertexElement],
    ) -> Result<Self, GraphicsError> {
        let effect = device.load_effect(path)?;
        Self::with_effect(device, effect, technique, layout)
    }

    /// Binds `technique`/`p0` of an already loaded effect to `layout`.
    pub fn with_effect(
        device: &mut dyn GraphicsDevice,
        effect: EffectId,
        technique: &str,
        layout: &[VertexElement],
    ) -> Result<Self, GraphicsError> {
        let pass = EffectPass::new(effect, technique, DEFAULT_PASS);
        let input_layout = device.create_input_layout(&pass, layout)?;
        Ok(Self {
            pass,
            input_layout,
            stride: VertexElement::stride(layout),
        })
    }

    pub fn pass(&self) -> &EffectPass {
        &self.pass
    }

    pub fn input_layout(&self) -> InputLayoutId {
        self.input_layout
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Uploads `vertices` as a vertex buffer.
    pub fn create_vertex_buffer<V: Pod>(
        &self,
        device: &mut dyn GraphicsDevice,
        label: &str,
        vertices: &[V],
    ) -> Result<BufferId, GraphicsError> {
        device.create_vertex_buffer(label, bytemuck::cast_slice(vertices))
    }

    /// Sets topology, input layout and buffers on the context.
    pub fn bind(
        &self,
        graphics: &mut dyn GraphicsContext,
        topology: PrimitiveTopology,
        vertex_buffer: BufferId,
        index_buffer: Option<BufferId>,
    ) {
        let state = graphics.state_mut();
        state.topology = topology;
        state.input_layout = Some(self.input_layout);
        state.vertex_buffer = Some(VertexBufferBinding {
            buffer: vertex_buffer,
            stride: self.stride,
            offset: 0,
        });
        state.index_buffer = index_buffer;
    }

    /// Applies the pass with this draw's variables.
    pub fn apply(
        &self,
        graphics: &mut dyn GraphicsContext,
        constants: &[ShaderConstant],
    ) -> Result<(), GraphicsError> {
        graphics.apply_pass(&self.pass, constants)
    }
}

/// Vertex and index buffers of one uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBuffers {
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub index_count: u32,
}

impl MeshBuffers {
    /// Uploads `vertices` through `material` and the mesh's indices.
    pub fn upload<V: Pod>(
        device: &mut dyn GraphicsDevice,
        material: &Material,
        mesh: &Mesh,
        vertices: &[V],
    ) -> Result<Self, GraphicsError> {
        let vertex_buffer = material.create_vertex_buffer(device, &mesh.name, vertices)?;
        let index_buffer = mesh.create_index_buffer(device)?;
        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    /// Binds the buffers as a triangle list and issues the indexed draw.
    pub fn draw(
        &self,
        graphics: &mut dyn GraphicsContext,
        material: &Material,
        constants: &[ShaderConstant],
    ) -> Result<(), GraphicsError> {
        material.bind(
            graphics,
            PrimitiveTopology::TriangleList,
            self.vertex_buffer,
            Some(self.index_buffer),
        );
        material.apply(graphics, constants)?;
        graphics.draw_indexed(self.index_count, 0, 0)
    }
}
