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

//! What the headless backend remembers about a frame.

use glam::Vec2;
use prism_core::graphics::{Color, EffectPass, PipelineState, RenderTarget, ShaderConstant};

/// The primitive range of a recorded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// `draw_indexed`.
    Indexed {
        /// Number of indices.
        index_count: u32,
        /// First index.
        start_index: u32,
        /// Value added to each index.
        base_vertex: i32,
    },
    /// `draw`.
    Vertices {
        /// Number of vertices.
        vertex_count: u32,
        /// First vertex.
        start_vertex: u32,
    },
}

/// One draw call with the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// The primitive range.
    pub kind: DrawKind,
    /// The full pipeline state at the time of the call.
    pub state: PipelineState,
    /// The pass bound at the time of the call.
    pub pass: EffectPass,
    /// The constants the pass was applied with.
    pub constants: Vec<ShaderConstant>,
}

impl DrawCall {
    /// Looks up a constant by variable name.
    pub fn constant(&self, name: &str) -> Option<&ShaderConstant> {
        self.constants.iter().find(|constant| constant.name == name)
    }
}

/// One text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    /// The string.
    pub text: String,
    /// Top-left position in pixels.
    pub position: Vec2,
    /// Text color.
    pub color: Color,
    /// Where the text landed.
    pub target: RenderTarget,
}

/// Everything submitted between two presents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRecord {
    /// Render-target clears, in order.
    pub clears: Vec<(RenderTarget, Color)>,
    /// Draw calls, in order.
    pub draws: Vec<DrawCall>,
    /// Text draws, in order.
    pub texts: Vec<TextDraw>,
}

impl FrameRecord {
    /// Draws that landed on `target`.
    pub fn draws_to(&self, target: RenderTarget) -> impl Iterator<Item = &DrawCall> {
        self.draws
            .iter()
            .filter(move |draw| draw.state.render_target == target)
    }

    /// Draws issued with the given technique.
    pub fn draws_with_technique<'a>(
        &'a self,
        technique: &'a str,
    ) -> impl Iterator<Item = &'a DrawCall> + 'a {
        self.draws
            .iter()
            .filter(move |draw| draw.pass.technique == technique)
    }

    /// Whether any text draw contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|text| text.text.contains(needle))
    }

    /// Whether nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.clears.is_empty() && self.draws.is_empty() && self.texts.is_empty()
    }
}
