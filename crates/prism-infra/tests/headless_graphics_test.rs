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

use glam::{Mat4, Vec2};
use prism_core::graphics::{
    color, EffectPass, GraphicsContext, GraphicsDevice, GraphicsError, RenderTarget,
    ShaderConstant, TextureId, VertexBufferBinding, VertexElement, VertexFormat,
};
use prism_infra::graphics::{DrawKind, HeadlessGraphics};
use std::path::Path;

fn bind_triangle(graphics: &mut HeadlessGraphics) -> EffectPass {
    let effect = graphics.load_effect(Path::new("BasicEffect.cso")).unwrap();
    let pass = EffectPass::new(effect, "main11", "p0");
    let layout = graphics
        .create_input_layout(
            &pass,
            &[
                VertexElement::new("POSITION", VertexFormat::Float32x4),
                VertexElement::new("COLOR", VertexFormat::Float32x4),
            ],
        )
        .unwrap();
    let vertices = graphics.create_vertex_buffer("triangle", &[0u8; 96]).unwrap();
    let indices = graphics.create_index_buffer("triangle", &[0, 1, 2]).unwrap();

    let state = graphics.state_mut();
    state.input_layout = Some(layout);
    state.vertex_buffer = Some(VertexBufferBinding {
        buffer: vertices,
        stride: 32,
        offset: 0,
    });
    state.index_buffer = Some(indices);
    pass
}

#[test]
fn test_present_rolls_frame_into_last_frame() {
    let mut graphics = HeadlessGraphics::new(1024, 768);
    let pass = bind_triangle(&mut graphics);

    graphics.clear(RenderTarget::BackBuffer, color::CORNFLOWER_BLUE);
    graphics
        .apply_pass(&pass, &[ShaderConstant::new("WorldViewProjection", Mat4::IDENTITY)])
        .unwrap();
    graphics.draw_indexed(3, 0, 0).unwrap();
    graphics
        .draw_text("hello", Vec2::new(0.0, 40.0), color::WHITE)
        .unwrap();
    graphics.present().unwrap();

    assert_eq!(graphics.frame_count(), 1);
    assert!(graphics.current_frame().is_empty());

    let frame = graphics.last_frame();
    assert_eq!(frame.clears, vec![(RenderTarget::BackBuffer, color::CORNFLOWER_BLUE)]);
    assert_eq!(frame.draws.len(), 1);
    assert_eq!(
        frame.draws[0].kind,
        DrawKind::Indexed {
            index_count: 3,
            start_index: 0,
            base_vertex: 0
        }
    );
    assert!(frame.draws[0].constant("WorldViewProjection").is_some());
    assert!(frame.has_text("hello"));
}

#[test]
fn test_draw_without_vertex_buffer_is_incomplete() {
    let mut graphics = HeadlessGraphics::new(64, 64);
    let pass = bind_triangle(&mut graphics);
    graphics.state_mut().vertex_buffer = None;
    graphics.apply_pass(&pass, &[]).unwrap();

    assert!(matches!(
        graphics.draw_indexed(3, 0, 0),
        Err(GraphicsError::IncompleteState("vertex buffer"))
    ));
}

#[test]
fn test_draw_without_pass_is_incomplete() {
    let mut graphics = HeadlessGraphics::new(64, 64);
    bind_triangle(&mut graphics);
    assert!(matches!(
        graphics.draw(3, 0),
        Err(GraphicsError::IncompleteState("effect pass"))
    ));
}

#[test]
fn test_unknown_texture_constant_is_rejected() {
    let mut graphics = HeadlessGraphics::new(64, 64);
    let pass = bind_triangle(&mut graphics);
    let result = graphics.apply_pass(&pass, &[ShaderConstant::new("ColorTexture", TextureId(999))]);
    assert!(matches!(result, Err(GraphicsError::InvalidHandle(_))));
}

#[test]
fn test_asset_root_rejects_missing_files() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("Earth.dds"), b"dds").unwrap();

    let mut graphics = HeadlessGraphics::new(64, 64).with_asset_root(root.path());
    assert!(graphics.load_texture(Path::new("Earth.dds")).is_ok());
    assert!(matches!(
        graphics.load_texture(Path::new("Moon.dds")),
        Err(GraphicsError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_offscreen_draws_are_tagged_with_their_target() {
    let mut graphics = HeadlessGraphics::new(64, 64);
    let pass = bind_triangle(&mut graphics);
    let target = graphics.create_render_target("scene", 64, 64).unwrap();
    assert_eq!(graphics.render_target_size(target), Some((64, 64)));

    graphics.state_mut().render_target = RenderTarget::Offscreen(target);
    graphics.apply_pass(&pass, &[]).unwrap();
    graphics.draw_indexed(3, 0, 0).unwrap();

    let frame = graphics.current_frame();
    assert_eq!(frame.draws_to(RenderTarget::Offscreen(target)).count(), 1);
    assert_eq!(frame.draws_to(RenderTarget::BackBuffer).count(), 0);
    assert_eq!(frame.draws_with_technique("main11").count(), 1);
}
