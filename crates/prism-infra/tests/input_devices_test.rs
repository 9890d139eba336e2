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

use approx::assert_relative_eq;
use prism_core::input::{InputEvent, KeyCode, MouseButton};
use prism_core::{Camera, CameraRef, Game, GameTime, ServiceKind};
use prism_infra::{FirstPersonCamera, HeadlessGraphics, Keyboard, Mouse};

fn frame(seconds: f64) -> GameTime {
    let mut time = GameTime::new();
    time.set_elapsed_game_time(seconds);
    time
}

#[test]
fn test_keyboard_edges_track_one_frame() {
    let mut game = Game::new(Box::new(HeadlessGraphics::new(64, 64)));
    let keyboard = game.add_service_component(Keyboard::new());
    game.initialize().unwrap();

    keyboard.with(|k| k.publish(InputEvent::KeyPressed { key: KeyCode::Space }));
    game.update(&frame(0.016)).unwrap();
    keyboard
        .with(|k| {
            assert!(k.is_key_down(KeyCode::Space));
            assert!(k.was_key_pressed_this_frame(KeyCode::Space));
            assert!(!k.is_key_held_down(KeyCode::Space));
        })
        .unwrap();

    game.update(&frame(0.016)).unwrap();
    keyboard
        .with(|k| {
            assert!(!k.was_key_pressed_this_frame(KeyCode::Space));
            assert!(k.is_key_held_down(KeyCode::Space));
        })
        .unwrap();

    keyboard.with(|k| k.publish(InputEvent::KeyReleased { key: KeyCode::Space }));
    game.update(&frame(0.016)).unwrap();
    keyboard
        .with(|k| {
            assert!(k.is_key_up(KeyCode::Space));
            assert!(k.was_key_released_this_frame(KeyCode::Space));
        })
        .unwrap();
}

#[test]
fn test_devices_ignore_foreign_events() {
    let keyboard = Keyboard::new();
    let mouse = Mouse::new();
    keyboard.publish(InputEvent::MouseWheelScrolled { delta: 1.0 });
    mouse.publish(InputEvent::KeyPressed { key: KeyCode::A });

    let mut game = Game::new(Box::new(HeadlessGraphics::new(64, 64)));
    let keyboard = game.add_component(keyboard);
    let mouse = game.add_component(mouse);
    game.update(&frame(0.016)).unwrap();

    assert_eq!(keyboard.with(|k| k.is_key_down(KeyCode::A)), Some(false));
    assert_eq!(mouse.with(|m| m.wheel()), Some(0.0));
}

#[test]
fn test_mouse_deltas_reset_each_frame() {
    let mut game = Game::new(Box::new(HeadlessGraphics::new(64, 64)));
    let mouse = game.add_service_component(Mouse::new());

    mouse.with(|m| {
        m.publish(InputEvent::MouseMoved {
            delta_x: 3.0,
            delta_y: -1.0,
        });
        m.publish(InputEvent::MouseMoved {
            delta_x: 2.0,
            delta_y: 0.0,
        });
        m.publish(InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
        });
    });
    game.update(&frame(0.016)).unwrap();
    mouse
        .with(|m| {
            assert_relative_eq!(m.delta_x(), 5.0);
            assert_relative_eq!(m.delta_y(), -1.0);
            assert!(m.was_button_pressed_this_frame(MouseButton::Left));
        })
        .unwrap();

    game.update(&frame(0.016)).unwrap();
    mouse
        .with(|m| {
            assert_relative_eq!(m.delta_x(), 0.0);
            assert_relative_eq!(m.x(), 5.0);
            assert!(m.is_button_held_down(MouseButton::Left));
        })
        .unwrap();
}

#[test]
fn test_camera_moves_forward_with_w() {
    let mut game = Game::new(Box::new(HeadlessGraphics::new(64, 64)));
    let keyboard = game.add_service_component(Keyboard::new());
    game.add_service_component(Mouse::new());
    let camera = game.add_service_component(FirstPersonCamera::new(1.0));
    game.set_camera(Some(CameraRef::from(&camera)));
    game.initialize().unwrap();

    keyboard.with(|k| k.publish(InputEvent::KeyPressed { key: KeyCode::W }));
    game.update(&frame(0.5)).unwrap();

    let position = camera.with(|c| c.position()).unwrap();
    assert_relative_eq!(position.z, -5.0, epsilon = 1e-5);
    assert!(game.services().contains(ServiceKind::Camera));

    let through_ref = game.camera().and_then(CameraRef::position).unwrap();
    assert_eq!(through_ref, position);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
}
