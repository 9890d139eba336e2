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

//! Named linear RGBA colors.

use glam::Vec4;

/// An RGBA color with components in `[0, 1]`.
pub type Color = Vec4;

/// Opaque black.
pub const BLACK: Color = Vec4::new(0.0, 0.0, 0.0, 1.0);
/// Opaque white.
pub const WHITE: Color = Vec4::new(1.0, 1.0, 1.0, 1.0);
/// Opaque red.
pub const RED: Color = Vec4::new(1.0, 0.0, 0.0, 1.0);
/// Opaque green.
pub const GREEN: Color = Vec4::new(0.0, 1.0, 0.0, 1.0);
/// Opaque blue.
pub const BLUE: Color = Vec4::new(0.0, 0.0, 1.0, 1.0);
/// Opaque yellow.
pub const YELLOW: Color = Vec4::new(1.0, 1.0, 0.0, 1.0);
/// The classic clear color.
pub const CORNFLOWER_BLUE: Color = Vec4::new(0.392, 0.584, 0.929, 1.0);
