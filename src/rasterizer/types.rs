//! Core types for the rasterizer

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use super::math::{Vec2, Vec3, Vec4};

/// RGB color (0-255 per channel), used for clearing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const CORNFLOWER: Color = Color { r: 0x64, g: 0x95, b: 0xed };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Framebuffer byte layout (B, G, R, A), always opaque
    pub fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, 0xff]
    }
}

/// Input vertex, in model space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Only x, y, z are read by the transform stage (w is taken as 1)
    pub position: Vec4,
    /// RGB, unit range intended but never clamped
    pub color: Vec3,
    pub texcoords: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec3, texcoords: Vec2) -> Self {
        Self {
            position: Vec4::from_point(position),
            color,
            texcoords,
        }
    }

    /// Untextured vertex
    pub fn colored(position: Vec3, color: Vec3) -> Self {
        Self::new(position, color, Vec2::default())
    }
}

/// Vertex after the transform stage, in homogeneous clip space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipVertex {
    pub position: Vec4,
    pub color: Vec3,
    pub texcoords: Vec2,
}

impl ClipVertex {
    /// Blend every attribute: `t` toward `self`, `1 - t` toward `other`
    pub fn lerp_toward(&self, other: &ClipVertex, t: f32) -> ClipVertex {
        ClipVertex {
            position: self.position.lerp_toward(other.position, t),
            color: self.color.lerp_toward(other.color, t),
            texcoords: self.texcoords.lerp_toward(other.texcoords, t),
        }
    }
}

/// Vertex in raster space, ready for scan conversion.
///
/// `color` and `texcoords` are pre-divided by clip w, `inv_w` is `1 / w`;
/// all three interpolate linearly across the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    /// NDC depth (z / w). The depth test uses `inv_w` instead; this is
    /// carried for callers that want the projected depth range.
    pub z: f32,
    pub inv_w: f32,
    pub color: Vec3,
    pub texcoords: Vec2,
}

impl ScreenVertex {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Fixed-function fragment settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// Fragments whose texel alpha is below this are discarded
    pub alpha_cutoff: f32,
    /// Weight of the texel when blended with the vertex color (0 = vertex only)
    pub texture_blend: f32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            alpha_cutoff: 0.5,
            texture_blend: 0.5,
        }
    }
}

/// Counters collected while drawing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles handed to the pipeline
    pub triangles_submitted: usize,
    /// Triangles left after clipping (a clipped triangle may become several)
    pub triangles_clipped: usize,
    /// Back-facing or zero-area triangles
    pub triangles_culled: usize,
    /// Triangles skipped because a vertex had no usable w
    pub triangles_degenerate: usize,
    pub fragments_written: usize,
    pub fragments_depth_rejected: usize,
    pub fragments_alpha_rejected: usize,
    /// Clip-plane intersections where an endpoint had w < 0
    pub negative_w_intersections: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: DrawStats) {
        self.triangles_submitted += other.triangles_submitted;
        self.triangles_clipped += other.triangles_clipped;
        self.triangles_culled += other.triangles_culled;
        self.triangles_degenerate += other.triangles_degenerate;
        self.fragments_written += other.fragments_written;
        self.fragments_depth_rejected += other.fragments_depth_rejected;
        self.fragments_alpha_rejected += other.fragments_alpha_rejected;
        self.negative_w_intersections += other.negative_w_intersections;
    }
}
