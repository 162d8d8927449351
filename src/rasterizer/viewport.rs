//! Perspective divide and viewport mapping

use super::types::{ClipVertex, ScreenVertex};

/// Below this, w is treated as zero (the vertex sits on the eye plane)
const MIN_W: f32 = 1e-6;

/// Clip space -> NDC -> raster space.
///
/// x maps [-1, 1] to [0, width], y maps [-1, 1] to [height, 0]. Color and
/// texture coordinates come out divided by w alongside `1 / w`, so all of
/// them interpolate linearly in screen space. Returns `None` when w is not
/// usable.
pub fn to_screen(v: &ClipVertex, width: usize, height: usize) -> Option<ScreenVertex> {
    let w = v.position.w;
    if !w.is_finite() || w <= MIN_W {
        return None;
    }

    let inv_w = 1.0 / w;
    let ndc_x = v.position.x * inv_w;
    let ndc_y = v.position.y * inv_w;
    let ndc_z = v.position.z * inv_w;

    Some(ScreenVertex {
        x: (1.0 + ndc_x) * (width as f32 / 2.0),
        y: (1.0 - ndc_y) * (height as f32 / 2.0),
        z: ndc_z,
        inv_w,
        color: v.color.scale(inv_w),
        texcoords: v.texcoords.scale(inv_w),
    })
}

/// Map a clipped triangle; `None` if any vertex is degenerate
pub fn triangle_to_screen(tri: &[ClipVertex], width: usize, height: usize) -> Option<[ScreenVertex; 3]> {
    Some([
        to_screen(&tri[0], width, height)?,
        to_screen(&tri[1], width, height)?,
        to_screen(&tri[2], width, height)?,
    ])
}
