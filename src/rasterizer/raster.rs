//! Triangle scan conversion and the fixed-function fragment stage
//!
//! Edge-function rasterizer over the triangle's bounding box. Front faces
//! wind clockwise on screen; pixels are sampled at integer coordinates and
//! must be strictly inside all three edges (pixels exactly on an edge are
//! left alone, so a shared edge can leave a one-pixel seam).

use super::math::{edge_function, Vec2, Vec3};
use super::render::Framebuffer;
use super::texture::Texture;
use super::types::{DrawStats, RasterSettings, ScreenVertex};

/// Inclusive pixel range covered by `lo..=hi` after rounding, clamped to `[0, limit)`
fn pixel_span(lo: f32, hi: f32, limit: usize) -> Option<(usize, usize)> {
    if limit == 0 || !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let lo = lo.round().max(0.0);
    let hi = hi.round().min((limit - 1) as f32);
    if lo > hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}

/// Rasterize one viewport-mapped triangle into `fb`.
///
/// `texture` is `None` when nothing (or an empty texture) is bound.
pub fn rasterize_triangle(
    fb: &mut Framebuffer,
    tri: &[ScreenVertex; 3],
    texture: Option<&Texture>,
    settings: &RasterSettings,
    stats: &mut DrawStats,
) {
    let [v0, v1, v2] = tri;
    let (p0, p1, p2) = (v0.pos(), v1.pos(), v2.pos());

    // Back-face cull; also drops zero-area and NaN triangles
    let total_area = edge_function(p0, p1, p2);
    if !(total_area > 0.0) {
        stats.triangles_culled += 1;
        return;
    }

    let Some((min_x, max_x)) = pixel_span(v0.x.min(v1.x).min(v2.x), v0.x.max(v1.x).max(v2.x), fb.width) else {
        return;
    };
    let Some((min_y, max_y)) = pixel_span(v0.y.min(v1.y).min(v2.y), v0.y.max(v1.y).max(v2.y), fb.height) else {
        return;
    };

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32, y as f32);

            let area_v0_v1_p = edge_function(p0, p1, p);
            let area_v1_v2_p = edge_function(p1, p2, p);
            let area_v2_v0_p = edge_function(p2, p0, p);
            if area_v0_v1_p <= 0.0 || area_v1_v2_p <= 0.0 || area_v2_v0_p <= 0.0 {
                continue;
            }

            // w0 = 1 - w1 - w2 is folded into mix()
            let w1 = area_v2_v0_p / total_area;
            let w2 = area_v0_v1_p / total_area;
            let mix = |a0: f32, a1: f32, a2: f32| a0 + w1 * (a1 - a0) + w2 * (a2 - a0);

            let idx = y * fb.width + x;

            // Interpolated 1/w is linear on screen; its reciprocal is the view depth
            let depth = 1.0 / mix(v0.inv_w, v1.inv_w, v2.inv_w);
            if !(depth < fb.zbuffer[idx]) {
                stats.fragments_depth_rejected += 1;
                continue;
            }

            let texel = texture.and_then(|tex| {
                let u = mix(v0.texcoords.x, v1.texcoords.x, v2.texcoords.x) * depth;
                let v = mix(v0.texcoords.y, v1.texcoords.y, v2.texcoords.y) * depth;
                tex.sample(u, v)
            });

            let alpha = texel.map_or(1.0, |t| t[3]);
            if alpha < settings.alpha_cutoff {
                stats.fragments_alpha_rejected += 1;
                continue;
            }

            fb.zbuffer[idx] = depth;

            let mut color = Vec3::new(
                mix(v0.color.x, v1.color.x, v2.color.x),
                mix(v0.color.y, v1.color.y, v2.color.y),
                mix(v0.color.z, v1.color.z, v2.color.z),
            ) * depth;

            if let Some([b, g, r, _]) = texel {
                let k = settings.texture_blend;
                color = color * (1.0 - k) + Vec3::new(r, g, b) * k;
            }

            fb.write_color(idx, color);
            stats.fragments_written += 1;
        }
    }
}
