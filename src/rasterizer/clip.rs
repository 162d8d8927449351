//! Homogeneous clip-space clipping
//!
//! Sutherland-Hodgman against the canonical volume `-w <= x, y, z <= w`,
//! one plane at a time. Every triangle in the working list is clipped
//! against a plane before moving on to the next, and each clipped polygon
//! is re-triangulated immediately, so the working list is always a plain
//! triangle list.

use super::types::ClipVertex;
use super::math::Vec4;

/// One of the six clip-volume half-spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipPlane {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl ClipPlane {
    /// Order the clipper walks the planes in
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::PosX,
        ClipPlane::NegX,
        ClipPlane::PosY,
        ClipPlane::NegY,
        ClipPlane::PosZ,
        ClipPlane::NegZ,
    ];

    fn coord(self, p: Vec4) -> f32 {
        match self {
            ClipPlane::PosX | ClipPlane::NegX => p.x,
            ClipPlane::PosY | ClipPlane::NegY => p.y,
            ClipPlane::PosZ | ClipPlane::NegZ => p.z,
        }
    }

    fn is_positive(self) -> bool {
        matches!(self, ClipPlane::PosX | ClipPlane::PosY | ClipPlane::PosZ)
    }

    /// Signed distance to the plane in homogeneous units; `>= 0` is inside.
    /// `w - coord` for the "+" planes, `w + coord` for the "-" planes.
    pub fn distance(self, p: Vec4) -> f32 {
        if self.is_positive() {
            p.w - self.coord(p)
        } else {
            p.w + self.coord(p)
        }
    }

    /// `coord <= w` for "+" planes, `coord >= -w` for "-" planes
    pub fn contains(self, p: Vec4) -> bool {
        self.distance(p) >= 0.0
    }

    /// Pin `w` to the clipped coordinate so the point lies exactly on the plane
    fn snap_w(self, p: &mut Vec4) {
        let c = self.coord(*p);
        p.w = if self.is_positive() { c } else { -c };
    }
}

/// Intersect edge `inside -> outside` with `plane`.
///
/// Bumps `negative_w` when either endpoint sits behind the eye (w < 0); such
/// edges are clipped as-is.
fn intersect(inside: &ClipVertex, outside: &ClipVertex, plane: ClipPlane, negative_w: &mut usize) -> ClipVertex {
    if inside.position.w < 0.0 || outside.position.w < 0.0 {
        log::warn!(
            "clipping edge with negative w against {:?}: inside w = {}, outside w = {}",
            plane,
            inside.position.w,
            outside.position.w
        );
        *negative_w += 1;
    }

    let d_in = plane.distance(inside.position);
    let d_out = plane.distance(outside.position);

    let mut t = d_out / (d_out - d_in);
    if !t.is_finite() {
        log::warn!("degenerate clip edge against {:?} (d_in = {}, d_out = {})", plane, d_in, d_out);
        t = 1.0;
    }
    let t = t.clamp(0.0, 1.0);

    let mut v = inside.lerp_toward(outside, t);
    plane.snap_w(&mut v.position);
    v
}

/// Clip one triangle against one plane, appending 0, 1 or 2 triangles to `out`.
/// Winding order of the input is preserved. Returns how many intersections
/// involved a negative-w endpoint.
pub fn clip_triangle(tri: &[ClipVertex; 3], plane: ClipPlane, out: &mut Vec<ClipVertex>) -> usize {
    let inside = [
        plane.contains(tri[0].position),
        plane.contains(tri[1].position),
        plane.contains(tri[2].position),
    ];

    match inside {
        [false, false, false] => 0,
        [true, true, true] => {
            out.extend_from_slice(tri);
            0
        }

        [false, true, true] => clip_one_outside(tri, 0, plane, out),
        [true, false, true] => clip_one_outside(tri, 1, plane, out),
        [true, true, false] => clip_one_outside(tri, 2, plane, out),

        [true, false, false] => clip_two_outside(tri, 0, plane, out),
        [false, true, false] => clip_two_outside(tri, 1, plane, out),
        [false, false, true] => clip_two_outside(tri, 2, plane, out),
    }
}

/// Starting at `i` keeps the winding: (i, i+1, i+2) mod 3
fn rotated(tri: &[ClipVertex; 3], i: usize) -> (ClipVertex, ClipVertex, ClipVertex) {
    (tri[i], tri[(i + 1) % 3], tri[(i + 2) % 3])
}

/// Quad case: the outside vertex `c` becomes two intersections, fanned from `a`
fn clip_one_outside(tri: &[ClipVertex; 3], outside_idx: usize, plane: ClipPlane, out: &mut Vec<ClipVertex>) -> usize {
    let mut negative_w = 0;
    let (c, a, b) = rotated(tri, outside_idx);
    let p = intersect(&b, &c, plane, &mut negative_w);
    let q = intersect(&a, &c, plane, &mut negative_w);
    out.extend_from_slice(&[a, b, p, a, p, q]);
    negative_w
}

/// Only `a` survives; its two edges are cut short
fn clip_two_outside(tri: &[ClipVertex; 3], inside_idx: usize, plane: ClipPlane, out: &mut Vec<ClipVertex>) -> usize {
    let mut negative_w = 0;
    let (a, b, c) = rotated(tri, inside_idx);
    let p = intersect(&a, &b, plane, &mut negative_w);
    let q = intersect(&a, &c, plane, &mut negative_w);
    out.extend_from_slice(&[a, p, q]);
    negative_w
}

/// Six-plane clipper with double-buffered working lists.
///
/// Keep one around and reuse it; the buffers keep their capacity between calls.
#[derive(Debug, Default)]
pub struct Clipper {
    front: Vec<ClipVertex>,
    back: Vec<ClipVertex>,
}

impl Clipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip a triangle list (any trailing partial triangle is ignored).
    /// The result is available from [`Clipper::output`]; the return value
    /// counts intersections that involved a negative-w endpoint.
    pub fn clip(&mut self, triangles: &[ClipVertex]) -> usize {
        let mut negative_w = 0;
        let complete = triangles.len() - triangles.len() % 3;

        self.front.clear();
        self.front.extend_from_slice(&triangles[..complete]);

        for plane in ClipPlane::ALL {
            if self.front.is_empty() {
                break;
            }

            self.back.clear();
            for tri in self.front.chunks_exact(3) {
                negative_w += clip_triangle(&[tri[0], tri[1], tri[2]], plane, &mut self.back);
            }
            std::mem::swap(&mut self.front, &mut self.back);
        }

        negative_w
    }

    /// Triangle list produced by the last [`Clipper::clip`] call
    pub fn output(&self) -> &[ClipVertex] {
        &self.front
    }
}

/// One-shot convenience around [`Clipper`]
pub fn clip_triangle_list(triangles: &[ClipVertex]) -> Vec<ClipVertex> {
    let mut clipper = Clipper::new();
    clipper.clip(triangles);
    clipper.front
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::{Vec2, Vec3};
    use approx::assert_relative_eq;

    fn cv(x: f32, y: f32, z: f32, w: f32) -> ClipVertex {
        ClipVertex {
            position: Vec4::new(x, y, z, w),
            color: Vec3::new(1.0, 0.0, 0.0),
            texcoords: Vec2::new(0.0, 0.0),
        }
    }

    fn inside_volume(v: &ClipVertex) -> bool {
        let eps = 1e-5;
        let p = v.position;
        p.x <= p.w + eps && p.x >= -p.w - eps
            && p.y <= p.w + eps && p.y >= -p.w - eps
            && p.z <= p.w + eps && p.z >= -p.w - eps
    }

    /// Signed 2D area after perspective divide (positive = clockwise, y down)
    fn screen_area(tri: &[ClipVertex]) -> f32 {
        let p: Vec<(f32, f32)> = tri
            .iter()
            .map(|v| (v.position.x / v.position.w, -v.position.y / v.position.w))
            .collect();
        (p[1].0 - p[0].0) * (p[2].1 - p[0].1) - (p[1].1 - p[0].1) * (p[2].0 - p[0].0)
    }

    #[test]
    fn test_inside_triangle_passes_unmodified() {
        let tri = [cv(-0.5, -0.5, 0.0, 1.0), cv(0.0, 0.5, 0.2, 1.0), cv(0.5, -0.5, -0.3, 1.0)];
        let out = clip_triangle_list(&tri);
        assert_eq!(out, tri.to_vec());
    }

    #[test]
    fn test_triangle_on_boundary_is_inside() {
        let tri = [cv(-1.0, -1.0, -1.0, 1.0), cv(0.0, 1.0, 1.0, 1.0), cv(1.0, -1.0, 0.0, 1.0)];
        assert_eq!(clip_triangle_list(&tri), tri.to_vec());
    }

    /// Vertex at `along` on the plane's axis (pointing out of the volume
    /// through `plane`) and `across` on a perpendicular axis, w = 1
    fn toward(plane: ClipPlane, along: f32, across: f32) -> ClipVertex {
        let sign = if plane.is_positive() { 1.0 } else { -1.0 };
        let mut v = cv(0.0, 0.0, 0.0, 1.0);
        match plane {
            ClipPlane::PosX | ClipPlane::NegX => {
                v.position.x = sign * along;
                v.position.y = across;
            }
            ClipPlane::PosY | ClipPlane::NegY => {
                v.position.y = sign * along;
                v.position.z = across;
            }
            ClipPlane::PosZ | ClipPlane::NegZ => {
                v.position.z = sign * along;
                v.position.x = across;
            }
        }
        v
    }

    /// Signed area in the (plane axis, perpendicular axis) coordinates used by `toward`
    fn plane_area(plane: ClipPlane, tri: &[ClipVertex]) -> f32 {
        let p: Vec<(f32, f32)> = tri
            .iter()
            .map(|v| {
                let q = v.position;
                let across = match plane {
                    ClipPlane::PosX | ClipPlane::NegX => q.y,
                    ClipPlane::PosY | ClipPlane::NegY => q.z,
                    ClipPlane::PosZ | ClipPlane::NegZ => q.x,
                };
                (plane.coord(q), across)
            })
            .collect();
        (p[1].0 - p[0].0) * (p[2].1 - p[0].1) - (p[1].1 - p[0].1) * (p[2].0 - p[0].0)
    }

    fn rotations(tri: [ClipVertex; 3]) -> [[ClipVertex; 3]; 3] {
        [
            tri,
            [tri[1], tri[2], tri[0]],
            [tri[2], tri[0], tri[1]],
        ]
    }

    #[test]
    fn test_fully_outside_discarded_for_every_rotation() {
        for plane in ClipPlane::ALL {
            let outside = [toward(plane, 2.0, 0.0), toward(plane, 3.0, 0.5), toward(plane, 2.5, -0.5)];
            for tri in rotations(outside) {
                let mut out = Vec::new();
                assert_eq!(clip_triangle(&tri, plane, &mut out), 0);
                assert!(out.is_empty(), "{:?} kept an outside triangle", plane);
                assert!(clip_triangle_list(&tri).is_empty());
            }
        }
    }

    #[test]
    fn test_inside_kept_for_every_plane() {
        for plane in ClipPlane::ALL {
            let tri = [toward(plane, 0.5, 0.0), toward(plane, -0.5, 0.5), toward(plane, -0.5, -0.5)];
            let mut out = Vec::new();
            clip_triangle(&tri, plane, &mut out);
            assert_eq!(out, tri.to_vec(), "{:?} altered an inside triangle", plane);
        }
    }

    #[test]
    fn test_one_outside_split_for_every_plane() {
        for plane in ClipPlane::ALL {
            let base = [toward(plane, -0.5, -0.5), toward(plane, 2.0, 0.0), toward(plane, -0.5, 0.5)];
            for tri in rotations(base) {
                let mut out = Vec::new();
                clip_triangle(&tri, plane, &mut out);
                assert_eq!(out.len(), 6, "{:?}", plane);

                // New vertices land exactly on the plane
                assert_eq!(plane.distance(out[2].position), 0.0);
                assert_eq!(plane.distance(out[5].position), 0.0);
                for v in &out {
                    assert!(plane.contains(v.position));
                }

                let sign = plane_area(plane, &tri).signum();
                assert_relative_eq!(plane_area(plane, &out[0..3]).signum(), sign);
                assert_relative_eq!(plane_area(plane, &out[3..6]).signum(), sign);
            }
        }
    }

    #[test]
    fn test_two_outside_trimmed_for_every_plane() {
        for plane in ClipPlane::ALL {
            let base = [toward(plane, 0.0, 0.0), toward(plane, 3.0, -0.5), toward(plane, 3.0, 0.5)];
            for tri in rotations(base) {
                let mut out = Vec::new();
                clip_triangle(&tri, plane, &mut out);
                assert_eq!(out.len(), 3, "{:?}", plane);
                assert_eq!(out[0], base[0]);
                assert_eq!(plane.distance(out[1].position), 0.0);
                assert_eq!(plane.distance(out[2].position), 0.0);
                assert_relative_eq!(plane.coord(out[1].position).abs(), 1.0, epsilon = 1e-6);
                assert_relative_eq!(plane_area(plane, &out).signum(), plane_area(plane, &tri).signum());
            }
        }
    }

    #[test]
    fn test_one_vertex_outside_makes_two_triangles() {
        let tri = [cv(-0.5, -0.5, 0.0, 1.0), cv(2.0, 0.0, 0.0, 1.0), cv(-0.5, 0.5, 0.0, 1.0)];
        let out = clip_triangle_list(&tri);
        assert_eq!(out.len(), 6);
        for v in &out {
            assert!(inside_volume(v));
        }

        let sign = screen_area(&tri).signum();
        assert_relative_eq!(screen_area(&out[0..3]).signum(), sign);
        assert_relative_eq!(screen_area(&out[3..6]).signum(), sign);
    }

    #[test]
    fn test_two_vertices_outside_makes_one_triangle() {
        let tri = [cv(0.0, 0.0, 0.0, 1.0), cv(3.0, -0.5, 0.0, 1.0), cv(3.0, 0.5, 0.0, 1.0)];
        let out = clip_triangle_list(&tri);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], tri[0]);
        assert_relative_eq!(out[1].position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[2].position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(screen_area(&out).signum(), screen_area(&tri).signum());
    }

    #[test]
    fn test_intersection_lies_on_plane_and_interpolates_attributes() {
        let mut a = cv(0.0, 0.0, 0.0, 1.0);
        let mut b = cv(3.0, 0.0, 0.0, 1.0);
        a.color = Vec3::new(0.0, 0.0, 0.0);
        b.color = Vec3::new(1.0, 1.0, 1.0);
        a.texcoords = Vec2::new(0.0, 0.0);
        b.texcoords = Vec2::new(3.0, 0.0);

        let mut negative_w = 0;
        let v = intersect(&a, &b, ClipPlane::PosX, &mut negative_w);
        assert_eq!(negative_w, 0);
        assert_relative_eq!(v.position.x, 1.0, epsilon = 1e-6);
        assert_eq!(v.position.x, v.position.w);
        assert_relative_eq!(v.color.x, 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(v.texcoords.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_plane_snaps_w() {
        let a = cv(0.0, 0.0, 0.0, 1.0);
        let b = cv(0.0, 0.0, -4.0, 2.0);
        let mut negative_w = 0;
        let v = intersect(&a, &b, ClipPlane::NegZ, &mut negative_w);
        assert_eq!(v.position.z, -v.position.w);
        assert!(ClipPlane::NegZ.contains(v.position));
    }

    #[test]
    fn test_negative_w_is_counted() {
        let tri = [cv(0.0, 0.0, 0.0, 1.0), cv(0.0, 0.0, 3.0, -1.0), cv(0.5, 0.0, 0.0, 1.0)];
        let mut clipper = Clipper::new();
        let negative_w = clipper.clip(&tri);
        assert!(negative_w > 0);
        for v in clipper.output() {
            assert!(v.position.w >= -1e-6);
            assert!(v.position.x.is_finite() && v.position.w.is_finite());
        }
    }

    #[test]
    fn test_clipper_reuse_clears_previous_output() {
        let mut clipper = Clipper::new();
        let big = [cv(-3.0, -3.0, 0.0, 1.0), cv(0.0, 3.0, 0.0, 1.0), cv(3.0, -3.0, 0.0, 1.0)];
        clipper.clip(&big);
        assert!(clipper.output().len() > 3);

        let small = [cv(-0.1, -0.1, 0.0, 1.0), cv(0.0, 0.1, 0.0, 1.0), cv(0.1, -0.1, 0.0, 1.0)];
        clipper.clip(&small);
        assert_eq!(clipper.output(), &small[..]);
    }

    #[test]
    fn test_partial_triangle_ignored() {
        let verts = [cv(0.0, 0.0, 0.0, 1.0), cv(0.1, 0.0, 0.0, 1.0)];
        assert!(clip_triangle_list(&verts).is_empty());
    }
}
