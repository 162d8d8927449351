//! Transform stage: model space to homogeneous clip space

use super::math::{mat4_mul, mat4_transform_vec4, Mat4, Vec4};
use super::types::{ClipVertex, Vertex};

/// Combined `projection x view_model` matrix
pub fn combined_transform(projection: &Mat4, view_model: &Mat4) -> Mat4 {
    mat4_mul(projection, view_model)
}

/// Apply `m` to the vertex position with an implicit w of 1.
/// Color and texture coordinates pass through.
pub fn transform_vertex(m: &Mat4, v: &Vertex) -> ClipVertex {
    ClipVertex {
        position: mat4_transform_vec4(m, Vec4::from_point(v.position.xyz())),
        color: v.color,
        texcoords: v.texcoords,
    }
}

/// Transform a whole vertex list into `out` (cleared first)
pub fn transform_vertices(m: &Mat4, vertices: &[Vertex], out: &mut Vec<ClipVertex>) {
    out.clear();
    out.extend(vertices.iter().map(|v| transform_vertex(m, v)));
}
