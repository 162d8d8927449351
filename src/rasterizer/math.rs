//! Vector and matrix math for the pipeline
//!
//! Matrices are row-major `[row][col]` and multiply column vectors,
//! so `mat4_mul(&projection, &view_model)` applies the view-model first.

use std::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// 2D Vector (texture coordinates, raster positions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Linear blend: `t` weights `self`, `1 - t` weights `other`
    pub fn lerp_toward(self, other: Vec2, t: f32) -> Vec2 {
        self.scale(t) + other.scale(1.0 - t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// 3D Vector (positions, RGB colors)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Linear blend: `t` weights `self`, `1 - t` weights `other`
    pub fn lerp_toward(self, other: Vec3, t: f32) -> Vec3 {
        self.scale(t) + other.scale(1.0 - t)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// Homogeneous 4D vector (clip-space positions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Promote a point to homogeneous form (w = 1)
    pub fn from_point(p: Vec3) -> Self {
        Self { x: p.x, y: p.y, z: p.z, w: 1.0 }
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn scale(self, s: f32) -> Vec4 {
        Vec4 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    /// Linear blend: `t` weights `self`, `1 - t` weights `other`
    pub fn lerp_toward(self, other: Vec4, t: f32) -> Vec4 {
        self.scale(t) + other.scale(1.0 - t)
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    fn add(self, other: Vec4) -> Vec4 {
        Vec4 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

/// Signed parallelogram area of (p1, p2, p): `(p2 - p1) x (p - p1)`.
///
/// Positive when `p` lies to the right of `p1 -> p2` in raster space (y down),
/// i.e. when (p1, p2, p) winds clockwise on screen.
#[inline]
pub fn edge_function(p1: Vec2, p2: Vec2, p: Vec2) -> f32 {
    let a = p2 - p1;
    let b = p - p1;
    a.x * b.y - a.y * b.x
}

// =============================================================================
// 4x4 Matrix operations (for transforms)
// =============================================================================

/// 4x4 transformation matrix type
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub fn mat4_identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Create translation matrix
pub fn mat4_translation(t: Vec3) -> Mat4 {
    [
        [1.0, 0.0, 0.0, t.x],
        [0.0, 1.0, 0.0, t.y],
        [0.0, 0.0, 1.0, t.z],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Create non-uniform scale matrix
pub fn mat4_scale(s: Vec3) -> Mat4 {
    [
        [s.x, 0.0, 0.0, 0.0],
        [0.0, s.y, 0.0, 0.0],
        [0.0, 0.0, s.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis (radians, right-handed)
pub fn mat4_rotation_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// OpenGL-style perspective projection (right-handed, depth mapped to [-1, 1]).
/// `fov_y` is in radians.
pub fn mat4_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = near - far;
    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) / range, (2.0 * far * near) / range],
        [0.0, 0.0, -1.0, 0.0],
    ]
}

/// Right-handed view matrix looking from `eye` toward `target`
pub fn mat4_look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = (target - eye).normalize();
    let side = forward.cross(up).normalize();
    let upward = side.cross(forward);
    [
        [side.x, side.y, side.z, -side.dot(eye)],
        [upward.x, upward.y, upward.z, -upward.dot(eye)],
        [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Multiply two 4x4 matrices
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transform a homogeneous vector by a 4x4 matrix
pub fn mat4_transform_vec4(m: &Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
        m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_relative_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert_relative_eq!(c.z, 1.0);
    }

    #[test]
    fn test_edge_function_sign_follows_screen_winding() {
        let a = Vec2::new(0.0, 4.0);
        let b = Vec2::new(2.0, 0.0);
        let c = Vec2::new(4.0, 4.0);
        // bottom-left -> top -> bottom-right is clockwise with y down
        assert_relative_eq!(edge_function(a, b, c), 16.0);
        assert_relative_eq!(edge_function(a, c, b), -16.0);
    }

    #[test]
    fn test_mat4_mul_identity() {
        let t = mat4_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mat4_mul(&mat4_identity(), &t), t);
        assert_eq!(mat4_mul(&t, &mat4_identity()), t);
    }

    #[test]
    fn test_mat4_applies_right_operand_first() {
        let scale = mat4_scale(Vec3::new(2.0, 2.0, 2.0));
        let translate = mat4_translation(Vec3::new(1.0, 0.0, 0.0));
        let m = mat4_mul(&translate, &scale);
        let p = mat4_transform_vec4(&m, Vec4::from_point(Vec3::new(1.0, 0.0, 0.0)));
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.w, 1.0);
    }

    #[test]
    fn test_rotation_y_turns_x_toward_negative_z() {
        let r = mat4_rotation_y(std::f32::consts::FRAC_PI_2);
        let p = mat4_transform_vec4(&r, Vec4::from_point(Vec3::new(1.0, 0.0, 0.0)));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let p = mat4_perspective(std::f32::consts::FRAC_PI_4, 1.0, 5.0, 20.0);
        let near = mat4_transform_vec4(&p, Vec4::new(0.0, 0.0, -5.0, 1.0));
        let far = mat4_transform_vec4(&p, Vec4::new(0.0, 0.0, -20.0, 1.0));
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(near.w, 5.0);
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let view = mat4_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::UP);
        let p = mat4_transform_vec4(&view, Vec4::from_point(Vec3::ZERO));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-5);
    }
}
