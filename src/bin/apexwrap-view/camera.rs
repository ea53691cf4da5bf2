//! Fixed perspective camera for the pyramid viewer.
//!
//! The camera itself never moves; the pyramid rotates under it via a model
//! yaw matrix. Eye and field of view match the framing the tool has always
//! used: slightly above and to the side, looking at the origin.

use std::f32::consts::PI;

/// Perspective camera looking at a fixed target.
pub struct ViewCamera {
    /// Eye position in world space.
    pub eye: [f32; 3],
    /// Point the camera looks at.
    pub target: [f32; 3],
    /// Field of view in radians.
    pub fov: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            eye: [2.0, 2.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov: 75.0 * PI / 180.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ViewCamera {
    /// Get combined view-projection matrix for the given aspect ratio.
    pub fn view_projection_matrix(&self, aspect: f32) -> [[f32; 4]; 4] {
        let view = look_at(self.eye, self.target, [0.0, 1.0, 0.0]);
        let proj = perspective(self.fov, aspect, self.near, self.far);
        mat4_mul(proj, view)
    }

    /// Direction the headlight shines: from the eye toward the target.
    pub fn light_dir(&self) -> [f32; 3] {
        normalize(sub(self.target, self.eye))
    }
}

/// Model matrix rotating the pyramid about the vertical axis.
pub fn yaw_matrix(yaw: f32) -> [[f32; 4]; 4] {
    let (s, c) = yaw.sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Create a look-at view matrix.
fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> [[f32; 4]; 4] {
    let f = normalize(sub(target, eye));
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        [s[0], u[0], -f[0], 0.0],
        [s[1], u[1], -f[1], 0.0],
        [s[2], u[2], -f[2], 0.0],
        [-dot(s, eye), -dot(u, eye), dot(f, eye), 1.0],
    ]
}

/// Create a perspective projection matrix.
fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Multiply two 4x4 matrices.
fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }
    result
}

// Vector operations
fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 1e-10 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 0.0, 1.0]
    }
}
