//! Matrix conventions shared by the pose pipeline.
//!
//! Engine matrices are `euclid` transforms: row vectors, translation in
//! `m41..m43`, left-handed, centimeters. Runtime matrices are row-major
//! 3x4 arrays in a right-handed, meter-scaled tracking space.

use euclid::{Rotation3D, Transform3D, UnknownUnit, Vector3D};
use crate::HmdMatrix34;

pub type Matrix = Transform3D<f32, UnknownUnit, UnknownUnit>;
pub type Vector3 = Vector3D<f32, UnknownUnit>;
pub type Quaternion = Rotation3D<f32, UnknownUnit, UnknownUnit>;

// Runtime meters to engine centimeters.
pub const METERS_TO_ENGINE_UNITS: f32 = 100.0;

// Scale factors below this are treated as degenerate by `decompose`.
pub const DECOMPOSE_EPSILON: f32 = 1e-6;

// Maximum deviation from unit length a decomposed rotation is allowed
// before renormalization. `decompose` always returns a normalized rotation,
// this bounds the drift callers may observe when composing it back.
pub const ROTATION_NORM_TOLERANCE: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedTransform {
    pub scale: Vector3,
    pub rotation: Quaternion,
    pub translation: Vector3,
}

/// Converts a right-handed runtime pose into the engine's left-handed
/// convention. The third row and column flip sign; units are untouched.
pub fn hmd_matrix34_to_matrix(matrix: &HmdMatrix34) -> Matrix {
    let m = &matrix.m;
    Matrix::new( m[0][0],  m[1][0], -m[2][0], 0.0,
                 m[0][1],  m[1][1], -m[2][1], 0.0,
                -m[0][2], -m[1][2],  m[2][2], 0.0,
                 m[0][3],  m[1][3], -m[2][3], 1.0)
}

/// Inverse of `hmd_matrix34_to_matrix`. The projective column is dropped.
pub fn matrix_to_hmd_matrix34(matrix: &Matrix) -> HmdMatrix34 {
    HmdMatrix34 {
        m: [[ matrix.m11,  matrix.m21, -matrix.m31, matrix.m41],
            [ matrix.m12,  matrix.m22, -matrix.m32, matrix.m42],
            [-matrix.m13, -matrix.m23,  matrix.m33, -matrix.m43]],
    }
}

pub fn inverse_or_identity(matrix: &Matrix) -> Matrix {
    match matrix.inverse() {
        Some(inverse) => inverse,
        None => {
            warn!("Singular transform {:?}, using identity", matrix.to_array());
            Matrix::identity()
        }
    }
}

/// Splits an affine transform into scale, rotation and translation.
///
/// Returns `None` when any axis scale is below `DECOMPOSE_EPSILON`. The
/// rotation is renormalized before returning so repeated
/// compose/decompose cycles do not accumulate norm drift.
pub fn decompose(matrix: &Matrix) -> Option<DecomposedTransform> {
    let translation = Vector3::new(matrix.m41, matrix.m42, matrix.m43);

    let rows = [Vector3::new(matrix.m11, matrix.m12, matrix.m13),
                Vector3::new(matrix.m21, matrix.m22, matrix.m23),
                Vector3::new(matrix.m31, matrix.m32, matrix.m33)];
    let scale = Vector3::new(rows[0].length(), rows[1].length(), rows[2].length());
    if scale.x < DECOMPOSE_EPSILON || scale.y < DECOMPOSE_EPSILON || scale.z < DECOMPOSE_EPSILON {
        return None;
    }

    let basis = [rows[0] / scale.x, rows[1] / scale.y, rows[2] / scale.z];
    let rotation = basis_to_quat(&basis);

    Some(DecomposedTransform {
        scale: scale,
        rotation: rotation,
        translation: translation,
    })
}

/// Builds scale, then rotation, then translation.
pub fn compose(scale: Vector3, rotation: &Quaternion, translation: Vector3) -> Matrix {
    let x = rotation.transform_vector3d(Vector3::new(1.0, 0.0, 0.0)) * scale.x;
    let y = rotation.transform_vector3d(Vector3::new(0.0, 1.0, 0.0)) * scale.y;
    let z = rotation.transform_vector3d(Vector3::new(0.0, 0.0, 1.0)) * scale.z;
    Matrix::new(x.x, x.y, x.z, 0.0,
                y.x, y.y, y.z, 0.0,
                z.x, z.y, z.z, 0.0,
                translation.x, translation.y, translation.z, 1.0)
}

// Rows of an orthonormal row-vector basis to a unit quaternion.
// Picks the largest diagonal term to keep the square root well conditioned.
fn basis_to_quat(rows: &[Vector3; 3]) -> Quaternion {
    let (m11, m12, m13) = (rows[0].x, rows[0].y, rows[0].z);
    let (m21, m22, m23) = (rows[1].x, rows[1].y, rows[1].z);
    let (m31, m32, m33) = (rows[2].x, rows[2].y, rows[2].z);

    let trace = m11 + m22 + m33;
    let (x, y, z, w);
    if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        w = 0.25 * s;
        x = (m23 - m32) / s;
        y = (m31 - m13) / s;
        z = (m12 - m21) / s;
    } else if m11 >= m22 && m11 >= m33 {
        let s = (1.0 + m11 - m22 - m33).sqrt() * 2.0;
        w = (m23 - m32) / s;
        x = 0.25 * s;
        y = (m12 + m21) / s;
        z = (m13 + m31) / s;
    } else if m22 > m33 {
        let s = (1.0 + m22 - m11 - m33).sqrt() * 2.0;
        w = (m31 - m13) / s;
        x = (m12 + m21) / s;
        y = 0.25 * s;
        z = (m23 + m32) / s;
    } else {
        let s = (1.0 + m33 - m11 - m22).sqrt() * 2.0;
        w = (m12 - m21) / s;
        x = (m13 + m31) / s;
        y = (m23 + m32) / s;
        z = 0.25 * s;
    }

    Quaternion::quaternion(x, y, z, w).normalize()
}

/// Left-handed off-center perspective projection mapping depth to [0, 1].
pub fn perspective_off_center(left: f32, right: f32, bottom: f32, top: f32,
                              z_near: f32, z_far: f32) -> Matrix {
    let z_range = z_far / (z_far - z_near);
    Matrix::new(2.0 * z_near / (right - left), 0.0, 0.0, 0.0,
                0.0, 2.0 * z_near / (top - bottom), 0.0, 0.0,
                (left + right) / (left - right), (top + bottom) / (bottom - top), z_range, 1.0,
                0.0, 0.0, -z_near * z_range, 0.0)
}

/// Left-handed look-at view matrix.
pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Matrix {
    let z = (target - eye).normalize();
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Matrix::new(x.x, y.x, z.x, 0.0,
                x.y, y.y, z.y, 0.0,
                x.z, y.z, z.z, 0.0,
                -x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0)
}

pub fn quat_norm(rotation: &Quaternion) -> f32 {
    (rotation.i * rotation.i + rotation.j * rotation.j +
     rotation.k * rotation.k + rotation.r * rotation.r).sqrt()
}

// Returns the current time in milliseconds
pub fn timestamp() -> f64 {
    let timespec = time::get_time();
    timespec.sec as f64 * 1000.0 + (timespec.nsec as f64 * 1e-6)
}
