use crate::vr_math::{self, Matrix, Quaternion, Vector3};
use crate::VREye;

/// Resolved head and eye state for a single frame.
///
/// Positions are in engine units, rotations are unit quaternions and the
/// projections are left-handed. Produced by `VRPoseResolver::wait_for_poses`
/// and meant to be read once, then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HmdPoseState {
    // Milliseconds, see `vr_math::timestamp`.
    pub timestamp: f64,
    pub left_eye_projection: Matrix,
    pub right_eye_projection: Matrix,
    pub left_eye_position: Vector3,
    pub right_eye_position: Vector3,
    pub left_eye_rotation: Quaternion,
    pub right_eye_rotation: Quaternion,
    // None when the HMD pose was not valid for this frame.
    pub head_position: Option<Vector3>,
    pub head_rotation: Option<Quaternion>,
}

impl HmdPoseState {
    pub fn eye_position(&self, eye: VREye) -> Vector3 {
        match eye {
            VREye::Left => self.left_eye_position,
            VREye::Right => self.right_eye_position,
        }
    }

    pub fn eye_rotation(&self, eye: VREye) -> Quaternion {
        match eye {
            VREye::Left => self.left_eye_rotation,
            VREye::Right => self.right_eye_rotation,
        }
    }

    pub fn eye_projection(&self, eye: VREye) -> Matrix {
        match eye {
            VREye::Left => self.left_eye_projection,
            VREye::Right => self.right_eye_projection,
        }
    }

    /// Eye view matrix for rendering, with the eye moved by `position_offset`
    /// (typically the camera anchor's world position) and the eye rotation
    /// applied to `forward` and `up`.
    pub fn create_view(&self, eye: VREye, position_offset: Vector3, forward: Vector3, up: Vector3) -> Matrix {
        let position = self.eye_position(eye) + position_offset;
        let rotation = self.eye_rotation(eye);
        let forward = rotation.transform_vector3d(forward);
        let up = rotation.transform_vector3d(up);
        vr_math::look_at(position, position + forward, up)
    }

    /// World-space forward direction of an eye for the engine's +Z forward.
    pub fn eye_direction(&self, eye: VREye) -> Vector3 {
        self.eye_rotation(eye).transform_vector3d(Vector3::new(0.0, 0.0, 1.0))
    }
}
