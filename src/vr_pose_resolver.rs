use crate::vr_context_options::validate_clip_planes;
use crate::vr_math::{self, Matrix, Quaternion, Vector3, METERS_TO_ENGINE_UNITS};
use crate::{HmdPoseState, TrackedDevicePose, TrackedDeviceProperty, VREye, VRError, VRFrustumTangents,
            VRRuntime, MAX_TRACKED_DEVICE_COUNT, TRACKED_DEVICE_INDEX_HMD};

pub const UNKNOWN_DEVICE_NAME: &str = "<Unknown Device>";

// Recommended eye size and display name reported at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VRDisplayInfo {
    pub eye_width: u32,
    pub eye_height: u32,
    pub device_name: String,
}

/// Converts the runtime's raw device poses into engine-space eye state.
///
/// Owns the per-frame pose buffer and the values that only change at
/// initialization (head-to-eye offsets) or when clip planes change
/// (projections).
pub struct VRPoseResolver {
    head_to_eye_left: Matrix,
    head_to_eye_right: Matrix,
    projection_left: Matrix,
    projection_right: Matrix,
    device_poses: Vec<TrackedDevicePose>,
    initialized: bool,
}

impl VRPoseResolver {
    pub fn new() -> VRPoseResolver {
        VRPoseResolver {
            head_to_eye_left: Matrix::identity(),
            head_to_eye_right: Matrix::identity(),
            projection_left: Matrix::identity(),
            projection_right: Matrix::identity(),
            device_poses: vec![TrackedDevicePose::default(); MAX_TRACKED_DEVICE_COUNT as usize],
            initialized: false,
        }
    }

    /// Reads the recommended eye size and device name, and caches the
    /// head-to-eye transforms. The offsets are only computed on the first call.
    pub fn initialize(&mut self,
                      runtime: &dyn VRRuntime,
                      z_near: f32,
                      z_far: f32)
                      -> Result<VRDisplayInfo, VRError> {
        validate_clip_planes(z_near, z_far)?;

        let device_name = match runtime.string_property(TRACKED_DEVICE_INDEX_HMD,
                                                         TrackedDeviceProperty::TrackingSystemName) {
            Ok(ref name) if !name.is_empty() => name.clone(),
            Ok(_) => {
                warn!("Empty device name reported, using {}", UNKNOWN_DEVICE_NAME);
                UNKNOWN_DEVICE_NAME.into()
            }
            Err(e) => {
                warn!("{}, using {}", e, UNKNOWN_DEVICE_NAME);
                UNKNOWN_DEVICE_NAME.into()
            }
        };

        let (eye_width, eye_height) = runtime.recommended_render_target_size();

        if !self.initialized {
            self.head_to_eye_left = head_to_eye(runtime, VREye::Left);
            self.head_to_eye_right = head_to_eye(runtime, VREye::Right);
            self.initialized = true;
        }

        self.update_projection_matrices(runtime, z_near, z_far)?;

        Ok(VRDisplayInfo {
            eye_width: eye_width,
            eye_height: eye_height,
            device_name: device_name,
        })
    }

    /// Rebuilds both eye projections from the raw frustum tangents.
    ///
    /// The runtime's own projection matrices use a fixed far plane and the
    /// wrong handedness, so they are never used. Invalid clip planes leave
    /// the current projections in place.
    pub fn update_projection_matrices(&mut self,
                                      runtime: &dyn VRRuntime,
                                      z_near: f32,
                                      z_far: f32)
                                      -> Result<(), VRError> {
        validate_clip_planes(z_near, z_far)?;
        debug!("Updating eye projections, near {} far {}", z_near, z_far);
        self.projection_left = projection_from_tangents(&runtime.projection_raw(VREye::Left), z_near, z_far);
        self.projection_right = projection_from_tangents(&runtime.projection_raw(VREye::Right), z_near, z_far);
        Ok(())
    }

    pub fn projection(&self, eye: VREye) -> Matrix {
        match eye {
            VREye::Left => self.projection_left,
            VREye::Right => self.projection_right,
        }
    }

    pub fn head_to_eye(&self, eye: VREye) -> Matrix {
        match eye {
            VREye::Left => self.head_to_eye_left,
            VREye::Right => self.head_to_eye_right,
        }
    }

    /// Blocks on the runtime until it accepts the next frame, then resolves
    /// the HMD pose into per-eye state.
    ///
    /// This is the only blocking call of the frame and paces the render loop
    /// to the compositor.
    pub fn wait_for_poses(&mut self, runtime: &mut dyn VRRuntime) -> Result<HmdPoseState, VRError> {
        runtime.wait_get_poses(&mut self.device_poses)?;
        Ok(self.resolve(&self.device_poses[TRACKED_DEVICE_INDEX_HMD as usize]))
    }

    /// Poses fetched by the last `wait_for_poses`, one per device slot.
    pub fn device_poses(&self) -> &[TrackedDevicePose] {
        &self.device_poses
    }

    /// Resolves a raw HMD pose. Head pose and eye views are derived
    /// independently from the same device-to-absolute transform.
    pub fn resolve(&self, hmd_pose: &TrackedDevicePose) -> HmdPoseState {
        let device_to_absolute = if hmd_pose.pose_is_valid {
            vr_math::hmd_matrix34_to_matrix(&hmd_pose.device_to_absolute_tracking)
        } else {
            Matrix::identity()
        };

        let (head_position, head_rotation) = if hmd_pose.pose_is_valid {
            match vr_math::decompose(&device_to_absolute) {
                Some(head) => (Some(head.translation * METERS_TO_ENGINE_UNITS), Some(head.rotation)),
                None => (None, None),
            }
        } else {
            (None, None)
        };

        let absolute_to_device = vr_math::inverse_or_identity(&device_to_absolute);
        let view_left = absolute_to_device.then(&self.head_to_eye_left);
        let view_right = absolute_to_device.then(&self.head_to_eye_right);

        let (left_eye_position, left_eye_rotation) = eye_world_pose(&view_left);
        let (right_eye_position, right_eye_rotation) = eye_world_pose(&view_right);

        HmdPoseState {
            timestamp: vr_math::timestamp(),
            left_eye_projection: self.projection_left,
            right_eye_projection: self.projection_right,
            left_eye_position: left_eye_position,
            right_eye_position: right_eye_position,
            left_eye_rotation: left_eye_rotation,
            right_eye_rotation: right_eye_rotation,
            head_position: head_position,
            head_rotation: head_rotation,
        }
    }
}

impl Default for VRPoseResolver {
    fn default() -> VRPoseResolver {
        VRPoseResolver::new()
    }
}

/// Off-center LH projection from raw tangents. Pure in its inputs.
pub fn projection_from_tangents(tangents: &VRFrustumTangents, z_near: f32, z_far: f32) -> Matrix {
    vr_math::perspective_off_center(tangents.left * z_near,
                                    tangents.right * z_near,
                                    -tangents.bottom * z_near,
                                    -tangents.top * z_near,
                                    z_near,
                                    z_far)
}

fn head_to_eye(runtime: &dyn VRRuntime, eye: VREye) -> Matrix {
    let eye_to_head = vr_math::hmd_matrix34_to_matrix(&runtime.eye_to_head_transform(eye));
    vr_math::inverse_or_identity(&eye_to_head)
}

// World position (engine units) and rotation of an eye from its view matrix.
fn eye_world_pose(view: &Matrix) -> (Vector3, Quaternion) {
    let eye_to_world = vr_math::inverse_or_identity(view);
    match vr_math::decompose(&eye_to_world) {
        Some(parts) => (parts.translation * METERS_TO_ENGINE_UNITS, parts.rotation),
        None => (Vector3::zero(), Quaternion::identity()),
    }
}
