use crate::vr_math::{self, Matrix, Quaternion, Vector3};
use crate::{VRControllerRole, VRControllerState, VRDeviceFrame};

/// Binds a hand role to an anchor transform.
///
/// The state is looked up by role on every update, never by list index,
/// since the controller list is rebuilt each frame.
#[derive(Debug, Clone)]
pub struct VRController {
    role: VRControllerRole,
    state: VRControllerState,
    local_position: Vector3,
    local_rotation: Quaternion,
}

impl VRController {
    pub fn new(role: VRControllerRole) -> VRController {
        VRController {
            role: role,
            state: VRControllerState::default(),
            local_position: Vector3::zero(),
            local_rotation: Quaternion::identity(),
        }
    }

    pub fn role(&self) -> VRControllerRole {
        self.role
    }

    pub fn set_role(&mut self, role: VRControllerRole) {
        self.role = role;
    }

    pub fn state(&self) -> &VRControllerState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected
    }

    /// Takes this frame's state for the bound role. The anchor keeps its
    /// last transform while the controller is missing.
    pub fn update(&mut self, frame: &VRDeviceFrame) {
        self.state = frame.controller(self.role).copied().unwrap_or_default();
        if self.state.is_connected {
            self.local_position = self.state.pose.device_position;
            self.local_rotation = self.state.pose.device_rotation;
        }
    }

    pub fn local_position(&self) -> Vector3 {
        self.local_position
    }

    pub fn local_rotation(&self) -> Quaternion {
        self.local_rotation
    }

    pub fn local_transform(&self) -> Matrix {
        vr_math::compose(Vector3::new(1.0, 1.0, 1.0), &self.local_rotation, self.local_position)
    }
}
