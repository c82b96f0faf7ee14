use crate::vr_math::{Quaternion, Vector3};
use crate::{TrackedDeviceIndex, VRButtonId, VRControllerRawState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRButtonState {
    Released,
    Pressed,
}

impl Default for VRButtonState {
    fn default() -> VRButtonState {
        VRButtonState::Released
    }
}

impl From<bool> for VRButtonState {
    #[inline]
    fn from(pressed: bool) -> VRButtonState {
        if pressed {
            VRButtonState::Pressed
        } else {
            VRButtonState::Released
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRGamepadDPad {
    pub up: VRButtonState,
    pub down: VRButtonState,
    pub left: VRButtonState,
    pub right: VRButtonState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRControllerRole {
    Undefined,
    LeftHand,
    RightHand,
}

impl Default for VRControllerRole {
    fn default() -> VRControllerRole {
        VRControllerRole::Undefined
    }
}

// Engine-space pose of a tracked device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRPose {
    pub device_position: Vector3,
    pub device_rotation: Quaternion,
}

impl Default for VRPose {
    fn default() -> VRPose {
        VRPose {
            device_position: Vector3::zero(),
            device_rotation: Quaternion::identity(),
        }
    }
}

/// State of a hand controller for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VRControllerState {
    // Device slot this state was read from. Only meaningful within the frame.
    pub index: TrackedDeviceIndex,
    pub role: VRControllerRole,
    pub is_connected: bool,
    pub pose: VRPose,

    pub dpad: VRGamepadDPad,
    pub grip: VRButtonState,
    pub application_menu: VRButtonState,
    pub a: VRButtonState,
    pub trackpad_button: VRButtonState,
    pub trigger_button: VRButtonState,
    pub trackpad_touch: bool,

    // Analog trigger, 0.0 to 1.0.
    pub trigger: f32,
    // Trackpad position, -1.0 to 1.0 on both axes.
    pub trackpad: [f32; 2],
}

impl VRControllerState {
    /// Decodes the runtime's button masks and axes.
    pub fn from_raw(index: TrackedDeviceIndex,
                    role: VRControllerRole,
                    pose: VRPose,
                    raw: &VRControllerRawState)
                    -> VRControllerState {
        let trackpad = raw.axis[0];
        // Analog trigger data is in only the X axis
        let trigger = raw.axis[1];

        VRControllerState {
            index: index,
            role: role,
            is_connected: true,
            pose: pose,
            dpad: VRGamepadDPad {
                up: raw.is_pressed(VRButtonId::DPadUp).into(),
                down: raw.is_pressed(VRButtonId::DPadDown).into(),
                left: raw.is_pressed(VRButtonId::DPadLeft).into(),
                right: raw.is_pressed(VRButtonId::DPadRight).into(),
            },
            grip: raw.is_pressed(VRButtonId::Grip).into(),
            application_menu: raw.is_pressed(VRButtonId::ApplicationMenu).into(),
            a: raw.is_pressed(VRButtonId::A).into(),
            trackpad_button: raw.is_pressed(VRButtonId::Axis0).into(),
            trigger_button: raw.is_pressed(VRButtonId::Axis1).into(),
            trackpad_touch: raw.is_touched(VRButtonId::Axis0),
            trigger: trigger.x.max(0.0).min(1.0),
            trackpad: [trackpad.x.max(-1.0).min(1.0), trackpad.y.max(-1.0).min(1.0)],
        }
    }
}
