use crate::{VRControllerRole, VREye, VRError, VRTexture, VRTextureBounds};

pub type TrackedDeviceIndex = u32;

// Number of device slots a runtime reports poses for.
pub const MAX_TRACKED_DEVICE_COUNT: u32 = 64;

// The HMD always occupies the first slot.
pub const TRACKED_DEVICE_INDEX_HMD: TrackedDeviceIndex = 0;

/// Row-major 3x4 rigid transform as produced by the runtime
/// (right-handed, meters).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct HmdMatrix34 {
    pub m: [[f32; 4]; 3],
}

impl HmdMatrix34 {
    pub fn identity() -> HmdMatrix34 {
        HmdMatrix34 {
            m: [[1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0]],
        }
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> HmdMatrix34 {
        let mut matrix = HmdMatrix34::identity();
        matrix.m[0][3] = x;
        matrix.m[1][3] = y;
        matrix.m[2][3] = z;
        matrix
    }
}

impl Default for HmdMatrix34 {
    fn default() -> HmdMatrix34 {
        HmdMatrix34::identity()
    }
}

// Raw projection tangents of an eye frustum, as returned by the runtime.
// Left and top are usually negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRFrustumTangents {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct TrackedDevicePose {
    pub device_to_absolute_tracking: HmdMatrix34,
    pub pose_is_valid: bool,
    pub device_is_connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum TrackedDeviceClass {
    Invalid,
    HMD,
    Controller,
    GenericTracker,
    TrackingReference,
    DisplayRedirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedDeviceProperty {
    TrackingSystemName,
}

// Bit positions of the runtime's button masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRButtonId {
    System = 0,
    ApplicationMenu = 1,
    Grip = 2,
    DPadLeft = 3,
    DPadUp = 4,
    DPadRight = 5,
    DPadDown = 6,
    A = 7,
    ProximitySensor = 31,
    Axis0 = 32,
    Axis1 = 33,
    Axis2 = 34,
    Axis3 = 35,
    Axis4 = 36,
}

impl VRButtonId {
    #[inline]
    pub fn mask(self) -> u64 {
        1u64 << (self as u32)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRControllerAxis {
    pub x: f32,
    pub y: f32,
}

/// Digital and analog state of a controller for one frame.
///
/// Axis 0 is the trackpad, axis 1 carries the analog trigger in `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRControllerRawState {
    pub packet_num: u32,
    pub button_pressed: u64,
    pub button_touched: u64,
    pub axis: [VRControllerAxis; 5],
}

impl VRControllerRawState {
    #[inline]
    pub fn is_pressed(&self, button: VRButtonId) -> bool {
        self.button_pressed & button.mask() != 0
    }

    #[inline]
    pub fn is_touched(&self, button: VRButtonId) -> bool {
        self.button_touched & button.mask() != 0
    }
}

/// The native VR session the context is built on.
///
/// Implementations wrap a runtime SDK. All calls happen on the thread that
/// owns the context, once per frame at most.
pub trait VRRuntime {
    /// Brings the session up. Called once, before any other query.
    fn initialize(&mut self) -> Result<(), VRError>;

    /// Whether a display is attached. Must not fail.
    fn is_hmd_present(&self) -> bool;

    fn has_compositor(&self) -> bool;

    fn recommended_render_target_size(&self) -> (u32, u32);

    fn projection_raw(&self, eye: VREye) -> VRFrustumTangents;

    fn eye_to_head_transform(&self, eye: VREye) -> HmdMatrix34;

    /// Blocks until the compositor is ready for the next frame and fills
    /// `poses` with one entry per device slot.
    fn wait_get_poses(&mut self, poses: &mut [TrackedDevicePose]) -> Result<(), VRError>;

    fn tracked_device_class(&self, index: TrackedDeviceIndex) -> TrackedDeviceClass;

    fn string_property(&self,
                       index: TrackedDeviceIndex,
                       property: TrackedDeviceProperty)
                       -> Result<String, VRError>;

    /// Slot currently holding the given hand role, if any.
    fn controller_role_index(&self, role: VRControllerRole) -> Option<TrackedDeviceIndex>;

    fn controller_state(&self, index: TrackedDeviceIndex) -> Result<VRControllerRawState, VRError>;

    fn submit(&mut self,
              eye: VREye,
              texture: &VRTexture,
              bounds: &VRTextureBounds)
              -> Result<(), VRError>;

    fn shutdown(&mut self);
}
