mod render_target;
mod runtime;

pub use self::render_target::{MockAllocatorState, MockRenderTargetAllocator};
pub use self::runtime::{MockSubmission, MockVRRuntime, MockVRState};

use std::sync::mpsc::{channel, Sender};
use crate::{HmdMatrix34, TrackedDeviceClass, TrackedDeviceIndex, TrackedDevicePose, VRControllerRawState,
            VRControllerRole, VREye, VRFrustumTangents};

/// How the simulated runtime comes up.
///
/// The default simulates a virtual HTC Vive.
#[derive(Debug, Clone, PartialEq)]
pub struct MockVRInit {
    // Some(reason) makes runtime initialization fail.
    pub init_error: Option<String>,
    pub hmd_present: bool,
    pub has_compositor: bool,
    pub render_size: (u32, u32),
    // None makes the device name property query fail.
    pub device_name: Option<String>,
    pub left_frustum: VRFrustumTangents,
    pub right_frustum: VRFrustumTangents,
    pub left_eye_to_head: HmdMatrix34,
    pub right_eye_to_head: HmdMatrix34,
}

impl Default for MockVRInit {
    fn default() -> MockVRInit {
        MockVRInit {
            init_error: None,
            hmd_present: true,
            has_compositor: true,
            render_size: (1512, 1680),
            device_name: Some("Mock VRDisplay".into()),
            left_frustum: VRFrustumTangents {
                left: -1.3979516,
                right: 1.2468426,
                top: -1.4726122,
                bottom: 1.4663741,
            },
            right_frustum: VRFrustumTangents {
                left: -1.2484229,
                right: 1.3954523,
                top: -1.4768855,
                bottom: 1.4612681,
            },
            left_eye_to_head: HmdMatrix34::from_translation(-0.035949998, 0.0, 0.015),
            right_eye_to_head: HmdMatrix34::from_translation(0.035949998, 0.0, 0.015),
        }
    }
}

pub enum MockVRControlMsg {
    ConnectDevice(TrackedDeviceIndex, TrackedDeviceClass, HmdMatrix34),
    SetDevicePose(TrackedDeviceIndex, TrackedDevicePose),
    DisconnectDevice(TrackedDeviceIndex),
    SetControllerState(TrackedDeviceIndex, Option<VRControllerRawState>),
    SetControllerRole(VRControllerRole, Option<TrackedDeviceIndex>),
    SetFrustum(VREye, VRFrustumTangents),
    SetSubmitError(Option<String>),
}

pub struct MockServiceCreator;

impl MockServiceCreator {
    pub fn new_runtime(init: MockVRInit) -> MockVRRuntime {
        MockVRRuntime::new(init)
    }

    /// A runtime plus a sender that feeds it control messages. Messages are
    /// applied at the start of the next `wait_get_poses`.
    pub fn new_runtime_with_remote(init: MockVRInit) -> (MockVRRuntime, Sender<MockVRControlMsg>) {
        let (send, rcv) = channel();
        (MockVRRuntime::new_with_receiver(rcv, init), send)
    }
}
