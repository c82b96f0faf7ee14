use crate::vr_math::{self, METERS_TO_ENGINE_UNITS};
use crate::{TrackedDeviceClass, TrackedDeviceIndex, TrackedDevicePose, VRControllerRole, VRControllerState,
            VRPose, VRRuntime, VRTrackingReference};

/// One processed device slot for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum VRDeviceRecord {
    Hmd { index: TrackedDeviceIndex, pose: VRPose },
    Controller(VRControllerState),
    TrackingReference(VRTrackingReference),
    Other { index: TrackedDeviceIndex, class: TrackedDeviceClass },
}

/// Role-indexed device state for one frame.
///
/// Built fresh every frame and replaced wholesale. Controller indices are
/// only stable within the frame, consumers resolve by role each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VRDeviceFrame {
    records: Vec<VRDeviceRecord>,
    controllers: Vec<VRControllerState>,
    tracking_references: Vec<VRTrackingReference>,
    left_controller_index: Option<usize>,
    right_controller_index: Option<usize>,
}

impl VRDeviceFrame {
    pub fn from_records(records: Vec<VRDeviceRecord>) -> VRDeviceFrame {
        let mut frame = VRDeviceFrame::default();
        for record in &records {
            match *record {
                VRDeviceRecord::Controller(ref state) => {
                    let list_index = frame.controllers.len();
                    match state.role {
                        VRControllerRole::LeftHand => frame.left_controller_index = Some(list_index),
                        VRControllerRole::RightHand => frame.right_controller_index = Some(list_index),
                        VRControllerRole::Undefined => {}
                    }
                    frame.controllers.push(*state);
                }
                VRDeviceRecord::TrackingReference(ref reference) => {
                    frame.tracking_references.push(*reference);
                }
                VRDeviceRecord::Hmd { .. } | VRDeviceRecord::Other { .. } => {}
            }
        }
        frame.records = records;
        frame
    }

    pub fn records(&self) -> &[VRDeviceRecord] {
        &self.records
    }

    pub fn controllers(&self) -> &[VRControllerState] {
        &self.controllers
    }

    pub fn tracking_references(&self) -> &[VRTrackingReference] {
        &self.tracking_references
    }

    pub fn left_controller_index(&self) -> Option<usize> {
        self.left_controller_index
    }

    pub fn right_controller_index(&self) -> Option<usize> {
        self.right_controller_index
    }

    pub fn controller(&self, role: VRControllerRole) -> Option<&VRControllerState> {
        let index = match role {
            VRControllerRole::LeftHand => self.left_controller_index,
            VRControllerRole::RightHand => self.right_controller_index,
            VRControllerRole::Undefined => None,
        };
        index.and_then(|i| self.controllers.get(i))
    }
}

/// Classifies every device slot that is connected and tracked.
///
/// A slot must be both connected and pose-valid to be reported. A failed
/// controller state query drops that controller for this frame only.
pub fn reconcile(runtime: &dyn VRRuntime, poses: &[TrackedDevicePose]) -> VRDeviceFrame {
    let left_hand = runtime.controller_role_index(VRControllerRole::LeftHand);
    let right_hand = runtime.controller_role_index(VRControllerRole::RightHand);

    let mut records = Vec::new();
    for (slot, raw_pose) in poses.iter().enumerate() {
        if !raw_pose.device_is_connected || !raw_pose.pose_is_valid {
            continue;
        }
        let index = slot as TrackedDeviceIndex;
        let pose = engine_pose(raw_pose);

        let record = match runtime.tracked_device_class(index) {
            TrackedDeviceClass::HMD => VRDeviceRecord::Hmd { index: index, pose: pose },
            TrackedDeviceClass::Controller => {
                let raw = match runtime.controller_state(index) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("Skipping controller {} this frame: {}", index, e);
                        continue;
                    }
                };
                let role = if Some(index) == left_hand {
                    VRControllerRole::LeftHand
                } else if Some(index) == right_hand {
                    VRControllerRole::RightHand
                } else {
                    VRControllerRole::Undefined
                };
                VRDeviceRecord::Controller(VRControllerState::from_raw(index, role, pose, &raw))
            }
            TrackedDeviceClass::TrackingReference => {
                VRDeviceRecord::TrackingReference(VRTrackingReference {
                    index: index,
                    position: pose.device_position,
                    orientation: pose.device_rotation,
                    is_connected: true,
                })
            }
            class => VRDeviceRecord::Other { index: index, class: class },
        };
        records.push(record);
    }

    let frame = VRDeviceFrame::from_records(records);
    trace!("Reconciled {} controllers, {} tracking references",
           frame.controllers.len(), frame.tracking_references.len());
    frame
}

// Same handedness and unit conversion as the HMD pose.
fn engine_pose(raw: &TrackedDevicePose) -> VRPose {
    let matrix = vr_math::hmd_matrix34_to_matrix(&raw.device_to_absolute_tracking);
    match vr_math::decompose(&matrix) {
        Some(parts) => VRPose {
            device_position: parts.translation * METERS_TO_ENGINE_UNITS,
            device_rotation: parts.rotation,
        },
        None => VRPose::default(),
    }
}
