use crate::vr_math::{Quaternion, Vector3};
use crate::TrackedDeviceIndex;

// Stationary base station. Rebuilt every frame, no identity across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VRTrackingReference {
    pub index: TrackedDeviceIndex,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub is_connected: bool,
}
