use thiserror::Error;
use crate::{TrackedDeviceIndex, VREye, VRGraphicsBackend};

/// Errors reported by the VR context and its collaborators.
///
/// Only the initialization variants and `UnsupportedBackend` are fatal.
/// Property, controller state and submit failures are absorbed by the
/// component that observes them so a bad frame never stops the loop.
#[derive(Debug, Error)]
pub enum VRError {
    #[error("Failed to initialize VR runtime: {0}")]
    RuntimeInit(String),

    #[error("Failed to access the VR compositor")]
    CompositorUnavailable,

    #[error("Invalid eye render target configuration: {0}")]
    InvalidRenderTarget(String),

    #[error("Failed to allocate eye render target: {0}")]
    RenderTargetAllocation(String),

    #[error("Invalid clip planes: near {z_near}, far {z_far}")]
    InvalidClipPlanes { z_near: f32, z_far: f32 },

    #[error("Renderer '{0:?}' is not yet supported")]
    UnsupportedBackend(VRGraphicsBackend),

    #[error("Failed to submit {eye:?} eye to the VR compositor: {reason}")]
    CompositorSubmit { eye: VREye, reason: String },

    #[error("Failed waiting for device poses: {0}")]
    PoseWait(String),

    #[error("Tracked device property query failed: {0}")]
    PropertyQuery(String),

    #[error("Controller state query failed for device {index}: {reason}")]
    ControllerState { index: TrackedDeviceIndex, reason: String },

    #[error("Invalid VREye: {0}")]
    InvalidEye(u32),

    #[error("VR context is not initialized")]
    NotInitialized,

    #[error("VR context has been disposed")]
    Disposed,
}
