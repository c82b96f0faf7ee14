#[macro_use]
extern crate log;
#[cfg(feature = "serde-serialization")]
extern crate serde;
#[cfg(feature = "serde-serialization")]
#[macro_use]
extern crate serde_derive;

pub mod vr_eye;
pub mod vr_error;
pub mod vr_math;
pub mod vr_runtime;
pub mod vr_render_target;
pub mod vr_context_options;
pub mod hmd_pose_state;
pub mod vr_pose_resolver;
pub mod vr_controller_state;
pub mod vr_tracking_reference;
pub mod vr_device_reconciler;
pub mod vr_compositor;
pub mod vr_mirror;
pub mod vr_context;
pub mod vr_camera;
pub mod vr_controller;

pub use vr_eye::VREye;
pub use vr_error::VRError;
pub use vr_runtime::{HmdMatrix34, TrackedDeviceClass, TrackedDeviceIndex, TrackedDevicePose,
                     TrackedDeviceProperty, VRButtonId, VRControllerAxis, VRControllerRawState,
                     VRFrustumTangents, VRRuntime, MAX_TRACKED_DEVICE_COUNT, TRACKED_DEVICE_INDEX_HMD};
pub use vr_render_target::{VRGraphicsBackend, VRMultisampleLevel, VRPixelFormat, VRRenderTarget,
                           VRRenderTargetAllocator, VRRenderTargetDescriptor, VRTexture};
pub use vr_context_options::VRContextOptions;
pub use hmd_pose_state::HmdPoseState;
pub use vr_pose_resolver::{VRDisplayInfo, VRPoseResolver, UNKNOWN_DEVICE_NAME};
pub use vr_controller_state::{VRButtonState, VRControllerRole, VRControllerState, VRGamepadDPad, VRPose};
pub use vr_tracking_reference::VRTrackingReference;
pub use vr_device_reconciler::{VRDeviceFrame, VRDeviceRecord};
pub use vr_compositor::VRTextureBounds;
pub use vr_mirror::{MirrorBlit, MirrorRect, MirrorTextureEyeSource};
pub use vr_context::VRContext;
pub use vr_camera::{VRCamera, VREyeView};
pub use vr_controller::VRController;

pub mod api;
