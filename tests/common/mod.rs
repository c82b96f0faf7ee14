#![allow(dead_code)]

use rust_vr_context::api::mock::{MockAllocatorState, MockRenderTargetAllocator, MockVRInit,
                                 MockVRRuntime, MockVRState};
use rust_vr_context::vr_math::{Quaternion, Vector3};
use rust_vr_context::{TrackedDevicePose, VRContext, VRContextOptions, VRError, VRGraphicsBackend,
                      VRMultisampleLevel, VRRuntime, MAX_TRACKED_DEVICE_COUNT};
use std::sync::{Arc, Mutex};

pub const EPSILON: f32 = 1e-3;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_vec_eq(actual: Vector3, expected: Vector3) {
    assert!((actual - expected).length() < EPSILON,
            "{:?} != {:?}", actual, expected);
}

pub fn assert_same_rotation(a: Quaternion, b: Quaternion) {
    // q and -q describe the same rotation.
    let dot = a.i * b.i + a.j * b.j + a.k * b.k + a.r * b.r;
    assert!((dot.abs() - 1.0).abs() < EPSILON, "{:?} != {:?}", a, b);
}

pub fn initialized_runtime(init: MockVRInit) -> (MockVRRuntime, Arc<Mutex<MockVRState>>) {
    let mut runtime = MockVRRuntime::new(init);
    runtime.initialize().unwrap();
    let state = runtime.state_handle();
    (runtime, state)
}

pub fn fetch_poses(runtime: &mut MockVRRuntime) -> Vec<TrackedDevicePose> {
    let mut poses = vec![TrackedDevicePose::default(); MAX_TRACKED_DEVICE_COUNT as usize];
    runtime.wait_get_poses(&mut poses).unwrap();
    poses
}

pub fn vive_options() -> VRContextOptions {
    VRContextOptions::default()
        .with_sample_count(VRMultisampleLevel::X4)
        .with_backend(VRGraphicsBackend::DirectX11)
}

pub struct Session {
    pub runtime: Arc<Mutex<MockVRState>>,
    pub allocator: Arc<Mutex<MockAllocatorState>>,
}

pub fn create_context(init: MockVRInit,
                      options: VRContextOptions)
                      -> (Result<VRContext, VRError>, Session) {
    let runtime = MockVRRuntime::new(init);
    let allocator = MockRenderTargetAllocator::new(options.graphics_backend);
    let session = Session {
        runtime: runtime.state_handle(),
        allocator: allocator.state_handle(),
    };
    (VRContext::create(Box::new(runtime), Box::new(allocator), options), session)
}
