#![cfg(feature = "mock")]

mod common;

use common::{assert_vec_eq, create_context, init_logging, vive_options};
use rust_vr_context::api::mock::{MockRenderTargetAllocator, MockVRInit, MockVRRuntime};
use rust_vr_context::vr_math::Vector3;
use rust_vr_context::{HmdMatrix34, MirrorTextureEyeSource, TrackedDeviceClass, VRCamera, VRContext,
                      VRContextOptions, VRController, VRControllerRole, VREye, VRError, VRGraphicsBackend,
                      VRMultisampleLevel, VRTextureBounds, UNKNOWN_DEVICE_NAME};

#[test]
fn end_to_end_vive_frame() {
    init_logging();
    let (context, session) = create_context(MockVRInit::default(), vive_options());
    let mut context = context.unwrap();

    let info = context.display_info().unwrap().clone();
    assert_eq!((info.eye_width, info.eye_height), (1512, 1680));
    assert_eq!(context.device_name(), Some("Mock VRDisplay"));

    {
        let allocator = session.allocator.lock().unwrap();
        assert_eq!(allocator.allocations, 2);
        assert_eq!(allocator.live.len(), 2);
        for target in allocator.live.iter() {
            assert_eq!(target.size(), (1512, 1680));
            assert_eq!(target.descriptor.multisample, VRMultisampleLevel::X4);
        }
    }

    context.wait_for_poses().unwrap();
    context.update_devices().unwrap();
    assert_eq!(context.submit_frame().unwrap(), true);

    let runtime = session.runtime.lock().unwrap();
    assert_eq!(runtime.submissions.len(), 2);
    assert_eq!(runtime.submissions[0].eye, VREye::Left);
    assert_eq!(runtime.submissions[1].eye, VREye::Right);
    assert_eq!(runtime.submissions[0].frame, 1);
    assert_eq!(runtime.submissions[0].bounds, VRTextureBounds::full());
    assert_eq!(Some(&runtime.submissions[0].texture),
               context.left_eye_render_target().map(|t| &t.texture));
    assert_eq!(Some(&runtime.submissions[1].texture),
               context.right_eye_render_target().map(|t| &t.texture));
}

#[test]
fn unknown_device_name_does_not_fail_initialization() {
    let (context, _) = create_context(MockVRInit {
        device_name: None,
        ..Default::default()
    }, vive_options());
    assert_eq!(context.unwrap().device_name(), Some(UNKNOWN_DEVICE_NAME));
}

#[test]
fn zero_multisample_fails_before_allocation() {
    init_logging();
    let options = vive_options().with_sample_count(VRMultisampleLevel::None);
    let (context, session) = create_context(MockVRInit::default(), options);

    match context {
        Err(VRError::InvalidRenderTarget(_)) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    assert_eq!(session.allocator.lock().unwrap().allocations, 0);
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
}

#[test]
fn runtime_init_failure_is_fatal() {
    let (context, session) = create_context(MockVRInit {
        init_error: Some("no runtime installed".into()),
        ..Default::default()
    }, vive_options());

    match context {
        Err(VRError::RuntimeInit(ref reason)) => assert_eq!(reason, "no runtime installed"),
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    assert_eq!(session.allocator.lock().unwrap().allocations, 0);
}

#[test]
fn missing_compositor_is_fatal() {
    let (context, session) = create_context(MockVRInit {
        has_compositor: false,
        ..Default::default()
    }, vive_options());

    match context {
        Err(VRError::CompositorUnavailable) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    assert_eq!(session.allocator.lock().unwrap().allocations, 0);
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
}

#[test]
fn allocator_backend_must_match_options() {
    let runtime = MockVRRuntime::new(MockVRInit::default());
    let allocator = MockRenderTargetAllocator::new(VRGraphicsBackend::OpenGL);
    let allocations = allocator.state_handle();

    match VRContext::create(Box::new(runtime), Box::new(allocator), vive_options()) {
        Err(VRError::InvalidRenderTarget(_)) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    assert_eq!(allocations.lock().unwrap().allocations, 0);
}

#[test]
fn failed_allocation_disposes_the_context() {
    let runtime = MockVRRuntime::new(MockVRInit::default());
    let runtime_state = runtime.state_handle();
    let allocator = MockRenderTargetAllocator::new(VRGraphicsBackend::DirectX11);
    let allocations = allocator.state_handle();
    let mut context = VRContext::new(Box::new(runtime), Box::new(allocator), vive_options()).unwrap();

    allocations.lock().unwrap().unsupported_formats.push(VRContextOptions::default().eye_render_target_format);
    match context.initialize() {
        Err(VRError::RenderTargetAllocation(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(context.is_disposed());
    assert!(allocations.lock().unwrap().live.is_empty());
    assert_eq!(runtime_state.lock().unwrap().shutdown_count, 1);
}

#[test]
fn context_is_unusable_after_failed_initialization() {
    let runtime = MockVRRuntime::new(MockVRInit::default());
    let allocator = MockRenderTargetAllocator::new(VRGraphicsBackend::DirectX11);
    let options = vive_options().with_sample_count(VRMultisampleLevel::None);
    let mut context = VRContext::new(Box::new(runtime), Box::new(allocator), options).unwrap();

    assert!(context.initialize().is_err());
    match context.wait_for_poses() {
        Err(VRError::Disposed) => {}
        other => panic!("unexpected result {:?}", other),
    }
    match context.submit_frame() {
        Err(VRError::Disposed) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn frame_calls_need_initialization() {
    let runtime = MockVRRuntime::new(MockVRInit::default());
    let allocator = MockRenderTargetAllocator::new(VRGraphicsBackend::DirectX11);
    let mut context = VRContext::new(Box::new(runtime), Box::new(allocator), vive_options()).unwrap();

    match context.wait_for_poses() {
        Err(VRError::NotInitialized) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn rejected_frame_is_dropped_and_the_next_one_proceeds() {
    init_logging();
    let (context, session) = create_context(MockVRInit::default(), vive_options());
    let mut context = context.unwrap();

    session.runtime.lock().unwrap().submit_error = Some("texture usage".into());
    context.wait_for_poses().unwrap();
    assert_eq!(context.submit_frame().unwrap(), false);
    assert!(session.runtime.lock().unwrap().submissions.is_empty());

    session.runtime.lock().unwrap().submit_error = None;
    context.wait_for_poses().unwrap();
    assert_eq!(context.submit_frame().unwrap(), true);
    assert_eq!(session.runtime.lock().unwrap().submissions.len(), 2);
}

#[test]
fn unsupported_backend_fails_at_submit() {
    let options = vive_options().with_backend(VRGraphicsBackend::Vulkan);
    let (context, session) = create_context(MockVRInit::default(), options);
    let mut context = context.unwrap();

    context.wait_for_poses().unwrap();
    match context.submit_frame() {
        Err(VRError::UnsupportedBackend(VRGraphicsBackend::Vulkan)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(session.runtime.lock().unwrap().submissions.is_empty());
}

#[test]
fn dispose_releases_everything_once() {
    let (context, session) = create_context(MockVRInit::default(), vive_options());
    context.unwrap().dispose();

    let allocator = session.allocator.lock().unwrap();
    assert!(allocator.live.is_empty());
    assert_eq!(allocator.releases, 2);
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
}

#[test]
fn dropping_the_context_releases_the_session() {
    let (context, session) = create_context(MockVRInit::default(), vive_options());
    drop(context);
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
    assert!(session.allocator.lock().unwrap().live.is_empty());
}

#[test]
fn support_check_never_fails() {
    let present = MockVRRuntime::new(MockVRInit::default());
    let absent = MockVRRuntime::new(MockVRInit {
        hmd_present: false,
        init_error: Some("no runtime".into()),
        ..Default::default()
    });
    assert!(VRContext::is_supported(&present));
    assert!(!VRContext::is_supported(&absent));
}

#[test]
fn clip_plane_updates_are_kept_in_options() {
    let (context, _) = create_context(MockVRInit::default(), vive_options());
    let mut context = context.unwrap();
    context.update_projection_matrices(1.0, 100.0).unwrap();
    assert_eq!(context.options().z_near, 1.0);
    assert_eq!(context.options().z_far, 100.0);
}

#[test]
fn degenerate_clip_planes_are_rejected() {
    let (context, _) = create_context(MockVRInit::default(), vive_options());
    let mut context = context.unwrap();
    let before = context.wait_for_poses().unwrap().eye_projection(VREye::Left);

    for &(z_near, z_far) in [(10.0, 10.0), (0.0, 100.0)].iter() {
        match context.update_projection_matrices(z_near, z_far) {
            Err(VRError::InvalidClipPlanes { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
    assert_eq!(context.options().z_near, 0.1);
    assert_eq!(context.options().z_far, 20000.0);

    let after = context.wait_for_poses().unwrap().eye_projection(VREye::Left);
    assert_eq!(after, before);
    assert!(after.to_array().iter().all(|v| v.is_finite()));
}

#[test]
fn initialization_rejects_degenerate_clip_planes() {
    let (context, session) = create_context(MockVRInit::default(), vive_options().with_clip_planes(0.0, 100.0));
    match context {
        Err(VRError::InvalidClipPlanes { .. }) => {}
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }
    assert_eq!(session.allocator.lock().unwrap().allocations, 0);
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
}

fn camera() -> (VRCamera, common::Session) {
    let (context, session) = create_context(MockVRInit::default(), vive_options());
    (VRCamera::new(context.unwrap()), session)
}

#[test]
fn camera_renders_only_after_new_poses() {
    init_logging();
    let (mut camera, session) = camera();
    let mut drawn = Vec::new();

    assert_eq!(camera.render(|view, _| drawn.push(view.eye)).unwrap(), false);
    assert!(drawn.is_empty());

    camera.update().unwrap();
    assert!(camera.has_new_poses());
    assert_eq!(camera.render(|view, _| drawn.push(view.eye)).unwrap(), true);
    assert_eq!(drawn, vec![VREye::Left, VREye::Right]);
    assert!(!camera.has_new_poses());

    // No second submission of the same poses.
    assert_eq!(camera.render(|view, _| drawn.push(view.eye)).unwrap(), false);
    assert_eq!(session.runtime.lock().unwrap().submissions.len(), 2);
}

#[test]
fn camera_draws_into_matching_eye_targets() {
    let (mut camera, _) = camera();
    camera.update().unwrap();
    let left = camera.context().left_eye_render_target().unwrap().texture;
    let right = camera.context().right_eye_render_target().unwrap().texture;

    let mut targets = Vec::new();
    camera.render(|view, target| targets.push((view.eye, target.texture))).unwrap();
    assert_eq!(targets, vec![(VREye::Left, left), (VREye::Right, right)]);
}

#[test]
fn camera_eye_views_follow_the_anchor() {
    let (mut camera, _) = camera();
    camera.set_anchor_position(Vector3::new(500.0, 0.0, 0.0));
    camera.update().unwrap();

    // Mock headset stands at 1.6m, eyes 1.5cm in front of the head.
    let left = camera.eye_view(VREye::Left).unwrap();
    assert_vec_eq(left.position, Vector3::new(500.0 - 3.5949998, 160.0, -1.5));
    assert_vec_eq(left.direction, Vector3::new(0.0, 0.0, 1.0));
    let eye = left.view.transform_point3d(left.position.to_point()).unwrap();
    assert!(eye.to_vector().length() < 1e-2);
}

#[test]
fn camera_clip_planes_update_projections() {
    let (mut camera, _) = camera();
    camera.update().unwrap();
    let before = camera.eye_view(VREye::Right).unwrap().projection;

    camera.set_z_far(100.0).unwrap();
    assert_eq!(camera.z_far(), 100.0);
    camera.update().unwrap();
    assert_ne!(camera.eye_view(VREye::Right).unwrap().projection, before);
}

#[test]
fn camera_rejects_far_plane_at_near_plane() {
    let (mut camera, _) = camera();
    match camera.set_z_far(camera.z_near()) {
        Err(VRError::InvalidClipPlanes { .. }) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(camera.z_far(), 20000.0);
}

#[test]
fn camera_mirror_layout_follows_source() {
    let (mut camera, _) = camera();
    assert_eq!(camera.mirror_source(), MirrorTextureEyeSource::BothEyes);
    assert_eq!(camera.mirror_layout((1920.0, 1080.0)).len(), 2);

    camera.set_mirror_source(MirrorTextureEyeSource::LeftEye);
    let blits = camera.mirror_layout((1920.0, 1080.0));
    assert_eq!(blits.len(), 1);
    assert_eq!(blits[0].eye, VREye::Left);

    camera.set_mirror_source(MirrorTextureEyeSource::Off);
    assert!(camera.mirror_layout((1920.0, 1080.0)).is_empty());
}

#[test]
fn controller_follows_its_role_across_slots() {
    init_logging();
    let (mut camera, session) = camera();
    {
        let mut state = session.runtime.lock().unwrap();
        state.connect_device(2, TrackedDeviceClass::Controller, HmdMatrix34::from_translation(0.3, 1.0, 0.0));
        state.connect_device(3, TrackedDeviceClass::Controller, HmdMatrix34::from_translation(-0.3, 1.0, 0.0));
        state.left_hand = Some(3);
        state.right_hand = Some(2);
    }

    let mut left = VRController::new(VRControllerRole::LeftHand);
    left.update(camera.update().unwrap());
    assert!(left.is_connected());
    assert_eq!(left.state().index, 3);
    assert_vec_eq(left.local_position(), Vector3::new(-30.0, 100.0, 0.0));

    // Hands swapped by the runtime.
    {
        let mut state = session.runtime.lock().unwrap();
        state.left_hand = Some(2);
        state.right_hand = Some(3);
    }
    left.update(camera.update().unwrap());
    assert_eq!(left.state().index, 2);
    assert_vec_eq(left.local_position(), Vector3::new(30.0, 100.0, 0.0));

    // Lost tracking keeps the last transform.
    session.runtime.lock().unwrap().device_poses[2].pose_is_valid = false;
    left.update(camera.update().unwrap());
    assert!(!left.is_connected());
    assert_vec_eq(left.local_position(), Vector3::new(30.0, 100.0, 0.0));
}

#[test]
fn destroyed_camera_shuts_the_session_down() {
    let (camera, session) = camera();
    camera.destroy();
    assert_eq!(session.runtime.lock().unwrap().shutdown_count, 1);
}
