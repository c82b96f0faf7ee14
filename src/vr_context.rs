use crate::vr_compositor;
use crate::vr_device_reconciler;
use crate::{HmdPoseState, VRContextOptions, VRControllerState, VRDeviceFrame, VRDisplayInfo, VRError,
            VRPoseResolver, VRRenderTarget, VRRenderTargetAllocator, VRRenderTargetDescriptor, VRRuntime,
            VRTrackingReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextState {
    Created,
    Initialized,
    Disposed,
}

/// A VR session together with the two eye render targets.
///
/// Owned by a single camera and driven from one thread, once per frame:
/// `wait_for_poses`, `update_devices`, scene draw, `submit_frame`. The
/// runtime session and the render targets are released together, once,
/// by `dispose` or on drop.
pub struct VRContext {
    runtime: Box<dyn VRRuntime>,
    allocator: Box<dyn VRRenderTargetAllocator>,
    options: VRContextOptions,
    resolver: VRPoseResolver,
    display: Option<VRDisplayInfo>,
    left_eye: Option<VRRenderTarget>,
    right_eye: Option<VRRenderTarget>,
    devices: VRDeviceFrame,
    state: ContextState,
}

impl VRContext {
    // Never fails, a missing runtime just reports false.
    pub fn is_supported(runtime: &dyn VRRuntime) -> bool {
        runtime.is_hmd_present()
    }

    /// Starts the runtime session. Fails before any GPU allocation if the
    /// runtime or its compositor are not usable.
    pub fn new(mut runtime: Box<dyn VRRuntime>,
               allocator: Box<dyn VRRenderTargetAllocator>,
               options: VRContextOptions)
               -> Result<VRContext, VRError> {
        if let Err(e) = runtime.initialize() {
            error!("{}", e);
            return Err(e);
        }

        if !runtime.has_compositor() {
            error!("{}", VRError::CompositorUnavailable);
            runtime.shutdown();
            return Err(VRError::CompositorUnavailable);
        }

        Ok(VRContext {
            runtime: runtime,
            allocator: allocator,
            options: options,
            resolver: VRPoseResolver::new(),
            display: None,
            left_eye: None,
            right_eye: None,
            devices: VRDeviceFrame::default(),
            state: ContextState::Created,
        })
    }

    /// `new` followed by `initialize`.
    pub fn create(runtime: Box<dyn VRRuntime>,
                  allocator: Box<dyn VRRenderTargetAllocator>,
                  options: VRContextOptions)
                  -> Result<VRContext, VRError> {
        let mut context = VRContext::new(runtime, allocator, options)?;
        context.initialize()?;
        Ok(context)
    }

    /// Queries the display, allocates both eye render targets at the
    /// recommended size and builds the eye projections.
    ///
    /// Any failure releases the session: the context is not usable after an
    /// initialization error.
    pub fn initialize(&mut self) -> Result<&VRDisplayInfo, VRError> {
        match self.state {
            ContextState::Disposed => return Err(VRError::Disposed),
            ContextState::Initialized => {
                return self.display.as_ref().ok_or(VRError::NotInitialized);
            }
            ContextState::Created => {}
        }

        if let Err(e) = self.try_initialize() {
            error!("VR context initialization failed: {}", e);
            self.release();
            return Err(e);
        }
        self.state = ContextState::Initialized;
        self.display.as_ref().ok_or(VRError::NotInitialized)
    }

    fn try_initialize(&mut self) -> Result<(), VRError> {
        let display = self.resolver.initialize(&*self.runtime, self.options.z_near, self.options.z_far)?;

        let descriptor = VRRenderTargetDescriptor {
            format: self.options.eye_render_target_format,
            width: display.eye_width,
            height: display.eye_height,
            multisample: self.options.eye_render_target_sample_count,
        };
        descriptor.validate()?;

        if self.allocator.backend() != self.options.graphics_backend {
            return Err(VRError::InvalidRenderTarget(format!("allocator creates {:?} targets, {:?} requested",
                                                            self.allocator.backend(),
                                                            self.options.graphics_backend)));
        }

        self.left_eye = Some(self.allocator.allocate(&descriptor)?);
        self.right_eye = Some(self.allocator.allocate(&descriptor)?);

        info!("VR context ready on '{}': {}x{} per eye, {}x MSAA",
              display.device_name, display.eye_width, display.eye_height,
              descriptor.multisample.sample_count());
        self.display = Some(display);
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), VRError> {
        match self.state {
            ContextState::Initialized => Ok(()),
            ContextState::Created => Err(VRError::NotInitialized),
            ContextState::Disposed => Err(VRError::Disposed),
        }
    }

    pub fn options(&self) -> &VRContextOptions {
        &self.options
    }

    pub fn device_name(&self) -> Option<&str> {
        self.display.as_ref().map(|d| d.device_name.as_str())
    }

    pub fn display_info(&self) -> Option<&VRDisplayInfo> {
        self.display.as_ref()
    }

    pub fn left_eye_render_target(&self) -> Option<&VRRenderTarget> {
        self.left_eye.as_ref()
    }

    pub fn right_eye_render_target(&self) -> Option<&VRRenderTarget> {
        self.right_eye.as_ref()
    }

    /// Rebuilds both projections for new clip planes. Rejected planes keep
    /// the previous options and projections.
    pub fn update_projection_matrices(&mut self, z_near: f32, z_far: f32) -> Result<(), VRError> {
        if self.state == ContextState::Disposed {
            return Err(VRError::Disposed);
        }
        self.resolver.update_projection_matrices(&*self.runtime, z_near, z_far)?;
        self.options.z_near = z_near;
        self.options.z_far = z_far;
        Ok(())
    }

    /// Blocks until the compositor is ready for the next frame. This is the
    /// frame pacing point of the whole pipeline.
    pub fn wait_for_poses(&mut self) -> Result<HmdPoseState, VRError> {
        self.ensure_initialized()?;
        self.resolver.wait_for_poses(&mut *self.runtime)
    }

    /// Rebuilds the controller and tracking reference lists from the poses
    /// fetched by the last `wait_for_poses`.
    pub fn update_devices(&mut self) -> Result<&VRDeviceFrame, VRError> {
        self.ensure_initialized()?;
        self.devices = vr_device_reconciler::reconcile(&*self.runtime, self.resolver.device_poses());
        Ok(&self.devices)
    }

    pub fn devices(&self) -> &VRDeviceFrame {
        &self.devices
    }

    pub fn controllers(&self) -> &[VRControllerState] {
        self.devices.controllers()
    }

    pub fn left_controller_index(&self) -> Option<usize> {
        self.devices.left_controller_index()
    }

    pub fn right_controller_index(&self) -> Option<usize> {
        self.devices.right_controller_index()
    }

    pub fn tracking_references(&self) -> &[VRTrackingReference] {
        self.devices.tracking_references()
    }

    /// Hands both eye targets to the compositor.
    ///
    /// Returns `Ok(false)` when the compositor rejected the frame; the error
    /// is logged and the next frame proceeds normally. An unsupported
    /// graphics backend is a configuration error and is returned.
    pub fn submit_frame(&mut self) -> Result<bool, VRError> {
        self.ensure_initialized()?;
        let (left, right) = match (self.left_eye.as_ref(), self.right_eye.as_ref()) {
            (Some(left), Some(right)) => (left, right),
            _ => return Err(VRError::NotInitialized),
        };

        match vr_compositor::submit_frame(&mut *self.runtime, left, right) {
            Ok(()) => Ok(true),
            Err(e @ VRError::CompositorSubmit { .. }) => {
                error!("{}, dropping frame", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Releases the runtime session and both render targets.
    pub fn dispose(mut self) {
        self.release();
    }

    pub fn is_disposed(&self) -> bool {
        self.state == ContextState::Disposed
    }

    fn release(&mut self) {
        if self.state == ContextState::Disposed {
            return;
        }
        self.state = ContextState::Disposed;

        if let Some(target) = self.left_eye.take() {
            self.allocator.release(target);
        }
        if let Some(target) = self.right_eye.take() {
            self.allocator.release(target);
        }
        self.runtime.shutdown();
        self.devices = VRDeviceFrame::default();
        info!("VR context disposed");
    }
}

impl Drop for VRContext {
    fn drop(&mut self) {
        self.release();
    }
}
