use crate::vr_math::{Matrix, Vector3};
use crate::vr_mirror::{self, MirrorBlit};
use crate::{MirrorTextureEyeSource, VRContext, VRDeviceFrame, VREye, VRError, VRRenderTarget};

// Everything one offscreen eye draw needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VREyeView {
    pub eye: VREye,
    pub view: Matrix,
    pub projection: Matrix,
    pub position: Vector3,
    pub direction: Vector3,
}

/// Drives a `VRContext` through the frame in a fixed order.
///
/// `update` waits for poses, reconciles devices and prepares both eye views.
/// `render` then draws each eye and submits. A render without a preceding
/// update does nothing, so a frame is never submitted twice.
pub struct VRCamera {
    context: VRContext,
    anchor_position: Vector3,
    mirror_source: MirrorTextureEyeSource,
    eye_views: Option<[VREyeView; 2]>,
    has_new_poses: bool,
}

impl VRCamera {
    pub fn new(context: VRContext) -> VRCamera {
        let mirror_source = context.options().mirror_source;
        VRCamera {
            context: context,
            anchor_position: Vector3::zero(),
            mirror_source: mirror_source,
            eye_views: None,
            has_new_poses: false,
        }
    }

    pub fn context(&self) -> &VRContext {
        &self.context
    }

    pub fn z_near(&self) -> f32 {
        self.context.options().z_near
    }

    pub fn z_far(&self) -> f32 {
        self.context.options().z_far
    }

    pub fn set_z_near(&mut self, z_near: f32) -> Result<(), VRError> {
        if z_near == self.z_near() {
            return Ok(());
        }
        let z_far = self.z_far();
        self.context.update_projection_matrices(z_near, z_far)
    }

    pub fn set_z_far(&mut self, z_far: f32) -> Result<(), VRError> {
        if z_far == self.z_far() {
            return Ok(());
        }
        let z_near = self.z_near();
        self.context.update_projection_matrices(z_near, z_far)
    }

    // World position the tracking space origin is attached to, engine units.
    pub fn set_anchor_position(&mut self, position: Vector3) {
        self.anchor_position = position;
    }

    pub fn mirror_source(&self) -> MirrorTextureEyeSource {
        self.mirror_source
    }

    pub fn set_mirror_source(&mut self, source: MirrorTextureEyeSource) {
        self.mirror_source = source;
    }

    pub fn update(&mut self) -> Result<&VRDeviceFrame, VRError> {
        let poses = self.context.wait_for_poses()?;

        let forward = Vector3::new(0.0, 0.0, 1.0);
        let up = Vector3::new(0.0, 1.0, 0.0);
        let anchor = self.anchor_position;
        let eye_view = |eye: VREye| VREyeView {
            eye: eye,
            view: poses.create_view(eye, anchor, forward, up),
            projection: poses.eye_projection(eye),
            position: poses.eye_position(eye) + anchor,
            direction: poses.eye_direction(eye),
        };
        self.eye_views = Some([eye_view(VREye::Left), eye_view(VREye::Right)]);
        self.has_new_poses = true;

        self.context.update_devices()
    }

    pub fn eye_view(&self, eye: VREye) -> Option<&VREyeView> {
        self.eye_views.as_ref().map(|views| &views[eye.index() as usize])
    }

    pub fn has_new_poses(&self) -> bool {
        self.has_new_poses
    }

    /// Draws both eyes with `draw` and submits them. Returns whether a frame
    /// was handed to the compositor.
    pub fn render<F>(&mut self, mut draw: F) -> Result<bool, VRError>
        where F: FnMut(&VREyeView, &VRRenderTarget)
    {
        if !self.has_new_poses {
            return Ok(false);
        }
        self.has_new_poses = false;

        let views = match self.eye_views {
            Some(views) => views,
            None => return Ok(false),
        };
        for view in views.iter() {
            let target = match view.eye {
                VREye::Left => self.context.left_eye_render_target(),
                VREye::Right => self.context.right_eye_render_target(),
            };
            match target {
                Some(target) => draw(view, target),
                None => return Err(VRError::NotInitialized),
            }
        }

        self.context.submit_frame()
    }

    /// Eye rectangles for a desktop mirror window of the given size.
    pub fn mirror_layout(&self, window: (f32, f32)) -> Vec<MirrorBlit> {
        match self.context.left_eye_render_target() {
            Some(target) => vr_mirror::mirror_layout(self.mirror_source, window, target.size()),
            None => Vec::new(),
        }
    }

    pub fn destroy(self) {
        self.context.dispose();
    }
}
