use crate::{MirrorTextureEyeSource, VRError, VRGraphicsBackend, VRMultisampleLevel, VRPixelFormat};

pub const DEFAULT_Z_NEAR: f32 = 0.1;
pub const DEFAULT_Z_FAR: f32 = 20000.0;

// Settings used to create a VRContext.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRContextOptions {
    // Left at `None` by default, callers must pick a level explicitly.
    pub eye_render_target_sample_count: VRMultisampleLevel,
    pub eye_render_target_format: VRPixelFormat,
    pub graphics_backend: VRGraphicsBackend,
    pub z_near: f32,
    pub z_far: f32,
    pub mirror_source: MirrorTextureEyeSource,
}

impl Default for VRContextOptions {
    fn default() -> VRContextOptions {
        VRContextOptions {
            eye_render_target_sample_count: VRMultisampleLevel::None,
            eye_render_target_format: VRPixelFormat::R8G8B8A8UNorm,
            graphics_backend: VRGraphicsBackend::DirectX11,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
            mirror_source: MirrorTextureEyeSource::default(),
        }
    }
}

impl VRContextOptions {
    pub fn with_sample_count(mut self, level: VRMultisampleLevel) -> VRContextOptions {
        self.eye_render_target_sample_count = level;
        self
    }

    pub fn with_backend(mut self, backend: VRGraphicsBackend) -> VRContextOptions {
        self.graphics_backend = backend;
        self
    }

    pub fn with_clip_planes(mut self, z_near: f32, z_far: f32) -> VRContextOptions {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }
}

/// Clip planes must be finite with `0 < z_near < z_far`, anything else
/// yields a projection full of inf or NaN.
pub fn validate_clip_planes(z_near: f32, z_far: f32) -> Result<(), VRError> {
    if z_near.is_finite() && z_far.is_finite() && z_near > 0.0 && z_near < z_far {
        Ok(())
    } else {
        Err(VRError::InvalidClipPlanes { z_near: z_near, z_far: z_far })
    }
}
