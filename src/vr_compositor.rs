use crate::{VREye, VRError, VRGraphicsBackend, VRRenderTarget, VRRuntime, VRTexture};

// Texture region presented to an eye, in UV space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRTextureBounds {
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
}

impl VRTextureBounds {
    pub fn full() -> VRTextureBounds {
        VRTextureBounds {
            u_min: 0.0,
            v_min: 0.0,
            u_max: 1.0,
            v_max: 1.0,
        }
    }
}

impl Default for VRTextureBounds {
    fn default() -> VRTextureBounds {
        VRTextureBounds::full()
    }
}

// Backends whose native handle the compositor accepts as is.
pub fn is_backend_supported(backend: VRGraphicsBackend) -> bool {
    match backend {
        VRGraphicsBackend::OpenGL | VRGraphicsBackend::DirectX11 => true,
        VRGraphicsBackend::DirectX12 | VRGraphicsBackend::Vulkan => false,
    }
}

/// Hands one eye texture to the compositor.
pub fn submit_eye(runtime: &mut dyn VRRuntime, eye: VREye, target: &VRRenderTarget) -> Result<(), VRError> {
    let texture: VRTexture = target.native_texture();
    if !is_backend_supported(texture.backend) {
        return Err(VRError::UnsupportedBackend(texture.backend));
    }
    runtime.submit(eye, &texture, &VRTextureBounds::full())
}

/// Submits both eyes, left first. Stops at the first failure.
pub fn submit_frame(runtime: &mut dyn VRRuntime,
                    left: &VRRenderTarget,
                    right: &VRRenderTarget)
                    -> Result<(), VRError> {
    submit_eye(runtime, VREye::Left, left)?;
    submit_eye(runtime, VREye::Right, right)
}
