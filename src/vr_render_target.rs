use crate::VRError;

// Graphics API the eye render targets were created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRGraphicsBackend {
    OpenGL,
    DirectX11,
    DirectX12,
    Vulkan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRPixelFormat {
    R8G8B8A8UNorm,
    R8G8B8A8UNormSrgb,
    B8G8R8A8UNorm,
    R16G16B16A16Float,
}

// Multisample level of the eye render targets. `None` is the zero value
// and is never a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VRMultisampleLevel {
    None,
    X1,
    X2,
    X4,
    X8,
}

impl VRMultisampleLevel {
    pub fn sample_count(self) -> u32 {
        match self {
            VRMultisampleLevel::None => 0,
            VRMultisampleLevel::X1 => 1,
            VRMultisampleLevel::X2 => 2,
            VRMultisampleLevel::X4 => 4,
            VRMultisampleLevel::X8 => 8,
        }
    }
}

impl Default for VRMultisampleLevel {
    fn default() -> VRMultisampleLevel {
        VRMultisampleLevel::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRRenderTargetDescriptor {
    pub format: VRPixelFormat,
    pub width: u32,
    pub height: u32,
    pub multisample: VRMultisampleLevel,
}

impl VRRenderTargetDescriptor {
    pub fn validate(&self) -> Result<(), VRError> {
        if self.multisample.sample_count() == 0 {
            return Err(VRError::InvalidRenderTarget("multisample level must not be zero".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(VRError::InvalidRenderTarget(format!("invalid size {}x{}",
                                                            self.width, self.height)));
        }
        Ok(())
    }
}

// Native texture handle handed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRTexture {
    pub backend: VRGraphicsBackend,
    pub handle: u64,
}

/// A 2D color target one eye is rendered into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct VRRenderTarget {
    pub descriptor: VRRenderTargetDescriptor,
    pub texture: VRTexture,
    // Backend specific framebuffer object, 0 when the backend has none.
    pub framebuffer: u64,
}

impl VRRenderTarget {
    pub fn size(&self) -> (u32, u32) {
        (self.descriptor.width, self.descriptor.height)
    }

    pub fn native_texture(&self) -> VRTexture {
        self.texture
    }
}

/// The GPU layer the eye render targets are created on.
pub trait VRRenderTargetAllocator {
    fn backend(&self) -> VRGraphicsBackend;

    fn allocate(&mut self, descriptor: &VRRenderTargetDescriptor) -> Result<VRRenderTarget, VRError>;

    fn release(&mut self, target: VRRenderTarget);
}
