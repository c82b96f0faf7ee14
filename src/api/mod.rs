#[cfg(feature = "mock")]
pub mod mock;
#[cfg(feature = "mock")]
pub use self::mock::{MockRenderTargetAllocator, MockServiceCreator, MockVRRuntime};

#[cfg(feature = "gl")]
mod gl;
#[cfg(feature = "gl")]
pub use self::gl::GlRenderTargetAllocator;
