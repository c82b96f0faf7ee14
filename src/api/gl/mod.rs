use gleam::gl::{self, GLenum, GLint, GLuint, Gl};
use std::rc::Rc;
use crate::{VRError, VRGraphicsBackend, VRPixelFormat, VRRenderTarget, VRRenderTargetAllocator,
            VRRenderTargetDescriptor, VRTexture};

/// Creates eye render targets as GL textures attached to a framebuffer.
///
/// The texture is the resolve target handed to the compositor. Multisampled
/// scene rendering resolves into it, the sample count is kept in the
/// target's descriptor for that pass.
pub struct GlRenderTargetAllocator {
    gl: Rc<dyn Gl>,
}

impl GlRenderTargetAllocator {
    pub fn new(gl: Rc<dyn Gl>) -> GlRenderTargetAllocator {
        GlRenderTargetAllocator {
            gl: gl,
        }
    }
}

fn gl_format(format: VRPixelFormat) -> (GLint, GLenum, GLenum) {
    match format {
        VRPixelFormat::R8G8B8A8UNorm => (gl::RGBA8 as GLint, gl::RGBA, gl::UNSIGNED_BYTE),
        VRPixelFormat::R8G8B8A8UNormSrgb => (gl::SRGB8_ALPHA8 as GLint, gl::RGBA, gl::UNSIGNED_BYTE),
        VRPixelFormat::B8G8R8A8UNorm => (gl::RGBA8 as GLint, gl::BGRA, gl::UNSIGNED_BYTE),
        VRPixelFormat::R16G16B16A16Float => (gl::RGBA16F as GLint, gl::RGBA, gl::HALF_FLOAT),
    }
}

impl VRRenderTargetAllocator for GlRenderTargetAllocator {
    fn backend(&self) -> VRGraphicsBackend {
        VRGraphicsBackend::OpenGL
    }

    fn allocate(&mut self, descriptor: &VRRenderTargetDescriptor) -> Result<VRRenderTarget, VRError> {
        descriptor.validate()?;
        let (internal_format, format, ty) = gl_format(descriptor.format);

        let texture = self.gl.gen_textures(1)[0];
        self.gl.bind_texture(gl::TEXTURE_2D, texture);
        self.gl.tex_image_2d(gl::TEXTURE_2D, 0, internal_format,
                             descriptor.width as i32, descriptor.height as i32,
                             0, format, ty, None);
        self.gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
        self.gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        self.gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
        self.gl.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
        self.gl.bind_texture(gl::TEXTURE_2D, 0);

        let error = self.gl.get_error();
        if error != gl::NO_ERROR {
            self.gl.delete_textures(&[texture]);
            return Err(VRError::RenderTargetAllocation(format!("glTexImage2D failed with 0x{:x} for {:?}",
                                                               error, descriptor.format)));
        }

        let framebuffer = self.gl.gen_framebuffers(1)[0];
        self.gl.bind_framebuffer(gl::FRAMEBUFFER, framebuffer);
        self.gl.framebuffer_texture_2d(gl::FRAMEBUFFER, gl::COLOR_ATTACHMENT0, gl::TEXTURE_2D, texture, 0);
        let status = self.gl.check_frame_buffer_status(gl::FRAMEBUFFER);
        self.gl.bind_framebuffer(gl::FRAMEBUFFER, 0);

        if status != gl::FRAMEBUFFER_COMPLETE {
            release_gl(&*self.gl, texture, framebuffer);
            return Err(VRError::RenderTargetAllocation(format!("incomplete framebuffer 0x{:x}", status)));
        }

        Ok(VRRenderTarget {
            descriptor: *descriptor,
            texture: VRTexture {
                backend: VRGraphicsBackend::OpenGL,
                handle: texture as u64,
            },
            framebuffer: framebuffer as u64,
        })
    }

    fn release(&mut self, target: VRRenderTarget) {
        release_gl(&*self.gl, target.texture.handle as GLuint, target.framebuffer as GLuint);
    }
}

fn release_gl(gl: &dyn Gl, texture: GLuint, framebuffer: GLuint) {
    gl.delete_framebuffers(&[framebuffer]);
    gl.delete_textures(&[texture]);
}
