use std::sync::{Arc, Mutex, MutexGuard};
use crate::{VRError, VRGraphicsBackend, VRPixelFormat, VRRenderTarget, VRRenderTargetAllocator,
            VRRenderTargetDescriptor, VRTexture};

#[derive(Debug, Default)]
pub struct MockAllocatorState {
    pub live: Vec<VRRenderTarget>,
    pub allocations: u32,
    pub releases: u32,
    // Formats the simulated device refuses to create.
    pub unsupported_formats: Vec<VRPixelFormat>,
    next_handle: u64,
}

pub struct MockRenderTargetAllocator {
    backend: VRGraphicsBackend,
    state: Arc<Mutex<MockAllocatorState>>,
}

impl MockRenderTargetAllocator {
    pub fn new(backend: VRGraphicsBackend) -> MockRenderTargetAllocator {
        MockRenderTargetAllocator {
            backend: backend,
            state: Arc::new(Mutex::new(MockAllocatorState {
                next_handle: 1,
                ..Default::default()
            })),
        }
    }

    pub fn state_handle(&self) -> Arc<Mutex<MockAllocatorState>> {
        self.state.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockAllocatorState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl VRRenderTargetAllocator for MockRenderTargetAllocator {
    fn backend(&self) -> VRGraphicsBackend {
        self.backend
    }

    fn allocate(&mut self, descriptor: &VRRenderTargetDescriptor) -> Result<VRRenderTarget, VRError> {
        descriptor.validate()?;
        let mut state = self.state();
        if state.unsupported_formats.contains(&descriptor.format) {
            return Err(VRError::RenderTargetAllocation(format!("unsupported pixel format {:?}",
                                                               descriptor.format)));
        }

        let handle = state.next_handle;
        state.next_handle += 1;
        state.allocations += 1;

        let target = VRRenderTarget {
            descriptor: *descriptor,
            texture: VRTexture {
                backend: self.backend,
                handle: handle,
            },
            framebuffer: 0,
        };
        state.live.push(target.clone());
        Ok(target)
    }

    fn release(&mut self, target: VRRenderTarget) {
        let mut state = self.state();
        state.releases += 1;
        state.live.retain(|t| t.texture != target.texture);
    }
}
