use super::backend::{BufferTarget, ResourceId, VertexAttribPointer};
use super::binding::ResourceKind;
use super::device::{Generation, GraphicsDevice};
use super::handle::GpuHandle;
use super::layout::AttributeLayout;

/// Vertex attribute buffer with its interleaved layout.
#[derive(Debug)]
pub struct VertexBuffer {
    handle: GpuHandle,
    layout: AttributeLayout,
}

impl VertexBuffer {
    pub fn new(device: &mut GraphicsDevice, layout: AttributeLayout) -> Self {
        Self {
            handle: GpuHandle::allocate(device, ResourceKind::VertexBuffer),
            layout,
        }
    }

    #[inline]
    pub fn id(&self) -> ResourceId {
        self.handle.id()
    }

    #[inline]
    pub fn layout(&self) -> &AttributeLayout {
        &self.layout
    }

    pub fn bind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.bind(device)
    }

    pub fn unbind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.unbind(device)
    }

    /// Replaces the buffer contents. The buffer must be bound.
    pub fn set_data(&self, device: &mut GraphicsDevice, data: &[u8]) {
        contract!(self.handle.is_bound(device), "set_data on unbound vertex buffer {}", self.id());
        device.backend_mut().buffer_data(BufferTarget::Vertex, data);
    }

    /// Declares every layout attribute to the bound vertex array.
    ///
    /// The buffer must be bound. Returns `false` if the backend reported an
    /// error.
    pub fn upload_layout(&self, device: &mut GraphicsDevice) -> bool {
        contract!(self.handle.is_bound(device), "upload_layout on unbound vertex buffer {}", self.id());
        let stride = self.layout.stride() as i32;
        device.checked("upload vertex layout", |backend| {
            for (index, attr) in self.layout.iter().enumerate() {
                let index = index as u32;
                backend.vertex_attrib_pointer(
                    index,
                    VertexAttribPointer {
                        components: attr.components as i32,
                        scalar: attr.scalar,
                        normalized: attr.normalized,
                        stride,
                        offset: attr.offset() as i32,
                    },
                );
                backend.enable_vertex_attrib(index);
            }
        })
    }

    pub fn release(self, device: &mut GraphicsDevice) {
        self.handle.release(device);
    }
}

/// Index buffer.
#[derive(Debug)]
pub struct ElementBuffer {
    handle: GpuHandle,
}

impl ElementBuffer {
    pub fn new(device: &mut GraphicsDevice) -> Self {
        Self {
            handle: GpuHandle::allocate(device, ResourceKind::ElementBuffer),
        }
    }

    #[inline]
    pub fn id(&self) -> ResourceId {
        self.handle.id()
    }

    #[inline]
    pub fn generation(&self) -> Generation {
        self.handle.generation()
    }

    pub fn bind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.bind(device)
    }

    pub fn unbind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.unbind(device)
    }

    /// Replaces the buffer contents. The buffer must be bound.
    pub fn set_data(&self, device: &mut GraphicsDevice, data: &[u8]) {
        contract!(self.handle.is_bound(device), "set_data on unbound element buffer {}", self.id());
        device.backend_mut().buffer_data(BufferTarget::Element, data);
    }

    pub fn release(self, device: &mut GraphicsDevice) {
        self.handle.release(device);
    }
}
