use super::backend::{ResourceId, NULL_ID};
use super::binding::ResourceKind;
use super::buffer::{ElementBuffer, VertexBuffer};
use super::device::{Generation, GraphicsDevice};
use super::handle::GpuHandle;

/// Vertex array object: the vertex buffers and the index buffer used by a draw.
///
/// Owns its buffers and releases them with itself. Building currently supports
/// a single vertex buffer.
#[derive(Debug)]
pub struct VertexArray {
    handle: GpuHandle,
    index_buffer: ElementBuffer,
    vertex_buffers: Vec<VertexBuffer>,
}

impl VertexArray {
    pub fn new(device: &mut GraphicsDevice, index_buffer: ElementBuffer) -> Self {
        Self {
            handle: GpuHandle::allocate(device, ResourceKind::VertexArray),
            index_buffer,
            vertex_buffers: Vec::new(),
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

    #[inline]
    pub fn index_buffer(&self) -> &ElementBuffer {
        &self.index_buffer
    }

    #[inline]
    pub fn vertex_buffers(&self) -> &[VertexBuffer] {
        &self.vertex_buffers
    }

    pub fn add_buffer(&mut self, buffer: VertexBuffer) {
        self.vertex_buffers.push(buffer);
    }

    /// Binds the array and its index buffer.
    pub fn bind(&self, device: &mut GraphicsDevice) -> bool {
        if !self.handle.bind(device) {
            return false;
        }
        self.index_buffer.bind(device);
        true
    }

    pub fn unbind(&self, device: &mut GraphicsDevice) -> bool {
        if self.handle.id() == NULL_ID {
            return false;
        }
        self.index_buffer.unbind(device);
        self.handle.unbind(device)
    }

    /// Records the vertex buffer's layout into this array.
    ///
    /// Exactly one vertex buffer must have been added. Returns whether the
    /// layout upload succeeded.
    pub fn build(&self, device: &mut GraphicsDevice) -> bool {
        contract!(
            self.vertex_buffers.len() == 1,
            "vertex array {} needs exactly one vertex buffer to build, has {}",
            self.id(),
            self.vertex_buffers.len()
        );
        let Some(buffer) = self.vertex_buffers.first() else {
            return false;
        };
        if !self.bind(device) {
            return false;
        }

        buffer.bind(device);
        let uploaded = buffer.upload_layout(device);
        buffer.unbind(device);
        self.unbind(device);
        uploaded
    }

    /// Deletes the array and the buffers it owns.
    pub fn release(self, device: &mut GraphicsDevice) {
        for buffer in self.vertex_buffers {
            buffer.release(device);
        }
        self.index_buffer.release(device);
        self.handle.release(device);
    }
}
