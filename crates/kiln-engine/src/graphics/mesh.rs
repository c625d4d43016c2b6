use super::backend::ScalarType;
use super::buffer::{ElementBuffer, VertexBuffer};
use super::device::GraphicsDevice;
use super::layout::{Attribute, AttributeLayout};
use super::vertex_array::VertexArray;

/// Vertex position.
pub type Vertex = [f32; 3];

/// Triangle-list index.
pub type Index = u32;

/// Attribute name of the vertex position in shaders.
pub const POSITION_ATTRIBUTE: &str = "a_VertexPos";

/// Immutable indexed triangle mesh uploaded to the GPU at construction.
#[derive(Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<Index>,
    vertex_array: VertexArray,
}

impl Mesh {
    pub fn new(device: &mut GraphicsDevice, vertices: &[Vertex], indices: &[Index]) -> Self {
        let layout = AttributeLayout::new([Attribute::new(POSITION_ATTRIBUTE, ScalarType::Float, 3)]);

        let vertex_buffer = VertexBuffer::new(device, layout);
        vertex_buffer.bind(device);
        vertex_buffer.set_data(device, bytemuck::cast_slice(vertices));
        vertex_buffer.unbind(device);

        let index_buffer = ElementBuffer::new(device);
        index_buffer.bind(device);
        index_buffer.set_data(device, bytemuck::cast_slice(indices));
        index_buffer.unbind(device);

        let mut vertex_array = VertexArray::new(device, index_buffer);
        vertex_array.add_buffer(vertex_buffer);
        if !vertex_array.build(device) {
            log::warn!("mesh vertex array {} failed to build", vertex_array.id());
        }

        log::debug!(
            "mesh uploaded: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Self {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            vertex_array,
        }
    }

    /// Single triangle centred on the origin.
    pub fn triangle(device: &mut GraphicsDevice) -> Self {
        Self::new(
            device,
            &[[-0.5, -0.5, 0.0], [0.0, 0.5, 0.0], [0.5, -0.5, 0.0]],
            &[0, 1, 2],
        )
    }

    /// Unit quad centred on the origin, two triangles.
    pub fn quad(device: &mut GraphicsDevice) -> Self {
        Self::new(
            device,
            &[
                [-0.5, 0.5, 0.0],
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
            ],
            &[0, 1, 2, 2, 3, 0],
        )
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn release(self, device: &mut GraphicsDevice) {
        self.vertex_array.release(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::testing::{Call, RecordingBackend};
    use crate::graphics::BufferTarget;

    fn device() -> (GraphicsDevice, RecordingBackend) {
        let backend = RecordingBackend::new();
        (GraphicsDevice::new(Box::new(backend.clone())), backend)
    }

    #[test]
    fn quad_uploads_positions_and_indices() {
        let (mut device, backend) = device();
        let mesh = Mesh::quad(&mut device);

        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 2, 3, 0]);
        assert_eq!(mesh.index_count(), 6);

        let calls = backend.calls();
        assert!(calls.contains(&Call::BufferData(BufferTarget::Vertex, 4 * 12)));
        assert!(calls.contains(&Call::BufferData(BufferTarget::Element, 6 * 4)));
        assert!(calls.contains(&Call::EnableAttrib(0)));
        mesh.release(&mut device);
    }

    #[test]
    fn triangle_has_three_indices() {
        let (mut device, _backend) = device();
        let mesh = Mesh::triangle(&mut device);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.vertices()[1], [0.0, 0.5, 0.0]);
        mesh.release(&mut device);
    }

    #[test]
    fn construction_leaves_every_slot_free() {
        let (mut device, _backend) = device();
        let mesh = Mesh::quad(&mut device);
        for slot in [
            crate::graphics::BindSlot::VertexBuffer,
            crate::graphics::BindSlot::ElementBuffer,
            crate::graphics::BindSlot::VertexArray,
        ] {
            assert_eq!(device.bindings().bound(slot), None, "{slot} left bound");
        }
        mesh.release(&mut device);
        assert_eq!(device.live_count(), 0);
    }
}
