use crate::graphics::{
    AttachmentFlags, FramebufferId, Generation, GraphicsDevice, Mesh, Primitive, ResourceId,
    ResourceKind, ScalarType, ShaderProgram,
};
use crate::paint::Rgba;

/// A resource id together with the allocation generation it had when the
/// command was recorded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrackedId {
    pub id: ResourceId,
    pub generation: Generation,
}

impl TrackedId {
    /// Whether the device still holds this exact allocation.
    fn is_current(self, device: &GraphicsDevice, kind: ResourceKind) -> bool {
        device.generation(kind, self.id) == Some(self.generation)
    }
}

/// Everything a mesh draw touches, captured at submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawMeshCmd {
    pub vertex_array: TrackedId,
    pub index_buffer: TrackedId,
    pub index_count: u32,
    pub program: Option<TrackedId>,
}

impl DrawMeshCmd {
    pub fn new(mesh: &Mesh, shader: Option<&ShaderProgram>) -> Self {
        let vertex_array = mesh.vertex_array();
        let index_buffer = vertex_array.index_buffer();
        Self {
            vertex_array: TrackedId { id: vertex_array.id(), generation: vertex_array.generation() },
            index_buffer: TrackedId { id: index_buffer.id(), generation: index_buffer.generation() },
            index_count: mesh.index_count(),
            program: shader.map(|s| TrackedId { id: s.id(), generation: s.generation() }),
        }
    }

    /// The first referenced resource that was released, or whose id now
    /// belongs to a newer allocation.
    fn released_resource(&self, device: &GraphicsDevice) -> Option<(ResourceKind, ResourceId)> {
        let program = self.program.map(|p| (ResourceKind::ShaderProgram, p));
        [
            (ResourceKind::VertexArray, self.vertex_array),
            (ResourceKind::ElementBuffer, self.index_buffer),
        ]
        .into_iter()
        .chain(program)
        .find(|&(kind, tracked)| !tracked.is_current(device, kind))
        .map(|(kind, tracked)| (kind, tracked.id))
    }

    fn execute(&self, device: &mut GraphicsDevice) -> bool {
        if let Some((kind, id)) = self.released_resource(device) {
            log::warn!("draw skipped: {kind} {id} was released before the queue ran");
            return false;
        }

        if let Some(program) = self.program {
            device.bind(ResourceKind::ShaderProgram, program.id);
        }
        device.bind(ResourceKind::VertexArray, self.vertex_array.id);
        device.bind(ResourceKind::ElementBuffer, self.index_buffer.id);

        let drawn = device.draw_indexed(Primitive::Triangles, self.index_count, ScalarType::UnsignedInt);

        device.unbind(ResourceKind::ElementBuffer, self.index_buffer.id);
        device.unbind(ResourceKind::VertexArray, self.vertex_array.id);
        if let Some(program) = self.program {
            device.unbind(ResourceKind::ShaderProgram, program.id);
        }
        drawn
    }
}

/// A deferred unit of GPU work.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Bind the target, then clear all its attachments to `clear_color`.
    BeginPass {
        target: FramebufferId,
        clear_color: Rgba,
    },
    DrawMesh(DrawMeshCmd),
    /// Unbind the target.
    EndPass { target: FramebufferId },
}

impl RenderCommand {
    /// Runs the command. `false` means it failed and was logged.
    pub fn execute(&self, device: &mut GraphicsDevice) -> bool {
        match self {
            RenderCommand::BeginPass { target, clear_color } => {
                let bound = device.bind_render_target(*target);
                let colored = device.set_clear_color(*clear_color);
                let cleared = device.clear_framebuffer(AttachmentFlags::ALL);
                bound && colored && cleared
            }
            RenderCommand::DrawMesh(draw) => draw.execute(device),
            RenderCommand::EndPass { target } => device.unbind_render_target(*target),
        }
    }
}
