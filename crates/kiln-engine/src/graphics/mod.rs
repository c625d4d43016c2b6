//! GPU resources and the backend dispatch layer.
//!
//! All backend traffic goes through a [`GraphicsDevice`], which owns the
//! [`Backend`] implementation together with the bookkeeping the resource
//! objects rely on: the bound-slot tracker and the generation of every live id.
//!
//! Resource objects ([`VertexBuffer`], [`ElementBuffer`], [`VertexArray`],
//! [`ShaderProgram`]) each own one backend id. They are created and released
//! through the device:
//!
//! ```ignore
//! let mesh = Mesh::quad(&mut device);
//! // ...
//! mesh.release(&mut device);
//! ```
//!
//! Dropping a resource without releasing it leaks the backend object and logs
//! a warning.

mod backend;
mod binding;
mod buffer;
mod device;
mod gl;
mod handle;
mod layout;
mod mesh;
mod shader;
mod vertex_array;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{
    AttachmentFlags, Backend, BackendError, BufferTarget, FramebufferId, Primitive, ResourceId,
    ScalarType, ShaderStage, VertexAttribPointer, DEFAULT_FRAMEBUFFER, NULL_ID,
};
pub use binding::{BindSlot, BindingTracker, ResourceKind};
pub use buffer::{ElementBuffer, VertexBuffer};
pub use device::{Generation, GraphicsDevice};
pub use gl::GlowBackend;
pub use layout::{Attribute, AttributeLayout};
pub use mesh::{Index, Mesh, Vertex, POSITION_ATTRIBUTE};
pub use shader::{ShaderError, ShaderProgram};
pub use vertex_array::VertexArray;
