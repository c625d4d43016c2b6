use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::paint::Rgba;

/// Backend object id. `NULL_ID` means "no object".
pub type ResourceId = u32;

/// Backend framebuffer id.
pub type FramebufferId = u32;

pub const NULL_ID: ResourceId = 0;

/// The window's own framebuffer.
pub const DEFAULT_FRAMEBUFFER: FramebufferId = 0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Vertex,
    /// Index data.
    Element,
}

/// Scalar type of attribute components and indices.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Float,
    UnsignedShort,
    UnsignedInt,
}

impl ScalarType {
    /// Size of one component in a vertex attribute.
    ///
    /// Only `Float` attributes are supported; the other types report 0 and
    /// therefore contribute nothing to offsets or strides.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            ScalarType::Float => 4,
            ScalarType::UnsignedShort | ScalarType::UnsignedInt => 0,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Triangles,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Framebuffer attachments to clear.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct AttachmentFlags(u8);

impl AttachmentFlags {
    pub const NONE: Self = Self(0);
    pub const COLOR: Self = Self(1 << 0);
    pub const DEPTH: Self = Self(1 << 1);
    pub const STENCIL: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::COLOR.0 | Self::DEPTH.0 | Self::STENCIL.0);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttachmentFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AttachmentFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Arguments of one vertex attribute pointer call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribPointer {
    pub components: i32,
    pub scalar: ScalarType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// An error reported by the backend's error queue.
///
/// Codes follow the OpenGL numbering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BackendError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    Unknown(u32),
}

impl BackendError {
    pub const fn from_code(code: u32) -> Self {
        match code {
            0x0500 => BackendError::InvalidEnum,
            0x0501 => BackendError::InvalidValue,
            0x0502 => BackendError::InvalidOperation,
            0x0503 => BackendError::StackOverflow,
            0x0504 => BackendError::StackUnderflow,
            0x0505 => BackendError::OutOfMemory,
            0x0506 => BackendError::InvalidFramebufferOperation,
            other => BackendError::Unknown(other),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BackendError::InvalidEnum => "INVALID_ENUM",
            BackendError::InvalidValue => "INVALID_VALUE",
            BackendError::InvalidOperation => "INVALID_OPERATION",
            BackendError::StackOverflow => "STACK_OVERFLOW",
            BackendError::StackUnderflow => "STACK_UNDERFLOW",
            BackendError::OutOfMemory => "OUT_OF_MEMORY",
            BackendError::InvalidFramebufferOperation => "INVALID_FRAMEBUFFER_OPERATION",
            BackendError::Unknown(_) => "UNKNOWN_BACKEND_ERROR",
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Unknown(code) => write!(f, "{} ({code:#06x})", self.name()),
            known => f.write_str(known.name()),
        }
    }
}

impl std::error::Error for BackendError {}

/// The raw draw API a graphics context exposes.
///
/// Calls are unchecked; failures surface through [`poll_error`]. Creation
/// calls return [`NULL_ID`] when the backend could not allocate.
///
/// [`poll_error`]: Backend::poll_error
pub trait Backend {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    fn create_buffer(&mut self) -> ResourceId;
    fn delete_buffer(&mut self, buffer: ResourceId);
    fn bind_buffer(&mut self, target: BufferTarget, buffer: ResourceId);
    /// Replaces the contents of the buffer bound to `target`.
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);

    fn vertex_attrib_pointer(&mut self, index: u32, pointer: VertexAttribPointer);
    fn enable_vertex_attrib(&mut self, index: u32);

    fn create_vertex_array(&mut self) -> ResourceId;
    fn delete_vertex_array(&mut self, vertex_array: ResourceId);
    fn bind_vertex_array(&mut self, vertex_array: ResourceId);

    fn create_shader(&mut self, stage: ShaderStage) -> ResourceId;
    /// Uploads `source` and compiles it, returning the info log on failure.
    fn compile_shader(&mut self, shader: ResourceId, source: &str) -> Result<(), String>;
    fn delete_shader(&mut self, shader: ResourceId);

    fn create_program(&mut self) -> ResourceId;
    fn attach_shader(&mut self, program: ResourceId, shader: ResourceId);
    /// Links `program`, returning the info log on failure.
    fn link_program(&mut self, program: ResourceId) -> Result<(), String>;
    fn delete_program(&mut self, program: ResourceId);
    fn use_program(&mut self, program: ResourceId);

    fn clear_color(&mut self, color: Rgba);
    fn clear(&mut self, attachments: AttachmentFlags);
    fn bind_framebuffer(&mut self, framebuffer: FramebufferId);
    fn draw_elements(&mut self, primitive: Primitive, count: u32, index_type: ScalarType);

    /// Pops the oldest pending error.
    fn poll_error(&mut self) -> Option<BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_names() {
        assert_eq!(BackendError::from_code(0x0500).name(), "INVALID_ENUM");
        assert_eq!(BackendError::from_code(0x0502).name(), "INVALID_OPERATION");
        assert_eq!(BackendError::from_code(0x0506).name(), "INVALID_FRAMEBUFFER_OPERATION");
        assert_eq!(BackendError::from_code(0x9999), BackendError::Unknown(0x9999));
        assert_eq!(BackendError::Unknown(0x9999).name(), "UNKNOWN_BACKEND_ERROR");
    }

    #[test]
    fn attachment_flags_combine() {
        let flags = AttachmentFlags::COLOR | AttachmentFlags::STENCIL;
        assert!(flags.contains(AttachmentFlags::COLOR));
        assert!(!flags.contains(AttachmentFlags::DEPTH));
        assert!(AttachmentFlags::ALL.contains(flags));
        assert!(AttachmentFlags::NONE.is_empty());
    }

    #[test]
    fn only_float_has_a_size() {
        assert_eq!(ScalarType::Float.byte_size(), 4);
        assert_eq!(ScalarType::UnsignedInt.byte_size(), 0);
    }
}
