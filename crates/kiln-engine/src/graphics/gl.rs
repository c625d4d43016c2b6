use std::num::NonZeroU32;

use glow::HasContext;

use crate::paint::Rgba;

use super::backend::{
    AttachmentFlags, Backend, BackendError, BufferTarget, FramebufferId, Primitive, ResourceId,
    ScalarType, ShaderStage, VertexAttribPointer, NULL_ID,
};

/// OpenGL backend on top of `glow`.
///
/// The context must be current on the calling thread for every call.
pub struct GlowBackend {
    gl: glow::Context,
    name: String,
}

impl GlowBackend {
    pub fn new(gl: glow::Context) -> Self {
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        log::info!("OpenGL {version} on {renderer}");
        Self {
            gl,
            name: format!("OpenGL {version}"),
        }
    }
}

#[inline]
fn native<T>(id: ResourceId, wrap: fn(NonZeroU32) -> T) -> Option<T> {
    NonZeroU32::new(id).map(wrap)
}

#[inline]
fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Element => glow::ELEMENT_ARRAY_BUFFER,
    }
}

#[inline]
fn scalar_type(scalar: ScalarType) -> u32 {
    match scalar {
        ScalarType::Float => glow::FLOAT,
        ScalarType::UnsignedShort => glow::UNSIGNED_SHORT,
        ScalarType::UnsignedInt => glow::UNSIGNED_INT,
    }
}

#[inline]
fn primitive_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Triangles => glow::TRIANGLES,
    }
}

/// Native clear mask for `attachments`.
pub(crate) fn clear_mask(attachments: AttachmentFlags) -> u32 {
    let mut mask = 0;
    if attachments.contains(AttachmentFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if attachments.contains(AttachmentFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if attachments.contains(AttachmentFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

impl Backend for GlowBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_buffer(&mut self) -> ResourceId {
        match unsafe { self.gl.create_buffer() } {
            Ok(buffer) => buffer.0.get(),
            Err(err) => {
                log::error!("glCreateBuffer failed: {err}");
                NULL_ID
            }
        }
    }

    fn delete_buffer(&mut self, buffer: ResourceId) {
        if let Some(buffer) = native(buffer, glow::NativeBuffer) {
            unsafe { self.gl.delete_buffer(buffer) };
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: ResourceId) {
        unsafe {
            self.gl
                .bind_buffer(buffer_target(target), native(buffer, glow::NativeBuffer))
        };
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW)
        };
    }

    fn vertex_attrib_pointer(&mut self, index: u32, pointer: VertexAttribPointer) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                pointer.components,
                scalar_type(pointer.scalar),
                pointer.normalized,
                pointer.stride,
                pointer.offset,
            )
        };
    }

    fn enable_vertex_attrib(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn create_vertex_array(&mut self) -> ResourceId {
        match unsafe { self.gl.create_vertex_array() } {
            Ok(vertex_array) => vertex_array.0.get(),
            Err(err) => {
                log::error!("glGenVertexArrays failed: {err}");
                NULL_ID
            }
        }
    }

    fn delete_vertex_array(&mut self, vertex_array: ResourceId) {
        if let Some(vertex_array) = native(vertex_array, glow::NativeVertexArray) {
            unsafe { self.gl.delete_vertex_array(vertex_array) };
        }
    }

    fn bind_vertex_array(&mut self, vertex_array: ResourceId) {
        unsafe {
            self.gl
                .bind_vertex_array(native(vertex_array, glow::NativeVertexArray))
        };
    }

    fn create_shader(&mut self, stage: ShaderStage) -> ResourceId {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        match unsafe { self.gl.create_shader(kind) } {
            Ok(shader) => shader.0.get(),
            Err(err) => {
                log::error!("glCreateShader({stage}) failed: {err}");
                NULL_ID
            }
        }
    }

    fn compile_shader(&mut self, shader: ResourceId, source: &str) -> Result<(), String> {
        let shader = native(shader, glow::NativeShader).ok_or("null shader object")?;
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if self.gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(self.gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&mut self, shader: ResourceId) {
        if let Some(shader) = native(shader, glow::NativeShader) {
            unsafe { self.gl.delete_shader(shader) };
        }
    }

    fn create_program(&mut self) -> ResourceId {
        match unsafe { self.gl.create_program() } {
            Ok(program) => program.0.get(),
            Err(err) => {
                log::error!("glCreateProgram failed: {err}");
                NULL_ID
            }
        }
    }

    fn attach_shader(&mut self, program: ResourceId, shader: ResourceId) {
        if let (Some(program), Some(shader)) = (
            native(program, glow::NativeProgram),
            native(shader, glow::NativeShader),
        ) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&mut self, program: ResourceId) -> Result<(), String> {
        let program = native(program, glow::NativeProgram).ok_or("null program object")?;
        unsafe {
            self.gl.link_program(program);
            if self.gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.gl.get_program_info_log(program))
            }
        }
    }

    fn delete_program(&mut self, program: ResourceId) {
        if let Some(program) = native(program, glow::NativeProgram) {
            unsafe { self.gl.delete_program(program) };
        }
    }

    fn use_program(&mut self, program: ResourceId) {
        unsafe { self.gl.use_program(native(program, glow::NativeProgram)) };
    }

    fn clear_color(&mut self, color: Rgba) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) };
    }

    fn clear(&mut self, attachments: AttachmentFlags) {
        unsafe { self.gl.clear(clear_mask(attachments)) };
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, native(framebuffer, glow::NativeFramebuffer))
        };
    }

    fn draw_elements(&mut self, primitive: Primitive, count: u32, index_type: ScalarType) {
        unsafe {
            self.gl.draw_elements(
                primitive_mode(primitive),
                count as i32,
                scalar_type(index_type),
                0,
            )
        };
    }

    fn poll_error(&mut self) -> Option<BackendError> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(BackendError::from_code(code)),
        }
    }
}
