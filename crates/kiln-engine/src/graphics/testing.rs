//! Recording backend for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::paint::Rgba;

use super::backend::{
    AttachmentFlags, Backend, BackendError, BufferTarget, FramebufferId, Primitive, ResourceId,
    ScalarType, ShaderStage, VertexAttribPointer, NULL_ID,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer(ResourceId),
    DeleteBuffer(ResourceId),
    BindBuffer(BufferTarget, ResourceId),
    BufferData(BufferTarget, usize),
    AttribPointer(u32, VertexAttribPointer),
    EnableAttrib(u32),
    CreateVertexArray(ResourceId),
    DeleteVertexArray(ResourceId),
    BindVertexArray(ResourceId),
    CreateShader(ShaderStage, ResourceId),
    CompileShader(ResourceId),
    DeleteShader(ResourceId),
    CreateProgram(ResourceId),
    AttachShader(ResourceId, ResourceId),
    LinkProgram(ResourceId),
    DeleteProgram(ResourceId),
    UseProgram(ResourceId),
    ClearColor(Rgba),
    Clear(AttachmentFlags),
    BindFramebuffer(FramebufferId),
    DrawElements { count: u32, index_type: ScalarType },
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    last_id: ResourceId,
    recycle_ids: bool,
    free_ids: Vec<ResourceId>,
    errors: VecDeque<BackendError>,
    refuse_allocations: bool,
    failing_stage: Option<ShaderStage>,
    failing_link: bool,
    shader_stages: Vec<(ResourceId, ShaderStage)>,
}

/// A [`Backend`] that records every call. Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingBackend {
    inner: Rc<RefCell<Recorder>>,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    pub(crate) fn push_error(&self, err: BackendError) {
        self.inner.borrow_mut().errors.push_back(err);
    }

    pub(crate) fn pending_errors(&self) -> usize {
        self.inner.borrow().errors.len()
    }

    pub(crate) fn refuse_allocations(&self) {
        self.inner.borrow_mut().refuse_allocations = true;
    }

    pub(crate) fn fail_compile(&self, stage: ShaderStage) {
        self.inner.borrow_mut().failing_stage = Some(stage);
    }

    /// Hands out the lowest deleted id before minting a new one, like GL.
    pub(crate) fn recycle_ids(&self) {
        self.inner.borrow_mut().recycle_ids = true;
    }

    pub(crate) fn fail_link(&self) {
        self.inner.borrow_mut().failing_link = true;
    }

    fn record(&self, call: Call) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn free_id(&self, id: ResourceId) {
        let mut inner = self.inner.borrow_mut();
        if inner.recycle_ids && id != NULL_ID {
            inner.free_ids.push(id);
        }
    }

    fn next_id(&self) -> ResourceId {
        let mut inner = self.inner.borrow_mut();
        if inner.refuse_allocations {
            return NULL_ID;
        }
        if let Some(pos) = inner
            .free_ids
            .iter()
            .enumerate()
            .min_by_key(|&(_, id)| *id)
            .map(|(pos, _)| pos)
        {
            return inner.free_ids.swap_remove(pos);
        }
        inner.last_id += 1;
        inner.last_id
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn create_buffer(&mut self) -> ResourceId {
        let id = self.next_id();
        self.record(Call::CreateBuffer(id));
        id
    }

    fn delete_buffer(&mut self, buffer: ResourceId) {
        self.record(Call::DeleteBuffer(buffer));
        self.free_id(buffer);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: ResourceId) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn vertex_attrib_pointer(&mut self, index: u32, pointer: VertexAttribPointer) {
        self.record(Call::AttribPointer(index, pointer));
    }

    fn enable_vertex_attrib(&mut self, index: u32) {
        self.record(Call::EnableAttrib(index));
    }

    fn create_vertex_array(&mut self) -> ResourceId {
        let id = self.next_id();
        self.record(Call::CreateVertexArray(id));
        id
    }

    fn delete_vertex_array(&mut self, vertex_array: ResourceId) {
        self.record(Call::DeleteVertexArray(vertex_array));
        self.free_id(vertex_array);
    }

    fn bind_vertex_array(&mut self, vertex_array: ResourceId) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn create_shader(&mut self, stage: ShaderStage) -> ResourceId {
        let id = self.next_id();
        self.inner.borrow_mut().shader_stages.push((id, stage));
        self.record(Call::CreateShader(stage, id));
        id
    }

    fn compile_shader(&mut self, shader: ResourceId, _source: &str) -> Result<(), String> {
        self.record(Call::CompileShader(shader));
        let inner = self.inner.borrow();
        let stage = inner
            .shader_stages
            .iter()
            .find(|(id, _)| *id == shader)
            .map(|(_, stage)| *stage);
        match (stage, inner.failing_stage) {
            (Some(stage), Some(failing)) if stage == failing => {
                Err(format!("0:1(1): error: {stage} stage rejected"))
            }
            _ => Ok(()),
        }
    }

    fn delete_shader(&mut self, shader: ResourceId) {
        self.record(Call::DeleteShader(shader));
        self.free_id(shader);
    }

    fn create_program(&mut self) -> ResourceId {
        let id = self.next_id();
        self.record(Call::CreateProgram(id));
        id
    }

    fn attach_shader(&mut self, program: ResourceId, shader: ResourceId) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&mut self, program: ResourceId) -> Result<(), String> {
        self.record(Call::LinkProgram(program));
        if self.inner.borrow().failing_link {
            return Err("error: unresolved varying".to_string());
        }
        Ok(())
    }

    fn delete_program(&mut self, program: ResourceId) {
        self.record(Call::DeleteProgram(program));
        self.free_id(program);
    }

    fn use_program(&mut self, program: ResourceId) {
        self.record(Call::UseProgram(program));
    }

    fn clear_color(&mut self, color: Rgba) {
        self.record(Call::ClearColor(color));
    }

    fn clear(&mut self, attachments: AttachmentFlags) {
        self.record(Call::Clear(attachments));
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.record(Call::BindFramebuffer(framebuffer));
    }

    fn draw_elements(&mut self, _primitive: Primitive, count: u32, index_type: ScalarType) {
        self.record(Call::DrawElements { count, index_type });
    }

    fn poll_error(&mut self) -> Option<BackendError> {
        self.inner.borrow_mut().errors.pop_front()
    }
}
