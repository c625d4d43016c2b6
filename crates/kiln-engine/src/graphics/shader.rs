use std::fmt;

use super::backend::{ResourceId, ShaderStage, NULL_ID};
use super::binding::ResourceKind;
use super::device::{Generation, GraphicsDevice};
use super::handle::GpuHandle;

/// Why a shader program could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            ShaderError::Link { log } => write!(f, "program failed to link: {}", log.trim_end()),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Linked vertex + fragment program.
///
/// Construction never fails outright: a program that did not compile or link
/// has id 0, reports `valid() == false` and keeps the reason in `error()`.
#[derive(Debug)]
pub struct ShaderProgram {
    name: String,
    handle: GpuHandle,
    error: Option<ShaderError>,
}

impl ShaderProgram {
    pub fn new(
        device: &mut GraphicsDevice,
        name: impl Into<String>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Self {
        let name = name.into();
        match link(device, vertex_src, fragment_src) {
            Ok(handle) => {
                log::debug!("shader program \"{name}\" linked (id {})", handle.id());
                Self { name, handle, error: None }
            }
            Err(err) => {
                log::error!("shader program \"{name}\": {err}");
                Self {
                    name,
                    handle: GpuHandle::null(ResourceKind::ShaderProgram),
                    error: Some(err),
                }
            }
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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
    pub fn valid(&self) -> bool {
        self.error.is_none() && self.handle.id() != NULL_ID
    }

    #[inline]
    pub fn error(&self) -> Option<&ShaderError> {
        self.error.as_ref()
    }

    pub fn bind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.bind(device)
    }

    pub fn unbind(&self, device: &mut GraphicsDevice) -> bool {
        self.handle.unbind(device)
    }

    pub fn release(self, device: &mut GraphicsDevice) {
        self.handle.release(device);
    }
}

fn compile_stage(
    device: &mut GraphicsDevice,
    stage: ShaderStage,
    source: &str,
) -> Result<ResourceId, ShaderError> {
    let backend = device.backend_mut();
    let shader = backend.create_shader(stage);
    if shader == NULL_ID {
        return Err(ShaderError::Compile {
            stage,
            log: "backend could not create a shader object".into(),
        });
    }
    if let Err(log) = backend.compile_shader(shader, source) {
        backend.delete_shader(shader);
        return Err(ShaderError::Compile { stage, log });
    }
    Ok(shader)
}

fn link(
    device: &mut GraphicsDevice,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<GpuHandle, ShaderError> {
    let vertex = compile_stage(device, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_stage(device, ShaderStage::Fragment, fragment_src) {
        Ok(id) => id,
        Err(err) => {
            device.backend_mut().delete_shader(vertex);
            return Err(err);
        }
    };

    let program = GpuHandle::allocate(device, ResourceKind::ShaderProgram);
    let linked = if program.id() == NULL_ID {
        Err("backend could not create a program object".to_string())
    } else {
        let backend = device.backend_mut();
        backend.attach_shader(program.id(), vertex);
        backend.attach_shader(program.id(), fragment);
        backend.link_program(program.id())
    };

    // Stage objects are only needed until the program is linked.
    let backend = device.backend_mut();
    backend.delete_shader(vertex);
    backend.delete_shader(fragment);

    match linked {
        Ok(()) => Ok(program),
        Err(log) => {
            program.release(device);
            Err(ShaderError::Link { log })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::testing::{Call, RecordingBackend};
    use crate::graphics::BindSlot;

    const VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }";
    const FS: &str = "#version 330 core\nout vec4 o;\nvoid main() { o = vec4(1.0); }";

    fn device() -> (GraphicsDevice, RecordingBackend) {
        let backend = RecordingBackend::new();
        (GraphicsDevice::new(Box::new(backend.clone())), backend)
    }

    #[test]
    fn successful_build_is_valid() {
        let (mut device, backend) = device();
        let shader = ShaderProgram::new(&mut device, "flat", VS, FS);

        assert!(shader.valid());
        assert_ne!(shader.id(), NULL_ID);
        assert_eq!(shader.name(), "flat");
        assert!(shader.error().is_none());

        // Both stage objects are deleted once linked.
        let deleted = backend
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteShader(_)))
            .count();
        assert_eq!(deleted, 2);
        shader.release(&mut device);
    }

    #[test]
    fn vertex_compile_failure_leaves_id_zero() {
        let (mut device, backend) = device();
        backend.fail_compile(ShaderStage::Vertex);
        let shader = ShaderProgram::new(&mut device, "broken", VS, FS);

        assert!(!shader.valid());
        assert_eq!(shader.id(), NULL_ID);
        assert!(matches!(
            shader.error(),
            Some(ShaderError::Compile { stage: ShaderStage::Vertex, .. })
        ));
        // Fragment stage never attempted, no program created.
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::CreateShader(ShaderStage::Fragment, _))));
        assert!(!backend.calls().iter().any(|c| matches!(c, Call::CreateProgram(_))));
    }

    #[test]
    fn fragment_compile_failure_deletes_vertex_stage() {
        let (mut device, backend) = device();
        backend.fail_compile(ShaderStage::Fragment);
        let shader = ShaderProgram::new(&mut device, "broken", VS, FS);

        assert!(!shader.valid());
        let calls = backend.calls();
        let Some(Call::CreateShader(ShaderStage::Vertex, vertex)) = calls.first().cloned() else {
            panic!("expected vertex stage first, got {calls:?}");
        };
        assert!(calls.contains(&Call::DeleteShader(vertex)));
        assert_eq!(device.live_count(), 0);
    }

    #[test]
    fn link_failure_deletes_program() {
        let (mut device, backend) = device();
        backend.fail_link();
        let shader = ShaderProgram::new(&mut device, "unlinked", VS, FS);

        assert!(!shader.valid());
        assert_eq!(shader.id(), NULL_ID);
        assert!(matches!(shader.error(), Some(ShaderError::Link { .. })));
        assert!(backend.calls().iter().any(|c| matches!(c, Call::DeleteProgram(_))));
        assert_eq!(device.live_count(), 0);
    }

    #[test]
    fn bind_uses_the_program_slot() {
        let (mut device, _backend) = device();
        let shader = ShaderProgram::new(&mut device, "flat", VS, FS);
        assert!(shader.bind(&mut device));
        assert!(device.bindings().is_bound(BindSlot::ShaderProgram, shader.id()));
        assert!(shader.unbind(&mut device));
        shader.release(&mut device);
    }

    #[test]
    fn invalid_program_does_not_bind() {
        let (mut device, backend) = device();
        backend.fail_link();
        let shader = ShaderProgram::new(&mut device, "unlinked", VS, FS);
        assert!(!shader.bind(&mut device));
    }

    #[test]
    fn error_messages_name_the_stage() {
        let err = ShaderError::Compile { stage: ShaderStage::Fragment, log: "bad\n".into() };
        assert_eq!(err.to_string(), "fragment shader failed to compile: bad");
    }
}
