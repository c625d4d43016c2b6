use crate::graphics::{FramebufferId, GraphicsDevice, Mesh, ShaderProgram};
use crate::paint::Rgba;

use super::command::{DrawMeshCmd, RenderCommand};
use super::target::RenderTarget;

/// Records render commands for one target at a time and replays them later.
///
/// Idle until [`begin`](Self::begin), recording until [`end`](Self::end).
/// Submitting outside that window is a contract violation.
#[derive(Debug, Default)]
pub struct Renderer {
    current_target: Option<FramebufferId>,
    queue: Vec<RenderCommand>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.current_target.is_some()
    }

    #[inline]
    pub fn current_target(&self) -> Option<FramebufferId> {
        self.current_target
    }

    /// Pending commands, oldest first.
    #[inline]
    pub fn command_queue(&self) -> &[RenderCommand] {
        &self.queue
    }

    pub fn begin(&mut self, target: &dyn RenderTarget, clear_color: Rgba) {
        if !contract!(
            self.current_target.is_none(),
            "Renderer::begin while a pass on framebuffer {:?} is still open",
            self.current_target
        ) {
            return;
        }
        let framebuffer = target.framebuffer();
        self.current_target = Some(framebuffer);
        self.submit(RenderCommand::BeginPass {
            target: framebuffer,
            clear_color,
        });
    }

    pub fn end(&mut self) {
        let Some(target) = self.current_target else {
            contract!(false, "Renderer::end without a matching begin");
            return;
        };
        self.submit(RenderCommand::EndPass { target });
        self.current_target = None;
    }

    /// Queues an indexed draw of `mesh`, optionally with `shader` bound.
    pub fn draw_mesh(&mut self, mesh: &Mesh, shader: Option<&ShaderProgram>) {
        contract!(!mesh.vertices().is_empty(), "draw_mesh with no vertices");
        contract!(!mesh.indices().is_empty(), "draw_mesh with no indices");
        if let Some(shader) = shader {
            contract!(shader.valid(), "draw_mesh with invalid shader \"{}\"", shader.name());
        }
        self.submit(RenderCommand::DrawMesh(DrawMeshCmd::new(mesh, shader)));
    }

    pub fn submit(&mut self, command: RenderCommand) {
        if !contract!(self.is_recording(), "render command submitted outside begin/end: {command:?}") {
            return;
        }
        self.queue.push(command);
    }

    /// Executes and drains every queued command in order.
    ///
    /// Failing commands are logged and skipped. Returns how many succeeded.
    pub fn process_command_queue(&mut self, device: &mut GraphicsDevice) -> usize {
        let mut succeeded = 0;
        for command in self.queue.drain(..) {
            if command.execute(device) {
                succeeded += 1;
            } else {
                log::error!("Render command failed: {command:?}");
            }
        }
        succeeded
    }
}
