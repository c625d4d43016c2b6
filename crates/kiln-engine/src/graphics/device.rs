use std::collections::HashMap;

use crate::paint::Rgba;

use super::backend::{
    AttachmentFlags, Backend, BufferTarget, FramebufferId, Primitive, ResourceId, ScalarType,
    DEFAULT_FRAMEBUFFER, NULL_ID,
};
use super::binding::{BindSlot, BindingTracker, ResourceKind};

/// Allocation counter stamped on every live object. Backends hand out freed
/// ids again, so an id alone does not identify an object over time.
pub type Generation = u64;

/// Upper bound on errors drained after one call. A lost context can report
/// errors indefinitely.
const MAX_DRAINED_ERRORS: usize = 64;

/// Owns the graphics backend plus binding and lifetime bookkeeping.
///
/// The dispatch methods (`set_clear_color`, `clear_framebuffer`,
/// `bind_framebuffer`, `draw_indexed`) drain the backend's error queue after
/// the call and return `false` if anything was reported.
pub struct GraphicsDevice {
    backend: Box<dyn Backend>,
    bindings: BindingTracker,
    live: HashMap<(ResourceKind, ResourceId), Generation>,
    last_generation: Generation,
}

impl GraphicsDevice {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        log::info!("graphics device ready (backend: {})", backend.name());
        Self {
            backend,
            bindings: BindingTracker::new(),
            live: HashMap::new(),
            last_generation: 0,
        }
    }

    #[inline]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    #[inline]
    pub fn bindings(&self) -> &BindingTracker {
        &self.bindings
    }

    /// Whether `id` is an allocated, not yet released object of `kind`.
    #[inline]
    pub fn is_live(&self, kind: ResourceKind, id: ResourceId) -> bool {
        self.live.contains_key(&(kind, id))
    }

    /// Generation of the live object `id` of `kind`. `None` once released.
    #[inline]
    pub fn generation(&self, kind: ResourceKind, id: ResourceId) -> Option<Generation> {
        self.live.get(&(kind, id)).copied()
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    // ── dispatch ──────────────────────────────────────────────────────────

    pub fn set_clear_color(&mut self, color: Rgba) -> bool {
        self.checked("set clear color", |b| b.clear_color(color))
    }

    pub fn clear_framebuffer(&mut self, attachments: AttachmentFlags) -> bool {
        self.checked("clear framebuffer", |b| b.clear(attachments))
    }

    pub fn bind_framebuffer(&mut self, framebuffer: FramebufferId) -> bool {
        self.checked("bind framebuffer", |b| b.bind_framebuffer(framebuffer))
    }

    pub fn draw_indexed(&mut self, primitive: Primitive, count: u32, index_type: ScalarType) -> bool {
        self.checked("draw indexed", |b| b.draw_elements(primitive, count, index_type))
    }

    /// Runs `op` against the backend, then drains and logs pending errors.
    pub(crate) fn checked(&mut self, what: &str, op: impl FnOnce(&mut dyn Backend)) -> bool {
        op(self.backend.as_mut());
        self.drain_errors(what)
    }

    fn drain_errors(&mut self, what: &str) -> bool {
        let mut ok = true;
        for _ in 0..MAX_DRAINED_ERRORS {
            let Some(err) = self.backend.poll_error() else {
                return ok;
            };
            log::error!("{} error after {what}: {err}", self.backend.name());
            ok = false;
        }
        log::warn!(
            "{} kept reporting errors after {what}; stopped draining at {MAX_DRAINED_ERRORS}",
            self.backend.name()
        );
        false
    }

    // ── render targets ────────────────────────────────────────────────────

    pub(crate) fn bind_render_target(&mut self, framebuffer: FramebufferId) -> bool {
        self.bindings.acquire(BindSlot::RenderTarget, framebuffer);
        self.bind_framebuffer(framebuffer)
    }

    pub(crate) fn unbind_render_target(&mut self, framebuffer: FramebufferId) -> bool {
        self.bindings.release(BindSlot::RenderTarget, framebuffer);
        self.bind_framebuffer(DEFAULT_FRAMEBUFFER)
    }

    // ── resource lifecycle ────────────────────────────────────────────────

    /// Creates a backend object. Returns `NULL_ID` if the backend refused.
    pub(crate) fn allocate(&mut self, kind: ResourceKind) -> ResourceId {
        let id = match kind {
            ResourceKind::VertexBuffer | ResourceKind::ElementBuffer => self.backend.create_buffer(),
            ResourceKind::VertexArray => self.backend.create_vertex_array(),
            ResourceKind::ShaderProgram => self.backend.create_program(),
        };
        if id != NULL_ID {
            self.last_generation += 1;
            self.live.insert((kind, id), self.last_generation);
            log::trace!("allocated {kind} {id} (generation {})", self.last_generation);
        }
        id
    }

    pub(crate) fn delete(&mut self, kind: ResourceKind, id: ResourceId) {
        if self.live.remove(&(kind, id)).is_none() {
            log::warn!("deleting {kind} {id} which is not live");
        }
        self.bindings.forget(kind.slot(), id);
        match kind {
            ResourceKind::VertexBuffer | ResourceKind::ElementBuffer => self.backend.delete_buffer(id),
            ResourceKind::VertexArray => self.backend.delete_vertex_array(id),
            ResourceKind::ShaderProgram => self.backend.delete_program(id),
        }
        log::trace!("deleted {kind} {id}");
    }

    /// Binds `id` into its slot. `false` for the null id.
    pub(crate) fn bind(&mut self, kind: ResourceKind, id: ResourceId) -> bool {
        if id == NULL_ID {
            return false;
        }
        self.bindings.acquire(kind.slot(), id);
        self.bind_raw(kind, id);
        true
    }

    /// Unbinds `id` from its slot. `false` for the null id.
    pub(crate) fn unbind(&mut self, kind: ResourceKind, id: ResourceId) -> bool {
        if id == NULL_ID {
            return false;
        }
        self.bindings.release(kind.slot(), id);
        self.bind_raw(kind, NULL_ID);
        true
    }

    fn bind_raw(&mut self, kind: ResourceKind, id: ResourceId) {
        match kind {
            ResourceKind::VertexBuffer => self.backend.bind_buffer(BufferTarget::Vertex, id),
            ResourceKind::ElementBuffer => self.backend.bind_buffer(BufferTarget::Element, id),
            ResourceKind::VertexArray => self.backend.bind_vertex_array(id),
            ResourceKind::ShaderProgram => self.backend.use_program(id),
        }
    }

    #[inline]
    pub(crate) fn backend_mut(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }
}

impl Drop for GraphicsDevice {
    fn drop(&mut self) {
        if !self.live.is_empty() {
            log::warn!(
                "graphics device dropped with {} live backend objects",
                self.live.len()
            );
        }
    }
}
