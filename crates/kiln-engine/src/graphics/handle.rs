use super::backend::{ResourceId, NULL_ID};
use super::binding::ResourceKind;
use super::device::{Generation, GraphicsDevice};

/// Owner of one backend id.
///
/// The id is returned to the device by [`release`](Self::release). A handle
/// dropped while still holding an id logs a leak warning.
#[derive(Debug)]
pub(crate) struct GpuHandle {
    kind: ResourceKind,
    id: ResourceId,
    generation: Generation,
}

impl GpuHandle {
    pub(crate) fn allocate(device: &mut GraphicsDevice, kind: ResourceKind) -> Self {
        let id = device.allocate(kind);
        contract!(id != NULL_ID, "backend failed to allocate a {kind}");
        let generation = device.generation(kind, id).unwrap_or(0);
        Self { kind, id, generation }
    }

    /// A handle that owns nothing.
    pub(crate) const fn null(kind: ResourceKind) -> Self {
        Self { kind, id: NULL_ID, generation: 0 }
    }

    #[inline]
    pub(crate) fn id(&self) -> ResourceId {
        self.id
    }

    #[inline]
    pub(crate) fn generation(&self) -> Generation {
        self.generation
    }

    #[inline]
    pub(crate) fn bind(&self, device: &mut GraphicsDevice) -> bool {
        device.bind(self.kind, self.id)
    }

    #[inline]
    pub(crate) fn unbind(&self, device: &mut GraphicsDevice) -> bool {
        device.unbind(self.kind, self.id)
    }

    #[inline]
    pub(crate) fn is_bound(&self, device: &GraphicsDevice) -> bool {
        self.id != NULL_ID && device.bindings().is_bound(self.kind.slot(), self.id)
    }

    pub(crate) fn release(mut self, device: &mut GraphicsDevice) {
        let id = std::mem::replace(&mut self.id, NULL_ID);
        if id != NULL_ID {
            device.delete(self.kind, id);
        }
    }
}

impl Drop for GpuHandle {
    fn drop(&mut self) {
        if self.id != NULL_ID {
            log::warn!("{} {} dropped without release; backend object leaked", self.kind, self.id);
        }
    }
}
