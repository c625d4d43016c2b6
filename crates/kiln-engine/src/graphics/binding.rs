use std::fmt;

use super::backend::ResourceId;

/// Kinds of backend objects the device allocates.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    VertexBuffer,
    ElementBuffer,
    VertexArray,
    ShaderProgram,
}

impl ResourceKind {
    #[inline]
    pub const fn slot(self) -> BindSlot {
        match self {
            ResourceKind::VertexBuffer => BindSlot::VertexBuffer,
            ResourceKind::ElementBuffer => BindSlot::ElementBuffer,
            ResourceKind::VertexArray => BindSlot::VertexArray,
            ResourceKind::ShaderProgram => BindSlot::ShaderProgram,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.slot(), f)
    }
}

/// One binding point. At most one id can occupy a slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BindSlot {
    VertexBuffer,
    ElementBuffer,
    VertexArray,
    ShaderProgram,
    RenderTarget,
}

impl BindSlot {
    const COUNT: usize = 5;

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BindSlot::VertexBuffer => "vertex buffer",
            BindSlot::ElementBuffer => "element buffer",
            BindSlot::VertexArray => "vertex array",
            BindSlot::ShaderProgram => "shader program",
            BindSlot::RenderTarget => "render target",
        }
    }
}

impl fmt::Display for BindSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records which id currently occupies each binding slot.
///
/// Binding over an occupied slot, or unbinding an id that does not own the
/// slot, is a contract violation.
#[derive(Debug, Default)]
pub struct BindingTracker {
    slots: [Option<ResourceId>; BindSlot::COUNT],
}

impl BindingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bound(&self, slot: BindSlot) -> Option<ResourceId> {
        self.slots[slot.index()]
    }

    #[inline]
    pub fn is_bound(&self, slot: BindSlot, id: ResourceId) -> bool {
        self.bound(slot) == Some(id)
    }

    pub(crate) fn acquire(&mut self, slot: BindSlot, id: ResourceId) {
        let current = self.slots[slot.index()];
        contract!(
            current.is_none(),
            "binding {slot} {id} while {slot} {} is still bound",
            current.unwrap_or_default()
        );
        self.slots[slot.index()] = Some(id);
    }

    pub(crate) fn release(&mut self, slot: BindSlot, id: ResourceId) {
        let current = self.slots[slot.index()];
        contract!(
            current == Some(id),
            "unbinding {slot} {id} but the bound {slot} is {current:?}"
        );
        self.slots[slot.index()] = None;
    }

    /// Clears `slot` if `id` holds it. Used when an object is deleted while bound.
    pub(crate) fn forget(&mut self, slot: BindSlot, id: ResourceId) {
        if self.is_bound(slot, id) {
            self.slots[slot.index()] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release() {
        let mut tracker = BindingTracker::new();
        tracker.acquire(BindSlot::VertexArray, 3);
        assert!(tracker.is_bound(BindSlot::VertexArray, 3));
        assert_eq!(tracker.bound(BindSlot::ShaderProgram), None);

        tracker.release(BindSlot::VertexArray, 3);
        assert_eq!(tracker.bound(BindSlot::VertexArray), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut tracker = BindingTracker::new();
        tracker.acquire(BindSlot::VertexBuffer, 1);
        tracker.acquire(BindSlot::ElementBuffer, 2);
        tracker.acquire(BindSlot::RenderTarget, 0);
        assert_eq!(tracker.bound(BindSlot::VertexBuffer), Some(1));
        assert_eq!(tracker.bound(BindSlot::ElementBuffer), Some(2));
        assert_eq!(tracker.bound(BindSlot::RenderTarget), Some(0));
    }

    #[test]
    #[should_panic(expected = "contract violated")]
    fn double_bind_violates_contract() {
        let mut tracker = BindingTracker::new();
        tracker.acquire(BindSlot::VertexBuffer, 1);
        tracker.acquire(BindSlot::VertexBuffer, 2);
    }

    #[test]
    #[should_panic(expected = "contract violated")]
    fn unbinding_a_foreign_id_violates_contract() {
        let mut tracker = BindingTracker::new();
        tracker.acquire(BindSlot::ShaderProgram, 4);
        tracker.release(BindSlot::ShaderProgram, 5);
    }

    #[test]
    fn forget_only_clears_matching_id() {
        let mut tracker = BindingTracker::new();
        tracker.acquire(BindSlot::VertexBuffer, 1);
        tracker.forget(BindSlot::VertexBuffer, 9);
        assert!(tracker.is_bound(BindSlot::VertexBuffer, 1));
        tracker.forget(BindSlot::VertexBuffer, 1);
        assert_eq!(tracker.bound(BindSlot::VertexBuffer), None);
    }
}
