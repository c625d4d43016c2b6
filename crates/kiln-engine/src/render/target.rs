use crate::graphics::{FramebufferId, DEFAULT_FRAMEBUFFER};

/// Something a render pass can draw into.
pub trait RenderTarget {
    fn framebuffer(&self) -> FramebufferId;
}

/// The window-system framebuffer of the current context.
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultFramebuffer;

impl RenderTarget for DefaultFramebuffer {
    #[inline]
    fn framebuffer(&self) -> FramebufferId {
        DEFAULT_FRAMEBUFFER
    }
}
