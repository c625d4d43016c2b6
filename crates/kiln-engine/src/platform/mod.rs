//! Platform collaborators: event source, window and graphics context.
//!
//! The application talks to these traits only. [`desktop`] provides the
//! winit + glutin implementation.

pub mod desktop;

use crate::coords::Size2D;
use crate::event::EventSink;
use crate::graphics::Backend;
use crate::render::RenderTarget;

/// Main window parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Inner size in logical pixels.
    pub size: Size2D,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kiln Application".to_string(),
            size: Size2D::new(1280, 720),
        }
    }
}

/// OS integration: startup, event polling and window creation.
pub trait Platform {
    type Window: Window;

    fn name(&self) -> &str;

    /// Brings the platform up. Returns `false` and records
    /// [`last_error`](Self::last_error) on failure.
    fn initialize(&mut self) -> bool;

    fn initialized(&self) -> bool;

    fn last_error(&self) -> Option<&str>;

    /// Delivers at most one pending event to `sink`.
    ///
    /// Non-blocking: returns `false` when no event was pending.
    fn poll_events(&mut self, sink: &mut dyn EventSink) -> bool;

    fn create_window(&mut self, config: &WindowConfig) -> anyhow::Result<Self::Window>;
}

/// A window with a graphics context, drawable as a render target.
pub trait Window: RenderTarget {
    fn created(&self) -> bool;

    /// Presents the back buffer. `false` if presentation failed.
    fn swap_buffers(&mut self) -> bool;

    /// Builds the graphics backend for this window's context.
    fn load_backend(&mut self) -> Option<Box<dyn Backend>>;
}
