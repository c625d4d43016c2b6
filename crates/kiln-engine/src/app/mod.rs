//! Application shell.
//!
//! [`Application`] owns the platform, the main window, the graphics device and
//! the renderer, and drives the frame loop. Per-frame behaviour comes from an
//! optional [`Layer`].

mod application;
mod layer;

pub use application::{AppConfig, Application};
pub use layer::{FrameCtx, Layer};
