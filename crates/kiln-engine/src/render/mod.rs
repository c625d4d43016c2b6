//! Deferred rendering.
//!
//! A [`Renderer`] records [`RenderCommand`] values between `begin` and `end`
//! and executes them against a [`GraphicsDevice`](crate::graphics::GraphicsDevice)
//! in `process_command_queue`:
//!
//! ```ignore
//! renderer.begin(&window, Rgba::BLACK);
//! renderer.draw_mesh(&mesh, Some(&shader));
//! renderer.end();
//! renderer.process_command_queue(&mut device);
//! ```

mod command;
mod renderer;
mod target;

pub use command::{DrawMeshCmd, RenderCommand, TrackedId};
pub use renderer::Renderer;
pub use target::{DefaultFramebuffer, RenderTarget};
