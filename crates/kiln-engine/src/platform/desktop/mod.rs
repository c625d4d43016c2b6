//! Desktop platform: a winit event loop pumped without blocking, and windows
//! with an OpenGL context created through glutin.

mod event_pump;
mod gl_window;
mod keymap;
mod winit_platform;

pub use gl_window::{GlInit, GlWindow};
pub use keymap::map_key;
pub use winit_platform::WinitPlatform;
