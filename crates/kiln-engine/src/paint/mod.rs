//! Colors.

mod color;

pub use color::Rgba;
