//! Screen-space value types.

mod size;
mod vec2;

pub use size::Size2D;
pub use vec2::Vec2;
