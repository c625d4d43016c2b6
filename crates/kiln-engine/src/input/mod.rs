//! Input state tracking.
//!
//! [`InputController`] consumes keyboard and mouse events routed by the
//! application and answers "is this key down" style queries. Platforms
//! translate their native key identifiers into [`KeyCode`].

mod controller;
mod key;

pub use controller::InputController;
pub use key::KeyCode;
