//! Kiln engine crate.
//!
//! Event dispatch, input tracking, GPU resource objects, a deferred render
//! command queue and the application loop that ties them to a platform.

#[macro_use]
pub mod contract;

pub mod app;
pub mod coords;
pub mod event;
pub mod graphics;
pub mod input;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod render;
