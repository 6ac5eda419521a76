//! Vampire engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the game binary:
//! a single-window winit loop, a wgpu device/surface, and a solid rectangle
//! renderer driven by pixel-space geometry.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
