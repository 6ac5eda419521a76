//! Coordinate and geometry types shared by the renderer and the game.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Projection` converts that space to NDC on the CPU; shaders only see the
//! final MVP matrix.

mod color;
mod projection;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgb;
pub use projection::{rect_model, rect_mvp, Projection};
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
