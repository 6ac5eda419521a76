//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipeline, buffers, bind groups) and
//! releases them on drop.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The CPU composes the full MVP; shaders apply it as-is.

mod ctx;
mod rect;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use rect::RectRenderer;
pub use shader::{validate_wgsl, ShaderStage};
