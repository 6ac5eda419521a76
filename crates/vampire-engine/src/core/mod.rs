//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the game,
//! without leaking winit event types into game code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, LoadCtx, UpdateCtx};

pub(crate) use ctx::logical_viewport;
