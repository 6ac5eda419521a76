//! Frame timing.
//!
//! The runtime owns one `FrameClock` and ticks it once per redraw; the
//! resulting `FrameTime` reaches the app through `UpdateCtx` and `FrameCtx`.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
