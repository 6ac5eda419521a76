use anyhow::Result;

use crate::coords::Viewport;
use crate::input::{InputEvent, InputState};

use super::ctx::{FrameCtx, LoadCtx, UpdateCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game.
///
/// Per frame the runtime calls, in order: `on_resize` (when the window size
/// changed), `on_update`, then `on_frame`, which renders and presents.
pub trait App {
    /// Called once after the window and GPU are ready, before the first frame.
    ///
    /// An error here is fatal: the runtime stops and returns it.
    fn on_load(&mut self, ctx: &LoadCtx<'_>) -> Result<()>;

    /// Called when the window's logical size changes.
    fn on_resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Called for every translated input event, after `input` has absorbed it.
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        let _ = (event, input);
        AppControl::Continue
    }

    /// Called once per frame before rendering.
    fn on_update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called once per frame to render and present.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
