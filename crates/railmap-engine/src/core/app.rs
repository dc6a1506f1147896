use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Whether the runtime should keep going after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// A program driven by [`Runtime`](crate::window::Runtime).
///
/// Input is already folded into [`FrameCtx::input`] before `on_frame` runs, so most
/// apps only implement `on_frame`.
pub trait App {
    /// Raw window events, after input translation.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Once, after the window has closed or an exit was requested.
    fn on_exit(&mut self) {}
}
