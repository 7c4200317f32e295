use winit::dpi::PhysicalSize;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the harness binary.
pub trait App {
    /// Called once after the window and GPU context exist, before the first
    /// frame. This is where all GPU resources are created. An error is
    /// fatal: the render loop never starts and the runtime returns it.
    fn on_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()>;

    /// Called when the window's drawable size changes.
    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        let _ = size;
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
