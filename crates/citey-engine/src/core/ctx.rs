use winit::window::Window;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// `'a` is the callback duration, `'w` the window borrow carried by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Drawable size in physical pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::from(self.gpu.size())
    }

    /// Clears the surface with `clear`, calls `draw`, then presents.
    ///
    /// Surface errors skip the frame; a fatal one returns `AppControl::Exit`.
    pub fn render<F>(&mut self, clear: ColorRgba, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to present into.
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            viewport,
        );

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            drop(target.color_pass("citey clear", wgpu::LoadOp::Clear(clear.to_wgpu())));
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
