use std::cell::RefCell;
use std::rc::Rc;

use winit::window::Window;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputFrame;
use crate::render::{BackendRef, Command, RenderBackend, WgpuBackend};

use super::app::AppControl;

/// The window an app callback runs against.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Inner size in physical pixels.
    pub fn viewport(&self) -> Viewport {
        let size = self.window.inner_size();
        Viewport::new(size.width as f32, size.height as f32)
    }
}

/// Passed to [`App::on_start`](super::App::on_start).
pub struct StartCtx<'a> {
    pub window: WindowCtx<'a>,
    /// Shared backend every drawable records into.
    pub backend: BackendRef,
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `'a` is the callback duration; `'w` is the window borrow carried by
/// `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub backend: &'a Rc<RefCell<WgpuBackend>>,
    /// Input that arrived since the previous frame.
    pub input_frame: &'a InputFrame,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Renders one frame: sets the viewport to the window, clears to `clear`,
    /// runs `draw` (which records into the shared backend), then encodes and
    /// presents.
    ///
    /// A surface error skips the frame; a fatal one returns `Exit`.
    pub fn render<F>(&mut self, clear: ColorRgba, draw: F) -> AppControl
    where
        F: FnOnce(),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let size = self.gpu.size();
        {
            let mut b = self.backend.borrow_mut();
            b.record(Command::Viewport {
                width: size.width,
                height: size.height,
            });
            b.record(Command::Clear(clear));
        }

        draw();

        self.backend.borrow_mut().end_frame(&mut frame);

        self.window.window.pre_present_notify();
        self.gpu.present(frame);

        AppControl::Continue
    }
}
