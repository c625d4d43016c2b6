use crate::graphics::GraphicsDevice;
use crate::input::InputController;
use crate::render::Renderer;

/// Per-frame context handed to [`Layer::on_frame`].
///
/// The renderer is already recording into the main window.
pub struct FrameCtx<'a> {
    pub renderer: &'a mut Renderer,
    pub input: &'a InputController,
    /// Index of the current loop iteration, starting at 0.
    pub frame_index: u64,
    exit_requested: bool,
}

impl<'a> FrameCtx<'a> {
    pub fn new(renderer: &'a mut Renderer, input: &'a InputController, frame_index: u64) -> Self {
        Self {
            renderer,
            input,
            frame_index,
            exit_requested: false,
        }
    }

    /// Stops the loop after this frame is presented.
    #[inline]
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    #[inline]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Application behaviour plugged into the frame loop.
pub trait Layer {
    /// Called once the graphics device exists. Create GPU resources here.
    fn on_attach(&mut self, device: &mut GraphicsDevice) {
        let _ = device;
    }

    /// Called every frame between `begin` and `end` of the main pass.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>);

    /// Called before the device goes away. Release GPU resources here.
    fn on_detach(&mut self, device: &mut GraphicsDevice) {
        let _ = device;
    }
}
