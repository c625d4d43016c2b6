use std::num::NonZeroU32;

use anyhow::{anyhow, Context};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::Window as WinitWindow;

use crate::graphics::{Backend, FramebufferId, GlowBackend, DEFAULT_FRAMEBUFFER};
use crate::platform::{Window, WindowConfig};
use crate::render::RenderTarget;

use super::event_pump::PendingResize;

/// OpenGL context parameters.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core profile version (major, minor).
    pub version: (u8, u8),
    pub vsync: bool,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// Ask the driver for a debug context.
    pub debug_context: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            vsync: true,
            depth_bits: 24,
            stencil_bits: 8,
            debug_context: cfg!(debug_assertions),
        }
    }
}

/// A winit window with a current OpenGL context and its surface.
///
/// Field order is drop order: context, surface, then the window.
pub struct GlWindow {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: WinitWindow,
    display: Display,
    pending_resize: PendingResize,
}

impl GlWindow {
    pub(super) fn create(
        event_loop: &EventLoop<()>,
        config: &WindowConfig,
        init: &GlInit,
        pending_resize: PendingResize,
    ) -> anyhow::Result<Self> {
        let attributes = WinitWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.size.width, config.size.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(init.depth_bits)
            .with_stencil_size(init.stencil_bits);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to pick an OpenGL config: {e}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let display = gl_config.display();
        let (major, minor) = init.version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .with_debug(init.debug_context)
            .build(Some(raw_handle));

        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create the window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make the OpenGL context current")?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {e}");
            }
        }

        let size = window.inner_size();
        log::info!(
            "window \"{}\" created ({}x{} physical, {} samples)",
            config.title,
            size.width,
            size.height,
            gl_config.num_samples()
        );

        Ok(Self {
            context,
            surface,
            window,
            display,
            pending_resize,
        })
    }

    #[inline]
    pub fn winit_window(&self) -> &WinitWindow {
        &self.window
    }

    /// Applies the most recent `Resized` event to the surface.
    fn apply_pending_resize(&mut self) {
        let Some(size) = self.pending_resize.take() else {
            return;
        };
        // Minimized windows report 0x0; keep the old surface until restored.
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, width, height);
            log::debug!("surface resized to {}x{}", size.width, size.height);
        }
    }
}

/// Prefers the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin offers at least one config")
}

impl RenderTarget for GlWindow {
    #[inline]
    fn framebuffer(&self) -> FramebufferId {
        DEFAULT_FRAMEBUFFER
    }
}

impl Window for GlWindow {
    fn created(&self) -> bool {
        self.context.is_current()
    }

    fn swap_buffers(&mut self) -> bool {
        self.apply_pending_resize();
        match self.surface.swap_buffers(&self.context) {
            Ok(()) => true,
            Err(e) => {
                log::error!("swap buffers failed: {e}");
                false
            }
        }
    }

    fn load_backend(&mut self) -> Option<Box<dyn Backend>> {
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| self.display.get_proc_address(symbol))
        };
        Some(Box::new(GlowBackend::new(gl)))
    }
}
