use crate::event::{
    Event, EventCategory, EventDispatcher, EventSink, EventTrace, QuitEvent,
};
use crate::graphics::GraphicsDevice;
use crate::input::InputController;
use crate::paint::Rgba;
use crate::platform::{Platform, Window, WindowConfig};
use crate::render::Renderer;

use super::layer::{FrameCtx, Layer};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// Color the main pass is cleared to every frame.
    pub clear_color: Rgba,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: Rgba::MAGENTA,
        }
    }
}

/// The frame loop and everything it owns.
///
/// Construction brings up the platform, the main window and the graphics
/// device. If any step fails the error is logged and
/// [`initialized`](Self::initialized) stays `false`.
///
/// Fields drop in declaration order: the layer is detached first (see `Drop`),
/// then the device goes before the window that owns its context.
pub struct Application<P: Platform> {
    layer: Option<Box<dyn Layer>>,
    device: Option<GraphicsDevice>,
    window: Option<P::Window>,
    platform: P,
    renderer: Renderer,
    input: InputController,
    trace: EventTrace,
    config: AppConfig,
    running: bool,
    initialized: bool,
    loop_count: u64,
    events_processed: u64,
}

impl<P: Platform> Application<P> {
    pub fn new(platform: P, config: AppConfig) -> Self {
        let mut app = Self {
            layer: None,
            device: None,
            window: None,
            platform,
            renderer: Renderer::new(),
            input: InputController::new(),
            trace: EventTrace::new(),
            config,
            running: false,
            initialized: false,
            loop_count: 0,
            events_processed: 0,
        };
        app.initialize();
        app
    }

    fn initialize(&mut self) {
        if !self.platform.initialize() {
            log::error!(
                "Failed to create application - {} platform failed to initialize: {}",
                self.platform.name(),
                self.platform.last_error().unwrap_or("no details")
            );
            return;
        }

        let config = &self.config.window;
        log::info!("Creating main window \"{}\" ({})", config.title, config.size);
        let mut window = match self.platform.create_window(config) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create application - main window could not be created: {e:#}");
                return;
            }
        };
        if !window.created() {
            log::error!("Failed to create application - main window reports it was not created");
            return;
        }

        let Some(backend) = window.load_backend() else {
            log::error!("Failed to create application - no graphics backend for the main window");
            return;
        };

        self.device = Some(GraphicsDevice::new(backend));
        self.window = Some(window);
        self.initialized = true;
        log::info!("Application initialized on {}", self.platform.name());
    }

    /// Installs the per-frame layer, detaching any previous one.
    pub fn set_layer(&mut self, mut layer: Box<dyn Layer>) {
        let Some(device) = self.device.as_mut() else {
            log::warn!("set_layer on an uninitialized application; layer dropped");
            return;
        };
        if let Some(mut previous) = self.layer.take() {
            previous.on_detach(device);
        }
        layer.on_attach(device);
        self.layer = Some(layer);
    }

    /// Runs frames until a quit or exit request, or until `max_loops` total
    /// iterations have run. Each call starts running again, so a stopped
    /// application can be resumed.
    pub fn run(&mut self, max_loops: Option<u64>) {
        if !contract!(self.initialized, "Application::run on an uninitialized application") {
            return;
        }

        self.running = true;

        while self.running && max_loops.is_none_or(|max| self.loop_count < max) {
            self.process_events();
            self.render_frame();
            self.loop_count += 1;
        }

        self.trace.flush();
        log::debug!(
            "loop finished after {} iterations, {} events",
            self.loop_count,
            self.events_processed
        );
    }

    /// Starts a new input frame and drains every pending platform event.
    pub fn process_events(&mut self) {
        self.input.new_frame();

        let mut router = EventRouter {
            input: &mut self.input,
            trace: &mut self.trace,
            running: &mut self.running,
        };
        while self.platform.poll_events(&mut router) {
            self.events_processed += 1;
        }
    }

    fn render_frame(&mut self) {
        let (Some(window), Some(device)) = (self.window.as_mut(), self.device.as_mut()) else {
            return;
        };

        self.renderer.begin(&*window, self.config.clear_color);
        let mut exit_requested = false;
        if let Some(layer) = self.layer.as_mut() {
            let mut ctx = FrameCtx::new(&mut self.renderer, &self.input, self.loop_count);
            layer.on_frame(&mut ctx);
            exit_requested = ctx.exit_requested();
        }
        self.renderer.end();
        self.renderer.process_command_queue(device);

        if !window.swap_buffers() {
            log::warn!("frame {} was not presented", self.loop_count);
        }

        if exit_requested {
            log::info!("exit requested by layer");
            self.running = false;
        }
    }

    #[inline]
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn loop_count(&self) -> u64 {
        self.loop_count
    }

    #[inline]
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn input(&self) -> &InputController {
        &self.input
    }

    #[inline]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[inline]
    pub fn window(&self) -> Option<&P::Window> {
        self.window.as_ref()
    }

    #[inline]
    pub fn device_mut(&mut self) -> Option<&mut GraphicsDevice> {
        self.device.as_mut()
    }
}

impl<P: Platform> Drop for Application<P> {
    fn drop(&mut self) {
        if let (Some(mut layer), Some(device)) = (self.layer.take(), self.device.as_mut()) {
            layer.on_detach(device);
        }
    }
}

/// Routes polled events: keyboard and mouse to the input controller, quit to
/// the run flag.
struct EventRouter<'a> {
    input: &'a mut InputController,
    trace: &'a mut EventTrace,
    running: &'a mut bool,
}

impl EventSink for EventRouter<'_> {
    fn process_event(&mut self, event: &mut Event) {
        self.trace.record(event.event_type());

        if matches!(event.category(), EventCategory::Keyboard | EventCategory::Mouse) {
            self.input.process_event(event);
            return;
        }

        let mut d = EventDispatcher::new(event);
        d.dispatch::<QuitEvent, _>(|_| {
            *self.running = false;
            true
        });
    }
}
