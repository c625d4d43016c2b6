use std::time::Duration;

use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

use crate::event::{EventSink, QuitEvent};
use crate::platform::{Platform, WindowConfig};

use super::event_pump::EventPump;
use super::gl_window::{GlInit, GlWindow};

/// Desktop [`Platform`] backed by a winit event loop.
///
/// The loop is pumped with a zero timeout whenever the local queue runs dry,
/// so [`poll_events`](Platform::poll_events) never blocks.
pub struct WinitPlatform {
    gl: GlInit,
    event_loop: Option<EventLoop<()>>,
    pump: EventPump,
    exited: bool,
    last_error: Option<String>,
}

impl WinitPlatform {
    pub fn new(gl: GlInit) -> Self {
        Self {
            gl,
            event_loop: None,
            pump: EventPump::default(),
            exited: false,
            last_error: None,
        }
    }

    fn pump_os_events(&mut self) {
        if self.exited {
            return;
        }
        let Some(event_loop) = self.event_loop.as_mut() else {
            return;
        };
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.pump) {
            log::info!("event loop exited with status {code}");
            self.exited = true;
            self.pump.push(QuitEvent);
        }
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new(GlInit::default())
    }
}

impl Platform for WinitPlatform {
    type Window = GlWindow;

    fn name(&self) -> &str {
        "winit"
    }

    fn initialize(&mut self) -> bool {
        if self.event_loop.is_some() {
            return true;
        }
        match EventLoop::new() {
            Ok(event_loop) => {
                log::debug!("winit event loop created");
                self.event_loop = Some(event_loop);
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    fn initialized(&self) -> bool {
        self.event_loop.is_some()
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn poll_events(&mut self, sink: &mut dyn EventSink) -> bool {
        contract!(self.initialized(), "poll_events on an uninitialized platform");
        if self.pump.is_empty() {
            self.pump_os_events();
        }
        let Some(mut event) = self.pump.pop() else {
            return false;
        };
        sink.process_event(&mut event);
        true
    }

    fn create_window(&mut self, config: &WindowConfig) -> anyhow::Result<GlWindow> {
        let Some(event_loop) = self.event_loop.as_ref() else {
            anyhow::bail!("platform is not initialized");
        };
        GlWindow::create(event_loop, config, &self.gl, self.pump.resize_handle())
    }
}
