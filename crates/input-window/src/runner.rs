//! Windowed event loop that forwards keyboard edges to a [`KeyHandler`].
//!
//! [`WindowRunner`] owns the winit [`EventLoop`]. winit only allows one
//! event loop per process, so the runner keeps it alive between runs and
//! drives it with `run_app_on_demand`; each [`WindowRunner::run`] opens a
//! fresh window and returns once that window is closed or the handler asks
//! to stop.
//!
//! This module is feature-gated behind `window`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopBuilder};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::{ConfigError, WindowConfig};
use crate::physical::{key_from_physical, scancode_of};
use crate::tracker::{KeyEvent, KeyState, KeyTracker};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors produced while running the input window.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("invalid window configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    /// winit refused to build an event loop on this thread (macOS only
    /// allows the main thread).
    #[error("cannot create the event loop on this thread: {0}")]
    ThreadUnsupported(String),

    /// The platform cannot re-run an event loop.
    #[error("the input window is not supported on this platform")]
    Unsupported,
}

/// What the loop should do after an idle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Exit,
}

/// Receives keyboard edges from the window.
pub trait KeyHandler {
    /// Called once per press or release edge.
    fn key(&mut self, event: KeyEvent);

    /// Called whenever the loop has drained its pending events, and at least
    /// once per [`WindowConfig::interrupt_poll`].
    fn idle(&mut self) -> LoopAction {
        LoopAction::Continue
    }
}

impl<H: KeyHandler + ?Sized> KeyHandler for &mut H {
    fn key(&mut self, event: KeyEvent) {
        (**self).key(event);
    }

    fn idle(&mut self) -> LoopAction {
        (**self).idle()
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user closed the window.
    WindowClosed,
    /// [`KeyHandler::idle`] returned [`LoopAction::Exit`].
    HandlerExit,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of edges delivered to the handler.
    pub key_events: u64,
    pub exit: ExitReason,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Window-independent half of the app: key filtering and handler calls.
pub struct Dispatcher<H> {
    handler: H,
    tracker: KeyTracker,
    key_events: u64,
}

impl<H: KeyHandler> Dispatcher<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            tracker: KeyTracker::new(),
            key_events: 0,
        }
    }

    /// Feed one raw keyboard input from the window.
    ///
    /// Returns `true` if an edge was delivered to the handler.
    pub fn key_input(&mut self, physical: PhysicalKey, state: ElementState) -> bool {
        let PhysicalKey::Code(code) = physical else {
            tracing::trace!(?physical, "ignoring unidentified physical key");
            return false;
        };
        let Some(key) = key_from_physical(code) else {
            tracing::trace!(?code, "no logical key for physical key");
            return false;
        };
        let state = match state {
            ElementState::Pressed => KeyState::Pressed,
            ElementState::Released => KeyState::Released,
        };
        match self.tracker.observe(scancode_of(physical), key, state) {
            Some(event) => {
                self.key_events += 1;
                self.handler.key(event);
                true
            }
            None => false,
        }
    }

    pub fn idle(&mut self) -> LoopAction {
        self.handler.idle()
    }

    pub fn key_events(&self) -> u64 {
        self.key_events
    }

    pub fn tracker(&self) -> &KeyTracker {
        &self.tracker
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Drop held-key state at the end of a run.
    fn finish(&mut self) {
        let held = self.tracker.release_all();
        if !held.is_empty() {
            tracing::debug!(?held, "keys still held when the window closed");
        }
    }
}

// ---------------------------------------------------------------------------
// WindowRunner
// ---------------------------------------------------------------------------

/// Owner of the process-wide event loop.
pub struct WindowRunner {
    event_loop: EventLoop<()>,
}

impl WindowRunner {
    /// Create the event loop.
    ///
    /// Any thread is accepted on Linux, the BSDs and Windows. macOS only
    /// accepts the main thread; elsewhere this returns
    /// [`WindowError::ThreadUnsupported`] instead of panicking.
    pub fn new() -> Result<Self, WindowError> {
        let mut builder = EventLoop::builder();
        allow_any_thread(&mut builder);
        let event_loop = panic::catch_unwind(AssertUnwindSafe(|| builder.build()))
            .map_err(|payload| WindowError::ThreadUnsupported(panic_message(&*payload)))??;
        Ok(Self { event_loop })
    }

    /// Open a window and dispatch keyboard input to `handler` until the
    /// window closes or the handler exits.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid, the window cannot be
    /// created, or the event loop fails.
    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    ))]
    pub fn run<H: KeyHandler>(
        &mut self,
        config: &WindowConfig,
        handler: H,
    ) -> Result<RunSummary, WindowError> {
        use winit::platform::run_on_demand::EventLoopExtRunOnDemand;

        config.validate()?;

        let mut app = InputApp {
            config: config.clone(),
            window: None,
            dispatcher: Dispatcher::new(handler),
            exit: None,
            init_error: None,
        };

        self.event_loop.run_app_on_demand(&mut app)?;

        if let Some(err) = app.init_error {
            return Err(WindowError::CreateWindow(err));
        }

        let summary = RunSummary {
            key_events: app.dispatcher.key_events(),
            exit: app.exit.unwrap_or(ExitReason::WindowClosed),
        };
        tracing::info!(
            key_events = summary.key_events,
            exit = ?summary.exit,
            "input window closed"
        );
        Ok(summary)
    }

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    )))]
    pub fn run<H: KeyHandler>(
        &mut self,
        config: &WindowConfig,
        _handler: H,
    ) -> Result<RunSummary, WindowError> {
        config.validate()?;
        Err(WindowError::Unsupported)
    }
}

#[cfg(any(
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    use winit::platform::x11::EventLoopBuilderExtX11;

    // Shared with the Wayland backend.
    builder.with_any_thread(true);
}

#[cfg(target_os = "windows")]
fn allow_any_thread(builder: &mut EventLoopBuilder<()>) {
    use winit::platform::windows::EventLoopBuilderExtWindows;

    builder.with_any_thread(true);
}

#[cfg(not(any(
    target_os = "windows",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
fn allow_any_thread(_builder: &mut EventLoopBuilder<()>) {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "event loop construction panicked".to_owned()
    }
}

// ---------------------------------------------------------------------------
// InputApp
// ---------------------------------------------------------------------------

/// The winit application handler for a single run.
struct InputApp<H> {
    config: WindowConfig,
    /// Created in `resumed`; dropped as soon as the run is over so the
    /// window disappears before control returns to the caller.
    window: Option<Window>,
    dispatcher: Dispatcher<H>,
    /// Set once the run has decided to stop.
    exit: Option<ExitReason>,
    init_error: Option<winit::error::OsError>,
}

impl<H: KeyHandler> InputApp<H> {
    fn is_our_window(&self, window_id: WindowId) -> bool {
        self.window.as_ref().is_some_and(|w| w.id() == window_id)
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop, reason: ExitReason) {
        if self.exit.is_none() {
            self.exit = Some(reason);
        }
        self.window = None;
        self.dispatcher.finish();
        event_loop.exit();
    }
}

impl<H: KeyHandler> ApplicationHandler for InputApp<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit.is_some() || self.init_error.is_some() {
            return;
        }

        let mut attrs = WindowAttributes::default().with_title(self.config.title.clone());
        if let Some((width, height)) = self.config.size() {
            attrs = attrs.with_inner_size(winit::dpi::PhysicalSize::new(width, height));
        }

        match event_loop.create_window(attrs) {
            Ok(window) => {
                tracing::info!(
                    title = %self.config.title,
                    width = ?self.config.width,
                    height = ?self.config.height,
                    "input window created"
                );
                self.window = Some(window);
                event_loop.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + self.config.interrupt_poll,
                ));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create input window -- exiting");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.is_our_window(window_id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                tracing::debug!("window close requested");
                self.stop(event_loop, ExitReason::WindowClosed);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.dispatcher.key_input(event.physical_key, event.state);
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::Key(raw) = event {
            tracing::trace!(?device_id, ?raw, "device key event");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit.is_some() || self.window.is_none() {
            return;
        }
        match self.dispatcher.idle() {
            LoopAction::Continue => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(
                    Instant::now() + self.config.interrupt_poll,
                ));
            }
            LoopAction::Exit => {
                tracing::debug!("handler requested exit");
                self.stop(event_loop, ExitReason::HandlerExit);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use winit::keyboard::{KeyCode, NativeKeyCode};

    #[derive(Default)]
    struct Recorder {
        events: Vec<KeyEvent>,
        idles: u32,
        exit_after: Option<u32>,
    }

    impl KeyHandler for Recorder {
        fn key(&mut self, event: KeyEvent) {
            self.events.push(event);
        }

        fn idle(&mut self) -> LoopAction {
            self.idles += 1;
            match self.exit_after {
                Some(n) if self.idles >= n => LoopAction::Exit,
                _ => LoopAction::Continue,
            }
        }
    }

    fn code(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn dispatcher_delivers_edges_only() {
        let mut d = Dispatcher::new(Recorder::default());

        assert!(d.key_input(code(KeyCode::KeyW), ElementState::Pressed));
        assert!(!d.key_input(code(KeyCode::KeyW), ElementState::Pressed));
        assert!(!d.key_input(code(KeyCode::KeyW), ElementState::Pressed));
        assert!(d.key_input(code(KeyCode::KeyW), ElementState::Released));
        assert!(!d.key_input(code(KeyCode::KeyW), ElementState::Released));

        let events = &d.handler().events;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].key, Key::W);
        assert!(events[0].pressed);
        assert_eq!(events[1].key, Key::W);
        assert!(!events[1].pressed);
        assert_eq!(d.key_events(), 2);
    }

    #[test]
    fn dispatcher_ignores_unmapped_keys() {
        let mut d = Dispatcher::new(Recorder::default());

        assert!(!d.key_input(code(KeyCode::F30), ElementState::Pressed));
        assert!(!d.key_input(
            PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
            ElementState::Pressed
        ));
        assert!(d.handler().events.is_empty());
        assert_eq!(d.tracker().held_count(), 0);
    }

    #[test]
    fn dispatcher_tracks_held_keys() {
        let mut d = Dispatcher::new(Recorder::default());
        d.key_input(code(KeyCode::ShiftLeft), ElementState::Pressed);
        d.key_input(code(KeyCode::KeyA), ElementState::Pressed);

        assert!(d.tracker().is_held(Key::LShift));
        assert!(d.tracker().is_held(Key::A));

        d.finish();
        assert_eq!(d.tracker().held_count(), 0);
    }

    #[test]
    fn idle_forwards_handler_decision() {
        let mut d = Dispatcher::new(Recorder {
            exit_after: Some(3),
            ..Default::default()
        });
        assert_eq!(d.idle(), LoopAction::Continue);
        assert_eq!(d.idle(), LoopAction::Continue);
        assert_eq!(d.idle(), LoopAction::Exit);
    }

    #[test]
    fn default_idle_continues() {
        struct Quiet;
        impl KeyHandler for Quiet {
            fn key(&mut self, _event: KeyEvent) {}
        }
        let mut d = Dispatcher::new(Quiet);
        assert_eq!(d.idle(), LoopAction::Continue);
    }

    #[test]
    fn window_error_messages() {
        let err = WindowError::from(ConfigError::ZeroInterruptPoll);
        assert_eq!(
            err.to_string(),
            "invalid window configuration: interrupt poll interval must be positive"
        );
        assert_eq!(
            WindowError::Unsupported.to_string(),
            "the input window is not supported on this platform"
        );
    }

    #[test]
    fn new_off_the_main_thread_does_not_panic() {
        // No display may be available; only the absence of a panic matters.
        let joined = std::thread::spawn(|| match WindowRunner::new() {
            Ok(_) => true,
            Err(err) => {
                assert!(!err.to_string().is_empty());
                false
            }
        })
        .join();
        assert!(joined.is_ok(), "WindowRunner::new panicked off the main thread");
    }

    #[test]
    fn panic_messages_are_recovered() {
        let payload: Box<dyn Any + Send> = Box::new("on the main thread");
        assert_eq!(panic_message(&*payload), "on the main thread");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(&*payload), "event loop construction panicked");
    }
}
