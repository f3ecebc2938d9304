//! `main_window`: the Python entry point that runs the input window.
//!
//! The event loop runs with the GIL released. [`PyKeyHandler`] reacquires it
//! for each key edge (to call the user's handler) and on every idle tick (to
//! run pending signal handlers, so Ctrl-C reaches Python while the window is
//! open).

use std::cell::RefCell;

use input_window::prelude::*;
use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::keycode::keycode_members;

thread_local! {
    /// winit allows a single event loop per process; it is created lazily on
    /// the first call and reused afterwards.
    static RUNNER: RefCell<Option<WindowRunner>> = const { RefCell::new(None) };
}

// ---------------------------------------------------------------------------
// PyKeyHandler
// ---------------------------------------------------------------------------

/// Bridges runner callbacks into Python.
struct PyKeyHandler {
    callback: Py<PyAny>,
    /// `KeyCode` members indexed by key code.
    members: Vec<Py<PyAny>>,
    /// Exception raised by a signal handler; re-raised after the loop exits.
    pending: Option<PyErr>,
}

impl KeyHandler for PyKeyHandler {
    fn key(&mut self, event: KeyEvent) {
        Python::with_gil(|py| {
            let Some(member) = self.members.get(event.key.code() as usize) else {
                tracing::warn!(key = %event.key, "no KeyCode member for key -- dropping event");
                return;
            };
            let args = (event.scancode, member.clone_ref(py), event.pressed);
            if let Err(err) = self.callback.call1(py, args) {
                tracing::debug!(key = %event.key, pressed = event.pressed, "key handler raised");
                err.print(py);
            }
        });
    }

    fn idle(&mut self) -> LoopAction {
        Python::with_gil(|py| match py.check_signals() {
            Ok(()) => LoopAction::Continue,
            Err(err) => {
                self.pending = Some(err);
                LoopAction::Exit
            }
        })
    }
}

// ---------------------------------------------------------------------------
// main_window
// ---------------------------------------------------------------------------

/// Open the input window and call ``handler(scancode, key, pressed)`` for
/// every key press and release until the window is closed.
///
/// Args:
///     handler: Callable receiving ``(int, KeyCode, bool)``.
///     title: Window title (default ``"py_input_window"``).
///     width: Initial width in physical pixels. Overrides
///         ``PY_INPUT_WINDOW_WIDTH``.
///     height: Initial height in physical pixels. Overrides
///         ``PY_INPUT_WINDOW_HEIGHT``.
///
/// Each keyword overrides only its own setting. Width and height must end
/// up either both set or both unset, and each must lie in ``1..=2**32-1``;
/// otherwise ``ValueError`` is raised.
///
/// Exceptions raised by ``handler`` are printed and otherwise ignored. An
/// exception raised by a signal handler (e.g. ``KeyboardInterrupt``) closes
/// the window and is re-raised.
#[pyfunction]
#[pyo3(pass_module, signature = (handler, title=None, width=None, height=None))]
pub fn main_window(
    module: &Bound<'_, PyModule>,
    handler: &Bound<'_, PyAny>,
    title: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
) -> PyResult<()> {
    if !handler.is_callable() {
        return Err(PyTypeError::new_err(format!(
            "handler must be callable, got {}",
            handler.get_type().name()?
        )));
    }

    let config = build_config(title, width, height)?;
    let mut key_handler = PyKeyHandler {
        callback: handler.clone().unbind(),
        members: keycode_members(module)?,
        pending: None,
    };

    let summary = module
        .py()
        .allow_threads(|| run_on_this_thread(&config, &mut key_handler))?;
    tracing::debug!(key_events = summary.key_events, exit = ?summary.exit, "main_window returned");

    match key_handler.pending.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Environment defaults overridden field by field by the keyword arguments.
fn build_config(
    title: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
) -> PyResult<WindowConfig> {
    let config = WindowConfig::from_env()
        .and_then(|config| config.with_overrides(title, width, height))
        .map_err(config_error)?;
    config.validate().map_err(config_error)?;
    Ok(config)
}

fn run_on_this_thread(config: &WindowConfig, handler: &mut PyKeyHandler) -> PyResult<RunSummary> {
    RUNNER.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| {
            PyRuntimeError::new_err("main_window is already running on this thread")
        })?;
        // The borrow stays held for the whole run so a handler that calls
        // main_window again gets an error instead of a second loop.
        let mut runner = match slot.take() {
            Some(runner) => runner,
            None => WindowRunner::new().map_err(window_error)?,
        };
        let result = runner.run(config, handler);
        *slot = Some(runner);
        result.map_err(window_error)
    })
}

fn config_error(err: ConfigError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn window_error(err: WindowError) -> PyErr {
    match err {
        WindowError::Config(err) => config_error(err),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}
