//! PyO3 Python bindings for the input window.
//!
//! The `py_input_window.py_input_window` native module exposes a `KeyCode`
//! `IntEnum` built from the Rust key table and `main_window`, which opens a
//! window and calls a Python handler for every key press and release.

#![deny(unsafe_code)]

use pyo3::prelude::*;

mod keycode;
mod logging;
mod window;

/// The `py_input_window.py_input_window` native module.
#[pymodule]
fn py_input_window(m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init();
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(keycode::ENUM_NAME, keycode::define_keycode_enum(m.py())?)?;
    m.add_function(wrap_pyfunction!(window::main_window, m)?)?;
    Ok(())
}
