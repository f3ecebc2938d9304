//! The Python `KeyCode` enum.
//!
//! Built at import time with `enum.IntEnum`'s functional API from
//! [`input_window::key::table`], so Python member values are exactly the
//! Rust key codes.

use input_window::key::{self, Key};
use pyo3::prelude::*;
use pyo3::types::IntoPyDict;

/// Attribute name of the enum on the native module.
pub const ENUM_NAME: &str = "KeyCode";

/// Module the enum claims to live in (the package re-exports it).
const ENUM_MODULE: &str = "py_input_window";

/// Create the `KeyCode` enum class.
pub fn define_keycode_enum(py: Python<'_>) -> PyResult<Bound<'_, PyAny>> {
    let int_enum = py.import("enum")?.getattr("IntEnum")?;
    let members: Vec<(&str, u32)> = key::table().collect();
    let kwargs = [("module", ENUM_MODULE)].into_py_dict(py)?;
    int_enum.call((ENUM_NAME, members), Some(&kwargs))
}

/// Every enum member, indexed by key code.
///
/// Looked up once per window run so the key callback only clones a
/// reference.
pub fn keycode_members(module: &Bound<'_, PyModule>) -> PyResult<Vec<Py<PyAny>>> {
    let keycode = module.getattr(ENUM_NAME)?;
    Key::ALL
        .iter()
        .map(|key| keycode.call1((key.code(),)).map(Bound::unbind))
        .collect()
}
