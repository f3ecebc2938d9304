//! Input Window -- a native window that reports keyboard press/release edges.
//!
//! The crate has a pure core and an optional windowing layer:
//!
//! - [`key`]: the logical key table with stable numeric codes.
//! - [`tracker`]: held-key tracking that turns raw input (including
//!   auto-repeat) into clean press/release edges.
//! - [`config`]: window configuration with environment overrides.
//! - `physical` and `runner` (feature `window`): winit key mapping and the
//!   event loop that feeds a [`KeyHandler`](runner::KeyHandler).
//!
//! # Quick Start
//!
//! ```
//! use input_window::prelude::*;
//!
//! let mut tracker = KeyTracker::new();
//! let edge = tracker.observe(30, Key::A, KeyState::Pressed);
//! assert_eq!(edge.map(|e| e.pressed), Some(true));
//!
//! // Auto-repeat produces no second edge.
//! assert!(tracker.observe(30, Key::A, KeyState::Pressed).is_none());
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod key;
pub mod tracker;

#[cfg(feature = "window")]
pub mod physical;
#[cfg(feature = "window")]
pub mod runner;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{ConfigError, WindowConfig};
    pub use crate::key::{Key, UnknownKeyName};
    pub use crate::tracker::{KeyEvent, KeyState, KeyTracker};

    #[cfg(feature = "window")]
    pub use crate::runner::{
        ExitReason, KeyHandler, LoopAction, RunSummary, WindowError, WindowRunner,
    };
}
