//! Mapping from winit physical keys to the logical key table.
//!
//! The table predates winit's physical key codes, so a few logical keys
//! (`Compose`, `Caret`, `At`, `Colon`, ...) have no physical counterpart and
//! are never produced. Where two logical keys compete for one physical code,
//! the `Web*` family wins over `Navigate*`.

use winit::keyboard::{KeyCode, PhysicalKey};

use crate::key::Key;

/// Logical key for a winit physical key code, if the table has one.
pub fn key_from_physical(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Digit1 => Key::Key1,
        KeyCode::Digit2 => Key::Key2,
        KeyCode::Digit3 => Key::Key3,
        KeyCode::Digit4 => Key::Key4,
        KeyCode::Digit5 => Key::Key5,
        KeyCode::Digit6 => Key::Key6,
        KeyCode::Digit7 => Key::Key7,
        KeyCode::Digit8 => Key::Key8,
        KeyCode::Digit9 => Key::Key9,
        KeyCode::Digit0 => Key::Key0,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,
        KeyCode::F16 => Key::F16,
        KeyCode::F17 => Key::F17,
        KeyCode::F18 => Key::F18,
        KeyCode::F19 => Key::F19,
        KeyCode::F20 => Key::F20,
        KeyCode::F21 => Key::F21,
        KeyCode::F22 => Key::F22,
        KeyCode::F23 => Key::F23,
        KeyCode::F24 => Key::F24,
        KeyCode::PrintScreen => Key::Snapshot,
        KeyCode::ScrollLock => Key::Scroll,
        KeyCode::Pause => Key::Pause,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::Delete => Key::Delete,
        KeyCode::End => Key::End,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::Backspace => Key::Back,
        KeyCode::Enter => Key::Return,
        KeyCode::Space => Key::Space,
        KeyCode::NumLock => Key::Numlock,
        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,
        KeyCode::NumpadComma => Key::NumpadComma,
        KeyCode::NumpadEnter => Key::NumpadEnter,
        KeyCode::NumpadEqual => Key::NumpadEquals,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::IntlRo => Key::AbntC1,
        KeyCode::Quote => Key::Apostrophe,
        KeyCode::ContextMenu => Key::Apps,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::LaunchApp2 => Key::Calculator,
        KeyCode::CapsLock => Key::Capital,
        KeyCode::Comma => Key::Comma,
        KeyCode::Convert => Key::Convert,
        KeyCode::Equal => Key::Equals,
        KeyCode::Backquote => Key::Grave,
        KeyCode::KanaMode => Key::Kana,
        KeyCode::AltLeft => Key::LAlt,
        KeyCode::BracketLeft => Key::LBracket,
        KeyCode::ControlLeft => Key::LControl,
        KeyCode::ShiftLeft => Key::LShift,
        KeyCode::SuperLeft => Key::LWin,
        KeyCode::LaunchMail => Key::Mail,
        KeyCode::MediaSelect => Key::MediaSelect,
        KeyCode::MediaStop => Key::MediaStop,
        KeyCode::Minus => Key::Minus,
        KeyCode::AudioVolumeMute => Key::Mute,
        KeyCode::LaunchApp1 => Key::MyComputer,
        KeyCode::MediaTrackNext => Key::NextTrack,
        KeyCode::NonConvert => Key::NoConvert,
        KeyCode::IntlBackslash => Key::OEM102,
        KeyCode::Period => Key::Period,
        KeyCode::MediaPlayPause => Key::PlayPause,
        KeyCode::Power => Key::Power,
        KeyCode::MediaTrackPrevious => Key::PrevTrack,
        KeyCode::AltRight => Key::RAlt,
        KeyCode::BracketRight => Key::RBracket,
        KeyCode::ControlRight => Key::RControl,
        KeyCode::ShiftRight => Key::RShift,
        KeyCode::SuperRight => Key::RWin,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Slash => Key::Slash,
        KeyCode::Sleep => Key::Sleep,
        KeyCode::Tab => Key::Tab,
        KeyCode::AudioVolumeDown => Key::VolumeDown,
        KeyCode::AudioVolumeUp => Key::VolumeUp,
        KeyCode::WakeUp => Key::Wake,
        KeyCode::BrowserBack => Key::WebBack,
        KeyCode::BrowserFavorites => Key::WebFavorites,
        KeyCode::BrowserForward => Key::WebForward,
        KeyCode::BrowserHome => Key::WebHome,
        KeyCode::BrowserRefresh => Key::WebRefresh,
        KeyCode::BrowserSearch => Key::WebSearch,
        KeyCode::BrowserStop => Key::WebStop,
        KeyCode::IntlYen => Key::Yen,
        KeyCode::Copy => Key::Copy,
        KeyCode::Paste => Key::Paste,
        KeyCode::Cut => Key::Cut,
        _ => return None,
    };
    Some(key)
}

/// Platform scancode of a physical key, or `0` where none is exposed.
#[cfg(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
))]
pub fn scancode_of(physical: PhysicalKey) -> u32 {
    use winit::platform::scancode::PhysicalKeyExtScancode;

    physical.to_scancode().unwrap_or(0)
}

/// Platform scancode of a physical key, or `0` where none is exposed.
#[cfg(not(any(
    target_os = "windows",
    target_os = "macos",
    target_os = "linux",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
pub fn scancode_of(_physical: PhysicalKey) -> u32 {
    0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
