//! The logical key table.
//!
//! [`Key`] enumerates every key the window can report. Discriminants are
//! dense (`0..Key::COUNT`) and stable: they are the integer values of the
//! Python `KeyCode` enum, so reordering or inserting variants is a breaking
//! change for every consumer that stores key codes.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Table definition
// ---------------------------------------------------------------------------

macro_rules! key_table {
    ($($variant:ident),+ $(,)?) => {
        /// A logical keyboard key.
        ///
        /// The discriminant is the key's numeric code (see [`Key::code`]).
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[repr(u32)]
        pub enum Key {
            $($variant,)+
        }

        impl Key {
            /// Every key, in code order.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)+];

            /// The Python-visible member name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

key_table! {
    Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9, Key0,
    A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Escape,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
    Snapshot, Scroll, Pause,
    Insert, Home, Delete, End, PageDown, PageUp,
    Left, Up, Right, Down,
    Back, Return, Space,
    Compose, Caret,
    Numlock,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadDivide, NumpadDecimal, NumpadComma, NumpadEnter,
    NumpadEquals, NumpadMultiply, NumpadSubtract,
    AbntC1, AbntC2, Apostrophe, Apps, Asterisk, At, Ax, Backslash,
    Calculator, Capital, Colon, Comma, Convert, Equals, Grave,
    Kana, Kanji,
    LAlt, LBracket, LControl, LShift, LWin,
    Mail, MediaSelect, MediaStop, Minus, Mute, MyComputer,
    NavigateForward, NavigateBackward, NextTrack, NoConvert, OEM102,
    Period, PlayPause, Plus, Power, PrevTrack,
    RAlt, RBracket, RControl, RShift, RWin,
    Semicolon, Slash, Sleep, Stop, Sysrq, Tab, Underline, Unlabeled,
    VolumeDown, VolumeUp, Wake,
    WebBack, WebFavorites, WebForward, WebHome, WebRefresh, WebSearch, WebStop,
    Yen, Copy, Paste, Cut,
}

impl Key {
    /// Number of keys in the table.
    pub const COUNT: usize = Self::ALL.len();

    /// The stable numeric code of this key.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Look up a key by its numeric code.
    pub fn from_code(code: u32) -> Option<Key> {
        Self::ALL.get(code as usize).copied()
    }

    /// Look up a key by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Key> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }
}

/// Name/code pairs in code order.
///
/// This is the shape `enum.IntEnum`'s functional API accepts.
pub fn table() -> impl Iterator<Item = (&'static str, u32)> {
    Key::ALL.iter().map(|key| (key.name(), key.code()))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key name that is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name '{0}'")]
pub struct UnknownKeyName(pub String);

impl FromStr for Key {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_name(s).ok_or_else(|| UnknownKeyName(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
