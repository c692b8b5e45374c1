use crate::ui::types::Point;

/// Keys the menu layer distinguishes
///
/// Letter and digit keys are carried as lowercase `Char`s so shortcut
/// matching does not depend on shift state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Return,
    KeypadEnter,
    Space,
    Escape,
    Left,
    Right,
    Up,
    Down,
    F11,
    Char(char),
    Other,
}

impl Key {
    /// Keys that activate the focused widget
    pub fn is_activate(&self) -> bool {
        matches!(self, Key::Return | Key::KeypadEnter | Key::Space)
    }

    /// Builds a `Char` key, folding to lowercase
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

/// Modifier state attached to key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyMods {
    pub shift: bool,
}

impl KeyMods {
    pub const NONE: KeyMods = KeyMods { shift: false };
    pub const SHIFT: KeyMods = KeyMods { shift: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Platform-neutral input events
///
/// The platform layer translates its native events into these once per
/// frame; everything above it (host, menu states, widgets) only sees
/// `InputEvent`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    Resized { width: u32, height: u32 },
    MouseMotion { x: i32, y: i32 },
    MouseDown { button: MouseButton, x: i32, y: i32 },
    MouseUp { button: MouseButton, x: i32, y: i32 },
    KeyDown { key: Key, mods: KeyMods },
}

impl InputEvent {
    /// Pointer position carried by mouse events
    pub fn pointer(&self) -> Option<Point> {
        match *self {
            InputEvent::MouseMotion { x, y }
            | InputEvent::MouseDown { x, y, .. }
            | InputEvent::MouseUp { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            mods: KeyMods::NONE,
        }
    }

    pub fn shift_key(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            mods: KeyMods::SHIFT,
        }
    }

    pub fn left_down(x: i32, y: i32) -> Self {
        InputEvent::MouseDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    pub fn left_up(x: i32, y: i32) -> Self {
        InputEvent::MouseUp {
            button: MouseButton::Left,
            x,
            y,
        }
    }
}

/// Actions intercepted ahead of per-state dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonAction {
    Quit,
    Resize { width: u32, height: u32 },
    ToggleFullscreen,
}

/// InputSystem classifies events that every menu screen shares
///
/// The host asks it about each polled event before forwarding; anything it
/// claims is handled by the host and never reaches the active state.
#[derive(Debug, Clone)]
pub struct InputSystem {
    /// Key that quits from any screen (`Q` by default, `None` to disable)
    pub quit_key: Option<Key>,
    /// Key that toggles fullscreen
    pub fullscreen_key: Key,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            quit_key: Some(Key::Char('q')),
            fullscreen_key: Key::F11,
        }
    }

    /// Returns the common action this event maps to, if any
    pub fn common_action(&self, event: &InputEvent) -> Option<CommonAction> {
        match *event {
            InputEvent::Quit => Some(CommonAction::Quit),
            InputEvent::Resized { width, height } => Some(CommonAction::Resize { width, height }),
            InputEvent::KeyDown { key, .. } => {
                if Some(key) == self.quit_key {
                    Some(CommonAction::Quit)
                } else if key == self.fullscreen_key {
                    Some(CommonAction::ToggleFullscreen)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
