//! Customizable keybindings.
//!
//! Keys are stored with a small serializable [`KeyCode`] of their own so the
//! config file does not depend on winit's representation. Physical keys from
//! the window are converted with [`KeyCode::from_winit`].

use std::fmt;

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode as WinitKeyCode;

/// Something the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pick a folder and list its images
    OpenFolder,
    NextImage,
    PreviousImage,
    FirstImage,
    LastImage,
    /// Show or hide the image frame and tick marks
    ToggleAxes,
    /// Remove every overlay of the displayed image
    ClearOverlays,
    Quit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::OpenFolder,
        Action::NextImage,
        Action::PreviousImage,
        Action::FirstImage,
        Action::LastImage,
        Action::ToggleAxes,
        Action::ClearOverlays,
        Action::Quit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::OpenFolder => "Open folder",
            Action::NextImage => "Next image",
            Action::PreviousImage => "Previous image",
            Action::FirstImage => "First image",
            Action::LastImage => "Last image",
            Action::ToggleAxes => "Toggle axes",
            Action::ClearOverlays => "Clear overlays",
            Action::Quit => "Quit",
        }
    }
}

/// Keys that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Backspace,
    Enter,
    Escape,
    Space,
    Tab,
}

impl KeyCode {
    /// Map a physical key reported by winit. Keys with no binding support map to `None`.
    pub fn from_winit(key: WinitKeyCode) -> Option<Self> {
        let key = match key {
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyB => KeyCode::B,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyF => KeyCode::F,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyI => KeyCode::I,
            WinitKeyCode::KeyJ => KeyCode::J,
            WinitKeyCode::KeyK => KeyCode::K,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyO => KeyCode::O,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyU => KeyCode::U,
            WinitKeyCode::KeyV => KeyCode::V,
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyX => KeyCode::X,
            WinitKeyCode::KeyY => KeyCode::Y,
            WinitKeyCode::KeyZ => KeyCode::Z,
            WinitKeyCode::Digit0 => KeyCode::Key0,
            WinitKeyCode::Digit1 => KeyCode::Key1,
            WinitKeyCode::Digit2 => KeyCode::Key2,
            WinitKeyCode::Digit3 => KeyCode::Key3,
            WinitKeyCode::Digit4 => KeyCode::Key4,
            WinitKeyCode::Digit5 => KeyCode::Key5,
            WinitKeyCode::Digit6 => KeyCode::Key6,
            WinitKeyCode::Digit7 => KeyCode::Key7,
            WinitKeyCode::Digit8 => KeyCode::Key8,
            WinitKeyCode::Digit9 => KeyCode::Key9,
            WinitKeyCode::F1 => KeyCode::F1,
            WinitKeyCode::F2 => KeyCode::F2,
            WinitKeyCode::F3 => KeyCode::F3,
            WinitKeyCode::F4 => KeyCode::F4,
            WinitKeyCode::F5 => KeyCode::F5,
            WinitKeyCode::F6 => KeyCode::F6,
            WinitKeyCode::F7 => KeyCode::F7,
            WinitKeyCode::F8 => KeyCode::F8,
            WinitKeyCode::F9 => KeyCode::F9,
            WinitKeyCode::F10 => KeyCode::F10,
            WinitKeyCode::F11 => KeyCode::F11,
            WinitKeyCode::F12 => KeyCode::F12,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::Home => KeyCode::Home,
            WinitKeyCode::End => KeyCode::End,
            WinitKeyCode::PageUp => KeyCode::PageUp,
            WinitKeyCode::PageDown => KeyCode::PageDown,
            WinitKeyCode::Insert => KeyCode::Insert,
            WinitKeyCode::Delete => KeyCode::Delete,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Tab => KeyCode::Tab,
            _ => return None,
        };
        Some(key)
    }
}

/// Digits drop their `Key` prefix and arrows their `Arrow` prefix, so
/// `Key7` shows as `7` and `ArrowLeft` as `Left`.
impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let debug = format!("{self:?}");
        let name = debug
            .strip_prefix("Key")
            .or_else(|| debug.strip_prefix("Arrow"))
            .unwrap_or(&debug);
        f.write_str(name)
    }
}

/// Key assigned to each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub open_folder: KeyCode,
    pub next_image: KeyCode,
    pub previous_image: KeyCode,
    pub first_image: KeyCode,
    pub last_image: KeyCode,
    pub toggle_axes: KeyCode,
    pub clear_overlays: KeyCode,
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            open_folder: KeyCode::O,
            next_image: KeyCode::ArrowRight,
            previous_image: KeyCode::ArrowLeft,
            first_image: KeyCode::Home,
            last_image: KeyCode::End,
            toggle_axes: KeyCode::A,
            clear_overlays: KeyCode::Delete,
            quit: KeyCode::Escape,
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key, if any.
    ///
    /// When two actions share a key the one listed first in [`Action::ALL`] wins.
    pub fn action_for_key(&self, key: KeyCode) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|action| self.key_for_action(*action) == key)
    }

    pub fn key_for_action(&self, action: Action) -> KeyCode {
        match action {
            Action::OpenFolder => self.open_folder,
            Action::NextImage => self.next_image,
            Action::PreviousImage => self.previous_image,
            Action::FirstImage => self.first_image,
            Action::LastImage => self.last_image,
            Action::ToggleAxes => self.toggle_axes,
            Action::ClearOverlays => self.clear_overlays,
            Action::Quit => self.quit,
        }
    }

    pub fn set_key(&mut self, action: Action, key: KeyCode) {
        let slot = match action {
            Action::OpenFolder => &mut self.open_folder,
            Action::NextImage => &mut self.next_image,
            Action::PreviousImage => &mut self.previous_image,
            Action::FirstImage => &mut self.first_image,
            Action::LastImage => &mut self.last_image,
            Action::ToggleAxes => &mut self.toggle_axes,
            Action::ClearOverlays => &mut self.clear_overlays,
            Action::Quit => &mut self.quit,
        };
        *slot = key;
    }

    /// Check if a key is already used by another binding.
    /// Returns the action it is used for, if anything.
    pub fn key_conflict(&self, key: KeyCode, exclude: Option<Action>) -> Option<Action> {
        Action::ALL
            .into_iter()
            .filter(|action| Some(*action) != exclude)
            .find(|action| self.key_for_action(*action) == key)
    }

    /// Every pair of actions sharing a key, as `(key, winner, shadowed)`.
    pub fn conflicts(&self) -> Vec<(KeyCode, Action, Action)> {
        let mut found = Vec::new();
        for (i, first) in Action::ALL.iter().enumerate() {
            for second in &Action::ALL[i + 1..] {
                let key = self.key_for_action(*first);
                if key == self.key_for_action(*second) {
                    found.push((key, *first, *second));
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for_key(KeyCode::O), Some(Action::OpenFolder));
        assert_eq!(bindings.action_for_key(KeyCode::ArrowRight), Some(Action::NextImage));
        assert_eq!(bindings.action_for_key(KeyCode::ArrowLeft), Some(Action::PreviousImage));
        assert_eq!(bindings.action_for_key(KeyCode::Home), Some(Action::FirstImage));
        assert_eq!(bindings.action_for_key(KeyCode::End), Some(Action::LastImage));
        assert_eq!(bindings.action_for_key(KeyCode::A), Some(Action::ToggleAxes));
        assert_eq!(bindings.action_for_key(KeyCode::Delete), Some(Action::ClearOverlays));
        assert_eq!(bindings.action_for_key(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(bindings.action_for_key(KeyCode::Z), None);
        assert!(bindings.conflicts().is_empty());
    }

    #[test]
    fn test_set_key_rebinds() {
        let mut bindings = KeyBindings::new();
        bindings.set_key(Action::Quit, KeyCode::Q);
        assert_eq!(bindings.action_for_key(KeyCode::Q), Some(Action::Quit));
        assert_eq!(bindings.action_for_key(KeyCode::Escape), None);
        assert_eq!(bindings.key_for_action(Action::Quit), KeyCode::Q);
    }

    #[test]
    fn test_key_conflict() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.key_conflict(KeyCode::A, None), Some(Action::ToggleAxes));
        assert_eq!(bindings.key_conflict(KeyCode::A, Some(Action::ToggleAxes)), None);
        assert_eq!(bindings.key_conflict(KeyCode::F5, None), None);
    }

    #[test]
    fn test_duplicate_binding_first_action_wins() {
        let mut bindings = KeyBindings::default();
        bindings.set_key(Action::Quit, KeyCode::O);
        assert_eq!(bindings.action_for_key(KeyCode::O), Some(Action::OpenFolder));
        assert_eq!(
            bindings.conflicts(),
            vec![(KeyCode::O, Action::OpenFolder, Action::Quit)]
        );
    }

    #[test]
    fn test_from_winit() {
        assert_eq!(KeyCode::from_winit(WinitKeyCode::KeyO), Some(KeyCode::O));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::Digit3), Some(KeyCode::Key3));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::NumpadEnter), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_winit(WinitKeyCode::ShiftLeft), None);
    }

    #[test]
    fn test_key_display_names() {
        assert_eq!(KeyCode::K.to_string(), "K");
        assert_eq!(KeyCode::Key7.to_string(), "7");
        assert_eq!(KeyCode::ArrowLeft.to_string(), "Left");
        assert_eq!(KeyCode::F11.to_string(), "F11");
        assert_eq!(KeyCode::PageDown.to_string(), "PageDown");
    }

    #[test]
    fn test_key_serializes_by_variant_name() {
        assert_eq!(serde_json::to_string(&KeyCode::ArrowRight).unwrap(), "\"ArrowRight\"");
        let key: KeyCode = serde_json::from_str("\"Key7\"").unwrap();
        assert_eq!(key, KeyCode::Key7);
    }
}
