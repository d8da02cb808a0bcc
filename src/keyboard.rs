//! Keyboard layout model for the visual tester.
//!
//! A static QWERTY layout expressed as rows of keys with width weights,
//! plus the press-tracking state the panel draws from. Keys stay
//! highlighted once pressed so the user can see coverage at a glance.

use std::collections::HashSet;

use eframe::egui::Key;

/// One key cap in the layout. `width` is a multiple of the unit key
/// width; `key` is `None` for spacer cells.
#[derive(Debug, Clone, Copy)]
pub struct KeyCap {
    pub label: &'static str,
    pub width: f32,
    pub key: Option<Key>,
}

const fn cap(label: &'static str, width: f32, key: Key) -> KeyCap {
    KeyCap {
        label,
        width,
        key: Some(key),
    }
}

const fn spacer(width: f32) -> KeyCap {
    KeyCap {
        label: "",
        width,
        key: None,
    }
}

/// The standard QWERTY rows drawn by the tester.
///
/// Modifier caps without a distinct egui key event (Caps Lock, Win) are
/// drawn as spacers; egui reports modifiers, not lock state.
pub fn layout() -> Vec<Vec<KeyCap>> {
    vec![
        vec![
            cap("Esc", 1.0, Key::Escape),
            spacer(1.0),
            cap("F1", 1.0, Key::F1),
            cap("F2", 1.0, Key::F2),
            cap("F3", 1.0, Key::F3),
            cap("F4", 1.0, Key::F4),
            cap("F5", 1.0, Key::F5),
            cap("F6", 1.0, Key::F6),
            cap("F7", 1.0, Key::F7),
            cap("F8", 1.0, Key::F8),
            cap("F9", 1.0, Key::F9),
            cap("F10", 1.0, Key::F10),
            cap("F11", 1.0, Key::F11),
            cap("F12", 1.0, Key::F12),
        ],
        vec![
            cap("`", 1.0, Key::Backtick),
            cap("1", 1.0, Key::Num1),
            cap("2", 1.0, Key::Num2),
            cap("3", 1.0, Key::Num3),
            cap("4", 1.0, Key::Num4),
            cap("5", 1.0, Key::Num5),
            cap("6", 1.0, Key::Num6),
            cap("7", 1.0, Key::Num7),
            cap("8", 1.0, Key::Num8),
            cap("9", 1.0, Key::Num9),
            cap("0", 1.0, Key::Num0),
            cap("-", 1.0, Key::Minus),
            cap("=", 1.0, Key::Equals),
            cap("Backspace", 2.0, Key::Backspace),
        ],
        vec![
            cap("Tab", 1.5, Key::Tab),
            cap("Q", 1.0, Key::Q),
            cap("W", 1.0, Key::W),
            cap("E", 1.0, Key::E),
            cap("R", 1.0, Key::R),
            cap("T", 1.0, Key::T),
            cap("Y", 1.0, Key::Y),
            cap("U", 1.0, Key::U),
            cap("I", 1.0, Key::I),
            cap("O", 1.0, Key::O),
            cap("P", 1.0, Key::P),
            cap("[", 1.0, Key::OpenBracket),
            cap("]", 1.0, Key::CloseBracket),
            cap("\\", 1.5, Key::Backslash),
        ],
        vec![
            spacer(1.75),
            cap("A", 1.0, Key::A),
            cap("S", 1.0, Key::S),
            cap("D", 1.0, Key::D),
            cap("F", 1.0, Key::F),
            cap("G", 1.0, Key::G),
            cap("H", 1.0, Key::H),
            cap("J", 1.0, Key::J),
            cap("K", 1.0, Key::K),
            cap("L", 1.0, Key::L),
            cap(";", 1.0, Key::Semicolon),
            cap("'", 1.0, Key::Quote),
            cap("Enter", 2.25, Key::Enter),
        ],
        vec![
            spacer(2.25),
            cap("Z", 1.0, Key::Z),
            cap("X", 1.0, Key::X),
            cap("C", 1.0, Key::C),
            cap("V", 1.0, Key::V),
            cap("B", 1.0, Key::B),
            cap("N", 1.0, Key::N),
            cap("M", 1.0, Key::M),
            cap(",", 1.0, Key::Comma),
            cap(".", 1.0, Key::Period),
            cap("/", 1.0, Key::Slash),
            spacer(2.25),
            cap("Up", 1.0, Key::ArrowUp),
        ],
        vec![
            spacer(3.0),
            cap("Space", 6.0, Key::Space),
            spacer(2.0),
            cap("Left", 1.0, Key::ArrowLeft),
            cap("Down", 1.0, Key::ArrowDown),
            cap("Right", 1.0, Key::ArrowRight),
        ],
    ]
}

/// Press-tracking state for the tester panel.
#[derive(Debug, Default)]
pub struct KeyboardState {
    pub pressed: HashSet<Key>,
    pub total_presses: u32,
    pub last_key: Option<Key>,
}

impl KeyboardState {
    /// Record a key press event.
    pub fn record(&mut self, key: Key) {
        self.pressed.insert(key);
        self.total_presses += 1;
        self.last_key = Some(key);
    }

    /// Clear all tracked presses.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a key has been pressed this session.
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Share of layout keys pressed so far, 0.0..=1.0.
    pub fn coverage(&self, layout: &[Vec<KeyCap>]) -> f32 {
        let keys: Vec<Key> = layout.iter().flatten().filter_map(|c| c.key).collect();
        if keys.is_empty() {
            return 0.0;
        }
        let hit = keys.iter().filter(|k| self.pressed.contains(k)).count();
        hit as f32 / keys.len() as f32
    }
}

/// Display label for a key, preferring the layout cap label.
pub fn label_for(key: Key, layout: &[Vec<KeyCap>]) -> String {
    layout
        .iter()
        .flatten()
        .find(|c| c.key == Some(key))
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| format!("{key:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for cap in layout().iter().flatten() {
            if let Some(key) = cap.key {
                assert!(seen.insert(key), "duplicate key {key:?}");
            }
        }
        assert!(seen.len() > 50);
    }

    #[test]
    fn test_record_and_reset() {
        let mut state = KeyboardState::default();
        state.record(Key::A);
        state.record(Key::A);
        state.record(Key::Enter);

        assert!(state.is_pressed(Key::A));
        assert!(state.is_pressed(Key::Enter));
        assert!(!state.is_pressed(Key::B));
        assert_eq!(state.total_presses, 3);
        assert_eq!(state.last_key, Some(Key::Enter));

        state.reset();
        assert_eq!(state.total_presses, 0);
        assert!(!state.is_pressed(Key::A));
    }

    #[test]
    fn test_coverage() {
        let layout = layout();
        let mut state = KeyboardState::default();
        assert_eq!(state.coverage(&layout), 0.0);

        for cap in layout.iter().flatten() {
            if let Some(key) = cap.key {
                state.record(key);
            }
        }
        assert!((state.coverage(&layout) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_label_for_prefers_cap_label() {
        let layout = layout();
        assert_eq!(label_for(Key::Space, &layout), "Space");
        assert_eq!(label_for(Key::Semicolon, &layout), ";");
    }
}
