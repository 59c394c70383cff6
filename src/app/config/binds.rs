use crate::app::player_handler::PlayerAction;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type KeyMap = HashMap<(KeyModifiers, KeyCode), PlayerAction>;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BindsConfig {
    #[serde(default = "BindsConfig::default_quit")]
    pub quit: Vec<String>,
    #[serde(default = "BindsConfig::default_toggle_play_pause")]
    pub toggle_play_pause: Vec<String>,
    #[serde(default = "BindsConfig::default_seek_backward")]
    pub seek_backward: Vec<String>,
    #[serde(default = "BindsConfig::default_seek_forward")]
    pub seek_forward: Vec<String>,
    #[serde(default = "BindsConfig::default_previous")]
    pub previous: Vec<String>,
    #[serde(default = "BindsConfig::default_next")]
    pub next: Vec<String>,
    #[serde(default = "BindsConfig::default_toggle_status_bar")]
    pub toggle_status_bar: Vec<String>,
}

impl BindsConfig {
    fn default_quit() -> Vec<String> {
        vec!["q".to_string(), "esc".to_string(), "ctrl-c".to_string()]
    }
    fn default_toggle_play_pause() -> Vec<String> {
        vec!["space".to_string()]
    }
    fn default_seek_backward() -> Vec<String> {
        vec!["h".to_string(), "left".to_string()]
    }
    fn default_seek_forward() -> Vec<String> {
        vec!["l".to_string(), "right".to_string()]
    }
    fn default_previous() -> Vec<String> {
        vec!["j".to_string(), "down".to_string()]
    }
    fn default_next() -> Vec<String> {
        vec!["k".to_string(), "up".to_string()]
    }
    fn default_toggle_status_bar() -> Vec<String> {
        vec!["i".to_string()]
    }

    /// Parse a key binding string like "ctrl-c", "shift-k" or "space".
    pub fn parse_keybinding(key_str: &str) -> Option<(KeyModifiers, KeyCode)> {
        let key_str = key_str.trim().to_lowercase();

        // Special case for standalone "-" character
        if key_str == "-" {
            return Some((KeyModifiers::NONE, KeyCode::Char('-')));
        }

        let parts: Vec<&str> = key_str.split('-').collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts {
            match *part {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match *key_part {
            "esc" => KeyCode::Esc,
            "enter" => KeyCode::Enter,
            "backspace" => KeyCode::Backspace,
            "tab" => KeyCode::Tab,
            "delete" => KeyCode::Delete,
            "insert" => KeyCode::Insert,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            f if f.len() > 1 && f.starts_with('f') => {
                let n: u8 = f[1..].parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
            c if c.chars().count() == 1 => {
                let ch = c.chars().next()?;
                if modifiers.contains(KeyModifiers::SHIFT) {
                    KeyCode::Char(ch.to_ascii_uppercase())
                } else {
                    KeyCode::Char(ch)
                }
            }
            _ => return None,
        };

        Some(normalize_key(modifiers, code))
    }

    /// Build the lookup table from key to action. Unparsable entries are skipped
    /// and reported in the returned warnings.
    pub fn build_key_map(&self) -> (KeyMap, Vec<String>) {
        let mut map = HashMap::new();
        let mut warnings = Vec::new();

        let bindings: [(&[String], PlayerAction); 7] = [
            (&self.quit, PlayerAction::Quit),
            (&self.toggle_play_pause, PlayerAction::TogglePlayPause),
            (&self.seek_backward, PlayerAction::SeekBackward),
            (&self.seek_forward, PlayerAction::SeekForward),
            (&self.previous, PlayerAction::Previous),
            (&self.next, PlayerAction::Next),
            (&self.toggle_status_bar, PlayerAction::ToggleStatusBar),
        ];

        for (keys, action) in bindings {
            for key in keys {
                match Self::parse_keybinding(key) {
                    Some(parsed) => {
                        if let Some(previous) = map.insert(parsed, action) {
                            warnings.push(format!(
                                "Key '{}' is bound to both {:?} and {:?}",
                                key, previous, action
                            ));
                        }
                    }
                    None => warnings.push(format!("Invalid key binding: '{}'", key)),
                }
            }
        }

        (map, warnings)
    }
}

/// Character keys carry their case already, so SHIFT is dropped from them to make
/// "K" from the terminal match a "shift-k" binding.
pub fn normalize_key(modifiers: KeyModifiers, code: KeyCode) -> (KeyModifiers, KeyCode) {
    match code {
        KeyCode::Char(_) => (modifiers - KeyModifiers::SHIFT, code),
        _ => (modifiers, code),
    }
}

impl Default for BindsConfig {
    fn default() -> Self {
        Self {
            quit: Self::default_quit(),
            toggle_play_pause: Self::default_toggle_play_pause(),
            seek_backward: Self::default_seek_backward(),
            seek_forward: Self::default_seek_forward(),
            previous: Self::default_previous(),
            next: Self::default_next(),
            toggle_status_bar: Self::default_toggle_status_bar(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            BindsConfig::parse_keybinding("q"),
            Some((KeyModifiers::NONE, KeyCode::Char('q')))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("space"),
            Some((KeyModifiers::NONE, KeyCode::Char(' ')))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("Left"),
            Some((KeyModifiers::NONE, KeyCode::Left))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("f5"),
            Some((KeyModifiers::NONE, KeyCode::F(5)))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("-"),
            Some((KeyModifiers::NONE, KeyCode::Char('-')))
        );
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            BindsConfig::parse_keybinding("ctrl-c"),
            Some((KeyModifiers::CONTROL, KeyCode::Char('c')))
        );
        // Shift is folded into the character
        assert_eq!(
            BindsConfig::parse_keybinding("shift-k"),
            Some((KeyModifiers::NONE, KeyCode::Char('K')))
        );
        assert_eq!(
            BindsConfig::parse_keybinding("shift-up"),
            Some((KeyModifiers::SHIFT, KeyCode::Up))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(BindsConfig::parse_keybinding("hyper-x"), None);
        assert_eq!(BindsConfig::parse_keybinding("f13"), None);
        assert_eq!(BindsConfig::parse_keybinding("nonsense"), None);
        assert_eq!(BindsConfig::parse_keybinding(""), None);
    }

    #[test]
    fn test_default_key_map() {
        let (map, warnings) = BindsConfig::default().build_key_map();
        assert!(warnings.is_empty(), "{:?}", warnings);

        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Char(' '))),
            Some(&PlayerAction::TogglePlayPause)
        );
        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Left)),
            Some(&PlayerAction::SeekBackward)
        );
        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Char('k'))),
            Some(&PlayerAction::Next)
        );
        assert_eq!(
            map.get(&(KeyModifiers::CONTROL, KeyCode::Char('c'))),
            Some(&PlayerAction::Quit)
        );
        assert_eq!(
            map.get(&(KeyModifiers::NONE, KeyCode::Char('i'))),
            Some(&PlayerAction::ToggleStatusBar)
        );
    }

    #[test]
    fn test_key_map_reports_problems() {
        let binds = BindsConfig {
            next: vec!["q".to_string(), "bogus-key".to_string()],
            ..Default::default()
        };
        let (_, warnings) = binds.build_key_map();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(
            normalize_key(KeyModifiers::SHIFT, KeyCode::Char('K')),
            (KeyModifiers::NONE, KeyCode::Char('K'))
        );
        assert_eq!(
            normalize_key(KeyModifiers::SHIFT, KeyCode::Right),
            (KeyModifiers::SHIFT, KeyCode::Right)
        );
    }
}
