use arcade_core::grid::Direction;
use eframe::egui::Key;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ui_config::config_dir;

pub fn default_keybinds_path() -> PathBuf {
    config_dir().join("keybinds.toml")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Launch,
    Reload,
    OpenCatalog,
    Quit,
}

const ACTION_NAMES: [(Action, &str); 8] = [
    (Action::Move(Direction::Up), "up"),
    (Action::Move(Direction::Down), "down"),
    (Action::Move(Direction::Left), "left"),
    (Action::Move(Direction::Right), "right"),
    (Action::Launch, "launch"),
    (Action::Reload, "reload"),
    (Action::OpenCatalog, "open_catalog"),
    (Action::Quit, "quit"),
];

fn action_by_name(name: &str) -> Option<Action> {
    ACTION_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(action, _)| *action)
}

/// Keyboard shortcuts. Several keys may share one action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<Key, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl KeyBindings {
    pub fn defaults() -> Self {
        let mut keys = HashMap::new();
        keys.insert(Key::ArrowUp, Action::Move(Direction::Up));
        keys.insert(Key::ArrowDown, Action::Move(Direction::Down));
        keys.insert(Key::ArrowLeft, Action::Move(Direction::Left));
        keys.insert(Key::ArrowRight, Action::Move(Direction::Right));
        keys.insert(Key::Enter, Action::Launch);
        keys.insert(Key::Space, Action::Launch);
        keys.insert(Key::F5, Action::Reload);
        keys.insert(Key::O, Action::OpenCatalog);
        keys.insert(Key::Escape, Action::Quit);
        Self { keys }
    }

    /// Read `name = Key[, Key...]` lines. A line replaces every key of its
    /// action; actions not mentioned keep their defaults.
    pub fn load_from_file(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            info!(
                "No keybinds file at {}; using defaults",
                path.display()
            );
            return Self::defaults();
        };
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Self {
        let mut bindings = Self::defaults();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let Some((name, value)) = line.split_once('=') else {
                warn!(
                    "Ignoring invalid keybinds line {origin}:{} (expected name = value)",
                    line_no + 1
                );
                continue;
            };

            let name = name.trim();
            let Some(action) = action_by_name(name) else {
                warn!(
                    "Ignoring unknown keybind name '{name}' in {origin}:{}",
                    line_no + 1
                );
                continue;
            };

            let mut keys = Vec::new();
            for raw_key in value.split(',') {
                match parse_key(raw_key) {
                    Some(key) => keys.push(key),
                    None => warn!(
                        "Ignoring key '{}' in {origin}:{} (unknown Key)",
                        raw_key.trim(),
                        line_no + 1
                    ),
                }
            }
            if keys.is_empty() {
                continue;
            }

            bindings.keys.retain(|_, a| *a != action);
            for key in keys {
                bindings.keys.insert(key, action);
            }
        }

        bindings
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.keys.get(&key).copied()
    }

    pub fn keys_for(&self, action: Action) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .keys
            .iter()
            .filter(|&(_, a)| *a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(|k| k.name());
        keys
    }

    /// Bound keys paired with their actions, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Action)> + '_ {
        ACTION_NAMES.iter().flat_map(move |(action, _)| {
            self.keys_for(*action)
                .into_iter()
                .map(move |key| (key, *action))
        })
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut lines = vec!["# arcade launcher keybinds".to_string(), String::new()];
        for (action, name) in ACTION_NAMES {
            let keys = self.keys_for(action);
            if keys.is_empty() {
                continue;
            }
            let keys: Vec<&str> = keys.iter().map(|k| key_to_str(*k)).collect();
            lines.push(format!("{name} = {}", keys.join(", ")));
        }

        std::fs::write(path, lines.join("\n"))?;
        info!("Saved keybinds to {}", path.display());
        Ok(())
    }
}

fn key_to_str(key: Key) -> &'static str {
    match key {
        Key::ArrowUp => "Up",
        Key::ArrowDown => "Down",
        Key::ArrowLeft => "Left",
        Key::ArrowRight => "Right",
        other => other.name(),
    }
}

fn parse_key(raw: &str) -> Option<Key> {
    match raw.trim() {
        "Up" => Some(Key::ArrowUp),
        "Down" => Some(Key::ArrowDown),
        "Left" => Some(Key::ArrowLeft),
        "Right" => Some(Key::ArrowRight),
        "Return" => Some(Key::Enter),
        s if s.len() == 1 => Key::from_name(&s.to_ascii_uppercase()),
        s => Key::from_name(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_navigation_and_launch() {
        let kb = KeyBindings::defaults();
        assert_eq!(
            kb.action_for(Key::ArrowLeft),
            Some(Action::Move(Direction::Left))
        );
        assert_eq!(kb.action_for(Key::Enter), Some(Action::Launch));
        assert_eq!(kb.action_for(Key::Space), Some(Action::Launch));
        assert_eq!(kb.action_for(Key::Z), None);
    }

    #[test]
    fn line_replaces_all_keys_of_its_action() {
        let kb = KeyBindings::parse("launch = x, Return # comment\nup = w\n", "test");
        assert_eq!(kb.keys_for(Action::Launch), vec![Key::Enter, Key::X]);
        assert_eq!(kb.action_for(Key::Space), None);
        assert_eq!(kb.action_for(Key::W), Some(Action::Move(Direction::Up)));
        assert_eq!(kb.action_for(Key::ArrowUp), None);
        assert_eq!(
            kb.action_for(Key::ArrowDown),
            Some(Action::Move(Direction::Down))
        );
    }

    #[test]
    fn bad_lines_are_skipped() {
        let kb = KeyBindings::parse("nonsense\nfly = Up\nquit = NotAKey\n", "test");
        assert_eq!(kb.action_for(Key::Escape), Some(Action::Quit));
        assert_eq!(
            kb.action_for(Key::ArrowUp),
            Some(Action::Move(Direction::Up))
        );
    }

    #[test]
    fn saved_bindings_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keybinds.toml");

        let custom = KeyBindings::parse("left = a\nright = d\nreload = F9\n", "test");
        custom.save_to_file(&path).unwrap();

        let loaded = KeyBindings::load_from_file(&path);
        let mut a: Vec<_> = custom.iter().collect();
        let mut b: Vec<_> = loaded.iter().collect();
        a.sort_by_key(|(k, _)| k.name());
        b.sort_by_key(|(k, _)| k.name());
        assert_eq!(a, b);
    }
}
