use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scribble_core::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keymap {
    pub quit: String,
    pub new_note: String,
    pub delete_note: String,
    pub toggle_theme: String,
    pub search: String,
    pub cycle_focus: String,
    pub export: String,
    pub help: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            quit: "ctrl-q".to_string(),
            new_note: "ctrl-n".to_string(),
            delete_note: "ctrl-d".to_string(),
            toggle_theme: "ctrl-t".to_string(),
            search: "ctrl-f".to_string(),
            cycle_focus: "tab".to_string(),
            export: "ctrl-e".to_string(),
            help: "f1".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub keymap: Keymap,
    pub backend: BackendConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Load the config at `path`, writing the defaults there first if it is missing
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config).context("Failed to serialize default config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Does `key` match a binding such as `ctrl-n`, `alt-enter`, `tab` or `f1`?
pub fn key_matches(binding: &str, key: &KeyEvent) -> bool {
    let binding = binding.trim().to_ascii_lowercase();
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = binding.split('-').collect();
    let name = parts.pop().unwrap_or_default();
    for part in parts {
        match part {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    let code = match name {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n) => KeyCode::F(n),
            Err(_) => return false,
        },
        c if c.chars().count() == 1 => match c.chars().next() {
            Some(ch) => KeyCode::Char(ch),
            None => return false,
        },
        _ => return false,
    };

    let pressed = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    // Terminals disagree on whether shifted letters carry SHIFT, so ignore it
    // unless the binding asks for it.
    let mut pressed_mods = key.modifiers;
    if !modifiers.contains(KeyModifiers::SHIFT) {
        pressed_mods.remove(KeyModifiers::SHIFT);
    }
    pressed == code && pressed_mods == modifiers
}
