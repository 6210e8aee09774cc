//! Static configuration, loaded once at startup
//!
//! Defaults match the stock session; a config file can override single
//! settings with `key value` lines. There is no runtime reload path.

use std::path::Path;

use crate::error::{WavoError, WavoResult};

pub mod parser;

#[derive(Debug, Clone)]
pub struct Config {
    /// Terminal emulator command
    pub terminal: String,
    /// Modifier key for compositor bindings
    pub mod_key: String,
    /// Application launcher command
    pub menu: String,
    /// Window management
    pub enable_animations: bool,
    pub workspace_count: u32,
    /// Keyboard repeat, applied to keyboards at attach time
    pub repeat_rate: i32,
    pub repeat_delay: i32,
    /// Theme
    pub background_color: String,
    pub border_width: u32,
    pub border_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: "alacritty".to_string(),
            mod_key: "Mod4".to_string(),
            menu: "rofi -show drun".to_string(),
            enable_animations: true,
            workspace_count: 9,
            repeat_rate: 25,
            repeat_delay: 600,
            background_color: "#000000".to_string(),
            border_width: 2,
            border_color: "#333333".to_string(),
        }
    }
}

impl Config {
    /// Load config from a file, falling back to defaults if it is absent
    pub fn load(path: &Path) -> WavoResult<Self> {
        if !path.exists() {
            tracing::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        parser::parse_config(&content)
    }

    /// Reject configurations missing the required commands
    pub fn validate(&self) -> WavoResult<()> {
        for (key, value) in [
            ("terminal", &self.terminal),
            ("mod_key", &self.mod_key),
            ("menu", &self.menu),
        ] {
            if value.is_empty() {
                return Err(WavoError::Config(format!("{key} must be set")));
            }
        }
        Ok(())
    }
}
