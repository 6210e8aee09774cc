//! Line-based config file parser
//!
//! Each non-comment line is `key value...`; values with spaces (commands)
//! take the rest of the line. Unknown keys and malformed values are warned
//! about and skipped, never fatal.

use super::Config;
use crate::error::WavoResult;

/// Parse a wavo config file
pub fn parse_config(content: &str) -> WavoResult<Config> {
    let mut config = Config::default();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Err(e) = parse_line(&mut config, line) {
            tracing::warn!("Failed to parse config line '{line}': {e}");
        }
    }

    Ok(config)
}

fn parse_line(config: &mut Config, line: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (key, rest) = line
        .split_once(char::is_whitespace)
        .ok_or("missing value")?;
    let value = rest.trim();
    if value.is_empty() {
        return Err("missing value".into());
    }

    match key {
        "terminal" => config.terminal = value.to_string(),
        "mod_key" => config.mod_key = value.to_string(),
        "menu" => config.menu = value.to_string(),
        "animations" => config.enable_animations = parse_bool(value)?,
        "workspaces" => config.workspace_count = value.parse()?,
        "repeat_rate" => config.repeat_rate = value.parse()?,
        "repeat_delay" => config.repeat_delay = value.parse()?,
        "background" => config.background_color = value.to_string(),
        "border_width" => config.border_width = value.parse()?,
        "border_color" => config.border_color = value.to_string(),
        _ => return Err(format!("unknown setting '{key}'").into()),
    }

    Ok(())
}

fn parse_bool(value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        other => Err(format!("expected boolean, got '{other}'").into()),
    }
}
