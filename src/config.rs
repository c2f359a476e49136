//! Keymap file loading and validation
//!
//! The bridge is configured by a single JSON file naming the pad's USB
//! identity and the button-to-key table:
//!
//! ```json
//! {
//!     "VID": "0x0B43",
//!     "PID": "0x0001",
//!     "keymap": { "B0": "y", "B8": "esc", "B4": null }
//! }
//! ```
//!
//! Everything is validated here, before any device I/O: hex ids,
//! button names, key values. A button omitted from the table behaves
//! exactly like an explicit `null`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use padbridge_mapper::{Button, KeyAction, Keymap};
use padbridge_transport::DeviceId;

/// Errors raised while loading the keymap file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid hex value for {field}: {value:?}")]
    InvalidHex { field: &'static str, value: String },

    #[error("Unknown button {0:?} in keymap (expected B0..B15)")]
    UnknownButton(String),

    #[error(
        "Invalid key for {button}: {value:?} \
         (expected a single character or one of esc/enter/up/down/left/right)"
    )]
    InvalidKey { button: Button, value: String },
}

/// Raw file shape, as serde sees it
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "VID")]
    vid: String,
    #[serde(rename = "PID")]
    pid: String,
    keymap: BTreeMap<String, Option<String>>,
}

/// Validated bridge configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// USB identity of the pad to open
    pub device: DeviceId,
    /// Resolved button-to-key table
    pub keymap: Keymap,
}

impl BridgeConfig {
    /// Load and validate a keymap file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        debug!(
            "Loaded {} with {} binding(s) for device {}",
            path.display(),
            config.keymap.actions().count(),
            config.device
        );
        Ok(config)
    }

    /// Parse and validate keymap JSON
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(content).map_err(ConfigError::Parse)?;

        let vid = parse_hex_id("VID", &raw.vid)?;
        let pid = parse_hex_id("PID", &raw.pid)?;

        let mut keymap = Keymap::new();
        for (name, value) in &raw.keymap {
            let button = Button::from_name(name)
                .ok_or_else(|| ConfigError::UnknownButton(name.clone()))?;
            let action = match value {
                Some(v) => Some(KeyAction::parse(v).ok_or_else(|| ConfigError::InvalidKey {
                    button,
                    value: v.clone(),
                })?),
                None => None,
            };
            keymap.set(button, action);
        }

        Ok(Self {
            device: DeviceId { vid, pid },
            keymap,
        })
    }
}

/// Parse a `"0xHHHH"` (or bare hex) id string
fn parse_hex_id(field: &'static str, value: &str) -> Result<u16, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u16::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidHex {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use padbridge_mapper::SpecialKey;

    const SAMPLE: &str = r#"{
        "VID": "0x0B43",
        "PID": "0x0001",
        "keymap": {
            "B0": "y",
            "B1": "a",
            "B4": null,
            "B8": "esc",
            "B9": "enter",
            "B12": "up",
            "B13": "right",
            "B14": "down",
            "B15": "left"
        }
    }"#;

    fn button(index: u8) -> Button {
        Button::new(index).unwrap()
    }

    #[test]
    fn sample_config_parses() {
        let config = BridgeConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.device.vid, 0x0B43);
        assert_eq!(config.device.pid, 0x0001);
        assert_eq!(
            config.keymap.lookup(button(0)),
            Some(KeyAction::Char('y'))
        );
        assert_eq!(
            config.keymap.lookup(button(8)),
            Some(KeyAction::Special(SpecialKey::Esc))
        );
        assert_eq!(
            config.keymap.lookup(button(15)),
            Some(KeyAction::Special(SpecialKey::Left))
        );
        // Explicit null and never-mentioned buttons both resolve to None
        assert_eq!(config.keymap.lookup(button(4)), None);
        assert_eq!(config.keymap.lookup(button(7)), None);
    }

    #[test]
    fn missing_pid_is_fatal_and_names_the_field() {
        let json = r#"{ "VID": "0x0B43", "keymap": {} }"#;
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("PID"), "diagnostic was: {err}");
    }

    #[test]
    fn missing_keymap_is_fatal_and_names_the_field() {
        let json = r#"{ "VID": "0x0B43", "PID": "0x0001" }"#;
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(err.to_string().contains("keymap"), "diagnostic was: {err}");
    }

    #[test]
    fn malformed_hex_is_fatal_and_names_the_field() {
        let json = r#"{ "VID": "0xZZZZ", "PID": "0x0001", "keymap": {} }"#;
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidHex { field: "VID", .. }
        ));
    }

    #[test]
    fn hex_prefix_is_optional() {
        let json = r#"{ "VID": "0B43", "PID": "1", "keymap": {} }"#;
        let config = BridgeConfig::from_json(json).unwrap();
        assert_eq!(config.device.vid, 0x0B43);
        assert_eq!(config.device.pid, 0x0001);
    }

    #[test]
    fn unknown_button_name_is_fatal() {
        let json = r#"{ "VID": "0x1", "PID": "0x2", "keymap": { "B16": "y" } }"#;
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownButton(name) if name == "B16"));
    }

    #[test]
    fn multi_character_key_value_is_fatal() {
        let json = r#"{ "VID": "0x1", "PID": "0x2", "keymap": { "B0": "escape" } }"#;
        let err = BridgeConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKey { .. }));
        assert!(err.to_string().contains("escape"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = BridgeConfig::load(Path::new("/nonexistent/keymap.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
