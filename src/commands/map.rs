//! Single-device mapped mode (the default command)
//!
//! Resolves the pad from the keymap file's VID/PID, creates the
//! virtual keyboard, and runs the bridge loop until Ctrl+C or a device
//! failure.

use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use hidapi::HidApi;
use tracing::{info, warn};

use padbridge::bridge;
use padbridge::config::BridgeConfig;
use padbridge_mapper::{EventDispatcher, UinputKeyboard};
use padbridge_transport::open_pad;

/// Device name uinput shows for the virtual keyboard
const VIRTUAL_KEYBOARD_NAME: &str = "Padbridge Virtual Keyboard";

pub fn run(config: BridgeConfig, print_buttons: bool, stop: &AtomicBool) -> Result<()> {
    if config.keymap.is_empty() {
        warn!("Keymap has no bindings; button presses will be ignored");
    }

    let api = HidApi::new().context("Failed to initialize HID API")?;
    let mut pad = open_pad(&api, config.device).with_context(|| {
        format!(
            "Could not open pad {}. Make sure it's connected.",
            config.device
        )
    })?;

    let mut actuator = UinputKeyboard::new(VIRTUAL_KEYBOARD_NAME, config.keymap.actions())
        .context("Failed to create virtual keyboard (is /dev/uinput writable?)")?;

    let dispatcher = EventDispatcher::new(config.keymap).with_printing(print_buttons);

    info!("Listening for button presses... (Ctrl+C to exit)");
    bridge::run(&mut pad, &dispatcher, &mut actuator, stop)?;
    Ok(())
}
