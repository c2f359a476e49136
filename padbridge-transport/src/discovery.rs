//! Pad discovery and open lifecycle
//!
//! The pad is identified by the VID/PID pair from the keymap file. The
//! debug listener instead opens every interface it can.

use hidapi::HidApi;
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::pad::HidPad;
use crate::types::{DeviceId, PadDeviceInfo};

fn snapshot(device_info: &hidapi::DeviceInfo) -> PadDeviceInfo {
    PadDeviceInfo {
        vid: device_info.vendor_id(),
        pid: device_info.product_id(),
        path: device_info.path().to_string_lossy().to_string(),
        serial: device_info.serial_number().map(|s| s.to_string()),
        product_name: device_info.product_string().map(|s| s.to_string()),
    }
}

/// Open the pad with the given identity.
///
/// Fails with `DeviceNotFound` when no interface matches, or with the
/// underlying HID error (permission denied, already in use) when the
/// open itself is refused.
pub fn open_pad(api: &HidApi, id: DeviceId) -> Result<HidPad, TransportError> {
    let device_info = api
        .device_list()
        .find(|d| d.vendor_id() == id.vid && d.product_id() == id.pid)
        .ok_or_else(|| TransportError::DeviceNotFound(id.to_string()))?;

    let device = device_info.open_device(api)?;
    let info = snapshot(device_info);
    info!("Connected to: {} path={}", info, info.path);
    Ok(HidPad::new(device, info))
}

/// Open every enumerable HID interface, skipping the ones that refuse.
///
/// Per-interface open failures are expected (other processes hold
/// devices exclusively, permissions vary) and are logged rather than
/// propagated.
pub fn open_all(api: &HidApi) -> Vec<HidPad> {
    let mut pads = Vec::new();
    let mut total = 0usize;

    for device_info in api.device_list() {
        total += 1;
        let info = snapshot(device_info);
        match device_info.open_device(api) {
            Ok(device) => {
                debug!("Opened {} path={}", info, info.path);
                pads.push(HidPad::new(device, info));
            }
            Err(e) => {
                warn!("Failed to open device {}: {}", info, e);
            }
        }
    }

    info!("Opened {} of {} HID interfaces", pads.len(), total);
    pads
}
