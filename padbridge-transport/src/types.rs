//! Shared transport types

use std::fmt;

/// USB identity of a pad (vendor id + product id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    pub vid: u16,
    pub pid: u16,
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:04X}", self.vid, self.pid)
    }
}

/// Snapshot of one enumerated HID interface
#[derive(Debug, Clone)]
pub struct PadDeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub path: String,
    pub serial: Option<String>,
    pub product_name: Option<String>,
}

impl fmt::Display for PadDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:04X}:{:04X})",
            self.product_name.as_deref().unwrap_or("Unknown Device"),
            self.vid,
            self.pid
        )
    }
}
