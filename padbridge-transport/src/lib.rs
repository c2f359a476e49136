//! HID access layer for the pad bridge
//!
//! Dance pads in scope here enumerate as generic HID input devices, not
//! game controllers. This crate handles finding them (by VID/PID from
//! the keymap file), opening them, and pulling raw input reports with a
//! bounded timeout so callers can poll a stop flag between reads.

pub mod discovery;
pub mod error;
pub mod pad;
pub mod types;

pub use discovery::{open_all, open_pad};
pub use error::TransportError;
pub use pad::{HidPad, ReportSource, REPORT_BUF_SIZE};
pub use types::{DeviceId, PadDeviceInfo};
