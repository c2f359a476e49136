//! Report source abstraction and the hidapi-backed pad device

use hidapi::HidDevice;
use tracing::trace;

use crate::error::TransportError;
use crate::types::PadDeviceInfo;

/// Buffer size requested per report read. Pads report far fewer bytes;
/// 64 covers any full-speed HID endpoint.
pub const REPORT_BUF_SIZE: usize = 64;

/// A source of raw HID input reports.
///
/// `read_report` fills `buf` with one report and returns its length.
/// `Ok(None)` means nothing arrived within the timeout, which is the
/// normal idle outcome, not an error. The bounded timeout is what lets
/// callers check a stop flag between reads.
pub trait ReportSource {
    fn read_report(
        &mut self,
        buf: &mut [u8],
        timeout_ms: i32,
    ) -> Result<Option<usize>, TransportError>;
}

/// An open pad device
pub struct HidPad {
    device: HidDevice,
    info: PadDeviceInfo,
}

impl HidPad {
    pub(crate) fn new(device: HidDevice, info: PadDeviceInfo) -> Self {
        Self { device, info }
    }

    /// Interface info captured at open time
    pub fn info(&self) -> &PadDeviceInfo {
        &self.info
    }
}

impl ReportSource for HidPad {
    fn read_report(
        &mut self,
        buf: &mut [u8],
        timeout_ms: i32,
    ) -> Result<Option<usize>, TransportError> {
        match self.device.read_timeout(buf, timeout_ms) {
            Ok(0) => Ok(None),
            Ok(len) => {
                trace!("{}: {} byte report", self.info, len);
                Ok(Some(len))
            }
            Err(e) => Err(TransportError::from(e)),
        }
    }
}
