//! Raw multi-device debug listener (`--all-hid`)
//!
//! Opens every enumerable HID interface and prints raw report bytes as
//! they arrive, one reader thread per device. No decoding, no key
//! mapping; useful for finding a pad's VID/PID and report layout.
//! Interfaces that refuse to open are skipped so the rest keep
//! working.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hidapi::HidApi;
use tracing::warn;

use padbridge_transport::{open_all, HidPad, ReportSource, REPORT_BUF_SIZE};

/// Poll period per device; bounded so every thread sees the stop flag
const READ_TIMEOUT_MS: i32 = 50;

/// Sleep after a read error before retrying (device might recover)
const ERROR_SLEEP_MS: u64 = 100;

pub fn run(stop: Arc<AtomicBool>) -> Result<()> {
    let api = HidApi::new().context("Failed to initialize HID API")?;
    let pads = open_all(&api);
    if pads.is_empty() {
        bail!("No HID device could be opened");
    }

    println!("Listening to all HID devices... (Ctrl+C to exit)");
    for pad in &pads {
        println!("  {}", pad.info());
    }

    let mut handles = Vec::new();
    for pad in pads {
        let stop = stop.clone();
        let name = format!("hid-listen-{:04x}:{:04x}", pad.info().vid, pad.info().pid);
        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || listen_device(pad, &stop))
            .context("Failed to spawn listener thread")?;
        handles.push(handle);
    }

    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}

fn listen_device(mut pad: HidPad, stop: &AtomicBool) {
    let label = pad.info().to_string();
    let mut buf = [0u8; REPORT_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
        match pad.read_report(&mut buf, READ_TIMEOUT_MS) {
            Ok(Some(len)) => println!("{label}: {:02X?}", &buf[..len]),
            Ok(None) => {}
            Err(e) => {
                warn!("{label}: read failed: {e}");
                thread::sleep(Duration::from_millis(ERROR_SLEEP_MS));
            }
        }
    }
}
