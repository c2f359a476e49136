//! The bridge poll loop
//!
//! Drives the pipeline: read report → decode → edge-detect → dispatch,
//! until the stop flag is set or the device fails. Whatever path ends
//! the loop, held keys are released before the device handle drops, so
//! an interrupt mid-press never leaves a key stuck.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use padbridge_mapper::{
    ActuatorError, ButtonSet, EdgeDetector, EventDispatcher, KeyActuator,
};
use padbridge_transport::{ReportSource, TransportError, REPORT_BUF_SIZE};

/// Poll period for device reads. Short enough that the stop flag is
/// observed promptly; the read wakes immediately when data arrives.
const READ_TIMEOUT_MS: i32 = 5;

/// Minimum report length carrying both button bytes
const MIN_REPORT_LEN: usize = 2;

/// Errors that end the poll loop
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Actuator(#[from] ActuatorError),
}

/// Run the bridge until the stop flag is set or the device fails.
///
/// Returns `Ok(())` on a requested stop. A read or emit failure is
/// returned after the closing sequence (held keys released) has run.
pub fn run<R, A>(
    source: &mut R,
    dispatcher: &EventDispatcher,
    actuator: &mut A,
    stop: &AtomicBool,
) -> Result<(), BridgeError>
where
    R: ReportSource,
    A: KeyActuator,
{
    let mut edges = EdgeDetector::new();

    let result = poll(source, dispatcher, actuator, stop, &mut edges);

    release_held(dispatcher, actuator, &mut edges);
    result
}

fn poll<R, A>(
    source: &mut R,
    dispatcher: &EventDispatcher,
    actuator: &mut A,
    stop: &AtomicBool,
    edges: &mut EdgeDetector,
) -> Result<(), BridgeError>
where
    R: ReportSource,
    A: KeyActuator,
{
    let mut buf = [0u8; REPORT_BUF_SIZE];

    while !stop.load(Ordering::Relaxed) {
        let len = match source.read_report(&mut buf, READ_TIMEOUT_MS) {
            // Timeout with no data: normal idle outcome
            Ok(None) => continue,
            Ok(Some(len)) => len,
            Err(e) => {
                warn!("Device read failed: {e}");
                return Err(e.into());
            }
        };

        if len < MIN_REPORT_LEN {
            debug!("Dropping short report ({len} bytes)");
            continue;
        }

        let observed = ButtonSet::from_report_bytes(buf[0], buf[1]);
        let transition = edges.observe(observed);
        if !transition.is_empty() {
            debug!(
                "Transition: pressed={} released={} held={}",
                transition.pressed,
                transition.released,
                edges.held()
            );
        }
        dispatcher.dispatch(actuator, &transition)?;
    }

    info!("Stop requested, shutting down");
    Ok(())
}

/// Issue key-ups for anything still held. Best-effort on the error
/// path; exact on clean shutdown.
fn release_held<A: KeyActuator>(
    dispatcher: &EventDispatcher,
    actuator: &mut A,
    edges: &mut EdgeDetector,
) {
    let held = edges.held();
    if held.is_empty() {
        return;
    }
    debug!("Releasing {} held key(s) on close", held.len());
    let transition = edges.observe(ButtonSet::EMPTY);
    if let Err(e) = dispatcher.dispatch(actuator, &transition) {
        warn!("Failed to release held keys: {e}");
    }
}
