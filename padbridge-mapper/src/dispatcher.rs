//! Event dispatch: turns button transitions into actuator calls

use thiserror::Error;
use tracing::debug;

use crate::edge::Transition;
use crate::keymap::{KeyAction, Keymap};

/// Errors from key actuator operations
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("Failed to create virtual keyboard: {0}")]
    CreateDevice(#[source] std::io::Error),
    #[error("Failed to emit key event: {0}")]
    EmitEvent(#[source] std::io::Error),
    #[error("No key code for character {0:?}")]
    UnsupportedKey(char),
}

/// The key injection seam.
///
/// Implementations deliver synthetic key events to the host OS. The
/// dispatcher only ever calls `key_down` for a key it does not hold and
/// `key_up` for a key it does: the deltas it consumes are disjoint and
/// derived from the held-set state.
pub trait KeyActuator {
    fn key_down(&mut self, action: KeyAction) -> Result<(), ActuatorError>;
    fn key_up(&mut self, action: KeyAction) -> Result<(), ActuatorError>;
}

/// Issues key events for the transitions of one poll iteration
pub struct EventDispatcher {
    keymap: Keymap,
    print_events: bool,
}

impl EventDispatcher {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            print_events: false,
        }
    }

    /// Also print every press/release with its resolved key
    /// (`--print-buttons`).
    pub fn with_printing(mut self, print_events: bool) -> Self {
        self.print_events = print_events;
        self
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Dispatch one transition: key-down per newly-pressed mapped
    /// button, key-up per newly-released mapped button. Unmapped
    /// buttons are skipped.
    pub fn dispatch<A: KeyActuator>(
        &self,
        actuator: &mut A,
        transition: &Transition,
    ) -> Result<(), ActuatorError> {
        for button in transition.pressed.iter() {
            match self.keymap.lookup(button) {
                Some(action) => {
                    if self.print_events {
                        println!("Pressing: {button} -> {action}");
                    }
                    actuator.key_down(action)?;
                }
                None => debug!("{button} pressed, no mapping"),
            }
        }

        for button in transition.released.iter() {
            match self.keymap.lookup(button) {
                Some(action) => {
                    if self.print_events {
                        println!("Releasing: {button} -> {action}");
                    }
                    actuator.key_up(action)?;
                }
                None => debug!("{button} released, no mapping"),
            }
        }

        Ok(())
    }
}
