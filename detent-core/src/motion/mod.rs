//! Interactive motion: axis identifiers and the jog state machine

pub mod axis;
pub mod jog;

pub use axis::{Axis, MoveDirection, NUM_AXES};
pub use jog::{JogController, JogLimits, JogState, MAX_JOG_SPEED, STOP_DEBOUNCE_MS};
