//! Print phase state machine and its controller

pub mod controller;
pub mod phase;

pub use controller::{PhaseConfig, PhaseController};
pub use phase::{PhaseEvent, PrintPhase};
