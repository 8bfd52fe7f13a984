//! Operator input: encoder events and scroll accumulation

pub mod accumulator;
pub mod event;

pub use accumulator::{EncoderAccumulator, TICKS_PER_STEP};
pub use event::InputEvent;
