//! Endstop query trait

use crate::motion::axis::{Axis, MoveDirection};

/// Trait for querying physical limit switches
pub trait Endstops {
    /// Check if the endstop bounding travel in `direction` is triggered
    ///
    /// Axes without a switch on one end report `false` for that direction.
    fn is_triggered(&self, axis: Axis, direction: MoveDirection) -> bool;
}
