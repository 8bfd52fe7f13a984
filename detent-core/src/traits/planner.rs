//! Motion planner queue trait
//!
//! The planner buffers line moves and executes them on the steppers. The
//! control core only ever queues moves, asks how full the queue is, and
//! resynchronizes to the live stepper position; trajectory generation stays
//! on the other side of this trait.

use crate::motion::axis::{Axis, NUM_AXES};

/// Trait for the motion planner's buffered move queue
///
/// Position reads may be stale relative to moves still in flight; callers
/// must tolerate the window between queuing a move and its execution.
pub trait MotionQueue {
    /// Queue a straight-line move to an absolute position
    ///
    /// - `target_mm`: absolute target for all axes (X, Y, Z, E)
    /// - `feedrate_mm_s`: requested feedrate
    /// - `extruder`: active extruder index
    fn enqueue_line(&mut self, target_mm: &[f32; NUM_AXES], feedrate_mm_s: f32, extruder: u8);

    /// Number of moves currently buffered
    fn moves_queued(&self) -> u8;

    /// Total capacity of the move buffer
    fn capacity(&self) -> u8;

    /// Check if a non-interactive command is pending ahead of the queue
    ///
    /// Interactive moves must yield to queued G-code commands.
    fn command_queued(&self) -> bool;

    /// Live machine position for one axis, in millimeters
    fn live_position_mm(&self, axis: Axis) -> f32;

    /// Overwrite the planner's idea of the current position
    ///
    /// Used after an abort to resynchronize with the steppers.
    fn set_position(&mut self, position_mm: &[f32; NUM_AXES]);

    /// Drop all buffered moves and halt the steppers immediately
    fn abort_and_flush(&mut self);

    /// Free slots remaining in the move buffer
    fn free_slots(&self) -> u8 {
        self.capacity().saturating_sub(self.moves_queued())
    }
}
