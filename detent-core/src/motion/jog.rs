//! Axis jog state machine
//!
//! Converts sustained scroll input into continuous, endstop-safe planner
//! moves for one axis at a time. The controller never plans past a travel
//! limit, never relies on an infinitely deep move queue, and recovers from
//! direction reversals by aborting and resynchronizing to the live machine
//! position.
//!
//! States: `Idle -> Jogging -> StoppingDebounce -> Idle`. The debounce
//! swallows residual encoder momentum after a stop so the axis does not
//! immediately lurch again.

use libm::roundf;

use crate::input::{EncoderAccumulator, TICKS_PER_STEP};
use crate::motion::axis::{Axis, MoveDirection, NUM_AXES};
use crate::timeout::InteractionTimer;
use crate::traits::{Endstops, MotionQueue};
use crate::tune::tune_float;

/// Jog speed saturates at this many quanta per burst step
pub const MAX_JOG_SPEED: i8 = 15;

/// Minimum dwell after a stop before new jog input is accepted
pub const STOP_DEBOUNCE_MS: u64 = 500;

/// Position edits below this dead-band plan no move
pub const POSITION_DEADBAND_MM: f32 = 0.005;

/// Jog controller state, derived from speed and the debounce flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogState {
    /// No jog session active
    Idle,
    /// Session active, reacting to scroll input
    Jogging,
    /// Stopped; input suppressed until the dwell elapses
    StoppingDebounce,
}

/// Per-axis travel limits in millimeters
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JogLimits {
    pub min_mm: [f32; NUM_AXES],
    pub max_mm: [f32; NUM_AXES],
}

impl Default for JogLimits {
    fn default() -> Self {
        // Ultimaker-class build volume; E is unbounded in practice but
        // kept finite so the clamp math has no special case.
        Self {
            min_mm: [0.0, 0.0, 0.0, -10_000.0],
            max_mm: [223.0, 223.0, 205.0, 10_000.0],
        }
    }
}

impl JogLimits {
    fn clamp(&self, axis: Axis, value_mm: f32) -> f32 {
        let i = axis.index();
        value_mm.clamp(self.min_mm[i], self.max_mm[i])
    }
}

/// Safe interactive jogging for one axis at a time
#[derive(Debug, Clone)]
pub struct JogController {
    /// Where the operator has asked the axis to go
    target_mm: [f32; NUM_AXES],
    /// Position already handed to the planner
    current_mm: [f32; NUM_AXES],
    /// Signed step rate; magnitude bounded to [`MAX_JOG_SPEED`]
    speed: i8,
    /// Post-stop debounce flag
    suppress_input: bool,
    /// Session active (entered and not yet exited)
    active: bool,
    limits: JogLimits,
    /// Feedrate for direct position edits, per axis
    position_feedrate_mm_s: [f32; NUM_AXES],
}

impl JogController {
    pub fn new(limits: JogLimits) -> Self {
        Self {
            target_mm: [0.0; NUM_AXES],
            current_mm: [0.0; NUM_AXES],
            speed: 0,
            suppress_input: false,
            active: false,
            limits,
            position_feedrate_mm_s: [7.5, 7.5, 3.0, 3.0],
        }
    }

    /// Override the feedrates used for direct position edits
    pub fn set_position_feedrates(&mut self, feedrate_mm_s: [f32; NUM_AXES]) {
        self.position_feedrate_mm_s = feedrate_mm_s;
    }

    /// Begin a jog session: adopt the live machine position as both target
    /// and current for every axis, and discard any stale scroll input.
    pub fn enter<M: MotionQueue>(&mut self, queue: &M, enc: &mut EncoderAccumulator) {
        enc.clear();
        self.speed = 0;
        self.suppress_input = false;
        self.active = true;
        for axis in [Axis::X, Axis::Y, Axis::Z, Axis::E] {
            let live = queue.live_position_mm(axis);
            self.target_mm[axis.index()] = live;
            self.current_mm[axis.index()] = live;
        }
    }

    /// End the jog session
    pub fn exit(&mut self) {
        self.speed = 0;
        self.suppress_input = false;
        self.active = false;
    }

    pub fn state(&self) -> JogState {
        if !self.active {
            JogState::Idle
        } else if self.suppress_input {
            JogState::StoppingDebounce
        } else {
            JogState::Jogging
        }
    }

    pub fn jog_speed(&self) -> i8 {
        self.speed
    }

    pub fn target_mm(&self, axis: Axis) -> f32 {
        self.target_mm[axis.index()]
    }

    pub fn current_mm(&self, axis: Axis) -> f32 {
        self.current_mm[axis.index()]
    }

    /// One tick of continuous jogging on `axis`
    ///
    /// Stop conditions are checked first: endstop in the direction of
    /// travel, select button, or scroll reversed against a nonzero speed.
    /// Otherwise pending scroll steps the speed by one, and up to
    /// `min(|speed|*2, free_slots/2)` quantized increments are planned,
    /// stopping early on an endstop (hard stop, queue flushed) or at a
    /// travel limit (soft stop, queued motion left to finish).
    pub fn tick<M: MotionQueue, E: Endstops>(
        &mut self,
        axis: Axis,
        enc: &mut EncoderAccumulator,
        button_pressed: bool,
        now_ms: u64,
        queue: &mut M,
        endstops: &E,
        interaction: &mut InteractionTimer,
        extruder: u8,
    ) {
        if !self.active {
            return;
        }

        let reversal = {
            let dir = enc.direction();
            (dir < 0 && self.speed > 0) || (dir > 0 && self.speed < 0)
        };

        if self.endstop_in_travel_dir(axis, endstops) || button_pressed || reversal {
            self.stop_move(queue, enc);
        } else if self.suppress_input {
            // swallow residual momentum until the dwell elapses
            enc.clear();
            self.suppress_input = now_ms.saturating_sub(interaction.last_ms()) < STOP_DEBOUNCE_MS;
        } else {
            let steps = enc.take_steps(TICKS_PER_STEP);
            if steps < 0 {
                self.speed -= 1;
            } else if steps > 0 {
                self.speed += 1;
            }

            if self.speed != 0 {
                self.speed = self.speed.clamp(-MAX_JOG_SPEED, MAX_JOG_SPEED);
                let burst = (self.speed.unsigned_abs() * 2).min(queue.free_slots() / 2);
                let quantum = axis.jog_quantum_mm();
                let i = axis.index();
                for _ in 0..burst {
                    self.target_mm[i] =
                        roundf((self.current_mm[i] + self.speed as f32 * quantum) / quantum)
                            * quantum;
                    self.current_mm[i] = self.limits.clamp(axis, self.target_mm[i]);
                    queue.enqueue_line(&self.current_mm, self.speed.unsigned_abs() as f32, extruder);

                    if self.endstop_in_travel_dir(axis, endstops) {
                        self.stop_move(queue, enc);
                        break;
                    } else if (self.speed < 0 && self.target_mm[i] < self.limits.min_mm[i])
                        || (self.speed > 0 && self.target_mm[i] > self.limits.max_mm[i])
                    {
                        // travel limit: let queued motion finish, just stop planning
                        enc.clear();
                        self.speed = 0;
                        self.suppress_input = true;
                        interaction.touch(now_ms);
                        break;
                    }
                }
            }
        }
    }

    /// Direct position edit: tune the target within travel limits and plan
    /// a single catch-up move once the queue is empty.
    ///
    /// Returns true when the target changed this tick.
    pub fn edit_position<M: MotionQueue, E: Endstops>(
        &mut self,
        axis: Axis,
        enc: &mut EncoderAccumulator,
        queue: &mut M,
        endstops: &E,
        extruder: u8,
    ) -> bool {
        if !self.active {
            return false;
        }
        let i = axis.index();
        let changed = tune_float(
            enc,
            &mut self.target_mm[i],
            self.limits.min_mm[i],
            self.limits.max_mm[i],
            axis.position_step_mm(),
        );
        self.plan_single_move(axis, queue, endstops, extruder);
        changed
    }

    /// Plan one move toward the edited target, yielding to queued commands
    /// and pending motion (backpressure: skip this tick, retry the next).
    fn plan_single_move<M: MotionQueue, E: Endstops>(
        &mut self,
        axis: Axis,
        queue: &mut M,
        endstops: &E,
        extruder: u8,
    ) {
        if queue.command_queued() || queue.moves_queued() > 0 {
            return;
        }
        let i = axis.index();
        let delta = self.target_mm[i] - self.current_mm[i];
        if let Some(dir) = MoveDirection::from_delta(delta, POSITION_DEADBAND_MM) {
            if !endstops.is_triggered(axis, dir) {
                self.current_mm[i] = self.target_mm[i];
                queue.enqueue_line(&self.current_mm, self.position_feedrate_mm_s[i], extruder);
            }
        }
    }

    fn endstop_in_travel_dir<E: Endstops>(&self, axis: Axis, endstops: &E) -> bool {
        match MoveDirection::from_speed(self.speed) {
            Some(dir) => endstops.is_triggered(axis, dir),
            None => false,
        }
    }

    /// Hard stop: flush the queue, zero the speed, and adopt the live
    /// machine position (clamped to travel limits) as the new truth.
    fn stop_move<M: MotionQueue>(&mut self, queue: &mut M, enc: &mut EncoderAccumulator) {
        queue.abort_and_flush();
        enc.clear();
        self.speed = 0;
        self.suppress_input = true;
        for axis in [Axis::X, Axis::Y, Axis::Z, Axis::E] {
            let live = self.limits.clamp(axis, queue.live_position_mm(axis));
            self.target_mm[axis.index()] = live;
            self.current_mm[axis.index()] = live;
        }
        queue.set_position(&self.current_mm);
    }
}
