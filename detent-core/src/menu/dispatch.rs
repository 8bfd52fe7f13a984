//! In-place edit dispatch
//!
//! One interpreter maps a [`TuneTarget`] to the tuner variant and value it
//! edits, with the ranges the machine actually supports. Motion targets
//! (jog, direct position) are routed to the jog controller by the caller,
//! since they need the planner.

use crate::config::machine::MAX_EXTRUDERS;
use crate::input::EncoderAccumulator;
use crate::menu::action::TuneTarget;
use crate::traits::{Backlight, HeaterBank};
use crate::tune::{tune_byte, tune_float, tune_temperature, tune_value};

/// Live tunable values not owned by a collaborator
///
/// The firmware mirrors these into the planner after each tick.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuneState {
    /// Print speed multiplier, percent
    pub feedrate_pct: i16,
    /// Part cooling fan, raw byte
    pub fan_speed: u8,
    /// Material flow multiplier per extruder, percent
    pub flow_pct: [i16; MAX_EXTRUDERS],
    /// Case LED brightness, percent
    pub led_brightness_pct: i16,
    /// Retraction length, millimeters
    pub retract_length_mm: f32,
    /// Extruder-swap retraction length, millimeters
    pub swap_length_mm: f32,
    /// Retraction speed, millimeters per minute
    pub retract_speed_mm_min: f32,
    /// Default acceleration, millimeters per second squared
    pub acceleration_mm_s2: f32,
    /// XY jerk, millimeters per second
    pub xy_jerk_mm_s: f32,
}

impl Default for TuneState {
    fn default() -> Self {
        Self {
            feedrate_pct: 100,
            fan_speed: 0,
            flow_pct: [100; MAX_EXTRUDERS],
            led_brightness_pct: 100,
            retract_length_mm: 4.5,
            swap_length_mm: 16.0,
            retract_speed_mm_min: 1_500.0,
            acceleration_mm_s2: 3_000.0,
            xy_jerk_mm_s: 20.0,
        }
    }
}

/// Range limits that depend on the installed hardware
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TuneLimits {
    /// Hottest allowed nozzle target
    pub max_nozzle_temp_c: i16,
    /// Hottest allowed bed target
    pub max_bed_temp_c: i16,
    /// E-axis feedrate limit, millimeters per second
    pub max_e_feedrate_mm_s: f32,
}

impl Default for TuneLimits {
    fn default() -> Self {
        // 15 degrees of headroom below the thermal cutoffs
        Self {
            max_nozzle_temp_c: 275 - 15,
            max_bed_temp_c: 150 - 15,
            max_e_feedrate_mm_s: 45.0,
        }
    }
}

/// Apply the pending scroll to one tunable value
///
/// Returns true when the value changed this tick.
pub fn apply_tune<H: HeaterBank, B: Backlight>(
    target: TuneTarget,
    enc: &mut EncoderAccumulator,
    tune: &mut TuneState,
    heaters: &mut H,
    backlight: &mut B,
    limits: &TuneLimits,
) -> bool {
    match target {
        TuneTarget::PrintSpeed => {
            let before = tune.feedrate_pct;
            tune_value(enc, &mut tune.feedrate_pct, 0, 999);
            tune.feedrate_pct != before
        }
        TuneTarget::Flow(e) => {
            // flow is meaningless while the nozzle is off
            if heaters.target_temp_c(e) <= 0 {
                return false;
            }
            let i = (e as usize).min(MAX_EXTRUDERS - 1);
            let before = tune.flow_pct[i];
            tune_value(enc, &mut tune.flow_pct[i], 0, 999);
            tune.flow_pct[i] != before
        }
        TuneTarget::NozzleTemp(e) => {
            let mut value = heaters.target_temp_c(e);
            let before = value;
            tune_temperature(enc, &mut value, 0, limits.max_nozzle_temp_c);
            if value != before {
                heaters.set_target_temp_c(e, value);
                return true;
            }
            false
        }
        TuneTarget::BedTemp => {
            let mut value = heaters.bed_target_c();
            let before = value;
            tune_temperature(enc, &mut value, 0, limits.max_bed_temp_c);
            if value != before {
                heaters.set_bed_target_c(value);
                return true;
            }
            false
        }
        TuneTarget::FanSpeed => {
            let before = tune.fan_speed;
            tune_byte(enc, &mut tune.fan_speed, 0, 100);
            tune.fan_speed != before
        }
        TuneTarget::LedBrightness => {
            let before = tune.led_brightness_pct;
            tune_value(enc, &mut tune.led_brightness_pct, 0, 100);
            if tune.led_brightness_pct != before {
                backlight.set_brightness_pct(tune.led_brightness_pct as u8);
                return true;
            }
            false
        }
        TuneTarget::RetractLength => {
            tune_float(enc, &mut tune.retract_length_mm, 0.0, 50.0, 0.01)
        }
        TuneTarget::SwapLength => tune_float(enc, &mut tune.swap_length_mm, 0.0, 50.0, 0.01),
        TuneTarget::RetractSpeed => tune_float(
            enc,
            &mut tune.retract_speed_mm_min,
            0.0,
            limits.max_e_feedrate_mm_s * 60.0,
            60.0,
        ),
        TuneTarget::Acceleration => {
            tune_float(enc, &mut tune.acceleration_mm_s2, 0.0, 20_000.0, 100.0)
        }
        TuneTarget::XyJerk => tune_float(enc, &mut tune.xy_jerk_mm_s, 0.0, 100.0, 1.0),
        // motion targets need the planner; the context routes them
        TuneTarget::JogAxis(_) | TuneTarget::PositionAxis(_) => false,
    }
}
