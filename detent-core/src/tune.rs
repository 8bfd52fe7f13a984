//! Bounded value tuning helpers
//!
//! Each helper drains the accumulated scroll quantity into one bounded
//! numeric edit. The integer variants only act once a whole logical step
//! has accumulated; the float variant acts on any pending scroll and snaps
//! the result to a multiple of its step.

use libm::roundf;

use crate::input::{EncoderAccumulator, TICKS_PER_STEP};

/// Step an integer value by whole scroll steps, clamped to `[min, max]`
pub fn tune_value(enc: &mut EncoderAccumulator, value: &mut i16, min: i16, max: i16) {
    let steps = enc.take_steps(TICKS_PER_STEP);
    if steps != 0 {
        *value = value.saturating_add(steps).clamp(min, max);
    }
}

/// Step an 8-bit stored value displayed on a `[min, max]` scale
///
/// The stored byte covers 0-255 while the operator sees (say) a percentage;
/// the edit happens in display units and maps back with round-half-up, so
/// one scroll step always changes the displayed number by one.
pub fn tune_byte(enc: &mut EncoderAccumulator, value: &mut u8, min: u8, max: u8) {
    let steps = enc.take_steps(TICKS_PER_STEP);
    if steps != 0 {
        let display = (*value as f32 * max as f32 / 255.0 + 0.5) as i16;
        let display = display.saturating_add(steps).clamp(min as i16, max as i16);
        *value = (display as f32 * 255.0 / max as f32 + 0.5) as u8;
    }
}

/// Step a float value in multiples of `step`, clamped to `[min, max]`
///
/// Consumes any nonzero scroll (no step debounce) and reports whether the
/// value changed; callers that mirror the value into the planner re-issue
/// a move only on change.
pub fn tune_float(
    enc: &mut EncoderAccumulator,
    value: &mut f32,
    min: f32,
    max: f32,
    step: f32,
) -> bool {
    let ticks = enc.take();
    if ticks != 0 {
        *value = (roundf((*value + ticks as f32 * step) / step) * step).clamp(min, max);
        return true;
    }
    false
}

/// Step a temperature target by whole scroll steps, clamped to `[min, max]`
///
/// Identical to [`tune_value`] today; kept separate because temperature
/// edits are the one place a safety gate would land.
pub fn tune_temperature(enc: &mut EncoderAccumulator, value: &mut i16, min: i16, max: i16) {
    let steps = enc.take_steps(TICKS_PER_STEP);
    if steps != 0 {
        *value = value.saturating_add(steps).clamp(min, max);
    }
}
