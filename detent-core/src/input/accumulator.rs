//! Encoder scroll accumulation with adaptive acceleration
//!
//! Raw interrupt-level encoder deltas are folded into a signed scroll
//! quantity once per input tick. Sustained rotation in one direction grows
//! a per-tick multiplier so large value edits do not require endless
//! cranking; stopping or reversing drops straight back to single steps.
//!
//! Exactly one tuning or jogging operation consumes the quantity per UI
//! tick; consumption resets it so the same input is never applied twice.

/// Quadrature ticks that make up one logical scroll step (one detent)
pub const TICKS_PER_STEP: i16 = 4;

/// Accumulated encoder scroll state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderAccumulator {
    /// Net scroll since last consumption
    accumulated: i16,
    /// Signed run length of same-direction ticks
    accel_factor: i8,
    /// Acceleration ceiling for the active edit context (1 = no acceleration)
    max_accel: u8,
}

impl Default for EncoderAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderAccumulator {
    /// Create an accumulator with acceleration disabled
    pub fn new() -> Self {
        Self {
            accumulated: 0,
            accel_factor: 0,
            max_accel: 1,
        }
    }

    /// Set the acceleration ceiling for the current edit context
    ///
    /// Menu navigation wants exactly one step per detent; heavy value edits
    /// opt in to larger ceilings per item.
    pub fn set_max_accel(&mut self, max_accel: u8) {
        self.max_accel = max_accel.max(1);
    }

    /// Fold one interrupt-level delta into the accumulator
    ///
    /// `accelerate` arms the adaptive multiplier; it only has an effect when
    /// the configured ceiling is above 1. A zero delta (an input tick with
    /// no rotation) resets the multiplier.
    pub fn on_tick(&mut self, delta: i8, accelerate: bool) {
        if delta == 0 {
            // no movement -> no acceleration
            self.accel_factor = 0;
            return;
        }

        if accelerate && self.max_accel > 1 {
            if delta > 0 {
                if self.accel_factor >= 0 {
                    self.accel_factor = self.accel_factor.saturating_add(1);
                } else {
                    self.accel_factor = 1;
                }
            } else if self.accel_factor <= 0 {
                self.accel_factor = self.accel_factor.saturating_sub(1);
            } else {
                self.accel_factor = -1;
            }
            let scale = self.accel_factor.unsigned_abs().clamp(1, self.max_accel) as i16;
            self.accumulated = self.accumulated.saturating_add(delta as i16 * scale);
        } else {
            self.accumulated = self.accumulated.saturating_add(delta as i16);
        }
    }

    /// Sign of the pending scroll: -1, 0 or +1
    ///
    /// Does not consume; jogging uses this to detect direction reversal
    /// before deciding how to consume the quantity.
    pub fn direction(&self) -> i8 {
        self.accumulated.signum() as i8
    }

    /// Consume the entire pending scroll quantity
    pub fn take(&mut self) -> i16 {
        let value = self.accumulated;
        self.accumulated = 0;
        value
    }

    /// Consume whole logical steps of `ticks_per_step` ticks each
    ///
    /// Division truncates toward zero, so jitter below one step returns 0
    /// and leaves the accumulator untouched - the debounce for settings
    /// that must not twitch on every quarter-detent. When at least one
    /// whole step is available the full quantity is consumed, residue
    /// included.
    pub fn take_steps(&mut self, ticks_per_step: i16) -> i16 {
        let steps = self.accumulated / ticks_per_step;
        if steps != 0 {
            self.accumulated = 0;
        }
        steps
    }

    /// Discard any pending scroll and reset acceleration
    pub fn clear(&mut self) {
        self.accumulated = 0;
        self.accel_factor = 0;
    }
}
