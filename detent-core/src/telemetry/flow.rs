//! Smoothed volumetric extrusion rate
//!
//! Each time a new motion block becomes current, its step counts yield an
//! instantaneous filament rate; a heavy low-pass filter keeps the readout
//! steady enough to display. The filter lags on purpose.

use crate::config::machine::MAX_EXTRUDERS;

/// Low-pass filter weight toward the previous smoothed value
pub const LOW_PASS_SMOOTHING: f32 = 0.95;

/// Cross-section of 2.85 mm filament in mm^2, used when no volumetric
/// calibration is available
pub const DEFAULT_FILAMENT_AREA_MM2: f32 = 6.379_396_6;

/// One observation of the planner's current motion block
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockObservation {
    /// Extruder steps in this block
    pub steps_e: u32,
    /// X steps in this block
    pub steps_x: u32,
    /// Y steps in this block
    pub steps_y: u32,
    /// Nominal step rate for the block, steps per second
    pub nominal_rate_steps_s: f32,
    /// Total step events in the block
    pub step_event_count: u32,
    /// Nominal cartesian speed of the block, mm per second
    pub nominal_speed_mm_s: f32,
    /// Extruder the block belongs to
    pub active_extruder: u8,
}

/// Extrusion rate configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowConfig {
    /// Extruder steps per millimeter of filament
    pub e_steps_per_mm: f32,
    /// Calibrated volume-to-length ratio per extruder; values at or above
    /// ~1.0 mean "uncalibrated, use the filament cross-section instead"
    pub volume_to_length: [f32; MAX_EXTRUDERS],
    /// Filament cross-section fallback, mm^2
    pub filament_area_mm2: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            e_steps_per_mm: 282.0,
            volume_to_length: [1.0; MAX_EXTRUDERS],
            filament_area_mm2: DEFAULT_FILAMENT_AREA_MM2,
        }
    }
}

/// Smoothed per-extruder volumetric rate plus the latched nominal speed
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowEstimator {
    config: FlowConfig,
    smoothed_mm3_s: [f32; MAX_EXTRUDERS],
    nominal_speed_mm_s: f32,
}

impl FlowEstimator {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            smoothed_mm3_s: [0.0; MAX_EXTRUDERS],
            nominal_speed_mm_s: 0.0,
        }
    }

    /// Fold one block observation into the filter
    ///
    /// Blocks without extrusion or without horizontal travel (retracts,
    /// z-hops, travel moves) are ignored so they do not drag the readout
    /// to zero between printing moves.
    pub fn observe(&mut self, block: &BlockObservation) {
        if block.steps_e == 0
            || (block.steps_x == 0 && block.steps_y == 0)
            || block.step_event_count == 0
        {
            return;
        }
        let e = (block.active_extruder as usize).min(MAX_EXTRUDERS - 1);

        // filament speed from the block's share of extruder steps
        let speed_e = block.steps_e as f32 * block.nominal_rate_steps_s
            / self.config.e_steps_per_mm
            / block.step_event_count as f32;

        let ratio = self.config.volume_to_length[e];
        let volume = if ratio < 0.99 {
            speed_e / ratio
        } else {
            speed_e * self.config.filament_area_mm2
        };

        self.smoothed_mm3_s[e] =
            self.smoothed_mm3_s[e] * LOW_PASS_SMOOTHING + volume * (1.0 - LOW_PASS_SMOOTHING);
        self.nominal_speed_mm_s = block.nominal_speed_mm_s;
    }

    /// Smoothed volumetric rate for one extruder, mm^3 per second
    pub fn rate_mm3_s(&self, extruder: u8) -> f32 {
        self.smoothed_mm3_s[(extruder as usize).min(MAX_EXTRUDERS - 1)]
    }

    /// Nominal speed of the most recent printing block, mm per second
    pub fn nominal_speed_mm_s(&self) -> f32 {
        self.nominal_speed_mm_s
    }

    /// Restart the filter (print start)
    pub fn reset(&mut self) {
        self.smoothed_mm3_s = [0.0; MAX_EXTRUDERS];
        self.nominal_speed_mm_s = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printing_block(steps_e: u32) -> BlockObservation {
        BlockObservation {
            steps_e,
            steps_x: 400,
            steps_y: 0,
            nominal_rate_steps_s: 2_000.0,
            step_event_count: 400,
            nominal_speed_mm_s: 50.0,
            active_extruder: 0,
        }
    }

    #[test]
    fn test_ignores_blocks_without_extrusion() {
        let mut flow = FlowEstimator::new(FlowConfig::default());
        flow.observe(&printing_block(0));
        assert_eq!(flow.rate_mm3_s(0), 0.0);
        assert_eq!(flow.nominal_speed_mm_s(), 0.0);
    }

    #[test]
    fn test_ignores_blocks_without_horizontal_travel() {
        let mut flow = FlowEstimator::new(FlowConfig::default());
        let mut block = printing_block(100);
        block.steps_x = 0;
        block.steps_y = 0;
        flow.observe(&block);
        assert_eq!(flow.rate_mm3_s(0), 0.0);
    }

    #[test]
    fn test_smoothing_converges_to_constant_input() {
        let mut flow = FlowEstimator::new(FlowConfig::default());
        let block = printing_block(100);

        // instantaneous rate for this block
        let speed_e = 100.0 * 2_000.0 / 282.0 / 400.0;
        let expected = speed_e * DEFAULT_FILAMENT_AREA_MM2;

        for _ in 0..400 {
            flow.observe(&block);
        }
        let settled = flow.rate_mm3_s(0);
        assert!((settled - expected).abs() < expected * 1e-3);

        // idempotent once converged
        flow.observe(&block);
        assert!((flow.rate_mm3_s(0) - settled).abs() < expected * 1e-4);
    }

    #[test]
    fn test_calibrated_ratio_divides_instead() {
        let mut config = FlowConfig::default();
        config.volume_to_length[0] = 0.5;
        let mut flow = FlowEstimator::new(config);
        let block = printing_block(100);

        let speed_e = 100.0 * 2_000.0 / 282.0 / 400.0;
        flow.observe(&block);
        let expected_first = speed_e / 0.5 * (1.0 - LOW_PASS_SMOOTHING);
        assert!((flow.rate_mm3_s(0) - expected_first).abs() < 1e-4);
    }

    #[test]
    fn test_latches_nominal_speed() {
        let mut flow = FlowEstimator::new(FlowConfig::default());
        flow.observe(&printing_block(100));
        assert_eq!(flow.nominal_speed_mm_s(), 50.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut flow = FlowEstimator::new(FlowConfig::default());
        flow.observe(&printing_block(100));
        flow.reset();
        assert_eq!(flow.rate_mm3_s(0), 0.0);
        assert_eq!(flow.nominal_speed_mm_s(), 0.0);
    }

    #[test]
    fn test_out_of_range_extruder_clamps() {
        let flow = FlowEstimator::new(FlowConfig::default());
        // reading a bogus extruder index is a no-op, not a panic
        assert_eq!(flow.rate_mm3_s(7), 0.0);
    }
}
