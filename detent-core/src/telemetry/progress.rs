//! Print progress in display units
//!
//! The progress bar spans 124 units. File progress maps bytes onto that
//! span; heat-up progress estimates it from temperatures, with a monotonic
//! floor so the displayed bar never slides backwards while targets settle.

use crate::traits::HeaterBank;

/// Units in a full progress bar
pub const PROGRESS_SPAN: u8 = 124;

/// Ambient reference temperature used by the heat-up estimate
const AMBIENT_C: i16 = 20;

/// File progress in `[0, 124]` units
pub fn progress_units(bytes_read: u32, total_bytes: u32) -> u8 {
    if total_bytes == 0 {
        return 0;
    }
    let unit = (total_bytes + PROGRESS_SPAN as u32 - 1) / PROGRESS_SPAN as u32;
    (bytes_read / unit).min(PROGRESS_SPAN as u32) as u8
}

/// Display percentage for a progress value
pub fn progress_pct(units: u8) -> u8 {
    (units.min(PROGRESS_SPAN) as u16 * 100 / PROGRESS_SPAN as u16) as u8
}

/// Heat-up progress estimate with a monotonic floor
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeatupProgress {
    floor: u8,
}

impl HeatupProgress {
    pub fn new() -> Self {
        Self { floor: 0 }
    }

    /// Estimate progress from how far each active heater has climbed from
    /// ambient toward its completion window.
    ///
    /// The floor ratchets up with the estimate and is returned instead
    /// whenever a target change would make the bar regress.
    pub fn update<H: HeaterBank>(&mut self, heaters: &H, temp_window_c: i16) -> u8 {
        let mut progress: i32 = 125;

        for e in 0..heaters.extruder_count() {
            let target = heaters.target_temp_c(e) as i32;
            if target < 1 {
                continue;
            }
            let current = heaters.current_temp_c(e) as i32;
            if current > AMBIENT_C as i32 {
                let span = (target - AMBIENT_C as i32 - temp_window_c as i32).max(1);
                progress = progress.min((current - AMBIENT_C as i32) * 125 / span);
            } else {
                progress = 0;
            }
        }

        if heaters.has_bed() {
            let current = heaters.bed_current_c() as i32;
            let target = heaters.bed_target_c() as i32;
            if current > AMBIENT_C as i32 && target > (AMBIENT_C + temp_window_c) as i32 {
                let span = (target - AMBIENT_C as i32 - temp_window_c as i32).max(1);
                progress = progress.min((current - AMBIENT_C as i32) * 125 / span);
            } else if target > current - AMBIENT_C as i32 {
                progress = 0;
            }
        }

        let progress = progress.clamp(0, PROGRESS_SPAN as i32) as u8;
        if progress < self.floor {
            self.floor
        } else {
            self.floor = progress;
            progress
        }
    }

    /// Reset the floor (print start)
    pub fn reset(&mut self) {
        self.floor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHeaters {
        extruders: Vec<(i16, i16)>, // (current, target)
        bed: Option<(i16, i16)>,
    }

    impl HeaterBank for FakeHeaters {
        fn extruder_count(&self) -> u8 {
            self.extruders.len() as u8
        }

        fn current_temp_c(&self, extruder: u8) -> i16 {
            self.extruders[extruder as usize].0
        }

        fn target_temp_c(&self, extruder: u8) -> i16 {
            self.extruders[extruder as usize].1
        }

        fn set_target_temp_c(&mut self, extruder: u8, target_c: i16) {
            self.extruders[extruder as usize].1 = target_c;
        }

        fn has_bed(&self) -> bool {
            self.bed.is_some()
        }

        fn bed_current_c(&self) -> i16 {
            self.bed.map(|b| b.0).unwrap_or(0)
        }

        fn bed_target_c(&self) -> i16 {
            self.bed.map(|b| b.1).unwrap_or(0)
        }

        fn set_bed_target_c(&mut self, target_c: i16) {
            if let Some(bed) = &mut self.bed {
                bed.1 = target_c;
            }
        }

        fn heater_duty(&self, _extruder: u8) -> u8 {
            0
        }

        fn manage(&mut self) {}
    }

    #[test]
    fn test_file_progress_units() {
        // 1000 bytes -> unit = ceil(1000/124) = 9; 500/9 = 55
        assert_eq!(progress_units(500, 1_000), 55);
        assert_eq!(progress_units(0, 1_000), 0);
        assert_eq!(progress_units(1_000, 1_000), 111);
    }

    #[test]
    fn test_file_progress_empty_file() {
        assert_eq!(progress_units(0, 0), 0);
    }

    #[test]
    fn test_file_progress_never_exceeds_span() {
        // bytes_read past the end (metadata tail) still caps at 124
        assert_eq!(progress_units(2_000, 1_000), PROGRESS_SPAN);
    }

    #[test]
    fn test_progress_pct() {
        assert_eq!(progress_pct(0), 0);
        assert_eq!(progress_pct(62), 50);
        assert_eq!(progress_pct(124), 100);
    }

    #[test]
    fn test_heatup_progress_scales_with_temperature() {
        let mut tracker = HeatupProgress::new();
        let heaters = FakeHeaters {
            extruders: vec![(110, 200)],
            bed: None,
        };
        // (110-20)*125/(200-20-2) = 63, within the span
        assert_eq!(tracker.update(&heaters, 2), 63);
    }

    #[test]
    fn test_heatup_progress_cold_is_zero() {
        let mut tracker = HeatupProgress::new();
        let heaters = FakeHeaters {
            extruders: vec![(18, 200)],
            bed: None,
        };
        assert_eq!(tracker.update(&heaters, 2), 0);
    }

    #[test]
    fn test_heatup_progress_floor_prevents_regression() {
        let mut tracker = HeatupProgress::new();
        let warm = FakeHeaters {
            extruders: vec![(110, 200)],
            bed: None,
        };
        let first = tracker.update(&warm, 2);
        assert!(first > 0);

        // raising the target would shrink the raw estimate; the bar holds
        let retargeted = FakeHeaters {
            extruders: vec![(110, 260)],
            bed: None,
        };
        assert_eq!(tracker.update(&retargeted, 2), first);
    }

    #[test]
    fn test_heatup_progress_tracks_slowest_heater() {
        let mut tracker = HeatupProgress::new();
        let heaters = FakeHeaters {
            extruders: vec![(190, 200)],
            bed: Some((40, 60)),
        };
        // bed is further behind than the nozzle
        let bed_progress = (40 - 20) * 125 / (60 - 20 - 2);
        assert_eq!(tracker.update(&heaters, 2) as i32, bed_progress);
    }

    #[test]
    fn test_heatup_progress_ignores_idle_extruders() {
        let mut tracker = HeatupProgress::new();
        let heaters = FakeHeaters {
            extruders: vec![(198, 200), (25, 0)],
            bed: None,
        };
        // second extruder has no target and is skipped
        assert_eq!(tracker.update(&heaters, 2), PROGRESS_SPAN);
    }

    #[test]
    fn test_reset_clears_floor() {
        let mut tracker = HeatupProgress::new();
        let heaters = FakeHeaters {
            extruders: vec![(110, 200)],
            bed: None,
        };
        tracker.update(&heaters, 2);
        tracker.reset();
        let cold = FakeHeaters {
            extruders: vec![(18, 200)],
            bed: None,
        };
        assert_eq!(tracker.update(&cold, 2), 0);
    }
}
