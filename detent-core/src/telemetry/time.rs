//! Smoothed total-time prediction
//!
//! Projects the total print time from elapsed wall time and the fraction
//! of the file consumed, then smooths that projection hard (a 999:1
//! filter) so the displayed estimate does not jump around with every
//! burst of short moves. Early in a print the raw projection is wildly
//! wrong, so for the first half of the sliced estimate's duration the
//! result is blended linearly toward that sliced estimate instead.

/// Elapsed time under which no estimate is shown when the file carries no
/// sliced duration
const MIN_DISPLAY_ELAPSED_S: f32 = 60.0;

/// Weight of the previous smoothed value in the slow filter
const SLOW_SMOOTHING_WEIGHT: f32 = 999.0;

/// Print time predictor
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeEstimator {
    start_ms: u64,
    /// Sliced duration estimate from the file, seconds (0 = none)
    expected_duration_s: u32,
    smoothed_total_s: f32,
}

impl Default for TimeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeEstimator {
    pub fn new() -> Self {
        Self {
            start_ms: 0,
            expected_duration_s: 0,
            smoothed_total_s: 0.0,
        }
    }

    /// Begin timing a print
    ///
    /// `expected_duration_s` is the slicer's own estimate when the file
    /// provides one, 0 otherwise.
    pub fn start(&mut self, now_ms: u64, expected_duration_s: u32) {
        self.start_ms = now_ms;
        self.expected_duration_s = expected_duration_s;
        self.smoothed_total_s = 0.0;
    }

    /// Seconds since the print started
    pub fn elapsed_s(&self, now_ms: u64) -> u32 {
        (now_ms.saturating_sub(self.start_ms) / 1000) as u32
    }

    /// Predicted seconds remaining; 0 means "unknown, do not display"
    pub fn predict_remaining_s(&mut self, now_ms: u64, bytes_read: u32, total_bytes: u32) -> u32 {
        let elapsed_ms = now_ms.saturating_sub(self.start_ms) as f32;
        let elapsed_s = elapsed_ms / 1000.0;
        let expected_s = self.expected_duration_s as f32;

        let projected_s = if bytes_read > 0 && total_bytes > 0 {
            elapsed_ms * total_bytes as f32 / bytes_read as f32 / 1000.0
        } else {
            f32::INFINITY
        };

        self.smoothed_total_s =
            (self.smoothed_total_s * SLOW_SMOOTHING_WEIGHT + projected_s)
                / (SLOW_SMOOTHING_WEIGHT + 1.0);
        if !self.smoothed_total_s.is_finite() {
            // numeric degeneracy: fall back to the raw projection
            self.smoothed_total_s = projected_s;
        }

        if self.expected_duration_s == 0 && elapsed_s < MIN_DISPLAY_ELAPSED_S {
            // too early to trust the projection; reprime the filter
            if projected_s.is_finite() {
                self.smoothed_total_s = projected_s;
            }
            return 0;
        }

        let total_s = if elapsed_s < expected_s / 2.0 {
            // blend from the sliced estimate toward the live projection
            let mut f = elapsed_s / (expected_s / 2.0);
            if f > 1.0 {
                f = 1.0;
            }
            if self.smoothed_total_s.is_finite() {
                self.smoothed_total_s * f + expected_s * (1.0 - f)
            } else {
                expected_s
            }
        } else if self.smoothed_total_s.is_finite() {
            self.smoothed_total_s
        } else {
            return 0;
        };

        if elapsed_s > total_s {
            1
        } else {
            ((total_s - elapsed_s) as u32).max(1)
        }
    }
}
