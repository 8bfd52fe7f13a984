//! Phase controller
//!
//! Owns the current [`PrintPhase`] and samples collaborators to decide
//! when condition-driven transitions fire: heat-up completion, pause
//! drain, and the per-tick recovery loop.

use crate::state::phase::{PhaseEvent, PrintPhase};
use crate::timeout::{DimmingSupervisor, InteractionTimer};
use crate::traits::{Backlight, HeaterBank};

/// Heat-up completion configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseConfig {
    /// Completion window below target, degrees Celsius
    pub temp_window_c: i16,
    /// Gate heat-up completion on the bed pre-check window
    ///
    /// Machines without a bed sensor skip the pre-check and go straight to
    /// the per-extruder checks.
    pub has_bed_sensor: bool,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            temp_window_c: 2,
            has_bed_sensor: true,
        }
    }
}

/// Print phase controller
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseController {
    phase: PrintPhase,
    config: PhaseConfig,
}

impl PhaseController {
    pub fn new(config: PhaseConfig) -> Self {
        Self {
            phase: PrintPhase::Idle,
            config,
        }
    }

    pub fn phase(&self) -> PrintPhase {
        self.phase
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    /// Apply an externally generated event
    pub fn apply(&mut self, event: PhaseEvent) -> PrintPhase {
        self.phase = self.phase.transition(event);
        self.phase
    }

    /// Check whether every heater has reached its window
    ///
    /// The bed (when sensed) is pre-checked against a window twice as wide
    /// as the extruder window; a queued non-interactive command defers
    /// completion to the next tick.
    pub fn heatup_ready<H: HeaterBank>(&self, heaters: &H, command_queued: bool) -> bool {
        if command_queued {
            return false;
        }

        if self.config.has_bed_sensor && heaters.has_bed() {
            let pre_window = self.config.temp_window_c * 2;
            if heaters.bed_current_c() < heaters.bed_target_c() - pre_window {
                return false;
            }
        }

        for e in 0..heaters.extruder_count() {
            if heaters.current_temp_c(e) < heaters.target_temp_c(e) - self.config.temp_window_c {
                return false;
            }
        }
        true
    }

    /// Drive the heat-up phases for one tick
    ///
    /// Returns true exactly once, on the tick the phase moves to
    /// [`PrintPhase::Normal`]; the caller starts the print and switches
    /// the active screen on that edge.
    pub fn poll_heatup<H: HeaterBank>(&mut self, heaters: &H, command_queued: bool) -> bool {
        if !self.phase.is_heating() {
            return false;
        }
        if self.heatup_ready(heaters, command_queued) {
            self.phase = self.phase.transition(PhaseEvent::HeatupComplete);
            return true;
        }
        false
    }

    /// Drive the pause drain for one tick
    ///
    /// Returns true on the tick the queue empties and the phase becomes
    /// [`PrintPhase::Paused`].
    pub fn poll_pause_drain(&mut self, moves_queued: u8) -> bool {
        if self.phase == PrintPhase::PauseRequested && moves_queued == 0 {
            self.phase = self.phase.transition(PhaseEvent::QueueDrained);
            return true;
        }
        false
    }

    /// One tick of the recovery phase
    ///
    /// While recovering, the normal print loop is not running, so this
    /// phase invokes heater management and the idle supervisor itself,
    /// then asks the caller to refresh the display. The phase is left by
    /// an external [`PhaseEvent::RecoveryComplete`] or abort.
    pub fn recover_tick<H, B, F>(
        &mut self,
        now_ms: u64,
        heaters: &mut H,
        dimming: &mut DimmingSupervisor,
        backlight: &mut B,
        interaction: &InteractionTimer,
        user_brightness_pct: u8,
        mut update_display: F,
    ) where
        H: HeaterBank,
        B: Backlight,
        F: FnMut(),
    {
        if self.phase != PrintPhase::Recovering {
            return;
        }
        heaters.manage();
        dimming.update_led(interaction.idle_ms(now_ms), backlight, user_brightness_pct);
        update_display();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeHeaters {
        extruders: Vec<(i16, i16)>,
        bed: Option<(i16, i16)>,
        manage_calls: u8,
    }

    impl FakeHeaters {
        fn nozzles_only(extruders: Vec<(i16, i16)>) -> Self {
            Self {
                extruders,
                bed: None,
                manage_calls: 0,
            }
        }

        fn with_bed(extruders: Vec<(i16, i16)>, bed: (i16, i16)) -> Self {
            Self {
                extruders,
                bed: Some(bed),
                manage_calls: 0,
            }
        }
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

        fn manage(&mut self) {
            self.manage_calls += 1;
        }
    }

    struct NullBacklight;

    impl Backlight for NullBacklight {
        fn set_brightness_pct(&mut self, _pct: u8) {}
    }

    #[test]
    fn test_heatup_completes_exactly_once() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartHeating);

        let heaters = FakeHeaters::with_bed(vec![(199, 200)], (59, 60));
        assert!(ctl.poll_heatup(&heaters, false));
        assert_eq!(ctl.phase(), PrintPhase::Normal);
        // second poll is a no-op: the transition already fired
        assert!(!ctl.poll_heatup(&heaters, false));
    }

    #[test]
    fn test_heatup_waits_for_cold_extruder() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartHeating);

        let heaters = FakeHeaters::nozzles_only(vec![(199, 200), (150, 200)]);
        assert!(!ctl.poll_heatup(&heaters, false));
        assert_eq!(ctl.phase(), PrintPhase::Heating);
    }

    #[test]
    fn test_heatup_bed_precheck_uses_wider_window() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartHeating);

        // bed 5 below target: outside the 2*window pre-check
        let behind = FakeHeaters::with_bed(vec![(200, 200)], (55, 60));
        assert!(!ctl.poll_heatup(&behind, false));

        // bed 4 below target: inside 2*window
        let close = FakeHeaters::with_bed(vec![(200, 200)], (56, 60));
        assert!(ctl.poll_heatup(&close, false));
    }

    #[test]
    fn test_heatup_skips_bed_precheck_without_sensor() {
        let mut ctl = PhaseController::new(PhaseConfig {
            temp_window_c: 2,
            has_bed_sensor: false,
        });
        ctl.apply(PhaseEvent::StartHeating);

        // bed reads far behind, but the machine has no bed sensor
        let heaters = FakeHeaters::with_bed(vec![(200, 200)], (20, 60));
        assert!(ctl.poll_heatup(&heaters, false));
    }

    #[test]
    fn test_heatup_defers_to_queued_command() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartHeating);

        let heaters = FakeHeaters::nozzles_only(vec![(200, 200)]);
        assert!(!ctl.poll_heatup(&heaters, true));
        assert!(ctl.poll_heatup(&heaters, false));
    }

    #[test]
    fn test_pause_drain() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartHeating);
        ctl.apply(PhaseEvent::HeatupComplete);
        ctl.apply(PhaseEvent::PauseRequested);

        assert!(!ctl.poll_pause_drain(3));
        assert_eq!(ctl.phase(), PrintPhase::PauseRequested);
        assert!(ctl.poll_pause_drain(0));
        assert_eq!(ctl.phase(), PrintPhase::Paused);
    }

    #[test]
    fn test_recover_tick_invokes_collaborators() {
        let mut ctl = PhaseController::new(PhaseConfig::default());
        ctl.apply(PhaseEvent::StartRecovery);
        assert_eq!(ctl.phase(), PrintPhase::Recovering);

        let mut heaters = FakeHeaters::nozzles_only(vec![(100, 200)]);
        let mut dimming = DimmingSupervisor::new(0, 0);
        let mut backlight = NullBacklight;
        let interaction = InteractionTimer::new();
        let mut display_updates = 0;

        ctl.recover_tick(
            1_000,
            &mut heaters,
            &mut dimming,
            &mut backlight,
            &interaction,
            100,
            || display_updates += 1,
        );
        assert_eq!(heaters.manage_calls, 1);
        assert_eq!(display_updates, 1);

        // leaving the phase stops the loop
        ctl.apply(PhaseEvent::RecoveryComplete);
        ctl.recover_tick(
            2_000,
            &mut heaters,
            &mut dimming,
            &mut backlight,
            &interaction,
            100,
            || display_updates += 1,
        );
        assert_eq!(heaters.manage_calls, 1);
        assert_eq!(display_updates, 1);
    }
}
