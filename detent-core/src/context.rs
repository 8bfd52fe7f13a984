//! The per-tick UI context
//!
//! One explicit struct owns every piece of interaction state for the
//! lifetime of the device. The firmware calls [`UiContext::begin_tick`]
//! first (raw input feeds the accumulator before any consumer runs), lets
//! the active screen dispatch at most one edit, and calls
//! [`UiContext::end_tick`] last so the idle supervisor runs every tick
//! irrespective of phase.

use crate::config::{MachineLayout, UiMode, UiSettings};
use crate::input::{EncoderAccumulator, InputEvent};
use crate::menu::action::{MenuAction, MenuItem, TuneTarget};
use crate::menu::dispatch::{apply_tune, TuneLimits, TuneState};
use crate::motion::jog::{JogController, JogLimits};
use crate::state::controller::{PhaseConfig, PhaseController};
use crate::telemetry::flow::{FlowConfig, FlowEstimator};
use crate::telemetry::progress::{progress_units, HeatupProgress};
use crate::telemetry::time::TimeEstimator;
use crate::timeout::{DimmingSupervisor, InteractionTimer, ScreenEvent, MAX_TIMEOUT_MIN};
use crate::traits::{Backlight, Clock, Endstops, HeaterBank, MotionQueue, PrintSource};
use crate::tune::tune_value;

/// All interaction state, created once at firmware init
pub struct UiContext {
    pub encoder: EncoderAccumulator,
    pub interaction: InteractionTimer,
    pub settings: UiSettings,
    pub layout: MachineLayout,
    pub dimming: DimmingSupervisor,
    pub phases: PhaseController,
    pub jog: JogController,
    pub flow: FlowEstimator,
    pub time: TimeEstimator,
    pub heatup_progress: HeatupProgress,
    pub tune: TuneState,
    pub tune_limits: TuneLimits,
}

impl UiContext {
    pub fn new(settings: UiSettings, layout: MachineLayout) -> Self {
        let dimming = DimmingSupervisor::new(settings.led_timeout_min, settings.screen_timeout_min);
        Self {
            encoder: EncoderAccumulator::new(),
            interaction: InteractionTimer::new(),
            settings,
            layout,
            dimming,
            phases: PhaseController::new(PhaseConfig {
                has_bed_sensor: layout.has_bed_sensor,
                ..PhaseConfig::default()
            }),
            jog: JogController::new(JogLimits::default()),
            flow: FlowEstimator::new(FlowConfig::default()),
            time: TimeEstimator::new(),
            heatup_progress: HeatupProgress::new(),
            tune: TuneState::default(),
            tune_limits: TuneLimits::default(),
        }
    }

    /// Start a tick: fold raw input into the accumulator and refresh the
    /// interaction timestamp.
    ///
    /// Must run before any tuning or jogging consumer in the same tick.
    /// `item` is the menu item currently holding the encoder, if any; it
    /// decides the acceleration ceiling for this tick's input.
    pub fn begin_tick<C: Clock>(
        &mut self,
        clock: &C,
        raw_encoder_delta: i8,
        button_pressed: bool,
        item: Option<&MenuItem>,
    ) -> u64 {
        let now_ms = clock.now_ms();
        let accel = item.map(MenuItem::encoder_accel).unwrap_or(1);
        self.encoder.set_max_accel(accel);
        // acceleration is an expert-mode affordance
        let accelerate = self.settings.ui_mode == UiMode::Expert;
        self.encoder.on_tick(raw_encoder_delta, accelerate);
        if raw_encoder_delta != 0 || button_pressed {
            self.interaction.touch(now_ms);
        }
        now_ms
    }

    /// [`UiContext::begin_tick`] for input layers that deliver decoded
    /// events instead of raw interrupt deltas.
    pub fn begin_tick_from_event<C: Clock>(
        &mut self,
        clock: &C,
        event: Option<InputEvent>,
        item: Option<&MenuItem>,
    ) -> u64 {
        let delta = event.map(|e| e.rotation_delta()).unwrap_or(0);
        let button = event.map(|e| e.is_button()).unwrap_or(false);
        self.begin_tick(clock, delta, button, item)
    }

    /// Dispatch the selected in-place edit for this tick
    ///
    /// Motion targets go to the jog controller; value targets go through
    /// the tune interpreter. Returns true when anything changed.
    #[allow(clippy::too_many_arguments)]
    pub fn dispatch_edit<M, E, H, B>(
        &mut self,
        item: &MenuItem,
        now_ms: u64,
        button_pressed: bool,
        active_extruder: u8,
        queue: &mut M,
        endstops: &E,
        heaters: &mut H,
        backlight: &mut B,
    ) -> bool
    where
        M: MotionQueue,
        E: Endstops,
        H: HeaterBank,
        B: Backlight,
    {
        let MenuAction::InPlaceEdit { target, .. } = item.action else {
            return false;
        };
        match target {
            TuneTarget::JogAxis(axis) => {
                self.jog.tick(
                    axis,
                    &mut self.encoder,
                    button_pressed,
                    now_ms,
                    queue,
                    endstops,
                    &mut self.interaction,
                    active_extruder,
                );
                true
            }
            TuneTarget::PositionAxis(axis) => {
                self.jog
                    .edit_position(axis, &mut self.encoder, queue, endstops, active_extruder)
            }
            _ => apply_tune(
                target,
                &mut self.encoder,
                &mut self.tune,
                heaters,
                backlight,
                &self.tune_limits,
            ),
        }
    }

    /// Finish a tick: run the idle supervisor
    ///
    /// Runs every tick, whatever the phase. Returns the screen blanking
    /// edge, if one fired.
    pub fn end_tick<B: Backlight>(&mut self, now_ms: u64, backlight: &mut B) -> Option<ScreenEvent> {
        self.dimming.set_led_timeout(self.settings.led_timeout_min);
        self.dimming.set_screen_timeout(self.settings.screen_timeout_min);
        let idle_ms = self.interaction.idle_ms(now_ms);
        self.dimming
            .update_led(idle_ms, backlight, self.tune.led_brightness_pct as u8);
        self.dimming.poll_screen(idle_ms)
    }

    /// Reset the per-print trackers (print start)
    pub fn start_print(&mut self, now_ms: u64, expected_duration_s: u32) {
        self.flow.reset();
        self.heatup_progress.reset();
        self.time.start(now_ms, expected_duration_s);
    }

    /// A click while the print waits for the operator resumes it
    ///
    /// Returns true when the click was consumed by the wait state; the
    /// firmware then discards any partially executed move before motion
    /// restarts.
    pub fn wait_user_click(&mut self) -> bool {
        use crate::state::{PhaseEvent, PrintPhase};
        if self.phases.phase() == PrintPhase::WaitUser {
            self.phases.apply(PhaseEvent::Resume);
            return true;
        }
        false
    }

    /// Predicted seconds remaining for the active file; 0 = do not display
    pub fn predict_time_left<P: PrintSource>(&mut self, now_ms: u64, source: &P) -> u32 {
        self.time
            .predict_remaining_s(now_ms, source.bytes_read(), source.total_bytes())
    }

    /// File progress of the active print in bar units
    pub fn file_progress<P: PrintSource>(&self, source: &P) -> u8 {
        progress_units(source.bytes_read(), source.total_bytes())
    }

    /// Edit the LED dim timeout (settings screen)
    pub fn edit_led_timeout(&mut self) {
        let mut minutes = self.settings.led_timeout_min as i16;
        tune_value(&mut self.encoder, &mut minutes, 0, MAX_TIMEOUT_MIN as i16);
        self.settings.led_timeout_min = minutes as u16;
    }

    /// Edit the screen blank timeout (settings screen)
    pub fn edit_screen_timeout(&mut self) {
        let mut minutes = self.settings.screen_timeout_min as i16;
        tune_value(&mut self.encoder, &mut minutes, 0, MAX_TIMEOUT_MIN as i16);
        self.settings.screen_timeout_min = minutes as u16;
    }

    /// Edit the display contrast (settings screen)
    ///
    /// Contrast never reaches 0 so storage can use it as the "never
    /// written" sentinel. Returns true when the caller should push the new
    /// value to the display.
    pub fn edit_contrast(&mut self) -> bool {
        let mut contrast = self.settings.contrast as i16;
        let before = contrast;
        tune_value(&mut self.encoder, &mut contrast, 0x01, 0xFF);
        self.settings.contrast = contrast as u8;
        contrast != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::action::ScreenCommand;

    struct FakeClock {
        now: u64,
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> u64 {
            self.now
        }
    }

    struct NullBacklight;

    impl Backlight for NullBacklight {
        fn set_brightness_pct(&mut self, _pct: u8) {}
    }

    fn expert_settings() -> UiSettings {
        UiSettings {
            ui_mode: UiMode::Expert,
            ..UiSettings::default()
        }
    }

    #[test]
    fn test_begin_tick_touches_interaction_on_input() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        let clock = FakeClock { now: 5_000 };

        ctx.begin_tick(&clock, 0, false, None);
        assert_eq!(ctx.interaction.last_ms(), 0);

        ctx.begin_tick(&clock, 1, false, None);
        assert_eq!(ctx.interaction.last_ms(), 5_000);
    }

    #[test]
    fn test_begin_tick_arms_acceleration_from_item() {
        let mut ctx = UiContext::new(expert_settings(), MachineLayout::default());
        let clock = FakeClock { now: 0 };
        let item = MenuItem::edit_accel("led", TuneTarget::LedBrightness, 4);

        // four same-direction ticks with a ceiling of 4: 1+2+3+4
        for _ in 0..4 {
            ctx.begin_tick(&clock, 1, false, Some(&item));
        }
        assert_eq!(ctx.encoder.take(), 10);
    }

    #[test]
    fn test_standard_mode_never_accelerates() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        let clock = FakeClock { now: 0 };
        let item = MenuItem::edit_accel("led", TuneTarget::LedBrightness, 4);

        for _ in 0..4 {
            ctx.begin_tick(&clock, 1, false, Some(&item));
        }
        assert_eq!(ctx.encoder.take(), 4);
    }

    #[test]
    fn test_navigation_items_do_not_accelerate() {
        let mut ctx = UiContext::new(expert_settings(), MachineLayout::default());
        let clock = FakeClock { now: 0 };
        let item = MenuItem::normal("RETURN", ScreenCommand::Return);

        for _ in 0..4 {
            ctx.begin_tick(&clock, 1, false, Some(&item));
        }
        assert_eq!(ctx.encoder.take(), 4);
    }

    #[test]
    fn test_end_tick_tracks_updated_settings() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        let mut backlight = NullBacklight;

        // operator enables the screen saver mid-session
        ctx.settings.screen_timeout_min = 1;
        ctx.interaction.touch(0);
        assert_eq!(
            ctx.end_tick(2 * 60_000, &mut backlight),
            Some(ScreenEvent::Blank)
        );
    }

    #[test]
    fn test_start_print_resets_trackers() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        ctx.start_print(10_000, 600);
        assert_eq!(ctx.time.elapsed_s(70_000), 60);
    }

    #[test]
    fn test_wait_user_click_resumes() {
        use crate::state::{PhaseEvent, PrintPhase};
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        ctx.phases.apply(PhaseEvent::StartHeating);
        ctx.phases.apply(PhaseEvent::HeatupComplete);
        ctx.phases.apply(PhaseEvent::PauseRequested);
        ctx.phases.apply(PhaseEvent::QueueDrained);
        ctx.phases.apply(PhaseEvent::AwaitOperator);

        assert!(ctx.wait_user_click());
        assert_eq!(ctx.phases.phase(), PrintPhase::Normal);
        // clicks outside the wait state pass through
        assert!(!ctx.wait_user_click());
    }

    #[test]
    fn test_begin_tick_from_event() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        let clock = FakeClock { now: 1_000 };

        ctx.begin_tick_from_event(&clock, Some(InputEvent::EncoderCw), None);
        assert_eq!(ctx.encoder.take(), 1);
        assert_eq!(ctx.interaction.last_ms(), 1_000);

        ctx.begin_tick_from_event(&clock, Some(InputEvent::EncoderCcw), None);
        assert_eq!(ctx.encoder.take(), -1);
    }

    struct FakeSource;

    impl crate::traits::PrintSource for FakeSource {
        fn bytes_read(&self) -> u32 {
            500
        }

        fn total_bytes(&self) -> u32 {
            1_000
        }

        fn display_name(&self) -> &str {
            "part.gcode"
        }
    }

    #[test]
    fn test_file_progress_from_source() {
        let ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        assert_eq!(ctx.file_progress(&FakeSource), 55);
    }

    #[test]
    fn test_settings_editors() {
        let mut ctx = UiContext::new(UiSettings::default(), MachineLayout::default());
        let clock = FakeClock { now: 0 };

        // three detents up on the LED timeout
        for _ in 0..12 {
            ctx.begin_tick(&clock, 1, false, None);
        }
        ctx.edit_led_timeout();
        assert_eq!(ctx.settings.led_timeout_min, 3);

        // contrast floor is 1, not 0
        for _ in 0..12 {
            ctx.begin_tick(&clock, -1, false, None);
        }
        ctx.settings.contrast = 2;
        assert!(ctx.edit_contrast());
        assert_eq!(ctx.settings.contrast, 1);

        // no pending scroll: editor reports no change
        assert!(!ctx.edit_contrast());
    }
}
