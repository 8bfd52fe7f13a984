//! Temperature subsystem trait

/// Trait for the heater/temperature subsystem
///
/// Temperatures are whole degrees Celsius; the UI never needs finer
/// resolution than that.
pub trait HeaterBank {
    /// Number of extruder heaters present
    fn extruder_count(&self) -> u8;

    /// Current temperature of an extruder
    fn current_temp_c(&self, extruder: u8) -> i16;

    /// Target temperature of an extruder (0 = off)
    fn target_temp_c(&self, extruder: u8) -> i16;

    /// Set the target temperature of an extruder
    fn set_target_temp_c(&mut self, extruder: u8, target_c: i16);

    /// Check if a heated bed with a sensor is present
    fn has_bed(&self) -> bool;

    /// Current bed temperature
    fn bed_current_c(&self) -> i16;

    /// Target bed temperature (0 = off)
    fn bed_target_c(&self) -> i16;

    /// Set the target bed temperature
    fn set_bed_target_c(&mut self, target_c: i16);

    /// Instantaneous heater output duty for an extruder, 0-127
    fn heater_duty(&self, extruder: u8) -> u8;

    /// Run one pass of the heater control loop
    ///
    /// Called from the recovery phase, which owns heater management while
    /// the normal print loop is not running.
    fn manage(&mut self);
}
