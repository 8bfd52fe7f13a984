//! Print phase definition
//!
//! Exactly one phase is active at a time; the estimator and the screen
//! code branch on it.

/// Print phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrintPhase {
    /// No print active
    Idle,
    /// Waiting for nozzle temperatures
    Heating,
    /// Waiting for the buildplate before nozzle heat-up begins
    HeatingBed,
    /// Printing
    Normal,
    /// Pause requested; queued moves still draining
    PauseRequested,
    /// Queue drained, axes parked
    Paused,
    /// Waiting for a click to continue
    WaitUser,
    /// Resuming from a power-loss position
    Recovering,
}

/// Events that move the print between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseEvent {
    /// A print was started; nozzles are heating
    StartHeating,
    /// A print was started; the buildplate heats first
    StartBedHeating,
    /// Every heater reached its window; printing begins
    HeatupComplete,
    /// Operator or host asked for a pause
    PauseRequested,
    /// The move queue drained after a pause request
    QueueDrained,
    /// The paused print now needs an explicit click to continue
    AwaitOperator,
    /// Operator resumed the print
    Resume,
    /// Power-loss recovery was requested
    StartRecovery,
    /// Recovery heat-up finished; printing continues
    RecoveryComplete,
    /// The print ran to completion
    PrintFinished,
    /// The print was aborted
    Abort,
}

impl PrintPhase {
    /// Check if a print is underway in any form
    pub fn is_active(&self) -> bool {
        !matches!(self, PrintPhase::Idle)
    }

    /// Check if the printer is still waiting on temperatures
    pub fn is_heating(&self) -> bool {
        matches!(self, PrintPhase::Heating | PrintPhase::HeatingBed)
    }

    /// Check if the operator has stopped the print flow
    pub fn is_paused(&self) -> bool {
        matches!(
            self,
            PrintPhase::PauseRequested | PrintPhase::Paused | PrintPhase::WaitUser
        )
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: PhaseEvent) -> Self {
        use PhaseEvent::*;
        use PrintPhase::*;

        match (self, event) {
            (Idle, StartHeating) => Heating,
            (Idle, StartBedHeating) => HeatingBed,
            (Idle, StartRecovery) => Recovering,

            (Heating, HeatupComplete) => Normal,
            (HeatingBed, HeatupComplete) => Normal,

            (Normal, PhaseEvent::PauseRequested) => PrintPhase::PauseRequested,
            (Normal, StartRecovery) => Recovering,

            (PrintPhase::PauseRequested, QueueDrained) => Paused,

            (Paused, AwaitOperator) => WaitUser,
            (Paused, Resume) => Normal,
            (WaitUser, Resume) => Normal,

            (Recovering, RecoveryComplete) => Normal,

            // a print can finish or be abandoned from any active phase
            (_, PrintFinished) | (_, Abort) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}
