//! Menu action descriptors

use crate::motion::axis::Axis;

/// Navigation and one-shot commands a menu item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenCommand {
    /// Open the tune menu
    OpenTune,
    /// Ask for confirmation, then pause
    AskPause,
    /// Abort the active print
    AbortPrint,
    /// Flip to the next printing page
    NextPage,
    /// Flip to the previous printing page
    PrevPage,
    /// Return to the previous screen
    Return,
    /// Home all axes
    HomeAll,
    /// Home a single axis
    HomeAxis(Axis),
    /// Open the UI mode selector
    OpenUiMode,
    /// Open the LED timeout editor
    OpenLedTimeout,
    /// Open the screen timeout editor
    OpenScreenTimeout,
    /// Open the contrast editor
    OpenContrast,
}

/// Values an in-place edit can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TuneTarget {
    /// Print speed multiplier, percent
    PrintSpeed,
    /// Material flow multiplier for one extruder, percent
    Flow(u8),
    /// Nozzle target temperature for one extruder
    NozzleTemp(u8),
    /// Bed target temperature
    BedTemp,
    /// Part cooling fan, stored as a byte, shown as percent
    FanSpeed,
    /// Case LED brightness, percent
    LedBrightness,
    /// Retraction length, millimeters
    RetractLength,
    /// Extruder-swap retraction length, millimeters
    SwapLength,
    /// Retraction speed, millimeters per minute
    RetractSpeed,
    /// Default acceleration, millimeters per second squared
    Acceleration,
    /// XY jerk, millimeters per second
    XyJerk,
    /// Continuous jog of one axis
    JogAxis(Axis),
    /// Direct position edit of one axis
    PositionAxis(Axis),
}

/// How a menu item reacts to selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Selecting runs a command or navigates
    Normal(ScreenCommand),
    /// Selecting captures the encoder for an in-place value edit
    ///
    /// `max_accel` is the encoder acceleration ceiling while this item
    /// holds the encoder; 1 disables acceleration.
    InPlaceEdit { target: TuneTarget, max_accel: u8 },
    /// Item lives in a scrolling list; selecting runs the command
    Scroll(ScreenCommand),
}

/// One selectable option on a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    /// Short label for the renderer
    pub label: &'static str,
    pub action: MenuAction,
}

impl MenuItem {
    pub const fn normal(label: &'static str, command: ScreenCommand) -> Self {
        Self {
            label,
            action: MenuAction::Normal(command),
        }
    }

    pub const fn edit(label: &'static str, target: TuneTarget) -> Self {
        Self {
            label,
            action: MenuAction::InPlaceEdit {
                target,
                max_accel: 1,
            },
        }
    }

    pub const fn edit_accel(label: &'static str, target: TuneTarget, max_accel: u8) -> Self {
        Self {
            label,
            action: MenuAction::InPlaceEdit { target, max_accel },
        }
    }

    pub const fn scroll(label: &'static str, command: ScreenCommand) -> Self {
        Self {
            label,
            action: MenuAction::Scroll(command),
        }
    }

    /// Acceleration ceiling this item grants the encoder
    pub fn encoder_accel(&self) -> u8 {
        match self.action {
            MenuAction::InPlaceEdit { max_accel, .. } => max_accel,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_accel_defaults_to_one() {
        let item = MenuItem::edit("speed", TuneTarget::PrintSpeed);
        assert_eq!(item.encoder_accel(), 1);

        let item = MenuItem::normal("return", ScreenCommand::Return);
        assert_eq!(item.encoder_accel(), 1);

        let item = MenuItem::edit_accel("led", TuneTarget::LedBrightness, 4);
        assert_eq!(item.encoder_accel(), 4);
    }
}
