//! Per-screen menu item lists
//!
//! Each builder returns the ordered options for one screen, derived from
//! the machine layout at render time.

use heapless::Vec;

use crate::config::MachineLayout;
use crate::menu::action::{MenuItem, ScreenCommand, TuneTarget};
use crate::motion::axis::Axis;

/// Upper bound on options per screen
pub const MAX_MENU_ITEMS: usize = 12;

/// Options shown while heating up before a print
pub fn heatup_items(layout: &MachineLayout) -> Vec<MenuItem, MAX_MENU_ITEMS> {
    let mut items = Vec::new();
    let _ = items.push(MenuItem::normal("TUNE", ScreenCommand::OpenTune));
    let _ = items.push(MenuItem::normal("ABORT", ScreenCommand::AbortPrint));
    let _ = items.push(MenuItem::edit("Nozzle", TuneTarget::NozzleTemp(0)));
    if layout.extruder_count > 1 {
        let _ = items.push(MenuItem::edit("Nozzle2", TuneTarget::NozzleTemp(1)));
    }
    if layout.has_heated_bed {
        let _ = items.push(MenuItem::edit("Buildplate", TuneTarget::BedTemp));
    }
    items
}

/// Options shown while printing
///
/// Page 0 carries the frequently touched values, page 1 the expert set.
pub fn printing_items(layout: &MachineLayout, page: u8) -> Vec<MenuItem, MAX_MENU_ITEMS> {
    let mut items = Vec::new();
    if page == 1 {
        let _ = items.push(MenuItem::normal("Back", ScreenCommand::PrevPage));
        let _ = items.push(MenuItem::normal("PAUSE", ScreenCommand::AskPause));
        let _ = items.push(MenuItem::edit_accel("LED", TuneTarget::LedBrightness, 4));
        let _ = items.push(MenuItem::edit_accel(
            "Retract len",
            TuneTarget::RetractLength,
            4,
        ));
        if layout.extruder_count > 1 {
            let _ = items.push(MenuItem::edit_accel("Swap len", TuneTarget::SwapLength, 4));
        }
        let _ = items.push(MenuItem::edit_accel(
            "Retract spd",
            TuneTarget::RetractSpeed,
            2,
        ));
        let _ = items.push(MenuItem::edit_accel("Accel", TuneTarget::Acceleration, 2));
        let _ = items.push(MenuItem::edit_accel("Jerk", TuneTarget::XyJerk, 2));
    } else {
        let _ = items.push(MenuItem::normal("PAUSE", ScreenCommand::AskPause));
        let _ = items.push(MenuItem::normal("More", ScreenCommand::NextPage));
        let _ = items.push(MenuItem::edit("Flow", TuneTarget::Flow(0)));
        if layout.extruder_count > 1 {
            let _ = items.push(MenuItem::edit("Flow2", TuneTarget::Flow(1)));
        }
        let _ = items.push(MenuItem::edit("Speed", TuneTarget::PrintSpeed));
        let _ = items.push(MenuItem::edit("Nozzle", TuneTarget::NozzleTemp(0)));
        if layout.extruder_count > 1 {
            let _ = items.push(MenuItem::edit("Nozzle2", TuneTarget::NozzleTemp(1)));
        }
        let _ = items.push(MenuItem::edit("Fan", TuneTarget::FanSpeed));
        if layout.has_heated_bed {
            let _ = items.push(MenuItem::edit("Buildplate", TuneTarget::BedTemp));
        }
    }
    items
}

/// Options on the move-axes screen
pub fn move_axes_items() -> Vec<MenuItem, MAX_MENU_ITEMS> {
    let mut items = Vec::new();
    let _ = items.push(MenuItem::normal("Home all", ScreenCommand::HomeAll));
    let _ = items.push(MenuItem::normal("RETURN", ScreenCommand::Return));
    for axis in Axis::JOG_AXES {
        let (jog_label, pos_label, home_label, pos_accel) = match axis {
            Axis::X => ("Move X", "X", "Home X", 4),
            Axis::Y => ("Move Y", "Y", "Home Y", 4),
            _ => ("Move Z", "Z", "Home Z", 5),
        };
        let _ = items.push(MenuItem::edit_accel(
            jog_label,
            TuneTarget::JogAxis(axis),
            2,
        ));
        let _ = items.push(MenuItem::edit_accel(
            pos_label,
            TuneTarget::PositionAxis(axis),
            pos_accel,
        ));
        let _ = items.push(MenuItem::normal(home_label, ScreenCommand::HomeAxis(axis)));
    }
    items
}

/// Entries in the scrolling expert settings list
pub fn expert_settings_items() -> Vec<MenuItem, MAX_MENU_ITEMS> {
    let mut items = Vec::new();
    let _ = items.push(MenuItem::scroll("RETURN", ScreenCommand::Return));
    let _ = items.push(MenuItem::scroll("User interface", ScreenCommand::OpenUiMode));
    let _ = items.push(MenuItem::scroll("LED timeout", ScreenCommand::OpenLedTimeout));
    let _ = items.push(MenuItem::scroll(
        "Screen saver",
        ScreenCommand::OpenScreenTimeout,
    ));
    let _ = items.push(MenuItem::scroll("Contrast", ScreenCommand::OpenContrast));
    items
}
