//! Shared screen renderers
//!
//! Turns the core's menu descriptors and telemetry into screen rows. The
//! pixel-level work stays in the backend; these renderers only decide what
//! text lands on which row.

use detent_core::menu::MenuItem;
use detent_core::state::PrintPhase;
use detent_core::telemetry::progress::progress_pct;

use crate::format::{format_duration, format_mm, format_pct};
use crate::screen::{Screen, SCREEN_COLS, SCREEN_ROWS};

/// Rows available for menu items below the status area
const MENU_ROWS: usize = SCREEN_ROWS - 2;

/// Render a window of menu items with the selection highlighted
///
/// Items scroll so the selected one stays visible; the selected row gets a
/// full-width highlight. Out-of-range selections render an unselected
/// list (never a crash, per the menu contract).
pub fn render_menu(screen: &mut Screen, items: &[MenuItem], selected: Option<usize>) {
    let first_row = SCREEN_ROWS - MENU_ROWS;
    let window_start = match selected {
        Some(sel) if sel >= MENU_ROWS => sel + 1 - MENU_ROWS,
        _ => 0,
    };

    for row_offset in 0..MENU_ROWS {
        let row = first_row + row_offset;
        screen.clear_highlight(row);
        match items.get(window_start + row_offset) {
            Some(item) => {
                screen.set_line(row, item.label);
                if selected == Some(window_start + row_offset) {
                    screen.set_highlight(row, 0, SCREEN_COLS as u8);
                }
            }
            None => screen.set_line(row, ""),
        }
    }
}

/// Render the printing status area (top two rows)
///
/// Row 0 carries the file or phase name; row 1 pairs the time readout
/// with the progress percentage.
pub fn render_print_status(
    screen: &mut Screen,
    phase: PrintPhase,
    file_name: &str,
    time_left_s: u32,
    progress_units: u8,
    moves_queued: u8,
) {
    match phase {
        PrintPhase::Heating => screen.set_line(0, "Heating"),
        PrintPhase::HeatingBed => screen.set_line(0, "Heating buildplate"),
        PrintPhase::Recovering => screen.set_line(0, "Recovering print"),
        _ => screen.set_line(0, file_name),
    }

    match phase {
        PrintPhase::PauseRequested | PrintPhase::Paused | PrintPhase::WaitUser => {
            let label = if moves_queued > 0 {
                "Pausing..."
            } else if phase == PrintPhase::WaitUser {
                "Click to continue..."
            } else {
                "Paused..."
            };
            screen.set_line(1, label);
        }
        PrintPhase::Normal if time_left_s > 0 => {
            screen.set_line_split(
                1,
                format_duration(time_left_s).as_str(),
                format_pct(progress_pct(progress_units)).as_str(),
            );
        }
        _ => screen.set_line(1, ""),
    }
}

/// Render the jog readout row: axis label plus live position
pub fn render_axis_position(screen: &mut Screen, row: usize, label: &str, position_mm: f32) {
    screen.set_line_split(row, label, format_mm(position_mm).as_str());
}
