//! Declarative menu option descriptors
//!
//! Screens declare an ordered list of option descriptors built once per
//! render; a single interpreter dispatches the selected item. Optional
//! items (second extruder, heated bed) come and go with the machine
//! layout instead of conditional compilation, so indices cannot drift.

pub mod action;
pub mod dispatch;
pub mod screens;

pub use action::{MenuAction, MenuItem, ScreenCommand, TuneTarget};
pub use dispatch::{apply_tune, TuneLimits, TuneState};
pub use screens::{expert_settings_items, heatup_items, move_axes_items, printing_items};
