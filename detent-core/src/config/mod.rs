//! Configuration: machine layout flags and persisted UI settings

pub mod machine;
pub mod settings;

pub use machine::{MachineLayout, MAX_EXTRUDERS};
pub use settings::{UiMode, UiSettings, DEFAULT_CONTRAST};
