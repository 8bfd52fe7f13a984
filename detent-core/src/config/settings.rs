//! Persisted UI settings
//!
//! A small set of operator preferences survives power cycles through the
//! settings store collaborator. Stored values are validated on load and
//! clamped to safe defaults; corruption never becomes an error.
//!
//! With the `serde` feature the whole set also round-trips through a
//! postcard blob (magic + version + payload) for firmwares that persist
//! settings as one flash record instead of named cells.

use crate::timeout::MAX_TIMEOUT_MIN;
use crate::traits::{Setting, SettingsStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Contrast applied when storage holds 0 (never written)
pub const DEFAULT_CONTRAST: u8 = 0xDF;

/// Magic number identifying a valid settings blob
#[cfg(feature = "serde")]
pub const SETTINGS_MAGIC: u32 = 0x44544E54; // "DTNT"

/// Current settings blob version
#[cfg(feature = "serde")]
pub const SETTINGS_VERSION: u8 = 1;

/// Operator interface mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UiMode {
    /// Guided interface, no acceleration, fewer tunables
    #[default]
    Standard,
    /// Full tuning surface with encoder acceleration
    Expert,
}

impl UiMode {
    /// Decode a stored value; anything unexpected is Standard
    pub fn from_raw(raw: u16) -> Self {
        if raw == 1 {
            UiMode::Expert
        } else {
            UiMode::Standard
        }
    }

    pub fn to_raw(self) -> u16 {
        match self {
            UiMode::Standard => 0,
            UiMode::Expert => 1,
        }
    }
}

/// The persisted operator preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiSettings {
    pub ui_mode: UiMode,
    /// LED dim timeout in minutes, 0 = disabled
    pub led_timeout_min: u16,
    /// Screen blank timeout in minutes, 0 = disabled
    pub screen_timeout_min: u16,
    /// Display contrast, 1-255
    pub contrast: u8,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            ui_mode: UiMode::Standard,
            led_timeout_min: 0,
            screen_timeout_min: 0,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl UiSettings {
    /// Load settings from the store, clamping out-of-range values
    ///
    /// Erased or corrupted storage reads as large values; timeouts clamp
    /// to the supported maximum and a zero contrast (storage never
    /// written) becomes the default.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        let ui_mode = UiMode::from_raw(store.read(Setting::UiMode));
        let led_timeout_min = store.read(Setting::LedTimeout).min(MAX_TIMEOUT_MIN);
        let screen_timeout_min = store.read(Setting::ScreenTimeout).min(MAX_TIMEOUT_MIN);
        let mut contrast = store.read(Setting::Contrast).min(0xFF) as u8;
        if contrast == 0 {
            contrast = DEFAULT_CONTRAST;
        }
        Self {
            ui_mode,
            led_timeout_min,
            screen_timeout_min,
            contrast,
        }
    }

    /// Write all settings back to the store
    pub fn save<S: SettingsStore>(&self, store: &mut S) {
        store.write(Setting::UiMode, self.ui_mode.to_raw());
        store.write(Setting::LedTimeout, self.led_timeout_min);
        store.write(Setting::ScreenTimeout, self.screen_timeout_min);
        store.write(Setting::Contrast, self.contrast as u16);
    }
}

/// Settings as one validated flash record
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsBlob {
    /// Magic number for validation
    pub magic: u32,
    /// Blob format version
    pub version: u8,
    /// The settings payload
    pub settings: UiSettings,
}

#[cfg(feature = "serde")]
impl SettingsBlob {
    pub fn new(settings: UiSettings) -> Self {
        Self {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            settings,
        }
    }

    /// Serialize into `buf`, returning the written slice
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Option<&'a [u8]> {
        postcard::to_slice(self, buf).ok().map(|s| &*s)
    }

    /// Deserialize, falling back to defaults on any mismatch
    pub fn from_bytes(bytes: &[u8]) -> UiSettings {
        match postcard::from_bytes::<SettingsBlob>(bytes) {
            Ok(blob) if blob.magic == SETTINGS_MAGIC && blob.version == SETTINGS_VERSION => {
                blob.settings
            }
            _ => UiSettings::default(),
        }
    }
}
