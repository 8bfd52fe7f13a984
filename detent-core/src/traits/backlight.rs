//! Backlight/LED output trait

/// Trait for the case LED / display backlight driver
pub trait Backlight {
    /// Set brightness as a percentage, 0-100
    fn set_brightness_pct(&mut self, pct: u8);
}
