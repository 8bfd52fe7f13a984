//! Monotonic clock trait

/// Trait for the firmware's monotonic clock
pub trait Clock {
    /// Milliseconds since boot; never goes backwards
    fn now_ms(&self) -> u64;
}
