//! Input events from the encoder knob

/// Input events produced by the rotary encoder and its push button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder rotated clockwise (1 detent)
    EncoderCw,
    /// Encoder rotated counter-clockwise (1 detent)
    EncoderCcw,
    /// Short press (<500 ms)
    Click,
    /// Long press (>=500 ms)
    LongPress,
    /// Button released (after long press)
    Release,
}

impl InputEvent {
    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::EncoderCw | InputEvent::EncoderCcw)
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            InputEvent::Click | InputEvent::LongPress | InputEvent::Release
        )
    }

    /// Returns the rotation direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::EncoderCw => 1,
            InputEvent::EncoderCcw => -1,
            _ => 0,
        }
    }
}
