//! Axis identifiers and per-axis motion constants

/// Number of coordinated axes (X, Y, Z plus the extruder drive)
pub const NUM_AXES: usize = 4;

/// Machine axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis (horizontal, gantry)
    X,
    /// Y axis (horizontal, gantry)
    Y,
    /// Z axis (vertical, buildplate)
    Z,
    /// Extruder drive
    E,
}

impl Axis {
    /// The axes reachable from the move-axes screen
    pub const JOG_AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into position arrays
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::E => 3,
        }
    }

    /// Check if this is a horizontal gantry axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::X | Axis::Y)
    }

    /// Quantized jog increment in millimeters
    ///
    /// Horizontal axes move in coarser increments than the buildplate.
    pub fn jog_quantum_mm(self) -> f32 {
        match self {
            Axis::X | Axis::Y => 0.1,
            Axis::Z | Axis::E => 0.05,
        }
    }

    /// Edit step for direct position entry in millimeters
    pub fn position_step_mm(self) -> f32 {
        match self {
            Axis::X | Axis::Y => 0.05,
            Axis::Z | Axis::E => 0.01,
        }
    }
}

/// Direction of travel along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    /// Toward the axis minimum endstop
    TowardMin,
    /// Toward the axis maximum endstop
    TowardMax,
}

impl MoveDirection {
    /// Direction implied by a signed speed; `None` when stationary
    pub fn from_speed(speed: i8) -> Option<Self> {
        match speed {
            s if s < 0 => Some(MoveDirection::TowardMin),
            s if s > 0 => Some(MoveDirection::TowardMax),
            _ => None,
        }
    }

    /// Direction implied by a signed position delta; `None` below the dead-band
    pub fn from_delta(delta_mm: f32, deadband_mm: f32) -> Option<Self> {
        if delta_mm > deadband_mm {
            Some(MoveDirection::TowardMax)
        } else if delta_mm < -deadband_mm {
            Some(MoveDirection::TowardMin)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_indices_are_distinct() {
        let axes = [Axis::X, Axis::Y, Axis::Z, Axis::E];
        for (i, a) in axes.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
    }

    #[test]
    fn test_jog_quantum() {
        assert_eq!(Axis::X.jog_quantum_mm(), 0.1);
        assert_eq!(Axis::Y.jog_quantum_mm(), 0.1);
        assert_eq!(Axis::Z.jog_quantum_mm(), 0.05);
    }

    #[test]
    fn test_direction_from_speed() {
        assert_eq!(MoveDirection::from_speed(-3), Some(MoveDirection::TowardMin));
        assert_eq!(MoveDirection::from_speed(7), Some(MoveDirection::TowardMax));
        assert_eq!(MoveDirection::from_speed(0), None);
    }

    #[test]
    fn test_direction_from_delta_respects_deadband() {
        assert_eq!(MoveDirection::from_delta(0.003, 0.005), None);
        assert_eq!(
            MoveDirection::from_delta(0.01, 0.005),
            Some(MoveDirection::TowardMax)
        );
        assert_eq!(
            MoveDirection::from_delta(-0.01, 0.005),
            Some(MoveDirection::TowardMin)
        );
    }
}
