//! Raw pin sampling: the hardware truth the core never sees.
//!
//! Reset and emergency lines are active-low (pull-up inputs); presence
//! sensors are active-high, two per approach, OR-combined into a single
//! demand fact. The core only ever consumes the combined `InputSample`.

use crate::core::inputs::InputSample;

/// Raw logic levels as read off the input header.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PinLevels {
    /// Reset line, active low.
    pub reset_n: bool,
    /// Emergency line, active low.
    pub emergency_n: bool,
    /// North-South presence sensors.
    pub ns_sensors: [bool; 2],
    /// East-West presence sensors.
    pub ew_sensors: [bool; 2],
}

impl PinLevels {
    /// Idle bus: control lines pulled high, sensors low.
    pub fn idle() -> Self {
        Self {
            reset_n: true,
            emergency_n: true,
            ns_sensors: [false; 2],
            ew_sensors: [false; 2],
        }
    }
}

impl From<PinLevels> for InputSample {
    fn from(levels: PinLevels) -> Self {
        InputSample {
            reset: !levels.reset_n,
            emergency: !levels.emergency_n,
            ns_demand: levels.ns_sensors.iter().any(|&sensor| sensor),
            ew_demand: levels.ew_sensors.iter().any(|&sensor| sensor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_bus_samples_quiet() {
        let sample = InputSample::from(PinLevels::idle());
        assert_eq!(sample, InputSample::quiet());
    }

    #[test]
    fn control_lines_are_active_low() {
        let levels = PinLevels {
            reset_n: false,
            emergency_n: false,
            ..PinLevels::idle()
        };
        let sample = InputSample::from(levels);
        assert!(sample.reset);
        assert!(sample.emergency);
    }

    #[test]
    fn either_sensor_raises_demand() {
        for slot in 0..2 {
            let mut levels = PinLevels::idle();
            levels.ns_sensors[slot] = true;
            assert!(InputSample::from(levels).ns_demand);

            let mut levels = PinLevels::idle();
            levels.ew_sensors[slot] = true;
            assert!(InputSample::from(levels).ew_demand);
        }
    }

    #[test]
    fn sensors_do_not_cross_approaches() {
        let levels = PinLevels {
            ns_sensors: [true, true],
            ..PinLevels::idle()
        };
        let sample = InputSample::from(levels);
        assert!(sample.ns_demand);
        assert!(!sample.ew_demand);
    }
}
