//! Lamp output vectors and the phase-to-lamps mapping.
//!
//! The mapping is the output stage of the controller: a total, pure
//! function from `Phase` to `LightPattern`. Two pairs of phases alias to
//! the same pattern on purpose (see `Phase::lights`).

use super::phase::Phase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One boolean per physical lamp head.
///
/// The core safety property of the whole controller is expressed over
/// this type: at most one green and at most one yellow lamp may be lit
/// at any time (`conflict_free`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LightPattern {
    pub ns_green: bool,
    pub ns_yellow: bool,
    pub ew_green: bool,
    pub ew_yellow: bool,
}

impl LightPattern {
    /// All lamps dark. The fail-safe output.
    pub const OFF: LightPattern = LightPattern {
        ns_green: false,
        ns_yellow: false,
        ew_green: false,
        ew_yellow: false,
    };

    /// North-South green only.
    pub const NS_GREEN: LightPattern = LightPattern {
        ns_green: true,
        ns_yellow: false,
        ew_green: false,
        ew_yellow: false,
    };

    /// North-South yellow only.
    pub const NS_YELLOW: LightPattern = LightPattern {
        ns_green: false,
        ns_yellow: true,
        ew_green: false,
        ew_yellow: false,
    };

    /// East-West green only.
    pub const EW_GREEN: LightPattern = LightPattern {
        ns_green: false,
        ns_yellow: false,
        ew_green: true,
        ew_yellow: false,
    };

    /// East-West yellow only.
    pub const EW_YELLOW: LightPattern = LightPattern {
        ns_green: false,
        ns_yellow: false,
        ew_green: false,
        ew_yellow: true,
    };

    /// Check that no conflicting lamps are lit: at most one of the two
    /// greens and at most one of the two yellows.
    pub fn conflict_free(&self) -> bool {
        !(self.ns_green && self.ew_green) && !(self.ns_yellow && self.ew_yellow)
    }

    /// Number of lamps currently lit.
    pub fn lit_count(&self) -> usize {
        [self.ns_green, self.ns_yellow, self.ew_green, self.ew_yellow]
            .iter()
            .filter(|&&lamp| lamp)
            .count()
    }
}

impl fmt::Display for LightPattern {
    /// Compact waveform rendering, e.g. `NS[G-] EW[--]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lamp = |lit: bool, symbol: char| if lit { symbol } else { '-' };
        write!(
            f,
            "NS[{}{}] EW[{}{}]",
            lamp(self.ns_green, 'G'),
            lamp(self.ns_yellow, 'Y'),
            lamp(self.ew_green, 'G'),
            lamp(self.ew_yellow, 'Y'),
        )
    }
}

impl Phase {
    /// Map a phase to its lamp pattern (the output stage).
    ///
    /// Total and pure. `NsGreen` and `EmergencyGreen` alias to the same
    /// NS-green pattern, so emergency traffic always receives the normal
    /// NS right-of-way lamps. `EwYellow` and `EmergencyTransition` alias
    /// to the EW-yellow pattern while the junction settles. `Init` maps
    /// to all-lamps-off, the fail-safe default.
    pub fn lights(self) -> LightPattern {
        match self {
            Phase::Init => LightPattern::OFF,
            Phase::NsGreen | Phase::EmergencyGreen => LightPattern::NS_GREEN,
            Phase::NsYellow => LightPattern::NS_YELLOW,
            Phase::EwGreen => LightPattern::EW_GREEN,
            Phase::EwYellow | Phase::EmergencyTransition => LightPattern::EW_YELLOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_dark() {
        assert_eq!(Phase::Init.lights(), LightPattern::OFF);
        assert_eq!(Phase::Init.lights().lit_count(), 0);
    }

    #[test]
    fn emergency_green_aliases_ns_green() {
        assert_eq!(Phase::EmergencyGreen.lights(), Phase::NsGreen.lights());
        assert_eq!(Phase::EmergencyGreen.lights(), LightPattern::NS_GREEN);
    }

    #[test]
    fn emergency_transition_aliases_ew_yellow() {
        assert_eq!(
            Phase::EmergencyTransition.lights(),
            Phase::EwYellow.lights()
        );
        assert_eq!(Phase::EmergencyTransition.lights(), LightPattern::EW_YELLOW);
    }

    #[test]
    fn every_phase_maps_to_a_conflict_free_pattern() {
        for phase in Phase::ALL {
            assert!(
                phase.lights().conflict_free(),
                "phase {} produced a conflicting pattern",
                phase.name()
            );
        }
    }

    #[test]
    fn non_init_phases_light_exactly_one_lamp() {
        for phase in Phase::ALL {
            if phase != Phase::Init {
                assert_eq!(phase.lights().lit_count(), 1, "phase {}", phase.name());
            }
        }
    }

    #[test]
    fn conflict_detection_flags_dual_greens() {
        let bad = LightPattern {
            ns_green: true,
            ew_green: true,
            ..LightPattern::OFF
        };
        assert!(!bad.conflict_free());
    }

    #[test]
    fn conflict_detection_flags_dual_yellows() {
        let bad = LightPattern {
            ns_yellow: true,
            ew_yellow: true,
            ..LightPattern::OFF
        };
        assert!(!bad.conflict_free());
    }

    #[test]
    fn display_renders_waveform_cell() {
        assert_eq!(LightPattern::NS_GREEN.to_string(), "NS[G-] EW[--]");
        assert_eq!(LightPattern::EW_YELLOW.to_string(), "NS[--] EW[-Y]");
        assert_eq!(LightPattern::OFF.to_string(), "NS[--] EW[--]");
    }

    #[test]
    fn pattern_serializes_correctly() {
        let pattern = LightPattern::EW_GREEN;
        let json = serde_json::to_string(&pattern).unwrap();
        let deserialized: LightPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, deserialized);
    }
}
