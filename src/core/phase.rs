//! Signal phases of the intersection.
//!
//! `Phase` is the single piece of persistent identity in the controller.
//! Exactly one phase is active at a time; inputs and lamp patterns are
//! transient values recomputed on every tick.

use serde::{Deserialize, Serialize};

/// The seven phases of the intersection cycle.
///
/// The enumeration is closed, so there is no "unknown" phase to guard
/// against at runtime; the fail-safe contract lives in the two total
/// functions over this type (`decide` and `lights`), both of which are
/// exhaustive `match` expressions checked by the compiler.
///
/// # Example
///
/// ```rust
/// use crosslight::core::Phase;
///
/// let phase = Phase::NsGreen;
/// assert_eq!(phase.name(), "NsGreen");
/// assert!(!phase.is_emergency());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Power-on settle state. All lamps dark.
    Init,
    /// North-South approach holds right of way.
    NsGreen,
    /// North-South clearing to red.
    NsYellow,
    /// East-West approach holds right of way.
    EwGreen,
    /// East-West clearing to red.
    EwYellow,
    /// Short settle between an East-West clearance and the emergency green.
    EmergencyTransition,
    /// Emergency vehicle holds the North-South green.
    EmergencyGreen,
}

impl Phase {
    /// Every phase, in cycle order. Useful for exhaustive checks.
    pub const ALL: [Phase; 7] = [
        Phase::Init,
        Phase::NsGreen,
        Phase::NsYellow,
        Phase::EwGreen,
        Phase::EwYellow,
        Phase::EmergencyTransition,
        Phase::EmergencyGreen,
    ];

    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::NsGreen => "NsGreen",
            Self::NsYellow => "NsYellow",
            Self::EwGreen => "EwGreen",
            Self::EwYellow => "EwYellow",
            Self::EmergencyTransition => "EmergencyTransition",
            Self::EmergencyGreen => "EmergencyGreen",
        }
    }

    /// Check if this phase is only reachable through the emergency branch.
    pub fn is_emergency(&self) -> bool {
        matches!(self, Self::EmergencyTransition | Self::EmergencyGreen)
    }

    /// Check if this phase grants a green to some approach.
    pub fn is_green(&self) -> bool {
        matches!(self, Self::NsGreen | Self::EwGreen | Self::EmergencyGreen)
    }
}
