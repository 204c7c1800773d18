//! Per-tick input facts consumed by the transition function.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One traffic direction group sharing a green/yellow phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Approach {
    NorthSouth,
    EastWest,
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NorthSouth => write!(f, "North-South"),
            Self::EastWest => write!(f, "East-West"),
        }
    }
}

/// The four debounced facts sampled fresh on every tick.
///
/// Each demand flag may be the OR of several physical sensors on its
/// approach (see `driver::pins`). No ordering relationship between the
/// four is assumed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct InputSample {
    /// Operator reset request. Preempts everything else within the tick.
    pub reset: bool,
    /// Emergency-vehicle signal. Preempts the normal cycle.
    pub emergency: bool,
    /// At least one vehicle waiting on the North-South approach.
    pub ns_demand: bool,
    /// At least one vehicle waiting on the East-West approach.
    pub ew_demand: bool,
}

impl InputSample {
    /// No requests, no vehicles waiting.
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Demand flag for one approach.
    pub fn demand(&self, approach: Approach) -> bool {
        match approach {
            Approach::NorthSouth => self.ns_demand,
            Approach::EastWest => self.ew_demand,
        }
    }
}
