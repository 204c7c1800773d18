//! Dwell-time configuration.
//!
//! Every phase has a minimum dwell before the transition function may
//! leave it. The reference timings below match the deployed controller
//! hardware; a `TimingPlan` is built once and never mutated afterwards.

use super::inputs::Approach;
use super::phase::Phase;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Reference North-South green dwell.
pub const NS_GREEN_DWELL: Duration = Duration::from_secs(10);
/// Reference East-West green dwell.
pub const EW_GREEN_DWELL: Duration = Duration::from_secs(6);
/// Reference yellow clearance, shared by both approaches.
pub const YELLOW_DWELL: Duration = Duration::from_secs(2);
/// Reference settle before granting the emergency green.
pub const EMERGENCY_SETTLE: Duration = Duration::from_millis(500);
/// Reference power-on settle.
pub const INIT_SETTLE: Duration = Duration::from_millis(100);

/// Errors rejected by the timing plan builder.
#[derive(Debug, Error)]
pub enum TimingError {
    #[error("yellow clearance must be non-zero")]
    ZeroYellow,

    #[error("{approach} green dwell must be non-zero")]
    ZeroGreen { approach: Approach },
}

/// Minimum dwell time for each phase.
///
/// The yellow clearance is shared by both approaches on purpose: a
/// clearance must not vary with traffic conditions. The green dwells are
/// asymmetric, favouring North-South.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Phase, TimingPlan};
/// use std::time::Duration;
///
/// let plan = TimingPlan::default();
/// assert_eq!(plan.dwell(Phase::NsGreen), Duration::from_secs(10));
/// assert_eq!(plan.dwell(Phase::NsYellow), plan.dwell(Phase::EwYellow));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimingPlan {
    pub init_settle: Duration,
    pub ns_green: Duration,
    pub ew_green: Duration,
    pub yellow: Duration,
    pub emergency_settle: Duration,
}

impl Default for TimingPlan {
    fn default() -> Self {
        Self {
            init_settle: INIT_SETTLE,
            ns_green: NS_GREEN_DWELL,
            ew_green: EW_GREEN_DWELL,
            yellow: YELLOW_DWELL,
            emergency_settle: EMERGENCY_SETTLE,
        }
    }
}

impl TimingPlan {
    /// Start a builder seeded with the reference timings.
    pub fn builder() -> TimingPlanBuilder {
        TimingPlanBuilder::new()
    }

    /// Minimum dwell before `phase` may be left.
    ///
    /// `EmergencyGreen` has no dwell: it is exited the moment the
    /// emergency signal clears.
    pub fn dwell(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Init => self.init_settle,
            Phase::NsGreen => self.ns_green,
            Phase::EwGreen => self.ew_green,
            Phase::NsYellow | Phase::EwYellow => self.yellow,
            Phase::EmergencyTransition => self.emergency_settle,
            Phase::EmergencyGreen => Duration::ZERO,
        }
    }
}

/// Fluent builder for a validated `TimingPlan`.
///
/// # Example
///
/// ```rust
/// use crosslight::core::TimingPlan;
/// use std::time::Duration;
///
/// let plan = TimingPlan::builder()
///     .ns_green(Duration::from_secs(8))
///     .yellow(Duration::from_secs(3))
///     .build()
///     .unwrap();
///
/// assert_eq!(plan.ns_green, Duration::from_secs(8));
/// ```
pub struct TimingPlanBuilder {
    plan: TimingPlan,
}

impl TimingPlanBuilder {
    pub fn new() -> Self {
        Self {
            plan: TimingPlan::default(),
        }
    }

    pub fn init_settle(mut self, dwell: Duration) -> Self {
        self.plan.init_settle = dwell;
        self
    }

    pub fn ns_green(mut self, dwell: Duration) -> Self {
        self.plan.ns_green = dwell;
        self
    }

    pub fn ew_green(mut self, dwell: Duration) -> Self {
        self.plan.ew_green = dwell;
        self
    }

    pub fn yellow(mut self, dwell: Duration) -> Self {
        self.plan.yellow = dwell;
        self
    }

    pub fn emergency_settle(mut self, dwell: Duration) -> Self {
        self.plan.emergency_settle = dwell;
        self
    }

    /// Validate and build the plan.
    pub fn build(self) -> Result<TimingPlan, TimingError> {
        if self.plan.yellow.is_zero() {
            return Err(TimingError::ZeroYellow);
        }
        if self.plan.ns_green.is_zero() {
            return Err(TimingError::ZeroGreen {
                approach: Approach::NorthSouth,
            });
        }
        if self.plan.ew_green.is_zero() {
            return Err(TimingError::ZeroGreen {
                approach: Approach::EastWest,
            });
        }
        Ok(self.plan)
    }
}

impl Default for TimingPlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_matches_reference_timings() {
        let plan = TimingPlan::default();
        assert_eq!(plan.ns_green, Duration::from_secs(10));
        assert_eq!(plan.ew_green, Duration::from_secs(6));
        assert_eq!(plan.yellow, Duration::from_secs(2));
        assert_eq!(plan.emergency_settle, Duration::from_millis(500));
        assert_eq!(plan.init_settle, Duration::from_millis(100));
    }

    #[test]
    fn yellow_dwell_is_shared_by_both_approaches() {
        let plan = TimingPlan::default();
        assert_eq!(plan.dwell(Phase::NsYellow), plan.dwell(Phase::EwYellow));
    }

    #[test]
    fn emergency_green_has_no_dwell() {
        let plan = TimingPlan::default();
        assert_eq!(plan.dwell(Phase::EmergencyGreen), Duration::ZERO);
    }

    #[test]
    fn builder_overrides_individual_dwells() {
        let plan = TimingPlan::builder()
            .ew_green(Duration::from_secs(4))
            .emergency_settle(Duration::from_millis(250))
            .build()
            .unwrap();

        assert_eq!(plan.ew_green, Duration::from_secs(4));
        assert_eq!(plan.emergency_settle, Duration::from_millis(250));
        // Untouched fields keep the reference values.
        assert_eq!(plan.ns_green, NS_GREEN_DWELL);
    }

    #[test]
    fn builder_rejects_zero_yellow() {
        let result = TimingPlan::builder().yellow(Duration::ZERO).build();
        assert!(matches!(result, Err(TimingError::ZeroYellow)));
    }

    #[test]
    fn builder_rejects_zero_greens() {
        let result = TimingPlan::builder().ns_green(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(TimingError::ZeroGreen {
                approach: Approach::NorthSouth
            })
        ));

        let result = TimingPlan::builder().ew_green(Duration::ZERO).build();
        assert!(matches!(
            result,
            Err(TimingError::ZeroGreen {
                approach: Approach::EastWest
            })
        ));
    }

    #[test]
    fn plan_serializes_correctly() {
        let plan = TimingPlan::default();
        let json = serde_json::to_string(&plan).unwrap();
        let deserialized: TimingPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, deserialized);
    }
}
