//! Per-tick audit of the safety contract.
//!
//! The monitor plays the role of an independent conflict monitor unit:
//! every emitted pattern is checked against the mutual-exclusion
//! contract, and every committed change against its minimum dwell. All
//! violations found in one tick are accumulated rather than stopping at
//! the first, so a failing audit reports the complete picture.

use crate::core::history::{ChangeCause, PhaseChange};
use crate::core::lights::LightPattern;
use crate::core::phase::Phase;
use crate::core::timing::TimingPlan;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

use super::violations::{SafetyViolation, ViolationPolicy};

/// Snapshot of one tick's outcome, handed to each audit.
#[derive(Clone, Debug)]
pub struct TickContext {
    /// Phase after the tick's commit step.
    pub phase: Phase,
    /// Pattern the output stage produced for that phase.
    pub pattern: LightPattern,
    /// Time spent in `phase` so far.
    pub held: Duration,
    /// The most recent committed change, if any.
    pub last_change: Option<PhaseChange>,
}

/// Type alias for audit check functions.
pub type SafetyCheck =
    Box<dyn Fn(&TickContext) -> Validation<(), NonEmptyVec<SafetyViolation>> + Send + Sync>;

/// Audits tick outcomes against the safety contract.
///
/// # Example
///
/// ```rust
/// use crosslight::core::{Phase, TimingPlan};
/// use crosslight::safety::{SafetyMonitor, TickContext};
/// use std::time::Duration;
/// use stillwater::validation::Validation;
///
/// let monitor = SafetyMonitor::new(TimingPlan::default());
/// let context = TickContext {
///     phase: Phase::NsGreen,
///     pattern: Phase::NsGreen.lights(),
///     held: Duration::from_secs(1),
///     last_change: None,
/// };
///
/// assert!(matches!(monitor.audit(&context), Validation::Success(_)));
/// ```
pub struct SafetyMonitor {
    plan: TimingPlan,
    checks: Vec<SafetyCheck>,
    policy: ViolationPolicy,
}

impl SafetyMonitor {
    /// Create a monitor for `plan` with the fail-dark policy.
    pub fn new(plan: TimingPlan) -> Self {
        Self {
            plan,
            checks: Vec::new(),
            policy: ViolationPolicy::FailDark,
        }
    }

    /// Set the violation handling policy.
    pub fn with_policy(mut self, policy: ViolationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a custom audit check.
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&TickContext) -> Validation<(), NonEmptyVec<SafetyViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check with an error message.
    pub fn require_pred<F>(mut self, predicate: F, message: String) -> Self
    where
        F: Fn(&TickContext) -> bool + Send + Sync + 'static,
    {
        let check = move |context: &TickContext| {
            if predicate(context) {
                Validation::success(())
            } else {
                Validation::fail(SafetyViolation::CheckFailed {
                    message: message.clone(),
                })
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    pub fn policy(&self) -> ViolationPolicy {
        self.policy
    }

    /// Audit one tick, accumulating ALL violations.
    ///
    /// Returns `Validation::Success(())` when every check passes and
    /// `Validation::Failure` carrying every violation otherwise.
    pub fn audit(&self, context: &TickContext) -> Validation<(), NonEmptyVec<SafetyViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<SafetyViolation>>> = Vec::new();

        // Mutual exclusion over the emitted pattern.
        checks.push(if context.pattern.ns_green && context.pattern.ew_green {
            Validation::fail(SafetyViolation::ConflictingGreens {
                pattern: context.pattern,
            })
        } else {
            Validation::success(())
        });
        checks.push(if context.pattern.ns_yellow && context.pattern.ew_yellow {
            Validation::fail(SafetyViolation::ConflictingYellows {
                pattern: context.pattern,
            })
        } else {
            Validation::success(())
        });

        // Init must be dark.
        checks.push(
            if context.phase == Phase::Init && context.pattern != LightPattern::OFF {
                Validation::fail(SafetyViolation::DarkPhaseLit {
                    phase: context.phase,
                    pattern: context.pattern,
                })
            } else {
                Validation::success(())
            },
        );

        // Dwell accounting on the most recent commit.
        if let Some(change) = context.last_change {
            let required = self.plan.dwell(change.from);
            checks.push(if dwell_was_cut(&change, required) {
                Validation::fail(SafetyViolation::DwellCutShort {
                    phase: change.from,
                    held: change.held,
                    required,
                })
            } else {
                Validation::success(())
            });
        }

        for check in &self.checks {
            checks.push(check(context));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// A short hold is a violation unless the cutting branch is entitled to
/// preempt. Reset preempts every dwell; emergency may preempt a green,
/// the init settle, or the same-direction NS yellow, but never an
/// East-West clearance already in progress nor the emergency settle.
fn dwell_was_cut(change: &PhaseChange, required: Duration) -> bool {
    if change.held >= required {
        return false;
    }
    match change.cause {
        ChangeCause::Reset => false,
        ChangeCause::Emergency => {
            matches!(change.from, Phase::EwYellow | Phase::EmergencyTransition)
        }
        ChangeCause::Cycle => true,
    }
}
