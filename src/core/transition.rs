//! The transition function: one pure decision per tick.
//!
//! `decide` maps (current phase, elapsed time, inputs) to the next phase.
//! It contains two mutually exclusive branches: emergency arbitration and
//! the demand-gated normal cycle. Reset is deliberately absent here; the
//! controller forces `Init` before this function is consulted, so a reset
//! request never reaches a decision.

use super::inputs::InputSample;
use super::phase::Phase;
use super::timing::TimingPlan;
use std::time::Duration;

/// Decide the phase for the next tick.
///
/// Deterministic, side-effect free, and total: every combination of
/// phase, elapsed time, and inputs produces a phase. The emergency branch
/// wins over the normal cycle and ignores vehicle demand entirely.
///
/// `inputs.reset` is ignored; the caller preempts this function when a
/// reset is requested.
pub fn decide(phase: Phase, elapsed: Duration, inputs: InputSample, plan: &TimingPlan) -> Phase {
    if inputs.emergency {
        emergency_branch(phase, elapsed, plan)
    } else {
        normal_branch(phase, elapsed, inputs, plan)
    }
}

/// Emergency arbitration: reach `EmergencyGreen` without skipping a
/// clearance the cross traffic is owed.
fn emergency_branch(phase: Phase, elapsed: Duration, plan: &TimingPlan) -> Phase {
    match phase {
        // North-South already holds the safe direction.
        Phase::NsGreen | Phase::EmergencyGreen => Phase::EmergencyGreen,
        // North-South was clearing towards red, but NS green is the
        // target anyway; no additional clearance is owed.
        Phase::NsYellow => Phase::EmergencyGreen,
        // Cross traffic is moving: force a full yellow first.
        Phase::EwGreen => Phase::EwYellow,
        // The clearance already in progress runs to completion.
        Phase::EwYellow => {
            if elapsed >= plan.yellow {
                Phase::EmergencyTransition
            } else {
                Phase::EwYellow
            }
        }
        Phase::EmergencyTransition => {
            if elapsed >= plan.emergency_settle {
                Phase::EmergencyGreen
            } else {
                Phase::EmergencyTransition
            }
        }
        // Startup: nothing is moving yet, grant the emergency direction.
        Phase::Init => Phase::EmergencyGreen,
    }
}

/// The demand-gated normal cycle.
fn normal_branch(phase: Phase, elapsed: Duration, inputs: InputSample, plan: &TimingPlan) -> Phase {
    match phase {
        Phase::Init => {
            if elapsed >= plan.init_settle {
                Phase::NsGreen
            } else {
                Phase::Init
            }
        }
        // A green yields only once its dwell has passed AND the opposing
        // approach has demand; with no opposing demand it holds.
        Phase::NsGreen => {
            if elapsed >= plan.ns_green && inputs.ew_demand {
                Phase::NsYellow
            } else {
                Phase::NsGreen
            }
        }
        Phase::NsYellow => {
            if elapsed >= plan.yellow {
                Phase::EwGreen
            } else {
                Phase::NsYellow
            }
        }
        Phase::EwGreen => {
            if elapsed >= plan.ew_green && inputs.ns_demand {
                Phase::EwYellow
            } else {
                Phase::EwGreen
            }
        }
        Phase::EwYellow => {
            if elapsed >= plan.yellow {
                Phase::NsGreen
            } else {
                Phase::EwYellow
            }
        }
        // Emergency cleared mid-settle: finish the settle, then resume on
        // the NS green.
        Phase::EmergencyTransition => {
            if elapsed >= plan.emergency_settle {
                Phase::NsGreen
            } else {
                Phase::EmergencyTransition
            }
        }
        // Emergency cleared: resume the cycle from the known-safe green
        // without running a second clearance.
        Phase::EmergencyGreen => Phase::NsGreen,
    }
}
