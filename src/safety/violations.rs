//! Safety violations and the policy for handling them.

use crate::core::lights::LightPattern;
use crate::core::phase::Phase;
use std::time::Duration;
use thiserror::Error;

/// Breaches of the intersection safety contract.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SafetyViolation {
    #[error("conflicting greens lit: {pattern}")]
    ConflictingGreens { pattern: LightPattern },

    #[error("conflicting yellows lit: {pattern}")]
    ConflictingYellows { pattern: LightPattern },

    #[error("lamps lit in {phase:?}, which must be dark: {pattern}")]
    DarkPhaseLit {
        phase: Phase,
        pattern: LightPattern,
    },

    #[error("{phase:?} left after {held:?}, before its {required:?} dwell")]
    DwellCutShort {
        phase: Phase,
        held: Duration,
        required: Duration,
    },

    #[error("safety check failed: {message}")]
    CheckFailed { message: String },
}

/// What the controller does with the tick's output when an audit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Force the fail-safe all-off pattern for the offending tick.
    FailDark,

    /// Keep the computed pattern but log the violations.
    LogAndContinue,
}
