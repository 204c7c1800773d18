//! The imperative shell: owns the phase, the phase clock, and commits.
//!
//! `Controller` is the only mutable piece of the crate. It holds exactly
//! (current phase, phase clock) plus the change history, and advances one
//! synchronous step per `tick` call. There is no reentrancy: sampling
//! happens-before the decision, the commit happens-before the output
//! recomputation, all within one call.

use crate::core::history::{ChangeCause, PhaseChange, PhaseHistory};
use crate::core::inputs::InputSample;
use crate::core::lights::LightPattern;
use crate::core::phase::Phase;
use crate::core::timing::TimingPlan;
use crate::core::transition::decide;
use crate::safety::{SafetyMonitor, TickContext, ViolationPolicy};
use log::{debug, error, info, warn};
use std::time::Duration;
use stillwater::validation::Validation;

/// Tracks when the current phase was entered on the controller timeline.
#[derive(Clone, Copy, Debug, Default)]
struct PhaseClock {
    started_at: Duration,
}

impl PhaseClock {
    /// Elapsed time in the current phase. Saturating, so the result is
    /// never negative even if a driver hands in a stale `now`.
    fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Record entry into a new phase.
    fn restart(&mut self, now: Duration) {
        self.started_at = now;
    }
}

/// The intersection controller.
///
/// # Example
///
/// ```rust
/// use crosslight::controller::Controller;
/// use crosslight::core::{InputSample, Phase, TimingPlan};
/// use std::time::Duration;
///
/// let mut controller = Controller::new(TimingPlan::default());
///
/// // Hold through the power-on settle; the cycle opens on the NS green.
/// let lights = controller.tick(InputSample::quiet(), Duration::from_millis(100));
/// assert_eq!(controller.current_phase(), Phase::NsGreen);
/// assert!(lights.ns_green);
/// ```
pub struct Controller {
    plan: TimingPlan,
    phase: Phase,
    clock: PhaseClock,
    history: PhaseHistory,
    monitor: Option<SafetyMonitor>,
}

impl Controller {
    /// Create a controller in `Init` with its clock at zero.
    pub fn new(plan: TimingPlan) -> Self {
        Self {
            plan,
            phase: Phase::Init,
            clock: PhaseClock::default(),
            history: PhaseHistory::new(),
            monitor: None,
        }
    }

    /// Attach a safety monitor audited after every tick.
    pub fn with_monitor(mut self, monitor: SafetyMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Current phase. Read-only; never mutates.
    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    /// The timing plan this controller runs on.
    pub fn plan(&self) -> &TimingPlan {
        &self.plan
    }

    /// All committed phase changes so far.
    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Time spent in the current phase as of `now`.
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.clock.elapsed(now)
    }

    /// Force `Init` and restart the phase clock, independent of `tick`.
    pub fn reset(&mut self, now: Duration) {
        self.force_reset(now);
    }

    /// Advance the machine by exactly one step and return the resulting
    /// lamp pattern.
    ///
    /// Priority within the tick: a reset request bypasses the transition
    /// function entirely; otherwise the decision runs with the emergency
    /// branch taking precedence over the normal cycle. The phase clock is
    /// restarted exactly when the phase changes.
    pub fn tick(&mut self, inputs: InputSample, now: Duration) -> LightPattern {
        if inputs.reset {
            self.force_reset(now);
        } else {
            let elapsed = self.clock.elapsed(now);
            let next = decide(self.phase, elapsed, inputs, &self.plan);
            if next != self.phase {
                let cause = if inputs.emergency {
                    ChangeCause::Emergency
                } else {
                    ChangeCause::Cycle
                };
                self.commit(next, now, cause);
            }
        }

        let pattern = self.phase.lights();
        self.audit(pattern, now)
    }

    fn force_reset(&mut self, now: Duration) {
        if self.phase != Phase::Init {
            self.commit(Phase::Init, now, ChangeCause::Reset);
        } else {
            // Reset while already in Init still re-arms the settle timer.
            debug!("reset with phase already Init; clock restarted");
            self.clock.restart(now);
        }
    }

    /// Commit a phase change: record it, switch phase, restart the clock.
    /// Callers guarantee `next != self.phase`.
    fn commit(&mut self, next: Phase, now: Duration, cause: ChangeCause) {
        let held = self.clock.elapsed(now);
        info!(
            "{} -> {} after {}ms ({:?})",
            self.phase.name(),
            next.name(),
            held.as_millis(),
            cause
        );
        self.history = self.history.record(PhaseChange {
            from: self.phase,
            to: next,
            at: now,
            held,
            cause,
        });
        self.phase = next;
        self.clock.restart(now);
    }

    fn audit(&self, pattern: LightPattern, now: Duration) -> LightPattern {
        let Some(monitor) = &self.monitor else {
            return pattern;
        };

        let context = TickContext {
            phase: self.phase,
            pattern,
            held: self.clock.elapsed(now),
            last_change: self.history.changes().last().copied(),
        };

        match monitor.audit(&context) {
            Validation::Success(_) => pattern,
            Validation::Failure(violations) => match monitor.policy() {
                ViolationPolicy::FailDark => {
                    error!(
                        "safety audit failed with {} violation(s) in {}; forcing all lamps dark",
                        violations.len(),
                        self.phase.name()
                    );
                    LightPattern::OFF
                }
                ViolationPolicy::LogAndContinue => {
                    warn!(
                        "safety audit failed with {} violation(s) in {}",
                        violations.len(),
                        self.phase.name()
                    );
                    pattern
                }
            },
        }
    }
}
