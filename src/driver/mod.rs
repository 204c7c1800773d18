//! Tick drivers: the two legal ways to advance the controller clock.
//!
//! The core consumes an abstract monotonic timeline (`Duration` since an
//! arbitrary epoch) and is agnostic to how that timeline advances. Two
//! drivers are provided: a wall-clock poll and a discrete pulse counter.
//! Given identical per-tick samples and timeline positions, both produce
//! identical phase sequences.

pub mod pins;

use crate::controller::Controller;
use crate::core::inputs::InputSample;
use crate::core::lights::LightPattern;
use std::time::{Duration, Instant};

/// Source of the controller's monotonic timeline.
pub trait Clock {
    /// Current position on the timeline. Must be non-decreasing.
    fn now(&mut self) -> Duration;
}

/// Wall-clock timeline: one tick per poll, durations in elapsed time.
pub struct WallClock {
    epoch: Instant,
}

impl WallClock {
    /// Start the timeline at the moment of construction.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&mut self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Discrete-edge timeline: one tick per clock pulse, durations counted
/// in pulses of a fixed period.
pub struct PulseClock {
    period: Duration,
    pulses: u64,
}

impl PulseClock {
    pub fn new(period: Duration) -> Self {
        Self { period, pulses: 0 }
    }

    /// Advance by one pulse edge.
    pub fn pulse(&mut self) {
        self.pulses += 1;
    }

    /// Pulses seen since construction.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }
}

impl Clock for PulseClock {
    fn now(&mut self) -> Duration {
        Duration::from_nanos(self.pulses.saturating_mul(self.period.as_nanos() as u64))
    }
}

/// A controller bound to a clock: the polled main loop of the reference
/// firmware, expressed as a reusable driver.
///
/// # Example
///
/// ```rust
/// use crosslight::controller::Controller;
/// use crosslight::core::{InputSample, Phase, TimingPlan};
/// use crosslight::driver::{PulseClock, SignalDriver};
/// use std::time::Duration;
///
/// let controller = Controller::new(TimingPlan::default());
/// let clock = PulseClock::new(Duration::from_millis(50));
/// let mut driver = SignalDriver::new(controller, clock);
///
/// // Two pulses cover the 100ms power-on settle.
/// driver.pulse_step(InputSample::quiet());
/// driver.pulse_step(InputSample::quiet());
/// assert_eq!(driver.controller().current_phase(), Phase::NsGreen);
/// ```
pub struct SignalDriver<C: Clock> {
    controller: Controller,
    clock: C,
}

impl<C: Clock> SignalDriver<C> {
    pub fn new(controller: Controller, clock: C) -> Self {
        Self { controller, clock }
    }

    /// One loop iteration: read the clock, then tick the controller.
    pub fn step(&mut self, inputs: InputSample) -> LightPattern {
        let now = self.clock.now();
        self.controller.tick(inputs, now)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl SignalDriver<PulseClock> {
    /// Advance one pulse edge and run the tick it clocks in.
    pub fn pulse_step(&mut self, inputs: InputSample) -> LightPattern {
        self.clock.pulse();
        self.step(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::phase::Phase;
    use crate::core::timing::TimingPlan;

    #[test]
    fn pulse_clock_counts_in_fixed_periods() {
        let mut clock = PulseClock::new(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::ZERO);

        clock.pulse();
        clock.pulse();
        clock.pulse();
        assert_eq!(clock.now(), Duration::from_millis(30));
        assert_eq!(clock.pulses(), 3);
    }

    #[test]
    fn wall_clock_is_non_decreasing() {
        let mut clock = WallClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn pulse_driver_walks_the_cycle() {
        let controller = Controller::new(TimingPlan::default());
        let mut driver = SignalDriver::new(controller, PulseClock::new(Duration::from_millis(100)));

        // First pulse lands exactly on the init settle boundary.
        let lights = driver.pulse_step(InputSample::quiet());
        assert_eq!(driver.controller().current_phase(), Phase::NsGreen);
        assert!(lights.ns_green);
    }

    #[test]
    fn driver_exposes_reset_through_the_controller() {
        let controller = Controller::new(TimingPlan::default());
        let mut driver = SignalDriver::new(controller, PulseClock::new(Duration::from_millis(100)));

        driver.pulse_step(InputSample::quiet());
        assert_eq!(driver.controller().current_phase(), Phase::NsGreen);

        let now = driver.clock_mut().now();
        driver.controller_mut().reset(now);
        assert_eq!(driver.controller().current_phase(), Phase::Init);
    }
}
