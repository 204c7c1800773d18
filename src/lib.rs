//! Crosslight: a deterministic traffic-signal controller.
//!
//! Crosslight arbitrates right-of-way at a single four-way intersection
//! between the North-South and East-West approaches, with vehicle-demand
//! gating, an operator reset, and unconditional emergency-vehicle
//! priority. It is built on the "pure core, imperative shell" philosophy:
//! the transition function and output mapping are pure functions over a
//! closed phase enumeration, while mutation is confined to the
//! `Controller`, which owns exactly the current phase and its clock.
//!
//! # Core Concepts
//!
//! - **Phase**: the closed enumeration of signal states; exactly one is
//!   active at a time
//! - **Transition function**: `decide(phase, elapsed, inputs, plan)`, a
//!   total, timer-gated, demand-gated, priority-arbitrated decision
//! - **Output mapping**: `Phase::lights()`, with the guarantee that no
//!   reachable pattern ever lights conflicting lamps
//! - **Safety monitor**: an independent per-tick audit that accumulates
//!   every contract violation it finds
//!
//! # Example
//!
//! ```rust
//! use crosslight::controller::Controller;
//! use crosslight::core::{InputSample, Phase, TimingPlan};
//! use std::time::Duration;
//!
//! let mut controller = Controller::new(TimingPlan::default());
//!
//! // Power-on settle passes; the cycle opens on the NS green.
//! controller.tick(InputSample::quiet(), Duration::from_millis(100));
//! assert_eq!(controller.current_phase(), Phase::NsGreen);
//!
//! // An emergency claims the NS green immediately.
//! let emergency = InputSample { emergency: true, ..InputSample::quiet() };
//! let lights = controller.tick(emergency, Duration::from_millis(500));
//! assert_eq!(controller.current_phase(), Phase::EmergencyGreen);
//! assert!(lights.ns_green);
//! ```

pub mod controller;
pub mod core;
pub mod driver;
pub mod report;
pub mod safety;

// Re-export commonly used types
pub use crate::controller::Controller;
pub use crate::core::{Approach, InputSample, LightPattern, Phase, TimingPlan};
pub use crate::safety::{SafetyMonitor, SafetyViolation, ViolationPolicy};
