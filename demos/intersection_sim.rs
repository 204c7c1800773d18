//! Scaled real-time intersection simulation.
//!
//! Drives the controller against the wall clock with dwell times scaled
//! down roughly 20x, so a full cycle plus an emergency pass fits in a
//! few seconds of terminal time.
//!
//! Key concepts:
//! - Wall-clock driver (polled loop)
//! - Raw pin levels translated into input samples
//! - Safety monitor attached to a live controller
//!
//! Run with: RUST_LOG=info cargo run --example intersection_sim

use crosslight::controller::Controller;
use crosslight::core::{InputSample, TimingPlan};
use crosslight::driver::pins::PinLevels;
use crosslight::driver::{SignalDriver, WallClock};
use crosslight::safety::SafetyMonitor;
use std::time::Duration;

fn main() {
    env_logger::init();

    println!("=== Crosslight Intersection Simulation ===\n");

    let plan = TimingPlan::builder()
        .init_settle(Duration::from_millis(50))
        .ns_green(Duration::from_millis(500))
        .ew_green(Duration::from_millis(300))
        .yellow(Duration::from_millis(100))
        .emergency_settle(Duration::from_millis(25))
        .build()
        .expect("scaled plan is valid");

    let controller = Controller::new(plan).with_monitor(SafetyMonitor::new(plan));
    let mut driver = SignalDriver::new(controller, WallClock::new());

    println!("Scenario:");
    println!("  0.0s  power-on, quiet intersection");
    println!("  0.7s  vehicles arrive on East-West");
    println!("  1.4s  emergency vehicle approaches");
    println!("  2.1s  emergency clears, traffic on both approaches\n");

    let started = std::time::Instant::now();
    let mut last_phase = driver.controller().current_phase();

    while started.elapsed() < Duration::from_millis(2_800) {
        let at = started.elapsed();

        let mut levels = PinLevels::idle();
        if at >= Duration::from_millis(700) && at < Duration::from_millis(1_400) {
            levels.ew_sensors[0] = true;
        }
        if at >= Duration::from_millis(1_400) && at < Duration::from_millis(2_100) {
            levels.emergency_n = false;
        }
        if at >= Duration::from_millis(2_100) {
            levels.ns_sensors[1] = true;
            levels.ew_sensors[0] = true;
        }

        let lights = driver.step(InputSample::from(levels));

        let phase = driver.controller().current_phase();
        if phase != last_phase {
            println!("{:>6}ms  {:<20} {}", at.as_millis(), phase.name(), lights);
            last_phase = phase;
        }

        std::thread::sleep(Duration::from_millis(10));
    }

    println!("\nPhases visited:");
    for phase in driver.controller().history().path() {
        println!("  {}", phase.name());
    }

    println!("\n=== Simulation Complete ===");
}
