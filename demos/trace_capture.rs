//! Deterministic waveform capture.
//!
//! Replays a scripted input schedule on the pulse-counter driver and
//! dumps the resulting phase waveform as JSON lines, the format the test
//! harness diffs between runs.
//!
//! Run with: cargo run --example trace_capture

use crosslight::controller::Controller;
use crosslight::core::{InputSample, TimingPlan};
use crosslight::driver::{PulseClock, SignalDriver};
use crosslight::report::TraceRecorder;
use std::time::Duration;

fn main() {
    env_logger::init();

    println!("=== Crosslight Trace Capture ===\n");

    let period = Duration::from_millis(100);
    let controller = Controller::new(TimingPlan::default());
    let mut driver = SignalDriver::new(controller, PulseClock::new(period));
    let mut recorder = TraceRecorder::changes_only();

    // 250 pulses of 100ms: a quiet start, an East-West arrival, an
    // emergency pass, and an operator reset.
    for pulse in 0..250u64 {
        let inputs = match pulse {
            0..=119 => InputSample {
                ew_demand: pulse >= 90,
                ..InputSample::quiet()
            },
            120..=179 => InputSample {
                emergency: true,
                ..InputSample::quiet()
            },
            180 => InputSample {
                reset: true,
                ..InputSample::quiet()
            },
            _ => InputSample {
                ns_demand: true,
                ew_demand: true,
                ..InputSample::quiet()
            },
        };

        let lights = driver.pulse_step(inputs);

        let now = period * (pulse as u32 + 1);
        recorder.record(now, driver.controller().current_phase(), lights);
    }

    println!(
        "{} ticks observed, {} phase changes captured:\n",
        recorder.ticks(),
        recorder.rows().len()
    );
    print!("{}", recorder.to_json_lines().expect("rows serialize"));

    println!("\n=== Capture Complete ===");
}
