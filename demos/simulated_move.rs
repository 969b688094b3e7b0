//! Simulated move demo.
//!
//! Runs the reference move (32000 microsteps, 8000 steps/s cruise,
//! 3000 steps/s² acceleration, 1 MHz tick clock) against a manual clock and
//! a counting emitter, printing the phase transitions and a few interval
//! samples along the way.

use std::cell::Cell;

use stepper_ramp::{func_emitter, Clock, ManualClock, MotionPlan, Phase, StepEvent, StepScheduler};

fn main() {
    let plan = MotionPlan::new(32_000, 8_000.0, 3_000.0, 0.0, 1_000_000)
        .expect("valid plan");

    println!(
        "first interval: {:.1} ticks, cruise interval: {:.1} ticks",
        plan.first_interval_ticks(),
        plan.target_interval_ticks()
    );

    let clock = ManualClock::new(0);
    let pulses = Cell::new(0u64);
    let mut scheduler = StepScheduler::new(
        plan,
        func_emitter(|| pulses.set(pulses.get() + 1)),
        &clock,
    );

    let mut last_phase = Phase::Accelerating;
    while !scheduler.is_complete() {
        clock.advance(25);
        if let StepEvent::Stepped { remaining, phase } = scheduler.poll().unwrap() {
            if phase != last_phase {
                println!(
                    "t = {:>9} µs  phase {:?} -> {:?}  remaining {}  interval {} µs",
                    clock.now_micros(),
                    last_phase,
                    phase,
                    remaining,
                    scheduler.generator().current_interval_micros()
                );
                last_phase = phase;
            }
        }
    }

    println!(
        "done: {} pulses in {:.3} s of simulated time",
        pulses.get(),
        clock.now_micros() as f64 / 1e6
    );
}
