//! Property-based tests for the ramp recurrence.

use proptest::prelude::*;

use stepper_ramp::{MotionPlan, Phase, RampGenerator, StepEvent, StopBehavior};

/// Jump the clock to each due instant until the move completes; returns the
/// number of emitted steps.
fn count_pulses(mut ramp: RampGenerator) -> u64 {
    let mut now = 0u64;
    let mut pulses = 0u64;
    while !ramp.is_complete() {
        if let StepEvent::Stepped { .. } = ramp.poll(now) {
            pulses += 1;
        }
        now = now.wrapping_add(ramp.current_interval_micros().max(1));
    }
    pulses
}

proptest! {
    // Every valid plan emits exactly its configured distance, with either
    // stop behavior.
    #[test]
    fn total_pulses_match_distance(
        distance in 1u32..20_000,
        target_speed in 100.0f32..20_000.0,
        acceleration in 100.0f32..50_000.0,
        base_speed in 0.0f32..5_000.0,
        ramp_down in any::<bool>(),
    ) {
        let stop = if ramp_down { StopBehavior::RampDown } else { StopBehavior::HardStop };
        let plan = MotionPlan::new(distance, target_speed, acceleration, base_speed, 1_000_000)
            .unwrap()
            .with_stop_behavior(stop);
        prop_assert_eq!(count_pulses(plan.start()), distance as u64);
    }

    // While accelerating the interval strictly decreases; once cruising it
    // is pinned to the target interval.
    #[test]
    fn acceleration_intervals_strictly_decrease(
        distance in 100u32..20_000,
        target_speed in 500.0f32..10_000.0,
        acceleration in 1_000.0f32..50_000.0,
    ) {
        let plan = MotionPlan::new(distance, target_speed, acceleration, 0.0, 1_000_000).unwrap();
        let target_interval = plan.target_interval_ticks();
        let mut ramp = plan.start();

        let mut now = 0u64;
        let mut previous = f32::INFINITY;
        while !ramp.is_complete() {
            if let StepEvent::Stepped { phase, .. } = ramp.poll(now) {
                match phase {
                    Phase::Accelerating => {
                        prop_assert!(ramp.current_interval_ticks() < previous);
                        previous = ramp.current_interval_ticks();
                    }
                    Phase::Cruising => {
                        prop_assert_eq!(ramp.current_interval_ticks(), target_interval);
                    }
                    _ => {}
                }
            }
            now = now.wrapping_add(ramp.current_interval_micros().max(1));
        }
    }

    // The remaining count reported by step events never increases and ends
    // at zero.
    #[test]
    fn remaining_is_monotone(
        distance in 1u32..5_000,
        target_speed in 100.0f32..10_000.0,
        acceleration in 100.0f32..20_000.0,
    ) {
        let plan = MotionPlan::new(distance, target_speed, acceleration, 0.0, 1_000_000).unwrap();
        let mut ramp = plan.start();

        let mut now = 0u64;
        let mut last_remaining = distance;
        while !ramp.is_complete() {
            if let StepEvent::Stepped { remaining, .. } = ramp.poll(now) {
                prop_assert!(remaining < last_remaining);
                last_remaining = remaining;
            }
            now = now.wrapping_add(ramp.current_interval_micros().max(1));
        }
        prop_assert_eq!(last_remaining, 0);
    }
}
