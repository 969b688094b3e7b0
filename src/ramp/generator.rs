//! Incremental ramp generation.
//!
//! [`RampGenerator`] owns the mutable ramp state for one move and produces
//! inter-step intervals with the incremental recurrence: after the analytic
//! first interval, every update is `p ← p · (1 + q)` with `q = m·p²`, where
//! `m` is `−R` while accelerating, `0` while cruising and `+R` while
//! ramping back down. No square root or division runs per step.

use super::plan::{MotionPlan, Precision, StopBehavior};

/// Current segment of the motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Speeding up from the base speed toward the cruise speed.
    Accelerating,
    /// Holding the cruise interval.
    Cruising,
    /// Ramping back down over the symmetric tail of the move.
    Decelerating,
    /// Move complete; no further pulses are emitted.
    Stopped,
}

/// Outcome of one poll of the ramp generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The current interval has not elapsed; nothing happened.
    None,
    /// Exactly one step is due.
    Stepped {
        /// Microsteps left after this step.
        remaining: u32,
        /// Phase after the recurrence advanced.
        phase: Phase,
    },
}

/// Ramp state and recurrence for a single move.
///
/// The generator is fed opaque monotonic microsecond timestamps through
/// [`poll`](RampGenerator::poll) and decides whether a step is due. At most
/// one step is reported per poll: a delayed poll emits a single step
/// immediately and resumes normal cadence from the new reference time,
/// never a catch-up burst.
#[derive(Debug, Clone)]
pub struct RampGenerator {
    plan: MotionPlan,

    /// Microsteps left to emit; monotonically decreasing to zero.
    remaining: u32,

    /// Current inter-step interval `p`, in clock ticks. Real-valued: the
    /// fractional part carries the accumulated recurrence state.
    interval_ticks: f32,

    /// Recurrence iteration counter; the analytic first interval is i = 1.
    iteration: u32,

    /// Steps spent accelerating, for the symmetric ramp-down threshold.
    accel_steps: u32,

    phase: Phase,

    /// Timestamp of the last emitted step; `None` until the first step.
    last_step_at: Option<u64>,
}

impl RampGenerator {
    /// Initialize ramp state from a plan.
    ///
    /// A zero-distance plan starts (and stays) in [`Phase::Stopped`]. A
    /// base speed at or above the target starts directly in
    /// [`Phase::Cruising`] at the clamped cruise interval.
    pub fn new(plan: MotionPlan) -> Self {
        let (phase, interval_ticks) = if plan.distance == 0 {
            (Phase::Stopped, plan.target_interval_ticks)
        } else if plan.first_interval_ticks <= plan.target_interval_ticks {
            // Already at or above the cruise speed.
            (Phase::Cruising, plan.target_interval_ticks)
        } else if plan.ramp_constant == 0.0 {
            // Constant-speed move below the target: hold the base interval.
            (Phase::Cruising, plan.first_interval_ticks)
        } else {
            (Phase::Accelerating, plan.first_interval_ticks)
        };

        Self {
            remaining: plan.distance,
            interval_ticks,
            iteration: 2,
            accel_steps: 0,
            phase,
            last_step_at: None,
            plan,
        }
    }

    /// Decide whether a step is due at `now_micros` and advance the state.
    ///
    /// The first poll after start emits immediately and establishes the
    /// reference timestamp. Elapsed time uses wrapping subtraction, so a
    /// timestamp wraparound between two nearby samples is tolerated.
    pub fn poll(&mut self, now_micros: u64) -> StepEvent {
        if self.phase == Phase::Stopped {
            return StepEvent::None;
        }

        if let Some(reference) = self.last_step_at {
            if now_micros.wrapping_sub(reference) < self.current_interval_micros() {
                return StepEvent::None;
            }
        }

        // The analytic first interval is the gap between the first and
        // second pulses; the recurrence only runs from the second step on.
        let first_step = self.last_step_at.is_none();
        self.last_step_at = Some(now_micros);
        self.remaining -= 1;

        if self.remaining == 0 {
            self.phase = Phase::Stopped;
        } else if !first_step {
            self.advance();
        }

        StepEvent::Stepped {
            remaining: self.remaining,
            phase: self.phase,
        }
    }

    /// Abort the move: remaining distance is reset to zero and the next
    /// poll reports nothing.
    pub fn abort(&mut self) {
        self.remaining = 0;
        self.phase = Phase::Stopped;
    }

    /// Microsteps left to emit.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recurrence iteration counter.
    #[inline]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Current inter-step interval in clock ticks (real-valued).
    #[inline]
    pub fn current_interval_ticks(&self) -> f32 {
        self.interval_ticks
    }

    /// Current inter-step interval in whole microseconds.
    #[inline]
    pub fn current_interval_micros(&self) -> u64 {
        (self.interval_ticks * self.plan.micros_per_tick) as u64
    }

    /// Whether the move has completed (or was aborted).
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Stopped
    }

    /// Move progress (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.plan.distance == 0 {
            1.0
        } else {
            1.0 - self.remaining as f32 / self.plan.distance as f32
        }
    }

    /// The plan this ramp was started from.
    #[inline]
    pub fn plan(&self) -> &MotionPlan {
        &self.plan
    }

    fn advance(&mut self) {
        match self.phase {
            Phase::Accelerating => {
                self.accel_steps += 1;
                if self.ramp_down_due() {
                    // Triangle profile: the cruise speed was never reached.
                    self.phase = Phase::Decelerating;
                    self.update_interval(1.0);
                } else {
                    self.update_interval(-1.0);
                    if self.interval_ticks <= self.plan.target_interval_ticks {
                        self.interval_ticks = self.plan.target_interval_ticks;
                        self.phase = Phase::Cruising;
                    }
                }
            }
            Phase::Cruising => {
                // m = 0: interval held constant, no recurrence update.
                if self.ramp_down_due() {
                    self.phase = Phase::Decelerating;
                    self.update_interval(1.0);
                }
            }
            Phase::Decelerating => {
                self.update_interval(1.0);
                // Never slower than the starting interval.
                if self.interval_ticks > self.plan.first_interval_ticks {
                    self.interval_ticks = self.plan.first_interval_ticks;
                }
            }
            Phase::Stopped => {}
        }
    }

    fn ramp_down_due(&self) -> bool {
        self.plan.stop == StopBehavior::RampDown && self.remaining <= self.accel_steps
    }

    /// One recurrence step: `q = sign·R·p²`, `p ← p · f(q)`.
    ///
    /// During acceleration `q ∈ (−0.5, 0)` because `p² ≤ f²/(v0² + 2a)`,
    /// so the first-order factor never goes negative.
    fn update_interval(&mut self, sign: f32) {
        let p = self.interval_ticks;
        let q = sign * self.plan.ramp_constant * p * p;
        let factor = match self.plan.precision {
            Precision::FirstOrder => 1.0 + q,
            Precision::SecondOrder => 1.0 + q + q * q,
            Precision::ThirdOrder => 1.0 + q + 1.5 * q * q,
        };
        self.interval_ticks = p * factor;
        self.iteration += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_plan() -> MotionPlan {
        MotionPlan::new(32_000, 8_000.0, 3_000.0, 0.0, 1_000_000).unwrap()
    }

    /// Drive the generator by jumping the clock to each due time.
    fn run_to_completion(ramp: &mut RampGenerator) -> u32 {
        let mut now = 0u64;
        let mut pulses = 0u32;
        // Worst case one event per iteration; generous bound.
        for _ in 0..200_000 {
            match ramp.poll(now) {
                StepEvent::Stepped { .. } => pulses += 1,
                StepEvent::None => {}
            }
            if ramp.is_complete() {
                break;
            }
            now = now.wrapping_add(ramp.current_interval_micros().max(1));
        }
        pulses
    }

    #[test]
    fn test_first_poll_steps_immediately() {
        let mut ramp = RampGenerator::new(reference_plan());
        assert!(matches!(ramp.poll(0), StepEvent::Stepped { .. }));
        // Interval has not elapsed yet.
        assert_eq!(ramp.poll(1), StepEvent::None);
    }

    #[test]
    fn test_intervals_strictly_decrease_while_accelerating() {
        let mut ramp = RampGenerator::new(reference_plan());
        let mut now = 0u64;
        let mut previous = f32::INFINITY;

        loop {
            if let StepEvent::Stepped { phase, .. } = ramp.poll(now) {
                match phase {
                    Phase::Accelerating => {
                        assert!(ramp.current_interval_ticks() < previous);
                        previous = ramp.current_interval_ticks();
                    }
                    Phase::Cruising => break,
                    _ => panic!("unexpected phase {:?}", phase),
                }
            }
            now += ramp.current_interval_micros().max(1);
        }
    }

    #[test]
    fn test_cruise_clamped_to_target_interval() {
        let mut ramp = RampGenerator::new(reference_plan());
        let mut now = 0u64;

        loop {
            if let StepEvent::Stepped { phase, .. } = ramp.poll(now) {
                if phase == Phase::Cruising {
                    assert_eq!(ramp.current_interval_ticks(), 125.0);
                    assert_eq!(ramp.current_interval_micros(), 125);
                    break;
                }
            }
            now += ramp.current_interval_micros().max(1);
        }
    }

    #[test]
    fn test_total_pulses_equal_distance() {
        let mut ramp = RampGenerator::new(reference_plan());
        assert_eq!(run_to_completion(&mut ramp), 32_000);
        assert_eq!(ramp.remaining(), 0);
        assert_eq!(ramp.phase(), Phase::Stopped);
    }

    #[test]
    fn test_ramp_down_total_pulses_and_final_phase() {
        let plan = reference_plan().with_stop_behavior(StopBehavior::RampDown);
        let mut ramp = RampGenerator::new(plan);
        assert_eq!(run_to_completion(&mut ramp), 32_000);
        assert_eq!(ramp.phase(), Phase::Stopped);
    }

    #[test]
    fn test_ramp_down_intervals_grow_in_tail() {
        let plan = MotionPlan::new(2_000, 8_000.0, 3_000.0, 0.0, 1_000_000)
            .unwrap()
            .with_stop_behavior(StopBehavior::RampDown);
        let mut ramp = RampGenerator::new(plan);
        let mut now = 0u64;
        let mut previous = 0.0f32;
        let mut saw_decel = false;

        while !ramp.is_complete() {
            if let StepEvent::Stepped { phase, .. } = ramp.poll(now) {
                if phase == Phase::Decelerating {
                    assert!(ramp.current_interval_ticks() >= previous);
                    saw_decel = true;
                }
                previous = ramp.current_interval_ticks();
            }
            now += ramp.current_interval_micros().max(1);
        }
        assert!(saw_decel);
    }

    #[test]
    fn test_zero_distance_immediately_stopped() {
        let plan = MotionPlan::new(0, 8_000.0, 3_000.0, 0.0, 1_000_000).unwrap();
        let mut ramp = RampGenerator::new(plan);
        assert!(ramp.is_complete());
        assert_eq!(ramp.poll(0), StepEvent::None);
        assert_eq!(ramp.poll(1_000_000), StepEvent::None);
    }

    #[test]
    fn test_base_speed_above_target_starts_cruising() {
        let plan = MotionPlan::new(100, 1_000.0, 500.0, 2_000.0, 1_000_000).unwrap();
        let ramp = RampGenerator::new(plan);
        assert_eq!(ramp.phase(), Phase::Cruising);
        assert_eq!(ramp.current_interval_micros(), 1_000);
    }

    #[test]
    fn test_constant_speed_move_holds_base_interval() {
        let plan = MotionPlan::new(50, 8_000.0, 0.0, 2_000.0, 1_000_000).unwrap();
        let mut ramp = RampGenerator::new(plan);
        assert_eq!(ramp.phase(), Phase::Cruising);
        assert_eq!(ramp.current_interval_micros(), 500);
        assert_eq!(run_to_completion(&mut ramp), 50);
    }

    #[test]
    fn test_delayed_poll_emits_single_step() {
        let mut ramp = RampGenerator::new(reference_plan());
        assert!(matches!(ramp.poll(0), StepEvent::Stepped { .. }));

        // Ten intervals late: exactly one step, then cadence resumes from
        // the new reference.
        let late = 10 * ramp.current_interval_micros();
        assert!(matches!(ramp.poll(late), StepEvent::Stepped { .. }));
        assert_eq!(ramp.poll(late + 1), StepEvent::None);
    }

    #[test]
    fn test_clock_wraparound_tolerated() {
        let mut ramp = RampGenerator::new(reference_plan());
        let start = u64::MAX - 100;
        assert!(matches!(ramp.poll(start), StepEvent::Stepped { .. }));

        let interval = ramp.current_interval_micros();
        // Sample after the wraparound boundary.
        let wrapped = start.wrapping_add(interval);
        assert!(wrapped < start);
        assert!(matches!(ramp.poll(wrapped), StepEvent::Stepped { .. }));
    }

    #[test]
    fn test_abort_stops_immediately() {
        let mut ramp = RampGenerator::new(reference_plan());
        assert!(matches!(ramp.poll(0), StepEvent::Stepped { .. }));
        ramp.abort();
        assert_eq!(ramp.remaining(), 0);
        assert!(ramp.is_complete());
        assert_eq!(ramp.poll(u64::MAX / 2), StepEvent::None);
    }

    #[test]
    fn test_deterministic_event_sequence() {
        let samples: heapless::Vec<u64, 64> = (0u64..64).map(|i| i * 7_000).collect();

        let mut a = RampGenerator::new(reference_plan());
        let mut b = RampGenerator::new(reference_plan());

        for &now in samples.iter() {
            assert_eq!(a.poll(now), b.poll(now));
            assert_eq!(a.current_interval_ticks(), b.current_interval_ticks());
        }
    }

    #[test]
    fn test_all_precision_orders_clamp_and_complete() {
        for precision in [
            Precision::FirstOrder,
            Precision::SecondOrder,
            Precision::ThirdOrder,
        ] {
            let plan = reference_plan().with_precision(precision);
            let mut ramp = RampGenerator::new(plan);
            let mut now = 0u64;
            let mut cruised = false;
            let mut pulses = 0u32;

            while !ramp.is_complete() {
                if let StepEvent::Stepped { phase, .. } = ramp.poll(now) {
                    pulses += 1;
                    if phase == Phase::Cruising {
                        assert_eq!(ramp.current_interval_ticks(), 125.0);
                        cruised = true;
                    }
                }
                now += ramp.current_interval_micros().max(1);
            }
            assert!(cruised, "{:?} never reached cruise", precision);
            assert_eq!(pulses, 32_000);
        }
    }

    #[test]
    fn test_iteration_counter_starts_at_two() {
        let ramp = RampGenerator::new(reference_plan());
        assert_eq!(ramp.iteration(), 2);
    }
}
