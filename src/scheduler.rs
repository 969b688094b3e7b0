//! Tick scheduling - glue between clock, ramp generator and emitter.
//!
//! Busy-poll, non-blocking design: [`StepScheduler::poll`] returns
//! immediately whether or not a step was due, and should be invoked faster
//! than the smallest possible interval (the cruise period) to avoid delayed
//! steps. At most one pulse is emitted per poll, so a late poll never
//! produces a catch-up burst.

use crate::clock::Clock;
use crate::emitter::PulseEmitter;
use crate::ramp::{MotionPlan, Phase, RampGenerator, StepEvent};

/// Drives one ramp against a clock and an emitter.
///
/// Owns the ramp state exclusively; in a multi-threaded environment the
/// whole scheduler must live on a single task, with move commands delivered
/// via a channel rather than shared mutable state.
pub struct StepScheduler<E, C>
where
    E: PulseEmitter,
    C: Clock,
{
    generator: RampGenerator,
    emitter: E,
    clock: C,
}

impl<E, C> StepScheduler<E, C>
where
    E: PulseEmitter,
    C: Clock,
{
    /// Create a scheduler with a freshly started ramp.
    pub fn new(plan: MotionPlan, emitter: E, clock: C) -> Self {
        Self {
            generator: RampGenerator::new(plan),
            emitter,
            clock,
        }
    }

    /// Poll once: if the current interval has elapsed, emit exactly one
    /// pulse and advance the ramp by one iteration.
    ///
    /// # Errors
    ///
    /// Propagates the emitter's error if the pulse could not be produced.
    pub fn poll(&mut self) -> Result<StepEvent, E::Error> {
        let now = self.clock.now_micros();
        let event = self.generator.poll(now);
        if let StepEvent::Stepped { .. } = event {
            self.emitter.step()?;
        }
        Ok(event)
    }

    /// Poll once, reporting the elapsed state-advance time to `hook`.
    ///
    /// The hook receives the wall-clock microseconds the recurrence update
    /// took, measured with the scheduler's own clock, and only fires on
    /// polls that emitted a step. Intended for benchmarking the hot path on
    /// target hardware.
    pub fn poll_instrumented<F>(&mut self, hook: &mut F) -> Result<StepEvent, E::Error>
    where
        F: FnMut(u64),
    {
        let before = self.clock.now_micros();
        let event = self.generator.poll(before);
        let after = self.clock.now_micros();
        if let StepEvent::Stepped { .. } = event {
            hook(after.wrapping_sub(before));
            self.emitter.step()?;
        }
        Ok(event)
    }

    /// Busy-poll until the move completes.
    ///
    /// # Errors
    ///
    /// Propagates the first emitter error; the ramp state keeps the step
    /// already accounted for, so a retry continues rather than double-steps.
    pub fn run_to_completion(&mut self) -> Result<(), E::Error> {
        while !self.generator.is_complete() {
            self.poll()?;
        }
        Ok(())
    }

    /// Abort the move; the next poll reports nothing.
    pub fn abort(&mut self) {
        self.generator.abort();
    }

    /// Whether the move has completed (or was aborted).
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.generator.is_complete()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.generator.phase()
    }

    /// Microsteps left to emit.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.generator.remaining()
    }

    /// Move progress (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.generator.progress()
    }

    /// Access the underlying ramp generator.
    #[inline]
    pub fn generator(&self) -> &RampGenerator {
        &self.generator
    }

    /// Set the emitter direction line (`true` = forward).
    ///
    /// # Errors
    ///
    /// Propagates the emitter's error.
    pub fn set_direction(&mut self, forward: bool) -> Result<(), E::Error> {
        self.emitter.set_direction(forward)
    }

    /// Tear down into the emitter and clock.
    pub fn release(self) -> (E, C) {
        (self.emitter, self.clock)
    }
}
