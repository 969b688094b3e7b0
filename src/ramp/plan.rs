//! Motion plan construction and validation.
//!
//! A [`MotionPlan`] holds the immutable per-move parameters plus the
//! constants the ramp recurrence derives from them once. All validation
//! happens here; the generator never sees a degenerate configuration.

use libm::sqrtf;
use serde::Deserialize;

use crate::error::{PlanError, Result};

use super::generator::RampGenerator;

/// What to do as the commanded distance runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBehavior {
    /// Hold the current speed until the last microstep, then stop.
    ///
    /// This reproduces the accelerate-then-cruise profile of classic
    /// run-in moves: the final step is emitted at cruise cadence.
    #[default]
    HardStop,
    /// Ramp back down symmetrically: once the remaining distance equals the
    /// distance spent accelerating, the recurrence runs in reverse until
    /// the move completes.
    RampDown,
}

/// Order of the recurrence update factor.
///
/// The exact per-step interval update involves a square root; the
/// incremental algorithm replaces it with a truncated series in
/// `q = m·p²`. Higher orders trade one or two extra multiplications for
/// a smaller per-step approximation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// `p · (1 + q)` — one multiply and one add per step.
    #[default]
    FirstOrder,
    /// `p · (1 + q + q²)`.
    SecondOrder,
    /// `p · (1 + q + 1.5·q²)`.
    ThirdOrder,
}

/// Immutable per-move configuration.
///
/// Created once before a move begins and never mutated during the move.
/// Derived constants (target interval, first interval, ramp constant) are
/// computed at construction so the per-step hot path needs no division or
/// square root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlan {
    /// Target distance in microsteps.
    pub(crate) distance: u32,

    /// Target cruise speed in microsteps per second.
    pub(crate) target_speed: f32,

    /// Acceleration magnitude in microsteps per second squared.
    pub(crate) acceleration: f32,

    /// Speed at motion start in microsteps per second (may be zero).
    pub(crate) base_speed: f32,

    /// Clock tick rate in Hz; intervals are expressed in tick units.
    pub(crate) clock_rate_hz: u32,

    /// Behavior at the end of the move.
    pub(crate) stop: StopBehavior,

    /// Recurrence update order.
    pub(crate) precision: Precision,

    /// Target cruise interval `T = f / target_speed`, in ticks.
    pub(crate) target_interval_ticks: f32,

    /// Analytic first interval `p1 = f / sqrt(v0² + 2a)`, in ticks.
    pub(crate) first_interval_ticks: f32,

    /// Ramp constant `R = a / f²`; the per-step multiplier is `±R·p²`.
    pub(crate) ramp_constant: f32,

    /// Microseconds per clock tick (`1e6 / f`).
    pub(crate) micros_per_tick: f32,
}

impl MotionPlan {
    /// Create a validated motion plan.
    ///
    /// `distance_microsteps` may be zero: the resulting ramp is complete
    /// before the first poll and emits no pulses.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if the target speed is not positive, the
    /// acceleration or base speed is negative or non-finite, both
    /// acceleration and base speed are zero, or the clock rate is zero.
    pub fn new(
        distance_microsteps: u32,
        target_speed: f32,
        acceleration: f32,
        base_speed: f32,
        clock_rate_hz: u32,
    ) -> Result<Self> {
        if !target_speed.is_finite() || target_speed <= 0.0 {
            return Err(PlanError::InvalidTargetSpeed(target_speed).into());
        }
        if !acceleration.is_finite() || acceleration < 0.0 {
            return Err(PlanError::InvalidAcceleration(acceleration).into());
        }
        if !base_speed.is_finite() || base_speed < 0.0 {
            return Err(PlanError::InvalidBaseSpeed(base_speed).into());
        }
        if acceleration == 0.0 && base_speed == 0.0 {
            return Err(PlanError::DeadStart.into());
        }
        if clock_rate_hz == 0 {
            return Err(PlanError::InvalidClockRate.into());
        }

        let f = clock_rate_hz as f32;

        // The only square root of the whole move.
        let first_interval_ticks = f / sqrtf(base_speed * base_speed + 2.0 * acceleration);

        Ok(Self {
            distance: distance_microsteps,
            target_speed,
            acceleration,
            base_speed,
            clock_rate_hz,
            stop: StopBehavior::default(),
            precision: Precision::default(),
            target_interval_ticks: f / target_speed,
            first_interval_ticks,
            ramp_constant: acceleration / (f * f),
            micros_per_tick: 1_000_000.0 / f,
        })
    }

    /// Select the end-of-move behavior.
    #[must_use]
    pub fn with_stop_behavior(mut self, stop: StopBehavior) -> Self {
        self.stop = stop;
        self
    }

    /// Select the recurrence update order.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Target distance in microsteps.
    #[inline]
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Target cruise speed in microsteps per second.
    #[inline]
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Acceleration magnitude in microsteps per second squared.
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Speed at motion start in microsteps per second.
    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Clock tick rate in Hz.
    #[inline]
    pub fn clock_rate_hz(&self) -> u32 {
        self.clock_rate_hz
    }

    /// Target cruise interval in clock ticks.
    #[inline]
    pub fn target_interval_ticks(&self) -> f32 {
        self.target_interval_ticks
    }

    /// Analytic first interval in clock ticks.
    #[inline]
    pub fn first_interval_ticks(&self) -> f32 {
        self.first_interval_ticks
    }

    /// Start a ramp for this plan.
    #[inline]
    pub fn start(self) -> RampGenerator {
        RampGenerator::new(self)
    }
}
