//! Ramp module for stepper-ramp.
//!
//! Provides motion plan construction and the incremental ramp generator.

mod generator;
mod plan;

pub use generator::{Phase, RampGenerator, StepEvent};
pub use plan::{MotionPlan, Precision, StopBehavior};
