//! # stepper-ramp
//!
//! Incremental speed-ramp step timing for stepper motor drivers.
//!
//! The core is the incremental ramp recurrence (Eiderman's algorithm): each
//! inter-step interval is derived from the previous one with a single
//! multiplication and addition, so a resource-constrained controller can
//! accelerate a motor smoothly without evaluating a square root per step.
//! The only square root is the analytic first interval computed when a move
//! starts.
//!
//! ## Features
//!
//! - **One multiply-add per step**: no division or sqrt in the hot path
//! - **Explicit phases**: accelerate, cruise, optional symmetric ramp-down
//! - **Poll-driven**: non-blocking scheduler fed by a monotonic microsecond
//!   clock, at most one pulse per poll
//! - **embedded-hal 1.0**: `OutputPin` STEP/DIR/EN emitter, `DelayNs` pulse
//!   width
//! - **Configuration-driven**: named moves in TOML, validated up front
//! - **no_std compatible**: core library works without the standard library
//!
//! ## Quick Start
//!
//! ```rust
//! use stepper_ramp::{ManualClock, MotionPlan, StepScheduler, func_emitter};
//!
//! // 32000 microsteps, cruise at 8000 steps/s, accelerate at 3000 steps/s²,
//! // from rest, with a 1 MHz tick clock.
//! let plan = MotionPlan::new(32_000, 8_000.0, 3_000.0, 0.0, 1_000_000).unwrap();
//!
//! let clock = ManualClock::new(0);
//! let mut pulses = 0u32;
//! let mut scheduler = StepScheduler::new(plan, func_emitter(|| pulses += 1), &clock);
//!
//! while !scheduler.is_complete() {
//!     clock.advance(5);
//!     scheduler.poll().unwrap();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and the OS clock
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod clock;
pub mod config;
pub mod emitter;
pub mod error;
pub mod ramp;
pub mod scheduler;

// Re-exports for ergonomic API
pub use clock::{Clock, ManualClock};
pub use config::{validate_config, MotorConfig, MoveConfig, RampConfig};
pub use emitter::{func_emitter, GpioPulseEmitter, PulseEmitter};
pub use error::{Error, Result};
pub use ramp::{MotionPlan, Phase, Precision, RampGenerator, StepEvent, StopBehavior};
pub use scheduler::StepScheduler;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

#[cfg(feature = "std")]
pub use clock::OsClock;

// Unit types
pub use config::units::{Degrees, Microsteps, StepsPerSec, StepsPerSecSquared};
