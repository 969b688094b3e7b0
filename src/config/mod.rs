//! Configuration module for stepper-ramp.
//!
//! Provides types for loading and validating motor geometry and named move
//! configurations from TOML files (with `std` feature) or pre-parsed data.

#[cfg(feature = "std")]
mod loader;
mod motor;
mod moves;
mod system;
pub mod units;
mod validation;

pub use motor::MotorConfig;
pub use moves::MoveConfig;
pub use system::{RampConfig, RampSettings};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, Microsteps, StepsPerSec, StepsPerSecSquared};
