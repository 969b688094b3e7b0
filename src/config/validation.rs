//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, RampConfig};

/// Validate a ramp configuration.
///
/// Checks:
/// - Motor geometry is physically sensible
/// - The clock tick rate is non-zero
/// - Every named move resolves to a constructible motion plan
pub fn validate_config(config: &RampConfig) -> Result<()> {
    validate_motor(&config.motor)?;

    if config.ramp.clock_rate_hz == 0 {
        return Err(Error::Plan(crate::error::PlanError::InvalidClockRate));
    }

    // A move that cannot produce a plan is a configuration fault found
    // now, not a runtime surprise mid-move.
    for (name, _) in config.moves.iter() {
        config.plan(name.as_str())?;
    }

    Ok(())
}

fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    // Gear ratio must be positive
    if config.gear_ratio <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidGearRatio(config.gear_ratio)));
    }

    Ok(())
}
