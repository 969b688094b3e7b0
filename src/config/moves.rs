//! Named move configuration from TOML.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::ramp::{Precision, StopBehavior};

use super::motor::MotorConfig;
use super::units::{Degrees, StepsPerSec, StepsPerSecSquared};

/// A named move from configuration.
///
/// Distance is given either directly in microsteps or as a physical angle
/// resolved through the motor geometry; exactly one of the two is required
/// (microsteps win if both are present).
#[derive(Debug, Clone, Deserialize)]
pub struct MoveConfig {
    /// Target distance in microsteps.
    #[serde(default)]
    pub distance_microsteps: Option<u32>,

    /// Target distance as a physical angle of the output shaft.
    #[serde(default)]
    pub target_degrees: Option<Degrees>,

    /// Cruise speed in microsteps per second.
    #[serde(rename = "target_speed_steps_per_sec")]
    pub target_speed: StepsPerSec,

    /// Acceleration magnitude in microsteps per second squared.
    #[serde(rename = "acceleration_steps_per_sec2")]
    pub acceleration: StepsPerSecSquared,

    /// Speed at motion start (defaults to rest).
    #[serde(default, rename = "base_speed_steps_per_sec")]
    pub base_speed: StepsPerSec,

    /// End-of-move behavior override (falls back to the system default).
    #[serde(default)]
    pub stop: Option<StopBehavior>,

    /// Recurrence precision override (falls back to the system default).
    #[serde(default)]
    pub precision: Option<Precision>,
}

impl MoveConfig {
    /// Resolve the microstep distance for this move.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDistance` if the move declares neither
    /// a microstep distance nor a target angle.
    pub fn resolve_distance(&self, motor: &MotorConfig, name: &str) -> Result<u32, ConfigError> {
        if let Some(distance) = self.distance_microsteps {
            return Ok(distance);
        }
        if let Some(angle) = self.target_degrees {
            return Ok(motor.distance_for_angle(angle));
        }
        Err(ConfigError::MissingDistance(
            heapless::String::try_from(name).unwrap_or_default(),
        ))
    }
}
