//! Root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::ramp::{MotionPlan, Precision, StopBehavior};

use super::motor::MotorConfig;
use super::moves::MoveConfig;

/// Ramp generation settings shared by every move.
#[derive(Debug, Clone, Deserialize)]
pub struct RampSettings {
    /// Clock tick rate in Hz; inter-step intervals are expressed in ticks.
    pub clock_rate_hz: u32,

    /// Default end-of-move behavior.
    #[serde(default)]
    pub stop: StopBehavior,

    /// Default recurrence precision.
    #[serde(default)]
    pub precision: Precision,
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct RampConfig {
    /// Motor geometry.
    pub motor: MotorConfig,

    /// Shared ramp settings.
    pub ramp: RampSettings,

    /// Named move configurations.
    #[serde(default)]
    pub moves: FnvIndexMap<String<32>, MoveConfig, 16>,
}

impl RampConfig {
    /// Get a move configuration by name.
    pub fn get_move(&self, name: &str) -> Option<&MoveConfig> {
        self.moves
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all move names.
    pub fn move_names(&self) -> impl Iterator<Item = &str> {
        self.moves.keys().map(|s| s.as_str())
    }

    /// Build a validated motion plan for a named move.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MoveNotFound` for an unknown name, or the
    /// plan's own validation error for a degenerate move.
    pub fn plan(&self, name: &str) -> Result<MotionPlan> {
        let mv = self.get_move(name).ok_or_else(|| {
            ConfigError::MoveNotFound(String::try_from(name).unwrap_or_default())
        })?;

        let distance = mv.resolve_distance(&self.motor, name)?;
        let plan = MotionPlan::new(
            distance,
            mv.target_speed.0,
            mv.acceleration.0,
            mv.base_speed.0,
            self.ramp.clock_rate_hz,
        )?;

        Ok(plan
            .with_stop_behavior(mv.stop.unwrap_or(self.ramp.stop))
            .with_precision(mv.precision.unwrap_or(self.ramp.precision)))
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[motor]
name = "Indexer"
steps_per_revolution = 200
microsteps = 16

[ramp]
clock_rate_hz = 1000000

[moves.spin_up]
distance_microsteps = 32000
target_speed_steps_per_sec = 8000.0
acceleration_steps_per_sec2 = 3000.0

[moves.quarter_turn]
target_degrees = 90.0
target_speed_steps_per_sec = 2000.0
acceleration_steps_per_sec2 = 1000.0
stop = "ramp_down"
"#;

    #[test]
    fn test_plan_from_named_move() {
        let config: RampConfig = toml::from_str(CONFIG).unwrap();
        let plan = config.plan("spin_up").unwrap();
        assert_eq!(plan.distance(), 32_000);
        assert!((plan.target_interval_ticks() - 125.0).abs() < 0.001);
    }

    #[test]
    fn test_angle_move_resolves_distance() {
        let config: RampConfig = toml::from_str(CONFIG).unwrap();
        let plan = config.plan("quarter_turn").unwrap();
        assert_eq!(plan.distance(), 800);
    }

    #[test]
    fn test_unknown_move_rejected() {
        let config: RampConfig = toml::from_str(CONFIG).unwrap();
        assert!(matches!(
            config.plan("nope"),
            Err(crate::error::Error::Config(ConfigError::MoveNotFound(_)))
        ));
    }
}
