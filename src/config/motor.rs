//! Motor geometry configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::{Degrees, Microsteps};

/// Motor geometry: everything needed to turn a physical angle into a
/// microstep distance.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Microstep setting (1, 2, 4, 8, 16, 32, etc.).
    pub microsteps: Microsteps,

    /// Gear ratio (output:input, e.g., 5.0 means 5:1 reduction).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f32,
}

fn default_gear_ratio() -> f32 {
    1.0
}

impl MotorConfig {
    /// Total microsteps per output shaft revolution.
    pub fn microsteps_per_revolution(&self) -> u32 {
        (self.steps_per_revolution as f32 * self.microsteps.value() as f32 * self.gear_ratio)
            as u32
    }

    /// Microsteps per degree of output rotation.
    pub fn microsteps_per_degree(&self) -> f32 {
        self.microsteps_per_revolution() as f32 / 360.0
    }

    /// Microstep distance for a commanded angle (magnitude, rounded).
    pub fn distance_for_angle(&self, angle: Degrees) -> u32 {
        let steps = angle.value() * self.microsteps_per_degree();
        let magnitude = if steps < 0.0 { -steps } else { steps };
        (magnitude + 0.5) as u32
    }
}
