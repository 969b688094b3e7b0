//! Error types for the stepper-ramp library.
//!
//! Provides unified error handling across configuration parsing and motion
//! plan construction.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-ramp operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motion plan construction error
    Plan(PlanError),
}

/// Configuration-related errors (TOML layer).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Move name not found in configuration
    MoveNotFound(heapless::String<32>),
    /// Duplicate move name in configuration
    DuplicateMoveName(heapless::String<32>),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f32),
    /// Invalid steps per revolution (must be > 0)
    InvalidStepsPerRevolution(u16),
    /// Move declares neither a distance nor a target angle
    MissingDistance(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motion plan construction errors.
///
/// A plan with any of these faults is rejected up front; the ramp generator
/// is never handed a degenerate configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Target speed is zero, negative or non-finite
    InvalidTargetSpeed(f32),
    /// Acceleration is negative or non-finite
    InvalidAcceleration(f32),
    /// Base speed is negative or non-finite
    InvalidBaseSpeed(f32),
    /// Zero acceleration combined with zero base speed: the first-interval
    /// denominator `sqrt(v0² + 2a)` would be zero
    DeadStart,
    /// Clock tick rate is zero
    InvalidClockRate,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Plan(e) => write!(f, "Plan error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::MoveNotFound(name) => write!(f, "Move '{}' not found", name),
            ConfigError::DuplicateMoveName(name) => write!(f, "Duplicate move name: '{}'", name),
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::MissingDistance(name) => {
                write!(f, "Move '{}' has neither distance_microsteps nor target_degrees", name)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::InvalidTargetSpeed(v) => {
                write!(f, "Invalid target speed: {}. Must be finite and > 0", v)
            }
            PlanError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be finite and >= 0", v)
            }
            PlanError::InvalidBaseSpeed(v) => {
                write!(f, "Invalid base speed: {}. Must be finite and >= 0", v)
            }
            PlanError::DeadStart => {
                write!(f, "Zero acceleration with zero base speed: motor can never move")
            }
            PlanError::InvalidClockRate => write!(f, "Clock rate must be > 0"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PlanError> for Error {
    fn from(e: PlanError) -> Self {
        Error::Plan(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PlanError {}
