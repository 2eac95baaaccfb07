//! Engine-free first-person controller core.
//!
//! The module provides the kinematic movement integrator, the mouse-look
//! pitch controller and the collision-mover seam they talk to. Nothing in
//! here touches the ECS, input devices or rendering; the systems in
//! [`crate::player`] drive these types once per frame and own the wiring.

pub mod look;
pub mod motion;
pub mod mover;

pub use look::{LookConfig, LookController, YawBody};
pub use motion::{MotionConfig, MotionIntegrator, MoveInput};
pub use mover::{FlatGroundMover, Mover};

use std::fmt;

/// Rejected controller configuration.
///
/// Returned by [`MotionIntegrator::new`] and [`LookController::new`] so a
/// rig with broken tunables is never constructed in the first place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A tunable was NaN or infinite.
    NonFinite { field: &'static str },
    /// A speed/height tunable that must be strictly positive was not.
    NonPositive { field: &'static str, value: f32 },
    /// Gravity must point down (strictly negative).
    GravityNotNegative { value: f32 },
    /// Pitch bounds must satisfy `min <= max`.
    PitchRangeInverted { min: f32, max: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => {
                write!(f, "{field} must be a finite number")
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ConfigError::GravityNotNegative { value } => {
                write!(f, "gravity must be negative (downward), got {value}")
            }
            ConfigError::PitchRangeInverted { min, max } => {
                write!(f, "pitch range is inverted: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
