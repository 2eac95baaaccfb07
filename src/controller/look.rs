//! Mouse-look pitch controller.
//!
//! [`LookController`] accumulates a clamped vertical look angle and hands
//! yaw off to whatever body owns the horizontal facing, through the
//! [`YawBody`] seam. It is shared by the live look system, the benches and
//! the tests so all three exercise identical clamp arithmetic.

use bevy::math::Quat;

use crate::controller::ConfigError;

/// Lower bound accepted by [`LookController::set_sensitivity`].
pub const MIN_SENSITIVITY: f32 = 0.1;
/// Upper bound accepted by [`LookController::set_sensitivity`].
pub const MAX_SENSITIVITY: f32 = 10.0;

/// Something whose horizontal facing can be rotated in place.
///
/// The controller never owns the body or tracks its yaw; it only requests
/// relative rotations. Positive degrees turn toward pointer-right.
pub trait YawBody {
    fn rotate_yaw(&mut self, degrees: f32);
}

/// Mouse-look tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct LookConfig {
    /// Degrees of rotation per pointer-delta unit.
    pub sensitivity: f32,
    /// Most-downward pitch in degrees; at most 0.
    pub min_pitch: f32,
    /// Most-upward pitch in degrees; at least 0, at most 90.
    pub max_pitch: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            min_pitch: -90.0,
            max_pitch: 90.0,
        }
    }
}

impl LookConfig {
    /// Check the pitch range and sensitivity for sanity.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when a value is non-finite or the pitch
    /// bounds are inverted. Out-of-range sensitivity is not an error; it is
    /// clamped on construction, matching the lenient policy for
    /// designer-facing tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("sensitivity", self.sensitivity),
            ("min_pitch", self.min_pitch),
            ("max_pitch", self.max_pitch),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::PitchRangeInverted {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        Ok(())
    }
}

/// Per-camera look state. Pitch is the only thing it owns; yaw lives
/// entirely on the external body.
#[derive(Debug, Clone)]
pub struct LookController {
    sensitivity: f32,
    min_pitch: f32,
    max_pitch: f32,
    pitch_degrees: f32,
}

impl Default for LookController {
    fn default() -> Self {
        let config = LookConfig::default();
        Self {
            sensitivity: config.sensitivity,
            min_pitch: config.min_pitch,
            max_pitch: config.max_pitch,
            pitch_degrees: 0.0,
        }
    }
}

impl LookController {
    /// Build a controller from a validated config, clamping sensitivity
    /// into `[MIN_SENSITIVITY, MAX_SENSITIVITY]`.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] from [`LookConfig::validate`].
    pub fn new(config: LookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sensitivity: config.sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY),
            min_pitch: config.min_pitch,
            max_pitch: config.max_pitch,
            pitch_degrees: 0.0,
        })
    }

    /// Apply one frame of pointer motion.
    ///
    /// Pointer deltas are screen-space (+y is down). Vertical motion is
    /// inverted so moving the pointer up looks up; this convention is fixed,
    /// not a tunable. Yaw is requested on `body` and never accumulated here;
    /// pitch is accumulated and clamped to the configured closed interval.
    ///
    /// # Arguments
    /// * `body` - the external body whose facing receives the yaw rotation
    /// * `delta_x` - horizontal pointer delta for this frame
    /// * `delta_y` - vertical pointer delta for this frame
    /// * `scale` - extra per-frame multiplier; pass 1.0 for event deltas
    ///   that are already frame-relative
    pub fn tick(&mut self, body: &mut dyn YawBody, delta_x: f32, delta_y: f32, scale: f32) {
        let yaw_delta = delta_x * self.sensitivity * scale;
        let pitch_input = delta_y * self.sensitivity * scale;

        body.rotate_yaw(yaw_delta);

        self.pitch_degrees -= pitch_input;
        self.pitch_degrees = self.pitch_degrees.clamp(self.min_pitch, self.max_pitch);
    }

    /// Accumulated vertical look angle in degrees; positive looks up.
    #[must_use]
    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    /// Pitch-only local orientation for the camera entity. Yaw and roll are
    /// forced to zero; yaw is the body's business.
    #[must_use]
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch_degrees.to_radians())
    }

    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Store a new sensitivity, silently clamped into
    /// `[MIN_SENSITIVITY, MAX_SENSITIVITY]`. An out-of-range request
    /// degrades to the nearest valid value rather than failing.
    pub fn set_sensitivity(&mut self, value: f32) {
        self.sensitivity = value.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    /// Return the look to straight-ahead. Idempotent; intended for respawn
    /// and similar state-transition boundaries, which the caller owns.
    pub fn reset_rotation(&mut self) {
        self.pitch_degrees = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yaw seam fake that records requested rotations.
    #[derive(Default)]
    struct RecordingYaw {
        total_degrees: f32,
        calls: usize,
    }

    impl YawBody for RecordingYaw {
        fn rotate_yaw(&mut self, degrees: f32) {
            self.total_degrees += degrees;
            self.calls += 1;
        }
    }

    #[test]
    fn pitch_stays_within_bounds_for_any_input() {
        let mut look = LookController::new(LookConfig {
            sensitivity: 10.0,
            min_pitch: -85.0,
            max_pitch: 85.0,
        })
        .unwrap();
        let mut body = RecordingYaw::default();

        // deterministic LCG driving wild pointer deltas
        let mut state: u32 = 0x1234_5678;
        for _ in 0..2_000 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let dy = (((state >> 16) & 0x7fff) as f32 / 32_767.0) * 4_000.0 - 2_000.0;
            look.tick(&mut body, 0.0, dy, 1.0);
            assert!(look.pitch_degrees() >= -85.0);
            assert!(look.pitch_degrees() <= 85.0);
        }
    }

    #[test]
    fn pointer_up_looks_up() {
        let mut look = LookController::default();
        let mut body = RecordingYaw::default();

        // screen-space +y is down, so a negative delta is pointer-up
        look.tick(&mut body, 0.0, -10.0, 1.0);
        assert!(look.pitch_degrees() > 0.0);
    }

    #[test]
    fn yaw_is_delegated_not_tracked() {
        let mut look = LookController::default();
        let mut body = RecordingYaw::default();

        look.tick(&mut body, 30.0, 0.0, 1.0);
        look.tick(&mut body, -10.0, 0.0, 1.0);

        assert_eq!(body.calls, 2);
        assert!((body.total_degrees - 20.0).abs() < 1e-5);
        // local rotation stays pitch-only regardless of yaw traffic
        assert_eq!(look.local_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn scale_multiplies_both_axes() {
        let mut look = LookController::default();
        let mut body = RecordingYaw::default();

        look.tick(&mut body, 4.0, -2.0, 0.5);
        assert!((body.total_degrees - 2.0).abs() < 1e-5);
        assert!((look.pitch_degrees() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sensitivity_is_silently_clamped() {
        let mut look = LookController::default();
        look.set_sensitivity(-5.0);
        assert_eq!(look.sensitivity(), MIN_SENSITIVITY);
        look.set_sensitivity(50.0);
        assert_eq!(look.sensitivity(), MAX_SENSITIVITY);
        look.set_sensitivity(3.0);
        assert_eq!(look.sensitivity(), 3.0);
    }

    #[test]
    fn reset_rotation_is_idempotent() {
        let mut look = LookController::default();
        let mut body = RecordingYaw::default();
        look.tick(&mut body, 0.0, 37.5, 1.0);
        assert!(look.pitch_degrees() != 0.0);

        look.reset_rotation();
        let once = (look.pitch_degrees(), look.local_rotation());
        look.reset_rotation();
        let twice = (look.pitch_degrees(), look.local_rotation());

        assert_eq!(once, twice);
        assert_eq!(once.0, 0.0);
        assert_eq!(once.1, Quat::IDENTITY);
    }

    #[test]
    fn inverted_pitch_range_is_rejected() {
        let bad = LookConfig {
            min_pitch: 30.0,
            max_pitch: -30.0,
            ..LookConfig::default()
        };
        assert_eq!(
            LookController::new(bad).unwrap_err(),
            ConfigError::PitchRangeInverted { min: 30.0, max: -30.0 }
        );
    }
}
