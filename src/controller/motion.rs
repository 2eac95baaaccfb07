//! Kinematic movement integration: gravity, jumping and walk/run intent.
//!
//! [`MotionIntegrator`] owns vertical velocity and grounded state and turns
//! per-frame input plus elapsed time into displacement requests against a
//! [`Mover`]. It is a plain synchronous state machine so systems, benches
//! and tests all step the exact same logic.

use bevy::math::Vec3;

use crate::controller::mover::Mover;
use crate::controller::ConfigError;

/// Vertical velocity applied while standing on ground instead of zero.
///
/// Keeps the body pressed onto slopes and steps and avoids a one-frame
/// "falling" flicker before the next jump.
pub const LANDING_STICK_VELOCITY: f32 = -2.0;

/// Designer-facing movement tunables. Immutable once handed to a
/// [`MotionIntegrator`] unless explicitly replaced via `set_config`.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Base horizontal speed in units per second.
    pub walk_speed: f32,
    /// Multiplier applied to `walk_speed` while the run input is held.
    pub run_multiplier: f32,
    /// Apex height of a jump in world units.
    pub jump_height: f32,
    /// Gravitational acceleration in units per second squared; negative.
    pub gravity: f32,
    /// How far below the feet the ground probe reaches.
    pub ground_probe_distance: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_multiplier: 2.0,
            jump_height: 2.0,
            gravity: -9.81,
            ground_probe_distance: 0.2,
        }
    }
}

impl MotionConfig {
    /// Check every tunable for sanity.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the offending field when a value is
    /// non-finite, a speed/height is not positive, or gravity is not
    /// strictly negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("walk_speed", self.walk_speed),
            ("run_multiplier", self.run_multiplier),
            ("jump_height", self.jump_height),
            ("gravity", self.gravity),
            ("ground_probe_distance", self.ground_probe_distance),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        let positive = [
            ("walk_speed", self.walk_speed),
            ("run_multiplier", self.run_multiplier),
            ("jump_height", self.jump_height),
            ("ground_probe_distance", self.ground_probe_distance),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotNegative { value: self.gravity });
        }
        Ok(())
    }
}

/// One frame of movement intent, already resolved from whatever input
/// device the host polls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    /// Forward axis in `[-1, 1]`; positive walks forward.
    pub forward: f32,
    /// Strafe axis in `[-1, 1]`; positive strafes right.
    pub right: f32,
    /// Whether the run modifier is held this frame.
    pub run_held: bool,
    /// Edge-triggered jump: true only on the frame the input went down.
    pub jump_pressed: bool,
}

/// Per-body movement state. Create one per controlled body at spawn time
/// and call [`MotionIntegrator::tick`] once per frame.
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    config: MotionConfig,
    vertical_velocity: f32,
    grounded: bool,
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self {
            config: MotionConfig::default(),
            vertical_velocity: 0.0,
            grounded: false,
        }
    }
}

impl MotionIntegrator {
    /// Build an integrator from a validated config.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] from [`MotionConfig::validate`] so a rig
    /// with broken movement tunables is never tickable.
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            vertical_velocity: 0.0,
            grounded: false,
        })
    }

    /// Step the movement model by one frame.
    ///
    /// Fixed order: ground query (with landing stick), horizontal intent,
    /// jump impulse, then explicit-Euler gravity and the vertical move.
    /// `facing_forward`/`facing_right` are the body's horizontal basis
    /// vectors; the input axes are deliberately not normalized, so diagonal
    /// analog input legitimately produces a longer vector.
    ///
    /// # Arguments
    /// * `mover` - collision-aware mover that owns the authoritative position
    /// * `input` - this frame's resolved movement intent
    /// * `facing_forward` - body forward, flattened onto the ground plane
    /// * `facing_right` - body right, flattened onto the ground plane
    /// * `dt` - elapsed seconds since the previous tick
    pub fn tick(
        &mut self,
        mover: &mut dyn Mover,
        input: &MoveInput,
        facing_forward: Vec3,
        facing_right: Vec3,
        dt: f32,
    ) {
        self.grounded = mover.is_grounded();
        if self.grounded && self.vertical_velocity < 0.0 {
            self.vertical_velocity = LANDING_STICK_VELOCITY;
        }

        let dir = facing_right * input.right + facing_forward * input.forward;
        let speed = self.config.walk_speed
            * if input.run_held { self.config.run_multiplier } else { 1.0 };
        mover.move_by(dir * speed * dt);

        // v = sqrt(2gh); gravity is negative so the product under the root is positive
        if input.jump_pressed && self.grounded {
            self.vertical_velocity = (self.config.jump_height * -2.0 * self.config.gravity).sqrt();
        }

        self.vertical_velocity += self.config.gravity * dt;
        mover.move_by(Vec3::Y * self.vertical_velocity * dt);
    }

    /// Whether the last tick's ground query reported contact.
    #[must_use]
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Signed vertical speed; positive is ascending.
    #[must_use]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Replace the tunables at runtime (settings hot-reload).
    ///
    /// # Errors
    /// Rejects the new config without touching the current one when it
    /// fails validation.
    pub fn set_config(&mut self, config: MotionConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Zero out accumulated vertical velocity (respawn boundary).
    pub fn reset_velocity(&mut self) {
        self.vertical_velocity = 0.0;
        self.grounded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mover fake: scripted grounded flag, records every requested
    /// displacement and reports it fully achieved.
    struct RecordingMover {
        grounded: bool,
        moves: Vec<Vec3>,
    }

    impl RecordingMover {
        fn new(grounded: bool) -> Self {
            Self { grounded, moves: Vec::new() }
        }

        /// Sum of the horizontal components requested so far.
        fn horizontal_total(&self) -> Vec3 {
            self.moves
                .iter()
                .map(|m| Vec3::new(m.x, 0.0, m.z))
                .sum()
        }
    }

    impl Mover for RecordingMover {
        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn move_by(&mut self, delta: Vec3) -> Vec3 {
            self.moves.push(delta);
            delta
        }
    }

    fn integrator() -> MotionIntegrator {
        MotionIntegrator::new(MotionConfig::default()).unwrap()
    }

    #[test]
    fn grounded_jump_sets_derived_impulse() {
        let mut motion = integrator();
        let mut mover = RecordingMover::new(true);
        let input = MoveInput { jump_pressed: true, ..MoveInput::default() };

        // dt = 0 observes the impulse before any gravity accumulates on top
        motion.tick(&mut mover, &input, Vec3::NEG_Z, Vec3::X, 0.0);

        // sqrt(2 * 9.81 * 2) = 6.2641...
        let expected = (2.0_f32 * 9.81 * 2.0).sqrt();
        assert!((motion.vertical_velocity() - expected).abs() < 1e-3);
    }

    #[test]
    fn airborne_jump_press_is_ignored() {
        let mut motion = integrator();
        let mut mover = RecordingMover::new(false);
        let input = MoveInput { jump_pressed: true, ..MoveInput::default() };
        let dt = 1.0 / 60.0;

        motion.tick(&mut mover, &input, Vec3::NEG_Z, Vec3::X, dt);

        // only gravity integration touched the velocity
        assert!((motion.vertical_velocity() - (-9.81 * dt)).abs() < 1e-6);
        assert!(!motion.grounded());
    }

    #[test]
    fn landing_sticks_at_exactly_minus_two() {
        let mut motion = integrator();

        // fall for a while to accumulate negative velocity
        let mut falling = RecordingMover::new(false);
        for _ in 0..30 {
            motion.tick(&mut falling, &MoveInput::default(), Vec3::NEG_Z, Vec3::X, 1.0 / 60.0);
        }
        assert!(motion.vertical_velocity() < LANDING_STICK_VELOCITY);

        // first grounded tick clamps to the stick value, not zero;
        // dt = 0 so gravity adds nothing on top of the clamp
        let mut ground = RecordingMover::new(true);
        motion.tick(&mut ground, &MoveInput::default(), Vec3::NEG_Z, Vec3::X, 0.0);
        assert_eq!(motion.vertical_velocity(), LANDING_STICK_VELOCITY);
    }

    #[test]
    fn landing_stick_survives_gravity_accumulation() {
        let mut motion = integrator();
        let mut mover = RecordingMover::new(true);
        let dt = 1.0 / 60.0;

        // priming tick: velocity starts at zero, so the clamp has nothing
        // to do yet and only gravity applies
        motion.tick(&mut mover, &MoveInput::default(), Vec3::NEG_Z, Vec3::X, dt);
        assert!((motion.vertical_velocity() - (-9.81 * dt)).abs() < 1e-6);

        // every following grounded tick re-clamps before integrating
        // gravity, so the velocity never drifts below stick + g*dt
        for _ in 0..120 {
            motion.tick(&mut mover, &MoveInput::default(), Vec3::NEG_Z, Vec3::X, dt);
            assert!((motion.vertical_velocity() - (LANDING_STICK_VELOCITY - 9.81 * dt)).abs() < 1e-5);
        }
    }

    #[test]
    fn walk_and_run_displacement_magnitudes() {
        let input = MoveInput { forward: 1.0, ..MoveInput::default() };

        let mut motion = integrator();
        let mut mover = RecordingMover::new(true);
        motion.tick(&mut mover, &input, Vec3::NEG_Z, Vec3::X, 1.0);
        assert!((mover.horizontal_total().length() - 5.0).abs() < 1e-5);
        assert!((mover.horizontal_total() - Vec3::NEG_Z * 5.0).length() < 1e-5);

        let mut motion = integrator();
        let mut mover = RecordingMover::new(true);
        let running = MoveInput { run_held: true, ..input };
        motion.tick(&mut mover, &running, Vec3::NEG_Z, Vec3::X, 1.0);
        assert!((mover.horizontal_total().length() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn diagonal_input_is_not_normalized() {
        let mut motion = integrator();
        let mut mover = RecordingMover::new(true);
        let input = MoveInput { forward: 1.0, right: 1.0, ..MoveInput::default() };

        motion.tick(&mut mover, &input, Vec3::NEG_Z, Vec3::X, 1.0);

        // |(1,0,-1)| * 5 = 5 * sqrt(2), longer than a single axis on purpose
        assert!((mover.horizontal_total().length() - 5.0 * 2.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn horizontal_displacement_is_frame_rate_independent() {
        let input = MoveInput { forward: 1.0, ..MoveInput::default() };
        let total_time = 2.0;

        let mut totals = Vec::new();
        for steps in [1u32, 10, 60, 240] {
            let mut motion = integrator();
            let mut mover = RecordingMover::new(true);
            let dt = total_time / steps as f32;
            for _ in 0..steps {
                motion.tick(&mut mover, &input, Vec3::NEG_Z, Vec3::X, dt);
            }
            totals.push(mover.horizontal_total());
        }

        // constant horizontal velocity: exact for any step count
        for total in &totals {
            assert!((*total - Vec3::NEG_Z * 10.0).length() < 1e-3);
        }
    }

    #[test]
    fn jump_edge_on_next_frame_does_not_refresh_impulse() {
        use crate::controller::FlatGroundMover;

        let mut motion = integrator();
        let mut mover = FlatGroundMover::new(Vec3::ZERO, 0.0, 0.2);
        let dt = 1.0 / 60.0;
        let jump = MoveInput { jump_pressed: true, ..MoveInput::default() };

        motion.tick(&mut mover, &jump, Vec3::NEG_Z, Vec3::X, dt);
        let after_first = motion.vertical_velocity();
        assert!(after_first > 0.0);

        // the body has barely left the floor and is still within probe
        // reach, but a second jump edge must not reset the impulse; only
        // gravity acts on the velocity
        motion.tick(&mut mover, &jump, Vec3::NEG_Z, Vec3::X, dt);
        assert!(!motion.grounded());
        assert!((motion.vertical_velocity() - (after_first - 9.81 * dt)).abs() < 1e-5);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let upward = MotionConfig { gravity: 9.81, ..MotionConfig::default() };
        assert_eq!(
            MotionIntegrator::new(upward).unwrap_err(),
            ConfigError::GravityNotNegative { value: 9.81 }
        );

        let stalled = MotionConfig { walk_speed: 0.0, ..MotionConfig::default() };
        assert!(matches!(
            MotionIntegrator::new(stalled).unwrap_err(),
            ConfigError::NonPositive { field: "walk_speed", .. }
        ));

        let broken = MotionConfig { jump_height: f32::NAN, ..MotionConfig::default() };
        assert!(matches!(
            MotionIntegrator::new(broken).unwrap_err(),
            ConfigError::NonFinite { field: "jump_height" }
        ));
    }

    #[test]
    fn reset_velocity_clears_fall_state() {
        let mut motion = integrator();
        let mut mover = RecordingMover::new(false);
        for _ in 0..10 {
            motion.tick(&mut mover, &MoveInput::default(), Vec3::NEG_Z, Vec3::X, 0.1);
        }
        assert!(motion.vertical_velocity() < 0.0);

        motion.reset_velocity();
        assert_eq!(motion.vertical_velocity(), 0.0);
        assert!(!motion.grounded());
    }
}
