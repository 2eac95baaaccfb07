//! Per-frame movement driving and respawn handling.
//!
//! `player_motion` resolves keybinds into a [`MoveInput`], derives the
//! body's flattened facing basis and steps the
//! [`MotionIntegrator`](crate::controller::MotionIntegrator) against the
//! body's mover. `respawn_player` returns the rig to the spawn point on the
//! respawn key or after falling out of the world, and
//! `apply_controller_settings` re-applies hot-reloaded settings.

use bevy::prelude::*;

use crate::controller::MoveInput;
use crate::player::{PlayerBody, PlayerCamera, PlayerLook, PlayerMotion, PlayerMover, SPAWN_POINT};
use crate::settings::Settings;

/// Below this height the body is considered fallen out of the world.
pub const KILL_HEIGHT: f32 = -50.0;

/// Step player movement for one frame.
///
/// # Arguments
/// * `keyboard_input` - current keyboard state for movement input
/// * `time` - delta time resource used to scale movement
/// * `settings` - keybinds resolving the movement actions
/// * `query` - body transform plus motion and mover state
#[allow(clippy::needless_pass_by_value)]
pub fn player_motion(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&mut Transform, &mut PlayerMotion, &mut PlayerMover), With<PlayerBody>>,
) {
    let forward_kc = settings.keybind("forward", KeyCode::KeyW);
    let back_kc = settings.keybind("back", KeyCode::KeyS);
    let left_kc = settings.keybind("left", KeyCode::KeyA);
    let right_kc = settings.keybind("right", KeyCode::KeyD);
    let run_kc = settings.keybind("run", KeyCode::ShiftLeft);
    let jump_kc = settings.keybind("jump", KeyCode::Space);

    let axis = |pos: KeyCode, neg: KeyCode| {
        let mut v = 0.0;
        if keyboard_input.pressed(pos) {
            v += 1.0;
        }
        if keyboard_input.pressed(neg) {
            v -= 1.0;
        }
        v
    };

    let input = MoveInput {
        forward: axis(forward_kc, back_kc),
        right: axis(right_kc, left_kc),
        run_held: keyboard_input.pressed(run_kc),
        // just_pressed gives the edge-trigger the jump contract requires
        jump_pressed: keyboard_input.just_pressed(jump_kc),
    };

    let dt = time.delta_seconds();

    for (mut body_tf, mut motion, mut mover) in &mut query {
        let forward_raw = body_tf.forward();
        let fwd = Vec3::new(forward_raw.x, 0.0, forward_raw.z).normalize_or_zero();
        let right_raw = body_tf.right();
        let right = Vec3::new(right_raw.x, 0.0, right_raw.z).normalize_or_zero();

        // the mover owns the feet position; the transform mirrors it
        mover.0.position = body_tf.translation;
        motion.0.tick(&mut mover.0, &input, fwd, right, dt);
        body_tf.translation = mover.0.position;
    }
}

/// Respawn the rig on the respawn key or after falling below `KILL_HEIGHT`.
///
/// Resets position, vertical velocity and the look rotation; the camera
/// child's local rotation is forced back to identity immediately instead of
/// waiting for the next mouse movement.
#[allow(clippy::needless_pass_by_value)]
pub fn respawn_player(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut bodies: Query<
        (&mut Transform, &mut PlayerMotion, &mut PlayerMover, &mut PlayerLook),
        With<PlayerBody>,
    >,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<PlayerBody>)>,
) {
    let requested = keyboard_input.just_pressed(settings.keybind("respawn", KeyCode::KeyR));

    for (mut body_tf, mut motion, mut mover, mut look) in &mut bodies {
        if !requested && body_tf.translation.y > KILL_HEIGHT {
            continue;
        }

        mover.0.position = SPAWN_POINT;
        body_tf.translation = SPAWN_POINT;
        motion.0.reset_velocity();
        look.0.reset_rotation();
        for mut camera_tf in &mut cameras {
            camera_tf.rotation = look.0.local_rotation();
        }
        info!("player respawned at {SPAWN_POINT}");
    }
}

/// Push changed settings into the live rig.
///
/// Sensitivity goes through `set_sensitivity`, so out-of-range values from
/// a hand-edited file degrade to the nearest valid value. An invalid
/// movement section is rejected with a warning and the previous config
/// stays in effect. Pitch bounds only apply at rig construction.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_controller_settings(
    settings: Res<Settings>,
    mut query: Query<(&mut PlayerMotion, &mut PlayerLook, &mut PlayerMover)>,
) {
    if !settings.is_changed() {
        return;
    }

    for (mut motion, mut look, mut mover) in &mut query {
        if let Err(e) = motion.0.set_config(settings.motion_config()) {
            warn!("ignoring movement settings: {e}");
        }
        look.0.set_sensitivity(settings.controls.mouse_sensitivity);
        mover.0.probe_distance = settings.movement.ground_probe_distance;
    }
}
