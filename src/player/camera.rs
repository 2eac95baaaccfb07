//! Mouse-look and cursor helpers.
//!
//! `player_look` accumulates mouse motion for the current update and feeds
//! it to the [`LookController`](crate::controller::LookController): yaw goes
//! to the body transform through the [`YawBody`] seam, pitch comes back as
//! the camera child's local rotation. `cursor_grab` toggles cursor
//! lock/visibility; while the cursor is visible the look tick is not
//! invoked at all, which is the pointer-lock gate the controller core
//! expects its caller to own.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::controller::YawBody;
use crate::player::{PlayerBody, PlayerCamera, PlayerLook};
use crate::settings::Settings;

/// `YawBody` over a body transform. Positive degrees (pointer-right) map to
/// a negative rotation about +Y in Bevy's right-handed, Y-up space.
pub struct TransformYaw<'a>(pub &'a mut Transform);

impl YawBody for TransformYaw<'_> {
    fn rotate_yaw(&mut self, degrees: f32) {
        self.0.rotate_y(-degrees.to_radians());
    }
}

/// Apply mouse-look to the player rig.
///
/// Skipped entirely while the cursor is visible (pointer lock released).
///
/// # Arguments
/// * `windows` - query for the primary window (cursor visibility gate)
/// * `motion_events` - mouse motion events for this update
/// * `bodies` - body transform and look state to update
/// * `cameras` - camera child whose local rotation receives the pitch
#[allow(clippy::needless_pass_by_value)]
pub fn player_look(
    windows: Query<&Window, With<PrimaryWindow>>,
    motion_events: Res<Events<MouseMotion>>,
    mut bodies: Query<(&mut Transform, &mut PlayerLook), With<PlayerBody>>,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<PlayerBody>)>,
) {
    // accumulate mouse delta from this update's events
    let mut delta = Vec2::ZERO;
    for ev in motion_events.iter_current_update_events() {
        delta += ev.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    if window.cursor.visible {
        return;
    }

    for (mut body_tf, mut look) in &mut bodies {
        // MouseMotion deltas are already per-frame, so no extra scale
        look.0.tick(&mut TransformYaw(&mut *body_tf), delta.x, delta.y, 1.0);

        for mut camera_tf in &mut cameras {
            camera_tf.rotation = look.0.local_rotation();
        }
    }
}

/// Toggle cursor grab and visibility.
///
/// Left-click locks and hides the cursor; the mapped pause key releases it,
/// which in turn gates `player_look` off.
///
/// # Arguments
/// * `wq` - mutable window query to change cursor state
/// * `mb` - mouse button input to detect left-click for grabbing
/// * `kb` - keyboard input to detect the pause key
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut wq: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut w) = wq.get_single_mut() else { return };

    if mb.just_pressed(MouseButton::Left) {
        w.cursor.grab_mode = CursorGrabMode::Locked;
        w.cursor.visible = false;
    }

    if kb.just_pressed(settings.keybind("pause", KeyCode::Escape)) {
        w.cursor.grab_mode = CursorGrabMode::None;
        w.cursor.visible = true;
    }
}
