//! User interface helpers: debug overlay, crosshair and probe gizmo.
//!
//! The overlay periodically displays FPS, frame time, player position,
//! facing, grounded state, vertical velocity and pitch. The ground-probe
//! gizmo visualizes the mover's probe geometry; it is a pure observer of
//! the controller core's public accessors, the core knows nothing about
//! rendering.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore};
use bevy::prelude::*;

use crate::player::{PlayerBody, PlayerLook, PlayerMotion, PlayerMover};
use crate::settings::Settings;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct ProbeGizmoVisible(pub bool);

#[derive(Component)]
pub struct DebugOverlayText;

/// Insert debug overlay resources into the `Commands` world.
///
/// # Arguments
/// * `commands` - `Commands` to insert resources (timer, state, probe visibility)
pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(
        0.5,
        TimerMode::Repeating,
    )));
    commands.insert_resource(DebugOverlayState::default());
    commands.insert_resource(ProbeGizmoVisible::default());
}

/// Toggle the debug overlay visibility with the mapped key (default F1).
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.keybind("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Toggle the ground-probe gizmo with the mapped key (default F2).
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_probe_gizmo(
    mut probe: ResMut<ProbeGizmoVisible>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.keybind("toggle_probe", KeyCode::F2)) {
        probe.0 = !probe.0;
    }
}

/// System parameters for the overlay update, grouped for a readable
/// function signature.
#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub player_query: Query<
        'w,
        's,
        (
            &'static Transform,
            &'static PlayerMotion,
            &'static PlayerLook,
        ),
        With<PlayerBody>,
    >,
}

/// Update the debug overlay text once every interval.
///
/// The overlay refreshes at a fixed interval to avoid querying diagnostics
/// every frame.
///
/// # Arguments
/// * `ctx` - system parameters grouped into a context struct
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else { return };

    if !ctx.state.visible {
        text.sections[0].value = String::new();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let frame_time = ctx
        .diagnostics
        .get(&bevy::diagnostic::FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let body = if let Ok((transform, motion, look)) = ctx.player_query.get_single() {
        let pos = transform.translation;

        // Compass direction from the body's forward vector
        let forward = transform.forward();
        let angle = forward.x.atan2(forward.z).to_degrees();
        let compass = if (-22.5..22.5).contains(&angle) {
            "E →"
        } else if (22.5..67.5).contains(&angle) {
            "SE ↘"
        } else if (67.5..112.5).contains(&angle) {
            "S ↓"
        } else if (112.5..157.5).contains(&angle) {
            "SW ↙"
        } else if !(-157.5..157.5).contains(&angle) {
            "W ←"
        } else if (-157.5..-112.5).contains(&angle) {
            "NW ↖"
        } else if (-112.5..-67.5).contains(&angle) {
            "N ↑"
        } else {
            "NE ↗"
        };

        format!(
            "Pos: ({:.1}, {:.1}, {:.1})\nFacing: {} | Pitch: {:.1}°\nGrounded: {} | V-vel: {:.2}",
            pos.x,
            pos.y,
            pos.z,
            compass,
            look.0.pitch_degrees(),
            motion.0.grounded(),
            motion.0.vertical_velocity(),
        )
    } else {
        "Pos: N/A".to_string()
    };

    text.sections[0].value = format!(
        "FPS: {:.1}\nFrame Time: {:.2} ms\n{}",
        fps,
        frame_time * 1000.0,
        body
    );
}

/// Spawn the overlay text element.
///
/// Uses the engine's built-in font; the repo ships no font assets.
///
/// # Arguments
/// * `commands` - `Commands` for spawning the UI node
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

/// Draw the mover's ground probe under the body.
///
/// A vertical line spans the probe reach below the feet: green while the
/// probe reports contact, red while airborne, with a small cross marking
/// the probe's end.
///
/// # Arguments
/// * `probe` - `ProbeGizmoVisible` resource controlling whether to draw
/// * `gizmos` - gizmo drawing context
/// * `query` - body transform plus motion and mover state to visualize
#[allow(clippy::needless_pass_by_value)]
pub fn draw_ground_probe(
    probe: Res<ProbeGizmoVisible>,
    mut gizmos: Gizmos,
    query: Query<(&Transform, &PlayerMotion, &PlayerMover), With<PlayerBody>>,
) {
    if !probe.0 {
        return;
    }

    const CROSS_HALF: f32 = 0.15;

    for (transform, motion, mover) in &query {
        let color = if motion.0.grounded() {
            Color::srgb(0.0, 1.0, 0.0)
        } else {
            Color::srgb(1.0, 0.2, 0.2)
        };

        let feet = transform.translation;
        let probe_end = feet - Vec3::Y * mover.0.probe_distance;

        gizmos.line(feet, probe_end, color);
        gizmos.line(
            probe_end - Vec3::X * CROSS_HALF,
            probe_end + Vec3::X * CROSS_HALF,
            color,
        );
        gizmos.line(
            probe_end - Vec3::Z * CROSS_HALF,
            probe_end + Vec3::Z * CROSS_HALF,
            color,
        );
    }
}

/// Spawn a crosshair UI element centered on the screen.
///
/// # Arguments
/// * `commands` - mutable `Commands` used to spawn UI nodes
pub fn spawn_crosshair(commands: &mut Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(20.0),
                    height: Val::Px(2.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
            p.spawn(NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    width: Val::Px(2.0),
                    height: Val::Px(20.0),
                    ..default()
                },
                background_color: Color::WHITE.into(),
                ..default()
            });
        });
}
