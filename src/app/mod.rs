//! Application-side scene setup.
//!
//! Kept in the binary so the library stays free of scene/asset concerns:
//! the sandbox ground plane, lighting, the player rig and the crosshair.

use bevy::prelude::*;

use orefall::controller::{FlatGroundMover, LookController, MotionIntegrator};
use orefall::player::{PlayerBody, PlayerCamera, PlayerLook, PlayerMotion, PlayerMover, EYE_HEIGHT, SPAWN_POINT};
use orefall::settings::Settings;
use orefall::ui::spawn_crosshair;

/// World-space height of the sandbox floor.
pub const FLOOR_Y: f32 = 0.0;

/// Spawn the sandbox scene: floor, reference blocks, light and the player
/// rig (body entity with a camera child).
///
/// Controller construction validates the loaded settings; a broken file is
/// reported once and the rig falls back to defaults rather than spawning a
/// rig that cannot tick.
///
/// # Arguments
/// * `commands` - `Commands` used to spawn entities
/// * `meshes` - mesh assets for the floor and reference blocks
/// * `materials` - material assets for the floor and reference blocks
/// * `settings` - loaded settings feeding the controller configs
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    // Floor
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(200.0, 200.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.3, 0.25),
            perceptual_roughness: 0.9,
            ..default()
        }),
        transform: Transform::from_xyz(0.0, FLOOR_Y, 0.0),
        ..default()
    });

    // A few reference blocks so motion is visible against the floor
    let block_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let block_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.42, 0.3),
        ..default()
    });
    for (x, z) in [(4.0, -6.0), (-5.0, -3.0), (2.0, 7.0), (-8.0, 5.0)] {
        commands.spawn(PbrBundle {
            mesh: block_mesh.clone(),
            material: block_material.clone(),
            transform: Transform::from_xyz(x, FLOOR_Y + 0.5, z),
            ..default()
        });
    }

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(
            EulerRot::YXZ,
            0.6,
            -0.9,
            0.0,
        )),
        ..default()
    });

    let motion = MotionIntegrator::new(settings.motion_config()).unwrap_or_else(|e| {
        error!("invalid movement settings: {e}; using defaults");
        MotionIntegrator::default()
    });
    let look = LookController::new(settings.look_config()).unwrap_or_else(|e| {
        error!("invalid look settings: {e}; using defaults");
        LookController::default()
    });
    let mover = FlatGroundMover::new(
        SPAWN_POINT,
        FLOOR_Y,
        settings.movement.ground_probe_distance,
    );

    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_translation(SPAWN_POINT)),
            PlayerBody,
            PlayerMotion(motion),
            PlayerLook(look),
            PlayerMover(mover),
        ))
        .with_children(|body| {
            body.spawn((
                Camera3dBundle {
                    transform: Transform::from_translation(Vec3::Y * EYE_HEIGHT),
                    ..default()
                },
                PlayerCamera,
            ));
        });

    spawn_crosshair(&mut commands);
}
