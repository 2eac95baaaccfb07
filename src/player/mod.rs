//! Player components and the per-frame systems driving the controller core.
//!
//! The controller core in [`crate::controller`] knows nothing about the ECS;
//! this module owns the wiring. The player is two entities: a body carrying
//! position and yaw, and a camera child carrying the pitch-only local
//! rotation, so the core's "yaw lives on the body" contract maps directly
//! onto the transform hierarchy.
//!
//! # Example:
//!
//! ```ignore
//! // spawn the rig
//! commands
//!     .spawn((
//!         SpatialBundle::from_transform(Transform::from_translation(SPAWN_POINT)),
//!         PlayerBody,
//!         PlayerMotion(MotionIntegrator::default()),
//!         PlayerLook(LookController::default()),
//!         PlayerMover(FlatGroundMover::new(SPAWN_POINT, 0.0, 0.2)),
//!     ))
//!     .with_children(|body| {
//!         body.spawn((Camera3dBundle::default(), PlayerCamera));
//!     });
//! // register systems
//! app.add_systems(Update, (player_look, player_motion, cursor_grab));
//! ```
pub mod camera;
pub mod movement;

use bevy::prelude::*;

pub use camera::*;
pub use movement::*;

use crate::controller::{FlatGroundMover, LookController, MotionIntegrator};

/// Where the body respawns, feet position.
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 2.0, 0.0);

/// Camera offset above the feet.
pub const EYE_HEIGHT: f32 = 1.6;

/// Marker for the body entity (position + yaw).
#[derive(Component)]
pub struct PlayerBody;

/// Marker for the camera child entity (pitch-only local rotation).
#[derive(Component)]
pub struct PlayerCamera;

/// Movement state for the body.
#[derive(Component)]
pub struct PlayerMotion(pub MotionIntegrator);

/// Mouse-look state for the body's camera.
#[derive(Component)]
pub struct PlayerLook(pub LookController);

/// Collision mover owning the body's authoritative feet position.
#[derive(Component)]
pub struct PlayerMover(pub FlatGroundMover);
