//! The collision-aware mover seam.
//!
//! [`MotionIntegrator`](crate::controller::MotionIntegrator) treats
//! collision resolution as an opaque external collaborator: it asks whether
//! the body is grounded and requests displacements, nothing more. The real
//! game will plug the voxel world in here; the sandbox scene, benches and
//! tests use [`FlatGroundMover`].

use bevy::math::Vec3;

/// Authoritative, collision-aware displacement.
///
/// `move_by` must perform whatever sweep/discrete resolution the backing
/// world needs and return the displacement actually achieved.
pub trait Mover {
    /// Whether the body currently has ground contact within probe range.
    fn is_grounded(&self) -> bool;

    /// Displace the body, resolving collisions; returns the achieved
    /// displacement (equal to `delta` when nothing was hit).
    fn move_by(&mut self, delta: Vec3) -> Vec3;
}

/// Kinematic point above an infinite floor plane.
///
/// `position` is the body's feet. Downward motion is clamped at the floor;
/// nothing blocks horizontal or upward motion. Ground contact is probed
/// below the feet but denied while the body is ascending, so the first
/// frames of a jump never read as grounded and a held probe distance cannot
/// refresh a jump mid-ascent.
#[derive(Debug, Clone)]
pub struct FlatGroundMover {
    /// Feet position of the controlled body.
    pub position: Vec3,
    /// World-space height of the floor plane.
    pub floor_y: f32,
    /// Ground contact is reported while the feet are within this distance
    /// above the floor.
    pub probe_distance: f32,
    // true between an upward vertical move and the next downward one
    ascending: bool,
}

impl FlatGroundMover {
    #[must_use]
    pub fn new(position: Vec3, floor_y: f32, probe_distance: f32) -> Self {
        Self { position, floor_y, probe_distance, ascending: false }
    }
}

impl Mover for FlatGroundMover {
    fn is_grounded(&self) -> bool {
        !self.ascending && self.position.y - self.floor_y <= self.probe_distance
    }

    fn move_by(&mut self, delta: Vec3) -> Vec3 {
        let before = self.position;
        self.position += delta;
        if self.position.y < self.floor_y {
            self.position.y = self.floor_y;
        }
        // vertical moves update the ascent flag; horizontal-only moves
        // leave it alone
        if delta.y > 0.0 {
            self.ascending = true;
        } else if delta.y < 0.0 {
            self.ascending = false;
        }
        self.position - before
    }
}
