//! Collision shapes and penetration resolution
//!
//! The player is modelled as a vertical disc of fixed radius; static
//! obstacles are axis-aligned boxes tested in the XZ plane only (obstacles
//! are treated as full-height). Box half-extents are inflated by the player
//! radius at test time, reducing disc-vs-box to point-vs-box (Minkowski sum).

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec2, Vec3};

/// Rectangular walkable interior of the room
///
/// Positions are clamped into the rectangle directly; walls are hard limits
/// and need no push-back vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    /// Minimum X of the walkable interior
    pub min_x: f32,
    /// Maximum X of the walkable interior
    pub max_x: f32,
    /// Minimum Z of the walkable interior
    pub min_z: f32,
    /// Maximum Z of the walkable interior
    pub max_z: f32,
    /// World-space Y of the floor plane
    pub floor_y: f32,
}

impl RoomBounds {
    /// Creates room bounds from the walkable rectangle and floor height
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32, floor_y: f32) -> Self {
        Self { min_x, max_x, min_z, max_z, floor_y }
    }

    /// Check that the rectangle is non-degenerate
    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x && self.min_z < self.max_z
    }

    /// Clamp a position's X and Z into the walkable rectangle
    pub fn clamp_xz(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y,
            position.z.clamp(self.min_z, self.max_z),
        )
    }

    /// Test whether a position's X and Z lie inside the walkable rectangle
    pub fn contains_xz(&self, position: Vec3) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.z >= self.min_z
            && position.z <= self.max_z
    }
}

impl Default for RoomBounds {
    /// The single-room gallery: 23 m square interior, floor at Y = 0
    fn default() -> Self {
        Self::new(-11.5, 11.5, -11.5, 11.5, 0.0)
    }
}

/// A static axis-aligned obstacle, tested in the XZ plane
///
/// Immutable after construction. The obstacle set owned by the scene may be
/// appended to during a session but entries are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionVolume {
    /// Ground-projected center of the box in world space
    pub center: Vec3,
    /// Half-extents along X and Z; the box is full-height for collision
    pub half_extents: Vec2,
}

impl CollisionVolume {
    /// Creates a collision volume from its center and XZ half-extents
    pub fn new(center: Vec3, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Creates a collision volume from a ground footprint (full width/depth)
    pub fn from_footprint(x: f32, z: f32, width: f32, depth: f32) -> Self {
        Self::new(Vec3::new(x, 0.0, z), Vec2::new(width * 0.5, depth * 0.5))
    }

    /// Test whether a disc of `radius` at `position` overlaps this box
    pub fn overlaps(&self, position: Vec3, radius: f32) -> bool {
        let dx = (position.x - self.center.x).abs();
        let dz = (position.z - self.center.z).abs();
        dx < self.half_extents.x + radius && dz < self.half_extents.y + radius
    }

    /// Minimum-translation push-back for a penetrating disc
    ///
    /// Returns the correction to add to `position` so the disc no longer
    /// overlaps, pushing along the axis of smaller overlap, signed away from
    /// the box center. Returns zero when there is no overlap.
    pub fn push_back(&self, position: Vec3, radius: f32) -> Vec3 {
        if !self.overlaps(position, radius) {
            return Vec3::zeros();
        }

        let dx = position.x - self.center.x;
        let dz = position.z - self.center.z;
        let overlap_x = (self.half_extents.x + radius) - dx.abs();
        let overlap_z = (self.half_extents.y + radius) - dz.abs();

        if overlap_x < overlap_z {
            Vec3::new(overlap_x * dx.signum(), 0.0, 0.0)
        } else {
            Vec3::new(0.0, 0.0, overlap_z * dz.signum())
        }
    }
}

/// Resolve a tentative player position against the room and all obstacles
///
/// Clamps X/Z into the room, clamps Y to the player head height, then applies
/// each volume's push-back in insertion order. Simultaneous penetrations are
/// resolved sequentially, not jointly; at high speed and low frame rate this
/// can tunnel through a shared corner of two volumes. Acceptable at gallery
/// walking speeds.
pub fn resolve_position(
    bounds: &RoomBounds,
    volumes: &[CollisionVolume],
    tentative: Vec3,
    player_height: f32,
    player_radius: f32,
) -> Vec3 {
    let mut resolved = bounds.clamp_xz(tentative);
    resolved.y = resolved.y.max(bounds.floor_y + player_height);

    for volume in volumes {
        resolved += volume.push_back(resolved, player_radius);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PLAYER_HEIGHT: f32 = 1.6;
    const PLAYER_RADIUS: f32 = 0.3;

    #[test]
    fn test_room_bounds_clamp() {
        let bounds = RoomBounds::default();
        let clamped = bounds.clamp_xz(Vec3::new(20.0, 1.6, -30.0));

        assert_relative_eq!(clamped.x, 11.5);
        assert_relative_eq!(clamped.z, -11.5);
        assert_relative_eq!(clamped.y, 1.6);
        assert!(bounds.contains_xz(clamped));
    }

    #[test]
    fn test_volume_overlap_inflated_by_radius() {
        let volume = CollisionVolume::new(Vec3::new(5.0, 0.0, 0.0), Vec2::new(1.0, 0.5));

        // Just outside the bare box but inside the inflated one.
        assert!(volume.overlaps(Vec3::new(6.2, 1.6, 0.0), PLAYER_RADIUS));
        // Outside the inflated box.
        assert!(!volume.overlaps(Vec3::new(6.4, 1.6, 0.0), PLAYER_RADIUS));
    }

    #[test]
    fn test_push_back_selects_smaller_overlap_axis() {
        let volume = CollisionVolume::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(1.0, 0.5));

        // Near the +Z face the Z overlap is the smaller one.
        let position = Vec3::new(0.1, 1.6, 0.7);
        let correction = volume.push_back(position, PLAYER_RADIUS);
        assert_relative_eq!(correction.x, 0.0);
        assert!(correction.z > 0.0);
        assert!(!volume.overlaps(position + correction, PLAYER_RADIUS));
    }

    #[test]
    fn test_push_back_signed_away_from_center() {
        let volume = CollisionVolume::new(Vec3::new(0.0, 0.0, 0.0), Vec2::new(1.0, 1.0));

        let left = volume.push_back(Vec3::new(-1.2, 1.6, 0.0), PLAYER_RADIUS);
        let right = volume.push_back(Vec3::new(1.2, 1.6, 0.0), PLAYER_RADIUS);
        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
    }

    #[test]
    fn test_resolve_fully_inside_volume() {
        // The worked example: volume at (5,0,0), half-extents (1,0.5),
        // player radius 0.3, tentative position dead center.
        let bounds = RoomBounds::default();
        let volumes = [CollisionVolume::new(Vec3::new(5.0, 0.0, 0.0), Vec2::new(1.0, 0.5))];

        let resolved = resolve_position(
            &bounds,
            &volumes,
            Vec3::new(5.0, PLAYER_HEIGHT, 0.0),
            PLAYER_HEIGHT,
            PLAYER_RADIUS,
        );

        assert!(!volumes[0].overlaps(resolved, PLAYER_RADIUS));
    }

    #[test]
    fn test_resolve_clamps_below_floor() {
        let bounds = RoomBounds::default();
        let resolved = resolve_position(
            &bounds,
            &[],
            Vec3::new(0.0, -3.0, 0.0),
            PLAYER_HEIGHT,
            PLAYER_RADIUS,
        );

        assert_relative_eq!(resolved.y, PLAYER_HEIGHT);
    }

    #[test]
    fn test_resolve_no_overlap_is_identity() {
        let bounds = RoomBounds::default();
        let volumes = [CollisionVolume::from_footprint(-3.0, 2.0, 2.0, 0.8)];
        let tentative = Vec3::new(4.0, PLAYER_HEIGHT, -4.0);

        let resolved =
            resolve_position(&bounds, &volumes, tentative, PLAYER_HEIGHT, PLAYER_RADIUS);
        assert_relative_eq!(resolved.x, tentative.x);
        assert_relative_eq!(resolved.z, tentative.z);
    }
}
