//! First-person camera rig
//!
//! The rig is the single shared mutable resource of the viewer: the movement
//! resolver writes its position, the presentation state machine writes both
//! position and orientation, and the host's pointer-look writes orientation.
//! Which writer is allowed in a given frame is decided by
//! [`authority::CameraAuthority`].

pub mod authority;
pub mod presentation;

use crate::foundation::math::{utils, Quat, Vec3};

/// Snapshot of a camera transform
///
/// Orientation is kept as a quaternion so a restored pose is bit-equal to the
/// captured one; round-tripping through Euler angles near the poles is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// World-space position
    pub position: Vec3,
    /// World-space orientation
    pub orientation: Quat,
}

/// Mutable first-person camera transform
///
/// Uses a Y-up right-handed world. The local +Z axis is the view direction,
/// so `forward()` is `orientation * +Z`.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Head position in world space
    pub position: Vec3,
    orientation: Quat,
}

impl CameraRig {
    /// Create a rig at the given position with identity orientation
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::identity(),
        }
    }

    /// Current world-space orientation
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Overwrite the orientation directly
    ///
    /// Used by the host's pointer-look while the player holds camera
    /// authority.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::z()
    }

    /// Orient the rig to look at a world-space point
    ///
    /// Degenerate targets (coincident with the rig position) leave the
    /// orientation unchanged rather than producing NaN.
    pub fn look_at(&mut self, target: Vec3) {
        self.look_along(target - self.position);
    }

    /// Orient the rig along a world-space direction (Y-up)
    ///
    /// Directions collinear with the up axis have no well-defined yaw and are
    /// ignored; hosts clamp pitch short of vertical anyway.
    pub fn look_along(&mut self, direction: Vec3) {
        let eps = utils::DIRECTION_EPSILON * utils::DIRECTION_EPSILON;
        if direction.norm_squared() < eps || direction.cross(&Vec3::y()).norm_squared() < eps {
            log::trace!("look_along ignored degenerate direction {:?}", direction);
            return;
        }
        self.orientation = Quat::face_towards(&direction, &Vec3::y());
    }

    /// Apply a roll rotation about the current view direction
    pub fn roll_by(&mut self, angle: f32) {
        self.orientation *= Quat::from_axis_angle(&Vec3::z_axis(), angle);
    }

    /// Capture the current pose
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            orientation: self.orientation,
        }
    }

    /// Restore a previously captured pose verbatim
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
    }
}
