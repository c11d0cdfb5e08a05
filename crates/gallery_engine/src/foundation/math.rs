//! Math utilities and types
//!
//! Provides the fundamental math types shared by the movement and camera
//! systems. All of the heavy lifting is delegated to nalgebra.

pub use nalgebra::{Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Threshold below which a vector is treated as having no usable direction
    pub const DIRECTION_EPSILON: f32 = 1e-6;

    /// Cubic ease-out: fast start, gentle arrival
    ///
    /// Maps `t` in `[0, 1]` to `1 - (1 - t)^3`.
    pub fn ease_out_cubic(t: f32) -> f32 {
        1.0 - (1.0 - t).powi(3)
    }

    /// Project a direction onto the horizontal (XZ) plane and normalize it.
    ///
    /// Returns `None` when the flattened direction is degenerate (the input
    /// points nearly straight up or down), so callers can keep their previous
    /// heading instead of propagating NaN.
    pub fn flatten_horizontal(direction: Vec3) -> Option<Vec3> {
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        let length_squared = flat.norm_squared();
        // The comparison is written so NaN input also lands in the fallback.
        if length_squared > DIRECTION_EPSILON * DIRECTION_EPSILON {
            Some(flat / length_squared.sqrt())
        } else {
            None
        }
    }
}
