//! Collision primitives for the walkable gallery interior

pub mod collision;

pub use collision::{CollisionVolume, RoomBounds};
