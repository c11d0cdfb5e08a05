//! Gallery scene description
//!
//! Holds everything the core reads about the room: the walkable bounds, the
//! static obstacle volumes, and the painting registry. Meshes, materials and
//! lights live entirely in the host renderer; a [`Painting`] here is only the
//! geometry anchor and metadata the camera and HUD need.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::physics::collision::{CollisionVolume, RoomBounds};

slotmap::new_key_type! {
    /// Handle to a painting in the scene registry
    ///
    /// Keys are lookup-only: holding one confers no ownership, and a key can
    /// go stale only if the scene itself is rebuilt.
    pub struct PaintingKey;
}

/// The wall a painting hangs on
///
/// Determines which side of the canvas faces the room interior, which the
/// presentation camera uses as its approach direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    /// Wall at minimum Z; paintings face +Z
    North,
    /// Wall at maximum Z; paintings face -Z
    South,
    /// Wall at minimum X; paintings face +X
    West,
    /// Wall at maximum X; paintings face -X
    East,
}

impl Wall {
    /// Unit normal pointing from the wall into the room interior
    pub fn facing_normal(self) -> Vec3 {
        match self {
            Self::North => Vec3::new(0.0, 0.0, 1.0),
            Self::South => Vec3::new(0.0, 0.0, -1.0),
            Self::West => Vec3::new(1.0, 0.0, 0.0),
            Self::East => Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}

/// Metadata shown by the HUD while a painting is focused
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaintingInfo {
    /// Display title
    pub title: String,
    /// Name of the image model that generated the piece
    pub ai_model: String,
    /// Generation prompt, shown as the caption
    pub prompt: String,
}

/// A hung painting: geometry anchor plus HUD metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Painting {
    /// World-space center of the canvas
    pub center: Vec3,
    /// Wall the painting hangs on
    pub wall: Wall,
    /// HUD metadata
    pub info: PaintingInfo,
}

impl Painting {
    /// Unit normal pointing from the canvas into the room
    pub fn facing_normal(&self) -> Vec3 {
        self.wall.facing_normal()
    }
}

/// Serializable gallery layout
///
/// The data the host scene-builder also consumes; the core only needs the
/// collision footprints and painting anchors. Loadable from RON via
/// [`crate::config::Config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryLayout {
    /// Walkable interior of the room
    pub bounds: RoomBounds,
    /// Player spawn position (head height)
    pub spawn: Vec3,
    /// Static obstacle volumes (benches, the easel base)
    pub obstacles: Vec<CollisionVolume>,
    /// Paintings hung in the room
    pub paintings: Vec<Painting>,
}

impl Default for GalleryLayout {
    /// The single-room gallery the demo ships: two benches flanking the
    /// center aisle and one painting on each long wall.
    fn default() -> Self {
        Self {
            bounds: RoomBounds::default(),
            spawn: Vec3::new(0.0, 1.6, 5.0),
            obstacles: vec![
                CollisionVolume::from_footprint(-3.0, 2.0, 2.0, 0.8),
                CollisionVolume::from_footprint(3.0, 2.0, 2.0, 0.8),
            ],
            paintings: vec![
                Painting {
                    center: Vec3::new(-4.0, 2.2, -11.8),
                    wall: Wall::North,
                    info: PaintingInfo {
                        title: "Dusk Over Still Water".to_string(),
                        ai_model: "Latent Diffusion v2".to_string(),
                        prompt: "an impressionist lake at dusk, oil on canvas".to_string(),
                    },
                },
                Painting {
                    center: Vec3::new(4.0, 2.2, 11.8),
                    wall: Wall::South,
                    info: PaintingInfo {
                        title: "Orchard in Winter".to_string(),
                        ai_model: "Latent Diffusion v2".to_string(),
                        prompt: "bare fruit trees under snow, muted palette".to_string(),
                    },
                },
            ],
        }
    }
}

impl crate::config::Config for GalleryLayout {}

/// The constructed scene the viewer reads each frame
#[derive(Debug)]
pub struct GalleryScene {
    bounds: RoomBounds,
    spawn: Vec3,
    obstacles: Vec<CollisionVolume>,
    paintings: SlotMap<PaintingKey, Painting>,
}

impl GalleryScene {
    /// Build a scene from a validated layout
    pub fn from_layout(layout: &GalleryLayout) -> Result<Self, SceneError> {
        if !layout.bounds.is_valid() {
            return Err(SceneError::InvalidLayout(
                "room bounds rectangle is degenerate".to_string(),
            ));
        }
        if !layout.bounds.contains_xz(layout.spawn) {
            return Err(SceneError::InvalidLayout(
                "spawn position lies outside the room bounds".to_string(),
            ));
        }

        let mut paintings = SlotMap::with_key();
        for painting in &layout.paintings {
            paintings.insert(painting.clone());
        }

        log::info!(
            "gallery scene built: {} paintings, {} obstacle volumes",
            paintings.len(),
            layout.obstacles.len()
        );

        Ok(Self {
            bounds: layout.bounds,
            spawn: layout.spawn,
            obstacles: layout.obstacles.clone(),
            paintings,
        })
    }

    /// Walkable room bounds
    pub fn bounds(&self) -> &RoomBounds {
        &self.bounds
    }

    /// Player spawn position
    pub fn spawn(&self) -> Vec3 {
        self.spawn
    }

    /// Static obstacle volumes, in insertion order
    pub fn obstacles(&self) -> &[CollisionVolume] {
        &self.obstacles
    }

    /// Append an obstacle volume
    ///
    /// The obstacle set is append-only; volumes are never removed during a
    /// session.
    pub fn add_obstacle(&mut self, volume: CollisionVolume) {
        self.obstacles.push(volume);
    }

    /// Look up a painting by key
    pub fn painting(&self, key: PaintingKey) -> Result<&Painting, SceneError> {
        self.paintings.get(key).ok_or(SceneError::PaintingNotFound)
    }

    /// Iterate over all paintings with their keys
    pub fn paintings(&self) -> impl Iterator<Item = (PaintingKey, &Painting)> {
        self.paintings.iter()
    }

    /// Hang a new painting, returning its key
    pub fn add_painting(&mut self, painting: Painting) -> PaintingKey {
        self.paintings.insert(painting)
    }
}

/// Scene construction and lookup errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// A painting key did not resolve; the caller must guarantee target
    /// lifetime spans the presentation session
    #[error("painting not found in scene registry")]
    PaintingNotFound,

    /// Layout failed validation
    #[error("invalid gallery layout: {0}")]
    InvalidLayout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wall_normals_point_into_room() {
        // A painting on the north wall (negative Z) faces positive Z.
        assert_relative_eq!(Wall::North.facing_normal().z, 1.0);
        assert_relative_eq!(Wall::South.facing_normal().z, -1.0);
        assert_relative_eq!(Wall::West.facing_normal().x, 1.0);
        assert_relative_eq!(Wall::East.facing_normal().x, -1.0);
    }

    #[test]
    fn test_default_layout_builds() {
        let scene = GalleryScene::from_layout(&GalleryLayout::default()).unwrap();
        assert_eq!(scene.paintings().count(), 2);
        assert_eq!(scene.obstacles().len(), 2);
        assert!(scene.bounds().contains_xz(scene.spawn()));
    }

    #[test]
    fn test_spawn_outside_bounds_is_rejected() {
        let layout = GalleryLayout {
            spawn: Vec3::new(50.0, 1.6, 0.0),
            ..GalleryLayout::default()
        };
        assert!(matches!(
            GalleryScene::from_layout(&layout),
            Err(SceneError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_stale_key_fails_lookup() {
        let populated = GalleryScene::from_layout(&GalleryLayout::default()).unwrap();
        let key = populated.paintings().next().unwrap().0;

        // Keys do not transfer across rebuilt registries.
        let empty = GalleryScene::from_layout(&GalleryLayout {
            paintings: Vec::new(),
            ..GalleryLayout::default()
        })
        .unwrap();
        assert!(matches!(
            empty.painting(key),
            Err(SceneError::PaintingNotFound)
        ));
    }

    #[test]
    fn test_obstacles_are_append_only() {
        let mut scene = GalleryScene::from_layout(&GalleryLayout::default()).unwrap();
        let before = scene.obstacles().len();

        scene.add_obstacle(CollisionVolume::from_footprint(0.0, -5.0, 1.0, 1.0));
        assert_eq!(scene.obstacles().len(), before + 1);
    }
}
