//! # Gallery Engine
//!
//! Core logic for a walkable first-person art gallery: player movement with
//! axis-aligned collision resolution and gravity, and a presentation-mode
//! camera that flies into a focused orbit in front of a painting and back.
//!
//! Rendering, asset loading, audio, and UI are external collaborators. The
//! host runtime owns the frame loop and the raw input devices; this crate
//! consumes per-frame delta time and logical action edges, and mutates a
//! single shared [`camera::CameraRig`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gallery_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = GalleryScene::from_layout(&GalleryLayout::default())?;
//!     let mut viewer = GalleryViewer::new(scene, ViewerConfig::default())?;
//!
//!     viewer.set_pointer_locked(true);
//!     viewer.handle_action(Action::MoveForward, true)?;
//!     viewer.update(1.0 / 60.0)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod physics;
pub mod input;
pub mod camera;
pub mod player;
pub mod events;

mod viewer;

pub use viewer::{GalleryViewer, ViewerConfig, ViewerError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        GalleryViewer, ViewerConfig, ViewerError,
        foundation::{
            math::{Vec2, Vec3, Quat},
            time::Timer,
        },
        config::{Config, ConfigError},
        scene::{GalleryLayout, GalleryScene, Painting, PaintingInfo, PaintingKey, Wall},
        physics::collision::{CollisionVolume, RoomBounds},
        input::Action,
        camera::{CameraPose, CameraRig, presentation::PresentationConfig},
        player::MovementConfig,
        events::{ViewerEvent, ViewerEventHandler},
    };
}
