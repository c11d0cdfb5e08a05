//! Viewer coordinator
//!
//! Owns the camera rig and both camera-writing modes, and is the host's
//! single entry point: input edges, the per-frame tick, and the focus
//! trigger all come through here. The coordinator enforces the camera
//! authority invariant: exactly one of the movement resolver and the
//! presentation state machine runs in any frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::authority::{AuthorityError, AuthorityHolder, CameraAuthority};
use crate::camera::presentation::{PresentationCamera, PresentationConfig};
use crate::camera::CameraRig;
use crate::config::Config;
use crate::events::{EventQueue, ViewerEvent};
use crate::foundation::math::Vec3;
use crate::input::Action;
use crate::player::{MovementConfig, PlayerController};
use crate::scene::{GalleryScene, PaintingKey, SceneError};

/// Top-level viewer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Movement resolver tuning
    pub movement: MovementConfig,
    /// Presentation camera tuning
    pub presentation: PresentationConfig,
}

impl ViewerConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), String> {
        self.movement.validate()?;
        self.presentation.validate()?;
        Ok(())
    }
}

impl Config for ViewerConfig {}

/// The gallery viewer
///
/// Components receive only what they need by reference at call time; there
/// is no global scene access anywhere in the crate.
pub struct GalleryViewer {
    scene: GalleryScene,
    rig: CameraRig,
    player: PlayerController,
    presentation: PresentationCamera,
    authority: CameraAuthority,
    events: EventQueue,
}

impl GalleryViewer {
    /// Create a viewer over a built scene
    ///
    /// The scene must be fully constructed first; the viewer never waits for
    /// collaborators to appear.
    pub fn new(scene: GalleryScene, config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate().map_err(ViewerError::Config)?;

        let rig = CameraRig::new(scene.spawn());
        log::info!("gallery viewer ready, spawn at {:?}", scene.spawn());

        Ok(Self {
            scene,
            rig,
            player: PlayerController::new(config.movement),
            presentation: PresentationCamera::new(config.presentation),
            authority: CameraAuthority::new(),
            events: EventQueue::new(),
        })
    }

    /// Per-frame tick
    ///
    /// Exactly one camera-writing component runs, chosen by the authority
    /// holder. A non-positive or non-finite delta is a collaborator bug and
    /// fails fast rather than corrupting position state.
    pub fn update(&mut self, delta: f32) -> Result<(), ViewerError> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(ViewerError::InvalidDelta(delta));
        }

        match self.authority.holder() {
            AuthorityHolder::Player => {
                self.player.update(
                    &mut self.rig,
                    self.scene.bounds(),
                    self.scene.obstacles(),
                    delta,
                );
            }
            AuthorityHolder::Presentation => {
                self.presentation.update(&mut self.rig, delta);
            }
        }
        Ok(())
    }

    /// Apply a logical input edge
    ///
    /// While presenting, a pressed direction key or `FocusExit` ends the
    /// session; jump and sprint are ignored until movement resumes.
    pub fn handle_action(&mut self, action: Action, pressed: bool) -> Result<(), ViewerError> {
        if self.is_presenting() {
            if pressed && (action.is_direction() || action == Action::FocusExit) {
                self.exit_presentation()?;
            }
            return Ok(());
        }
        if action == Action::FocusExit {
            return Ok(());
        }
        self.player.handle_action(action, pressed);
        Ok(())
    }

    /// Focus trigger: begin presenting the given painting
    ///
    /// No-op when already presenting. Fails fast on a stale key; the caller
    /// must guarantee the painting outlives the session.
    pub fn focus_painting(&mut self, key: PaintingKey) -> Result<(), ViewerError> {
        if self.is_presenting() {
            log::debug!("focus request ignored: already presenting");
            return Ok(());
        }

        let painting = self.scene.painting(key)?;
        let center = painting.center;
        let normal = painting.facing_normal();
        let info = painting.info.clone();

        self.authority.acquire_presentation()?;
        self.presentation.enter(&self.rig, key, center, normal);
        self.player.disable();
        self.events.send(ViewerEvent::PresentationEntered(info));
        Ok(())
    }

    /// End the presentation session, restoring the pre-entry pose
    pub fn exit_presentation(&mut self) -> Result<(), ViewerError> {
        if !self.is_presenting() {
            return Ok(());
        }

        self.presentation.exit(&mut self.rig);
        self.authority.release_presentation()?;
        self.player.enable();
        self.events.send(ViewerEvent::PresentationExited);
        Ok(())
    }

    /// Mirror the host pointer-lock state into the movement resolver
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.player.set_locked(locked);
    }

    /// Whether presentation mode is active
    pub fn is_presenting(&self) -> bool {
        self.presentation.is_active()
    }

    /// Whether the player is standing on the floor
    pub fn is_grounded(&self) -> bool {
        self.player.is_grounded()
    }

    /// Current resolved head position (read-only, for HUD/debug display)
    pub fn position(&self) -> Vec3 {
        self.rig.position
    }

    /// The scene being viewed
    pub fn scene(&self) -> &GalleryScene {
        &self.scene
    }

    /// Mutable scene access (obstacles are append-only)
    pub fn scene_mut(&mut self) -> &mut GalleryScene {
        &mut self.scene
    }

    /// The camera rig
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Mutable rig access for the host's pointer-look
    ///
    /// Only orientation should be written here, and only while the player
    /// holds camera authority; position belongs to the resolver.
    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// The event queue, for handler registration and draining
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }
}

/// Viewer-level errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The host passed a non-positive or non-finite frame delta
    #[error("invalid frame delta: {0}")]
    InvalidDelta(f32),

    /// Scene lookup failure (stale painting key, bad layout)
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Camera authority invariant violation
    #[error("camera authority error: {0}")]
    Authority(#[from] AuthorityError),

    /// Configuration failed validation
    #[error("configuration error: {0}")]
    Config(String),
}
