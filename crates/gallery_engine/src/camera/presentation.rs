//! Presentation-mode camera state machine
//!
//! Flies the camera from wherever the player stands into a fixed pose in
//! front of a focused painting, then holds a slow idle orbit until the player
//! backs out. Entry is a timed cubic ease-out; exit is an instantaneous
//! snap-restore of the pre-entry pose. The asymmetry matches the shipped
//! behavior and is kept deliberately.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraPose, CameraRig};
use crate::foundation::math::{utils, Vec3};
use crate::scene::PaintingKey;

/// Presentation camera tuning parameters
///
/// The idle-orbit amplitudes and frequencies are deliberately all different
/// so the combined motion never visibly repeats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Duration of the fly-in transition, in seconds
    pub animation_duration: f32,
    /// Viewing distance from the canvas along its facing normal
    pub base_distance: f32,
    /// How far below the canvas center the camera settles (keeps the
    /// painting high in frame)
    pub camera_drop: f32,
    /// How far below the canvas center the camera aims (same intent as
    /// `camera_drop`, applied to the look target)
    pub look_drop: f32,
    /// Radius of the idle orbit circle
    pub orbit_radius: f32,
    /// Angular speed of the idle orbit, radians per second
    pub orbit_speed: f32,
    /// Amplitude of the vertical bob
    pub bob_amplitude: f32,
    /// Frequency of the vertical bob, radians per second
    pub bob_frequency: f32,
    /// Amplitude of the toward/away breathing motion
    pub breathe_amplitude: f32,
    /// Frequency of the breathing motion, radians per second
    pub breathe_frequency: f32,
    /// Amplitude of the vertical look-target wobble
    pub look_wobble_amplitude: f32,
    /// Frequency of the look-target wobble, radians per second
    pub look_wobble_frequency: f32,
    /// Amplitude of the roll oscillation, radians
    pub roll_amplitude: f32,
    /// Frequency of the roll oscillation, radians per second
    pub roll_frequency: f32,
}

impl PresentationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.animation_duration <= 0.0 {
            return Err("animation duration must be positive".to_string());
        }
        if self.base_distance <= 0.0 {
            return Err("base distance must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            animation_duration: 1.5,
            base_distance: 3.5,
            camera_drop: 0.4,
            look_drop: 0.3,
            orbit_radius: 0.4,
            orbit_speed: 0.3,
            bob_amplitude: 0.1,
            bob_frequency: 0.6,
            breathe_amplitude: 0.15,
            breathe_frequency: 0.4,
            look_wobble_amplitude: 0.03,
            look_wobble_frequency: 0.3,
            roll_amplitude: 0.01,
            roll_frequency: 0.2,
        }
    }
}

/// Phase of the presentation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationPhase {
    /// Not presenting; the player owns the camera
    Inactive,
    /// Easing from the snapshot pose toward the viewing pose
    Entering,
    /// Transition complete; perpetual idle orbit
    Orbiting,
}

/// The presentation-mode camera
///
/// Owns the snapshot of the player's pose and the focus geometry. The viewer
/// coordinator guarantees this only runs while it holds camera authority.
#[derive(Debug)]
pub struct PresentationCamera {
    config: PresentationConfig,
    phase: PresentationPhase,
    target: Option<PaintingKey>,
    original_pose: CameraPose,
    original_forward: Vec3,
    target_position: Vec3,
    focus_center: Vec3,
    focus_normal: Vec3,
    progress: f32,
    elapsed: f32,
}

impl PresentationCamera {
    /// Create an inactive presentation camera
    pub fn new(config: PresentationConfig) -> Self {
        Self {
            config,
            phase: PresentationPhase::Inactive,
            target: None,
            original_pose: CameraPose {
                position: Vec3::zeros(),
                orientation: crate::foundation::math::Quat::identity(),
            },
            original_forward: Vec3::new(0.0, 0.0, -1.0),
            target_position: Vec3::zeros(),
            focus_center: Vec3::zeros(),
            focus_normal: Vec3::new(0.0, 0.0, 1.0),
            progress: 0.0,
            elapsed: 0.0,
        }
    }

    /// Whether a presentation session is active
    pub fn is_active(&self) -> bool {
        self.phase != PresentationPhase::Inactive
    }

    /// Current phase
    pub fn phase(&self) -> PresentationPhase {
        self.phase
    }

    /// Fly-in progress in `[0, 1]`; monotone non-decreasing while entering
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The focused painting, if any
    pub fn target(&self) -> Option<PaintingKey> {
        self.target
    }

    /// Begin presenting a painting
    ///
    /// Snapshots the current camera pose, computes the viewing pose from the
    /// canvas center and its room-facing normal, and starts the fly-in. No-op
    /// when already active. Does not mutate the rig; the first `update` does.
    pub fn enter(&mut self, rig: &CameraRig, key: PaintingKey, center: Vec3, normal: Vec3) {
        if self.is_active() {
            log::debug!("presentation enter ignored: already active");
            return;
        }

        self.original_pose = rig.pose();
        self.original_forward = rig.forward();
        self.focus_center = center;
        self.focus_normal = normal;

        self.target_position = center + normal * self.config.base_distance;
        self.target_position.y = center.y - self.config.camera_drop;

        self.progress = 0.0;
        self.elapsed = 0.0;
        self.target = Some(key);
        self.phase = PresentationPhase::Entering;

        log::info!(
            "presentation entered: focus at {:?}, viewing from {:?}",
            center,
            self.target_position
        );
    }

    /// Advance the state machine by one frame
    ///
    /// `delta` has been validated positive and finite by the coordinator.
    pub fn update(&mut self, rig: &mut CameraRig, delta: f32) {
        if !self.is_active() {
            return;
        }

        self.elapsed += delta;

        if self.phase == PresentationPhase::Entering {
            self.progress = (self.progress + delta / self.config.animation_duration).min(1.0);
            let eased = utils::ease_out_cubic(self.progress);

            rig.position = self.original_pose.position.lerp(&self.target_position, eased);

            // Blend look *directions*, not rotations: interpolating between
            // two arbitrary orientations can swing wide, while the blended
            // direction pans naturally onto the canvas.
            let look_target = self.look_point();
            let to_focus = look_target - rig.position;
            if to_focus.norm_squared() > utils::DIRECTION_EPSILON * utils::DIRECTION_EPSILON {
                let target_dir = to_focus.normalize();
                let blended = self.original_forward.lerp(&target_dir, eased);
                rig.look_along(blended);
            }

            if self.progress >= 1.0 {
                self.phase = PresentationPhase::Orbiting;
            }
        } else {
            self.update_orbit(rig);
        }
    }

    /// End the session, restoring the pre-entry pose verbatim
    ///
    /// Exit is a snap, not an animation. No-op when inactive.
    pub fn exit(&mut self, rig: &mut CameraRig) {
        if !self.is_active() {
            log::debug!("presentation exit ignored: not active");
            return;
        }

        rig.set_pose(self.original_pose);
        self.phase = PresentationPhase::Inactive;
        self.target = None;
        log::info!("presentation exited, camera pose restored");
    }

    /// The point the camera aims at, slightly below the canvas center
    fn look_point(&self) -> Vec3 {
        self.focus_center - Vec3::new(0.0, self.config.look_drop, 0.0)
    }

    /// Perpetual idle motion around the viewing pose
    ///
    /// A slow circle in the plane of the canvas, a vertical bob, and a
    /// toward/away breathing motion, each on its own frequency, plus a look
    /// wobble and a roll sway.
    fn update_orbit(&mut self, rig: &mut CameraRig) {
        let cfg = &self.config;
        let t = self.elapsed;
        let up = Vec3::y();

        let right = {
            let r = self.focus_normal.cross(&up);
            if r.norm_squared() > utils::DIRECTION_EPSILON * utils::DIRECTION_EPSILON {
                r.normalize()
            } else {
                Vec3::x()
            }
        };

        let angle = t * cfg.orbit_speed;
        let mut position = self.target_position
            + right * (angle.cos() * cfg.orbit_radius)
            + up * (angle.sin() * cfg.orbit_radius)
            + up * ((t * cfg.bob_frequency).sin() * cfg.bob_amplitude);

        let radial = position - self.focus_center;
        if radial.norm_squared() > utils::DIRECTION_EPSILON * utils::DIRECTION_EPSILON {
            position += radial.normalize() * ((t * cfg.breathe_frequency).sin() * cfg.breathe_amplitude);
        }
        rig.position = position;

        let mut look_target = self.look_point();
        look_target.y += (t * cfg.look_wobble_frequency).sin() * cfg.look_wobble_amplitude;
        rig.look_at(look_target);

        rig.roll_by((t * cfg.roll_frequency).sin() * cfg.roll_amplitude);
    }
}
