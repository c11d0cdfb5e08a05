//! First-person movement and collision resolver
//!
//! Consumes the held action set and per-frame delta time, and writes a
//! collision-corrected head position into the camera rig. Horizontal motion
//! is instantaneous (no inertia); vertical motion integrates gravity with a
//! projectile-exact jump impulse.

use serde::{Deserialize, Serialize};

use crate::camera::CameraRig;
use crate::foundation::math::{utils, Vec3};
use crate::input::{Action, ActionSet, ActionState};
use crate::physics::collision::{self, CollisionVolume, RoomBounds};

/// Movement tuning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Walking speed in units per second
    pub walk_speed: f32,
    /// Sprinting speed in units per second
    pub sprint_speed: f32,
    /// Jump apex height above the floor, in units
    pub jump_height: f32,
    /// Gravitational acceleration in units per second squared (negative)
    pub gravity: f32,
    /// Head height above the floor while standing
    pub player_height: f32,
    /// Horizontal collision radius of the player disc
    pub player_radius: f32,
}

impl MovementConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.walk_speed <= 0.0 || self.sprint_speed <= 0.0 {
            return Err("movement speeds must be positive".to_string());
        }
        if self.gravity >= 0.0 {
            return Err("gravity must be negative".to_string());
        }
        if self.jump_height < 0.0 {
            return Err("jump height must not be negative".to_string());
        }
        if self.player_height <= 0.0 || self.player_radius <= 0.0 {
            return Err("player dimensions must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 8.0,
            jump_height: 0.3,
            gravity: -15.0,
            player_height: 1.6,
            player_radius: 0.3,
        }
    }
}

/// The movement resolver
///
/// Owns the player's velocity, ground contact, and key state. `locked`
/// mirrors the host's pointer-lock; `disabled` is the temporary suspension
/// used while presentation mode or a UI dialog owns input.
#[derive(Debug)]
pub struct PlayerController {
    config: MovementConfig,
    velocity: Vec3,
    on_ground: bool,
    locked: bool,
    disabled: bool,
    actions: ActionState,
    // Last valid horizontal view direction; fallback when the camera looks
    // straight up or down and the flattened forward degenerates.
    heading: Vec3,
}

impl PlayerController {
    /// Create a resolver with the given tuning
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            velocity: Vec3::zeros(),
            on_ground: true,
            locked: false,
            disabled: false,
            actions: ActionState::new(),
            heading: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Movement tuning in use
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Whether the player is standing on the floor
    pub fn is_grounded(&self) -> bool {
        self.on_ground
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Whether movement input is currently authoritative
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Mirror the host pointer-lock state
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Whether the resolver is temporarily suspended
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Suspend updates and forcibly release all keys
    ///
    /// Clearing the key state here prevents stuck-key artifacts when input
    /// focus is regained later. `locked` is untouched.
    pub fn disable(&mut self) {
        self.disabled = true;
        self.actions.clear();
    }

    /// Resume updates after [`disable`](Self::disable)
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Apply a key edge
    ///
    /// Key-downs are dropped while unlocked or disabled so keys pressed
    /// during a dialog cannot leak into movement; key-ups are always applied.
    pub fn handle_action(&mut self, action: Action, pressed: bool) {
        if pressed && (!self.locked || self.disabled) {
            return;
        }
        self.actions.apply(action, pressed);
    }

    /// Per-frame movement update
    ///
    /// No-op unless locked and not disabled. `delta` has been validated
    /// positive and finite by the coordinator.
    pub fn update(
        &mut self,
        rig: &mut CameraRig,
        bounds: &RoomBounds,
        obstacles: &[CollisionVolume],
        delta: f32,
    ) {
        if !self.locked || self.disabled {
            return;
        }

        let speed = if self.actions.is_pressed(ActionSet::SPRINT) {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        };

        // Re-project intent through the camera's yaw only; pitch must not
        // affect speed or direction.
        if let Some(flat_forward) = utils::flatten_horizontal(rig.forward()) {
            self.heading = flat_forward;
        }
        let forward = self.heading;
        let right = forward.cross(&Vec3::y());

        let mut wish = Vec3::zeros();
        if self.actions.is_pressed(ActionSet::FORWARD) {
            wish += forward;
        }
        if self.actions.is_pressed(ActionSet::BACKWARD) {
            wish -= forward;
        }
        if self.actions.is_pressed(ActionSet::LEFT) {
            wish -= right;
        }
        if self.actions.is_pressed(ActionSet::RIGHT) {
            wish += right;
        }

        // Normalize so diagonal movement is not faster than axial.
        if wish.norm_squared() > utils::DIRECTION_EPSILON * utils::DIRECTION_EPSILON {
            wish = wish.normalize() * speed;
        }
        self.velocity.x = wish.x;
        self.velocity.z = wish.z;

        // Projectile-exact impulse: apex height matches jump_height for any
        // gravity constant.
        if self.actions.is_pressed(ActionSet::JUMP) && self.on_ground {
            self.velocity.y = (2.0 * self.config.gravity.abs() * self.config.jump_height).sqrt();
            self.on_ground = false;
        }

        self.velocity.y += self.config.gravity * delta;

        let tentative = rig.position + self.velocity * delta;
        let mut resolved = collision::resolve_position(
            bounds,
            obstacles,
            tentative,
            self.config.player_height,
            self.config.player_radius,
        );

        let standing_y = bounds.floor_y + self.config.player_height;
        if resolved.y <= standing_y {
            resolved.y = standing_y;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }

        rig.position = resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (PlayerController, CameraRig, RoomBounds) {
        let mut player = PlayerController::new(MovementConfig::default());
        player.set_locked(true);
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.6, 5.0));
        rig.look_at(Vec3::new(0.0, 1.6, -5.0));
        (player, rig, RoomBounds::default())
    }

    fn horizontal_speed(v: Vec3) -> f32 {
        (v.x * v.x + v.z * v.z).sqrt()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(MovementConfig::default().validate().is_ok());
    }

    #[test]
    fn test_no_input_no_horizontal_motion() {
        let (mut player, mut rig, bounds) = setup();
        let start = rig.position;

        player.update(&mut rig, &bounds, &[], DT);
        assert_relative_eq!(rig.position.x, start.x);
        assert_relative_eq!(rig.position.z, start.z);
    }

    #[test]
    fn test_diagonal_speed_never_exceeds_sprint() {
        // Every held combination of direction keys, walking and sprinting.
        for mask in 0u8..16 {
            for sprint in [false, true] {
                let (mut player, mut rig, bounds) = setup();
                player.handle_action(Action::MoveForward, mask & 1 != 0);
                player.handle_action(Action::MoveBackward, mask & 2 != 0);
                player.handle_action(Action::MoveLeft, mask & 4 != 0);
                player.handle_action(Action::MoveRight, mask & 8 != 0);
                player.handle_action(Action::Sprint, sprint);

                player.update(&mut rig, &bounds, &[], DT);

                let cap = MovementConfig::default().sprint_speed;
                assert!(
                    horizontal_speed(player.velocity()) <= cap + 1e-4,
                    "speed cap exceeded for mask {mask:#06b}, sprint {sprint}"
                );
            }
        }
    }

    #[test]
    fn test_walk_speed_when_not_sprinting() {
        let (mut player, mut rig, bounds) = setup();
        player.handle_action(Action::MoveForward, true);

        player.update(&mut rig, &bounds, &[], DT);
        assert_relative_eq!(
            horizontal_speed(player.velocity()),
            MovementConfig::default().walk_speed,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_jump_apex_matches_configured_height() {
        // Apex must equal jump_height regardless of the gravity constant.
        for gravity in [-9.81, -15.0, -30.0] {
            let config = MovementConfig {
                gravity,
                ..MovementConfig::default()
            };
            let mut player = PlayerController::new(config);
            player.set_locked(true);
            let mut rig = CameraRig::new(Vec3::new(0.0, config.player_height, 0.0));
            let bounds = RoomBounds::default();

            player.handle_action(Action::Jump, true);
            player.update(&mut rig, &bounds, &[], DT);
            player.handle_action(Action::Jump, false);

            let mut apex = rig.position.y;
            for _ in 0..600 {
                player.update(&mut rig, &bounds, &[], DT);
                apex = apex.max(rig.position.y);
                if player.is_grounded() {
                    break;
                }
            }

            let measured = apex - config.player_height;
            // Discrete integration overshoots by at most one frame of travel.
            assert!(
                (measured - config.jump_height).abs() < 0.05,
                "apex {measured} for gravity {gravity}"
            );
            assert!(player.is_grounded());
        }
    }

    #[test]
    fn test_position_stays_inside_bounds() {
        let (mut player, mut rig, bounds) = setup();
        player.handle_action(Action::MoveForward, true);
        player.handle_action(Action::Sprint, true);

        // Sprint into the far wall for ten seconds.
        for _ in 0..600 {
            player.update(&mut rig, &bounds, &[], DT);
            assert!(bounds.contains_xz(rig.position));
            assert!(rig.position.y >= MovementConfig::default().player_height);
        }
        assert_relative_eq!(rig.position.z, bounds.min_z);
    }

    #[test]
    fn test_bench_blocks_walking_through() {
        let (mut player, mut rig, bounds) = setup();
        let bench = CollisionVolume::from_footprint(0.0, 0.0, 2.0, 0.8);
        player.handle_action(Action::MoveForward, true);

        // Blocked at the inflated bench face (0.4 half-depth + 0.3 radius),
        // allowing a rounding hair of residual penetration per frame.
        for _ in 0..600 {
            player.update(&mut rig, &bounds, &[bench], DT);
            assert!(rig.position.z >= 0.7 - 1e-3);
        }
    }

    #[test]
    fn test_pitch_does_not_slow_movement() {
        let (mut player, mut rig, bounds) = setup();
        // Look steeply downward while walking forward.
        rig.look_at(rig.position + Vec3::new(0.0, -5.0, -1.0));
        player.handle_action(Action::MoveForward, true);

        player.update(&mut rig, &bounds, &[], DT);
        assert_relative_eq!(
            horizontal_speed(player.velocity()),
            MovementConfig::default().walk_speed,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_straight_down_keeps_previous_heading() {
        let (mut player, mut rig, bounds) = setup();
        player.handle_action(Action::MoveForward, true);
        player.update(&mut rig, &bounds, &[], DT);
        let heading_z = player.velocity().z;

        // The host's pointer-look can write a straight-down orientation
        // directly; the flattened forward degenerates and the resolver must
        // fall back to its last heading instead of producing NaN.
        rig.set_orientation(crate::foundation::math::Quat::from_axis_angle(
            &Vec3::x_axis(),
            std::f32::consts::FRAC_PI_2,
        ));
        player.update(&mut rig, &bounds, &[], DT);

        assert!(player.velocity().x.is_finite());
        assert!(player.velocity().z.is_finite());
        assert_relative_eq!(player.velocity().z.signum(), heading_z.signum());
    }

    #[test]
    fn test_disable_clears_keys_and_suspends() {
        let (mut player, mut rig, bounds) = setup();
        player.handle_action(Action::MoveForward, true);

        player.disable();
        // Keys pressed while disabled must not leave residual movement.
        player.handle_action(Action::MoveBackward, true);
        player.enable();

        let start = rig.position;
        player.update(&mut rig, &bounds, &[], DT);
        assert_relative_eq!(rig.position.x, start.x);
        assert_relative_eq!(rig.position.z, start.z);
    }

    #[test]
    fn test_disable_leaves_locked_untouched() {
        let (mut player, _rig, _bounds) = setup();
        player.disable();
        assert!(player.is_locked());
        assert!(player.is_disabled());
    }

    #[test]
    fn test_unlocked_ignores_key_downs() {
        let mut player = PlayerController::new(MovementConfig::default());
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.6, 0.0));
        let bounds = RoomBounds::default();

        player.handle_action(Action::MoveForward, true);
        player.set_locked(true);
        player.update(&mut rig, &bounds, &[], DT);

        assert_relative_eq!(horizontal_speed(player.velocity()), 0.0);
    }
}
