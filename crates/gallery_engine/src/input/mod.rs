//! Logical input actions and edge-triggered key state
//!
//! The host input layer translates raw device events into [`Action`] edges;
//! the engine never sees key codes. Pressed state is kept as a bit set and
//! read once per tick by the movement resolver.

use bitflags::bitflags;

/// Logical actions the viewer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk forward (towards the camera's horizontal heading)
    MoveForward,
    /// Walk backward
    MoveBackward,
    /// Strafe left
    MoveLeft,
    /// Strafe right
    MoveRight,
    /// Jump (held: re-triggers on each landing)
    Jump,
    /// Sprint modifier
    Sprint,
    /// Leave presentation mode
    FocusExit,
}

impl Action {
    /// The pressed-state flag for this action, if it is a held action
    ///
    /// `FocusExit` is a pure edge trigger and carries no held state.
    pub fn flag(self) -> Option<ActionSet> {
        match self {
            Self::MoveForward => Some(ActionSet::FORWARD),
            Self::MoveBackward => Some(ActionSet::BACKWARD),
            Self::MoveLeft => Some(ActionSet::LEFT),
            Self::MoveRight => Some(ActionSet::RIGHT),
            Self::Jump => Some(ActionSet::JUMP),
            Self::Sprint => Some(ActionSet::SPRINT),
            Self::FocusExit => None,
        }
    }

    /// Whether this action steers horizontal movement
    ///
    /// While presentation mode is active, a pressed direction action exits it
    /// instead of moving the player.
    pub fn is_direction(self) -> bool {
        matches!(
            self,
            Self::MoveForward | Self::MoveBackward | Self::MoveLeft | Self::MoveRight
        )
    }
}

bitflags! {
    /// Set of currently-held actions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ActionSet: u8 {
        /// Forward direction key held
        const FORWARD = 1 << 0;
        /// Backward direction key held
        const BACKWARD = 1 << 1;
        /// Left strafe key held
        const LEFT = 1 << 2;
        /// Right strafe key held
        const RIGHT = 1 << 3;
        /// Jump key held
        const JUMP = 1 << 4;
        /// Sprint modifier held
        const SPRINT = 1 << 5;
    }
}

/// Edge-triggered key state, read every tick by the resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionState {
    pressed: ActionSet,
}

impl ActionState {
    /// Create an empty action state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key-down or key-up edge
    pub fn apply(&mut self, action: Action, pressed: bool) {
        if let Some(flag) = action.flag() {
            self.pressed.set(flag, pressed);
        }
    }

    /// Test whether all the given actions are currently held
    pub fn is_pressed(&self, actions: ActionSet) -> bool {
        self.pressed.contains(actions)
    }

    /// The full set of currently-held actions
    pub fn pressed(&self) -> ActionSet {
        self.pressed
    }

    /// Forcibly release everything
    ///
    /// Called when input focus is lost so keys released while we were not
    /// listening cannot stick.
    pub fn clear(&mut self) {
        self.pressed = ActionSet::empty();
    }
}
