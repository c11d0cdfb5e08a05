//! Exclusive write authority over the camera transform
//!
//! Exactly one mode may mutate the [`super::CameraRig`] in a frame. The
//! player is the baseline holder; presentation mode acquires the authority on
//! entry and releases it back on exit. Switches only happen synchronously at
//! those boundaries, so there is never partial-frame ownership overlap.

use thiserror::Error;

/// The mode currently allowed to mutate the camera transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityHolder {
    /// Movement resolver (and host pointer-look)
    Player,
    /// Presentation-mode state machine
    Presentation,
}

/// Authority token owned by the viewer coordinator
#[derive(Debug)]
pub struct CameraAuthority {
    holder: AuthorityHolder,
}

impl CameraAuthority {
    /// Create the token with the player as baseline holder
    pub fn new() -> Self {
        Self {
            holder: AuthorityHolder::Player,
        }
    }

    /// The current holder
    pub fn holder(&self) -> AuthorityHolder {
        self.holder
    }

    /// Transfer authority from the player to presentation mode
    pub fn acquire_presentation(&mut self) -> Result<(), AuthorityError> {
        if self.holder == AuthorityHolder::Presentation {
            return Err(AuthorityError::AlreadyHeld);
        }
        self.holder = AuthorityHolder::Presentation;
        log::debug!("camera authority -> presentation");
        Ok(())
    }

    /// Return authority from presentation mode to the player
    pub fn release_presentation(&mut self) -> Result<(), AuthorityError> {
        if self.holder != AuthorityHolder::Presentation {
            return Err(AuthorityError::NotHeld);
        }
        self.holder = AuthorityHolder::Player;
        log::debug!("camera authority -> player");
        Ok(())
    }
}

impl Default for CameraAuthority {
    fn default() -> Self {
        Self::new()
    }
}

/// Authority transfer errors; these indicate a coordinator bug
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthorityError {
    /// Presentation mode tried to acquire authority twice
    #[error("camera authority already held by presentation mode")]
    AlreadyHeld,

    /// Release without a matching acquire
    #[error("camera authority not held by presentation mode")]
    NotHeld,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_is_baseline_holder() {
        let authority = CameraAuthority::new();
        assert_eq!(authority.holder(), AuthorityHolder::Player);
    }

    #[test]
    fn test_acquire_release_round_trip() {
        let mut authority = CameraAuthority::new();

        authority.acquire_presentation().unwrap();
        assert_eq!(authority.holder(), AuthorityHolder::Presentation);

        authority.release_presentation().unwrap();
        assert_eq!(authority.holder(), AuthorityHolder::Player);
    }

    #[test]
    fn test_double_acquire_fails() {
        let mut authority = CameraAuthority::new();
        authority.acquire_presentation().unwrap();

        assert_eq!(
            authority.acquire_presentation(),
            Err(AuthorityError::AlreadyHeld)
        );
    }

    #[test]
    fn test_release_without_acquire_fails() {
        let mut authority = CameraAuthority::new();
        assert_eq!(
            authority.release_presentation(),
            Err(AuthorityError::NotHeld)
        );
    }
}
