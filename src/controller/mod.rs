//! Controller side of the compiler: who is plugged in and what they can do.
//!
//! The compiler itself never enumerates devices. It receives a list of
//! [`ControllerCapability`] values from a [`CapabilityProvider`]:
//!
//! - [`StaticControllers`] - the list written into a launch profile
//! - [`discovery::GilrsProvider`] - live enumeration through gilrs
//!
//! Both hand out the list ordered by player slot.

pub mod capability;
pub mod discovery;

pub use capability::{
    AccessTechnology, ControllerCapability, InputKind, PhysicalInput, VENDOR_NINTENDO,
};

use tracing::debug;

// Controller errors
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Player slot {0} is assigned to more than one controller")]
    DuplicatePlayer(u8),

    #[error("Player slot 0 is not valid, slots start at 1")]
    InvalidPlayer,
}

/// Source of the controller list for one configuration pass.
pub trait CapabilityProvider {
    /// Returns the connected controllers, ascending by player slot.
    fn controllers(&mut self) -> Result<Vec<ControllerCapability>, ControllerError>;
}

/// A fixed controller list, usually taken from a launch profile.
#[derive(Debug, Clone, Default)]
pub struct StaticControllers {
    controllers: Vec<ControllerCapability>,
}

impl StaticControllers {
    pub fn new(mut controllers: Vec<ControllerCapability>) -> Result<Self, ControllerError> {
        controllers.sort_by_key(|c| c.player);

        for pair in controllers.windows(2) {
            if pair[0].player == pair[1].player {
                return Err(ControllerError::DuplicatePlayer(pair[0].player));
            }
        }
        if controllers.first().is_some_and(|c| c.player == 0) {
            return Err(ControllerError::InvalidPlayer);
        }

        debug!("Static controller list with {} entries", controllers.len());
        Ok(Self { controllers })
    }
}

impl CapabilityProvider for StaticControllers {
    fn controllers(&mut self) -> Result<Vec<ControllerCapability>, ControllerError> {
        Ok(self.controllers.clone())
    }
}
