//! Live controller enumeration through gilrs.
//!
//! gilrs already normalises every pad onto the standard gamepad layout, so the
//! capability we build reports the SDL game-controller indices for each element
//! the pad actually exposes (buttons 0..14, axes 0..5). Elements gilrs cannot map
//! on a given pad are left out, and the compiler then skips them.

use super::capability::{
    AccessTechnology, ControllerCapability, PhysicalInput, VENDOR_MICROSOFT,
};
use super::{CapabilityProvider, ControllerError};
use crate::mapping::input::LogicalInput;
use gilrs::{Axis, Button, Gamepad, Gilrs};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy)]
enum Element {
    Button(Button),
    Axis(Axis),
}

/// Launcher layout: `a` is the east face button, `b` the south one.
const STANDARD_LAYOUT: [(LogicalInput, Element, PhysicalInput); 21] = [
    (LogicalInput::A, Element::Button(Button::East), PhysicalInput::button(1)),
    (LogicalInput::B, Element::Button(Button::South), PhysicalInput::button(0)),
    (LogicalInput::X, Element::Button(Button::North), PhysicalInput::button(3)),
    (LogicalInput::Y, Element::Button(Button::West), PhysicalInput::button(2)),
    (LogicalInput::Select, Element::Button(Button::Select), PhysicalInput::button(4)),
    (LogicalInput::Hotkey, Element::Button(Button::Select), PhysicalInput::button(4)),
    (LogicalInput::Start, Element::Button(Button::Start), PhysicalInput::button(6)),
    (LogicalInput::L3, Element::Button(Button::LeftThumb), PhysicalInput::button(7)),
    (LogicalInput::R3, Element::Button(Button::RightThumb), PhysicalInput::button(8)),
    (LogicalInput::L1, Element::Button(Button::LeftTrigger), PhysicalInput::button(9)),
    (LogicalInput::R1, Element::Button(Button::RightTrigger), PhysicalInput::button(10)),
    (LogicalInput::Up, Element::Button(Button::DPadUp), PhysicalInput::button(11)),
    (LogicalInput::Down, Element::Button(Button::DPadDown), PhysicalInput::button(12)),
    (LogicalInput::Left, Element::Button(Button::DPadLeft), PhysicalInput::button(13)),
    (LogicalInput::Right, Element::Button(Button::DPadRight), PhysicalInput::button(14)),
    (LogicalInput::L2, Element::Button(Button::LeftTrigger2), PhysicalInput::axis(4, 1)),
    (LogicalInput::R2, Element::Button(Button::RightTrigger2), PhysicalInput::axis(5, 1)),
    (LogicalInput::Joystick1Up, Element::Axis(Axis::LeftStickY), PhysicalInput::axis(1, -1)),
    (LogicalInput::Joystick1Left, Element::Axis(Axis::LeftStickX), PhysicalInput::axis(0, -1)),
    (LogicalInput::Joystick2Up, Element::Axis(Axis::RightStickY), PhysicalInput::axis(3, -1)),
    (LogicalInput::Joystick2Left, Element::Axis(Axis::RightStickX), PhysicalInput::axis(2, -1)),
];

/// Enumerates gamepads currently known to gilrs.
pub struct GilrsProvider {
    gilrs: Gilrs,
}

impl GilrsProvider {
    pub fn new() -> Result<Self, ControllerError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(ControllerError::InitializationError(e.to_string()));
            }
        };
        Ok(Self { gilrs })
    }
}

impl CapabilityProvider for GilrsProvider {
    fn controllers(&mut self) -> Result<Vec<ControllerCapability>, ControllerError> {
        let mut controllers = Vec::new();

        for (slot, (id, gamepad)) in self.gilrs.gamepads().enumerate() {
            let Ok(player) = u8::try_from(slot + 1) else {
                warn!("Ignoring gamepad {} beyond the last player slot", id);
                continue;
            };
            let index = u32::try_from(usize::from(id)).unwrap_or(u32::MAX);
            info!("  [{}] ID: {}, Name: {}", player, id, gamepad.name());
            controllers.push(capability_from_gamepad(player, index, &gamepad));
        }

        if controllers.is_empty() {
            warn!("No gamepad connected");
        }
        Ok(controllers)
    }
}

fn capability_from_gamepad(player: u8, index: u32, gamepad: &Gamepad<'_>) -> ControllerCapability {
    let technology = classify(gamepad.vendor_id(), cfg!(windows));
    let mut capability = ControllerCapability::new(player, technology, gamepad.name())
        .with_identity(
            gamepad.vendor_id().unwrap_or_default(),
            gamepad.product_id().unwrap_or_default(),
        )
        .with_device_index(index);

    for (input, element, physical) in STANDARD_LAYOUT {
        let present = match element {
            Element::Button(button) => gamepad.button_code(button).is_some(),
            Element::Axis(axis) => gamepad.axis_code(axis).is_some(),
        };
        if present {
            capability.inputs.insert(input, physical);
        } else {
            debug!("{} has no element for {}", gamepad.name(), input);
        }
    }

    capability
}

/// Microsoft pads on Windows are read through XInput, everything else through SDL.
fn classify(vendor_id: Option<u16>, windows: bool) -> AccessTechnology {
    match vendor_id {
        Some(VENDOR_MICROSOFT) if windows => AccessTechnology::XInput,
        _ => AccessTechnology::Sdl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::capability::VENDOR_SONY;
    use std::collections::HashSet;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Some(VENDOR_MICROSOFT), true), AccessTechnology::XInput);
        assert_eq!(classify(Some(VENDOR_MICROSOFT), false), AccessTechnology::Sdl);
        assert_eq!(classify(Some(VENDOR_SONY), true), AccessTechnology::Sdl);
        assert_eq!(classify(None, true), AccessTechnology::Sdl);
    }

    #[test]
    fn test_layout_covers_every_logical_input_once() {
        let inputs: HashSet<LogicalInput> = STANDARD_LAYOUT.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(inputs.len(), STANDARD_LAYOUT.len());
    }

    #[test]
    fn test_layout_uses_trigger_axes() {
        let l2 = STANDARD_LAYOUT
            .iter()
            .find(|(i, _, _)| *i == LogicalInput::L2)
            .map(|(_, _, p)| *p);
        assert_eq!(l2, Some(PhysicalInput::axis(4, 1)));
    }
}
