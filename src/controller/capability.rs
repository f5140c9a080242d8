//! Capability descriptors handed over by whoever enumerates the devices.

use crate::mapping::input::LogicalInput;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const VENDOR_MICROSOFT: u16 = 0x045e;
pub const VENDOR_NINTENDO: u16 = 0x057e;
pub const VENDOR_SONY: u16 = 0x054c;

pub const PRODUCT_NINTENDO_SWITCH_PRO: u16 = 0x2009;
pub const PRODUCT_SONY_DS3: u16 = 0x0268;
pub const PRODUCT_SONY_DS4: u16 = 0x05c4;
pub const PRODUCT_SONY_DS4_DONGLE: u16 = 0x0ba0;
pub const PRODUCT_SONY_DS4_SLIM: u16 = 0x09cc;
pub const PRODUCT_SONY_DS5: u16 = 0x0ce6;

/// Low-level protocol class a device is read through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessTechnology {
    /// Platform-native gamepad API (XInput).
    #[serde(rename = "xinput")]
    XInput,
    /// Generic HID through SDL.
    Sdl,
    Keyboard,
    /// Anything the provider could not classify. Such players are skipped.
    #[default]
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Button,
    Axis,
    Hat,
    Key,
}

/// Raw physical element behind a logical input.
///
/// `value` carries the axis direction (sign) for axes and the direction bitmask for hats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalInput {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub id: i64,
    #[serde(default)]
    pub value: i64,
}

impl PhysicalInput {
    pub const fn button(id: i64) -> Self {
        Self {
            kind: InputKind::Button,
            id,
            value: 0,
        }
    }

    pub const fn axis(id: i64, value: i64) -> Self {
        Self {
            kind: InputKind::Axis,
            id,
            value,
        }
    }

    pub const fn hat(id: i64, mask: i64) -> Self {
        Self {
            kind: InputKind::Hat,
            id,
            value: mask,
        }
    }

    pub const fn key(code: i64) -> Self {
        Self {
            kind: InputKind::Key,
            id: code,
            value: 0,
        }
    }
}

/// Everything the compiler knows about one connected controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerCapability {
    /// 1-based player slot, stable for the session
    pub player: u8,
    pub technology: AccessTechnology,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vendor_id: u16,
    #[serde(default)]
    pub product_id: u16,
    #[serde(default)]
    pub device_index: u32,
    /// XInput user slot; falls back to `device_index`
    #[serde(default)]
    pub xinput_index: Option<u32>,
    #[serde(default)]
    pub inputs: HashMap<LogicalInput, PhysicalInput>,
}

impl ControllerCapability {
    pub fn new(player: u8, technology: AccessTechnology, name: impl Into<String>) -> Self {
        Self {
            player,
            technology,
            name: name.into(),
            vendor_id: 0,
            product_id: 0,
            device_index: 0,
            xinput_index: None,
            inputs: HashMap::new(),
        }
    }

    pub fn with_identity(mut self, vendor_id: u16, product_id: u16) -> Self {
        self.vendor_id = vendor_id;
        self.product_id = product_id;
        self
    }

    pub fn with_device_index(mut self, device_index: u32) -> Self {
        self.device_index = device_index;
        self
    }

    pub fn with_input(mut self, input: LogicalInput, physical: PhysicalInput) -> Self {
        self.inputs.insert(input, physical);
        self
    }

    pub fn input(&self, input: LogicalInput) -> Option<&PhysicalInput> {
        self.inputs.get(&input)
    }

    pub fn is_supported(&self) -> bool {
        self.technology != AccessTechnology::Unsupported
    }

    pub fn xinput_slot(&self) -> u32 {
        self.xinput_index.unwrap_or(self.device_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_deserializes_from_toml() {
        let cap: ControllerCapability = toml::from_str(
            r#"
            player = 1
            technology = "sdl"
            name = "Pro Controller"
            vendor_id = 0x057e
            product_id = 0x2009

            [inputs]
            a = { type = "button", id = 1 }
            pageup = { type = "button", id = 9 }
            joystick1up = { type = "axis", id = 1, value = -1 }
            up = { type = "hat", id = 0, value = 1 }
            "#,
        )
        .unwrap();

        assert_eq!(cap.technology, AccessTechnology::Sdl);
        assert_eq!(cap.vendor_id, VENDOR_NINTENDO);
        assert_eq!(cap.product_id, PRODUCT_NINTENDO_SWITCH_PRO);
        assert_eq!(cap.input(LogicalInput::A), Some(&PhysicalInput::button(1)));
        assert_eq!(cap.input(LogicalInput::L1), Some(&PhysicalInput::button(9)));
        assert_eq!(
            cap.input(LogicalInput::Joystick1Up),
            Some(&PhysicalInput::axis(1, -1))
        );
        assert_eq!(cap.input(LogicalInput::Up), Some(&PhysicalInput::hat(0, 1)));
        assert_eq!(cap.input(LogicalInput::B), None);
    }

    #[test]
    fn test_unknown_technology_is_unsupported() {
        let cap: ControllerCapability = toml::from_str(
            r#"
            player = 2
            technology = "dinput-wheel"
            "#,
        )
        .unwrap();
        assert_eq!(cap.technology, AccessTechnology::Unsupported);
        assert!(!cap.is_supported());
    }

    #[test]
    fn test_xinput_slot_falls_back_to_device_index() {
        let cap = ControllerCapability::new(1, AccessTechnology::XInput, "Gamepad")
            .with_device_index(2);
        assert_eq!(cap.xinput_slot(), 2);
    }
}
