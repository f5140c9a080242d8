//! Technology encoders: physical descriptor -> Dolphin control expression.
//!
//! Descriptors always use the SDL game-controller numbering (buttons 0..14, axes
//! 0..5, hat bitmasks). Each encoder turns them into the syntax of the Dolphin
//! backend the device is read through.

use super::input::LogicalInput;
use super::keyboard::KeyTranslator;
use crate::controller::{AccessTechnology, ControllerCapability, InputKind, PhysicalInput};
use tracing::debug;

/// Shared resolution contract of the three device backends.
pub trait TechnologyEncoder {
    /// Technology the player is actually addressed with.
    fn technology(&self) -> AccessTechnology;

    /// Dolphin backend prefix of the `Device` key.
    fn backend(&self) -> &'static str;

    /// Device name part of the `Device` key.
    fn device_name(&self, pad: &ControllerCapability) -> String;

    /// `<backend>/<index>/<name>`, where `index` counts earlier devices with the same
    /// backend and name.
    fn device_address(&self, pad: &ControllerCapability, same_name_index: usize) -> String {
        format!("{}/{}/{}", self.backend(), same_name_index, self.device_name(pad))
    }

    /// Control expression for `input`, or for its opposite direction when `reverse`.
    fn encode(&self, input: &PhysicalInput, reverse: bool) -> Option<String>;

    /// Z binding that keeps the Triforce service menu off a single button.
    fn service_menu_combo(&self) -> Option<&'static str>;

    fn rumble_motor(&self) -> &'static str {
        "Motor"
    }
}

/// Picks the encoder for `pad`, `None` for unsupported devices.
pub fn encoder_for(
    pad: &ControllerCapability,
    force_sdl: bool,
    translator: KeyTranslator,
) -> Option<Box<dyn TechnologyEncoder>> {
    match pad.technology {
        AccessTechnology::Keyboard => Some(Box::new(KeyboardEncoder { translator })),
        AccessTechnology::XInput if !force_sdl => Some(Box::new(XInputEncoder)),
        AccessTechnology::XInput | AccessTechnology::Sdl => {
            Some(Box::new(SdlEncoder { forced: force_sdl }))
        }
        AccessTechnology::Unsupported => None,
    }
}

// XInput

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum XInputControl {
    A,
    B,
    X,
    Y,
    Back,
    Start,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftStickUp,
    LeftStickDown,
    LeftStickLeft,
    LeftStickRight,
    RightStickUp,
    RightStickDown,
    RightStickLeft,
    RightStickRight,
    LeftThumb,
    RightThumb,
    LeftTrigger,
    RightTrigger,
}

impl XInputControl {
    fn from_physical(input: &PhysicalInput) -> Option<Self> {
        use XInputControl::*;

        let control = match input.kind {
            InputKind::Button => match input.id {
                0 => A,
                1 => B,
                2 => X,
                3 => Y,
                4 => Back,
                6 => Start,
                7 => LeftThumb,
                8 => RightThumb,
                9 => LeftShoulder,
                10 => RightShoulder,
                11 => DPadUp,
                12 => DPadDown,
                13 => DPadLeft,
                14 => DPadRight,
                _ => return None,
            },
            // SDL reports stick Y as negative when pushed up
            InputKind::Axis => match (input.id, input.value < 0) {
                (0, true) => LeftStickLeft,
                (0, false) => LeftStickRight,
                (1, true) => LeftStickUp,
                (1, false) => LeftStickDown,
                (2, true) => RightStickLeft,
                (2, false) => RightStickRight,
                (3, true) => RightStickUp,
                (3, false) => RightStickDown,
                (4, _) => LeftTrigger,
                (5, _) => RightTrigger,
                _ => return None,
            },
            InputKind::Hat => match input.value {
                1 => DPadUp,
                2 => DPadRight,
                4 => DPadDown,
                8 => DPadLeft,
                _ => return None,
            },
            InputKind::Key => return None,
        };
        Some(control)
    }

    /// Opposite half-axis; triggers and buttons have none.
    fn opposite(self) -> Option<Self> {
        use XInputControl::*;

        match self {
            LeftStickUp => Some(LeftStickDown),
            LeftStickDown => Some(LeftStickUp),
            LeftStickLeft => Some(LeftStickRight),
            LeftStickRight => Some(LeftStickLeft),
            RightStickUp => Some(RightStickDown),
            RightStickDown => Some(RightStickUp),
            RightStickLeft => Some(RightStickRight),
            RightStickRight => Some(RightStickLeft),
            _ => None,
        }
    }

    /// Dolphin's XInput control name. The south/east and west/north pairs are crossed,
    /// so that the launcher's `a` (east) lands on Dolphin's `Button A`.
    fn name(self) -> &'static str {
        use XInputControl::*;

        match self {
            A => "`Button B`",
            B => "`Button A`",
            X => "`Button Y`",
            Y => "`Button X`",
            Back => "Back",
            Start => "Start",
            LeftShoulder => "`Shoulder L`",
            RightShoulder => "`Shoulder R`",
            DPadUp => "`Pad N`",
            DPadDown => "`Pad S`",
            DPadLeft => "`Pad W`",
            DPadRight => "`Pad E`",
            LeftStickUp => "`Left Y+`",
            LeftStickDown => "`Left Y-`",
            LeftStickLeft => "`Left X-`",
            LeftStickRight => "`Left X+`",
            RightStickUp => "`Right Y+`",
            RightStickDown => "`Right Y-`",
            RightStickLeft => "`Right X-`",
            RightStickRight => "`Right X+`",
            LeftThumb => "`Thumb L`",
            RightThumb => "`Thumb R`",
            LeftTrigger => "`Trigger L`",
            RightTrigger => "`Trigger R`",
        }
    }
}

/// Native gamepad API.
#[derive(Debug, Clone, Copy, Default)]
pub struct XInputEncoder;

impl TechnologyEncoder for XInputEncoder {
    fn technology(&self) -> AccessTechnology {
        AccessTechnology::XInput
    }

    fn backend(&self) -> &'static str {
        "XInput"
    }

    fn device_name(&self, _pad: &ControllerCapability) -> String {
        "Gamepad".to_string()
    }

    /// XInput devices are addressed by their user slot.
    fn device_address(&self, pad: &ControllerCapability, _same_name_index: usize) -> String {
        format!("XInput/{}/Gamepad", pad.xinput_slot())
    }

    fn encode(&self, input: &PhysicalInput, reverse: bool) -> Option<String> {
        let control = XInputControl::from_physical(input)?;
        let control = if reverse { control.opposite()? } else { control };
        Some(control.name().to_string())
    }

    fn service_menu_combo(&self) -> Option<&'static str> {
        Some("`Thumb L`&`Thumb R`")
    }

    fn rumble_motor(&self) -> &'static str {
        "`Motor L`|`Motor R`"
    }
}

// SDL

/// Generic HID through SDL, natively or because `input_forceSDL` is on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdlEncoder {
    pub forced: bool,
}

impl SdlEncoder {
    pub fn native() -> Self {
        Self { forced: false }
    }

    fn axis(input: &PhysicalInput, reverse: bool) -> String {
        if matches!(input.id, 4 | 5) {
            return format!("`Full Axis {}+`", input.id);
        }
        let positive = (!reverse && input.value > 0) || (reverse && input.value < 0);
        let sign = if positive { '+' } else { '-' };
        match input.id {
            0..=3 => format!("`Axis {}{}`", input.id, sign),
            _ => format!("`Axis {}`", sign),
        }
    }

    fn hat(input: &PhysicalInput) -> Option<String> {
        let direction = match input.value {
            1 => 'N',
            2 => 'E',
            4 => 'S',
            8 => 'W',
            _ => return None,
        };
        Some(format!("`Hat {} {}`", input.id, direction))
    }
}

impl TechnologyEncoder for SdlEncoder {
    fn technology(&self) -> AccessTechnology {
        AccessTechnology::Sdl
    }

    fn backend(&self) -> &'static str {
        "SDL"
    }

    fn device_name(&self, pad: &ControllerCapability) -> String {
        // Dolphin's SDL backend reports DualSense pads under this name
        if pad.name == "DualSense Wireless Controller" {
            "PS5 Controller".to_string()
        } else {
            pad.name.clone()
        }
    }

    fn encode(&self, input: &PhysicalInput, reverse: bool) -> Option<String> {
        match input.kind {
            InputKind::Button if reverse => None,
            // SDL's first two buttons come in swapped
            InputKind::Button => Some(match input.id {
                0 => "`Button 1`".to_string(),
                1 => "`Button 0`".to_string(),
                id => format!("`Button {}`", id),
            }),
            InputKind::Axis => Some(Self::axis(input, reverse)),
            InputKind::Hat if reverse => None,
            InputKind::Hat => Self::hat(input),
            InputKind::Key => {
                debug!("Key descriptor {} on an SDL device", input.id);
                None
            }
        }
    }

    fn service_menu_combo(&self) -> Option<&'static str> {
        if self.forced {
            Some("@(`Button 8`+`Button 9`)")
        } else {
            Some("@(`Button 7`+`Button 8`)")
        }
    }
}

// Keyboard

/// Keyboard through Dolphin's DInput backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardEncoder {
    pub translator: KeyTranslator,
}

impl TechnologyEncoder for KeyboardEncoder {
    fn technology(&self) -> AccessTechnology {
        AccessTechnology::Keyboard
    }

    fn backend(&self) -> &'static str {
        "DInput"
    }

    fn device_name(&self, _pad: &ControllerCapability) -> String {
        "Keyboard Mouse".to_string()
    }

    fn encode(&self, input: &PhysicalInput, reverse: bool) -> Option<String> {
        if reverse {
            return None;
        }
        self.translator.translate(input.id)
    }

    fn service_menu_combo(&self) -> Option<&'static str> {
        None
    }
}

/// SDL expression of one of `pad`'s inputs, whatever its technology.
pub fn sdl_name(pad: &ControllerCapability, input: LogicalInput) -> Option<String> {
    let physical = pad.input(input)?;
    SdlEncoder::native().encode(physical, false)
}
