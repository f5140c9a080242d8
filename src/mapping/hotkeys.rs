//! Default emulator hotkeys, derived from player 1's controller.

use super::input::LogicalInput;
use super::technology::sdl_name;
use crate::controller::{AccessTechnology, ControllerCapability, VENDOR_NINTENDO};
use indexmap::IndexMap;
use tracing::debug;

pub const HOTKEYS_SECTION: &str = "Hotkeys";

/// Hotkey bindings in write order. Empty when there is no usable player 1.
pub fn synthesize(
    first: Option<&ControllerCapability>,
    technology: Option<AccessTechnology>,
) -> IndexMap<&'static str, String> {
    let mut hotkeys = IndexMap::new();
    let technology = technology.filter(|t| *t != AccessTechnology::Unsupported);
    let (Some(pad), Some(technology)) = (first, technology) else {
        debug!("No controller in slot 1, hotkeys left alone");
        return hotkeys;
    };

    let mut set = |key: &'static str, value: String| {
        hotkeys.insert(key, value);
    };

    set("Load State/Load State Slot 1", "F1".into());
    set("Save State/Save State Slot 1", "@(Shift+F1)".into());

    match technology {
        AccessTechnology::XInput => {
            set("Device", "XInput/0/Gamepad".into());
            set("General/Toggle Pause", "Back&`Button B`".into());
            set("General/Toggle Fullscreen", "Back&`Button A`".into());
            set("General/Exit", "Back&Start".into());
            set("General/Take Screenshot", "@(Back+`Button X`)".into());
            set("Save State/Save to Selected Slot", "@(Back+`Button X`)".into());
            set("Load State/Load from Selected Slot", "@(Back+`Button Y`)".into());
            set(
                "Other State Hotkeys/Increase Selected State Slot",
                "@(Back+`Pad N`)".into(),
            );
            set(
                "Other State Hotkeys/Decrease Selected State Slot",
                "@(Back+`Pad S`)".into(),
            );
            set("General/Eject Disc", "Back&`Shoulder L`".into());
            set("General/Change Disc", "Back&`Shoulder R`".into());
        }
        AccessTechnology::Sdl => {
            // Nintendo pads report their face buttons the other way round
            let nintendo = pad.vendor_id == VENDOR_NINTENDO;
            let (pause, fullscreen) = if nintendo {
                ("`Button 4`&`Button 0`", "`Button 4`&`Button 1`")
            } else {
                ("`Button 4`&`Button 1`", "`Button 4`&`Button 0`")
            };
            let combo = |face: LogicalInput| {
                format!(
                    "@({}&{})",
                    sdl_name(pad, LogicalInput::Hotkey).unwrap_or_default(),
                    sdl_name(pad, face).unwrap_or_default()
                )
            };

            set("Device", format!("SDL/0/{}", pad.name));
            set("General/Toggle Pause", pause.into());
            set("General/Toggle Fullscreen", fullscreen.into());
            set("General/Exit", "`Button 4`&`Button 6`".into());
            // screenshot is rebound below, it only keeps its place here
            set("General/Take Screenshot", combo(LogicalInput::Y));
            set("Save State/Save to Selected Slot", combo(LogicalInput::Y));
            set("Load State/Load from Selected Slot", combo(LogicalInput::X));
            set("General/Take Screenshot", "`Button 4`&`Full Axis 5+`".into());
            set("General/Eject Disc", "`Button 4`&`Button 9`".into());
            set("General/Change Disc", "`Button 4`&`Button 10`".into());
        }
        AccessTechnology::Keyboard => {
            set("Device", "DInput/0/Keyboard Mouse".into());
            set("General/Toggle Pause", "`F10`".into());
            set("General/Toggle Fullscreen", "@(Alt+RETURN)".into());
            set("General/Exit", "ESCAPE".into());
            set("General/Take Screenshot", "`F9`".into());
            set("General/Eject Disc", "Alt&E".into());
            set("General/Change Disc", "Alt&S".into());
        }
        AccessTechnology::Unsupported => {}
    }

    debug!("Synthesized {} hotkeys for {:?}", hotkeys.len(), technology);
    hotkeys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PhysicalInput;

    fn sdl_pad(vendor: u16) -> ControllerCapability {
        ControllerCapability::new(1, AccessTechnology::Sdl, "Pro Controller")
            .with_identity(vendor, 0x2009)
            .with_input(LogicalInput::Hotkey, PhysicalInput::button(4))
            .with_input(LogicalInput::Y, PhysicalInput::button(2))
            .with_input(LogicalInput::X, PhysicalInput::button(3))
    }

    #[test]
    fn test_no_player_one_no_hotkeys() {
        assert!(synthesize(None, None).is_empty());

        let wheel = ControllerCapability::new(1, AccessTechnology::Unsupported, "Wheel");
        assert!(synthesize(Some(&wheel), Some(AccessTechnology::Unsupported)).is_empty());
    }

    #[test]
    fn test_xinput_table() {
        let pad = ControllerCapability::new(1, AccessTechnology::XInput, "Xbox");
        let hotkeys = synthesize(Some(&pad), Some(AccessTechnology::XInput));
        assert_eq!(hotkeys["Device"], "XInput/0/Gamepad");
        assert_eq!(hotkeys["General/Toggle Pause"], "Back&`Button B`");
        assert_eq!(hotkeys["Load State/Load State Slot 1"], "F1");
        assert_eq!(hotkeys.len(), 13);
    }

    #[test]
    fn test_sdl_table_builds_state_combos() {
        let pad = sdl_pad(0x045e);
        let hotkeys = synthesize(Some(&pad), Some(AccessTechnology::Sdl));
        assert_eq!(hotkeys["Device"], "SDL/0/Pro Controller");
        assert_eq!(hotkeys["Save State/Save to Selected Slot"], "@(`Button 4`&`Button 2`)");
        assert_eq!(hotkeys["Load State/Load from Selected Slot"], "@(`Button 4`&`Button 3`)");
        assert_eq!(hotkeys["General/Take Screenshot"], "`Button 4`&`Full Axis 5+`");
        assert_eq!(hotkeys["General/Toggle Pause"], "`Button 4`&`Button 1`");

        let keys: Vec<_> = hotkeys.keys().copied().collect();
        let screenshot = keys.iter().position(|k| *k == "General/Take Screenshot");
        let save = keys.iter().position(|k| *k == "Save State/Save to Selected Slot");
        assert!(screenshot < save);
    }

    #[test]
    fn test_nintendo_swaps_pause_and_fullscreen() {
        let pad = sdl_pad(VENDOR_NINTENDO);
        let hotkeys = synthesize(Some(&pad), Some(AccessTechnology::Sdl));
        assert_eq!(hotkeys["General/Toggle Pause"], "`Button 4`&`Button 0`");
        assert_eq!(hotkeys["General/Toggle Fullscreen"], "`Button 4`&`Button 1`");
    }

    #[test]
    fn test_sdl_missing_inputs_leave_empty_operands() {
        let pad = ControllerCapability::new(1, AccessTechnology::Sdl, "Bare");
        let hotkeys = synthesize(Some(&pad), Some(AccessTechnology::Sdl));
        assert_eq!(hotkeys["Save State/Save to Selected Slot"], "@(&)");
    }

    #[test]
    fn test_keyboard_table() {
        let pad = ControllerCapability::new(1, AccessTechnology::Keyboard, "Keyboard");
        let hotkeys = synthesize(Some(&pad), Some(AccessTechnology::Keyboard));
        assert_eq!(hotkeys["Device"], "DInput/0/Keyboard Mouse");
        assert_eq!(hotkeys["General/Exit"], "ESCAPE");
        assert!(!hotkeys.contains_key("Save State/Save to Selected Slot"));
        assert_eq!(hotkeys.len(), 9);
    }
}
