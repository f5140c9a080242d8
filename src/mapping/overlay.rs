//! # Overlay Rule Engine
//!
//! Turns a [`TableSelection`] into the [`EffectiveMapping`] of one pass. Overlays are
//! applied in a fixed order:
//!
//! 1. the private copy of the base table (done by the selection)
//! 2. the Wii remote mode (`controller_mode`), only for emulated remotes
//! 3. face-button reversal (`gamepadbuttons`)
//! 4. the vs4 stick remap for Triforce pads (`triforce_mapping = vs4`)
//! 5. the keyboard overlay, per keyboard player, see [`EffectiveMapping::keyboard_table`]
//!
//! Overlays replace bindings of keys they name and leave every other key alone.

use super::input::LogicalInput;
use super::selection::{DeviceRole, TableSelection};
use super::tables::{
    MappingTable, Overlay, ReplacementTable, ReverseAxisTable, StickScheme, CLASSIC_CONTROLLER,
    CLASSIC_PRO_TRIGGERS, CLASSIC_REVERSE_AB, CLASSIC_REVERSE_ALL, CLASSIC_REVERSE_ROTATE,
    CLASSIC_TRIGGERS, IR_STICK, KEYBOARD_DIRECTIONS, KEYBOARD_FACES, NUNCHUK_BUTTONS,
    NUNCHUK_STICK, REVERSE_AB, REVERSE_ALL, REVERSE_ROTATE, SIDEWAYS_WIIMOTE, SWING_STICK,
    TILT_STICK, VS4_OVERLAY,
};
use crate::config::SystemOptions;
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::{debug, info};

/// Key/value written verbatim into a player's section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraOption {
    pub key: &'static str,
    pub value: &'static str,
}

impl ExtraOption {
    const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

/// Motion scheme a physical stick can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Pointer,
    Swing,
    Tilt,
    Nunchuk,
}

impl Scheme {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'i' => Some(Scheme::Pointer),
            's' => Some(Scheme::Swing),
            't' => Some(Scheme::Tilt),
            'n' => Some(Scheme::Nunchuk),
            _ => None,
        }
    }

    pub fn stick(self) -> StickScheme {
        match self {
            Scheme::Pointer => IR_STICK,
            Scheme::Swing => SWING_STICK,
            Scheme::Tilt => TILT_STICK,
            Scheme::Nunchuk => NUNCHUK_STICK,
        }
    }
}

/// How the pad plays an emulated Wii remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WiimoteMode {
    #[default]
    Default,
    Sideways,
    /// First scheme on the left stick, second on the right one. Never the same twice.
    Pair(Scheme, Scheme),
    Classic,
    ClassicPro,
}

impl WiimoteMode {
    /// Parses `controller_mode`; unknown strings fall back to [`WiimoteMode::Default`].
    pub fn from_option(value: &str) -> Self {
        match value {
            "side" => WiimoteMode::Sideways,
            "cc" => WiimoteMode::Classic,
            "ccp" => WiimoteMode::ClassicPro,
            pair => {
                let mut letters = pair.chars();
                match (
                    letters.next().and_then(Scheme::from_letter),
                    letters.next().and_then(Scheme::from_letter),
                    letters.next(),
                ) {
                    (Some(first), Some(second), None) if first != second => {
                        WiimoteMode::Pair(first, second)
                    }
                    _ => WiimoteMode::Default,
                }
            }
        }
    }

    pub fn is_classic(self) -> bool {
        matches!(self, WiimoteMode::Classic | WiimoteMode::ClassicPro)
    }

    pub fn has_nunchuk(self) -> bool {
        matches!(
            self,
            WiimoteMode::Pair(Scheme::Nunchuk, _) | WiimoteMode::Pair(_, Scheme::Nunchuk)
        )
    }
}

/// Face-button layout swaps selected by `gamepadbuttons`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum FaceReversal {
    ReverseAll,
    ReverseAb,
    ReverseRotate,
}

impl FaceReversal {
    /// Only honoured when the emulator supports the `gamepadbuttons` feature.
    pub fn from_options(options: &SystemOptions) -> Option<Self> {
        if !options.is_feature_supported("gamepadbuttons") {
            return None;
        }
        FaceReversal::from_str(options.get("gamepadbuttons")).ok()
    }

    pub fn overlay(self, namespace: FaceNamespace) -> Overlay {
        match (namespace, self) {
            (FaceNamespace::Buttons, FaceReversal::ReverseAll) => REVERSE_ALL,
            (FaceNamespace::Buttons, FaceReversal::ReverseAb) => REVERSE_AB,
            (FaceNamespace::Buttons, FaceReversal::ReverseRotate) => REVERSE_ROTATE,
            (FaceNamespace::Classic, FaceReversal::ReverseAll) => CLASSIC_REVERSE_ALL,
            (FaceNamespace::Classic, FaceReversal::ReverseAb) => CLASSIC_REVERSE_AB,
            (FaceNamespace::Classic, FaceReversal::ReverseRotate) => CLASSIC_REVERSE_ROTATE,
        }
    }

    fn swaps_ab(self) -> bool {
        matches!(self, FaceReversal::ReverseAll | FaceReversal::ReverseAb)
    }

    fn swaps_xy(self) -> bool {
        self == FaceReversal::ReverseAll
    }
}

/// Where the face buttons live in the target scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceNamespace {
    Buttons,
    Classic,
}

/// Main stick orientation of Triforce pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriforceLayout {
    #[default]
    Standard,
    /// Cabinets of the vs4 series mount the stick turned by a quarter.
    Vs4,
}

impl TriforceLayout {
    pub fn from_options(options: &SystemOptions) -> Self {
        match options.get("triforce_mapping") {
            "vs4" => TriforceLayout::Vs4,
            _ => TriforceLayout::Standard,
        }
    }
}

/// Mode flags read once per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayContext {
    pub mode: WiimoteMode,
    pub reversal: Option<FaceReversal>,
    pub triforce_layout: TriforceLayout,
}

impl OverlayContext {
    pub fn from_options(options: &SystemOptions) -> Self {
        Self {
            mode: WiimoteMode::from_option(options.get("controller_mode")),
            reversal: FaceReversal::from_options(options),
            triforce_layout: TriforceLayout::from_options(options),
        }
    }
}

/// The table every player of a pass is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveMapping {
    pub role: DeviceRole,
    pub table: MappingTable,
    pub reverse_axes: ReverseAxisTable,
    pub replacements: Option<ReplacementTable>,
    pub extra_options: Vec<ExtraOption>,
    pub context: OverlayContext,
}

impl EffectiveMapping {
    pub fn compose(selection: TableSelection, context: OverlayContext) -> Self {
        let TableSelection {
            role,
            mut table,
            reverse_axes,
            replacements,
        } = selection;
        let mut extra_options = Vec::new();
        let mut namespace = FaceNamespace::Buttons;

        if role == DeviceRole::EmulatedWiimote {
            extra_options.push(ExtraOption::new("Source", "1"));
            apply_wiimote_mode(&mut table, &mut extra_options, context.mode);
            if context.mode.is_classic() {
                namespace = FaceNamespace::Classic;
            }
        }

        if let Some(reversal) = context.reversal {
            debug!("Applying face button reversal {}", reversal);
            table.overlay(reversal.overlay(namespace));
        }

        if role == DeviceRole::TriforcePad && context.triforce_layout == TriforceLayout::Vs4 {
            debug!("Applying vs4 stick orientation");
            table.overlay(VS4_OVERLAY);
        }

        info!(
            "Effective mapping {} with {} entries for {:?}",
            table.name(),
            table.len(),
            role
        );
        Self {
            role,
            table,
            reverse_axes,
            replacements,
            extra_options,
            context,
        }
    }

    /// Copy of the table for a keyboard player.
    ///
    /// Face keys keep their own layout (only the a/b and x/y swaps apply), the d-pad
    /// drives the main stick and the left stick entries are dropped.
    pub fn keyboard_table(&self) -> MappingTable {
        let mut table = self.table.clone();
        let reversal = self.context.reversal;
        let swap_ab = reversal.is_some_and(FaceReversal::swaps_ab);
        let swap_xy = reversal.is_some_and(FaceReversal::swaps_xy);

        for (input, path) in KEYBOARD_FACES {
            let path = match input {
                LogicalInput::A if swap_ab => "Buttons/B",
                LogicalInput::B if swap_ab => "Buttons/A",
                LogicalInput::X if swap_xy => "Buttons/Y",
                LogicalInput::Y if swap_xy => "Buttons/X",
                _ => *path,
            };
            table.overlay(&[(*input, path)]);
        }
        table.overlay(KEYBOARD_DIRECTIONS);
        table.remove(LogicalInput::Joystick1Up);
        table.remove(LogicalInput::Joystick1Left);
        table
    }
}

fn apply_wiimote_mode(table: &mut MappingTable, extra: &mut Vec<ExtraOption>, mode: WiimoteMode) {
    match mode {
        WiimoteMode::Default => {}
        WiimoteMode::Sideways => {
            extra.push(ExtraOption::new("Options/Sideways Wiimote", "1"));
            table.extend(SIDEWAYS_WIIMOTE);
        }
        WiimoteMode::Pair(first, second) => {
            bind_stick(
                table,
                first.stick(),
                [LogicalInput::Joystick1Up, LogicalInput::Joystick1Left, LogicalInput::L3],
            );
            bind_stick(
                table,
                second.stick(),
                [LogicalInput::Joystick2Up, LogicalInput::Joystick2Left, LogicalInput::R3],
            );
            if mode.has_nunchuk() {
                extra.push(ExtraOption::new("Extension", "Nunchuk"));
                table.extend(NUNCHUK_BUTTONS);
            }
        }
        WiimoteMode::Classic | WiimoteMode::ClassicPro => {
            extra.push(ExtraOption::new("Extension", "Classic"));
            table.extend(CLASSIC_CONTROLLER);
            if mode == WiimoteMode::ClassicPro {
                table.extend(CLASSIC_PRO_TRIGGERS);
            } else {
                table.extend(CLASSIC_TRIGGERS);
            }
        }
    }
}

fn bind_stick(table: &mut MappingTable, scheme: StickScheme, [up, left, press]: [LogicalInput; 3]) {
    table.set(up, scheme.up);
    table.set(left, scheme.left);
    // Swing has no press, the base binding stays
    if let Some(path) = scheme.press {
        table.set(press, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::tables::{VS4_REVERSE_AXES, WII_REVERSE_AXES};

    fn compose(role: DeviceRole, options: &SystemOptions) -> EffectiveMapping {
        let context = OverlayContext::from_options(options);
        EffectiveMapping::compose(
            TableSelection::for_role(role, context.triforce_layout),
            context,
        )
    }

    fn reversal(variant: &str) -> SystemOptions {
        SystemOptions::new()
            .with_feature("gamepadbuttons")
            .with_option("gamepadbuttons", variant)
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(WiimoteMode::from_option("side"), WiimoteMode::Sideways);
        assert_eq!(
            WiimoteMode::from_option("in"),
            WiimoteMode::Pair(Scheme::Pointer, Scheme::Nunchuk)
        );
        assert_eq!(
            WiimoteMode::from_option("ts"),
            WiimoteMode::Pair(Scheme::Tilt, Scheme::Swing)
        );
        assert_eq!(WiimoteMode::from_option("ccp"), WiimoteMode::ClassicPro);
        assert_eq!(WiimoteMode::from_option("ii"), WiimoteMode::Default);
        assert_eq!(WiimoteMode::from_option("ist"), WiimoteMode::Default);
        assert_eq!(WiimoteMode::from_option(""), WiimoteMode::Default);
    }

    #[test]
    fn test_twelve_pairs() {
        let letters = ['i', 's', 't', 'n'];
        let mut pairs = 0;
        for a in letters {
            for b in letters {
                let mode = WiimoteMode::from_option(&format!("{}{}", a, b));
                if matches!(mode, WiimoteMode::Pair(_, _)) {
                    pairs += 1;
                }
            }
        }
        assert_eq!(pairs, 12);
    }

    #[test]
    fn test_reversal_requires_feature() {
        let without = SystemOptions::new().with_option("gamepadbuttons", "reverse_all");
        assert_eq!(FaceReversal::from_options(&without), None);
        assert_eq!(
            FaceReversal::from_options(&reversal("reverse_ab")),
            Some(FaceReversal::ReverseAb)
        );
        assert_eq!(FaceReversal::from_options(&reversal("reverse_none")), None);
    }

    #[test]
    fn test_emulated_wiimote_always_sets_source() {
        let mapping = compose(DeviceRole::EmulatedWiimote, &SystemOptions::new());
        assert_eq!(mapping.extra_options, vec![ExtraOption::new("Source", "1")]);
        assert_eq!(mapping.reverse_axes, WII_REVERSE_AXES);

        let gc = compose(DeviceRole::StandardPad, &SystemOptions::new());
        assert!(gc.extra_options.is_empty());
    }

    #[test]
    fn test_sideways_mode() {
        let options = SystemOptions::new().with_option("controller_mode", "side");
        let mapping = compose(DeviceRole::EmulatedWiimote, &options);
        assert_eq!(mapping.table.primary(LogicalInput::X), Some("Buttons/A"));
        assert_eq!(mapping.table.primary(LogicalInput::L2), Some("Shake/Z"));
        assert_eq!(mapping.table.primary(LogicalInput::L1), Some("Tilt/Left"));
        assert!(mapping
            .extra_options
            .contains(&ExtraOption::new("Options/Sideways Wiimote", "1")));
    }

    #[test]
    fn test_swing_pointer_keeps_left_press() {
        let options = SystemOptions::new().with_option("controller_mode", "si");
        let mapping = compose(DeviceRole::EmulatedWiimote, &options);
        assert_eq!(mapping.table.primary(LogicalInput::Joystick1Up), Some("Swing/Up"));
        assert_eq!(mapping.table.primary(LogicalInput::Joystick2Left), Some("IR/Left"));
        assert_eq!(
            mapping.table.primary(LogicalInput::L3),
            Some("IR/Relative Input Hold")
        );
        assert_eq!(
            mapping.table.primary(LogicalInput::R3),
            Some("IR/Relative Input Hold")
        );
    }

    #[test]
    fn test_nunchuk_pair_sets_extension() {
        let options = SystemOptions::new().with_option("controller_mode", "tn");
        let mapping = compose(DeviceRole::EmulatedWiimote, &options);
        assert_eq!(mapping.table.primary(LogicalInput::Joystick1Up), Some("Tilt/Forward"));
        assert_eq!(
            mapping.table.primary(LogicalInput::Joystick2Up),
            Some("Nunchuk/Stick/Up")
        );
        assert_eq!(
            mapping.table.primary(LogicalInput::R3),
            Some("Nunchuk/Stick/Modifier")
        );
        assert_eq!(mapping.table.primary(LogicalInput::R1), Some("Nunchuk/Buttons/Z"));
        assert!(mapping
            .extra_options
            .contains(&ExtraOption::new("Extension", "Nunchuk")));
    }

    #[test]
    fn test_classic_pro_with_reverse_all() {
        let options = reversal("reverse_all").with_option("controller_mode", "ccp");
        let mapping = compose(DeviceRole::EmulatedWiimote, &options);
        assert_eq!(mapping.table.primary(LogicalInput::B), Some("Classic/Buttons/A"));
        assert_eq!(mapping.table.primary(LogicalInput::Y), Some("Classic/Buttons/X"));
        assert_eq!(mapping.table.primary(LogicalInput::L1), Some("Classic/Triggers/L"));
        assert_eq!(mapping.table.primary(LogicalInput::R2), Some("Classic/Buttons/ZR"));
        assert!(mapping
            .extra_options
            .contains(&ExtraOption::new("Extension", "Classic")));
    }

    #[test]
    fn test_reversal_applies_after_mode() {
        // side puts x on Buttons/A, reverse_all then moves it to Buttons/Y
        let options = reversal("reverse_all").with_option("controller_mode", "side");
        let mapping = compose(DeviceRole::EmulatedWiimote, &options);
        assert_eq!(mapping.table.primary(LogicalInput::X), Some("Buttons/Y"));
    }

    #[test]
    fn test_rotate_on_gamecube() {
        let mapping = compose(DeviceRole::StandardPad, &reversal("reverse_rotate"));
        assert_eq!(mapping.table.primary(LogicalInput::B), Some("Buttons/A"));
        assert_eq!(mapping.table.primary(LogicalInput::Y), Some("Buttons/B"));
        assert_eq!(mapping.table.primary(LogicalInput::X), Some("Buttons/Y"));
        assert_eq!(mapping.table.primary(LogicalInput::A), Some("Buttons/X"));
    }

    #[test]
    fn test_vs4_only_for_triforce() {
        let options = SystemOptions::new().with_option("triforce_mapping", "vs4");
        let triforce = compose(DeviceRole::TriforcePad, &options);
        assert_eq!(
            triforce.table.primary(LogicalInput::Joystick1Left),
            Some("Main Stick/Down")
        );
        assert_eq!(triforce.reverse_axes, VS4_REVERSE_AXES);

        let standard = compose(DeviceRole::StandardPad, &options);
        assert_eq!(
            standard.table.primary(LogicalInput::Joystick1Left),
            Some("Main Stick/Left")
        );
    }

    #[test]
    fn test_keyboard_table() {
        let mapping = compose(DeviceRole::StandardPad, &reversal("reverse_ab"));
        let keyboard = mapping.keyboard_table();
        assert_eq!(keyboard.primary(LogicalInput::A), Some("Buttons/B"));
        assert_eq!(keyboard.primary(LogicalInput::B), Some("Buttons/A"));
        assert_eq!(keyboard.primary(LogicalInput::X), Some("Buttons/X"));
        assert_eq!(keyboard.primary(LogicalInput::Up), Some("Main Stick/Up"));
        assert!(!keyboard.contains(LogicalInput::Joystick1Up));
        assert!(!keyboard.contains(LogicalInput::Joystick1Left));
        assert!(keyboard.contains(LogicalInput::Joystick2Up));
    }

    #[test]
    fn test_keyboard_ignores_rotation() {
        let mapping = compose(DeviceRole::StandardPad, &reversal("reverse_rotate"));
        let keyboard = mapping.keyboard_table();
        assert_eq!(keyboard.primary(LogicalInput::A), Some("Buttons/A"));
        assert_eq!(keyboard.primary(LogicalInput::Y), Some("Buttons/Y"));
    }
}
