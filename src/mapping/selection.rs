//! Device role and base table selection.

use super::overlay::TriforceLayout;
use super::tables::{
    MappingTable, ReplacementTable, ReverseAxisTable, GAMECUBE_ALT_LAYOUT,
    GAMECUBE_REPLACEMENTS, GAMECUBE_REVERSE_AXES, GAMECUBE_STANDARD, VS4_REVERSE_AXES,
    WII_EMULATED_BASE, WII_REVERSE_AXES,
};
use crate::config::SystemOptions;
use crate::persistence::ConfigFile;
use tracing::debug;

/// Console family of the game being launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum System {
    #[default]
    GameCube,
    Wii,
}

impl System {
    /// Anything other than `wii` is configured as a GameCube.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("wii") {
            System::Wii
        } else {
            System::GameCube
        }
    }
}

/// What the player's pad stands in for inside the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    /// GameCube pad, also used next to real Wii remotes.
    StandardPad,
    /// GameCube pad on a Triforce arcade board.
    TriforcePad,
    /// Pad driving an emulated Wii remote.
    EmulatedWiimote,
}

impl DeviceRole {
    pub fn select(system: System, triforce: bool, options: &SystemOptions) -> Self {
        let role = match system {
            System::Wii if options.get_bool("emulatedwiimotes") => DeviceRole::EmulatedWiimote,
            System::Wii => DeviceRole::StandardPad,
            System::GameCube if triforce => DeviceRole::TriforcePad,
            System::GameCube => DeviceRole::StandardPad,
        };
        debug!("Selected role {:?} for {:?} (triforce: {})", role, system, triforce);
        role
    }

    pub fn file(self) -> ConfigFile {
        match self {
            DeviceRole::EmulatedWiimote => ConfigFile::Wiimote,
            DeviceRole::StandardPad | DeviceRole::TriforcePad => ConfigFile::GcPad,
        }
    }

    /// `GCPad<n>` or `Wiimote<n>`.
    pub fn section(self, player: u8) -> String {
        match self {
            DeviceRole::EmulatedWiimote => format!("Wiimote{}", player),
            DeviceRole::StandardPad | DeviceRole::TriforcePad => format!("GCPad{}", player),
        }
    }
}

/// Base table of a role plus its axis and replacement tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSelection {
    pub role: DeviceRole,
    pub table: MappingTable,
    pub reverse_axes: ReverseAxisTable,
    pub replacements: Option<ReplacementTable>,
}

impl TableSelection {
    pub fn for_role(role: DeviceRole, layout: TriforceLayout) -> Self {
        match role {
            DeviceRole::StandardPad => Self {
                role,
                table: MappingTable::from_template("gamecube-standard", GAMECUBE_STANDARD),
                reverse_axes: GAMECUBE_REVERSE_AXES,
                replacements: Some(GAMECUBE_REPLACEMENTS),
            },
            DeviceRole::TriforcePad => Self {
                role,
                table: MappingTable::from_template("gamecube-alt-layout", GAMECUBE_ALT_LAYOUT),
                reverse_axes: match layout {
                    TriforceLayout::Vs4 => VS4_REVERSE_AXES,
                    TriforceLayout::Standard => GAMECUBE_REVERSE_AXES,
                },
                replacements: Some(GAMECUBE_REPLACEMENTS),
            },
            DeviceRole::EmulatedWiimote => Self {
                role,
                table: MappingTable::from_template("wii-emulated-base", WII_EMULATED_BASE),
                reverse_axes: WII_REVERSE_AXES,
                replacements: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::input::LogicalInput;

    #[test]
    fn test_system_from_name() {
        assert_eq!(System::from_name("wii"), System::Wii);
        assert_eq!(System::from_name("Wii"), System::Wii);
        assert_eq!(System::from_name("gamecube"), System::GameCube);
        assert_eq!(System::from_name("triforce"), System::GameCube);
        assert_eq!(System::from_name(""), System::GameCube);
    }

    #[test]
    fn test_role_selection() {
        let none = SystemOptions::new();
        let emulated = SystemOptions::new().with_option("emulatedwiimotes", "1");

        assert_eq!(DeviceRole::select(System::GameCube, false, &none), DeviceRole::StandardPad);
        assert_eq!(DeviceRole::select(System::GameCube, true, &none), DeviceRole::TriforcePad);
        assert_eq!(DeviceRole::select(System::Wii, false, &none), DeviceRole::StandardPad);
        assert_eq!(
            DeviceRole::select(System::Wii, false, &emulated),
            DeviceRole::EmulatedWiimote
        );
        // wii wins over the triforce flag
        assert_eq!(DeviceRole::select(System::Wii, true, &none), DeviceRole::StandardPad);
    }

    #[test]
    fn test_sections() {
        assert_eq!(DeviceRole::StandardPad.section(2), "GCPad2");
        assert_eq!(DeviceRole::TriforcePad.section(1), "GCPad1");
        assert_eq!(DeviceRole::EmulatedWiimote.section(4), "Wiimote4");
        assert_eq!(DeviceRole::EmulatedWiimote.file(), ConfigFile::Wiimote);
    }

    #[test]
    fn test_triforce_reverse_axes_follow_layout() {
        let standard = TableSelection::for_role(DeviceRole::TriforcePad, TriforceLayout::Standard);
        let vs4 = TableSelection::for_role(DeviceRole::TriforcePad, TriforceLayout::Vs4);
        assert_eq!(standard.reverse_axes, GAMECUBE_REVERSE_AXES);
        assert_eq!(vs4.reverse_axes, VS4_REVERSE_AXES);
        assert!(!vs4.table.contains(LogicalInput::R1));
    }

    #[test]
    fn test_wiimote_has_no_replacements() {
        let wii = TableSelection::for_role(DeviceRole::EmulatedWiimote, TriforceLayout::Standard);
        assert_eq!(wii.replacements, None);
        assert_eq!(wii.table.name(), "wii-emulated-base");
    }
}
