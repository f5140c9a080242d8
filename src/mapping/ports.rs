//! Serial interface port assignment (`Dolphin.ini`, section `Core`).

use super::selection::{DeviceRole, System};
use crate::config::SystemOptions;
use crate::controller::ControllerCapability;
use crate::persistence::{ConfigFile, SettingsBatch};
use tracing::debug;

pub const CORE_SECTION: &str = "Core";
pub const PORT_COUNT: u8 = 4;

/// Device Dolphin attaches to a GameCube port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SiDevice {
    None = 0,
    StandardController = 6,
    AmBaseboard = 11,
    WiiUAdapter = 12,
}

impl SiDevice {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Devices for ports 0..4.
pub fn assign(
    system: System,
    role: DeviceRole,
    options: &SystemOptions,
    controllers: &[ControllerCapability],
) -> [SiDevice; PORT_COUNT as usize] {
    match role {
        DeviceRole::EmulatedWiimote => [SiDevice::None; PORT_COUNT as usize],
        DeviceRole::TriforcePad => [
            SiDevice::AmBaseboard,
            SiDevice::AmBaseboard,
            SiDevice::None,
            SiDevice::None,
        ],
        DeviceRole::StandardPad => {
            let mut ports = [SiDevice::None; PORT_COUNT as usize];
            for (port, device) in ports.iter_mut().enumerate() {
                let adapter = match system {
                    System::Wii => options.get_bool("wii_gamecube"),
                    System::GameCube => options.get_bool(&format!("gamecubepad{}", port)),
                };
                let occupied = controllers
                    .iter()
                    .any(|c| usize::from(c.player) == port + 1 && c.is_supported());

                *device = if adapter {
                    SiDevice::WiiUAdapter
                } else if occupied {
                    SiDevice::StandardController
                } else {
                    SiDevice::None
                };
            }
            ports
        }
    }
}

pub fn write_ports(batch: &mut SettingsBatch, ports: &[SiDevice]) {
    for (port, device) in ports.iter().enumerate() {
        batch.write(
            ConfigFile::Dolphin,
            CORE_SECTION,
            format!("SIDevice{}", port),
            device.code().to_string(),
        );
    }
    debug!("Ports: {:?}", ports);
}

/// Hands every Wii remote slot to a real remote.
pub fn write_real_wiimote_sources(batch: &mut SettingsBatch) {
    for slot in 1..=PORT_COUNT {
        let section = format!("Wiimote{}", slot);
        batch.clear_section(ConfigFile::Wiimote, &section);
        batch.write(ConfigFile::Wiimote, &section, "Source", "2");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::AccessTechnology;

    fn pads(players: &[u8]) -> Vec<ControllerCapability> {
        players
            .iter()
            .map(|p| ControllerCapability::new(*p, AccessTechnology::Sdl, "Pad"))
            .collect()
    }

    #[test]
    fn test_triforce_ports() {
        let ports = assign(
            System::GameCube,
            DeviceRole::TriforcePad,
            &SystemOptions::new(),
            &pads(&[1, 2, 3]),
        );
        let codes: Vec<u8> = ports.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![11, 11, 0, 0]);
    }

    #[test]
    fn test_standard_ports_follow_players() {
        let mut controllers = pads(&[1, 3]);
        controllers.push(ControllerCapability::new(2, AccessTechnology::Unsupported, "Wheel"));
        let ports = assign(
            System::GameCube,
            DeviceRole::StandardPad,
            &SystemOptions::new().with_option("gamecubepad3", "1"),
            &controllers,
        );
        assert_eq!(
            ports,
            [
                SiDevice::StandardController,
                SiDevice::None,
                SiDevice::StandardController,
                SiDevice::WiiUAdapter
            ]
        );
    }

    #[test]
    fn test_wii_gamecube_adapter_takes_every_port() {
        let ports = assign(
            System::Wii,
            DeviceRole::StandardPad,
            &SystemOptions::new().with_option("wii_gamecube", "true"),
            &[],
        );
        assert_eq!(ports, [SiDevice::WiiUAdapter; 4]);
    }

    #[test]
    fn test_emulated_wiimotes_free_all_ports() {
        let ports = assign(
            System::Wii,
            DeviceRole::EmulatedWiimote,
            &SystemOptions::new().with_option("wii_gamecube", "true"),
            &pads(&[1]),
        );
        assert_eq!(ports, [SiDevice::None; 4]);
    }

    #[test]
    fn test_real_wiimote_sources() {
        let mut batch = SettingsBatch::new();
        write_real_wiimote_sources(&mut batch);
        for slot in 1..=4 {
            let section = format!("Wiimote{}", slot);
            assert!(batch.is_cleared(ConfigFile::Wiimote, &section));
            assert_eq!(batch.value(ConfigFile::Wiimote, &section, "Source"), Some("2"));
        }
    }
}
