//! One configuration pass: options and controllers in, settings batch out.

use super::calibration;
use super::hotkeys::{self, HOTKEYS_SECTION};
use super::keyboard::KeyTranslator;
use super::overlay::{EffectiveMapping, OverlayContext};
use super::ports;
use super::resolver::{BindingResolver, PlayerResolution};
use super::selection::{DeviceRole, System, TableSelection};
use crate::config::{LaunchProfile, SystemOptions};
use crate::controller::{AccessTechnology, ControllerCapability};
use crate::persistence::{ConfigFile, SettingsBatch};
use tracing::{debug, info, warn};

const MAX_PLAYERS: u8 = 4;

/// Result of [`MappingCompiler::compile`].
#[derive(Debug, Clone, Default)]
pub struct CompileOutcome {
    pub batch: SettingsBatch,
    /// `false` when automatic configuration is disabled for this launch.
    pub compiled: bool,
    /// Resolved players, ascending by slot.
    pub players: Vec<PlayerResolution>,
}

#[derive(Debug, Clone)]
pub struct MappingCompiler {
    system: System,
    triforce: bool,
    options: SystemOptions,
}

impl MappingCompiler {
    pub fn new(system: System, triforce: bool, options: SystemOptions) -> Self {
        Self {
            system,
            triforce,
            options,
        }
    }

    pub fn from_profile(profile: &LaunchProfile) -> Self {
        Self::new(
            System::from_name(&profile.system),
            profile.triforce,
            profile.options.clone(),
        )
    }

    pub fn compile(&self, controllers: &[ControllerCapability]) -> CompileOutcome {
        if self.options.get("disableautocontrollers") == "1" {
            info!("Automatic controller configuration disabled");
            return CompileOutcome::default();
        }

        let options = &self.options;
        let role = DeviceRole::select(self.system, self.triforce, options);
        let mut batch = SettingsBatch::new();

        // Ports zuerst, sie haengen nur von der Rolle ab
        let assigned = ports::assign(self.system, role, options, controllers);
        ports::write_ports(&mut batch, &assigned);
        if self.system == System::Wii && role == DeviceRole::StandardPad {
            info!("Real Wii remotes, emulated pads stay GameCube pads");
            ports::write_real_wiimote_sources(&mut batch);
        }

        let context = OverlayContext::from_options(options);
        let mapping =
            EffectiveMapping::compose(TableSelection::for_role(role, context.triforce_layout), context);

        let force_sdl = options.get_bool("input_forceSDL");
        let translator = KeyTranslator::new(
            options
                .non_empty("keyboard_layout")
                .and_then(|layout| layout.trim().parse().ok()),
        );
        let mut resolver = BindingResolver::new(&mapping, force_sdl, translator);

        let mut sorted: Vec<&ControllerCapability> = controllers.iter().collect();
        sorted.sort_by_key(|pad| pad.player);

        let file = role.file();
        let mut players = Vec::new();
        let mut first: Option<(&ControllerCapability, AccessTechnology)> = None;

        for pad in sorted {
            if pad.player == 0 || pad.player > MAX_PLAYERS {
                warn!("Ignoring controller {:?} in slot {}", pad.name, pad.player);
                continue;
            }
            let section = role.section(pad.player);
            batch.clear_section(file, &section);

            let Some(resolution) = resolver.resolve(pad) else {
                continue;
            };

            batch.write(file, &section, "Device", resolution.device.as_str());
            for extra in &mapping.extra_options {
                batch.write(file, &section, extra.key, extra.value);
            }
            for binding in &resolution.bindings {
                batch.write(file, &binding.section, binding.path, binding.value.as_str());
            }

            match role {
                DeviceRole::EmulatedWiimote => {
                    calibration::write_wiimote(&mut batch, &section, options, pad, context.mode)
                }
                DeviceRole::StandardPad | DeviceRole::TriforcePad => calibration::write_gamecube(
                    &mut batch,
                    &section,
                    options,
                    resolution.rumble_motor,
                ),
            }

            if pad.player == 1 {
                first = Some((pad, resolution.technology));
            }
            players.push(resolution);
        }

        let hotkeys = hotkeys::synthesize(first.map(|(pad, _)| pad), first.map(|(_, t)| t));
        for (key, value) in hotkeys {
            batch.write(ConfigFile::Hotkeys, HOTKEYS_SECTION, key, value);
        }

        debug!(
            "Pass finished: {} players, {} settings",
            players.len(),
            batch.len()
        );
        CompileOutcome {
            batch,
            compiled: true,
            players,
        }
    }
}
