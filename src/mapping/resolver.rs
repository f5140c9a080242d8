//! Per-player binding resolution.

use super::input::LogicalInput;
use super::keyboard::KeyTranslator;
use super::overlay::EffectiveMapping;
use super::selection::DeviceRole;
use super::tables::{BindingPath, MappingTable};
use super::technology::encoder_for;
use crate::controller::{AccessTechnology, ControllerCapability, PhysicalInput};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// One `(section, path, value)` write for a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    pub section: String,
    pub path: BindingPath,
    pub value: String,
}

/// Everything resolved for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResolution {
    pub player: u8,
    pub section: String,
    /// Technology the player is addressed with (forced SDL reports `Sdl`).
    pub technology: AccessTechnology,
    pub device: String,
    pub bindings: Vec<ResolvedBinding>,
    pub rumble_motor: &'static str,
}

impl PlayerResolution {
    /// Value bound to `path`, if any.
    pub fn value(&self, path: &str) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.path == path)
            .map(|b| b.value.as_str())
    }
}

/// Resolves the players of one pass against a shared [`EffectiveMapping`].
pub struct BindingResolver<'a> {
    mapping: &'a EffectiveMapping,
    force_sdl: bool,
    translator: KeyTranslator,
    device_counts: HashMap<String, usize>,
}

impl<'a> BindingResolver<'a> {
    pub fn new(mapping: &'a EffectiveMapping, force_sdl: bool, translator: KeyTranslator) -> Self {
        Self {
            mapping,
            force_sdl,
            translator,
            device_counts: HashMap::new(),
        }
    }

    /// Resolves one player. Call in ascending player order so device indices line up.
    pub fn resolve(&mut self, pad: &ControllerCapability) -> Option<PlayerResolution> {
        let Some(encoder) = encoder_for(pad, self.force_sdl, self.translator) else {
            info!("Skipping player {}: unsupported device {:?}", pad.player, pad.name);
            return None;
        };

        let device_key = format!("{}/{}", encoder.backend(), encoder.device_name(pad));
        let counter = self.device_counts.entry(device_key).or_insert(0);
        let device = encoder.device_address(pad, *counter);
        *counter += 1;

        let section = self.mapping.role.section(pad.player);
        let table: Cow<'_, MappingTable> = if encoder.technology() == AccessTechnology::Keyboard {
            Cow::Owned(self.mapping.keyboard_table())
        } else {
            Cow::Borrowed(&self.mapping.table)
        };

        let mut bindings = Vec::new();
        for (input, paths) in table.iter() {
            let Some((forward, companion)) = self.descriptors(pad, input) else {
                trace!("Player {} has no {}", pad.player, input);
                continue;
            };

            for &path in paths {
                if let Some(value) = encoder.encode(&forward, false) {
                    bindings.push(ResolvedBinding {
                        section: section.clone(),
                        path,
                        value,
                    });
                }

                let Some(reverse_path) = self.mapping.reverse_axes.companion(path) else {
                    continue;
                };
                let reverse_value = match companion {
                    Companion::Reversed => encoder.encode(&forward, true),
                    Companion::StandIn(Some(stand_in)) => encoder.encode(&stand_in, false),
                    Companion::StandIn(None) => None,
                };
                if let Some(value) = reverse_value {
                    bindings.push(ResolvedBinding {
                        section: section.clone(),
                        path: reverse_path,
                        value,
                    });
                }
            }
        }

        if self.mapping.role == DeviceRole::TriforcePad {
            if let Some(combo) = encoder.service_menu_combo() {
                bindings.push(ResolvedBinding {
                    section: section.clone(),
                    path: "Buttons/Z",
                    value: combo.to_string(),
                });
            }
        }

        debug!(
            "Player {} on {} resolved {} bindings",
            pad.player,
            device,
            bindings.len()
        );
        Some(PlayerResolution {
            player: pad.player,
            section,
            technology: encoder.technology(),
            device,
            bindings,
            rumble_motor: encoder.rumble_motor(),
        })
    }

    /// Forward descriptor of `input` and where its opposite direction comes from.
    fn descriptors(
        &self,
        pad: &ControllerCapability,
        input: LogicalInput,
    ) -> Option<(PhysicalInput, Companion)> {
        if let Some(physical) = pad.input(input) {
            return Some((*physical, Companion::Reversed));
        }

        let replacements = self.mapping.replacements?;
        let stand_in = replacements.fallback(input.name())?;
        let forward = *pad.input(stand_in)?;
        debug!("Player {}: {} replaced by {}", pad.player, input, stand_in);

        let reverse = input
            .opposite_stick_name()
            .and_then(|name| replacements.fallback(name))
            .and_then(|opposite| pad.input(opposite).copied());
        Some((forward, Companion::StandIn(reverse)))
    }
}

/// Source of a reverse-axis companion.
#[derive(Debug, Clone, Copy)]
enum Companion {
    /// The forward descriptor read the other way.
    Reversed,
    /// Digital stand-in of the opposite direction, when the pad has one.
    StandIn(Option<PhysicalInput>),
}
