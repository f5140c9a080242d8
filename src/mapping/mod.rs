//! Mapping compiler: turns connected controllers into Dolphin input settings.
//!
//! A pass runs in fixed stages:
//!
//! 1. [`selection`] picks the device role and copies its base table
//! 2. [`overlay`] applies mode, reversal and layout overlays to that copy
//! 3. [`resolver`] encodes every entry per player through a [`technology`] encoder,
//!    using [`keyboard`] for key codes
//! 4. [`hotkeys`] derives the emulator hotkeys from player 1
//!
//! [`compiler`] drives the stages and adds the numeric settings ([`calibration`]) and
//! port assignment ([`ports`]). Nothing here touches the file system; the result is a
//! [`SettingsBatch`](crate::persistence::SettingsBatch).

pub mod calibration;
pub mod compiler;
pub mod hotkeys;
pub mod input;
pub mod keyboard;
pub mod overlay;
pub mod ports;
pub mod resolver;
pub mod selection;
pub mod tables;
pub mod technology;

// Re-exports für einfacheren Zugriff
pub use compiler::{CompileOutcome, MappingCompiler};
pub use input::LogicalInput;
pub use keyboard::KeyTranslator;
pub use overlay::{EffectiveMapping, FaceReversal, OverlayContext, TriforceLayout, WiimoteMode};
pub use resolver::{BindingResolver, PlayerResolution, ResolvedBinding};
pub use selection::{DeviceRole, System, TableSelection};
pub use tables::MappingTable;
pub use technology::TechnologyEncoder;
